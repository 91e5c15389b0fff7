pub mod error;
pub mod result;
pub mod security;

pub use error::{ExitCode, TrendError};
pub use result::Result;
