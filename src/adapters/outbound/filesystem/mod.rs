/// Filesystem adapters for file I/O operations
mod file_reader;
mod file_writer;
mod history_file;

pub use file_reader::FileSystemReader;
pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use history_file::{JsonHistoryFile, STATE_FORMAT_VERSION};
