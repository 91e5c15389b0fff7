/// Outbound adapters - Infrastructure implementations of outbound ports
pub mod clock;
pub mod filesystem;
pub mod formatters;
pub mod memory;
