/// Adapters layer - Infrastructure implementations
///
/// This layer contains concrete implementations of the outbound ports:
/// clocks, the in-memory history registry, and file I/O.
pub mod outbound;
