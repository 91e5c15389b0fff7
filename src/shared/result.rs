/// Result alias used at the application edges (config, CLI, persistence).
/// The core services return `TrendError` directly so callers can match on it.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
