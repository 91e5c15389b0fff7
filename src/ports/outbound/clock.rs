use chrono::{DateTime, Utc};

/// Clock port supplying the current time
///
/// TTL expiry and project recency are computed against this clock rather
/// than the system time directly, so they can be driven explicitly.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
