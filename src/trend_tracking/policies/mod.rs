pub mod retention_policy;

pub use retention_policy::{
    RetentionPolicy, DEFAULT_MAX_PROJECTS, DEFAULT_MAX_SESSIONS_PER_PROJECT, DEFAULT_TTL_HOURS,
};
