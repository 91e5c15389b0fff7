use crate::shared::TrendError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_PROJECTS: usize = 50;
pub const DEFAULT_MAX_SESSIONS_PER_PROJECT: usize = 10;
pub const DEFAULT_TTL_HOURS: u32 = 24;

/// Bounds on how much scan history is retained.
///
/// - `max_projects`: distinct project histories kept process-wide
/// - `max_sessions_per_project`: snapshots kept per project (oldest dropped first)
/// - `ttl_hours`: snapshots older than this are purged lazily
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetentionPolicy {
    max_projects: usize,
    max_sessions_per_project: usize,
    ttl_hours: u32,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            max_projects: DEFAULT_MAX_PROJECTS,
            max_sessions_per_project: DEFAULT_MAX_SESSIONS_PER_PROJECT,
            ttl_hours: DEFAULT_TTL_HOURS,
        }
    }
}

impl RetentionPolicy {
    pub fn new(
        max_projects: usize,
        max_sessions_per_project: usize,
        ttl_hours: u32,
    ) -> Result<Self, TrendError> {
        let policy = Self {
            max_projects,
            max_sessions_per_project,
            ttl_hours,
        };
        policy.validate()?;
        Ok(policy)
    }

    pub fn with_max_projects(mut self, max_projects: usize) -> Self {
        self.max_projects = max_projects;
        self
    }

    pub fn with_max_sessions_per_project(mut self, max_sessions: usize) -> Self {
        self.max_sessions_per_project = max_sessions;
        self
    }

    pub fn with_ttl_hours(mut self, ttl_hours: u32) -> Self {
        self.ttl_hours = ttl_hours;
        self
    }

    pub fn validate(&self) -> Result<(), TrendError> {
        if self.max_projects == 0 {
            return Err(TrendError::invalid_argument("max_projects must be at least 1"));
        }
        if self.max_sessions_per_project == 0 {
            return Err(TrendError::invalid_argument(
                "max_sessions_per_project must be at least 1",
            ));
        }
        if self.ttl_hours == 0 {
            return Err(TrendError::invalid_argument("ttl_hours must be at least 1"));
        }
        Ok(())
    }

    pub fn max_projects(&self) -> usize {
        self.max_projects
    }

    pub fn max_sessions_per_project(&self) -> usize {
        self.max_sessions_per_project
    }

    pub fn ttl_hours(&self) -> u32 {
        self.ttl_hours
    }

    pub fn ttl(&self) -> Duration {
        Duration::hours(i64::from(self.ttl_hours))
    }

    /// Snapshots taken before this instant are expired.
    pub fn expiry_cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - self.ttl()
    }

    pub fn is_expired(&self, timestamp: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        timestamp < self.expiry_cutoff(now)
    }
}
