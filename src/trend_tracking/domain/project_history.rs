use super::coordinates::ProjectKey;
use super::snapshot::ScanSnapshot;
use crate::shared::TrendError;
use crate::trend_tracking::policies::RetentionPolicy;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Time-ordered scan history of one project, oldest snapshot first.
///
/// Mutations are primitive here; the store decides when each one runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectHistory {
    project_key: ProjectKey,
    snapshots: VecDeque<ScanSnapshot>,
    last_touched_at: DateTime<Utc>,
}

impl ProjectHistory {
    pub fn new(project_key: ProjectKey, now: DateTime<Utc>) -> Self {
        Self {
            project_key,
            snapshots: VecDeque::new(),
            last_touched_at: now,
        }
    }

    pub fn project_key(&self) -> &ProjectKey {
        &self.project_key
    }

    pub fn last_touched_at(&self) -> DateTime<Utc> {
        self.last_touched_at
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn snapshots(&self) -> impl DoubleEndedIterator<Item = &ScanSnapshot> {
        self.snapshots.iter()
    }

    pub fn latest(&self) -> Option<&ScanSnapshot> {
        self.snapshots.back()
    }

    /// The snapshot retained immediately before the latest one.
    pub fn previous(&self) -> Option<&ScanSnapshot> {
        self.snapshots.len().checked_sub(2).and_then(|i| self.snapshots.get(i))
    }

    /// The two most recent snapshots as `(previous, current)`.
    pub fn latest_pair(&self) -> Option<(&ScanSnapshot, &ScanSnapshot)> {
        Some((self.previous()?, self.latest()?))
    }

    /// Up to `limit` snapshots, most recent first.
    pub fn recent(&self, limit: usize) -> Vec<ScanSnapshot> {
        self.snapshots.iter().rev().take(limit).cloned().collect()
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_touched_at = now;
    }

    /// Appends `snapshot` as the newest entry.
    ///
    /// # Errors
    /// `InvalidArgument` when the snapshot belongs to another project or its
    /// timestamp is not strictly after the latest retained snapshot.
    pub fn append(&mut self, snapshot: ScanSnapshot) -> Result<(), TrendError> {
        if snapshot.project_key() != &self.project_key {
            return Err(TrendError::invalid_argument(format!(
                "snapshot for project '{}' cannot be recorded under '{}'",
                snapshot.project_key(),
                self.project_key
            )));
        }
        if let Some(latest) = self.latest() {
            if snapshot.timestamp() <= latest.timestamp() {
                return Err(TrendError::invalid_argument(format!(
                    "snapshot timestamp {} is not after the latest recorded scan {} for '{}'",
                    snapshot.timestamp(),
                    latest.timestamp(),
                    self.project_key
                )));
            }
        }
        self.snapshots.push_back(snapshot);
        Ok(())
    }

    /// Drops snapshots older than the policy TTL. Returns how many were dropped.
    pub fn purge_expired(&mut self, policy: &RetentionPolicy, now: DateTime<Utc>) -> usize {
        let before = self.snapshots.len();
        // oldest first, so expired snapshots form a prefix
        while self
            .snapshots
            .front()
            .is_some_and(|s| policy.is_expired(s.timestamp(), now))
        {
            self.snapshots.pop_front();
        }
        before - self.snapshots.len()
    }

    /// Drops the oldest snapshots until at most `max_sessions` remain.
    pub fn enforce_capacity(&mut self, max_sessions: usize) -> usize {
        let excess = self.snapshots.len().saturating_sub(max_sessions);
        self.snapshots.drain(..excess);
        excess
    }

    /// True when snapshots are strictly increasing in time and all belong to
    /// this project. Used to vet histories loaded from persistence.
    pub fn is_well_formed(&self) -> bool {
        self.snapshots.iter().all(|s| s.project_key() == &self.project_key)
            && self
                .snapshots
                .iter()
                .zip(self.snapshots.iter().skip(1))
                .all(|(a, b)| a.timestamp() < b.timestamp())
    }
}
