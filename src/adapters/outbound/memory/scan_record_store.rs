use crate::adapters::outbound::clock::SystemClock;
use crate::ports::outbound::Clock;
use crate::shared::TrendError;
use crate::trend_tracking::domain::{
    ProjectHistory, ProjectKey, ProjectStats, ProjectSummary, ScanSnapshot,
};
use crate::trend_tracking::policies::RetentionPolicy;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;

type HistorySlot = Arc<Mutex<ProjectHistory>>;

/// Result of recording into a project that may not be tracked.
#[derive(Debug)]
pub(crate) enum Recording {
    Recorded,
    /// The project has no history slot; the snapshot is handed back.
    Untracked(ScanSnapshot),
}

/// ScanRecordStore keeps the bounded per-project scan histories.
///
/// Each project's history sits behind its own mutex, so recording or reading
/// one project never waits on another. The map itself is only locked for the
/// short lookups that hand out a project's slot.
///
/// Every access to a history first purges snapshots older than the TTL; a
/// record then appends and trims the oldest snapshots beyond
/// `max_sessions_per_project`. Whole projects are never evicted here.
pub struct ScanRecordStore<C: Clock = SystemClock> {
    histories: DashMap<ProjectKey, HistorySlot>,
    policy: RetentionPolicy,
    clock: C,
}

impl<C: Clock> ScanRecordStore<C> {
    pub fn new(policy: RetentionPolicy, clock: C) -> Self {
        Self {
            histories: DashMap::new(),
            policy,
            clock,
        }
    }

    pub fn policy(&self) -> &RetentionPolicy {
        &self.policy
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Appends `snapshot` to the history of `project_key`, creating it if needed.
    ///
    /// # Errors
    /// `InvalidArgument` when the snapshot belongs to a different project or is
    /// not newer than the latest retained snapshot.
    pub fn record_scan(
        &self,
        project_key: &ProjectKey,
        snapshot: ScanSnapshot,
    ) -> Result<(), TrendError> {
        Self::check_key(project_key, &snapshot)?;

        loop {
            let now = self.clock.now();
            let slot = self.slot_or_insert(project_key, now);
            let mut history = slot.lock();
            // the slot may have been unlinked between lookup and lock
            if self.is_linked(project_key, &slot) {
                return self.append(&mut history, snapshot, now);
            }
        }
    }

    /// Like `record_scan`, but never creates a project.
    ///
    /// # Errors
    /// Same as `record_scan`.
    pub(crate) fn record_existing(
        &self,
        project_key: &ProjectKey,
        snapshot: ScanSnapshot,
    ) -> Result<Recording, TrendError> {
        Self::check_key(project_key, &snapshot)?;

        let Some(slot) = self.slot(project_key) else {
            return Ok(Recording::Untracked(snapshot));
        };
        let mut history = slot.lock();
        if !self.is_linked(project_key, &slot) {
            return Ok(Recording::Untracked(snapshot));
        }
        self.append(&mut history, snapshot, self.clock.now())?;
        Ok(Recording::Recorded)
    }

    /// Up to `limit` snapshots, most recent first; empty for unknown projects.
    pub fn get_history(&self, project_key: &ProjectKey, limit: usize) -> Vec<ScanSnapshot> {
        self.with_purged(project_key, |history| history.recent(limit))
            .unwrap_or_default()
    }

    pub fn get_project_stats(&self, project_key: &ProjectKey) -> Option<ProjectStats> {
        self.with_purged(project_key, ProjectStats::from_history)
            .flatten()
    }

    pub fn contains(&self, project_key: &ProjectKey) -> bool {
        self.histories.contains_key(project_key)
    }

    pub fn project_count(&self) -> usize {
        self.histories.len()
    }

    /// Unlinks a project while holding its history lock, so a recorder that
    /// already holds the slot finishes before the project goes away.
    pub(crate) fn remove_project(&self, project_key: &ProjectKey) -> bool {
        let Some(slot) = self.slot(project_key) else {
            return false;
        };
        let _history = slot.lock();
        self.histories
            .remove_if(project_key, |_, current| Arc::ptr_eq(current, &slot))
            .is_some()
    }

    /// Project touched longest ago; ties go to the smaller key.
    pub(crate) fn least_recently_touched(&self) -> Option<ProjectKey> {
        self.slots()
            .into_iter()
            .map(|(key, slot)| (slot.lock().last_touched_at(), key))
            .min()
            .map(|(_, key)| key)
    }

    /// Summaries of projects that still retain at least one snapshot.
    pub(crate) fn summaries(&self) -> Vec<ProjectSummary> {
        let now = self.clock.now();
        self.slots()
            .into_iter()
            .filter_map(|(_, slot)| {
                let mut history = slot.lock();
                history.purge_expired(&self.policy, now);
                ProjectSummary::from_history(&history)
            })
            .collect()
    }

    pub(crate) fn export(&self) -> Vec<ProjectHistory> {
        self.slots()
            .into_iter()
            .map(|(_, slot)| slot.lock().clone())
            .collect()
    }

    /// Installs `history` wholesale, replacing any history under the same key.
    pub(crate) fn insert_history(&self, history: ProjectHistory) {
        self.histories
            .insert(history.project_key().clone(), Arc::new(Mutex::new(history)));
    }

    pub(crate) fn clear(&self) {
        self.histories.clear();
    }

    fn check_key(project_key: &ProjectKey, snapshot: &ScanSnapshot) -> Result<(), TrendError> {
        if snapshot.project_key() != project_key {
            return Err(TrendError::invalid_argument(format!(
                "snapshot for project '{}' cannot be recorded under '{}'",
                snapshot.project_key(),
                project_key
            )));
        }
        Ok(())
    }

    fn append(
        &self,
        history: &mut ProjectHistory,
        snapshot: ScanSnapshot,
        now: DateTime<Utc>,
    ) -> Result<(), TrendError> {
        let expired = history.purge_expired(&self.policy, now);
        history.append(snapshot)?;
        let trimmed = history.enforce_capacity(self.policy.max_sessions_per_project());
        history.touch(now);

        if expired > 0 || trimmed > 0 {
            debug!(
                project = %history.project_key(),
                expired,
                trimmed,
                retained = history.len(),
                "evicted snapshots"
            );
        }
        Ok(())
    }

    /// True while `slot` is still the map's entry for `project_key`.
    fn is_linked(&self, project_key: &ProjectKey, slot: &HistorySlot) -> bool {
        self.histories
            .get(project_key)
            .is_some_and(|entry| Arc::ptr_eq(entry.value(), slot))
    }

    fn slot(&self, project_key: &ProjectKey) -> Option<HistorySlot> {
        // clone the Arc so the map guard is released before the history is locked
        self.histories
            .get(project_key)
            .map(|entry| Arc::clone(entry.value()))
    }

    fn slot_or_insert(&self, project_key: &ProjectKey, now: DateTime<Utc>) -> HistorySlot {
        Arc::clone(
            self.histories
                .entry(project_key.clone())
                .or_insert_with(|| {
                    Arc::new(Mutex::new(ProjectHistory::new(project_key.clone(), now)))
                })
                .value(),
        )
    }

    fn slots(&self) -> Vec<(ProjectKey, HistorySlot)> {
        self.histories
            .iter()
            .map(|entry| (entry.key().clone(), Arc::clone(entry.value())))
            .collect()
    }

    fn with_purged<T>(
        &self,
        project_key: &ProjectKey,
        f: impl FnOnce(&ProjectHistory) -> T,
    ) -> Option<T> {
        let slot = self.slot(project_key)?;
        let mut history = slot.lock();
        let expired = history.purge_expired(&self.policy, self.clock.now());
        if expired > 0 {
            debug!(project = %project_key, expired, "purged expired snapshots");
        }
        Some(f(&*history))
    }
}
