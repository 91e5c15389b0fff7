use super::scan_record_store::{Recording, ScanRecordStore};
use crate::adapters::outbound::clock::SystemClock;
use crate::ports::outbound::{Clock, ScanHistoryRepository};
use crate::shared::TrendError;
use crate::trend_tracking::domain::{
    ProjectHistory, ProjectKey, ProjectStats, ProjectSummary, ScanSnapshot,
};
use crate::trend_tracking::policies::RetentionPolicy;
use parking_lot::Mutex;
use tracing::info;

/// InMemoryProjectRegistry adapter implementing ScanHistoryRepository
///
/// Bounds the number of tracked projects to `max_projects`. When a scan for a
/// project not yet tracked arrives and the registry is full, the project
/// touched longest ago is dropped together with its whole history.
///
/// Recording into a project that is already tracked never takes the admission
/// lock and never creates an entry. Only the admission path inserts projects or
/// evicts them, so the map never holds more than `max_projects` entries.
pub struct InMemoryProjectRegistry<C: Clock = SystemClock> {
    store: ScanRecordStore<C>,
    admission: Mutex<()>,
}

impl InMemoryProjectRegistry<SystemClock> {
    /// Registry reading the wall clock
    pub fn with_policy(policy: RetentionPolicy) -> Result<Self, TrendError> {
        Self::new(policy, SystemClock)
    }
}

impl<C: Clock> InMemoryProjectRegistry<C> {
    /// # Errors
    /// `InvalidArgument` if any of the policy's bounds is zero.
    pub fn new(policy: RetentionPolicy, clock: C) -> Result<Self, TrendError> {
        policy.validate()?;
        Ok(Self {
            store: ScanRecordStore::new(policy, clock),
            admission: Mutex::new(()),
        })
    }

    pub fn policy(&self) -> &RetentionPolicy {
        self.store.policy()
    }

    pub fn project_count(&self) -> usize {
        self.store.project_count()
    }

    pub fn contains(&self, project_key: &ProjectKey) -> bool {
        self.store.contains(project_key)
    }

    /// Drops every project and its history.
    pub fn clear(&self) {
        let _admission = self.admission.lock();
        self.store.clear();
    }

    /// Snapshot of all tracked histories, for persistence.
    pub fn export_histories(&self) -> Vec<ProjectHistory> {
        let mut histories = self.store.export();
        histories.sort_by(|a, b| a.project_key().cmp(b.project_key()));
        histories
    }

    /// Installs previously exported histories.
    ///
    /// Retention is applied on the way in: expired snapshots are purged, each
    /// history is trimmed to the session cap, and projects are admitted in
    /// order of last touch so the project cap keeps the most recent ones.
    ///
    /// # Errors
    /// `InvalidInput` if a history is out of order or holds a snapshot of a
    /// different project. Nothing is installed in that case.
    pub fn import_histories(&self, histories: Vec<ProjectHistory>) -> Result<(), TrendError> {
        if let Some(broken) = histories.iter().find(|h| !h.is_well_formed()) {
            return Err(TrendError::invalid_input(format!(
                "stored history for '{}' is not in chronological order or mixes projects",
                broken.project_key()
            )));
        }

        let policy = *self.policy();
        let now = self.store.now();
        let mut histories = histories;
        histories.sort_by(|a, b| {
            a.last_touched_at()
                .cmp(&b.last_touched_at())
                .then_with(|| a.project_key().cmp(b.project_key()))
        });

        let _admission = self.admission.lock();
        for mut history in histories {
            history.purge_expired(&policy, now);
            history.enforce_capacity(policy.max_sessions_per_project());
            if !self.store.contains(history.project_key()) {
                self.make_room();
            }
            self.store.insert_history(history);
        }
        Ok(())
    }

    /// Evicts least recently touched projects until a new one fits.
    /// Caller holds the admission lock.
    fn make_room(&self) {
        let max_projects = self.policy().max_projects();
        while self.store.project_count() >= max_projects {
            let Some(victim) = self.store.least_recently_touched() else {
                break;
            };
            if self.store.remove_project(&victim) {
                info!(project = %victim, max_projects, "evicted least recently used project");
            }
        }
    }
}

impl<C: Clock> ScanHistoryRepository for InMemoryProjectRegistry<C> {
    fn store_scan_result(&self, snapshot: ScanSnapshot) -> Result<(), TrendError> {
        let project_key = snapshot.project_key().clone();
        let snapshot = match self.store.record_existing(&project_key, snapshot)? {
            Recording::Recorded => return Ok(()),
            Recording::Untracked(snapshot) => snapshot,
        };

        let _admission = self.admission.lock();
        if !self.store.contains(&project_key) {
            self.make_room();
        }
        self.store.record_scan(&project_key, snapshot)
    }

    fn get_scan_history(&self, project_key: &ProjectKey, limit: usize) -> Vec<ScanSnapshot> {
        self.store.get_history(project_key, limit)
    }

    fn get_project_stats(&self, project_key: &ProjectKey) -> Option<ProjectStats> {
        self.store.get_project_stats(project_key)
    }

    fn get_all_projects(&self) -> Vec<ProjectSummary> {
        let mut summaries = self.store.summaries();
        summaries.sort_by(|a, b| {
            b.last_scan_time
                .cmp(&a.last_scan_time)
                .then_with(|| a.project_key.cmp(&b.project_key))
        });
        summaries
    }
}
