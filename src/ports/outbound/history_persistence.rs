use crate::shared::Result;
use crate::trend_tracking::domain::ProjectHistory;

/// HistoryPersistence port for saving and reloading retained scan history
///
/// The history store itself performs no I/O; a file- or database-backed
/// collaborator implements this port to carry state across restarts.
pub trait HistoryPersistence {
    /// Persists the given histories, replacing any previously saved state
    ///
    /// # Errors
    /// Returns an error if the state cannot be serialized or written
    fn save(&self, histories: &[ProjectHistory]) -> Result<()>;

    /// Loads previously saved histories. Missing state yields an empty vector.
    ///
    /// # Errors
    /// Returns an error if existing state cannot be read or parsed
    fn load(&self) -> Result<Vec<ProjectHistory>>;
}
