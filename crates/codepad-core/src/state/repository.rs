//! Persisted state repository trait.

use crate::error::Result;
use crate::state::model::PersistedState;

/// Durable storage for the persisted projection of the session.
///
/// Calls are synchronous because they run inside commit hooks.
pub trait PersistedStateRepository: Send + Sync {
    /// Returns the stored projection, or `None` when nothing was saved yet.
    fn load(&self) -> Result<Option<PersistedState>>;

    /// Replaces the stored projection.
    fn save(&self, state: &PersistedState) -> Result<()>;
}
