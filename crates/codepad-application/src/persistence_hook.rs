//! Mirrors the persisted projection of the session to durable storage.

use std::sync::Arc;

use codepad_core::error::Result;
use codepad_core::session::{CommitHook, SessionState, SessionStore, Transition};
use codepad_core::state::PersistedStateRepository;

/// Commit hook writing [`SessionState::persisted`] after every transition.
///
/// Write failures are logged; the transition has already been applied.
pub struct PersistenceHook {
    repository: Arc<dyn PersistedStateRepository>,
}

impl PersistenceHook {
    pub fn new(repository: Arc<dyn PersistedStateRepository>) -> Self {
        Self { repository }
    }
}

impl CommitHook for PersistenceHook {
    fn after_commit(&self, transition: &Transition, state: &SessionState) {
        if let Err(e) = self.repository.save(&state.persisted()) {
            tracing::warn!(
                "[PersistenceHook] failed to persist after {}: {}",
                transition.name(),
                e
            );
        }
    }
}

/// Restores the stored projection into `store`, then subscribes a
/// [`PersistenceHook`] so later commits are mirrored.
///
/// Returns whether a stored projection was found.
pub fn attach_persistence(
    store: &mut SessionStore,
    repository: Arc<dyn PersistedStateRepository>,
) -> Result<bool> {
    let restored = match repository.load()? {
        Some(persisted) => {
            store.commit(Transition::RestorePersisted(persisted))?;
            true
        }
        None => false,
    };

    store.subscribe(Arc::new(PersistenceHook::new(repository)));
    tracing::debug!("[PersistenceHook] attached (restored: {})", restored);
    Ok(restored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use codepad_core::error::CodepadError;
    use codepad_core::state::PersistedState;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryRepository {
        stored: Mutex<Option<PersistedState>>,
        writes: Mutex<usize>,
        fail: bool,
    }

    impl PersistedStateRepository for MemoryRepository {
        fn load(&self) -> Result<Option<PersistedState>> {
            Ok(self.stored.lock().unwrap().clone())
        }

        fn save(&self, state: &PersistedState) -> Result<()> {
            if self.fail {
                return Err(CodepadError::io("disk full"));
            }
            *self.writes.lock().unwrap() += 1;
            *self.stored.lock().unwrap() = Some(state.clone());
            Ok(())
        }
    }

    #[test]
    fn test_every_commit_is_mirrored() {
        let repository = Arc::new(MemoryRepository::default());
        let mut store = SessionStore::new();
        attach_persistence(&mut store, repository.clone()).unwrap();

        store.commit(Transition::SetFontSize(20)).unwrap();
        store.commit(Transition::SetTheme("light".into())).unwrap();

        assert_eq!(*repository.writes.lock().unwrap(), 2);
        let stored = repository.stored.lock().unwrap().clone().unwrap();
        assert_eq!(stored.font_size, 20);
    }

    #[test]
    fn test_restores_stored_projection() {
        let repository = Arc::new(MemoryRepository::default());
        *repository.stored.lock().unwrap() = Some(PersistedState {
            font: "Fira Code".into(),
            show_settings: true,
            ..PersistedState::default()
        });

        let mut store = SessionStore::new();
        let restored = attach_persistence(&mut store, repository.clone()).unwrap();

        assert!(restored);
        assert_eq!(store.state().font, "Fira Code");
        assert!(store.state().show_settings);
        // Restoring happens before the hook is attached.
        assert_eq!(*repository.writes.lock().unwrap(), 0);
    }

    #[test]
    fn test_write_failure_does_not_fail_commit() {
        let repository = Arc::new(MemoryRepository {
            fail: true,
            ..MemoryRepository::default()
        });
        let mut store = SessionStore::new();
        attach_persistence(&mut store, repository).unwrap();

        store.commit(Transition::SetFont("Hack".into())).unwrap();
        assert_eq!(store.state().font, "Hack");
    }
}
