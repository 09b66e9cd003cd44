//! Session store and commit hooks.

use std::sync::Arc;

use super::model::SessionState;
use super::transition::Transition;
use crate::error::Result;

/// Observer notified after every successful commit.
///
/// Hooks run synchronously inside [`SessionStore::commit`] and must not fail
/// the transition; handle or log errors internally.
pub trait CommitHook: Send + Sync {
    fn after_commit(&self, transition: &Transition, state: &SessionState);
}

/// Owns the [`SessionState`] and routes every change through [`Transition`]s.
pub struct SessionStore {
    state: SessionState,
    hooks: Vec<Arc<dyn CommitHook>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::with_state(SessionState::new())
    }

    pub fn with_state(state: SessionState) -> Self {
        Self {
            state,
            hooks: Vec::new(),
        }
    }

    /// Registers a hook; it sees commits made from now on.
    pub fn subscribe(&mut self, hook: Arc<dyn CommitHook>) {
        self.hooks.push(hook);
    }

    /// Read-only view of the current state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Applies a transition and notifies hooks.
    ///
    /// Hooks are not called when the transition fails.
    pub fn commit(&mut self, transition: Transition) -> Result<()> {
        let name = transition.name();
        let record = transition.clone();
        transition.apply(&mut self.state)?;
        tracing::debug!("[SessionStore] commit: {}", name);

        for hook in &self.hooks {
            hook.after_commit(&record, &self.state);
        }
        Ok(())
    }

    /// Commits transitions in order, stopping at the first failure.
    pub fn commit_all(&mut self, transitions: impl IntoIterator<Item = Transition>) -> Result<()> {
        for transition in transitions {
            self.commit(transition)?;
        }
        Ok(())
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
