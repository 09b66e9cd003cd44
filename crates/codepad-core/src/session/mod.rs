pub mod model;
pub mod store;
pub mod transition;

pub use model::{CodeId, SessionState, UserProfile};
pub use store::{CommitHook, SessionStore};
pub use transition::Transition;
