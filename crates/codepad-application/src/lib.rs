//! Application layer for Codepad.
//!
//! This crate provides the editor actions that coordinate the session store
//! with the remote API, the script worker and durable storage.

pub mod auto_saver;
pub mod editor_usecase;
pub mod persistence_hook;

pub use auto_saver::AutoSaver;
pub use editor_usecase::{EditorUseCase, SaveReceipt};
pub use persistence_hook::{PersistenceHook, attach_persistence};
