pub mod model;
pub mod repository;

pub use model::{PersistedState, STORAGE_KEY};
pub use repository::PersistedStateRepository;
