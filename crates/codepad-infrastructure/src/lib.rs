pub mod config_service;
pub mod paths;
pub mod storage;
pub mod toml_persisted_state_repository;

pub use crate::config_service::ConfigService;
pub use crate::paths::CodepadPaths;
pub use crate::toml_persisted_state_repository::TomlPersistedStateRepository;
