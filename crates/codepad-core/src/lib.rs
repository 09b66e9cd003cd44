pub mod api;
pub mod config;
pub mod digest;
pub mod error;
pub mod language;
pub mod route;
pub mod samples;
pub mod session;
pub mod state;
pub mod worker;

// Re-export common error type
pub use error::CodepadError;
