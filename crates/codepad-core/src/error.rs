//! Error types for the Codepad client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Codepad client.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum CodepadError {
    /// Language name is not a key of the language registry
    #[error("Unknown language: '{0}'")]
    UnknownLanguage(String),

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound { entity_type: String, id: String },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The remote service could not be reached
    #[error("Transport error: {0}")]
    Transport(String),

    /// The remote service answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Payload could not be decoded (base64, UTF-8, missing fields)
    #[error("Decode error: {0}")]
    Decode(String),

    /// The script worker could not be started or went away
    #[error("Worker error: {0}")]
    Worker(String),

    /// Program ran but was classified as failed.
    ///
    /// `result` carries the marker (`compile_error`), `output` the text that
    /// was committed to the session.
    #[error("Execution failed ({result}): {output}")]
    Execution { result: String, output: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Marker carried by [`CodepadError::Execution`] for failed runs.
pub const COMPILE_ERROR: &str = "compile_error";

impl CodepadError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// Creates a Worker error
    pub fn worker(message: impl Into<String>) -> Self {
        Self::Worker(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Creates the compile-error marker for a failed run.
    pub fn compile_error(output: impl Into<String>) -> Self {
        Self::Execution {
            result: COMPILE_ERROR.to_string(),
            output: output.into(),
        }
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    /// Check if this is a failed-execution marker
    pub fn is_execution(&self) -> bool {
        matches!(self, Self::Execution { .. })
    }

    /// Check if the error came from the network layer.
    ///
    /// Returns true for `Transport` and `Http` errors.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Http { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for CodepadError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for CodepadError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for CodepadError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for CodepadError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<base64::DecodeError> for CodepadError {
    fn from(err: base64::DecodeError) -> Self {
        Self::Decode(format!("invalid base64: {}", err))
    }
}

impl From<std::string::FromUtf8Error> for CodepadError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Self::Decode(format!("invalid UTF-8: {}", err))
    }
}

impl From<reqwest::Error> for CodepadError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            Self::Http {
                status: status.as_u16(),
                body: err.to_string(),
            }
        } else if err.is_decode() {
            Self::Serialization {
                format: "JSON".to_string(),
                message: err.to_string(),
            }
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// A type alias for `Result<T, CodepadError>`.
pub type Result<T> = std::result::Result<T, CodepadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_error_marker() {
        let err = CodepadError::compile_error("Error: boom");
        assert!(err.is_execution());
        match err {
            CodepadError::Execution { result, output } => {
                assert_eq!(result, "compile_error");
                assert_eq!(output, "Error: boom");
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_network_classification() {
        assert!(CodepadError::Transport("refused".into()).is_network());
        assert!(
            CodepadError::Http {
                status: 502,
                body: String::new()
            }
            .is_network()
        );
        assert!(!CodepadError::decode("bad").is_network());
    }

    #[test]
    fn test_from_utf8_error_is_decode() {
        let err: CodepadError = String::from_utf8(vec![0xff, 0xfe]).unwrap_err().into();
        assert!(matches!(err, CodepadError::Decode(_)));
    }
}
