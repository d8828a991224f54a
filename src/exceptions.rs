//! Error types for abogus

use std::fmt;

/// Main error type for signing operations
#[derive(Debug)]
pub enum SignError {
    /// Alphabet selector does not name one of the fixed tables
    UnknownAlphabet(String),

    /// Stream cipher was handed a zero-length key
    EmptyKey,

    /// Key-derivation arguments or option values are malformed
    InvalidArguments(String),

    /// Environment or command-line configuration is malformed
    Config(String),

    /// IO error
    IoError(std::io::Error),

    /// JSON serialization error
    JsonError(serde_json::Error),
}

impl SignError {
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        SignError::InvalidArguments(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        SignError::Config(msg.into())
    }
}

impl fmt::Display for SignError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignError::UnknownAlphabet(sel) => write!(f, "Unknown alphabet table: {sel}"),
            SignError::EmptyKey => write!(f, "Cipher key must not be empty"),
            SignError::InvalidArguments(msg) => write!(f, "Invalid arguments: {msg}"),
            SignError::Config(msg) => write!(f, "Configuration error: {msg}"),
            SignError::IoError(err) => write!(f, "IO error: {err}"),
            SignError::JsonError(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl std::error::Error for SignError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SignError::IoError(err) => Some(err),
            SignError::JsonError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SignError {
    fn from(err: std::io::Error) -> Self {
        SignError::IoError(err)
    }
}

impl From<serde_json::Error> for SignError {
    fn from(err: serde_json::Error) -> Self {
        SignError::JsonError(err)
    }
}

/// Result type for signing operations
pub type Result<T> = std::result::Result<T, SignError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            SignError::UnknownAlphabet("s9".to_string()).to_string(),
            "Unknown alphabet table: s9"
        );
        assert_eq!(SignError::EmptyKey.to_string(), "Cipher key must not be empty");
        assert_eq!(
            SignError::config("ABOGUS_SUFFIX is empty").to_string(),
            "Configuration error: ABOGUS_SUFFIX is empty"
        );
    }

    #[test]
    fn test_io_error_keeps_source() {
        use std::error::Error;

        let err: SignError = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed").into();
        assert_eq!(err.to_string(), "IO error: closed");
        assert!(err.source().is_some());
    }
}
