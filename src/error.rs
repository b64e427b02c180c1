//! Error types for memrecall

use thiserror::Error;

/// Result type alias using memrecall's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for memrecall
#[derive(Error, Debug)]
pub enum Error {
    /// Required connection configuration is missing or invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// Caller supplied a malformed query
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Storage backend unreachable or returned a failure
    #[error("Retrieval error: {0}")]
    Retrieval(#[from] sqlx::Error),
}

impl Error {
    /// Check if error is a client error (caller's fault)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::InvalidQuery(_))
    }

    /// Check if error is a deployment/configuration problem
    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(Error::InvalidQuery("empty embedding".into()).is_client_error());
        assert!(!Error::Config("DATABASE_URL is not set".into()).is_client_error());
        assert!(Error::Config("DATABASE_URL is not set".into()).is_config_error());
    }

    #[test]
    fn test_error_display() {
        let err = Error::Config("DATABASE_URL is not set".into());
        assert_eq!(err.to_string(), "Configuration error: DATABASE_URL is not set");
    }
}
