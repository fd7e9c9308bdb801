//! Error types for txmediator configuration
//!
//! Configuration problems are fatal at startup; none of these are
//! produced by an individual contract call.

use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required setting is absent or empty
    #[error("Missing required setting: {0}")]
    Missing(&'static str),

    /// A setting is present but unusable
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// The configuration sources could not be read or merged
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),
}

/// Result type for configuration loading
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_error_display() {
        let err = ConfigError::Missing("rpc_url");
        assert_eq!(err.to_string(), "Missing required setting: rpc_url");

        let err = ConfigError::Invalid("confirmations must be at least 1".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: confirmations must be at least 1"
        );
    }
}
