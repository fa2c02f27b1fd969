//! Error types for client configuration.
//!
//! This module contains error types used when creating or validating
//! configuration values.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use opentargets_api::{ConfigError, EndpointUrl};
//!
//! let result = EndpointUrl::new("not a url");
//! assert!(matches!(result, Err(ConfigError::InvalidEndpointUrl { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur during client configuration.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The endpoint URL is not a usable absolute http(s) URL.
    #[error("Invalid endpoint URL '{url}'. Expected an absolute http(s) URL with a host (e.g., 'https://api.platform.opentargets.org/api/v4/graphql').")]
    InvalidEndpointUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// `max_retries` must allow at least one attempt.
    #[error("max_retries must be at least 1. It counts total attempts, so 0 would mean no request is ever sent.")]
    ZeroMaxRetries,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_endpoint_url_error_message() {
        let error = ConfigError::InvalidEndpointUrl {
            url: "ftp://example.com".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("ftp://example.com"));
        assert!(message.contains("absolute http(s) URL"));
    }

    #[test]
    fn test_zero_max_retries_error_message() {
        let error = ConfigError::ZeroMaxRetries;
        let message = error.to_string();
        assert!(message.contains("at least 1"));
        assert!(message.contains("total attempts"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::ZeroMaxRetries;
        let _: &dyn std::error::Error = &error;
    }
}
