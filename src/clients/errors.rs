//! Error types for GraphQL query execution.
//!
//! # Error Handling
//!
//! [`OpenTargetsClient::query`](crate::OpenTargetsClient::query) returns
//! [`GraphqlError`] with two variants:
//!
//! - [`GraphqlError::Network`]: the request could not be completed, either
//!   because every retry attempt failed or because a non-retryable HTTP
//!   error (4xx other than 429) occurred. Callers should treat this as a
//!   propagating failure rather than retrying further themselves.
//! - [`GraphqlError::MalformedResponse`]: the server answered with a success
//!   status but a body that is not valid JSON. This is never retried.
//!
//! GraphQL-level errors (an `errors` array in an otherwise well-formed
//! response) are *not* surfaced as `Err`; the `data` payload is returned as-is
//! and the errors are logged. Some legitimate queries, such as looking up a
//! non-existent entity ID, return both an error and usable partial data.

use thiserror::Error;

/// Maximum response-body length preserved in error messages.
const ERROR_BODY_LIMIT: usize = 4096;

/// A single failed request attempt.
///
/// Distinguishes transport-level failures (connection errors, timeouts) from
/// HTTP responses with a non-success status.
#[derive(Debug, Error)]
pub enum RequestFailure {
    /// The request never produced an HTTP response, or the response body
    /// could not be read.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server responded with a non-success status.
    #[error("HTTP status {status}: {body}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The response body, truncated to 4 KiB for diagnostics.
        body: String,
    },
}

impl RequestFailure {
    /// Builds a status failure, truncating the body for diagnostics.
    pub(crate) fn from_status(status: u16, body: &str) -> Self {
        Self::Status {
            status,
            body: truncate_chars(body, ERROR_BODY_LIMIT),
        }
    }

    /// Returns whether this failure is worth another attempt.
    ///
    /// Transport failures are always retryable. Status failures are retryable
    /// for server errors (5xx) and rate limiting (429); other client errors
    /// fail immediately.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Status { status, .. } => *status >= 500 || *status == 429,
        }
    }
}

/// Error raised when a query could not be completed over the network.
///
/// Wraps the last underlying [`RequestFailure`] and records how many attempts
/// were made. Raised either when the retry budget is exhausted or immediately
/// on a non-retryable HTTP error.
#[derive(Debug, Error)]
#[error("GraphQL request failed after {attempts} attempt(s): {source}")]
pub struct NetworkError {
    /// Total attempts performed before giving up.
    pub attempts: u32,
    /// The failure from the final attempt.
    #[source]
    pub source: RequestFailure,
}

/// Error type for GraphQL query execution.
#[derive(Debug, Error)]
pub enum GraphqlError {
    /// The request failed at the network/HTTP level. See [`NetworkError`].
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// The server returned a success status with a body that is not valid
    /// JSON. Carries the parse error and an excerpt of the offending body.
    #[error("malformed JSON in GraphQL response (body excerpt: {excerpt:?}): {source}")]
    MalformedResponse {
        /// The underlying JSON parse error.
        #[source]
        source: serde_json::Error,
        /// The response body, truncated to 4 KiB.
        excerpt: String,
    },
}

impl GraphqlError {
    /// Builds a malformed-response error, truncating the body excerpt.
    pub(crate) fn malformed(source: serde_json::Error, body: &str) -> Self {
        Self::MalformedResponse {
            source,
            excerpt: truncate_chars(body, ERROR_BODY_LIMIT),
        }
    }
}

/// Truncates a string to at most `limit` characters, respecting char
/// boundaries.
pub(crate) fn truncate_chars(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        text.to_string()
    } else {
        text.chars().take(limit).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_status_is_retryable() {
        assert!(RequestFailure::from_status(429, "slow down").is_retryable());
    }

    #[test]
    fn test_server_error_statuses_are_retryable() {
        assert!(RequestFailure::from_status(500, "").is_retryable());
        assert!(RequestFailure::from_status(503, "").is_retryable());
    }

    #[test]
    fn test_client_error_statuses_are_not_retryable() {
        assert!(!RequestFailure::from_status(400, "").is_retryable());
        assert!(!RequestFailure::from_status(404, "").is_retryable());
        assert!(!RequestFailure::from_status(422, "").is_retryable());
    }

    #[test]
    fn test_status_failure_truncates_body() {
        let long_body = "x".repeat(10_000);
        let failure = RequestFailure::from_status(500, &long_body);
        match failure {
            RequestFailure::Status { body, .. } => assert_eq!(body.len(), 4096),
            RequestFailure::Transport(_) => panic!("expected status failure"),
        }
    }

    #[test]
    fn test_network_error_message_includes_attempts_and_cause() {
        let error = NetworkError {
            attempts: 3,
            source: RequestFailure::from_status(503, "unavailable"),
        };
        let message = error.to_string();
        assert!(message.contains("after 3 attempt(s)"));
        assert!(message.contains("503"));
        assert!(message.contains("unavailable"));
    }

    #[test]
    fn test_malformed_response_message_includes_excerpt() {
        let parse_error = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let error = GraphqlError::malformed(parse_error, "not json");
        let message = error.to_string();
        assert!(message.contains("malformed JSON"));
        assert!(message.contains("not json"));
    }

    #[test]
    fn test_graphql_error_from_network_error_conversion() {
        let network = NetworkError {
            attempts: 1,
            source: RequestFailure::from_status(404, "not found"),
        };
        let error: GraphqlError = network.into();
        assert!(matches!(error, GraphqlError::Network(_)));
        // Transparent variant: the display text is the inner error's.
        assert!(error.to_string().contains("after 1 attempt(s)"));
    }

    #[test]
    fn test_errors_implement_std_error() {
        let error: &dyn std::error::Error = &NetworkError {
            attempts: 2,
            source: RequestFailure::from_status(500, ""),
        };
        assert!(error.source().is_some());
    }

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        let text = "αβγδε";
        assert_eq!(truncate_chars(text, 3), "αβγ");
        assert_eq!(truncate_chars(text, 10), "αβγδε");
    }
}
