//! Configuration types for the Open Targets client.
//!
//! This module provides the core configuration types used to construct an
//! [`OpenTargetsClient`](crate::OpenTargetsClient).
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`OpenTargetsConfig`]: The immutable configuration struct holding all client settings
//! - [`OpenTargetsConfigBuilder`]: A builder for constructing [`OpenTargetsConfig`] instances
//! - [`EndpointUrl`]: A validated GraphQL endpoint URL
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use opentargets_api::OpenTargetsConfig;
//!
//! let config = OpenTargetsConfig::builder()
//!     .cache_ttl(Duration::from_secs(600))
//!     .max_retries(5)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.max_retries(), 5);
//! ```

mod newtypes;

pub use newtypes::{EndpointUrl, DEFAULT_ENDPOINT};

use std::time::Duration;

use crate::error::ConfigError;

/// Default cache time-to-live: one hour.
const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

/// Default total attempts per logical query.
const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default base delay for exponential backoff.
const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Default per-attempt request timeout.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for an [`OpenTargetsClient`](crate::OpenTargetsClient).
///
/// Immutable after construction. All fields have sensible defaults targeting
/// the public Open Targets Platform endpoint, so `OpenTargetsConfig::default()`
/// is a fully usable configuration.
///
/// # Thread Safety
///
/// `OpenTargetsConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
#[derive(Clone, Debug)]
pub struct OpenTargetsConfig {
    endpoint: EndpointUrl,
    cache_ttl: Duration,
    max_retries: u32,
    retry_delay: Duration,
    request_timeout: Duration,
}

impl OpenTargetsConfig {
    /// Creates a new builder for constructing an `OpenTargetsConfig`.
    #[must_use]
    pub fn builder() -> OpenTargetsConfigBuilder {
        OpenTargetsConfigBuilder::new()
    }

    /// Returns the GraphQL endpoint URL.
    #[must_use]
    pub const fn endpoint(&self) -> &EndpointUrl {
        &self.endpoint
    }

    /// Returns how long a successful response stays reusable from cache.
    #[must_use]
    pub const fn cache_ttl(&self) -> Duration {
        self.cache_ttl
    }

    /// Returns the total attempts made per logical query before failing.
    #[must_use]
    pub const fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Returns the base delay for exponential backoff between attempts.
    #[must_use]
    pub const fn retry_delay(&self) -> Duration {
        self.retry_delay
    }

    /// Returns the per-attempt HTTP request timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}

impl Default for OpenTargetsConfig {
    fn default() -> Self {
        Self {
            endpoint: EndpointUrl::default(),
            cache_ttl: DEFAULT_CACHE_TTL,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

// Verify OpenTargetsConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<OpenTargetsConfig>();
};

/// Builder for constructing [`OpenTargetsConfig`] instances.
///
/// All fields are optional; unset fields fall back to defaults.
///
/// # Defaults
///
/// - `endpoint`: the public Open Targets Platform GraphQL endpoint
/// - `cache_ttl`: 3600 seconds
/// - `max_retries`: 3 total attempts
/// - `retry_delay`: 1 second
/// - `request_timeout`: 30 seconds
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use opentargets_api::{EndpointUrl, OpenTargetsConfig};
///
/// let config = OpenTargetsConfig::builder()
///     .endpoint(EndpointUrl::new("https://staging.example.org/graphql").unwrap())
///     .retry_delay(Duration::from_millis(250))
///     .request_timeout(Duration::from_secs(10))
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Default)]
pub struct OpenTargetsConfigBuilder {
    endpoint: Option<EndpointUrl>,
    cache_ttl: Option<Duration>,
    max_retries: Option<u32>,
    retry_delay: Option<Duration>,
    request_timeout: Option<Duration>,
}

impl OpenTargetsConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the GraphQL endpoint URL.
    #[must_use]
    pub fn endpoint(mut self, endpoint: EndpointUrl) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Sets the cache time-to-live.
    ///
    /// A TTL of zero disables cache reuse entirely: every query performs a
    /// fresh network request.
    #[must_use]
    pub const fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = Some(ttl);
        self
    }

    /// Sets the total attempts per logical query.
    ///
    /// This counts the initial attempt, so `max_retries(3)` means one request
    /// plus up to two retries.
    #[must_use]
    pub const fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Sets the base delay for exponential backoff.
    ///
    /// The delay before attempt *n* is `retry_delay * 2^(n-2)`, so attempt 2
    /// waits `retry_delay`, attempt 3 waits twice that, and so on.
    #[must_use]
    pub const fn retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = Some(delay);
        self
    }

    /// Sets the per-attempt HTTP request timeout.
    ///
    /// A timed-out attempt behaves like any other transport failure and
    /// consumes one retry attempt.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Builds the [`OpenTargetsConfig`], validating the combination of values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroMaxRetries`] if `max_retries` was set to 0.
    pub fn build(self) -> Result<OpenTargetsConfig, ConfigError> {
        let max_retries = self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES);
        if max_retries == 0 {
            return Err(ConfigError::ZeroMaxRetries);
        }

        Ok(OpenTargetsConfig {
            endpoint: self.endpoint.unwrap_or_default(),
            cache_ttl: self.cache_ttl.unwrap_or(DEFAULT_CACHE_TTL),
            max_retries,
            retry_delay: self.retry_delay.unwrap_or(DEFAULT_RETRY_DELAY),
            request_timeout: self.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT),
        })
    }
}
