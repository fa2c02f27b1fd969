//! Validated newtypes for configuration values.

use std::fmt;

use crate::error::ConfigError;

/// The default Open Targets Platform GraphQL endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.platform.opentargets.org/api/v4/graphql";

/// A validated GraphQL endpoint URL.
///
/// Wraps an absolute `http` or `https` URL with a non-empty host. A trailing
/// slash is trimmed during construction so the stored form is canonical.
///
/// # Example
///
/// ```rust
/// use opentargets_api::EndpointUrl;
///
/// let url = EndpointUrl::new("https://api.platform.opentargets.org/api/v4/graphql/").unwrap();
/// assert_eq!(url.as_ref(), "https://api.platform.opentargets.org/api/v4/graphql");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndpointUrl {
    url: String,
}

impl EndpointUrl {
    /// Creates a new validated endpoint URL.
    ///
    /// Leading/trailing whitespace and a trailing slash are trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEndpointUrl`] if the URL does not start
    /// with `http://` or `https://`, or has an empty host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();

        let invalid = || ConfigError::InvalidEndpointUrl { url: url.clone() };

        let host_start = if let Some(rest) = url.strip_prefix("https://") {
            url.len() - rest.len()
        } else if let Some(rest) = url.strip_prefix("http://") {
            url.len() - rest.len()
        } else {
            return Err(invalid());
        };

        // Host ends at port, path, query, or end of string
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        if url[host_start..host_end].is_empty() {
            return Err(invalid());
        }

        Ok(Self { url })
    }
}

impl Default for EndpointUrl {
    /// Returns the public Open Targets Platform endpoint.
    fn default() -> Self {
        // DEFAULT_ENDPOINT is a valid https URL, so this cannot fail.
        Self {
            url: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl AsRef<str> for EndpointUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for EndpointUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
