//! The cached, retrying GraphQL client.

use parking_lot::Mutex;
use serde::Serialize;
use serde_json::Value;

use crate::clients::cache::{fingerprint, QueryCache};
use crate::clients::errors::{truncate_chars, GraphqlError, NetworkError, RequestFailure};
use crate::config::OpenTargetsConfig;

/// Crate version from Cargo.toml, used in the User-Agent header.
const CRATE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum query-text length included in log records.
const LOG_QUERY_LIMIT: usize = 200;

/// An asynchronous client for the Open Targets Platform GraphQL API.
///
/// The client owns an HTTP session and an in-memory response cache. Each
/// query is fingerprinted from its text and variables; repeat queries within
/// the configured TTL are served from cache with no network activity.
/// Transient failures (transport errors, 5xx responses, 429 rate limits) are
/// retried with exponential backoff up to the configured attempt budget.
///
/// Construction performs no network activity. The underlying HTTP session is
/// created lazily on the first query (or eagerly via [`prime`](Self::prime))
/// and released by [`close`](Self::close); a query after `close` transparently
/// re-establishes it.
///
/// # Thread Safety
///
/// `OpenTargetsClient` is `Send + Sync`. Concurrent `query` calls on one
/// instance are independent and share the session and cache; internal locks
/// are never held across an await point. Instances do not share any state
/// with each other.
///
/// # Example
///
/// ```rust,no_run
/// use opentargets_api::{OpenTargetsClient, OpenTargetsConfig};
/// use serde_json::json;
///
/// # async fn example() -> Result<(), opentargets_api::GraphqlError> {
/// let client = OpenTargetsClient::new(OpenTargetsConfig::default());
///
/// let data = client
///     .query(
///         "query Target($id: String!) { target(ensemblId: $id) { approvedSymbol } }",
///         Some(json!({ "id": "ENSG00000157764" })),
///     )
///     .await?;
///
/// println!("symbol: {}", data["target"]["approvedSymbol"]);
/// client.close();
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct OpenTargetsClient {
    /// Immutable configuration.
    config: OpenTargetsConfig,
    /// Lazily created HTTP session; `None` before first use and after `close`.
    session: Mutex<Option<reqwest::Client>>,
    /// TTL cache of successful response payloads.
    cache: QueryCache,
}

// Verify OpenTargetsClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<OpenTargetsClient>();
};

/// JSON request body for a GraphQL query.
///
/// The `variables` key is omitted entirely when absent.
#[derive(Debug, Serialize)]
struct QueryPayload<'a> {
    query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    variables: Option<&'a Value>,
}

/// Outcome of a single request attempt, before retry classification.
enum AttemptError {
    /// A failure that enters the retry classification (transport or status).
    Request(RequestFailure),
    /// A success-status response whose body is not valid JSON. Never retried.
    Parse(GraphqlError),
}

impl OpenTargetsClient {
    /// Creates a new client with the given configuration.
    ///
    /// No network activity occurs until the first query or [`prime`](Self::prime).
    #[must_use]
    pub fn new(config: OpenTargetsConfig) -> Self {
        let cache = QueryCache::new(config.cache_ttl());
        Self {
            config,
            session: Mutex::new(None),
            cache,
        }
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &OpenTargetsConfig {
        &self.config
    }

    /// Creates the HTTP session eagerly if it does not exist yet.
    ///
    /// Useful for callers that want connection setup cost paid upfront rather
    /// than on the first query.
    ///
    /// # Panics
    ///
    /// Panics if the underlying HTTP client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS
    /// initialization failure).
    pub fn prime(&self) {
        let _ = self.ensure_session();
    }

    /// Executes a GraphQL query and returns the response `data` payload.
    ///
    /// `variables` is an optional JSON object; `None`, JSON `null`, and an
    /// empty object are all treated as "no variables" and the `variables` key
    /// is omitted from the request body.
    ///
    /// If a fresh cache entry exists for this query+variables fingerprint,
    /// its payload is returned immediately with no network call. Otherwise
    /// the query is POSTed to the configured endpoint, retrying transient
    /// failures with exponential backoff, and the successful payload is
    /// cached before being returned.
    ///
    /// A response carrying a GraphQL `errors` array alongside `data` is *not*
    /// an error: the errors are logged and `data` is returned as-is. Callers
    /// must be prepared for fields inside `data` to be `null` even on a
    /// successful call. An absent `data` key yields an empty object; an
    /// explicit `"data": null` yields JSON `null`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphqlError::Network`] when every retry attempt failed or a
    /// non-retryable HTTP error (4xx other than 429) occurred, and
    /// [`GraphqlError::MalformedResponse`] when a success response carries a
    /// body that is not valid JSON.
    ///
    /// # Panics
    ///
    /// Panics if the underlying HTTP client cannot be created (see
    /// [`prime`](Self::prime)).
    pub async fn query(
        &self,
        query: &str,
        variables: Option<Value>,
    ) -> Result<Value, GraphqlError> {
        let variables = normalize_variables(variables);
        let key = fingerprint(query, variables.as_ref());

        if let Some(data) = self.cache.get(&key) {
            tracing::debug!(
                "cache hit for query: {}",
                truncate_chars(query, LOG_QUERY_LIMIT)
            );
            return Ok(data);
        }

        let http = self.ensure_session();
        let payload = QueryPayload {
            query,
            variables: variables.as_ref(),
        };

        let mut attempt: u32 = 0;
        loop {
            attempt += 1;

            let failure = match self.attempt(&http, &payload).await {
                Ok(body) => {
                    let data = self.extract_data(query, &body);
                    self.cache.insert(key, data.clone());
                    tracing::debug!(
                        "cached response for query: {}",
                        truncate_chars(query, LOG_QUERY_LIMIT)
                    );
                    return Ok(data);
                }
                Err(AttemptError::Parse(error)) => {
                    tracing::error!(
                        "malformed JSON in GraphQL response: {error}. Query: {}... Variables: {:?}",
                        truncate_chars(query, LOG_QUERY_LIMIT),
                        variables
                    );
                    return Err(error);
                }
                Err(AttemptError::Request(failure)) => failure,
            };

            // Non-retryable failures short-circuit before any sleep.
            if failure.is_retryable() && attempt < self.config.max_retries() {
                let delay = backoff_delay(self.config.retry_delay(), attempt);
                tracing::warn!(
                    "request failed (attempt {attempt}/{}): {failure}. Retrying in {:.1}s...",
                    self.config.max_retries(),
                    delay.as_secs_f64()
                );
                tokio::time::sleep(delay).await;
                continue;
            }

            tracing::error!(
                "request failed after {attempt} attempt(s): {failure}. Query: {}... Variables: {:?}",
                truncate_chars(query, LOG_QUERY_LIMIT),
                variables
            );
            return Err(NetworkError {
                attempts: attempt,
                source: failure,
            }
            .into());
        }
    }

    /// Releases the HTTP session if one exists.
    ///
    /// Idempotent: calling it repeatedly, or before any query, is a no-op.
    /// A later query transparently creates a fresh session, and cached
    /// responses survive across `close`.
    pub fn close(&self) {
        *self.session.lock() = None;
    }

    /// Returns the live HTTP session, creating it if necessary.
    fn ensure_session(&self) -> reqwest::Client {
        let mut slot = self.session.lock();
        if let Some(client) = slot.as_ref() {
            return client.clone();
        }

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(self.config.request_timeout())
            .user_agent(format!("opentargets-api-rust v{CRATE_VERSION}"))
            .build()
            .expect("Failed to create HTTP client");

        *slot = Some(client.clone());
        client
    }

    /// Performs one POST attempt and parses the body on success status.
    async fn attempt(
        &self,
        http: &reqwest::Client,
        payload: &QueryPayload<'_>,
    ) -> Result<Value, AttemptError> {
        let response = http
            .post(self.config.endpoint().as_ref())
            .json(payload)
            .send()
            .await
            .map_err(|e| AttemptError::Request(RequestFailure::Transport(e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AttemptError::Request(RequestFailure::Transport(e)))?;

        if !status.is_success() {
            return Err(AttemptError::Request(RequestFailure::from_status(
                status.as_u16(),
                &body,
            )));
        }

        serde_json::from_str(&body).map_err(|e| AttemptError::Parse(GraphqlError::malformed(e, &body)))
    }

    /// Extracts the `data` payload, logging any GraphQL-level errors.
    ///
    /// An absent `data` key yields an empty object; an explicit `null` is
    /// preserved.
    fn extract_data(&self, query: &str, body: &Value) -> Value {
        if let Some(errors) = body.get("errors").and_then(Value::as_array) {
            if !errors.is_empty() {
                let first_message = errors
                    .first()
                    .and_then(|e| e.get("message"))
                    .and_then(Value::as_str)
                    .unwrap_or("<no message>");
                tracing::warn!(
                    "GraphQL API returned {} error(s), first: {first_message}. Query: {}... Returning partial data if available.",
                    errors.len(),
                    truncate_chars(query, LOG_QUERY_LIMIT)
                );
            }
        }

        body.get("data")
            .map_or_else(|| Value::Object(serde_json::Map::new()), Clone::clone)
    }

    /// Returns whether a live session currently exists.
    #[cfg(test)]
    fn has_session(&self) -> bool {
        self.session.lock().is_some()
    }
}

/// Treats `None`, JSON `null`, and an empty object as "no variables".
fn normalize_variables(variables: Option<Value>) -> Option<Value> {
    match variables {
        None | Some(Value::Null) => None,
        Some(Value::Object(map)) if map.is_empty() => None,
        other => other,
    }
}

/// Computes the backoff delay after `failed_attempts` attempts (1-indexed).
///
/// The schedule doubles each time: `base`, `2 * base`, `4 * base`, ...
fn backoff_delay(base: std::time::Duration, failed_attempts: u32) -> std::time::Duration {
    base * 2_u32.saturating_pow(failed_attempts.saturating_sub(1))
}
