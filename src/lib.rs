//! # Open Targets API Client
//!
//! An asynchronous Rust client for the [Open Targets Platform] GraphQL API,
//! with response caching and transparent retry handling.
//!
//! [Open Targets Platform]: https://platform.opentargets.org/
//!
//! ## Overview
//!
//! This crate provides:
//! - [`OpenTargetsClient`]: a GraphQL client that caches successful responses
//!   by query+variables fingerprint and retries transient failures with
//!   exponential backoff
//! - Type-safe configuration via [`OpenTargetsConfig`] and
//!   [`OpenTargetsConfigBuilder`], with a validated [`EndpointUrl`] newtype
//! - A [`Tool`] trait and [`ToolRegistry`] for registering agent-callable
//!   operations by name, plus the built-in [`GraphqlQueryTool`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use opentargets_api::{OpenTargetsClient, OpenTargetsConfig};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = OpenTargetsConfig::builder()
//!     .cache_ttl(Duration::from_secs(600))
//!     .max_retries(3)
//!     .build()?;
//!
//! let client = OpenTargetsClient::new(config);
//!
//! let data = client
//!     .query(
//!         "query Target($id: String!) { target(ensemblId: $id) { approvedSymbol } }",
//!         Some(json!({ "id": "ENSG00000157764" })),
//!     )
//!     .await?;
//!
//! println!("symbol: {}", data["target"]["approvedSymbol"]);
//!
//! // A repeat of the same query within the TTL is served from cache.
//! client.close();
//! # Ok(())
//! # }
//! ```
//!
//! ## Caching
//!
//! Successful responses are cached in memory under a deterministic
//! fingerprint of the query text and variables (key order does not matter).
//! Entries expire lazily after the configured TTL. Each client owns its own
//! cache; nothing is shared between instances.
//!
//! ## Retries
//!
//! Transport failures, 5xx responses, and 429 rate limits are retried up to
//! the configured attempt budget with doubling backoff. Other 4xx responses
//! fail immediately. Retry exhaustion surfaces as
//! [`GraphqlError::Network`].
//!
//! ## Partial Data
//!
//! A response carrying a GraphQL `errors` array alongside `data` is returned
//! as-is (with a logged warning), because some legitimate queries (such as
//! looking up a non-existent entity ID) produce both an error and usable
//! partial data. Callers must tolerate `null` fields inside `data`.

pub mod clients;
pub mod config;
pub mod error;
pub mod tools;

// Re-export main types at crate root for convenience
pub use clients::{GraphqlError, NetworkError, OpenTargetsClient, RequestFailure};
pub use config::{EndpointUrl, OpenTargetsConfig, OpenTargetsConfigBuilder, DEFAULT_ENDPOINT};
pub use error::ConfigError;
pub use tools::{GraphqlQueryTool, Tool, ToolError, ToolRegistry};
