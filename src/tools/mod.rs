//! Capability registration for agent-callable tools.
//!
//! This module models the "named operation callable by an agent" pattern
//! without reflection: each tool implements the [`Tool`] trait (name,
//! description, JSON Schema for its input, async invoke), and a
//! [`ToolRegistry`] maps names to implementations for dispatch at runtime.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use opentargets_api::{
//!     GraphqlQueryTool, OpenTargetsClient, OpenTargetsConfig, ToolRegistry,
//! };
//!
//! let client = Arc::new(OpenTargetsClient::new(OpenTargetsConfig::default()));
//!
//! let mut registry = ToolRegistry::new();
//! registry
//!     .register(Arc::new(GraphqlQueryTool::new(client)))
//!     .unwrap();
//!
//! assert_eq!(registry.names(), vec!["graphql_query"]);
//! ```

mod graphql_query;
mod registry;

pub use graphql_query::GraphqlQueryTool;
pub use registry::ToolRegistry;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::clients::GraphqlError;

/// A named operation invocable with JSON arguments.
///
/// Implementations must be `Send + Sync` so a registry can be shared across
/// async tasks.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name the tool is registered and dispatched under.
    fn name(&self) -> &str;

    /// A human-readable description of what the tool does.
    fn description(&self) -> &str;

    /// A JSON Schema describing the expected `arguments` object.
    fn input_schema(&self) -> Value;

    /// Invokes the tool with the given arguments.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::InvalidArguments`] when the arguments do not
    /// match the input schema, or a tool-specific error otherwise.
    async fn invoke(&self, arguments: Value) -> Result<Value, ToolError>;
}

/// Error type for tool registration and invocation.
#[derive(Debug, Error)]
pub enum ToolError {
    /// No tool is registered under the requested name.
    #[error("unknown tool '{name}'")]
    UnknownTool {
        /// The name that was looked up.
        name: String,
    },

    /// A tool with this name is already registered.
    #[error("a tool named '{name}' is already registered")]
    DuplicateTool {
        /// The conflicting name.
        name: String,
    },

    /// The arguments do not match the tool's input schema.
    #[error("invalid arguments: {reason}")]
    InvalidArguments {
        /// Why the arguments were rejected.
        reason: String,
    },

    /// The underlying GraphQL query failed.
    #[error(transparent)]
    Query(#[from] GraphqlError),
}
