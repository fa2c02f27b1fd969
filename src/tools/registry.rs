//! Name-to-implementation lookup table for tools.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use super::{Tool, ToolError};

/// Registry mapping tool names to implementations.
///
/// Built once at startup: register every tool, then share the registry
/// (e.g., behind an `Arc`) and dispatch invocations by name.
///
/// # Thread Safety
///
/// `ToolRegistry` is `Send + Sync` once populated; registration takes
/// `&mut self` so it naturally happens before sharing.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use opentargets_api::{
///     GraphqlQueryTool, OpenTargetsClient, OpenTargetsConfig, ToolRegistry,
/// };
///
/// let client = Arc::new(OpenTargetsClient::new(OpenTargetsConfig::default()));
///
/// let mut registry = ToolRegistry::new();
/// registry
///     .register(Arc::new(GraphqlQueryTool::new(client)))
///     .unwrap();
///
/// let tool = registry.get("graphql_query").unwrap();
/// assert_eq!(tool.name(), "graphql_query");
/// ```
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

// Verify ToolRegistry is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ToolRegistry>();
};

impl ToolRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tool under its own name.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::DuplicateTool`] if a tool with the same name is
    /// already registered.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<(), ToolError> {
        let name = tool.name().to_string();
        if self.tools.contains_key(&name) {
            return Err(ToolError::DuplicateTool { name });
        }
        self.tools.insert(name, tool);
        Ok(())
    }

    /// Looks up a tool by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    /// Returns all registered tool names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registered tools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Returns whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Invokes the named tool with the given arguments.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::UnknownTool`] if no tool is registered under
    /// `name`, or whatever error the tool's own `invoke` produces.
    pub async fn invoke(&self, name: &str, arguments: Value) -> Result<Value, ToolError> {
        let tool = self.get(name).ok_or_else(|| ToolError::UnknownTool {
            name: name.to_string(),
        })?;
        tool.invoke(arguments).await
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}
