//! Built-in tool exposing raw GraphQL queries.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{Tool, ToolError};
use crate::clients::OpenTargetsClient;

/// Tool that forwards a raw GraphQL query to an [`OpenTargetsClient`].
///
/// Accepts arguments of the form
/// `{"query": <string>, "variables": <object, optional>}` and returns the
/// response `data` payload. Caching and retry behavior come from the wrapped
/// client.
#[derive(Debug)]
pub struct GraphqlQueryTool {
    client: Arc<OpenTargetsClient>,
}

impl GraphqlQueryTool {
    /// Creates the tool around a shared client.
    #[must_use]
    pub fn new(client: Arc<OpenTargetsClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for GraphqlQueryTool {
    fn name(&self) -> &str {
        "graphql_query"
    }

    fn description(&self) -> &str {
        "Executes a raw GraphQL query against the Open Targets Platform API and returns the data payload."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The GraphQL query document."
                },
                "variables": {
                    "type": "object",
                    "description": "Optional variables for the query."
                }
            },
            "required": ["query"]
        })
    }

    async fn invoke(&self, arguments: Value) -> Result<Value, ToolError> {
        let Value::Object(mut args) = arguments else {
            return Err(ToolError::InvalidArguments {
                reason: "arguments must be a JSON object".to_string(),
            });
        };

        let query = match args.get("query") {
            Some(Value::String(query)) if !query.trim().is_empty() => query.clone(),
            Some(Value::String(_)) => {
                return Err(ToolError::InvalidArguments {
                    reason: "'query' must be a non-empty string".to_string(),
                })
            }
            Some(_) => {
                return Err(ToolError::InvalidArguments {
                    reason: "'query' must be a string".to_string(),
                })
            }
            None => {
                return Err(ToolError::InvalidArguments {
                    reason: "missing required argument 'query'".to_string(),
                })
            }
        };

        let variables = match args.remove("variables") {
            None | Some(Value::Null) => None,
            Some(vars @ Value::Object(_)) => Some(vars),
            Some(_) => {
                return Err(ToolError::InvalidArguments {
                    reason: "'variables' must be an object".to_string(),
                })
            }
        };

        let data = self.client.query(&query, variables).await?;
        Ok(data)
    }
}
