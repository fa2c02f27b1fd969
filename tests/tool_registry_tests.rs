//! Integration tests for tool registration and dispatch.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use opentargets_api::{
    EndpointUrl, GraphqlQueryTool, OpenTargetsClient, OpenTargetsConfig, Tool, ToolError,
    ToolRegistry,
};

/// A stub tool that reports how it was configured.
struct StaticTool {
    name: &'static str,
    reply: Value,
}

#[async_trait]
impl Tool for StaticTool {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        "Returns a fixed reply."
    }

    fn input_schema(&self) -> Value {
        json!({"type": "object"})
    }

    async fn invoke(&self, _arguments: Value) -> Result<Value, ToolError> {
        Ok(self.reply.clone())
    }
}

fn mock_backed_client(server: &MockServer) -> Arc<OpenTargetsClient> {
    let config = OpenTargetsConfig::builder()
        .endpoint(EndpointUrl::new(format!("{}/graphql", server.uri())).unwrap())
        .retry_delay(Duration::from_millis(10))
        .build()
        .unwrap();
    Arc::new(OpenTargetsClient::new(config))
}

// ============================================================================
// Registry Dispatch
// ============================================================================

#[tokio::test]
async fn test_registry_dispatches_to_registered_tool() {
    let mut registry = ToolRegistry::new();
    registry
        .register(Arc::new(StaticTool {
            name: "ping",
            reply: json!({"pong": true}),
        }))
        .unwrap();

    let result = registry.invoke("ping", json!({})).await.unwrap();
    assert_eq!(result, json!({"pong": true}));
}

#[tokio::test]
async fn test_registry_rejects_unknown_tool() {
    let registry = ToolRegistry::new();
    let result = registry.invoke("nope", json!({})).await;
    assert!(matches!(result, Err(ToolError::UnknownTool { name }) if name == "nope"));
}

#[test]
fn test_registry_rejects_duplicate_registration() {
    let mut registry = ToolRegistry::new();
    registry
        .register(Arc::new(StaticTool {
            name: "ping",
            reply: json!(1),
        }))
        .unwrap();

    let result = registry.register(Arc::new(StaticTool {
        name: "ping",
        reply: json!(2),
    }));
    assert!(matches!(result, Err(ToolError::DuplicateTool { .. })));
}

#[test]
fn test_registry_enumerates_tools_in_sorted_order() {
    let mut registry = ToolRegistry::new();
    for name in ["search", "associations", "target_info"] {
        registry
            .register(Arc::new(StaticTool {
                name,
                reply: json!(null),
            }))
            .unwrap();
    }

    assert_eq!(registry.len(), 3);
    assert_eq!(
        registry.names(),
        vec!["associations", "search", "target_info"]
    );
}

#[tokio::test]
async fn test_registry_can_be_shared_across_tasks() {
    let mut registry = ToolRegistry::new();
    registry
        .register(Arc::new(StaticTool {
            name: "ping",
            reply: json!({"pong": true}),
        }))
        .unwrap();
    let registry = Arc::new(registry);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let registry = Arc::clone(&registry);
            tokio::spawn(async move { registry.invoke("ping", json!({})).await.unwrap() })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap(), json!({"pong": true}));
    }
}

// ============================================================================
// GraphqlQueryTool Against a Mock Server
// ============================================================================

#[tokio::test]
async fn test_graphql_query_tool_forwards_to_client() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_json(json!({
            "query": "{ meta { apiVersion { x } } }",
            "variables": {"id": "ENSG1"}
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {"meta": {"apiVersion": {"x": 4}}}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let tool = GraphqlQueryTool::new(mock_backed_client(&server));

    let data = tool
        .invoke(json!({
            "query": "{ meta { apiVersion { x } } }",
            "variables": {"id": "ENSG1"}
        }))
        .await
        .unwrap();

    assert_eq!(data, json!({"meta": {"apiVersion": {"x": 4}}}));
}

#[tokio::test]
async fn test_graphql_query_tool_benefits_from_client_cache() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"ok": true}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_backed_client(&server);
    let tool = GraphqlQueryTool::new(Arc::clone(&client));

    let first = tool.invoke(json!({"query": "{ ping }"})).await.unwrap();
    let second = tool.invoke(json!({"query": "{ ping }"})).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_graphql_query_tool_surfaces_network_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let tool = GraphqlQueryTool::new(mock_backed_client(&server));

    let result = tool.invoke(json!({"query": "{ ping }"})).await;
    assert!(matches!(result, Err(ToolError::Query(_))));
}

#[tokio::test]
async fn test_graphql_query_tool_registered_and_invoked_by_name() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"ok": true}})))
        .expect(1)
        .mount(&server)
        .await;

    let mut registry = ToolRegistry::new();
    registry
        .register(Arc::new(GraphqlQueryTool::new(mock_backed_client(&server))))
        .unwrap();

    let data = registry
        .invoke("graphql_query", json!({"query": "{ ping }"}))
        .await
        .unwrap();
    assert_eq!(data, json!({"ok": true}));
}

#[tokio::test]
async fn test_graphql_query_tool_validates_arguments_before_any_request() {
    // No mock server mounted: invalid arguments must fail before any HTTP.
    let server = MockServer::start().await;
    let tool = GraphqlQueryTool::new(mock_backed_client(&server));

    let missing = tool.invoke(json!({})).await;
    assert!(matches!(missing, Err(ToolError::InvalidArguments { .. })));

    let bad_vars = tool
        .invoke(json!({"query": "{ ping }", "variables": "nope"}))
        .await;
    assert!(matches!(bad_vars, Err(ToolError::InvalidArguments { .. })));
}
