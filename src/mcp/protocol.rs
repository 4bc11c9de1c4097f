//! MCP protocol types, client side (JSON-RPC 2.0).

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// MCP protocol revision spoken by this client.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

const CLIENT_NAME: &str = "byline";
const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// JSON-RPC request or notification.
#[derive(Debug, Serialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    /// Build a request expecting a response.
    pub fn call(id: u64, method: &str, params: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(id)),
            method: method.to_string(),
            params: Some(params),
        }
    }

    /// Build a fire-and-forget notification.
    pub fn notification(method: &str) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id: None,
            method: method.to_string(),
            params: None,
        }
    }

    /// The initialize handshake request.
    pub fn initialize(id: u64) -> Self {
        Self::call(
            id,
            "initialize",
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {},
                "clientInfo": {
                    "name": CLIENT_NAME,
                    "version": CLIENT_VERSION,
                },
            }),
        )
    }

    /// The tools/list request.
    pub fn tools_list(id: u64) -> Self {
        Self::call(id, "tools/list", json!({}))
    }
}

/// JSON-RPC response.
#[derive(Debug, Deserialize)]
pub struct JsonRpcResponse {
    #[allow(dead_code)]
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    /// Extract the result, turning a JSON-RPC error into a message.
    pub fn into_result(self) -> Result<Value, String> {
        if let Some(error) = self.error {
            return Err(format!("server error {}: {}", error.code, error.message));
        }
        self.result.ok_or_else(|| "response carried no result".to_string())
    }
}

#[derive(Debug, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
}

/// Tool metadata advertised by a server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerToolInfo {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Payload of a tools/list result.
#[derive(Debug, Deserialize)]
pub struct ToolsListResult {
    #[serde(default)]
    pub tools: Vec<ServerToolInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_request_shape() {
        let request = JsonRpcRequest::initialize(1);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["jsonrpc"], "2.0");
        assert_eq!(value["method"], "initialize");
        assert_eq!(value["params"]["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(value["params"]["clientInfo"]["name"], "byline");
    }

    #[test]
    fn test_notification_has_no_id() {
        let request = JsonRpcRequest::notification("notifications/initialized");
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("id").is_none());
        assert!(value.get("params").is_none());
    }

    #[test]
    fn test_response_error_surfaces_message() {
        let response: JsonRpcResponse = serde_json::from_str(
            r#"{"jsonrpc": "2.0", "id": 1, "error": {"code": -32601, "message": "Method not found"}}"#,
        )
        .unwrap();
        let err = response.into_result().unwrap_err();
        assert!(err.contains("-32601"));
        assert!(err.contains("Method not found"));
    }

    #[test]
    fn test_tools_list_parses() {
        let result: ToolsListResult = serde_json::from_str(
            r#"{"tools": [{"name": "search", "description": "Search pages", "inputSchema": {}}]}"#,
        )
        .unwrap();
        assert_eq!(result.tools.len(), 1);
        assert_eq!(result.tools[0].name, "search");
    }
}
