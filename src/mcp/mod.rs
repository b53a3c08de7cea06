pub mod encryption;
pub mod protocol;
pub mod schemas;
pub mod tools;
pub mod transport;

use std::sync::Arc;

use anyhow::Result;
use serde_json::json;
use tracing::info;

use protocol::{
    error_codes, InitializeResult, JsonRpcRequest, JsonRpcResponse, ListToolsResult,
    ServerCapabilities, ServerInfo, ToolCapabilities,
};
use tools::{register_wallet_tools, RequestContext, ToolName, ToolRegistry};

use crate::wallet::Wallet;

pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Speaks MCP over stdio and dispatches `tools/call` into the registry.
pub struct McpServer {
    registry: Arc<ToolRegistry>,
}

impl McpServer {
    pub fn new(wallet: Arc<dyn Wallet>) -> Result<Self> {
        Ok(Self {
            registry: Arc::new(register_wallet_tools(wallet)?),
        })
    }

    /// The registered tool table, for direct in-process invocation.
    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    pub async fn run(&self) -> Result<()> {
        transport::run_loop(Arc::clone(&self.registry)).await
    }
}

/// The main dispatcher for incoming MCP requests. Returns `None` for
/// notifications, which must not be answered.
pub async fn handle_request(registry: &ToolRegistry, req: JsonRpcRequest) -> Option<JsonRpcResponse> {
    if req.is_notification() {
        return None;
    }
    info!("Handling MCP request for method: {}", req.method);

    let response = match req.method.as_str() {
        "initialize" => handle_initialize(&req),
        "tools/list" => handle_tools_list(registry, &req),
        "tools/call" => handle_tool_call(registry, req).await,
        _ => JsonRpcResponse::error(
            req.id,
            error_codes::METHOD_NOT_FOUND,
            format!("Method not found: {}", req.method),
        ),
    };
    Some(response)
}

fn handle_initialize(req: &JsonRpcRequest) -> JsonRpcResponse {
    JsonRpcResponse::success(
        req.id.clone(),
        json!(InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: ToolCapabilities {
                    list_changed: false
                },
            },
            server_info: ServerInfo {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(
                "Wallet MCP server exposing cryptographic key, signature, encryption, \
                 and transaction operations of the connected wallet."
                    .to_string()
            ),
        }),
    )
}

fn handle_tools_list(registry: &ToolRegistry, req: &JsonRpcRequest) -> JsonRpcResponse {
    JsonRpcResponse::success(
        req.id.clone(),
        json!(ListToolsResult {
            tools: registry.tools().to_vec()
        }),
    )
}

/// Resolves the named tool and invokes its handler. Unknown names are
/// rejected here, before any handler runs.
async fn handle_tool_call(registry: &ToolRegistry, req: JsonRpcRequest) -> JsonRpcResponse {
    let params = match req.params.as_ref() {
        Some(p) => p,
        None => {
            return JsonRpcResponse::error(
                req.id,
                error_codes::INVALID_PARAMS,
                "Missing 'params' object",
            )
        }
    };

    let tool_name = match params.get("name").and_then(|n| n.as_str()) {
        Some(name) => name,
        None => {
            return JsonRpcResponse::error(
                req.id,
                error_codes::INVALID_PARAMS,
                "Missing 'name' field in params",
            )
        }
    };

    let name = match ToolName::parse(tool_name) {
        Some(name) => name,
        None => {
            return JsonRpcResponse::error(
                req.id,
                error_codes::METHOD_NOT_FOUND,
                format!("Tool not found: {}", tool_name),
            )
        }
    };

    let args = params
        .get("arguments")
        .cloned()
        .unwrap_or_else(|| json!({}));
    let extra = RequestContext {
        request_id: req.id.clone(),
    };

    let result = registry.call(name, args, extra).await;
    match serde_json::to_value(&result) {
        Ok(value) => JsonRpcResponse::success(req.id, value),
        Err(e) => JsonRpcResponse::error(req.id, error_codes::INTERNAL_ERROR, e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::MemoryWallet;
    use serde_json::Value;

    fn registry() -> ToolRegistry {
        let wallet = Arc::new(MemoryWallet::new([3u8; 32], "testnet").unwrap());
        register_wallet_tools(wallet).unwrap()
    }

    fn request(method: &str, params: Value) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".into(),
            id: json!(1),
            method: method.into(),
            params: Some(params),
        }
    }

    #[tokio::test]
    async fn initialize_reports_protocol_and_server_info() {
        let reg = registry();
        let resp = handle_request(&reg, request("initialize", json!({})))
            .await
            .unwrap();
        let result = resp.result.unwrap();
        assert_eq!(result["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(result["serverInfo"]["name"], "wallet-mcp-server-rs");
    }

    #[tokio::test]
    async fn tools_list_exposes_every_tool() {
        let reg = registry();
        let resp = handle_request(&reg, request("tools/list", json!({})))
            .await
            .unwrap();
        let tools = resp.result.unwrap()["tools"].as_array().unwrap().len();
        assert_eq!(tools, 28);
    }

    #[tokio::test]
    async fn unknown_method_is_rejected() {
        let reg = registry();
        let resp = handle_request(&reg, request("tools/unsubscribe", json!({})))
            .await
            .unwrap();
        assert_eq!(resp.error.unwrap().code, error_codes::METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_tool_is_rejected_before_any_handler_runs() {
        let reg = registry();
        let resp = handle_request(
            &reg,
            request("tools/call", json!({ "name": "wallet_mintCoins", "arguments": {} })),
        )
        .await
        .unwrap();
        assert_eq!(resp.error.unwrap().code, error_codes::METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn notifications_get_no_response() {
        let reg = registry();
        let req = JsonRpcRequest {
            jsonrpc: "2.0".into(),
            id: Value::Null,
            method: "notifications/initialized".into(),
            params: None,
        };
        assert!(handle_request(&reg, req).await.is_none());
    }

    #[tokio::test]
    async fn tool_call_wraps_the_envelope_in_the_result() {
        let reg = registry();
        let resp = handle_request(
            &reg,
            request(
                "tools/call",
                json!({ "name": "wallet_getNetwork", "arguments": {} }),
            ),
        )
        .await
        .unwrap();
        let result = resp.result.unwrap();
        assert_eq!(result["isError"], false);
        assert_eq!(result["content"][0]["type"], "text");
    }
}
