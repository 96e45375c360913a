//! MCP (Model Context Protocol) handling module
//!
//! This module implements the JSON-RPC 2.0 protocol for MCP communication.
//! Requests arrive one per line on stdin; every `tools/call` runs as its own
//! task and responses are written to stdout in completion order.

use crate::error::AppError;
use crate::gist::GistApi;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader as AsyncBufReader};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const INTERNAL_ERROR: i64 = -32603;

/// Protocol revision offered when the client does not ask for one
pub const DEFAULT_PROTOCOL_VERSION: &str = "2024-11-05";

const SERVER_INSTRUCTIONS: &str = "This server creates and manages GitHub Gists. \
Use create_gist to share code snippets or files (private by default), get_gist and \
list_gists to inspect existing gists, update_gist to edit, rename or delete files \
(set a file to null to delete it), delete_gist to remove a gist, and star_gist / \
unstar_gist to manage stars.";

/// Server context for tracking client information
#[derive(Clone, Default)]
pub struct ServerContext {
    pub client_info: Option<ClientInfo>,
    pub protocol_version: Option<String>,
}

impl ServerContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_client_name(&self) -> String {
        self.client_info
            .as_ref()
            .and_then(|info| info.name.as_ref())
            .cloned()
            .unwrap_or_else(|| "Unknown Client".to_string())
    }
}

/// MCP JSON-RPC 2.0 request structure
#[derive(Debug, Deserialize)]
pub struct McpRequest {
    /// JSON-RPC version field, always "2.0"
    #[allow(dead_code)]
    pub jsonrpc: String,
    /// `None` when the key is absent; an explicit `"id": null` is kept
    #[serde(default, deserialize_with = "present_id")]
    pub id: Option<Value>,
    pub method: String,
    pub params: Option<Value>,
}

fn present_id<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl McpRequest {
    /// Notifications carry no id and never get a reply
    pub fn is_notification(&self) -> bool {
        self.id.is_none() || self.method.starts_with("notifications/")
    }
}

/// Initialize request parameters
#[derive(Debug, Deserialize)]
pub struct InitializeParams {
    #[serde(rename = "clientInfo")]
    pub client_info: Option<ClientInfo>,
    #[serde(rename = "protocolVersion")]
    pub protocol_version: Option<String>,
}

/// Client information
#[derive(Debug, Deserialize, Clone)]
pub struct ClientInfo {
    pub name: Option<String>,
    #[allow(dead_code)]
    pub version: Option<String>,
}

/// MCP JSON-RPC 2.0 response structure
#[derive(Debug, Serialize)]
pub struct McpResponse {
    pub jsonrpc: String,
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<McpError>,
}

/// MCP Error structure
#[derive(Debug, Serialize)]
pub struct McpError {
    pub code: i64,
    pub message: String,
}

/// MCP Tool call arguments
#[derive(Debug, Deserialize)]
pub struct ToolCallArgs {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

/// MCP Content item
#[derive(Debug, Serialize)]
pub struct ContentItem {
    pub r#type: String,
    pub text: String,
}

/// MCP Tool result
#[derive(Debug, Serialize)]
pub struct ToolResult {
    pub content: Vec<ContentItem>,
    #[serde(rename = "isError", skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl McpResponse {
    /// Create a successful response
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(id: Option<Value>, code: i64, message: &str) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(McpError {
                code,
                message: message.to_string(),
            }),
        }
    }
}

impl ToolResult {
    /// Create a text result
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: vec![ContentItem::text(content)],
            is_error: false,
        }
    }

    /// Create a failure-marked text result
    pub fn error(content: impl Into<String>) -> Self {
        Self {
            content: vec![ContentItem::text(content)],
            is_error: true,
        }
    }

    /// Text of the first content block
    pub fn first_text(&self) -> &str {
        self.content.first().map(|c| c.text.as_str()).unwrap_or("")
    }
}

impl ContentItem {
    /// Helper to create plain text content
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            r#type: "text".to_string(),
            text: content.into(),
        }
    }
}

/// Parse one line into a request, or into the error response owed for it
pub fn parse_request(line: &str) -> Result<McpRequest, McpResponse> {
    let value: Value = serde_json::from_str(line)
        .map_err(|e| McpResponse::error(None, PARSE_ERROR, &format!("Invalid JSON: {}", e)))?;

    let id = value.get("id").cloned();
    serde_json::from_value(value).map_err(|e| {
        McpResponse::error(id, INVALID_REQUEST, &format!("Invalid request: {}", e))
    })
}

/// Serialize MCP response to JSON string
pub fn serialize_response(response: &McpResponse) -> Result<String> {
    Ok(serde_json::to_string(response)?)
}

/// Handle stdio MCP communication
pub async fn handle_stdio(api: Arc<dyn GistApi>) -> Result<()> {
    info!("Starting gist-mcp server on stdio");

    let stdin = tokio::io::stdin();
    let mut reader = AsyncBufReader::new(stdin).lines();

    let (tx, mut rx) = mpsc::unbounded_channel::<McpResponse>();
    let writer = tokio::spawn(async move {
        let mut stdout = tokio::io::stdout();
        while let Some(response) = rx.recv().await {
            let response_json = serialize_response(&response)?;
            debug!("Sending response: {}", response_json);

            stdout.write_all(response_json.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await?;
        }
        anyhow::Ok(())
    });

    // Track server context
    let mut context = ServerContext::new();

    while let Some(line) = reader.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        debug!("Received request: {}", line);

        let request = match parse_request(&line) {
            Ok(request) => request,
            Err(response) => {
                if let Some(e) = &response.error {
                    error!("Rejected message ({}): {}", e.code, e.message);
                }
                let _ = tx.send(response);
                continue;
            }
        };

        if request.method == "initialize" {
            let _ = tx.send(handle_initialize(request, &mut context));
            continue;
        }

        if request.is_notification() {
            debug!("Notification {}", request.method);
            continue;
        }

        let api = Arc::clone(&api);
        let tx = tx.clone();
        tokio::spawn(async move {
            let response = handle_request(request, api.as_ref()).await;
            let _ = tx.send(response);
        });
    }

    // Writer drains once every in-flight call has replied
    drop(tx);
    writer.await??;

    info!("stdin closed, shutting down");
    Ok(())
}

/// Handle a single non-initialize MCP request
pub async fn handle_request(request: McpRequest, api: &dyn GistApi) -> McpResponse {
    match request.method.as_str() {
        "tools/call" => handle_tool_call(request, api).await,
        "tools/list" => handle_tools_list(request),
        "ping" => McpResponse::success(request.id, serde_json::json!({})),
        _ => McpResponse::error(
            request.id,
            METHOD_NOT_FOUND,
            &format!("Method '{}' not found", request.method),
        ),
    }
}

/// Handle tools/call method
async fn handle_tool_call(request: McpRequest, api: &dyn GistApi) -> McpResponse {
    let args: ToolCallArgs = match serde_json::from_value(request.params.unwrap_or_default()) {
        Ok(args) => args,
        Err(e) => {
            return McpResponse::error(
                request.id,
                INVALID_PARAMS,
                &format!("Invalid parameters: {}", e),
            )
        }
    };

    match crate::tools::call_tool(api, &args.name, args.arguments).await {
        Ok(result) => match serde_json::to_value(&result) {
            Ok(value) if result.is_error => {
                debug!("{} returned a failure: {}", args.name, result.first_text());
                McpResponse::success(request.id, value)
            }
            Ok(value) => McpResponse::success(request.id, value),
            Err(e) => McpResponse::error(request.id, INTERNAL_ERROR, &e.to_string()),
        },
        Err(e @ (AppError::InvalidInput(_) | AppError::ToolNotFound(_))) => {
            McpResponse::error(request.id, INVALID_PARAMS, &e.message())
        }
        Err(e) => McpResponse::error(request.id, INTERNAL_ERROR, &e.message()),
    }
}

/// Handle tools/list method
fn handle_tools_list(request: McpRequest) -> McpResponse {
    let tools = build_tools_array();

    McpResponse::success(request.id, serde_json::json!({ "tools": tools }))
}

/// Handle initialize method
pub fn handle_initialize(request: McpRequest, context: &mut ServerContext) -> McpResponse {
    if let Some(params) = request.params {
        if let Ok(init_params) = serde_json::from_value::<InitializeParams>(params) {
            context.client_info = init_params.client_info;
            context.protocol_version = init_params.protocol_version;
        }
    }
    info!("Initialized by {}", context.get_client_name());

    let protocol_version = context
        .protocol_version
        .clone()
        .unwrap_or_else(|| DEFAULT_PROTOCOL_VERSION.to_string());

    let result = serde_json::json!({
        "protocolVersion": protocol_version,
        "serverInfo": {
            "name": "gist-mcp",
            "version": env!("CARGO_PKG_VERSION"),
        },
        "capabilities": {
            "tools": { "listChanged": false }
        },
        "instructions": SERVER_INSTRUCTIONS
    });
    McpResponse::success(request.id, result)
}

/// Build the tools array returned from tools/list
pub fn build_tools_array() -> serde_json::Value {
    use crate::cli::{CreateArgs, GistIdArgs, ListArgs, UpdateArgs};
    use schemars::schema_for;

    let create_schema = schema_for!(CreateArgs);
    let id_schema = schema_for!(GistIdArgs);
    let update_schema = schema_for!(UpdateArgs);
    let list_schema = schema_for!(ListArgs);

    serde_json::json!([
        {
            "name": "create_gist",
            "description": "Create a GitHub Gist with one or more files. Gists are private unless public is true.",
            "inputSchema": create_schema
        },
        {
            "name": "get_gist",
            "description": "Fetch a gist by ID and show its details",
            "inputSchema": id_schema
        },
        {
            "name": "update_gist",
            "description": "Update a gist: change the description, edit or rename files, add files, or delete a file by setting it to null",
            "inputSchema": update_schema
        },
        {
            "name": "delete_gist",
            "description": "Delete a gist by ID. This cannot be undone.",
            "inputSchema": id_schema
        },
        {
            "name": "list_gists",
            "description": "List gists of a user, or of the authenticated user when username is omitted",
            "inputSchema": list_schema
        },
        {
            "name": "star_gist",
            "description": "Star a gist",
            "inputSchema": id_schema
        },
        {
            "name": "unstar_gist",
            "description": "Remove the star from a gist",
            "inputSchema": id_schema
        }
    ])
}
