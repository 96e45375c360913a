//! MCP tools implementation
//!
//! Each tool parses and validates its arguments, makes exactly one Gist API
//! call and renders the outcome as text. [`call_tool`] is the boundary: client
//! errors come back as failure-marked [`ToolResult`]s, only argument problems
//! and unknown tool names are returned as `Err`.

pub mod comments;
pub mod create;
pub mod delete;
pub mod format;
pub mod fork;
pub mod get;
pub mod image;
pub mod list;
pub mod star;
pub mod update;

#[cfg(test)]
pub(crate) mod stub;

#[cfg(test)]
mod dispatch_tests;

use crate::error::AppError;
use crate::gist::GistApi;
use crate::mcp::ToolResult;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

/// Route a tools/call invocation to its handler
pub async fn call_tool(
    api: &dyn GistApi,
    name: &str,
    arguments: Value,
) -> Result<ToolResult, AppError> {
    match name {
        "create_gist" => create::handle_create(api, arguments).await,
        "get_gist" => get::handle_get(api, arguments).await,
        "update_gist" => update::handle_update(api, arguments).await,
        "delete_gist" => delete::handle_delete(api, arguments).await,
        "list_gists" => list::handle_list(api, arguments).await,
        "star_gist" => star::handle_star(api, arguments).await,
        "unstar_gist" => star::handle_unstar(api, arguments).await,
        _ => Err(AppError::ToolNotFound(name.to_string())),
    }
}

/// Decode tool arguments; a missing arguments object counts as `{}`
pub(crate) fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T, AppError> {
    let args = if args.is_null() {
        Value::Object(Default::default())
    } else {
        args
    };
    serde_json::from_value(args)
        .map_err(|e| AppError::InvalidInput(format!("Invalid arguments: {}", e)))
}

/// Failure-marked result for an error raised by the client
pub(crate) fn failure(action: &str, err: &AppError) -> ToolResult {
    match err.status() {
        Some(status) => warn!("{} failed with HTTP {}: {}", action, status, err),
        None => warn!("{} failed ({}): {}", action, err.error_code(), err),
    }
    ToolResult::error(format!("❌ Failed to {}: {}", action, err.message()))
}

/// Turn the outcome of a tool run into its response text
pub(crate) fn into_result(action: &str, outcome: Result<String, AppError>) -> ToolResult {
    match outcome {
        Ok(text) => ToolResult::text(text),
        Err(e) => failure(action, &e),
    }
}
