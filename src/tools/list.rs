//! List tool implementation
//!
//! Implements the `list_gists(username, per_page, page)` MCP tool

use super::format::format_gist_list;
use super::{into_result, parse_args};
use crate::cli::ListArgs;
use crate::error::{validate_page, validate_per_page, AppError};
use crate::gist::{GistApi, ListOptions};
use crate::mcp::ToolResult;
use serde_json::Value;
use tracing::info;

/// Handle list_gists tool call
pub async fn handle_list(api: &dyn GistApi, args: Value) -> Result<ToolResult, AppError> {
    let list_args: ListArgs = parse_args(args)?;
    validate_per_page(list_args.per_page)?;
    validate_page(list_args.page)?;

    Ok(execute_list(api, list_args).await)
}

pub async fn execute_list(api: &dyn GistApi, list_args: ListArgs) -> ToolResult {
    into_result("list gists", run_list(api, list_args).await)
}

pub async fn run_list(api: &dyn GistApi, list_args: ListArgs) -> Result<String, AppError> {
    info!(
        "list_gists: user={:?} per_page={} page={}",
        list_args.username, list_args.per_page, list_args.page
    );

    let options = ListOptions {
        per_page: Some(list_args.per_page),
        page: Some(list_args.page),
        since: list_args.since,
    };
    let username = list_args.username.as_deref().filter(|u| !u.is_empty());
    let gists = api.list_gists(username, &options).await?;

    if gists.is_empty() {
        return Ok("📄 No gists found.".to_string());
    }

    let target = username.unwrap_or("the authenticated user");
    Ok(format!(
        "📄 Gists for {} ({}):\n\n{}",
        target,
        gists.len(),
        format_gist_list(&gists)
    ))
}
