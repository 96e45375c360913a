//! Star tool implementations
//!
//! Implements the `star_gist` and `unstar_gist` MCP tools plus the CLI-only
//! starred check

use super::{into_result, parse_args};
use crate::cli::GistIdArgs;
use crate::error::{validate_gist_id, AppError};
use crate::gist::GistApi;
use crate::mcp::ToolResult;
use serde_json::Value;
use tracing::info;

/// Handle star_gist tool call
pub async fn handle_star(api: &dyn GistApi, args: Value) -> Result<ToolResult, AppError> {
    let star_args: GistIdArgs = parse_args(args)?;
    validate_gist_id(&star_args.gist_id)?;

    Ok(into_result("star gist", run_star(api, &star_args.gist_id).await))
}

/// Handle unstar_gist tool call
pub async fn handle_unstar(api: &dyn GistApi, args: Value) -> Result<ToolResult, AppError> {
    let unstar_args: GistIdArgs = parse_args(args)?;
    validate_gist_id(&unstar_args.gist_id)?;

    Ok(into_result(
        "unstar gist",
        run_unstar(api, &unstar_args.gist_id).await,
    ))
}

pub async fn run_star(api: &dyn GistApi, gist_id: &str) -> Result<String, AppError> {
    info!("star_gist: {}", gist_id);
    api.star_gist(gist_id).await?;
    Ok(format!("⭐ Starred gist (ID: {}).", gist_id))
}

pub async fn run_unstar(api: &dyn GistApi, gist_id: &str) -> Result<String, AppError> {
    info!("unstar_gist: {}", gist_id);
    api.unstar_gist(gist_id).await?;
    Ok(format!("⭐ Unstarred gist (ID: {}).", gist_id))
}

pub async fn run_starred(api: &dyn GistApi, gist_id: &str) -> Result<String, AppError> {
    let starred = api.is_starred(gist_id).await?;
    Ok(if starred {
        format!("⭐ Gist (ID: {}) is starred.", gist_id)
    } else {
        format!("Gist (ID: {}) is not starred.", gist_id)
    })
}
