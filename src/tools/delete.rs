//! Delete tool implementation

use super::{into_result, parse_args};
use crate::cli::GistIdArgs;
use crate::error::{validate_gist_id, AppError};
use crate::gist::GistApi;
use crate::mcp::ToolResult;
use serde_json::Value;
use tracing::info;

/// Handle delete_gist tool call
pub async fn handle_delete(api: &dyn GistApi, args: Value) -> Result<ToolResult, AppError> {
    let delete_args: GistIdArgs = parse_args(args)?;
    validate_gist_id(&delete_args.gist_id)?;

    Ok(execute_delete(api, delete_args).await)
}

pub async fn execute_delete(api: &dyn GistApi, delete_args: GistIdArgs) -> ToolResult {
    into_result("delete gist", run_delete(api, &delete_args.gist_id).await)
}

pub async fn run_delete(api: &dyn GistApi, gist_id: &str) -> Result<String, AppError> {
    info!("delete_gist: {}", gist_id);
    api.delete_gist(gist_id).await?;
    Ok(format!("✅ Gist (ID: {}) deleted successfully.", gist_id))
}
