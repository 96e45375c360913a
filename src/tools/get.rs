//! Get tool implementation

use super::format::format_gist_info;
use super::{into_result, parse_args};
use crate::cli::GistIdArgs;
use crate::error::{validate_gist_id, AppError};
use crate::gist::GistApi;
use crate::mcp::ToolResult;
use serde_json::Value;
use tracing::info;

/// Handle get_gist tool call
pub async fn handle_get(api: &dyn GistApi, args: Value) -> Result<ToolResult, AppError> {
    let get_args: GistIdArgs = parse_args(args)?;
    validate_gist_id(&get_args.gist_id)?;

    Ok(execute_get(api, get_args).await)
}

pub async fn execute_get(api: &dyn GistApi, get_args: GistIdArgs) -> ToolResult {
    into_result("get gist", run_get(api, &get_args.gist_id).await)
}

pub async fn run_get(api: &dyn GistApi, gist_id: &str) -> Result<String, AppError> {
    info!("get_gist: {}", gist_id);
    let gist = api.get_gist(gist_id).await?;
    Ok(format!("📄 Gist details:\n\n{}", format_gist_info(&gist)))
}

/// Raw content URL of one file (CLI `get --raw-url`)
pub async fn run_raw_url(api: &dyn GistApi, gist_id: &str, filename: &str) -> Result<String, AppError> {
    let gist = api.get_gist(gist_id).await?;
    gist.raw_url(filename)
        .map(str::to_string)
        .ok_or_else(|| {
            AppError::InvalidInput(format!("Gist {} has no file named {}", gist_id, filename))
        })
}
