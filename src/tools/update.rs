//! Update tool implementation
//!
//! Implements the `update_gist(gist_id, description, files)` MCP tool. A file
//! set to `null` is deleted, an object edits or renames it, and files left out
//! of the map are not touched.

use super::format::format_gist_info;
use super::{into_result, parse_args};
use crate::cli::UpdateArgs;
use crate::error::{validate_gist_id, AppError};
use crate::gist::{FileChange, GistApi, UpdateGistRequest};
use crate::mcp::ToolResult;
use serde_json::Value;
use tracing::{debug, info};

/// Handle update_gist tool call
pub async fn handle_update(api: &dyn GistApi, args: Value) -> Result<ToolResult, AppError> {
    let update_args: UpdateArgs = parse_args(args)?;
    validate_gist_id(&update_args.gist_id)?;

    Ok(execute_update(api, update_args).await)
}

pub async fn execute_update(api: &dyn GistApi, update_args: UpdateArgs) -> ToolResult {
    into_result("update gist", run_update(api, update_args).await)
}

async fn run_update(api: &dyn GistApi, update_args: UpdateArgs) -> Result<String, AppError> {
    info!("update_gist: {}", update_args.gist_id);
    if let Some(files) = &update_args.files {
        for (filename, change) in files {
            match change {
                FileChange::Delete => debug!("file {}: delete", filename),
                FileChange::Modify(edit) => debug!(
                    "file {}: content={} rename={:?}",
                    filename,
                    edit.content.as_ref().map(|c| c.len()).unwrap_or(0),
                    edit.filename
                ),
                FileChange::Unchanged => {}
            }
        }
    }

    let request = UpdateGistRequest {
        description: update_args.description,
        files: update_args.files,
    };
    let gist = api.update_gist(&update_args.gist_id, &request).await?;

    Ok(format!(
        "✅ Gist updated successfully!\n\n{}",
        format_gist_info(&gist)
    ))
}
