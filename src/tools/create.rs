//! Create tool implementation
//!
//! Implements the `create_gist(description, files, public)` MCP tool

use super::format::format_gist_info;
use super::{into_result, parse_args};
use crate::cli::CreateArgs;
use crate::error::{validate_files, AppError};
use crate::gist::{CreateGistRequest, GistApi, NewFile};
use crate::mcp::ToolResult;
use serde_json::Value;
use tracing::{debug, info};

/// Handle create_gist tool call
pub async fn handle_create(api: &dyn GistApi, args: Value) -> Result<ToolResult, AppError> {
    let create_args: CreateArgs = parse_args(args)?;
    validate_files(&create_args.files)?;

    Ok(execute_create(api, create_args).await)
}

/// Execute create tool; never fails, client errors become failure text
pub async fn execute_create(api: &dyn GistApi, create_args: CreateArgs) -> ToolResult {
    into_result("create gist", run_create(api, create_args).await)
}

async fn run_create(api: &dyn GistApi, create_args: CreateArgs) -> Result<String, AppError> {
    info!(
        "create_gist: {} file(s), public={}, description={:?}",
        create_args.files.len(),
        create_args.public,
        create_args.description
    );
    for (filename, file) in &create_args.files {
        debug!("file {}: {} bytes", filename, file.content.len());
    }

    let request = CreateGistRequest {
        description: create_args.description,
        public: Some(create_args.public),
        files: create_args.files,
    };
    let gist = api.create_gist(&request).await?;

    info!("created gist {} at {}", gist.id, gist.html_url);

    Ok(format!(
        "✅ Gist created successfully!\n\n{}",
        format_gist_info(&gist)
    ))
}

/// Create a gist from local files, keeping each file's name (CLI)
pub async fn run_create_from_files(
    api: &dyn GistApi,
    paths: &[std::path::PathBuf],
    description: &str,
    public: bool,
) -> Result<String, AppError> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                AppError::InvalidInput(format!("Not a file path: {}", path.display()))
            })?
            .to_string();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::InvalidInput(format!("Cannot read {}: {}", path.display(), e))
        })?;
        files.push(NewFile { filename, content });
    }

    let gist = api
        .create_multi_file_gist(description, &files, public)
        .await?;

    Ok(format!(
        "✅ Gist created successfully!\n\n{}",
        format_gist_info(&gist)
    ))
}
