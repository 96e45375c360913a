//! Comment commands (CLI only)

use super::format::format_comment;
use crate::error::AppError;
use crate::gist::GistApi;

pub async fn run_list_comments(api: &dyn GistApi, gist_id: &str) -> Result<String, AppError> {
    let comments = api.list_comments(gist_id).await?;
    if comments.is_empty() {
        return Ok(format!("💬 No comments on gist {}.", gist_id));
    }

    let rendered = comments
        .iter()
        .map(format_comment)
        .collect::<Vec<_>>()
        .join("\n\n");
    Ok(format!(
        "💬 Comments on gist {} ({}):\n\n{}",
        gist_id,
        comments.len(),
        rendered
    ))
}

pub async fn run_add_comment(api: &dyn GistApi, gist_id: &str, body: &str) -> Result<String, AppError> {
    if body.trim().is_empty() {
        return Err(AppError::InvalidInput("Comment body cannot be empty".to_string()));
    }
    let comment = api.create_comment(gist_id, body).await?;
    Ok(format!("✅ Comment added\n\n{}", format_comment(&comment)))
}
