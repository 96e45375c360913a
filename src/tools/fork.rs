//! Fork command (CLI only)

use super::format::format_gist_info;
use crate::error::AppError;
use crate::gist::GistApi;
use tracing::info;

pub async fn run_fork(api: &dyn GistApi, gist_id: &str) -> Result<String, AppError> {
    info!("fork: {}", gist_id);
    let fork = api.fork_gist(gist_id).await?;
    Ok(format!(
        "✅ Forked gist {} into {}\n\n{}",
        gist_id,
        fork.id,
        format_gist_info(&fork)
    ))
}
