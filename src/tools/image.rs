//! Image upload command (CLI only)
//!
//! Reads a local image, base64-encodes it and stores it as a data URI inside
//! a private Markdown gist.

use crate::error::AppError;
use crate::gist::GistApi;
use base64::Engine;
use std::path::Path;
use tracing::info;

pub fn encode_image(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

pub async fn run_upload_image(
    api: &dyn GistApi,
    path: &Path,
    name: Option<&str>,
) -> Result<String, AppError> {
    let name = match name {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| AppError::InvalidInput(format!("Not a file path: {}", path.display())))?
            .to_string(),
    };

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| AppError::InvalidInput(format!("Cannot read {}: {}", path.display(), e)))?;
    info!("upload_image: {} ({} bytes)", name, bytes.len());

    let url = api.upload_image(&name, &encode_image(&bytes)).await?;
    Ok(format!("✅ Image uploaded: {}", url))
}
