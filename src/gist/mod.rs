//! GitHub Gist API access

pub mod client;
pub mod types;


pub use client::GistClient;
pub use types::{
    CreateGistRequest, FileChange, FileContent, Gist, GistComment, ListOptions, NewFile,
    UpdateGistRequest,
};

use crate::error::AppError;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// The Gist operations the tools and CLI depend on.
///
/// [`GistClient`] is the real implementation; tests substitute stubs.
#[async_trait]
pub trait GistApi: Send + Sync {
    async fn create_gist(&self, request: &CreateGistRequest) -> Result<Gist, AppError>;

    async fn get_gist(&self, gist_id: &str) -> Result<Gist, AppError>;

    async fn update_gist(&self, gist_id: &str, request: &UpdateGistRequest)
        -> Result<Gist, AppError>;

    async fn delete_gist(&self, gist_id: &str) -> Result<(), AppError>;

    /// Gists of `username`, or of the authenticated user when `None`
    async fn list_gists(
        &self,
        username: Option<&str>,
        options: &ListOptions,
    ) -> Result<Vec<Gist>, AppError>;

    async fn star_gist(&self, gist_id: &str) -> Result<(), AppError>;

    async fn unstar_gist(&self, gist_id: &str) -> Result<(), AppError>;

    async fn is_starred(&self, gist_id: &str) -> Result<bool, AppError>;

    async fn fork_gist(&self, gist_id: &str) -> Result<Gist, AppError>;

    async fn list_comments(&self, gist_id: &str) -> Result<Vec<GistComment>, AppError>;

    async fn create_comment(&self, gist_id: &str, body: &str) -> Result<GistComment, AppError>;

    /// Create one gist from an ordered list of files. A repeated filename
    /// keeps its last content.
    async fn create_multi_file_gist(
        &self,
        description: &str,
        files: &[NewFile],
        public: bool,
    ) -> Result<Gist, AppError> {
        let mut map = BTreeMap::new();
        for file in files {
            map.insert(file.filename.clone(), FileContent::new(file.content.clone()));
        }

        let request = CreateGistRequest {
            description: Some(description.to_string()),
            public: Some(public),
            files: map,
        };
        self.create_gist(&request).await
    }

    /// Store a base64 image as a private Markdown gist and return its page URL.
    ///
    /// Gists have no binary attachments, so the image becomes a data URI
    /// inside `{filename}.md`.
    async fn upload_image(&self, filename: &str, base64_content: &str) -> Result<String, AppError> {
        let markdown = format!(
            "![{}](data:image/png;base64,{})",
            filename, base64_content
        );

        let mut files = BTreeMap::new();
        files.insert(format!("{}.md", filename), FileContent::new(markdown));

        let request = CreateGistRequest {
            description: Some(format!("Image: {}", filename)),
            public: Some(false),
            files,
        };
        let gist = self.create_gist(&request).await?;
        Ok(gist.html_url)
    }
}
