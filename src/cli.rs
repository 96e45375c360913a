//! CLI mode implementation
//!
//! Provides the command-line interface and the argument types shared with
//! the MCP tool schemas

use crate::gist::{FileChange, FileContent};
use clap::{Parser, Subcommand};
use schemars::gen::SchemaGenerator;
use schemars::schema::Schema;
use schemars::JsonSchema;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

pub const DEFAULT_PER_PAGE: u32 = 30;
pub const DEFAULT_PAGE: u32 = 1;

/// gist-mcp CLI
#[derive(Parser, Debug)]
#[command(name = "gist-mcp")]
#[command(about = "GitHub Gist MCP server and command-line utility", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// GitHub personal access token with the gist scope
    #[arg(long, global = true, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// GitHub API base URL
    #[arg(long, global = true, env = "GIST_API_URL", default_value = crate::gist::client::GITHUB_API_URL)]
    pub api_url: String,

    /// Diagnostic log file (defaults to gist-mcp-server.log in the temp directory)
    #[arg(long, global = true, env = "GIST_MCP_LOG")]
    pub log_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output (no short flag to avoid conflicts)
    #[arg(long, global = true)]
    pub quiet: bool,
}

impl Cli {
    pub fn log_file_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("gist-mcp-server.log"))
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the MCP server on stdio (default when no command is given)
    Serve,
    #[command(flatten)]
    Gist(GistCommand),
}

/// One-shot Gist operations
#[derive(Subcommand, Debug)]
pub enum GistCommand {
    /// Create a gist from local files
    Create(CreateCommand),
    /// Show a gist
    Get(GetCommand),
    /// Delete a gist
    Delete(GistIdArgs),
    /// List gists
    List(ListArgs),
    /// Star a gist
    Star(GistIdArgs),
    /// Remove the star from a gist
    Unstar(GistIdArgs),
    /// Check whether a gist is starred
    Starred(GistIdArgs),
    /// Fork a gist
    Fork(GistIdArgs),
    /// List comments on a gist
    Comments(GistIdArgs),
    /// Add a comment to a gist
    Comment(CommentCommand),
    /// Upload an image as a private Markdown gist
    UploadImage(UploadImageCommand),
}

/// Arguments of tools that take only a gist ID
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug)]
pub struct GistIdArgs {
    /// Gist ID
    #[schemars(description = "Gist ID", length(min = 1))]
    pub gist_id: String,
}

/// Same as the map's own schema plus `minProperties: 1`
fn non_empty_files_schema(gen: &mut SchemaGenerator) -> Schema {
    let mut schema = gen.subschema_for::<BTreeMap<String, FileContent>>();
    if let Schema::Object(object) = &mut schema {
        object.object().min_properties = Some(1);
    }
    schema
}

/// Accept `50` as well as `50.0`; fractions and negatives are rejected
fn whole_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if value.fract() != 0.0 || value < 0.0 || value > f64::from(u32::MAX) {
        return Err(D::Error::custom(format!(
            "expected a whole number, got {}",
            value
        )));
    }
    Ok(value as u32)
}

fn default_per_page() -> u32 {
    DEFAULT_PER_PAGE
}

fn default_page() -> u32 {
    DEFAULT_PAGE
}

/// list_gists tool arguments
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug)]
pub struct ListArgs {
    /// User whose gists to list (defaults to the authenticated user)
    #[arg(short = 'u', long)]
    #[serde(default)]
    #[schemars(description = "User whose gists to list (defaults to the authenticated user)")]
    pub username: Option<String>,

    /// Results per page (1-100, default 30)
    #[arg(long, default_value_t = DEFAULT_PER_PAGE)]
    #[serde(default = "default_per_page", deserialize_with = "whole_number")]
    #[schemars(description = "Results per page (1-100, default 30)", range(min = 1, max = 100))]
    pub per_page: u32,

    /// Page number (default 1)
    #[arg(long, default_value_t = DEFAULT_PAGE)]
    #[serde(default = "default_page", deserialize_with = "whole_number")]
    #[schemars(description = "Page number (default 1)", range(min = 1))]
    pub page: u32,

    /// Only gists updated at or after this ISO 8601 timestamp
    #[arg(long)]
    #[serde(default)]
    #[schemars(skip)]
    pub since: Option<String>,
}

/// create_gist tool arguments
#[derive(JsonSchema, Deserialize, Serialize, Clone, Debug)]
pub struct CreateArgs {
    /// Gist description
    #[serde(default)]
    #[schemars(description = "Gist description")]
    pub description: Option<String>,

    /// Files keyed by filename
    #[schemars(
        description = "Files keyed by filename, each with its content",
        schema_with = "non_empty_files_schema"
    )]
    pub files: BTreeMap<String, FileContent>,

    /// Whether the gist is public (default false)
    #[serde(default)]
    #[schemars(description = "Whether the gist is public (default: false)")]
    pub public: bool,
}

/// update_gist tool arguments
#[derive(JsonSchema, Deserialize, Serialize, Clone, Debug)]
pub struct UpdateArgs {
    /// Gist ID
    #[schemars(description = "ID of the gist to update", length(min = 1))]
    pub gist_id: String,

    /// New description
    #[serde(default)]
    #[schemars(description = "New description")]
    pub description: Option<String>,

    /// File changes keyed by current filename; null deletes the file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(
        description = "Files to change, keyed by current filename. An object sets new content and/or a new filename; null deletes the file"
    )]
    pub files: Option<BTreeMap<String, FileChange>>,
}

/// Create command arguments
#[derive(Parser, Debug)]
pub struct CreateCommand {
    /// Files to upload; each keeps its file name
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Gist description
    #[arg(short = 'd', long, default_value = "")]
    pub description: String,

    /// Make the gist public
    #[arg(long)]
    pub public: bool,
}

/// Get command arguments
#[derive(Parser, Debug)]
pub struct GetCommand {
    /// Gist ID
    pub gist_id: String,

    /// Print only the raw URL of this file
    #[arg(long)]
    pub raw_url: Option<String>,
}

/// Comment command arguments
#[derive(Parser, Debug)]
pub struct CommentCommand {
    /// Gist ID
    pub gist_id: String,

    /// Comment text
    pub body: String,
}

/// Upload-image command arguments
#[derive(Parser, Debug)]
pub struct UploadImageCommand {
    /// Image file to embed
    pub path: PathBuf,

    /// Name for the gist file (defaults to the image file name)
    #[arg(short = 'n', long)]
    pub name: Option<String>,
}
