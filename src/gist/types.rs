//! Gist API data types
//!
//! Response mirrors are decoded leniently: every field GitHub may omit has a
//! default so that shape drift never turns a successful call into an error.

use schemars::gen::SchemaGenerator;
use schemars::schema::Schema;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

/// A gist as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Gist {
    pub id: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub files: BTreeMap<String, GistFile>,
    #[serde(default)]
    pub public: bool,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub owner: Option<GistOwner>,
}

impl Gist {
    /// Raw content URL of one file, if the gist has it
    pub fn raw_url(&self, filename: &str) -> Option<&str> {
        self.files
            .get(filename)
            .map(|f| f.raw_url.as_str())
            .filter(|url| !url.is_empty())
    }

    /// Filenames joined for display
    pub fn file_names(&self) -> String {
        self.files.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GistFile {
    #[serde(default)]
    pub filename: String,
    #[serde(rename = "type", default)]
    pub file_type: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub raw_url: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GistOwner {
    pub login: String,
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub html_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GistComment {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub user: Option<CommentUser>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommentUser {
    pub login: String,
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub avatar_url: String,
}

/// File body for gist creation
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct FileContent {
    /// File contents
    #[schemars(description = "File contents")]
    pub content: String,
}

impl FileContent {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// One file of a multi-file gist, in caller order
#[derive(Debug, Clone, PartialEq)]
pub struct NewFile {
    pub filename: String,
    pub content: String,
}

/// Input for `POST /gists`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateGistRequest {
    pub description: Option<String>,
    pub public: Option<bool>,
    pub files: BTreeMap<String, FileContent>,
}

/// Wire body for `POST /gists` with defaults applied
#[derive(Debug, Serialize)]
pub(crate) struct CreateGistPayload<'a> {
    pub description: &'a str,
    pub public: bool,
    pub files: &'a BTreeMap<String, FileContent>,
}

impl CreateGistRequest {
    pub(crate) fn payload(&self) -> CreateGistPayload<'_> {
        CreateGistPayload {
            description: self.description.as_deref().unwrap_or(""),
            public: self.public.unwrap_or(false),
            files: &self.files,
        }
    }
}

/// New content and/or name for an existing file
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct FileEdit {
    /// New file contents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "New file contents")]
    pub content: Option<String>,
    /// New file name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "New file name")]
    pub filename: Option<String>,
}

/// What an update does to one file.
///
/// On the wire `Unchanged` is an omitted key, `Delete` is a literal `null`
/// and `Modify` is an object.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FileChange {
    #[default]
    Unchanged,
    Delete,
    Modify(FileEdit),
}

impl FileChange {
    #[cfg(test)]
    pub fn modify(content: Option<&str>, filename: Option<&str>) -> Self {
        FileChange::Modify(FileEdit {
            content: content.map(str::to_string),
            filename: filename.map(str::to_string),
        })
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, FileChange::Unchanged)
    }
}

impl Serialize for FileChange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // Only reachable when serialized outside a file map
            FileChange::Unchanged | FileChange::Delete => serializer.serialize_none(),
            FileChange::Modify(edit) => edit.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for FileChange {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<FileEdit>::deserialize(deserializer)? {
            Some(edit) => FileChange::Modify(edit),
            None => FileChange::Delete,
        })
    }
}

impl JsonSchema for FileChange {
    fn schema_name() -> String {
        "FileChange".to_string()
    }

    fn json_schema(gen: &mut SchemaGenerator) -> Schema {
        <Option<FileEdit>>::json_schema(gen)
    }
}

/// Input for `PATCH /gists/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdateGistRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_file_changes"
    )]
    pub files: Option<BTreeMap<String, FileChange>>,
}

/// Writes the file map, dropping `Unchanged` entries entirely
fn serialize_file_changes<S: Serializer>(
    files: &Option<BTreeMap<String, FileChange>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match files {
        Some(files) => serializer.collect_map(files.iter().filter(|(_, c)| !c.is_unchanged())),
        None => serializer.serialize_none(),
    }
}

/// Query options for listing gists
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListOptions {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub since: Option<String>,
}

impl ListOptions {
    /// Encoded query string without the leading `?`; empty when no option is set
    pub fn to_query(&self) -> String {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        if let Some(per_page) = self.per_page {
            query.append_pair("per_page", &per_page.to_string());
        }
        if let Some(page) = self.page {
            query.append_pair("page", &page.to_string());
        }
        if let Some(since) = &self.since {
            query.append_pair("since", since);
        }
        query.finish()
    }
}
