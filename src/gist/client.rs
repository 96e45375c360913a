//! Authenticated GitHub Gist API client
//!
//! Every operation goes through [`GistClient::request`], which attaches the
//! auth/accept/content-type headers, sends the JSON body and classifies the
//! response by status code. Failures come back as [`AppError::Api`] when
//! GitHub answered with a non-2xx status, [`AppError::Network`] when no
//! response arrived at all, and [`AppError::Decode`] when a 2xx body does not
//! have the shape of the resource asked for.

use super::types::{CreateGistRequest, Gist, GistComment, ListOptions, UpdateGistRequest};
use super::GistApi;
use crate::error::{validate_token, ApiError, AppError};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::fmt;
use tracing::{debug, warn};

/// Production API address
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// Stable v3 JSON media type
pub const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// GitHub Gist API client
#[derive(Clone)]
pub struct GistClient {
    client: Client,
    base_url: String,
    authorization: HeaderValue,
}

impl fmt::Debug for GistClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GistClient")
            .field("base_url", &self.base_url)
            .field("authorization", &"Bearer [REDACTED]")
            .finish()
    }
}

impl GistClient {
    /// Create a client for api.github.com
    pub fn new(token: &str) -> Result<Self, AppError> {
        Self::with_base_url(token, GITHUB_API_URL)
    }

    /// Create a client against another API address (GitHub Enterprise, mock servers)
    pub fn with_base_url(token: &str, base_url: &str) -> Result<Self, AppError> {
        validate_token(token)?;

        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", token.trim()))
            .map_err(|_| AppError::Config("GitHub token contains invalid characters".to_string()))?;
        authorization.set_sensitive(true);

        Ok(Self {
            client: crate::http::build_client()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            authorization,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, self.authorization.clone());
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    /// Send one API call and classify the outcome
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, AppError> {
        self.request_with_headers(method, path, body, HeaderMap::new())
            .await
    }

    /// Like [`request`](Self::request) with extra headers; a header named in
    /// `extra` replaces the default of the same name
    pub async fn request_with_headers(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        extra: HeaderMap,
    ) -> Result<Value, AppError> {
        let url = format!("{}{}", self.base_url, path);

        let mut headers = self.default_headers();
        headers.extend(extra);

        let mut request = self.client.request(method.clone(), &url).headers(headers);
        if let Some(body) = body {
            request = request.body(body.to_string());
        }

        let response = request.send().await.map_err(|e| {
            warn!("{} {} failed before a response: {}", method, path, e);
            AppError::from(e)
        })?;

        let status = response.status();
        let bytes = response.bytes().await?;

        // Empty or non-JSON bodies (DELETE, 204) are treated as null
        let data: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        debug!("{} {} -> {}", method, path, status.as_u16());

        if !status.is_success() {
            return Err(ApiError::from_response(status.as_u16(), data).into());
        }

        Ok(data)
    }

    /// Decode a single resource. serde would otherwise fill a struct from
    /// an array by position.
    async fn request_object<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T, AppError> {
        let data = self.request(method, path, body).await?;
        if !data.is_object() {
            return Err(AppError::Decode(format!(
                "expected a JSON object from {}, got {}",
                path,
                json_kind(&data)
            )));
        }
        Ok(serde_json::from_value(data)?)
    }

    /// Decode a list endpoint; every element must be an object
    async fn request_list<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
    ) -> Result<Vec<T>, AppError> {
        let data = self.request(method, path, None).await?;
        match &data {
            Value::Array(items) => {
                if let Some(item) = items.iter().find(|item| !item.is_object()) {
                    return Err(AppError::Decode(format!(
                        "expected a list of objects from {}, found {}",
                        path,
                        json_kind(item)
                    )));
                }
            }
            other => {
                return Err(AppError::Decode(format!(
                    "expected a JSON array from {}, got {}",
                    path,
                    json_kind(other)
                )))
            }
        }
        Ok(serde_json::from_value(data)?)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn gist_path(gist_id: &str) -> String {
    format!("/gists/{}", urlencoding::encode(gist_id))
}

#[async_trait]
impl GistApi for GistClient {
    async fn create_gist(&self, request: &CreateGistRequest) -> Result<Gist, AppError> {
        let body = serde_json::to_value(request.payload())?;
        self.request_object(Method::POST, "/gists", Some(body)).await
    }

    async fn get_gist(&self, gist_id: &str) -> Result<Gist, AppError> {
        self.request_object(Method::GET, &gist_path(gist_id), None)
            .await
    }

    async fn update_gist(
        &self,
        gist_id: &str,
        request: &UpdateGistRequest,
    ) -> Result<Gist, AppError> {
        let body = serde_json::to_value(request)?;
        self.request_object(Method::PATCH, &gist_path(gist_id), Some(body))
            .await
    }

    async fn delete_gist(&self, gist_id: &str) -> Result<(), AppError> {
        self.request(Method::DELETE, &gist_path(gist_id), None)
            .await?;
        Ok(())
    }

    async fn list_gists(
        &self,
        username: Option<&str>,
        options: &ListOptions,
    ) -> Result<Vec<Gist>, AppError> {
        let path = match username {
            Some(user) => format!("/users/{}/gists", urlencoding::encode(user)),
            None => "/gists".to_string(),
        };

        let query = options.to_query();
        let path = if query.is_empty() {
            path
        } else {
            format!("{}?{}", path, query)
        };

        self.request_list(Method::GET, &path).await
    }

    async fn star_gist(&self, gist_id: &str) -> Result<(), AppError> {
        let path = format!("{}/star", gist_path(gist_id));
        self.request(Method::PUT, &path, None).await?;
        Ok(())
    }

    async fn unstar_gist(&self, gist_id: &str) -> Result<(), AppError> {
        let path = format!("{}/star", gist_path(gist_id));
        self.request(Method::DELETE, &path, None).await?;
        Ok(())
    }

    async fn is_starred(&self, gist_id: &str) -> Result<bool, AppError> {
        let path = format!("{}/star", gist_path(gist_id));
        match self.request(Method::GET, &path, None).await {
            Ok(_) => Ok(true),
            // GitHub answers 404 for "not starred"; 401/403 still propagate
            Err(AppError::Api(e)) if e.status == 404 => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn fork_gist(&self, gist_id: &str) -> Result<Gist, AppError> {
        let path = format!("{}/forks", gist_path(gist_id));
        self.request_object(Method::POST, &path, None).await
    }

    async fn list_comments(&self, gist_id: &str) -> Result<Vec<GistComment>, AppError> {
        let path = format!("{}/comments", gist_path(gist_id));
        self.request_list(Method::GET, &path).await
    }

    async fn create_comment(&self, gist_id: &str, body: &str) -> Result<GistComment, AppError> {
        let path = format!("{}/comments", gist_path(gist_id));
        self.request_object(Method::POST, &path, Some(json!({ "body": body })))
            .await
    }
}
