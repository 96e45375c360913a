//! Error types and input validation for the Gist MCP server

use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// A non-success response from the GitHub API.
///
/// `message` comes from the body's `message` field when present, otherwise
/// it is `HTTP {status}`. `response` holds the whole parsed body (or `None`
/// when the body was empty or not JSON).
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub status: u16,
    pub message: String,
    pub response: Option<Value>,
}

impl ApiError {
    /// Classify a failed response from its status and parsed body
    pub fn from_response(status: u16, body: Value) -> Self {
        let message = body
            .get("message")
            .and_then(|m| m.as_str())
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status));

        let response = if body.is_null() { None } else { Some(body) };

        Self {
            status,
            message,
            response,
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("{}", .0.message)]
    Api(ApiError),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Unexpected response: {0}")]
    Decode(String),
    #[error("Tool '{0}' not found")]
    ToolNotFound(String),
}

impl AppError {
    /// Get the error code for MCP responses and logs
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "config_error",
            AppError::InvalidInput(_) => "invalid_input",
            AppError::Api(e) if e.status == 404 => "not_found",
            AppError::Api(_) => "api_error",
            AppError::Network(_) => "network_error",
            AppError::Decode(_) => "decode_error",
            AppError::ToolNotFound(_) => "tool_not_found",
        }
    }

    /// HTTP status of a protocol error, `None` for everything else
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Api(e) => Some(e.status),
            _ => None,
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Process exit code used in CLI mode
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Config(_) | AppError::InvalidInput(_) | AppError::ToolNotFound(_) => 1,
            AppError::Network(_) => 2,
            AppError::Api(e) if e.status == 404 => 3,
            AppError::Api(e) if e.status == 401 || e.status == 403 => 4,
            AppError::Api(_) | AppError::Decode(_) => 5,
        }
    }
}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        AppError::Api(err)
    }
}

/// Transport failures never carry a status; anything reqwest reports is one
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decode(err.to_string())
    }
}

/// Validation functions
pub fn validate_token(token: &str) -> Result<(), AppError> {
    if token.trim().is_empty() {
        return Err(AppError::Config(
            "GitHub token is not set (use GITHUB_TOKEN or --token)".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_gist_id(gist_id: &str) -> Result<(), AppError> {
    if gist_id.is_empty() {
        return Err(AppError::InvalidInput("gist_id cannot be empty".to_string()));
    }
    Ok(())
}

/// A gist needs at least one file. Filenames are left for GitHub to judge.
pub fn validate_files<V>(files: &BTreeMap<String, V>) -> Result<(), AppError> {
    if files.is_empty() {
        return Err(AppError::InvalidInput(
            "files must contain at least one file".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_per_page(per_page: u32) -> Result<(), AppError> {
    if !(1..=100).contains(&per_page) {
        return Err(AppError::InvalidInput(format!(
            "per_page must be between 1 and 100, got {}",
            per_page
        )));
    }
    Ok(())
}

pub fn validate_page(page: u32) -> Result<(), AppError> {
    if page < 1 {
        return Err(AppError::InvalidInput("page must be at least 1".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_api_error_uses_body_message() {
        let err = ApiError::from_response(404, json!({"message": "Not Found"}));
        assert_eq!(err.status, 404);
        assert_eq!(err.message, "Not Found");
        assert_eq!(err.response, Some(json!({"message": "Not Found"})));
    }

    #[test]
    fn test_api_error_falls_back_to_status() {
        let err = ApiError::from_response(502, Value::Null);
        assert_eq!(err.message, "HTTP 502");
        assert!(err.response.is_none());

        let err = ApiError::from_response(422, json!({"errors": []}));
        assert_eq!(err.message, "HTTP 422");
        assert!(err.response.is_some());
    }

    #[test]
    fn test_status_only_on_protocol_errors() {
        let api = AppError::from(ApiError::from_response(403, Value::Null));
        assert_eq!(api.status(), Some(403));
        assert_eq!(api.exit_code(), 4);

        let net = AppError::Network("connection refused".to_string());
        assert_eq!(net.status(), None);
        assert_eq!(net.exit_code(), 2);
        assert_eq!(net.to_string(), "Network error: connection refused");
    }

    #[test]
    fn test_error_codes() {
        let not_found = AppError::from(ApiError::from_response(404, Value::Null));
        assert_eq!(not_found.error_code(), "not_found");
        assert_eq!(not_found.exit_code(), 3);
        assert_eq!(not_found.message(), "HTTP 404");
        assert_eq!(
            AppError::InvalidInput("x".into()).error_code(),
            "invalid_input"
        );
    }

    #[test]
    fn test_validation() {
        assert!(validate_token("").is_err());
        assert!(validate_token("   ").is_err());
        assert!(validate_token("ghp_abc").is_ok());

        assert!(validate_gist_id("").is_err());
        assert!(validate_gist_id("abc123").is_ok());

        assert!(validate_per_page(0).is_err());
        assert!(validate_per_page(101).is_err());
        assert!(validate_per_page(1).is_ok());
        assert!(validate_per_page(100).is_ok());

        assert!(validate_page(0).is_err());
        assert!(validate_page(3).is_ok());

        let empty: BTreeMap<String, String> = BTreeMap::new();
        assert!(validate_files(&empty).is_err());
        let mut one = BTreeMap::new();
        one.insert(String::new(), "content".to_string());
        assert!(validate_files(&one).is_ok());
    }
}
