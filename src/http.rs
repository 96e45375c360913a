//! HTTP client utilities
//!
//! Provides the shared reqwest::Client used for every GitHub API call

use crate::error::AppError;
use reqwest::Client;

/// User agent sent with every request; the GitHub API rejects requests without one
pub const USER_AGENT: &str = concat!("gist-mcp/", env!("CARGO_PKG_VERSION"));

/// Build a reqwest Client for the GitHub API
///
/// No request timeout is configured: a hung call waits until the transport
/// gives up. System proxy variables (HTTPS_PROXY, NO_PROXY, ...) are honored
/// by reqwest itself.
pub fn build_client() -> Result<Client, AppError> {
    Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_carries_version() {
        assert!(USER_AGENT.starts_with("gist-mcp/"));
        assert!(USER_AGENT.ends_with(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_build_client() {
        assert!(build_client().is_ok());
    }
}
