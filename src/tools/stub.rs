//! GistApi stand-ins for tool tests

use crate::error::{ApiError, AppError};
use crate::gist::{
    CreateGistRequest, Gist, GistApi, GistComment, ListOptions, UpdateGistRequest,
};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Mutex;

/// Every call fails with an HTTP 500 protocol error
pub struct FailingApi;

/// Every call fails as if the host were unreachable
pub struct NetworkFailingApi;

fn protocol_error() -> AppError {
    AppError::Api(ApiError::from_response(500, json!({"message": "Server Error"})))
}

fn network_error() -> AppError {
    AppError::Network("connection refused".to_string())
}

macro_rules! failing_api {
    ($name:ident, $err:expr) => {
        #[async_trait]
        impl GistApi for $name {
            async fn create_gist(&self, _: &CreateGistRequest) -> Result<Gist, AppError> {
                Err($err)
            }
            async fn get_gist(&self, _: &str) -> Result<Gist, AppError> {
                Err($err)
            }
            async fn update_gist(&self, _: &str, _: &UpdateGistRequest) -> Result<Gist, AppError> {
                Err($err)
            }
            async fn delete_gist(&self, _: &str) -> Result<(), AppError> {
                Err($err)
            }
            async fn list_gists(&self, _: Option<&str>, _: &ListOptions) -> Result<Vec<Gist>, AppError> {
                Err($err)
            }
            async fn star_gist(&self, _: &str) -> Result<(), AppError> {
                Err($err)
            }
            async fn unstar_gist(&self, _: &str) -> Result<(), AppError> {
                Err($err)
            }
            async fn is_starred(&self, _: &str) -> Result<bool, AppError> {
                Err($err)
            }
            async fn fork_gist(&self, _: &str) -> Result<Gist, AppError> {
                Err($err)
            }
            async fn list_comments(&self, _: &str) -> Result<Vec<GistComment>, AppError> {
                Err($err)
            }
            async fn create_comment(&self, _: &str, _: &str) -> Result<GistComment, AppError> {
                Err($err)
            }
        }
    };
}

failing_api!(FailingApi, protocol_error());
failing_api!(NetworkFailingApi, network_error());

pub fn sample_gist(id: &str) -> Gist {
    serde_json::from_value(json!({
        "id": id,
        "html_url": format!("https://gist.github.com/{}", id),
        "files": {"a.txt": {"filename": "a.txt", "raw_url": "https://example/raw/a.txt", "size": 2}},
        "public": false,
        "created_at": "2024-05-01T10:00:00Z",
        "updated_at": "2024-05-02T11:30:00Z",
        "description": null,
        "owner": null
    }))
    .unwrap()
}

/// Succeeds with canned data and remembers what it was asked
#[derive(Default)]
pub struct RecordingApi {
    pub created: Mutex<Vec<CreateGistRequest>>,
    pub updated: Mutex<Vec<(String, UpdateGistRequest)>>,
    pub listed: Mutex<Vec<(Option<String>, ListOptions)>>,
    pub calls: Mutex<Vec<String>>,
    pub gists: Vec<Gist>,
}

impl RecordingApi {
    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl GistApi for RecordingApi {
    async fn create_gist(&self, request: &CreateGistRequest) -> Result<Gist, AppError> {
        self.record("create".to_string());
        self.created.lock().unwrap().push(request.clone());
        Ok(sample_gist("stub1"))
    }

    async fn get_gist(&self, gist_id: &str) -> Result<Gist, AppError> {
        self.record(format!("get {}", gist_id));
        Ok(sample_gist(gist_id))
    }

    async fn update_gist(&self, gist_id: &str, request: &UpdateGistRequest) -> Result<Gist, AppError> {
        self.record(format!("update {}", gist_id));
        self.updated
            .lock()
            .unwrap()
            .push((gist_id.to_string(), request.clone()));
        Ok(sample_gist(gist_id))
    }

    async fn delete_gist(&self, gist_id: &str) -> Result<(), AppError> {
        self.record(format!("delete {}", gist_id));
        Ok(())
    }

    async fn list_gists(&self, username: Option<&str>, options: &ListOptions) -> Result<Vec<Gist>, AppError> {
        self.record("list".to_string());
        self.listed
            .lock()
            .unwrap()
            .push((username.map(str::to_string), options.clone()));
        Ok(self.gists.clone())
    }

    async fn star_gist(&self, gist_id: &str) -> Result<(), AppError> {
        self.record(format!("star {}", gist_id));
        Ok(())
    }

    async fn unstar_gist(&self, gist_id: &str) -> Result<(), AppError> {
        self.record(format!("unstar {}", gist_id));
        Ok(())
    }

    async fn is_starred(&self, gist_id: &str) -> Result<bool, AppError> {
        self.record(format!("starred {}", gist_id));
        Ok(gist_id == "starred")
    }

    async fn fork_gist(&self, gist_id: &str) -> Result<Gist, AppError> {
        self.record(format!("fork {}", gist_id));
        Ok(sample_gist("fork1"))
    }

    async fn list_comments(&self, gist_id: &str) -> Result<Vec<GistComment>, AppError> {
        self.record(format!("comments {}", gist_id));
        Ok(Vec::new())
    }

    async fn create_comment(&self, gist_id: &str, body: &str) -> Result<GistComment, AppError> {
        self.record(format!("comment {}", gist_id));
        Ok(GistComment {
            id: 1,
            url: String::new(),
            body: body.to_string(),
            user: None,
            created_at: "2024-05-01T10:00:00Z".to_string(),
            updated_at: "2024-05-01T10:00:00Z".to_string(),
        })
    }
}
