//! Tests for tool dispatch: argument validation, the never-throw contract and
//! what each tool hands to the client

use super::call_tool;
use super::stub::{sample_gist, FailingApi, NetworkFailingApi, RecordingApi};
use crate::error::AppError;
use crate::gist::{FileChange, GistApi, GistClient};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn valid_invocations() -> Vec<(&'static str, Value)> {
    vec![
        ("create_gist", json!({"files": {"a.txt": {"content": "hi"}}})),
        ("get_gist", json!({"gist_id": "abc123"})),
        ("update_gist", json!({"gist_id": "abc123", "description": "d"})),
        ("delete_gist", json!({"gist_id": "abc123"})),
        ("list_gists", json!({})),
        ("star_gist", json!({"gist_id": "abc123"})),
        ("unstar_gist", json!({"gist_id": "abc123"})),
    ]
}

async fn assert_all_tools_fail_softly(api: &dyn GistApi, expected_message: &str) {
    for (name, args) in valid_invocations() {
        let result = call_tool(api, name, args)
            .await
            .unwrap_or_else(|e| panic!("{} returned Err({:?})", name, e));
        assert!(result.is_error, "{} should be failure-marked", name);
        assert_eq!(result.content.len(), 1);
        let text = result.first_text();
        assert!(text.starts_with("❌ Failed to "), "{}: {}", name, text);
        assert!(text.contains(expected_message), "{}: {}", name, text);
    }
}

#[tokio::test]
async fn test_protocol_errors_never_escape_tools() {
    assert_all_tools_fail_softly(&FailingApi, "Server Error").await;
}

#[tokio::test]
async fn test_network_errors_never_escape_tools() {
    assert_all_tools_fail_softly(&NetworkFailingApi, "Network error: connection refused").await;
}

#[tokio::test]
async fn test_unknown_tool() {
    let err = call_tool(&FailingApi, "upload_image", json!({})).await.unwrap_err();
    assert!(matches!(err, AppError::ToolNotFound(ref n) if n == "upload_image"));
}

#[tokio::test]
async fn test_invalid_arguments_are_rejected_before_the_client() {
    let api = RecordingApi::default();
    let invalid = vec![
        ("create_gist", json!({"files": {}})),
        ("create_gist", json!({"description": "no files"})),
        ("get_gist", json!({"gist_id": ""})),
        ("get_gist", Value::Null),
        ("update_gist", json!({"files": {}})),
        ("delete_gist", json!({"gist_id": 42})),
        ("list_gists", json!({"per_page": 0})),
        ("list_gists", json!({"per_page": 101})),
        ("list_gists", json!({"page": 0})),
        ("list_gists", json!({"per_page": 2.5})),
        ("star_gist", json!({})),
        ("unstar_gist", json!({"gist_id": ""})),
    ];

    for (name, args) in invalid {
        let err = call_tool(&api, name, args.clone()).await.unwrap_err();
        assert!(
            matches!(err, AppError::InvalidInput(_)),
            "{} {} gave {:?}",
            name,
            args,
            err
        );
    }
    assert!(api.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_each_tool_makes_exactly_one_call() {
    for (name, args) in valid_invocations() {
        let api = RecordingApi::default();
        let result = call_tool(&api, name, args).await.unwrap();
        assert!(!result.is_error, "{}: {}", name, result.first_text());
        assert_eq!(api.calls.lock().unwrap().len(), 1, "{}", name);
    }
}

#[tokio::test]
async fn test_create_defaults_to_private() {
    let api = RecordingApi::default();
    let result = call_tool(
        &api,
        "create_gist",
        json!({"files": {"a.txt": {"content": "hi"}}}),
    )
    .await
    .unwrap();
    assert!(result.first_text().starts_with("✅ Gist created successfully!"));

    let created = api.created.lock().unwrap();
    assert_eq!(created[0].public, Some(false));
    assert_eq!(created[0].description, None);
    assert_eq!(created[0].files["a.txt"].content, "hi");
}

#[tokio::test]
async fn test_update_passes_tri_state_through() {
    let api = RecordingApi::default();
    call_tool(
        &api,
        "update_gist",
        json!({
            "gist_id": "abc123",
            "files": {"old.txt": null, "a.txt": {"filename": "b.txt"}}
        }),
    )
    .await
    .unwrap();

    let updated = api.updated.lock().unwrap();
    let (id, request) = &updated[0];
    assert_eq!(id, "abc123");
    let files = request.files.as_ref().unwrap();
    assert_eq!(files["old.txt"], FileChange::Delete);
    assert_eq!(files["a.txt"], FileChange::modify(None, Some("b.txt")));
    assert_eq!(files.len(), 2);
}

#[tokio::test]
async fn test_list_applies_defaults_and_formats() {
    let api = RecordingApi {
        gists: vec![sample_gist("one"), sample_gist("two")],
        ..Default::default()
    };
    let result = call_tool(&api, "list_gists", json!({"username": "octocat"}))
        .await
        .unwrap();

    let text = result.first_text();
    assert!(text.starts_with("📄 Gists for octocat (2):"));
    assert!(text.contains("1. No description (Private)\n   ID: one"));
    assert!(text.contains("2. No description (Private)\n   ID: two"));

    let listed = api.listed.lock().unwrap();
    let (user, options) = &listed[0];
    assert_eq!(user.as_deref(), Some("octocat"));
    assert_eq!(options.per_page, Some(30));
    assert_eq!(options.page, Some(1));
    assert_eq!(options.since, None);
}

#[tokio::test]
async fn test_list_accepts_float_page_size() {
    let api = RecordingApi::default();
    let result = call_tool(&api, "list_gists", json!({"per_page": 50.0, "page": 3.0}))
        .await
        .unwrap();
    assert!(!result.is_error);

    let listed = api.listed.lock().unwrap();
    assert_eq!(listed[0].1.per_page, Some(50));
    assert_eq!(listed[0].1.page, Some(3));
}

#[tokio::test]
async fn test_list_empty() {
    let api = RecordingApi::default();
    let result = call_tool(&api, "list_gists", Value::Null).await.unwrap();
    assert_eq!(result.first_text(), "📄 No gists found.");
    assert_eq!(api.listed.lock().unwrap()[0].0, None);
}

#[tokio::test]
async fn test_delete_and_star_messages() {
    let api = RecordingApi::default();
    let deleted = call_tool(&api, "delete_gist", json!({"gist_id": "abc123"}))
        .await
        .unwrap();
    assert_eq!(deleted.first_text(), "✅ Gist (ID: abc123) deleted successfully.");

    let starred = call_tool(&api, "star_gist", json!({"gist_id": "abc123"}))
        .await
        .unwrap();
    assert_eq!(starred.first_text(), "⭐ Starred gist (ID: abc123).");

    let unstarred = call_tool(&api, "unstar_gist", json!({"gist_id": "abc123"}))
        .await
        .unwrap();
    assert_eq!(unstarred.first_text(), "⭐ Unstarred gist (ID: abc123).");
}

#[tokio::test]
async fn test_create_end_to_end_against_mock_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/gists"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "abc123",
            "html_url": "https://example/abc123",
            "files": {"a.txt": {"filename": "a.txt", "type": "text/plain", "language": null,
                                "raw_url": "https://example/raw/a.txt", "size": 2}},
            "public": false,
            "owner": null,
            "description": null,
            "created_at": "2024-05-01T10:00:00Z",
            "updated_at": "2024-05-01T10:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GistClient::with_base_url("ghp_test", &server.uri()).unwrap();
    let result = call_tool(
        &client,
        "create_gist",
        json!({"files": {"a.txt": {"content": "hi"}}}),
    )
    .await
    .unwrap();

    assert!(!result.is_error);
    let text = result.first_text();
    assert!(text.starts_with("✅"));
    assert!(text.contains("abc123"));
    assert!(text.contains("https://example/abc123"));
    assert!(text.contains("Owner: Anonymous"));
}

#[tokio::test]
async fn test_get_not_found_against_mock_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gists/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
        .mount(&server)
        .await;

    let client = GistClient::with_base_url("ghp_test", &server.uri()).unwrap();
    let result = call_tool(&client, "get_gist", json!({"gist_id": "gone"}))
        .await
        .unwrap();
    assert!(result.is_error);
    assert_eq!(result.first_text(), "❌ Failed to get gist: Not Found");
}

#[tokio::test]
async fn test_cli_only_commands() {
    use super::{comments, fork, get, star};

    let api = RecordingApi::default();
    assert_eq!(
        star::run_starred(&api, "starred").await.unwrap(),
        "⭐ Gist (ID: starred) is starred."
    );
    assert_eq!(
        star::run_starred(&api, "other").await.unwrap(),
        "Gist (ID: other) is not starred."
    );

    let forked = fork::run_fork(&api, "abc123").await.unwrap();
    assert!(forked.starts_with("✅ Forked gist abc123 into fork1"));

    assert_eq!(
        comments::run_list_comments(&api, "abc123").await.unwrap(),
        "💬 No comments on gist abc123."
    );
    let added = comments::run_add_comment(&api, "abc123", "looks good").await.unwrap();
    assert!(added.ends_with("looks good"));
    assert!(matches!(
        comments::run_add_comment(&api, "abc123", "  ").await,
        Err(AppError::InvalidInput(_))
    ));

    assert_eq!(
        get::run_raw_url(&api, "abc123", "a.txt").await.unwrap(),
        "https://example/raw/a.txt"
    );
    assert!(get::run_raw_url(&api, "abc123", "b.txt").await.is_err());
}

#[tokio::test]
async fn test_create_from_files_uses_file_names() {
    use std::io::Write;

    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("main.rs");
    let second = dir.path().join("README.md");
    std::fs::File::create(&first)
        .unwrap()
        .write_all(b"fn main() {}")
        .unwrap();
    std::fs::File::create(&second)
        .unwrap()
        .write_all(b"# Demo")
        .unwrap();

    let api = RecordingApi::default();
    let text = super::create::run_create_from_files(&api, &[first, second], "demo", true)
        .await
        .unwrap();
    assert!(text.starts_with("✅ Gist created successfully!"));

    let created = api.created.lock().unwrap();
    assert_eq!(created[0].description.as_deref(), Some("demo"));
    assert_eq!(created[0].public, Some(true));
    assert_eq!(created[0].files["main.rs"].content, "fn main() {}");
    assert_eq!(created[0].files["README.md"].content, "# Demo");
}
