//! HTTP routes driven through the router without a socket.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use pc_corpus::DirectoryCorpus;
use pc_engine::PlagiarismChecker;
use pc_search::{NullSearch, SearchError, SearchHit, WebSearch};
use pc_server::{app_with_state, state::AppState};
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

const BOUNDARY: &str = "pc-test-boundary";

const ESSAY: &str = "Glaciers retreat when summer melting outpaces winter snowfall.\n\n\
Ice cores preserve bubbles of ancient air for hundreds of thousands of years.\n\n\
Glaciers retreat when summer melting outpaces winter snowfall!";

/// Every query finds one page containing exactly the query.
struct EchoSearch;

#[async_trait]
impl WebSearch for EchoSearch {
    async fn search(&self, query: &str, _max_results: usize) -> Result<Vec<SearchHit>, SearchError> {
        Ok(vec![SearchHit::new(format!("https://echo.example/?q={}", query.len()), "Echo", "")])
    }

    async fn fetch(&self, _url: &str) -> Result<String, SearchError> {
        Ok("Ice cores preserve bubbles of ancient air for hundreds of thousands of years.".into())
    }
}

fn test_state(dir: &TempDir, search: Arc<dyn WebSearch>, max_upload_bytes: usize) -> AppState {
    let corpus = DirectoryCorpus::open(dir.path().join("uploads")).unwrap();
    AppState::new(PlagiarismChecker::default(), corpus, search, max_upload_bytes)
}

fn multipart(field: &str, filename: &str, content: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/check_plagiarism")
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

async fn send_json(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, req).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn upload_dir_entries(dir: &TempDir) -> Vec<String> {
    std::fs::read_dir(dir.path().join("uploads"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect()
}

// ========== Health ==========

#[tokio::test]
async fn test_health() {
    let dir = TempDir::new().unwrap();
    let app = app_with_state(test_state(&dir, Arc::new(NullSearch), 1 << 20));
    let (status, json) = send_json(app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert!(json["uptime_secs"].is_u64());
    assert_eq!(json["files"], 0);
}

#[tokio::test]
async fn test_health_counts_checked_files() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir, Arc::new(NullSearch), 1 << 20);
    send(app_with_state(state.clone()), multipart("file", "one.txt", ESSAY.as_bytes())).await;
    let (_, json) = send_json(app_with_state(state), get("/health")).await;
    assert_eq!(json["files"], 1);
}

// ========== Check Plagiarism ==========

#[tokio::test]
async fn test_check_plagiarism_text_upload() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir, Arc::new(EchoSearch), 1 << 20);
    let (status, json) =
        send_json(app_with_state(state), multipart("file", "glacier essay.txt", ESSAY.as_bytes())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "success");
    assert_eq!(json["filename"], "glacier essay.txt");
    assert_eq!(json["internal_plagiarism"].as_array().unwrap().len(), 1);
    assert_eq!(json["internal_plagiarism"][0]["similarity"], 100.0);
    assert!(json["against_results"].as_array().unwrap().is_empty());

    let online = json["online_plagiarism"].as_array().unwrap();
    assert_eq!(online.len(), 1);
    assert!(online[0]["paragraph"].as_str().unwrap().starts_with("Ice cores"));
    assert_eq!(online[0]["max_similarity"], 100.0);

    let file_id = json["file_id"].as_str().unwrap();
    assert_eq!(upload_dir_entries(&dir), vec![format!("{file_id}_glacier_essay.txt")]);
}

#[tokio::test]
async fn test_second_upload_sees_first_as_corpus() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir, Arc::new(NullSearch), 1 << 20);

    let (_, first) =
        send_json(app_with_state(state.clone()), multipart("file", "first.txt", ESSAY.as_bytes())).await;
    let (status, second) =
        send_json(app_with_state(state), multipart("file", "second.txt", ESSAY.as_bytes())).await;

    assert_eq!(status, StatusCode::OK);
    let against = second["against_results"].as_array().unwrap();
    assert_eq!(against.len(), 1);
    let first_id = first["file_id"].as_str().unwrap();
    assert!(against[0]["document_id"].as_str().unwrap().ends_with(&format!("{first_id}_first.txt")));
    assert_eq!(against[0]["plagiarism_percentage"], 100.0);
}

#[tokio::test]
async fn test_non_ascii_upload_stays_in_corpus() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir, Arc::new(NullSearch), 1 << 20);

    let (status, first) =
        send_json(app_with_state(state.clone()), multipart("file", "đề.txt", ESSAY.as_bytes())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["filename"], "đề.txt");
    let first_id = first["file_id"].as_str().unwrap();
    assert_eq!(upload_dir_entries(&dir), vec![format!("{first_id}_upload.txt")]);

    let (_, second) =
        send_json(app_with_state(state), multipart("file", "second.txt", ESSAY.as_bytes())).await;
    let against = second["against_results"].as_array().unwrap();
    assert_eq!(against.len(), 1);
    assert!(against[0]["document_id"].as_str().unwrap().ends_with(&format!("{first_id}_upload.txt")));
}

#[tokio::test]
async fn test_check_plagiarism_missing_file_field() {
    let dir = TempDir::new().unwrap();
    let app = app_with_state(test_state(&dir, Arc::new(NullSearch), 1 << 20));
    let (status, json) = send_json(app, multipart("attachment", "a.txt", b"text")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "bad_request");
}

#[tokio::test]
async fn test_check_plagiarism_empty_filename() {
    let dir = TempDir::new().unwrap();
    let app = app_with_state(test_state(&dir, Arc::new(NullSearch), 1 << 20));
    let (status, _) = send_json(app, multipart("file", "", b"text")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_check_plagiarism_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let app = app_with_state(test_state(&dir, Arc::new(NullSearch), 1 << 20));
    let (status, json) = send_json(app, multipart("file", "notes.md", b"# heading")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"]["message"].as_str().unwrap().contains(".md"));
    assert!(upload_dir_entries(&dir).is_empty());
}

#[tokio::test]
async fn test_check_plagiarism_no_text_rejected() {
    let dir = TempDir::new().unwrap();
    let app = app_with_state(test_state(&dir, Arc::new(NullSearch), 1 << 20));
    let (status, json) = send_json(app, multipart("file", "blank.txt", b" \n\n \r\n")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"]["code"], "extraction_failed");
    assert!(upload_dir_entries(&dir).is_empty());
}

#[tokio::test]
async fn test_check_plagiarism_broken_docx() {
    let dir = TempDir::new().unwrap();
    let app = app_with_state(test_state(&dir, Arc::new(NullSearch), 1 << 20));
    let (status, _) = send_json(app, multipart("file", "broken.docx", b"not a zip archive")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(upload_dir_entries(&dir).is_empty());
}

#[tokio::test]
async fn test_check_plagiarism_body_limit() {
    let dir = TempDir::new().unwrap();
    let app = app_with_state(test_state(&dir, Arc::new(NullSearch), 256));
    let big = "word ".repeat(200);
    let (status, _) = send(app, multipart("file", "big.txt", big.as_bytes())).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

// ========== Files ==========

#[tokio::test]
async fn test_list_files() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir, Arc::new(NullSearch), 1 << 20);
    let (_, empty) = send_json(app_with_state(state.clone()), get("/list_files")).await;
    assert_eq!(empty, serde_json::json!([]));

    send(app_with_state(state.clone()), multipart("file", "one.txt", ESSAY.as_bytes())).await;
    send(app_with_state(state.clone()), multipart("file", "two.txt", b"Another text entirely.")).await;

    let (status, json) = send_json(app_with_state(state), get("/list_files")).await;
    assert_eq!(status, StatusCode::OK);
    let files = json.as_array().unwrap();
    assert_eq!(files.len(), 2);
    for file in files {
        assert_eq!(file["file_type"], "txt");
        let date = file["upload_date"].as_str().unwrap();
        assert_eq!(date.len(), 19);
        assert_eq!(&date[4..5], "-");
        assert_eq!(&date[10..11], " ");
    }
}

#[tokio::test]
async fn test_save_file_returns_original_bytes() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir, Arc::new(NullSearch), 1 << 20);
    let (_, json) =
        send_json(app_with_state(state.clone()), multipart("file", "essay.txt", ESSAY.as_bytes())).await;
    let file_id = json["file_id"].as_str().unwrap();

    let resp = app_with_state(state)
        .oneshot(get(&format!("/save_file/{file_id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let disposition = resp.headers()[header::CONTENT_DISPOSITION].to_str().unwrap().to_string();
    assert_eq!(disposition, "attachment; filename=\"essay.txt\"");
    assert!(resp.headers()[header::CONTENT_TYPE].to_str().unwrap().starts_with("text/plain"));
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], ESSAY.as_bytes());
}

#[tokio::test]
async fn test_save_file_unknown_id() {
    let dir = TempDir::new().unwrap();
    let app = app_with_state(test_state(&dir, Arc::new(NullSearch), 1 << 20));
    let (status, json) = send_json(app, get("/save_file/does-not-exist")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_get_file_record() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir, Arc::new(NullSearch), 1 << 20);
    let (_, json) =
        send_json(app_with_state(state.clone()), multipart("file", "essay.txt", ESSAY.as_bytes())).await;
    let file_id = json["file_id"].as_str().unwrap();

    let (status, record) = send_json(app_with_state(state.clone()), get(&format!("/files/{file_id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(record["id"], file_id);
    assert_eq!(record["original_filename"], "essay.txt");
    assert_eq!(record["stored_filename"], format!("{file_id}_essay.txt"));
    assert_eq!(record["internal_plagiarism"], json["internal_plagiarism"]);

    let (status, _) = send_json(app_with_state(state), get("/files/missing")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
