use axum::{
    body::Bytes,
    extract::{Multipart, Path, State},
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use pc_core::types::{CorpusMatch, Document, FileFormat, InternalMatch, OnlineMatch};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::{AppState, FileRecord};

const UPLOAD_FIELD: &str = "file";
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

pub fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/check_plagiarism", post(check_plagiarism))
        .route("/list_files", get(list_files))
        .route("/save_file/{file_id}", get(save_file))
        .route("/files/{file_id}", get(get_file))
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "uptime_secs": state.start_time.elapsed().as_secs(),
        "files": state.records.count(),
    }))
}

#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub file_id: String,
    pub filename: String,
    pub internal_plagiarism: Vec<InternalMatch>,
    pub online_plagiarism: Vec<OnlineMatch>,
    pub against_results: Vec<CorpusMatch>,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct FileSummary {
    pub id: String,
    pub filename: String,
    pub upload_date: String,
    pub file_type: String,
}

async fn check_plagiarism(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<CheckResponse>, ApiError> {
    let (filename, bytes) = read_upload(&mut multipart).await?;
    let format = FileFormat::from_path(std::path::Path::new(&filename))?;

    let file_id = Uuid::new_v4().to_string();
    let stored_filename = format!("{file_id}_{}", sanitize_filename(&filename, format));

    let checker = Arc::clone(&state.checker);
    let corpus = Arc::clone(&state.corpus);
    let stored = stored_filename.clone();
    let (document, internal, against) = tokio::task::spawn_blocking(move || -> Result<_, ApiError> {
        let id = corpus.store(&stored, &bytes)?;
        let path = corpus.path_of(&id);
        let text = match corpus.registry().extract(&path, format.extension()) {
            Ok(text) if !text.trim().is_empty() => text,
            outcome => {
                // a file without usable text must not linger in the corpus
                if let Err(e) = std::fs::remove_file(&path) {
                    warn!(path = %path.display(), error = %e, "cannot remove rejected upload");
                }
                return Err(match outcome {
                    Err(e) => ApiError::from(e),
                    Ok(_) => ApiError::unprocessable("No text could be extracted from the file"),
                });
            }
        };
        let document = Document::new(id, text);
        let internal = checker.check_internal(&document);
        let against = checker.check_against_corpus(&document, corpus.as_ref());
        Ok((document, internal, against))
    })
    .await
    .map_err(|e| ApiError::internal(format!("check task failed: {e}")))??;

    let online = state.checker.check_online(&document, Arc::clone(&state.search)).await;

    info!(
        file_id = %file_id,
        filename = %filename,
        internal = internal.len(),
        corpus = against.len(),
        online = online.len(),
        "upload checked"
    );

    let record = FileRecord {
        id: file_id.clone(),
        original_filename: filename.clone(),
        stored_filename,
        file_type: format.extension().to_string(),
        upload_date: Utc::now(),
        internal_plagiarism: internal.into_entries(),
        online_plagiarism: online.into_entries(),
        against_results: against.into_entries(),
    };
    state.records.insert(record.clone());

    Ok(Json(CheckResponse {
        file_id,
        filename,
        internal_plagiarism: record.internal_plagiarism,
        online_plagiarism: record.online_plagiarism,
        against_results: record.against_results,
        status: "success",
    }))
}

/// The first `file` field of the form, with its client-side filename.
async fn read_upload(multipart: &mut Multipart) -> Result<(String, Bytes), ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().trim().to_string();
        if filename.is_empty() {
            return Err(ApiError::bad_request("No file selected"));
        }
        let bytes = field.bytes().await?;
        return Ok((filename, bytes));
    }
    Err(ApiError::bad_request("No file part in the request"))
}

async fn list_files(State(state): State<AppState>) -> Json<Vec<FileSummary>> {
    let files = state
        .records
        .list()
        .into_iter()
        .map(|r| FileSummary {
            id: r.id,
            filename: r.original_filename,
            upload_date: r.upload_date.format(DATE_FORMAT).to_string(),
            file_type: r.file_type,
        })
        .collect();
    Json(files)
}

async fn get_file(
    State(state): State<AppState>,
    Path(file_id): Path<String>,
) -> Result<Json<FileRecord>, ApiError> {
    state
        .records
        .get(&file_id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("File not found: {file_id}")))
}

async fn save_file(
    State(state): State<AppState>,
    Path(file_id): Path<String>,
) -> Result<Response, ApiError> {
    let record = state
        .records
        .get(&file_id)
        .ok_or_else(|| ApiError::not_found(format!("File not found: {file_id}")))?;
    let path = state.corpus.root().join(&record.stored_filename);
    let bytes = tokio::fs::read(&path).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ApiError::not_found(format!("File not found: {file_id}")),
        _ => ApiError::internal(e.to_string()),
    })?;

    let format = FileFormat::from_extension(&record.file_type)
        .map_err(|e| ApiError::internal(e.to_string()))?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        sanitize_filename(&record.original_filename, format)
    );
    Ok((
        [
            (header::CONTENT_TYPE, content_type_for(format).to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

fn content_type_for(format: FileFormat) -> &'static str {
    match format {
        FileFormat::Text => "text/plain; charset=utf-8",
        FileFormat::Docx => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        FileFormat::Pdf => "application/pdf",
    }
}

/// Safe single path component for an upload of `format`: the stem keeps ASCII
/// letters, digits, `.`, `-` and `_`, whitespace becomes `_`, leading dots go.
/// The extension always comes from `format`, so the stored file stays
/// recognizable to the corpus whatever the client named it.
pub fn sanitize_filename(name: &str, format: FileFormat) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let stem = std::path::Path::new(base)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let cleaned: String = stem
        .chars()
        .filter_map(|c| match c {
            c if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') => Some(c),
            c if c.is_whitespace() => Some('_'),
            _ => None,
        })
        .collect();
    let trimmed = cleaned.trim_start_matches('.');
    let stem = if trimmed.is_empty() { "upload" } else { trimmed };
    format!("{stem}.{}", format.extension())
}
