use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::{BytesRejection, JsonRejection},
        Multipart, State,
    },
    http::{header::CONTENT_LENGTH, HeaderMap, StatusCode},
    response::Json,
};
use std::time::Instant;
use tracing::{info, warn, error};

use crate::error::{AppError, AppResult};
use crate::middleware::request_id;
use crate::models::{ParseRequest, ParsedResume, ResumeDocument};
use crate::services::{converter, DocumentSource};
use crate::state::AppState;

/// `GET /parser/sample`: parses the document bundled with the function.
pub async fn sample_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<ParsedResume>> {
    let request_id = request_id(&headers);
    info!(request_id = %request_id, "Starting sample document parse");

    let document = state.documents.load(DocumentSource::Sample).await?;
    parse_document(&state, &request_id, document).await
}

/// `POST /parser`: inline base64 content or a stored attachment.
pub async fn parse_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ParseRequest>, JsonRejection>,
) -> AppResult<Json<ParsedResume>> {
    let request_id = request_id(&headers);
    let Json(request) = payload.map_err(|rejection| {
        warn!(request_id = %request_id, error = %rejection.body_text(), "Unreadable parse request body");
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            too_large(&state, &headers)
        } else {
            AppError::validation(rejection.body_text())
        }
    })?;
    info!(
        request_id = %request_id,
        uid = request.uid.as_deref().unwrap_or(""),
        inline = request.document.is_some(),
        "Starting parse request"
    );

    let source = request.into_source().map_err(|e| {
        warn!(request_id = %request_id, error = %e, "Rejected parse request");
        e
    })?;

    let document = state.documents.load(source).await?;
    parse_document(&state, &request_id, document).await
}

/// `POST /parser/upload`: multipart form with a `file` field.
pub async fn upload_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<ParsedResume>> {
    let request_id = request_id(&headers);
    info!(request_id = %request_id, "Starting multipart parse request");

    let mut multipart = multipart.map_err(|rejection| {
        warn!(request_id = %request_id, error = %rejection.body_text(), "Unreadable multipart request");
        AppError::invalid_file(rejection.body_text())
    })?;

    let extracted = extract_file_from_multipart(&mut multipart)
        .await
        .map_err(|e| match e {
            MultipartFailure::Read(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                too_large(&state, &headers)
            }
            MultipartFailure::Read(e) => {
                AppError::invalid_file(format!("Failed to read multipart body: {}", e.body_text()))
            }
            MultipartFailure::App(e) => e,
        });

    let document = match extracted {
        Ok(document) => {
            info!(
                request_id = %request_id,
                file_name = %document.name,
                file_size = document.size,
                "File extracted from multipart form"
            );
            document
        }
        Err(e) => {
            error!(request_id = %request_id, error = %e, "Failed to extract file from multipart");
            return Err(e);
        }
    };

    parse_document(&state, &request_id, document).await
}

/// Read errors stay raw until the handler can see whether the body limit was hit.
enum MultipartFailure {
    Read(MultipartError),
    App(AppError),
}

impl From<MultipartError> for MultipartFailure {
    fn from(err: MultipartError) -> Self {
        MultipartFailure::Read(err)
    }
}

async fn extract_file_from_multipart(
    multipart: &mut Multipart,
) -> Result<ResumeDocument, MultipartFailure> {
    while let Some(field) = multipart.next_field().await? {
        if field.name().unwrap_or("") != "file" {
            continue;
        }

        let file_name = field.file_name().unwrap_or("document").to_string();
        let content_type = field.content_type().map(|ct| ct.to_string());

        let data = field.bytes().await?;

        let mut document = ResumeDocument::new(file_name, data.to_vec());
        if let Some(mime_type) = content_type {
            document = document.with_mime_type(mime_type);
        }
        return Ok(document);
    }

    Err(MultipartFailure::App(AppError::MissingFile))
}

/// `POST /parser/binary`: the body is the document.
pub async fn binary_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<bytes::Bytes, BytesRejection>,
) -> AppResult<Json<ParsedResume>> {
    let request_id = request_id(&headers);
    info!(request_id = %request_id, "Starting binary parse request");

    let body = body.map_err(|rejection| {
        warn!(request_id = %request_id, error = %rejection.body_text(), "Unreadable binary body");
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            too_large(&state, &headers)
        } else {
            AppError::invalid_file(rejection.body_text())
        }
    })?;

    let file_name = headers
        .get("x-file-name")
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.trim().is_empty())
        .unwrap_or("uploaded")
        .to_string();

    let mut document = ResumeDocument::new(file_name, body.to_vec());
    if let Some(content_type) = headers.get("content-type").and_then(|ct| ct.to_str().ok()) {
        document = document.with_mime_type(content_type.to_string());
    }

    parse_document(&state, &request_id, document).await
}

/// Validates the document, sends it upstream and flattens the result.
async fn parse_document(
    state: &AppState,
    request_id: &str,
    document: ResumeDocument,
) -> AppResult<Json<ParsedResume>> {
    let start = Instant::now();
    validate_document(state, request_id, &document)?;

    let parsed = match state.parser.parse(&document).await {
        Ok(parsed) => parsed,
        Err(e) => {
            error!(request_id = %request_id, error = %e, "Parsing service call failed");
            return Err(e);
        }
    };

    let resume = converter::convert(&parsed);
    let total_time = start.elapsed().as_millis() as u64;

    info!(
        request_id = %request_id,
        document = %document.name,
        employment_records = resume.json.employment.len(),
        education_records = resume.json.education.len(),
        total_time_ms = total_time,
        "Request completed successfully"
    );

    Ok(Json(resume))
}

/// `FILE_TOO_LARGE` for a body cut off by the route's body limit.
fn too_large(state: &AppState, headers: &HeaderMap) -> AppError {
    let limit = state.config.max_file_size_mb;
    let size = headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok())
        .map(|bytes| bytes.div_ceil(1024 * 1024))
        .filter(|&mb| mb > limit)
        .unwrap_or(limit + 1);

    AppError::FileTooLarge { size, limit }
}

fn validate_document(state: &AppState, request_id: &str, document: &ResumeDocument) -> AppResult<()> {
    if document.content.is_empty() {
        warn!(request_id = %request_id, document = %document.name, "Document is empty");
        return Err(AppError::invalid_file("File is empty"));
    }

    let max_size_bytes = state.config.max_file_size_bytes();
    if document.size > max_size_bytes {
        warn!(
            request_id = %request_id,
            file_size = document.size,
            max_size = max_size_bytes,
            "File size exceeds limit"
        );
        return Err(AppError::FileTooLarge {
            size: document.size.div_ceil(1024 * 1024),
            limit: state.config.max_file_size_mb,
        });
    }

    if !document.is_supported() {
        warn!(
            request_id = %request_id,
            file_type = %document.format_label(),
            "Unsupported document type"
        );
        return Err(AppError::UnsupportedFileType {
            file_type: document.format_label(),
        });
    }

    Ok(())
}
