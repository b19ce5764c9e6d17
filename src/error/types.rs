use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;
use uuid::Uuid;

pub type AppResult<T> = Result<T, AppError>;

/// Error body attached to the response so the request-id middleware can
/// re-render it with the id of the request that failed.
#[derive(Clone, Debug)]
pub struct ErrorEnvelope(pub Value);

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing or invalid bearer token")]
    Unauthorized,

    #[error("Required keys missing: {keys}")]
    RequiredKeysMissing { keys: String },

    #[error("File too large: {size}MB exceeds limit of {limit}MB")]
    FileTooLarge { size: usize, limit: usize },

    #[error("Invalid file: {message}")]
    InvalidFile { message: String },

    #[error("The file type you're trying to parse is not supported: {file_type}")]
    UnsupportedFileType { file_type: String },

    #[error("Missing file in request")]
    MissingFile,

    #[error("The file you're trying to parse does not exist: {key}")]
    DocumentNotFound { key: String },

    #[error("Document storage error: {message}")]
    Storage { message: String },

    #[error("Parsing service returned status {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Parsing service unreachable: {message}")]
    UpstreamUnavailable { message: String },

    #[error("Parsing service timed out")]
    UpstreamTimeout,

    #[error("Malformed response from parsing service: {message}")]
    MalformedResponse { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Service unavailable: {service}")]
    ServiceUnavailable { service: String },

    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::RequiredKeysMissing { .. } => "REQUIRED_KEYS_MISSING",
            AppError::FileTooLarge { .. } => "FILE_TOO_LARGE",
            AppError::InvalidFile { .. } => "INVALID_FILE",
            AppError::UnsupportedFileType { .. } => "UNSUPPORTED_FILE_TYPE",
            AppError::MissingFile => "MISSING_FILE",
            AppError::DocumentNotFound { .. } => "DOCUMENT_NOT_FOUND",
            AppError::Storage { .. } => "STORAGE_ERROR",
            AppError::Upstream { .. } => "UPSTREAM_ERROR",
            AppError::UpstreamUnavailable { .. } => "UPSTREAM_UNAVAILABLE",
            AppError::UpstreamTimeout => "UPSTREAM_TIMEOUT",
            AppError::MalformedResponse { .. } => "MALFORMED_RESPONSE",
            AppError::ValidationError { .. } => "VALIDATION_ERROR",
            AppError::ConfigError { .. } => "CONFIG_ERROR",
            AppError::ServiceUnavailable { .. } => "SERVICE_UNAVAILABLE",
            AppError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::RequiredKeysMissing { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::FileTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::InvalidFile { .. } => StatusCode::BAD_REQUEST,
            AppError::UnsupportedFileType { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::MissingFile => StatusCode::BAD_REQUEST,
            AppError::DocumentNotFound { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Storage { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Upstream { status, .. } => StatusCode::from_u16(*status)
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            AppError::UpstreamUnavailable { .. } => StatusCode::BAD_GATEWAY,
            AppError::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            AppError::MalformedResponse { .. } => StatusCode::BAD_GATEWAY,
            AppError::ValidationError { .. } => StatusCode::BAD_REQUEST,
            AppError::ConfigError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.to_string();
        let timestamp = chrono::Utc::now().to_rfc3339();

        if status.is_server_error() {
            tracing::error!(
                error_code = error_code,
                status_code = %status,
                error_message = %message,
                "API error occurred"
            );
        } else {
            tracing::warn!(
                error_code = error_code,
                status_code = %status,
                error_message = %message,
                "Request rejected"
            );
        }

        // Replaced by the caller's id when the request went through the middleware.
        let envelope = json!({
            "success": false,
            "error": {
                "code": error_code,
                "message": message,
                "request_id": Uuid::new_v4().to_string(),
                "timestamp": timestamp
            },
            "data": null
        });

        let mut response = (status, Json(envelope.clone())).into_response();
        response.extensions_mut().insert(ErrorEnvelope(envelope));
        response
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal {
            message: format!("IO error: {}", err),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::ValidationError {
            message: format!("JSON parsing error: {}", err),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::UpstreamTimeout
        } else {
            AppError::UpstreamUnavailable {
                message: err.to_string(),
            }
        }
    }
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::ValidationError {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        AppError::ConfigError {
            message: message.into(),
        }
    }

    pub fn service_unavailable(service: impl Into<String>) -> Self {
        AppError::ServiceUnavailable {
            service: service.into(),
        }
    }

    pub fn invalid_file(message: impl Into<String>) -> Self {
        AppError::InvalidFile {
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        AppError::MalformedResponse {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        AppError::Storage {
            message: message.into(),
        }
    }
}
