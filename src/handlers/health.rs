use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};
use tracing::info;

use crate::state::AppState;

/// Health check endpoint
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    info!("Health check requested");

    let credentials = state.config.has_credentials();
    let storage = state.documents.has_object_store();
    let sample = state.documents.sample_exists();

    let status = if credentials { "healthy" } else { "degraded" };

    let response = json!({
        "status": status,
        "timestamp": chrono::Utc::now().timestamp(),
        "version": env!("CARGO_PKG_VERSION"),
        "services": {
            "parser_endpoint": state.config.parser_endpoint,
            "credentials_configured": credentials,
            "document_storage": storage,
            "sample_document": sample
        },
        "auth_enabled": state.config.auth_enabled()
    });

    info!(
        status = status,
        credentials_configured = credentials,
        document_storage = storage,
        "Health check completed"
    );

    Json(response)
}

/// Readiness check endpoint
pub async fn ready_handler(State(state): State<AppState>) -> StatusCode {
    if state.config.has_credentials() {
        info!("Readiness check passed");
        StatusCode::OK
    } else {
        info!("Readiness check failed - parsing service credentials missing");
        StatusCode::SERVICE_UNAVAILABLE
    }
}
