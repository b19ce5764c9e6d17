use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn, info};

use crate::error::AppError;
use crate::state::AppState;

const PUBLIC_PATHS: &[&str] = &["/health", "/ready"];

pub async fn auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = request.uri().path();
    let method = request.method();

    if PUBLIC_PATHS.contains(&path) {
        debug!("Skipping auth for {}", path);
        return Ok(next.run(request).await);
    }

    if !state.config.auth_enabled() {
        debug!("Auth disabled, allowing {} {}", method, path);
        return Ok(next.run(request).await);
    }

    let auth_header = match headers.get(AUTHORIZATION) {
        Some(header) => match header.to_str() {
            Ok(value) => value,
            Err(_) => {
                warn!("Invalid Authorization header format for {} {}", method, path);
                return Err(AppError::Unauthorized);
            }
        },
        None => {
            warn!("Missing Authorization header for {} {}", method, path);
            return Err(AppError::Unauthorized);
        }
    };

    let token = match auth_header.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => token.trim(),
        _ => {
            warn!("Authorization header is not a Bearer token for {} {}", method, path);
            return Err(AppError::Unauthorized);
        }
    };

    if !state.config.validate_token(token) {
        warn!("Invalid token attempted for {} {}", method, path);
        return Err(AppError::Unauthorized);
    }

    info!("Authenticated {} {}", method, path);
    Ok(next.run(request).await)
}
