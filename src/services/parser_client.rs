use std::time::{Duration, Instant};

use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::sovren::{ParseEnvelope, ParsedDocument};
use crate::models::ResumeDocument;

const ACCOUNT_ID_HEADER: &str = "Sovren-AccountId";
const SERVICE_KEY_HEADER: &str = "Sovren-ServiceKey";

/// Turns a document into the service's structured resume.
#[async_trait]
pub trait ResumeParser: Send + Sync {
    async fn parse(&self, document: &ResumeDocument) -> AppResult<ParsedDocument>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ParsePayload {
    document_as_base64_string: String,
    revision_date: String,
}

pub struct SovrenClient {
    http: Client,
    endpoint: String,
    account_id: String,
    service_key: String,
}

impl SovrenClient {
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            endpoint: config.parser_endpoint.clone(),
            account_id: config.account_id.clone(),
            service_key: config.service_key.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn payload(document: &ResumeDocument) -> ParsePayload {
        ParsePayload {
            document_as_base64_string: general_purpose::STANDARD.encode(&document.content),
            revision_date: chrono::Utc::now().format("%Y-%m-%d").to_string(),
        }
    }
}

#[async_trait]
impl ResumeParser for SovrenClient {
    async fn parse(&self, document: &ResumeDocument) -> AppResult<ParsedDocument> {
        let start = Instant::now();
        info!(
            endpoint = %self.endpoint,
            document = %document.name,
            size = document.size,
            "Sending document to parsing service"
        );

        let response = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .header(ACCOUNT_ID_HEADER, &self.account_id)
            .header(SERVICE_KEY_HEADER, &self.service_key)
            .json(&Self::payload(document))
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        if status != StatusCode::OK {
            let message = String::from_utf8_lossy(&body).trim().to_string();
            warn!(
                status = status.as_u16(),
                elapsed_ms = elapsed_ms,
                "Parsing service returned a non-200 response"
            );
            return Err(AppError::Upstream {
                status: status.as_u16(),
                message: if message.is_empty() {
                    status.canonical_reason().unwrap_or("no body").to_string()
                } else {
                    message
                },
            });
        }

        debug!(bytes = body.len(), elapsed_ms = elapsed_ms, "Parsing service responded");
        decode_response(&body)
    }
}

/// Decodes the envelope, then the JSON document embedded in it as a string.
pub fn decode_response(body: &[u8]) -> AppResult<ParsedDocument> {
    let envelope: ParseEnvelope = serde_json::from_slice(body)
        .map_err(|e| AppError::malformed(format!("response envelope: {}", e)))?;

    if let Some(info) = &envelope.info {
        match info.code.as_deref() {
            Some("Success") | None => {}
            Some(code) => warn!(
                code = code,
                message = info.message.as_deref().unwrap_or(""),
                "Parsing service reported a non-success code"
            ),
        }
    }

    let parsed = envelope
        .value
        .and_then(|value| value.parsed_document)
        .ok_or_else(|| AppError::malformed("missing Value.ParsedDocument"))?;

    serde_json::from_str(&parsed)
        .map_err(|e| AppError::malformed(format!("parsed document: {}", e)))
}
