use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_s3::Client as S3Client;
use base64::{engine::general_purpose, Engine as _};
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::models::ResumeDocument;

/// Where a document to parse comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    /// The sample document bundled with the function.
    Sample,
    /// Base64 content carried in the request body.
    Inline { name: String, encoded: String },
    /// An object in the attachments bucket.
    Object { key: String, name: String },
}

/// Read-only access to stored attachments.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn fetch(&self, key: &str) -> AppResult<Vec<u8>>;
}

pub struct S3ObjectStore {
    client: S3Client,
    bucket: String,
}

impl S3ObjectStore {
    pub fn new(client: S3Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn fetch(&self, key: &str) -> AppResult<Vec<u8>> {
        debug!(bucket = %self.bucket, key = key, "Fetching object");

        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| {
                let err = err.into_service_error();
                if err.is_no_such_key() {
                    AppError::DocumentNotFound {
                        key: key.to_string(),
                    }
                } else {
                    AppError::storage(err.to_string())
                }
            })?;

        let bytes = output
            .body
            .collect()
            .await
            .map_err(|e| AppError::storage(format!("Failed to read object body: {}", e)))?
            .into_bytes();

        Ok(bytes.to_vec())
    }
}

pub struct DocumentStore {
    sample_path: PathBuf,
    objects: Option<Arc<dyn ObjectStore>>,
}

impl DocumentStore {
    pub fn new(sample_path: PathBuf, objects: Option<Arc<dyn ObjectStore>>) -> Self {
        Self {
            sample_path,
            objects,
        }
    }

    pub fn has_object_store(&self) -> bool {
        self.objects.is_some()
    }

    pub fn sample_exists(&self) -> bool {
        self.sample_path.is_file()
    }

    pub async fn load(&self, source: DocumentSource) -> AppResult<ResumeDocument> {
        match source {
            DocumentSource::Sample => {
                let content = tokio::fs::read(&self.sample_path).await.map_err(|e| {
                    if e.kind() == ErrorKind::NotFound {
                        AppError::DocumentNotFound {
                            key: self.sample_path.display().to_string(),
                        }
                    } else {
                        AppError::from(e)
                    }
                })?;
                let name = self
                    .sample_path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "sample".to_string());
                info!(path = %self.sample_path.display(), size = content.len(), "Loaded sample document");
                Ok(ResumeDocument::new(name, content))
            }
            DocumentSource::Inline { name, encoded } => {
                let content = decode_base64(&encoded)?;
                Ok(ResumeDocument::new(name, content))
            }
            DocumentSource::Object { key, name } => {
                let objects = self
                    .objects
                    .as_ref()
                    .ok_or_else(|| AppError::service_unavailable("document storage"))?;
                let content = objects.fetch(&key).await?;
                info!(key = %key, size = content.len(), "Loaded stored document");
                Ok(ResumeDocument::new(name, content))
            }
        }
    }
}

/// Standard alphabet; line breaks from MIME-wrapped encoders are ignored.
pub fn decode_base64(encoded: &str) -> AppResult<Vec<u8>> {
    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    general_purpose::STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| AppError::invalid_file(format!("document is not valid base64: {}", e)))
}
