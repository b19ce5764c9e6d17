use std::sync::Arc;

use aws_config::BehaviorVersion;
use tracing::info;

use crate::config::Config;
use crate::error::AppResult;
use crate::services::{DocumentStore, ObjectStore, ResumeParser, S3ObjectStore, SovrenClient};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub parser: Arc<dyn ResumeParser>,
    pub documents: Arc<DocumentStore>,
}

impl AppState {
    pub fn new(config: Config, parser: Arc<dyn ResumeParser>, documents: DocumentStore) -> Self {
        Self {
            config: Arc::new(config),
            parser,
            documents: Arc::new(documents),
        }
    }

    /// Wires the production parser client and, when a bucket is configured,
    /// the S3 object store.
    pub async fn from_config(config: Config) -> AppResult<Self> {
        let parser = SovrenClient::new(&config)?;

        let objects: Option<Arc<dyn ObjectStore>> = match &config.attachments_bucket {
            Some(bucket) => {
                let aws = aws_config::load_defaults(BehaviorVersion::latest()).await;
                info!(bucket = %bucket, "Document storage enabled");
                Some(Arc::new(S3ObjectStore::new(
                    aws_sdk_s3::Client::new(&aws),
                    bucket.clone(),
                )))
            }
            None => None,
        };

        let documents = DocumentStore::new(config.sample_document_path.clone(), objects);
        Ok(Self::new(config, Arc::new(parser), documents))
    }
}
