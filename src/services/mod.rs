pub mod converter;
pub mod document_store;
pub mod parser_client;

pub use document_store::{DocumentSource, DocumentStore, ObjectStore, S3ObjectStore};
pub use parser_client::{ResumeParser, SovrenClient};
