use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::services::DocumentSource;

/// Body of `POST /parser`.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ParseRequest {
    pub uid: Option<String>,
    pub key: Option<String>,
    pub file_name: Option<String>,
    pub file_ext: Option<String>,
    /// Base64 encoded document. When present no storage lookup happens.
    pub document: Option<String>,
}

impl ParseRequest {
    pub fn into_source(self) -> AppResult<DocumentSource> {
        if let Some(encoded) = self.document {
            let name = match non_blank(self.file_name.as_deref()) {
                Some(name) => with_extension(name, non_blank(self.file_ext.as_deref())),
                None => "document".to_string(),
            };
            return Ok(DocumentSource::Inline { name, encoded });
        }

        let missing: Vec<&str> = [
            ("uid", &self.uid),
            ("key", &self.key),
            ("file_name", &self.file_name),
            ("file_ext", &self.file_ext),
        ]
        .iter()
        .filter(|(_, value)| non_blank(value.as_deref()).is_none())
        .map(|(name, _)| *name)
        .collect();

        if !missing.is_empty() {
            return Err(AppError::RequiredKeysMissing {
                keys: missing.join(", "),
            });
        }

        let file_name = self.file_name.unwrap_or_default();
        let file_ext = self.file_ext.unwrap_or_default();
        Ok(DocumentSource::Object {
            key: self.key.unwrap_or_default().trim().to_string(),
            name: with_extension(file_name.trim(), Some(file_ext.trim())),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn with_extension(name: &str, ext: Option<&str>) -> String {
    match ext.map(|e| e.trim_start_matches('.')) {
        Some(ext) if !ext.is_empty() && !name.contains('.') => format!("{}.{}", name, ext),
        _ => name.to_string(),
    }
}

const SUPPORTED_MIME_TYPES: &[&str] = &[
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/pdf",
    "application/rtf",
    "application/x-rtf",
    "text/rtf",
    "text/richtext",
    "text/plain",
    "text/html",
    "application/vnd.oasis.opendocument.text",
];

const SUPPORTED_EXTENSIONS: &[&str] = &["doc", "docx", "pdf", "rtf", "txt", "html", "htm", "odt"];

/// A resume document on its way to the parsing service.
#[derive(Debug, Clone)]
pub struct ResumeDocument {
    pub name: String,
    pub size: usize,
    pub content: Vec<u8>,
    pub mime_type: Option<String>,
}

impl ResumeDocument {
    pub fn new(name: String, content: Vec<u8>) -> Self {
        let size = content.len();
        Self {
            name,
            size,
            content,
            mime_type: None,
        }
    }

    pub fn with_mime_type(mut self, mime_type: String) -> Self {
        self.mime_type = Some(mime_type);
        self
    }

    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
    }

    /// Checks the format by MIME type, then extension, then magic bytes.
    pub fn is_supported(&self) -> bool {
        if let Some(mime) = self.mime_type.as_deref() {
            let essence = mime.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
            if essence != "application/octet-stream" && !essence.is_empty() {
                return SUPPORTED_MIME_TYPES.contains(&essence.as_str());
            }
        }

        if let Some(ext) = self.extension() {
            if SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
                return true;
            }
        }

        self.content.starts_with(b"%PDF")
            || self.content.starts_with(&[0xD0, 0xCF, 0x11, 0xE0])
            || self.content.starts_with(b"PK\x03\x04")
            || self.content.starts_with(b"{\\rtf")
    }

    /// Human readable format label for error messages.
    pub fn format_label(&self) -> String {
        self.mime_type
            .clone()
            .or_else(|| self.extension())
            .unwrap_or_else(|| "unknown".to_string())
    }
}
