use std::collections::HashSet;
use std::env;
use std::path::PathBuf;
use anyhow::{Result, Context};
use tracing::{info, warn};

pub const DEFAULT_PARSER_ENDPOINT: &str = "https://rest.resumeparsing.com/v9/parser/resume";
pub const DEFAULT_SAMPLE_DOCUMENT: &str = "ResumeSample.doc";

/// Where the router is being driven from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Runtime {
    Lambda,
    Server,
}

#[derive(Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub max_file_size_mb: usize,
    pub request_timeout_seconds: u64,
    pub parser_endpoint: String,
    pub account_id: String,
    pub service_key: String,
    pub sample_document_path: PathBuf,
    pub attachments_bucket: Option<String>,
    pub auth_tokens: HashSet<String>,
    pub runtime: Runtime,
}

// Credentials and tokens stay out of the logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("max_file_size_mb", &self.max_file_size_mb)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .field("parser_endpoint", &self.parser_endpoint)
            .field("account_id_set", &!self.account_id.is_empty())
            .field("service_key_set", &!self.service_key.is_empty())
            .field("sample_document_path", &self.sample_document_path)
            .field("attachments_bucket", &self.attachments_bucket)
            .field("auth_tokens", &self.auth_tokens.len())
            .field("runtime", &self.runtime)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_port = match lookup("PORT") {
            Some(_) => Self::parse_var(&lookup, "PORT", 8080).context("Failed to parse PORT")?,
            None => Self::parse_var(&lookup, "SERVER_PORT", 8080)
                .context("Failed to parse SERVER_PORT")?,
        };

        let config = Config {
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| {
                info!("SERVER_HOST not set, using default: 0.0.0.0");
                "0.0.0.0".to_string()
            }),
            server_port,
            max_file_size_mb: Self::parse_var(&lookup, "MAX_FILE_SIZE_MB", 10)
                .context("Failed to parse MAX_FILE_SIZE_MB")?,
            request_timeout_seconds: Self::parse_var(&lookup, "REQUEST_TIMEOUT_SECONDS", 30)
                .context("Failed to parse REQUEST_TIMEOUT_SECONDS")?,
            parser_endpoint: lookup("PARSER_ENDPOINT")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_PARSER_ENDPOINT.to_string()),
            account_id: lookup("SOVREN_ACCOUNT_ID").unwrap_or_default(),
            service_key: lookup("SOVREN_SERVICE_KEY").unwrap_or_default(),
            sample_document_path: lookup("SAMPLE_DOCUMENT_PATH")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SAMPLE_DOCUMENT.to_string())
                .into(),
            attachments_bucket: lookup("AWS_ATTACHMENTS_BUCKET")
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            auth_tokens: lookup("AUTH_TOKEN")
                .unwrap_or_default()
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            runtime: if lookup("AWS_LAMBDA_RUNTIME_API").is_some() {
                Runtime::Lambda
            } else {
                Runtime::Server
            },
        };

        config.validate()?;

        if !config.has_credentials() {
            warn!("SOVREN_ACCOUNT_ID or SOVREN_SERVICE_KEY not set; parsing requests will be rejected upstream");
        }
        if config.auth_tokens.is_empty() {
            warn!("No AUTH_TOKEN configured; bearer authentication is disabled");
        } else {
            info!("Loaded {} auth tokens", config.auth_tokens.len());
        }

        info!("Configuration loaded successfully: {:?}", config);
        Ok(config)
    }

    fn parse_var<F, T>(lookup: &F, var_name: &str, default: T) -> Result<T>
    where
        F: Fn(&str) -> Option<String>,
        T: std::str::FromStr + Copy + std::fmt::Debug,
        T::Err: std::fmt::Display,
    {
        match lookup(var_name) {
            Some(val) => match val.trim().parse() {
                Ok(parsed) => Ok(parsed),
                Err(e) => {
                    warn!("Failed to parse {}: {} (using default: {:?})", var_name, e, default);
                    Ok(default)
                }
            },
            None => {
                info!("{} not set, using default: {:?}", var_name, default);
                Ok(default)
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.server_port == 0 {
            return Err(anyhow::anyhow!("SERVER_PORT must be greater than 0"));
        }
        if self.max_file_size_mb == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_MB must be greater than 0"));
        }
        if self.request_timeout_seconds == 0 {
            return Err(anyhow::anyhow!("REQUEST_TIMEOUT_SECONDS must be greater than 0"));
        }
        if !self.parser_endpoint.starts_with("http://") && !self.parser_endpoint.starts_with("https://") {
            return Err(anyhow::anyhow!("PARSER_ENDPOINT must be an http(s) URL"));
        }
        Ok(())
    }

    pub fn max_file_size_bytes(&self) -> usize {
        self.max_file_size_mb * 1024 * 1024
    }

    pub fn has_credentials(&self) -> bool {
        !self.account_id.is_empty() && !self.service_key.is_empty()
    }

    pub fn auth_enabled(&self) -> bool {
        !self.auth_tokens.is_empty()
    }

    pub fn validate_token(&self, token: &str) -> bool {
        self.auth_tokens.contains(token)
    }
}
