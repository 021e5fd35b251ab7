// src/services/source.rs

//! Sheet sources.
//!
//! A source yields the raw CSV text of one sheet snapshot. Each call is an
//! independent request: no retries, no caching.

use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{AppError, Result};
use crate::models::SourceConfig;
use crate::utils::http;

/// Trait for raw sheet providers.
#[async_trait]
pub trait SheetSource: Send + Sync {
    /// Fetch the raw CSV payload.
    async fn fetch(&self) -> Result<String>;

    /// Human-readable origin, used in log lines.
    fn describe(&self) -> String;
}

/// Published spreadsheet export fetched over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSheetSource {
    client: Client,
    url: String,
}

impl HttpSheetSource {
    /// Create a source with a client built from the configuration.
    pub fn new(config: &SourceConfig) -> Result<Self> {
        Ok(Self::with_client(
            http::create_async_client(config)?,
            &config.url,
        ))
    }

    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SheetSource for HttpSheetSource {
    async fn fetch(&self) -> Result<String> {
        log::debug!("Fetching sheet from {}", self.url);
        http::fetch_text(&self.client, &self.url).await
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// CSV export saved on disk.
#[derive(Debug, Clone)]
pub struct FileSheetSource {
    path: PathBuf,
}

impl FileSheetSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SheetSource for FileSheetSource {
    async fn fetch(&self) -> Result<String> {
        let text = tokio::fs::read_to_string(&self.path).await?;
        if text.trim().is_empty() {
            return Err(AppError::EmptyBody(self.path.display().to_string()));
        }
        Ok(text)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
