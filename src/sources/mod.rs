//! Gallery page loading.
//!
//! Pages come from local files or a single plain HTTP GET. There is no retry
//! or proxy fallback; a failed source is reported to the caller. Content that
//! does not look like HTML is rejected before it reaches the extractor.

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Errors that can occur when loading a gallery page.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("{0} does not look like an HTML page")]
    NotHtml(String),

    #[error("Extraction task failed: {0}")]
    Task(String),
}

/// Where a gallery page lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSource {
    File(PathBuf),
    Url(String),
}

impl PageSource {
    /// `http://` and `https://` strings are URLs; anything else is a path.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.starts_with("http://") || s.starts_with("https://") {
            Self::Url(s.to_string())
        } else {
            Self::File(PathBuf::from(s))
        }
    }

    /// Identifier recorded on extracted observations.
    ///
    /// Files are given a `file://` URL when their absolute path is known so
    /// relative image links resolve next to the file.
    pub fn identifier(&self) -> String {
        match self {
            Self::Url(url) => url.clone(),
            Self::File(path) => file_identifier(path),
        }
    }
}

impl std::fmt::Display for PageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Url(url) => f.write_str(url),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

fn file_identifier(path: &Path) -> String {
    let absolute = if path.is_absolute() {
        Some(path.to_path_buf())
    } else {
        std::env::current_dir().ok().map(|cwd| cwd.join(path))
    };

    absolute
        .and_then(|p| Url::from_file_path(p).ok())
        .map(String::from)
        .unwrap_or_else(|| path.display().to_string())
}

/// Raw HTML of one page and the identifier it was loaded from.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub source_url: String,
    pub html: String,
}

/// Loads gallery pages from files or over HTTP.
#[derive(Clone)]
pub struct PageLoader {
    client: Client,
}

impl PageLoader {
    /// Create a loader with the given user agent and request timeout.
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, SourceError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .build()?;
        Ok(Self { client })
    }

    /// Load one page and check that it looks like HTML.
    pub async fn load(&self, source: &PageSource) -> Result<FetchedPage, SourceError> {
        let html = match source {
            PageSource::File(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|e| SourceError::Io {
                        path: path.clone(),
                        source: e,
                    })?
            }
            PageSource::Url(url) => self.fetch(url).await?,
        };

        ensure_html(&html, &source.to_string())?;
        debug!(source = %source, bytes = html.len(), "loaded page");

        Ok(FetchedPage {
            source_url: source.identifier(),
            html,
        })
    }

    async fn fetch(&self, url: &str) -> Result<String, SourceError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    }
}

/// Reject empty content, JSON bodies and plain text.
pub fn ensure_html(content: &str, source: &str) -> Result<(), SourceError> {
    let trimmed = content.trim_start();
    if trimmed.is_empty() || trimmed.starts_with('{') || trimmed.starts_with('[') {
        return Err(SourceError::NotHtml(source.to_string()));
    }

    let lower = trimmed.to_ascii_lowercase();
    let has_markup = ["<!doctype html", "<html", "<body", "<a ", "<a>", "<img", "<div"]
        .iter()
        .any(|marker| lower.contains(marker));

    if has_markup {
        Ok(())
    } else {
        Err(SourceError::NotHtml(source.to_string()))
    }
}
