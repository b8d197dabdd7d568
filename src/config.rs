//! Configuration management for lepimap using the prefer crate.
//!
//! Config files are discovered by prefer (`lepimap.toml`, `lepimap.yaml`,
//! `lepimap.json`, ... in the standard locations) or given explicitly with
//! `--config`. Environment variables override file values.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::sources::PageSource;

/// Default user agent for gallery requests.
pub const DEFAULT_USER_AGENT: &str = concat!("lepimap/", env!("CARGO_PKG_VERSION"));
/// Default request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT: u64 = 30;

const USER_AGENT_ENV: &str = "LEPIMAP_USER_AGENT";
const TIMEOUT_ENV: &str = "LEPIMAP_TIMEOUT";

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// User agent for HTTP requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
    /// Gallery pages used when no sources are given on the command line.
    /// Relative file paths are resolved from the config file's directory.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<String>,
    /// Filter applied when none is given on the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_filter: Option<String>,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            sources: Vec::new(),
            default_filter: None,
            source_path: None,
        }
    }
}

impl Config {
    /// Load configuration using prefer crate for discovery.
    pub async fn load() -> Self {
        match prefer::load("lepimap").await {
            Ok(pref_config) => {
                if let Some(path) = pref_config.source_path() {
                    match Self::load_from_path(path).await {
                        Ok(config) => config,
                        Err(e) => {
                            tracing::warn!("{}", e);
                            Self::default_with_env()
                        }
                    }
                } else {
                    Self::default_with_env()
                }
            }
            Err(_) => Self::default_with_env(),
        }
    }

    /// Load from an explicit path when given, otherwise discover.
    /// A broken explicit config falls back to defaults with a warning.
    pub async fn load_with_options(config_path: Option<&Path>) -> Self {
        match config_path {
            Some(path) => Self::load_from_path(path).await.unwrap_or_else(|e| {
                tracing::warn!("{}; using defaults", e);
                Self::default_with_env()
            }),
            None => Self::load().await,
        }
    }

    /// Default config with environment variable overrides applied.
    pub fn default_with_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Load configuration from a specific file path.
    /// Supports JSON, TOML and YAML based on file extension.
    pub async fn load_from_path(path: &Path) -> Result<Self, String> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| format!("Failed to read config file {}: {}", path.display(), e))?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

        let mut config: Config = match ext {
            "toml" => toml::from_str(&contents)
                .map_err(|e| format!("Failed to parse TOML config: {}", e))?,
            "yaml" | "yml" => serde_yaml::from_str(&contents)
                .map_err(|e| format!("Failed to parse YAML config: {}", e))?,
            _ => serde_json::from_str(&contents)
                .map_err(|e| format!("Failed to parse JSON config: {}", e))?,
        };

        config.source_path = Some(path.to_path_buf());
        Ok(config.with_env_overrides())
    }

    /// Apply `LEPIMAP_USER_AGENT` and `LEPIMAP_TIMEOUT`.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var(USER_AGENT_ENV).ok(),
            std::env::var(TIMEOUT_ENV).ok(),
        )
    }

    fn with_overrides(mut self, user_agent: Option<String>, timeout: Option<String>) -> Self {
        if let Some(ua) = user_agent.filter(|s| !s.trim().is_empty()) {
            self.user_agent = ua;
        }
        if let Some(secs) = timeout.and_then(|s| s.trim().parse::<u64>().ok()) {
            self.request_timeout = secs;
        }
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Get the base directory for resolving relative paths.
    pub fn base_dir(&self) -> Option<PathBuf> {
        self.source_path
            .as_ref()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    /// Configured sources, with relative file paths resolved from the
    /// config file's directory.
    pub fn page_sources(&self) -> Vec<PageSource> {
        let base = self.base_dir();
        self.sources
            .iter()
            .map(|s| match PageSource::parse(s) {
                PageSource::File(path) if path.is_relative() => match base {
                    Some(ref dir) => PageSource::File(dir.join(path)),
                    None => PageSource::File(path),
                },
                other => other,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.user_agent.starts_with("lepimap/"));
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.page_sources().is_empty());
    }

    #[test]
    fn test_overrides() {
        let config = Config::default().with_overrides(Some("bot/1.0".into()), Some("5".into()));
        assert_eq!(config.user_agent, "bot/1.0");
        assert_eq!(config.request_timeout, 5);

        let config = Config::default().with_overrides(Some("  ".into()), Some("soon".into()));
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.request_timeout, DEFAULT_REQUEST_TIMEOUT);
    }

    #[tokio::test]
    async fn test_load_toml_resolves_relative_sources() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lepimap.toml");
        std::fs::write(
            &path,
            "request_timeout = 12\nsources = [\"pages/a.html\", \"https://example.org/g\"]\n",
        )
        .unwrap();

        let config = Config::load_from_path(&path).await.unwrap();
        assert_eq!(config.request_timeout, 12);
        assert_eq!(
            config.page_sources(),
            vec![
                PageSource::File(dir.path().join("pages/a.html")),
                PageSource::Url("https://example.org/g".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_load_yaml_and_json() {
        let dir = tempfile::tempdir().unwrap();

        let yaml = dir.path().join("lepimap.yaml");
        std::fs::write(&yaml, "default_filter: monarch\n").unwrap();
        let config = Config::load_from_path(&yaml).await.unwrap();
        assert_eq!(config.default_filter.as_deref(), Some("monarch"));

        let json = dir.path().join("lepimap.json");
        std::fs::write(&json, r#"{"sources": ["/srv/g.html"]}"#).unwrap();
        let config = Config::load_from_path(&json).await.unwrap();
        assert_eq!(
            config.page_sources(),
            vec![PageSource::File(PathBuf::from("/srv/g.html"))]
        );
    }

    #[tokio::test]
    async fn test_load_broken_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lepimap.toml");
        std::fs::write(&path, "request_timeout = \"not a number\"").unwrap();

        assert!(Config::load_from_path(&path).await.is_err());
        let config = Config::load_with_options(Some(&path)).await;
        assert!(config.source_path.is_none());
    }
}
