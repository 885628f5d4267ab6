use anyhow::{Context as AnyhowContext, Result};
use casequery_protocol::DEFAULT_JURISDICTION;
use casequery_suggest::SuggestConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const API_URL_ENV: &str = "CASEQUERY_API_URL";
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Front-end configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the search/report service
    pub api_base_url: String,

    /// Jurisdiction selected at start-up
    pub default_jurisdiction: String,

    /// Per-request timeout (seconds)
    pub request_timeout_secs: u64,

    /// Suggestion timing and limits
    pub suggest: SuggestConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            default_jurisdiction: DEFAULT_JURISDICTION.to_string(),
            request_timeout_secs: 30,
            suggest: SuggestConfig::default(),
        }
    }
}

impl AppConfig {
    /// Defaults, then the config file (explicit path or the per-user one if
    /// it exists), then environment overrides.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => default_config_path().filter(|path| path.is_file()),
        };

        let mut config = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                log::debug!("Loaded config from {}", path.display());
                Self::from_toml_str(&raw)
                    .with_context(|| format!("Invalid config {}", path.display()))?
            }
            None => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(Into::into)
    }

    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(API_URL_ENV).filter(|url| !url.trim().is_empty()) {
            self.api_base_url = url.trim().to_string();
        }
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn validate(&self) -> Result<()> {
        let url = self.api_base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            anyhow::bail!("api_base_url must be an http(s) URL, got {url:?}");
        }
        if self.default_jurisdiction.trim().is_empty() {
            anyhow::bail!("default_jurisdiction must not be empty");
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be > 0");
        }
        self.suggest.validate()?;
        Ok(())
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("casequery").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            api_base_url = "https://cases.example.org"

            [suggest]
            debounce_ms = 300
            "#,
        )
        .expect("parse");

        assert_eq!(config.api_base_url, "https://cases.example.org");
        assert_eq!(config.default_jurisdiction, "federal");
        assert_eq!(config.suggest.debounce_ms, 300);
        assert_eq!(config.suggest.blur_grace_ms, 150);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn env_overrides_file() {
        let mut config = AppConfig::default();
        config.apply_env(|key| (key == API_URL_ENV).then(|| " http://10.0.0.5:9000 ".to_string()));
        assert_eq!(config.api_base_url, "http://10.0.0.5:9000");

        config.apply_env(|_| Some("   ".to_string()));
        assert_eq!(config.api_base_url, "http://10.0.0.5:9000");
    }

    #[test]
    fn validation_rejects_bad_values() {
        let config = AppConfig {
            api_base_url: "localhost:8000".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.suggest.blur_grace_ms = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("blur_grace_ms"));
    }

    #[test]
    fn explicit_path_must_exist() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("nope.toml");
        assert!(AppConfig::load(Some(&missing)).is_err());

        let present = dir.path().join("config.toml");
        std::fs::write(&present, "request_timeout_secs = 5\n").expect("write");
        let config = AppConfig::load(Some(&present)).expect("load");
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
    }
}
