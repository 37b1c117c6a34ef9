use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Endpoint and logging settings.
/// Read from `config.json` in the app's config directory; environment
/// variables override the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: String,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:1234".into(),
            model: "gpt-4o-mini".into(),
            api_key: "no-key".into(),
            log_filter: "info".into(),
        }
    }
}

impl AppConfig {
    /// Loads the config file, falling back to defaults when it is missing
    /// or unreadable, then applies environment overrides.
    ///
    /// Runs before logging exists, so a file error is handed back for the
    /// caller to report.
    pub fn load() -> (Self, Option<anyhow::Error>) {
        Self::load_from(&config_dir().join("config.json"), |key| std::env::var(key).ok())
    }

    fn load_from(
        path: &Path,
        var: impl Fn(&str) -> Option<String>,
    ) -> (Self, Option<anyhow::Error>) {
        let (mut config, err) = match Self::from_file(path) {
            Ok(config) => (config, None),
            Err(err) => (Self::default(), Some(err)),
        };
        config.apply_env(var);
        (config, err)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(v) = var("PROMPTIUS_BASE_URL") {
            self.base_url = v;
        }
        if let Some(v) = var("PROMPTIUS_MODEL") {
            self.model = v;
        }
        if let Some(v) = var("PROMPTIUS_API_KEY") {
            self.api_key = v;
        }
    }
}

/// `<config dir>/promptius`, created on first use.
pub fn config_dir() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("promptius");
    fs::create_dir_all(&path).ok();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "model": "llama-3" }"#).unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.model, "llama-3");
        assert_eq!(config.base_url, "http://localhost:1234");
        assert_eq!(config.api_key, "no-key");
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AppConfig::from_file(&dir.path().join("nope.json")).is_err());
    }

    #[test]
    fn missing_file_loads_defaults_and_reports_why() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let (config, err) = AppConfig::load_from(&path, |key| {
            (key == "PROMPTIUS_MODEL").then(|| "qwen".to_string())
        });

        assert_eq!(config.model, "qwen");
        assert_eq!(config.base_url, "http://localhost:1234");
        assert!(format!("{:#}", err.unwrap()).contains("config.json"));
    }

    #[test]
    fn readable_file_loads_without_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "base_url": "http://gpu-box:8080" }"#).unwrap();

        let (config, err) = AppConfig::load_from(&path, |_| None);
        assert!(err.is_none());
        assert_eq!(config.base_url, "http://gpu-box:8080");
    }

    #[test]
    fn env_overrides_file_values() {
        let mut config = AppConfig::default();
        config.apply_env(|key| (key == "PROMPTIUS_API_KEY").then(|| "secret".to_string()));

        assert_eq!(config.api_key, "secret");
        assert_eq!(config.model, "gpt-4o-mini");
    }
}
