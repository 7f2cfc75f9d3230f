//! Serializable tool configuration.
//!
//! Settings come from an optional TOML file; the API key may also come from
//! the environment (or a `.env` file), which wins over the file. The key is
//! never compiled in.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::chart::RendererKind;
use crate::data::{OutputSize, DEFAULT_BASE_URL};

/// Environment variable holding the Alpha Vantage key.
pub const API_KEY_ENV: &str = "ALPHAVANTAGE_API_KEY";

/// Config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "stockchart.toml";

/// Default HTML output file.
pub const DEFAULT_OUTPUT_PATH: &str = "stock_chart.html";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("no API key configured: set ALPHAVANTAGE_API_KEY (environment or .env) or [api] api_key in stockchart.toml")]
    MissingApiKey,
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StockChartConfig {
    pub api: ApiConfig,
    pub chart: ChartConfig,
}

/// Provider connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Scheme and host of the provider, without the `/query` path.
    pub base_url: String,

    /// Key from the file. The environment variable takes precedence.
    pub api_key: Option<String>,

    pub output_size: OutputSize,

    /// Request timeout; unset keeps the HTTP client default.
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            output_size: OutputSize::default(),
            timeout_secs: None,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Chart delivery settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub renderer: RendererKind,

    /// Where the HTML renderer writes its page.
    pub output_path: PathBuf,

    /// Launch the default browser on the written page.
    pub open_browser: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            renderer: RendererKind::default(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            open_browser: true,
        }
    }
}

impl StockChartConfig {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Load from `explicit` if given (it must exist), otherwise from the first
    /// of [`default_locations`] that exists, otherwise defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            debug!(path = %path.display(), "loading config");
            return Self::from_file(path);
        }

        for path in default_locations() {
            if path.is_file() {
                debug!(path = %path.display(), "loading config");
                return Self::from_file(&path);
            }
        }

        debug!("no config file found, using defaults");
        Ok(Self::default())
    }

    /// API key from the environment (including `.env`), falling back to the file.
    pub fn resolve_api_key(&self) -> Result<String, ConfigError> {
        self.resolve_api_key_with(dotenv::var(API_KEY_ENV).ok())
    }

    /// Key resolution with the environment value passed in.
    pub fn resolve_api_key_with(&self, env_value: Option<String>) -> Result<String, ConfigError> {
        env_value
            .into_iter()
            .chain(self.api.api_key.clone())
            .map(|k| k.trim().to_string())
            .find(|k| !k.is_empty())
            .ok_or(ConfigError::MissingApiKey)
    }
}

/// Candidate config files, most specific first.
pub fn default_locations() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("stockchart").join("config.toml"));
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = StockChartConfig::from_toml("").unwrap();
        assert_eq!(config, StockChartConfig::default());
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.output_size, OutputSize::Compact);
        assert_eq!(config.chart.output_path, PathBuf::from("stock_chart.html"));
        assert!(config.chart.open_browser);
        assert!(config.api.timeout().is_none());
    }

    #[test]
    fn parses_full_file() {
        let config = StockChartConfig::from_toml(
            r#"
[api]
base_url = "http://localhost:8080"
api_key = "FILEKEY"
output_size = "full"
timeout_secs = 10

[chart]
renderer = "terminal"
output_path = "out/chart.html"
open_browser = false
"#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8080");
        assert_eq!(config.api.output_size, OutputSize::Full);
        assert_eq!(config.api.timeout(), Some(Duration::from_secs(10)));
        assert_eq!(config.chart.renderer, RendererKind::Terminal);
        assert_eq!(config.chart.output_path, PathBuf::from("out/chart.html"));
        assert!(!config.chart.open_browser);
    }

    #[test]
    fn rejects_unknown_output_size() {
        let err = StockChartConfig::from_toml("[api]\noutput_size = \"huge\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn env_key_wins_over_file_key() {
        let mut config = StockChartConfig::default();
        config.api.api_key = Some("FILEKEY".into());
        assert_eq!(
            config.resolve_api_key_with(Some("ENVKEY".into())).unwrap(),
            "ENVKEY"
        );
        assert_eq!(config.resolve_api_key_with(None).unwrap(), "FILEKEY");
        assert_eq!(
            config.resolve_api_key_with(Some("  ".into())).unwrap(),
            "FILEKEY"
        );
    }

    #[test]
    fn missing_key_is_an_error() {
        let config = StockChartConfig::default();
        assert!(matches!(
            config.resolve_api_key_with(None),
            Err(ConfigError::MissingApiKey)
        ));
    }

    #[test]
    fn explicit_missing_file_is_not_found() {
        let err = StockChartConfig::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn loads_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[chart]\nrenderer = \"html\"\nopen_browser = false\n").unwrap();
        let config = StockChartConfig::load(Some(&path)).unwrap();
        assert!(!config.chart.open_browser);
        assert_eq!(config.chart.renderer, RendererKind::Html);
    }
}
