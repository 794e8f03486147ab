//! Configuration for the extraction service

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Environment variable pointing at an alternative config file.
pub const CONFIG_ENV: &str = "CONTRACT_EXTRACTOR_CONFIG";

/// Default config file looked up in the working directory.
const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Main service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// AI extraction service configuration
    pub ai_service: AiServiceConfig,
    /// Report output configuration
    pub output: OutputConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
    /// Maximum upload size in bytes (default: 100MB)
    pub max_upload_size: usize,
    /// Completed tasks retained in memory before oldest-first eviction
    pub max_retained_tasks: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            enable_cors: true,
            max_upload_size: 100 * 1024 * 1024, // 100MB
            max_retained_tasks: 256,
        }
    }
}

/// AI extraction service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiServiceConfig {
    /// Base URL of the extraction/OCR service
    pub base_url: String,
    /// Request timeout in seconds (bounds every extraction and OCR call)
    pub timeout_secs: u64,
}

impl Default for AiServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 300,
        }
    }
}

/// Report output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the report artifacts are written to
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        let dir = dirs::data_local_dir()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
            .join("contract-extractor")
            .join("output");

        Self { dir }
    }
}

impl ExtractorConfig {
    /// Parse a TOML config file. Missing sections fall back to defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
        toml::from_str(&raw)
            .map_err(|e| Error::Config(format!("cannot parse {}: {}", path.display(), e)))
    }

    /// Resolve configuration: explicit env override, then `config.toml` in the
    /// working directory, then built-in defaults.
    pub fn load() -> Result<Self> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            tracing::info!(path = %path, "Loading configuration from environment override");
            return Self::from_file(path);
        }

        if Path::new(DEFAULT_CONFIG_FILE).exists() {
            tracing::info!(path = DEFAULT_CONFIG_FILE, "Loading configuration file");
            return Self::from_file(DEFAULT_CONFIG_FILE);
        }

        tracing::info!("No configuration file found, using defaults");
        Ok(Self::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_sane() {
        let config = ExtractorConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.max_retained_tasks, 256);
        assert_eq!(config.ai_service.timeout_secs, 300);
        assert!(config.ai_service.base_url.starts_with("http://"));
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "[ai_service]\nbase_url = \"http://10.0.0.5:9000\"\n\n[server]\nport = 9090\n"
        )
        .unwrap();

        let config = ExtractorConfig::from_file(file.path()).unwrap();
        assert_eq!(config.ai_service.base_url, "http://10.0.0.5:9000");
        assert_eq!(config.server.port, 9090);
        // untouched sections fall back to defaults
        assert_eq!(config.ai_service.timeout_secs, 300);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "server = \"not a table\"").unwrap();

        let err = ExtractorConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
