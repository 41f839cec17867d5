//! Configuration types, defaults, loading, and validation.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Content backend configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Export configuration
    #[serde(default)]
    pub export: ExportConfig,
}

/// Content backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the content backend (default: "http://localhost:5000")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds (default: 60)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// TCP connect timeout in seconds (default: 10)
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log to this file instead of the daily-rotated default
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Where exported articles go
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Target directory (default: current directory)
    #[serde(default = "default_export_dir")]
    pub directory: PathBuf,

    /// File name (default: "content.txt")
    #[serde(default = "default_export_file_name")]
    pub file_name: String,
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_export_file_name() -> String {
    "content.txt".to_string()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_export_dir(),
            file_name: default_export_file_name(),
        }
    }
}

impl ExportConfig {
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }
}

/// Expand a leading `~` to the home directory
fn expand_tilde(p: &Path) -> PathBuf {
    if let Ok(rest) = p.strip_prefix("~") {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(rest)
    } else {
        p.to_path_buf()
    }
}

/// Canonical base directory: `~/.blogwriter/`
///
/// Holds the system config file and logs.
pub fn blogwriter_home() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".blogwriter")
}

impl Config {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. Default values
    /// 2. System config: ~/.blogwriter/config.toml
    /// 3. Local config: ./blogwriter.toml
    /// 4. Environment variables
    pub fn load() -> Result<Self> {
        tracing::debug!("Loading configuration...");

        let mut config = Self::default();

        // 1. Try to load system config
        let system_config_path = Self::system_config_path();
        if system_config_path.exists() {
            tracing::debug!("Loading system config from: {:?}", system_config_path);
            config = Self::from_file(&system_config_path)?;
        }

        // 2. Try to load local config
        let local_config_path = Self::local_config_path();
        if local_config_path.exists() {
            tracing::debug!("Loading local config from: {:?}", local_config_path);
            config = Self::from_file(&local_config_path)?;
        }

        // 3. Apply environment variable overrides
        config = Self::apply_env_overrides(config);
        config.finish();

        tracing::debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from a specific file path
    ///
    /// Priority (lowest to highest):
    /// 1. Default values
    /// 2. Custom config file (specified path)
    /// 3. Environment variables
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading configuration from custom path: {:?}", path);

        if !path.exists() {
            anyhow::bail!("Config file not found: {:?}", path);
        }
        let mut config = Self::from_file(path)?;

        config = Self::apply_env_overrides(config);
        config.finish();

        tracing::debug!("Configuration loaded successfully from custom path");
        Ok(config)
    }

    /// Get the system config path: ~/.blogwriter/config.toml
    pub fn system_config_path() -> PathBuf {
        blogwriter_home().join("config.toml")
    }

    /// Get the local config path: ./blogwriter.toml
    fn local_config_path() -> PathBuf {
        PathBuf::from("./blogwriter.toml")
    }

    /// Parse a TOML file. Sections missing from the file keep their defaults.
    fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    fn finish(&mut self) {
        self.export.directory = expand_tilde(&self.export.directory);
        if let Some(ref file) = self.logging.file {
            self.logging.file = Some(expand_tilde(file));
        }
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(config: Self) -> Self {
        Self::apply_overrides(config, |key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup (the process environment in production)
    pub(crate) fn apply_overrides<F>(mut config: Self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        // Base URL: project-specific name wins over the generic one
        if let Some(base_url) = lookup("BLOGWRITER_API_BASE_URL").or_else(|| lookup("API_BASE_URL"))
        {
            config.api.base_url = base_url;
        }

        if let Some(timeout) = lookup("BLOGWRITER_API_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(secs) => config.api.timeout_secs = secs,
                Err(_) => tracing::warn!("Ignoring invalid BLOGWRITER_API_TIMEOUT_SECS: {}", timeout),
            }
        }

        // Log level
        if let Some(log_level) = lookup("BLOGWRITER_LOG_LEVEL") {
            config.logging.level = log_level;
        }

        // Log file
        if let Some(log_file) = lookup("BLOGWRITER_LOG_FILE") {
            config.logging.file = Some(PathBuf::from(log_file));
        }

        if let Some(dir) = lookup("BLOGWRITER_EXPORT_DIR") {
            config.export.directory = PathBuf::from(dir);
        }

        config
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        // Validate base URL
        let base_url = self.api.base_url.trim();
        if base_url.is_empty() {
            anyhow::bail!("api.base_url is empty");
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            anyhow::bail!(
                "api.base_url must start with http:// or https://, got: {}",
                base_url
            );
        }

        if self.api.timeout_secs == 0 {
            anyhow::bail!("api.timeout_secs must be greater than zero");
        }

        // Validate log level
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            anyhow::bail!(
                "Invalid log level: {}. Must be one of: {:?}",
                self.logging.level,
                valid_levels
            );
        }

        if self.export.file_name.trim().is_empty() {
            anyhow::bail!("export.file_name is empty");
        }

        tracing::debug!("Configuration validation passed");
        Ok(())
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        fs::write(path, toml_string)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;

        tracing::info!("Configuration saved to: {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::NamedTempFile;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:5000");
        assert_eq!(config.api.timeout_secs, 60);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.export.file_name, "content.txt");
        assert_eq!(config.export.path(), PathBuf::from("./content.txt"));
    }

    #[test]
    fn test_config_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_base_url() {
        let mut config = Config::default();
        config.api.base_url = String::new();
        assert!(config.validate().is_err());

        config.api.base_url = "localhost:5000".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_zero_timeout() {
        let mut config = Config::default();
        config.api.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_toml() {
        let toml_content = r#"
[api]
base_url = "https://writer.example.com"
timeout_secs = 15

[logging]
level = "debug"

[export]
directory = "/tmp/posts"
        "#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.api.base_url, "https://writer.example.com");
        assert_eq!(config.api.timeout(), Duration::from_secs(15));
        assert_eq!(config.api.connect_timeout_secs, 10);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.export.directory, PathBuf::from("/tmp/posts"));
        assert_eq!(config.export.file_name, "content.txt");
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_file = NamedTempFile::new().unwrap();
        let mut config = Config::default();
        config.api.base_url = "http://10.0.0.2:5000".to_string();

        config.save(temp_file.path()).unwrap();

        let loaded = Config::load_from_path(temp_file.path()).unwrap();
        assert_eq!(loaded.logging.level, config.logging.level);
        assert_eq!(loaded.export.file_name, config.export.file_name);
    }

    #[test]
    fn test_load_from_missing_path_fails() {
        assert!(Config::load_from_path("/definitely/not/here/blogwriter.toml").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::apply_overrides(
            Config::default(),
            env(&[
                ("BLOGWRITER_API_BASE_URL", "http://backend:8080"),
                ("BLOGWRITER_API_TIMEOUT_SECS", "5"),
                ("BLOGWRITER_LOG_LEVEL", "trace"),
            ]),
        );
        assert_eq!(config.api.base_url, "http://backend:8080");
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.logging.level, "trace");
    }

    #[test]
    fn test_env_override_precedence_and_invalid_values() {
        let config = Config::apply_overrides(
            Config::default(),
            env(&[
                ("API_BASE_URL", "http://generic:1"),
                ("BLOGWRITER_API_BASE_URL", "http://specific:2"),
                ("BLOGWRITER_API_TIMEOUT_SECS", "soon"),
            ]),
        );
        assert_eq!(config.api.base_url, "http://specific:2");
        assert_eq!(config.api.timeout_secs, 60);

        let config = Config::apply_overrides(Config::default(), env(&[("API_BASE_URL", "http://generic:1")]));
        assert_eq!(config.api.base_url, "http://generic:1");
    }
}
