//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::api::ApiConfig as ServerConfig;
use crate::auth::AuthConfig as SessionConfig;
use crate::uploads::UploadConfig as UploadStoreConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub uploads: UploadsConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("eventdash").to_string_lossy().to_string())
        .unwrap_or_else(|| "./eventdash_data".to_string())
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8082
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:8084".to_string(),
        "http://127.0.0.1:8084".to_string(),
    ]
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Upload storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UploadsConfig {
    /// Upload directory; defaults to `<data_dir>/uploads`
    #[serde(default)]
    pub dir: Option<String>,

    #[serde(default = "default_max_upload_bytes")]
    pub max_bytes: usize,

    #[serde(default = "default_public_path")]
    pub public_path: String,
}

fn default_max_upload_bytes() -> usize {
    5 * 1024 * 1024 // 5 MB
}

fn default_public_path() -> String {
    "/uploads".to_string()
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            dir: None,
            max_bytes: default_max_upload_bytes(),
            public_path: default_public_path(),
        }
    }
}

/// Session configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared team access code required at login. Empty disables the check.
    #[serde(default)]
    pub access_code: String,

    #[serde(default = "default_session_ttl")]
    pub session_ttl_hours: i64,
}

fn default_session_ttl() -> i64 {
    24 * 7
}

/// Longest accepted session lifetime (one year)
pub const MAX_SESSION_TTL_HOURS: i64 = 24 * 365;

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_code: String::new(),
            session_ttl_hours: default_session_ttl(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, String> {
        let config: Self = toml::from_str(content).map_err(|e| e.to_string())?;
        config.validate()?;
        Ok(config)
    }

    /// Check values the type system does not constrain
    pub fn validate(&self) -> Result<(), String> {
        let ttl = self.auth.session_ttl_hours;
        if !(1..=MAX_SESSION_TTL_HOURS).contains(&ttl) {
            return Err(format!(
                "auth.session_ttl_hours must be between 1 and {}, got {}",
                MAX_SESSION_TTL_HOURS, ttl
            ));
        }
        Ok(())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    ///
    /// Nothing is logged here because this runs before the subscriber is
    /// installed; call [`LoadedConfig::log_outcome`] once tracing is up.
    pub fn load_default() -> LoadedConfig {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("eventdash").join("config.toml")),
            Some(PathBuf::from("/etc/eventdash/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        let mut failures = Vec::new();
        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        return LoadedConfig {
                            config,
                            source: Some(path.clone()),
                            failures,
                        }
                    }
                    Err(e) => failures.push(e),
                }
            }
        }

        LoadedConfig {
            config: Self::from_env(),
            source: None,
            failures,
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(data_dir) = lookup("EVENTDASH_DATA_DIR") {
            self.storage.data_dir = data_dir;
        }

        if let Some(host) = lookup("EVENTDASH_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = lookup("EVENTDASH_API_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        if let Some(dir) = lookup("EVENTDASH_UPLOAD_DIR") {
            self.uploads.dir = Some(dir);
        }

        if let Some(code) = lookup("EVENTDASH_ACCESS_CODE") {
            self.auth.access_code = code;
        }

        if let Some(level) = lookup("EVENTDASH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("EVENTDASH_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Directory holding the database
    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.storage.data_dir)
    }

    /// Upload directory, falling back to `<data_dir>/uploads`
    pub fn upload_dir(&self) -> PathBuf {
        self.uploads
            .dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| self.data_dir().join("uploads"))
    }

    /// Runtime API server settings
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            host: self.api.host.clone(),
            port: self.api.port,
            request_timeout_ms: self.api.request_timeout_secs * 1000,
            cors_origins: self.api.cors_origins.clone(),
        }
    }

    /// Runtime upload store settings
    pub fn upload_config(&self) -> UploadStoreConfig {
        UploadStoreConfig {
            dir: self.upload_dir(),
            max_bytes: self.uploads.max_bytes,
            public_path: self.uploads.public_path.clone(),
        }
    }

    /// Runtime session settings
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            access_code: self.auth.access_code.clone(),
            session_ttl: chrono::Duration::hours(
                self.auth.session_ttl_hours.clamp(1, MAX_SESSION_TTL_HOURS),
            ),
        }
    }
}

/// Result of [`Config::load_default`]
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: Config,
    /// File the config was read from; `None` when defaults were used
    pub source: Option<PathBuf>,
    /// Config files that exist but could not be loaded
    pub failures: Vec<ConfigError>,
}

impl LoadedConfig {
    /// Report where the config came from and any files that were skipped
    pub fn log_outcome(&self) {
        for failure in &self.failures {
            tracing::warn!("Skipping config file: {}", failure);
        }
        match &self.source {
            Some(path) => tracing::info!("Loaded config from {:?}", path),
            None => tracing::info!("Using default config with environment overrides"),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Eventdash Configuration
#
# Environment variables override these settings:
# - EVENTDASH_DATA_DIR
# - EVENTDASH_API_HOST
# - EVENTDASH_API_PORT
# - EVENTDASH_UPLOAD_DIR
# - EVENTDASH_ACCESS_CODE
# - EVENTDASH_LOG_LEVEL
# - EVENTDASH_LOG_FORMAT

[storage]
# Directory holding the SQLite database
data_dir = "~/.local/share/eventdash"

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8082

# Allowed CORS origins (the dashboard's dev server)
cors_origins = ["http://localhost:8084", "http://127.0.0.1:8084"]

# Request timeout in seconds
request_timeout_secs = 30

[uploads]
# Upload directory (default: <data_dir>/uploads)
# dir = "/var/lib/eventdash/uploads"

# Maximum image size in bytes
max_bytes = 5242880

# URL prefix uploaded images are served under
public_path = "/uploads"

[auth]
# Team access code required at login (empty = members only need their email)
access_code = ""

# Session lifetime in hours
session_ttl_hours = 168

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.api.port, 8082);
        assert_eq!(config.uploads.max_bytes, 5 * 1024 * 1024);
        assert_eq!(config.auth.session_ttl_hours, 168);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = Config::parse(
            r#"
            [api]
            port = 9000

            [auth]
            access_code = "letmein"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.port, 9000);
        assert_eq!(config.api.host, "0.0.0.0");
        assert_eq!(config.auth.access_code, "letmein");
        assert_eq!(config.uploads.public_path, "/uploads");
    }

    #[test]
    fn test_invalid_config() {
        assert!(Config::parse("[api]\nport = \"not a number\"").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("EVENTDASH_DATA_DIR", "/tmp/ed"),
            ("EVENTDASH_API_PORT", "7000"),
            ("EVENTDASH_ACCESS_CODE", "secret"),
            ("EVENTDASH_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.storage.data_dir, "/tmp/ed");
        assert_eq!(config.api.port, 7000);
        assert_eq!(config.auth.access_code, "secret");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.upload_dir(), PathBuf::from("/tmp/ed/uploads"));
    }

    #[test]
    fn test_invalid_port_override_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|k| (k == "EVENTDASH_API_PORT").then(|| "abc".to_string()));
        assert_eq!(config.api.port, 8082);
    }

    #[test]
    fn test_runtime_configs() {
        let mut config = Config::default();
        config.storage.data_dir = "/data".to_string();
        config.uploads.dir = Some("/srv/uploads".to_string());

        assert_eq!(config.upload_config().dir, PathBuf::from("/srv/uploads"));
        assert_eq!(config.server_config().request_timeout_ms, 30_000);
        assert_eq!(config.session_config().session_ttl, chrono::Duration::hours(168));
    }

    #[test]
    fn test_session_ttl_must_be_positive() {
        for ttl in ["0", "-5", "99999999999"] {
            let err = Config::parse(&format!("[auth]\nsession_ttl_hours = {}", ttl)).unwrap_err();
            assert!(err.contains("session_ttl_hours"), "{}", err);
        }
        assert!(Config::parse("[auth]\nsession_ttl_hours = 1").is_ok());
    }

    #[test]
    fn test_session_config_clamps_ttl() {
        let mut config = Config::default();
        config.auth.session_ttl_hours = -3;
        assert_eq!(config.session_config().session_ttl, chrono::Duration::hours(1));

        config.auth.session_ttl_hours = i64::MAX;
        assert_eq!(
            config.session_config().session_ttl,
            chrono::Duration::hours(MAX_SESSION_TTL_HOURS)
        );
    }

    #[test]
    fn test_load_reports_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[auth]\naccess_code = 42").unwrap();

        let err = Config::load_with_env(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
