//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::parse_duration;
use crate::source::ColumnNames;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Where the delivery table comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    Url(String),
    Sheet { id: String, name: String },
    File(PathBuf),
}

/// Data source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// CSV download URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Google Sheet id, exported as CSV
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet_id: Option<String>,

    /// Sheet tab name used with `sheet_id`
    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,

    /// Local CSV path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// How long a loaded table is served before reloading (e.g. "60s", "5m")
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl: String,

    /// HTTP timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Header names, for exports whose columns are named differently
    #[serde(default)]
    pub columns: ColumnNames,
}

fn default_sheet_name() -> String {
    "Sheet1".to_string()
}

fn default_cache_ttl() -> String {
    "60s".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_source_path() -> Option<PathBuf> {
    Some(PathBuf::from("./data/deliveries.csv"))
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: None,
            sheet_id: None,
            sheet_name: default_sheet_name(),
            path: default_source_path(),
            cache_ttl: default_cache_ttl(),
            timeout_seconds: default_timeout(),
            columns: ColumnNames::default(),
        }
    }
}

impl SourceConfig {
    /// Resolved location. A URL wins over a sheet id, which wins over a path.
    pub fn location(&self) -> Option<SourceLocation> {
        if let Some(url) = self.url.as_ref().filter(|u| !u.trim().is_empty()) {
            return Some(SourceLocation::Url(url.trim().to_string()));
        }
        if let Some(id) = self.sheet_id.as_ref().filter(|s| !s.trim().is_empty()) {
            return Some(SourceLocation::Sheet {
                id: id.trim().to_string(),
                name: self.sheet_name.clone(),
            });
        }
        self.path.clone().map(SourceLocation::File)
    }

    pub fn ttl(&self) -> Option<Duration> {
        parse_duration(&self.cache_ttl)
    }

    /// Replace the location with a URL or file path given on the command line.
    pub fn override_location(&mut self, location: &str) {
        let location = location.trim();
        self.sheet_id = None;
        if location.starts_with("http://") || location.starts_with("https://") {
            self.url = Some(location.to_string());
            self.path = None;
        } else {
            self.url = None;
            self.path = Some(PathBuf::from(location));
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "*".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            source: SourceConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source.location().is_none() {
            return Err(ConfigError::ValidationError(
                "Source needs a url, sheet_id or path".to_string(),
            ));
        }

        match self.source.ttl() {
            None => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid cache_ttl '{}'",
                    self.source.cache_ttl
                )))
            }
            Some(ttl) if ttl.is_zero() => {
                return Err(ConfigError::ValidationError(
                    "Cache TTL must be greater than 0".to_string(),
                ))
            }
            Some(_) => {}
        }

        if self.source.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "Source timeout must be greater than 0".to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.log_level, "info");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.source.cache_ttl, "60s");
        assert_eq!(
            config.source.location(),
            Some(SourceLocation::File(PathBuf::from("./data/deliveries.csv")))
        );
    }

    #[test]
    fn test_source_ttl() {
        let source = SourceConfig::default();
        assert_eq!(source.ttl(), Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_location_precedence() {
        let mut source = SourceConfig {
            sheet_id: Some("sheet-xyz".to_string()),
            ..Default::default()
        };
        assert_eq!(
            source.location(),
            Some(SourceLocation::Sheet {
                id: "sheet-xyz".to_string(),
                name: "Sheet1".to_string()
            })
        );

        source.url = Some("https://example.com/balls.csv".to_string());
        assert_eq!(
            source.location(),
            Some(SourceLocation::Url("https://example.com/balls.csv".to_string()))
        );
    }

    #[test]
    fn test_override_location() {
        let mut source = SourceConfig {
            sheet_id: Some("sheet-xyz".to_string()),
            ..Default::default()
        };

        source.override_location("https://example.com/balls.csv");
        assert_eq!(
            source.location(),
            Some(SourceLocation::Url("https://example.com/balls.csv".to_string()))
        );

        source.override_location("matches/t20.csv");
        assert_eq!(
            source.location(),
            Some(SourceLocation::File(PathBuf::from("matches/t20.csv")))
        );
    }

    #[test]
    fn test_config_validation_ok() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_no_source() {
        let mut config = AppConfig::default();
        config.source.path = None;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_ttl() {
        let mut config = AppConfig::default();
        config.source.cache_ttl = "soon".to_string();
        assert!(config.validate().is_err());

        config.source.cache_ttl = "0s".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();

        // Should be parseable
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.source.path, parsed.source.path);
        assert_eq!(config.server.port, parsed.server.port);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
log_level = "debug"

[source]
sheet_id = "1js8s1QySOIUDcIED7rAvWOD3nd10X1lX7iO3R9oU4gM"
cache_ttl = "2m"

[server]
port = 9000
"#
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.source.ttl(), Some(Duration::from_secs(120)));
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert!(matches!(
            config.source.location(),
            Some(SourceLocation::Sheet { .. })
        ));
    }

    #[test]
    fn test_custom_column_names() {
        let config: AppConfig = toml::from_str(
            r#"
[source]
path = "scorer.csv"

[source.columns]
bowler_name = "Bowler"
shot_area = "Zone"
"#,
        )
        .unwrap();

        let columns = &config.source.columns;
        assert_eq!(columns.bowler_name, "Bowler");
        assert_eq!(columns.shot_area, "Zone");
        assert_eq!(columns.phase, "Phase");
        assert_eq!(columns.bat_runs, "Bat_Runs");
        assert_eq!(AppConfig::default().source.columns, ColumnNames::default());
    }

    #[test]
    fn test_example_config_is_valid() {
        let config: AppConfig =
            toml::from_str(include_str!("../../config.example.toml")).unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.server.cors_origin, "*");
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.server.port, 8080);
    }
}
