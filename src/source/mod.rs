//! Delivery data sources.
//!
//! Loads the ball-by-ball table from a CSV export (typically a published
//! Google Sheet) or a local file, and keeps the current snapshot in a
//! time-to-live cache.

mod cache;
mod parse;

pub use cache::{Snapshot, SnapshotCache, SnapshotInfo};
pub use parse::{
    parse_count, parse_deliveries, parse_deliveries_with, parse_flag, ColumnNames,
    MAX_RUNS_PER_BALL,
};

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Client;
use thiserror::Error;
use tracing::info;
use url::Url;

use crate::config::{SourceConfig, SourceLocation};
use crate::models::DeliveryTable;

/// Errors that can occur while loading deliveries.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Rate limited by {host}, retry after {retry_after_secs}s")]
    RateLimited { host: String, retry_after_secs: u64 },

    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Content too large: {size} bytes (max {max_size})")]
    ContentTooLarge { size: usize, max_size: usize },
}

/// Anything that can produce a fresh delivery table.
#[async_trait]
pub trait DeliverySource: Send + Sync {
    /// Human-readable location for logs.
    fn describe(&self) -> String;

    /// Load the full table.
    async fn load(&self) -> Result<DeliveryTable, SourceError>;
}

/// CSV export URL for a published Google Sheet tab.
pub fn sheet_csv_url(sheet_id: &str, sheet_name: &str) -> Result<Url, SourceError> {
    let mut url = Url::parse("https://docs.google.com/spreadsheets/d/")
        .map_err(|e| SourceError::InvalidUrl(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| SourceError::InvalidUrl("cannot-be-a-base URL".to_string()))?
        .pop_if_empty()
        .push(sheet_id)
        .push("gviz")
        .push("tq");
    url.query_pairs_mut()
        .append_pair("tqx", "out:csv")
        .append_pair("sheet", sheet_name);
    Ok(url)
}

/// Build the source a configuration points at.
pub fn from_config(config: &SourceConfig) -> Result<Arc<dyn DeliverySource>, SourceError> {
    let http_config = HttpSourceConfig {
        timeout: Duration::from_secs(config.timeout_seconds),
        ..Default::default()
    };

    let columns = config.columns.clone();

    match config.location() {
        Some(SourceLocation::Url(raw)) => {
            let url = Url::parse(&raw)
                .map_err(|e| SourceError::InvalidUrl(format!("{}: {}", raw, e)))?;
            Ok(Arc::new(
                HttpSource::new(url, http_config)?.with_columns(columns),
            ))
        }
        Some(SourceLocation::Sheet { id, name }) => {
            let url = sheet_csv_url(&id, &name)?;
            Ok(Arc::new(
                HttpSource::new(url, http_config)?.with_columns(columns),
            ))
        }
        Some(SourceLocation::File(path)) => {
            Ok(Arc::new(FileSource::new(path).with_columns(columns)))
        }
        None => Err(SourceError::InvalidUrl(
            "no source url, sheet_id or path configured".to_string(),
        )),
    }
}

/// Configuration for [`HttpSource`].
#[derive(Debug, Clone)]
pub struct HttpSourceConfig {
    /// Request timeout
    pub timeout: Duration,

    /// Maximum body size to accept (default 20MB)
    pub max_content_size: usize,

    /// User agent string
    pub user_agent: String,
}

impl Default for HttpSourceConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_content_size: 20 * 1024 * 1024,
            user_agent: concat!("bowler-insights/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Downloads a CSV over HTTP.
pub struct HttpSource {
    url: Url,
    client: Client,
    config: HttpSourceConfig,
    columns: ColumnNames,
}

impl HttpSource {
    pub fn new(url: Url, config: HttpSourceConfig) -> Result<Self, SourceError> {
        if !matches!(url.scheme(), "http" | "https") {
            return Err(SourceError::InvalidUrl(format!(
                "unsupported scheme '{}' in {}",
                url.scheme(),
                url
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static("bowler-insights")),
        );

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            url,
            client,
            config,
            columns: ColumnNames::default(),
        })
    }

    /// Read the CSV with these header names instead of the defaults.
    pub fn with_columns(mut self, columns: ColumnNames) -> Self {
        self.columns = columns;
        self
    }
}

#[async_trait]
impl DeliverySource for HttpSource {
    fn describe(&self) -> String {
        self.url.to_string()
    }

    async fn load(&self) -> Result<DeliveryTable, SourceError> {
        info!("Fetching deliveries from {}", self.url);

        let response = self.client.get(self.url.as_str()).send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);

            return Err(SourceError::RateLimited {
                host: self.url.host_str().unwrap_or("unknown").to_string(),
                retry_after_secs: retry_after,
            });
        }

        if !status.is_success() {
            return Err(SourceError::HttpStatus {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let content = response.bytes().await?;
        if content.len() > self.config.max_content_size {
            return Err(SourceError::ContentTooLarge {
                size: content.len(),
                max_size: self.config.max_content_size,
            });
        }

        parse_deliveries_with(content.as_ref(), &self.columns)
    }
}

/// Reads a CSV from disk.
pub struct FileSource {
    path: PathBuf,
    columns: ColumnNames,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            columns: ColumnNames::default(),
        }
    }

    pub fn with_columns(mut self, columns: ColumnNames) -> Self {
        self.columns = columns;
        self
    }
}

#[async_trait]
impl DeliverySource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn load(&self) -> Result<DeliveryTable, SourceError> {
        info!("Reading deliveries from {}", self.path.display());
        let content = tokio::fs::read(&self.path).await?;
        parse_deliveries_with(content.as_slice(), &self.columns)
    }
}

/// Serves a fixed table. Useful for tests and embedding.
pub struct MemorySource {
    table: DeliveryTable,
}

impl MemorySource {
    pub fn new(table: DeliveryTable) -> Self {
        Self { table }
    }
}

#[async_trait]
impl DeliverySource for MemorySource {
    fn describe(&self) -> String {
        format!("memory ({} deliveries)", self.table.len())
    }

    async fn load(&self) -> Result<DeliveryTable, SourceError> {
        Ok(self.table.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Delivery;
    use std::io::Write;

    #[test]
    fn test_sheet_csv_url() {
        let url = sheet_csv_url("abc123", "Sheet1").unwrap();
        assert_eq!(
            url.as_str(),
            "https://docs.google.com/spreadsheets/d/abc123/gviz/tq?tqx=out%3Acsv&sheet=Sheet1"
        );
    }

    #[test]
    fn test_sheet_csv_url_encodes_name() {
        let url = sheet_csv_url("abc123", "Super 8").unwrap();
        assert!(url.as_str().ends_with("sheet=Super+8"));
    }

    #[test]
    fn test_from_config_sheet() {
        let config = SourceConfig {
            sheet_id: Some("abc123".to_string()),
            ..Default::default()
        };

        let source = from_config(&config).unwrap();
        assert!(source
            .describe()
            .starts_with("https://docs.google.com/spreadsheets/d/abc123/"));
    }

    #[test]
    fn test_from_config_file() {
        let source = from_config(&SourceConfig::default()).unwrap();
        assert_eq!(source.describe(), "./data/deliveries.csv");
    }

    #[test]
    fn test_from_config_bad_url() {
        let config = SourceConfig {
            url: Some("not a url".to_string()),
            ..Default::default()
        };

        assert!(matches!(from_config(&config), Err(SourceError::InvalidUrl(_))));
    }

    #[test]
    fn test_http_source_rejects_file_scheme() {
        let url = Url::parse("file:///tmp/deliveries.csv").unwrap();
        let result = HttpSource::new(url, HttpSourceConfig::default());
        assert!(matches!(result, Err(SourceError::InvalidUrl(_))));
    }

    #[test]
    fn test_http_source_config_default() {
        let config = HttpSourceConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("bowler-insights/"));
    }

    #[tokio::test]
    async fn test_file_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "Bowler Name,Bowling Team,Batting Team,Batsman Type,Phase,Length,Shot_Area,Valid_Ball,Total_Runs,Bat_Runs,Out,Hitting_Stumps"
        )
        .unwrap();
        writeln!(file, "Starc,Australia,England,LHB,Powerplay,Full,4,1,2,2,0,0").unwrap();

        let source = FileSource::new(file.path());
        let table = source.load().await.unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.deliveries()[0].bowler_name, "Starc");
        assert_eq!(source.describe(), file.path().display().to_string());
    }

    #[tokio::test]
    async fn test_bundled_sample_data() {
        let source = FileSource::new(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/data/deliveries.csv"
        ));
        let table = source.load().await.unwrap();

        assert_eq!(table.len(), 24);
        assert!(table.has_bowler("Jasprit Bumrah"));
        assert!(table.has_bowler("Rashid Khan"));
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let source = FileSource::new("/nonexistent/deliveries.csv");
        assert!(matches!(source.load().await, Err(SourceError::Io(_))));
    }

    #[tokio::test]
    async fn test_memory_source() {
        let table: DeliveryTable = vec![Delivery::new("Starc", "Australia", "England", "Death")]
            .into_iter()
            .collect();
        let source = MemorySource::new(table.clone());

        assert_eq!(source.load().await.unwrap(), table);
        assert_eq!(source.describe(), "memory (1 deliveries)");
    }

    const HEADER: &str = "Bowler Name,Bowling Team,Batting Team,Batsman Type,Phase,Length,Shot_Area,Valid_Ball,Total_Runs,Bat_Runs,Out,Hitting_Stumps";

    fn scorer_columns() -> ColumnNames {
        ColumnNames {
            bowler_name: "Bowler".to_string(),
            shot_area: "Zone".to_string(),
            ..Default::default()
        }
    }

    /// Serve a few fixed responses on an ephemeral local port.
    async fn serve_local() -> String {
        use axum::http::{header::RETRY_AFTER, StatusCode};
        use axum::routing::get;

        let app = axum::Router::new()
            .route(
                "/ok",
                get(|| async {
                    format!("{}\nAnrich Nortje,South Africa,Nepal,RHB,Death,Yorker,,1,0,0,1,1\n", HEADER)
                }),
            )
            .route(
                "/scorer",
                get(|| async {
                    "Bowler,Bowling Team,Batting Team,Batsman Type,Phase,Length,Zone,Valid_Ball,Total_Runs,Bat_Runs,Out,Hitting_Stumps\n\
                     Adil Rashid,England,Scotland,LHB,Middle,Full,6,1,1,1,0,0\n"
                }),
            )
            .route(
                "/limited",
                get(|| async { (StatusCode::TOO_MANY_REQUESTS, [(RETRY_AFTER, "120")], "") }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await });
        format!("http://{}", addr)
    }

    fn http_source(base: &str, path: &str, config: HttpSourceConfig) -> HttpSource {
        let url = Url::parse(&format!("{}{}", base, path)).unwrap();
        HttpSource::new(url, config).unwrap()
    }

    #[tokio::test]
    async fn test_http_source_loads_csv() {
        let base = serve_local().await;
        let source = http_source(&base, "/ok", HttpSourceConfig::default());

        let table = source.load().await.unwrap();

        assert_eq!(table.len(), 1);
        assert!(table.deliveries()[0].is_out);
        assert_eq!(source.describe(), format!("{}/ok", base));
    }

    #[tokio::test]
    async fn test_http_source_rate_limited() {
        let base = serve_local().await;
        let source = http_source(&base, "/limited", HttpSourceConfig::default());

        match source.load().await {
            Err(SourceError::RateLimited {
                host,
                retry_after_secs,
            }) => {
                assert_eq!(host, "127.0.0.1");
                assert_eq!(retry_after_secs, 120);
            }
            other => panic!("expected RateLimited, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_http_source_error_status() {
        let base = serve_local().await;
        let source = http_source(&base, "/missing", HttpSourceConfig::default());

        match source.load().await {
            Err(SourceError::HttpStatus { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "Not Found");
            }
            other => panic!("expected HttpStatus, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_http_source_content_too_large() {
        let base = serve_local().await;
        let config = HttpSourceConfig {
            max_content_size: 64,
            ..Default::default()
        };
        let source = http_source(&base, "/ok", config);

        match source.load().await {
            Err(SourceError::ContentTooLarge { size, max_size }) => {
                assert!(size > 64);
                assert_eq!(max_size, 64);
            }
            other => panic!("expected ContentTooLarge, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_from_config_url_uses_custom_columns() {
        let base = serve_local().await;
        let config = SourceConfig {
            url: Some(format!("{}/scorer", base)),
            columns: scorer_columns(),
            ..Default::default()
        };

        let table = from_config(&config).unwrap().load().await.unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.deliveries()[0].bowler_name, "Adil Rashid");
        assert_eq!(table.deliveries()[0].shot_area.map(|a| a.get()), Some(6));
    }

    #[tokio::test]
    async fn test_file_source_custom_columns() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "Bowler,Bowling Team,Batting Team,Batsman Type,Phase,Length,Zone,Valid_Ball,Total_Runs,Bat_Runs,Out,Hitting_Stumps"
        )
        .unwrap();
        writeln!(file, "Mark Wood,England,Oman,RHB,Death,Short,2,1,6,6,0,0").unwrap();

        let config = SourceConfig {
            path: Some(file.path().to_path_buf()),
            columns: scorer_columns(),
            ..Default::default()
        };
        let table = from_config(&config).unwrap().load().await.unwrap();
        assert_eq!(table.deliveries()[0].bowler_name, "Mark Wood");

        let defaults = FileSource::new(file.path());
        assert!(matches!(
            defaults.load().await,
            Err(SourceError::MissingColumn(name)) if name == "Bowler Name"
        ));
    }
}
