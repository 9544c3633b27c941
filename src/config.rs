use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

pub const HTML_REPORT: &str = "ev_charging_analysis_report.html";
pub const MARKDOWN_REPORT: &str = "ev_charging_analysis_report.md";
pub const DATA_SNAPSHOT: &str = "analysis_data.json";
pub const VISUALIZATIONS_DIR: &str = "visualizations";
pub const STATIC_DIR: &str = "static";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompetitorConfig {
    pub name: String,
    pub urls: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub industry_overview: Vec<String>,
    pub market_data: Vec<String>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            industry_overview: vec![
                "https://en.wikipedia.org/wiki/Electric_vehicle_charging_network".into(),
                "https://en.wikipedia.org/wiki/Electric_vehicle".into(),
            ],
            market_data: vec!["https://en.wikipedia.org/wiki/Electric_car_use_by_country".into()],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    pub base_year: i32,
    pub horizon_years: u32,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            base_year: 2024,
            horizon_years: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 5000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub output_dir: PathBuf,
    pub user_agent: String,
    pub request_timeout_seconds: u64,
    pub request_delay_ms: u64,
    pub sources: SourcesConfig,
    pub competitors: Vec<CompetitorConfig>,
    pub forecast: ForecastConfig,
    pub report_version: String,
    pub chart_font: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub server: ServerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".into(),
            request_timeout_seconds: 10,
            request_delay_ms: 1000,
            sources: SourcesConfig::default(),
            competitors: default_competitors(),
            forecast: ForecastConfig::default(),
            report_version: "1.0".into(),
            chart_font: None,
            log_file: None,
            server: ServerConfig::default(),
        }
    }
}

fn default_competitors() -> Vec<CompetitorConfig> {
    [
        ("Tesla Supercharger", "https://en.wikipedia.org/wiki/Tesla_Supercharger"),
        ("ChargePoint", "https://en.wikipedia.org/wiki/ChargePoint"),
        ("Electrify America", "https://en.wikipedia.org/wiki/Electrify_America"),
    ]
    .into_iter()
    .map(|(name, url)| CompetitorConfig {
        name: name.into(),
        urls: vec![url.into()],
    })
    .collect()
}

impl AppConfig {
    pub fn html_report_path(&self) -> PathBuf {
        self.output_dir.join(HTML_REPORT)
    }

    pub fn markdown_report_path(&self) -> PathBuf {
        self.output_dir.join(MARKDOWN_REPORT)
    }

    pub fn data_snapshot_path(&self) -> PathBuf {
        self.output_dir.join(DATA_SNAPSHOT)
    }

    pub fn visualizations_dir(&self) -> PathBuf {
        self.output_dir.join(VISUALIZATIONS_DIR)
    }

    pub fn static_dir(&self) -> PathBuf {
        self.output_dir.join(STATIC_DIR)
    }
}

/// Loads the JSON config. A missing file falls back to defaults; a file
/// that exists but does not parse is an error. Runs before logging is set
/// up, so callers report the missing-file case themselves.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_config(&content).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}

pub fn parse_config(content: &str) -> Result<AppConfig, serde_json::Error> {
    serde_json::from_str(content)
}

/// `PORT` from the environment wins over the config file.
pub fn apply_env_overrides(config: &mut AppConfig) {
    if let Ok(port) = std::env::var("PORT") {
        match port.parse::<u16>() {
            Ok(p) => config.server.port = p,
            Err(_) => warn!("Ignoring invalid PORT value: {}", port),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_fills_defaults() {
        let cfg = parse_config(r#"{ "output_dir": "out", "server": { "port": 8080 } }"#).unwrap();
        assert_eq!(cfg.output_dir, PathBuf::from("out"));
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.competitors.len(), 3);
        assert_eq!(cfg.forecast.base_year, 2024);
        assert_eq!(cfg.html_report_path(), PathBuf::from("out").join(HTML_REPORT));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config(&dir.path().join("nope.json")).unwrap();
        assert_eq!(cfg.report_version, "1.0");
        assert_eq!(cfg.sources.industry_overview.len(), 2);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Parse { .. })));
    }
}
