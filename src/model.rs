// Core structs: raw industry facts collected from the web, and the error types
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Numbers pulled out of page text. Every field is optional because the
/// patterns are best-effort.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedMetrics {
    pub market_value_billion: Option<f64>,
    pub growth_rate: Option<f64>,
    pub station_count: Option<f64>,
}

impl ExtractedMetrics {
    /// Overlays every field present in `other` onto `self`.
    pub fn merge(&mut self, other: &ExtractedMetrics) {
        if other.market_value_billion.is_some() {
            self.market_value_billion = other.market_value_billion;
        }
        if other.growth_rate.is_some() {
            self.growth_rate = other.growth_rate;
        }
        if other.station_count.is_some() {
            self.station_count = other.station_count;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.market_value_billion.is_none() && self.growth_rate.is_none() && self.station_count.is_none()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompetitorProfile {
    pub company: String,
    pub urls: Vec<String>,
    pub text_content: String,
    pub metrics: ExtractedMetrics,
    pub strengths: Vec<String>,
    pub market_position: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndustryOverview {
    pub market_trends: Vec<String>,
    pub key_statistics: ExtractedMetrics,
    pub industry_challenges: Vec<String>,
    pub growth_drivers: Vec<String>,
    pub content_summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionShare {
    pub region: String,
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearValue {
    pub year: i32,
    pub value_billion: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketSizingData {
    pub global_market_size: f64,
    pub growth_rate: f64,
    pub regional_breakdown: Vec<RegionShare>,
    pub forecast: Vec<YearValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionMetadata {
    pub timestamp: DateTime<Utc>,
    pub sources_accessed: usize,
    pub urls_fetched: usize,
    pub urls_failed: usize,
    pub data_quality: String,
}

impl Default for CollectionMetadata {
    fn default() -> Self {
        Self {
            timestamp: Utc::now(),
            sources_accessed: 0,
            urls_fetched: 0,
            urls_failed: 0,
            data_quality: "Poor".into(),
        }
    }
}

/// Everything the collector gathered, keyed by source category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawIndustryData {
    pub competitors: Vec<CompetitorProfile>,
    pub industry_overview: IndustryOverview,
    pub market_sizing: MarketSizingData,
    pub collection_metadata: CollectionMetadata,
    pub error: Option<String>,
}

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    HttpError(String),
    #[error("request timed out")]
    Timeout,
    #[error("unexpected response status {0}")]
    InvalidResponse(u16),
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("No competitor data available")]
    NoCompetitorData,
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("template error: {0}")]
    Template(#[from] tera::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("task error: {0}")]
    Task(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_existing_fields_when_other_is_missing_them() {
        let mut base = ExtractedMetrics {
            market_value_billion: Some(10.0),
            growth_rate: Some(5.0),
            station_count: None,
        };
        base.merge(&ExtractedMetrics {
            market_value_billion: None,
            growth_rate: Some(7.5),
            station_count: Some(1200.0),
        });

        assert_eq!(base.market_value_billion, Some(10.0));
        assert_eq!(base.growth_rate, Some(7.5));
        assert_eq!(base.station_count, Some(1200.0));
    }

    #[test]
    fn empty_metrics_report_empty() {
        assert!(ExtractedMetrics::default().is_empty());
    }
}
