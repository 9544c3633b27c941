// Collects raw industry facts from the configured web sources
use crate::analyzer::market::{DEFAULT_GROWTH_RATE, DEFAULT_MARKET_SIZE, compound_forecast, regional_breakdown};
use crate::analyzer::to_strings;
use crate::config::{AppConfig, CompetitorConfig};
use crate::model::{
    CollectionMetadata, CompetitorProfile, IndustryOverview, MarketSizingData, RawIndustryData,
};
use crate::operator::Operator;
use crate::parser::extract_metrics;
use crate::scraper::{Fetcher, page_text};
use crate::utils::{clean_text, truncate_chars, validate_data_quality};
use chrono::Utc;
use rand::Rng;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::time::{Duration, sleep};
use tracing::{debug, info, warn};

const COMPETITOR_TEXT_LIMIT: usize = 5000;
const SUMMARY_TEXT_LIMIT: usize = 3000;
const JITTER_MS: u64 = 250;
/// Competitors, industry overview and market data.
const SOURCE_CATEGORIES: usize = 3;

pub struct DataCollector<'a> {
    fetcher: &'a dyn Fetcher,
    config: &'a AppConfig,
    fetched: AtomicUsize,
    failed: AtomicUsize,
}

impl<'a> DataCollector<'a> {
    pub fn new(fetcher: &'a dyn Fetcher, config: &'a AppConfig) -> Self {
        Self {
            fetcher,
            config,
            fetched: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
        }
    }

    /// Fetches one page and returns its text; failures are logged, counted and
    /// yield an empty string. Always waits the polite delay afterwards.
    async fn fetch_text(&self, url: &str) -> String {
        let text = match page_text(self.fetcher, url).await {
            Ok(text) => {
                self.fetched.fetch_add(1, Ordering::Relaxed);
                text
            }
            Err(e) => {
                warn!("Error fetching {}: {}", url, e);
                self.failed.fetch_add(1, Ordering::Relaxed);
                String::new()
            }
        };
        self.pause().await;
        text
    }

    async fn pause(&self) {
        if self.config.request_delay_ms == 0 {
            return;
        }
        let jitter = rand::rng().random_range(0..=JITTER_MS);
        sleep(Duration::from_millis(self.config.request_delay_ms + jitter)).await;
    }

    async fn collect_competitor(&self, competitor: &CompetitorConfig) -> CompetitorProfile {
        info!("Collecting data for {}", competitor.name);

        let mut combined = Vec::with_capacity(competitor.urls.len());
        for url in &competitor.urls {
            let text = self.fetch_text(url).await;
            if !text.is_empty() {
                combined.push(text);
            }
        }
        let combined = combined.join(" ");

        let operator = Operator::from_name(&competitor.name);
        CompetitorProfile {
            company: competitor.name.clone(),
            urls: competitor.urls.clone(),
            text_content: truncate_chars(&combined, COMPETITOR_TEXT_LIMIT),
            metrics: extract_metrics(&combined),
            strengths: operator.strengths(),
            market_position: operator.market_position().into(),
        }
    }

    pub async fn collect_competitor_data(&self) -> Vec<CompetitorProfile> {
        let mut profiles = Vec::with_capacity(self.config.competitors.len());
        for competitor in &self.config.competitors {
            profiles.push(self.collect_competitor(competitor).await);
        }
        profiles
    }

    pub async fn collect_industry_overview(&self) -> IndustryOverview {
        let mut overview = IndustryOverview::default();

        for url in &self.config.sources.industry_overview {
            info!("Collecting industry overview from {}", url);
            let text = self.fetch_text(url).await;
            if text.is_empty() {
                continue;
            }
            overview.key_statistics.merge(&extract_metrics(&text));
            debug!("Overview text from {}: {}", url, clean_text(&text, 120));
            overview.content_summary = truncate_chars(&text, SUMMARY_TEXT_LIMIT);
        }

        overview.market_trends = to_strings(&[
            "Rapid expansion of public charging infrastructure",
            "Increasing adoption of fast-charging technology",
            "Government incentives driving market growth",
            "Growing consumer acceptance of electric vehicles",
        ]);
        overview.industry_challenges = to_strings(&[
            "Grid capacity and infrastructure limitations",
            "Standardization across charging networks",
            "Rural area coverage gaps",
            "High initial capital investment requirements",
        ]);
        overview.growth_drivers = to_strings(&[
            "Government regulations on emissions",
            "Declining battery costs",
            "Expanding EV model availability",
            "Corporate sustainability commitments",
        ]);

        overview
    }

    pub async fn collect_market_sizing_data(&self) -> MarketSizingData {
        let mut market = MarketSizingData::default();

        for url in &self.config.sources.market_data {
            info!("Collecting market data from {}", url);
            let text = self.fetch_text(url).await;
            if text.is_empty() {
                continue;
            }
            let metrics = extract_metrics(&text);
            if let Some(size) = metrics.market_value_billion {
                market.global_market_size = size;
            }
            if let Some(rate) = metrics.growth_rate {
                market.growth_rate = rate;
            }
        }

        if market.global_market_size == 0.0 {
            market.global_market_size = DEFAULT_MARKET_SIZE;
        }
        if market.growth_rate == 0.0 {
            market.growth_rate = DEFAULT_GROWTH_RATE;
        }

        market.regional_breakdown = regional_breakdown();
        market.forecast = compound_forecast(
            market.global_market_size,
            market.growth_rate,
            self.config.forecast.base_year,
            self.config.forecast.horizon_years,
        );

        market
    }

    /// Runs the three source categories concurrently and assembles the result.
    pub async fn collect_all_data(&self) -> RawIndustryData {
        info!("Starting comprehensive data collection");

        let (competitors, industry_overview, market_sizing) = futures::join!(
            self.collect_competitor_data(),
            self.collect_industry_overview(),
            self.collect_market_sizing_data(),
        );

        let fetched = self.fetched.load(Ordering::Relaxed);
        let failed = self.failed.load(Ordering::Relaxed);

        let mut data = RawIndustryData {
            competitors,
            industry_overview,
            market_sizing,
            collection_metadata: CollectionMetadata {
                timestamp: Utc::now(),
                sources_accessed: SOURCE_CATEGORIES,
                urls_fetched: fetched,
                urls_failed: failed,
                data_quality: String::new(),
            },
            error: None,
        };
        data.collection_metadata.data_quality = validate_data_quality(&data).quality_rating;

        if fetched == 0 && failed > 0 {
            warn!("No source could be fetched, report will use built-in estimates");
            data.error = Some(format!("All {} source requests failed", failed));
        } else {
            info!("Data collection completed: {} pages fetched, {} failed", fetched, failed);
        }

        data
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::ScraperError;
    use std::collections::HashMap;

    /// Serves canned HTML by URL; unknown URLs fail with a 404.
    pub(crate) struct StaticFetcher {
        pub pages: HashMap<String, String>,
    }

    impl StaticFetcher {
        pub fn new(pages: &[(&str, &str)]) -> Self {
            Self {
                pages: pages
                    .iter()
                    .map(|(u, h)| (u.to_string(), h.to_string()))
                    .collect(),
            }
        }
    }

    #[async_trait::async_trait]
    impl Fetcher for StaticFetcher {
        async fn fetch(&self, url: &str) -> Result<String, ScraperError> {
            self.pages
                .get(url)
                .cloned()
                .ok_or(ScraperError::InvalidResponse(404))
        }
    }

    pub(crate) fn test_config() -> AppConfig {
        AppConfig {
            request_delay_ms: 0,
            ..AppConfig::default()
        }
    }

    #[tokio::test]
    async fn all_failures_fall_back_to_estimates() {
        let config = test_config();
        let fetcher = StaticFetcher::new(&[]);
        let data = DataCollector::new(&fetcher, &config).collect_all_data().await;

        assert_eq!(data.competitors.len(), 3);
        assert!(data.competitors.iter().all(|c| c.text_content.is_empty()));
        assert_eq!(data.competitors[0].market_position, "Market Leader");
        assert_eq!(data.market_sizing.global_market_size, 15.2);
        assert_eq!(data.market_sizing.growth_rate, 28.5);
        assert_eq!(data.market_sizing.forecast.len(), 5);
        assert_eq!(data.industry_overview.market_trends.len(), 4);
        assert_eq!(data.collection_metadata.sources_accessed, 3);
        assert_eq!(data.collection_metadata.urls_failed, 6);
        assert_eq!(data.collection_metadata.urls_fetched, 0);
        assert!(data.error.is_some());
    }

    #[tokio::test]
    async fn extracted_numbers_override_estimates() {
        let config = test_config();
        let market_url = config.sources.market_data[0].clone();
        let overview_url = config.sources.industry_overview[0].clone();
        let tesla_url = config.competitors[0].urls[0].clone();
        let fetcher = StaticFetcher::new(&[
            (
                market_url.as_str(),
                "<p>The charging market is worth 40 billion and sales grow 10% a year.</p>",
            ),
            (
                overview_url.as_str(),
                "<article><p>There are 2,000 charging stations.</p></article>",
            ),
            (tesla_url.as_str(), "<p>Tesla runs 700 stations.</p>"),
        ]);

        let data = DataCollector::new(&fetcher, &config).collect_all_data().await;

        assert_eq!(data.market_sizing.global_market_size, 40.0);
        assert_eq!(data.market_sizing.growth_rate, 10.0);
        assert_eq!(data.market_sizing.forecast[0].value_billion, 44.0);
        assert_eq!(data.industry_overview.key_statistics.station_count, Some(2000.0));
        assert_eq!(data.industry_overview.content_summary, "There are 2,000 charging stations.");
        assert_eq!(data.competitors[0].metrics.station_count, Some(700.0));
        assert_eq!(data.collection_metadata.urls_fetched, 3);
        assert_eq!(data.collection_metadata.data_quality, "Excellent");
        assert!(data.error.is_none());
    }

    #[tokio::test]
    async fn competitor_text_is_truncated() {
        let mut config = test_config();
        config.competitors = vec![CompetitorConfig {
            name: "EVgo".into(),
            urls: vec!["https://example.test/evgo".into()],
        }];
        let body = format!("<p>{}</p>", "x".repeat(6000));
        let fetcher = StaticFetcher::new(&[("https://example.test/evgo", body.as_str())]);

        let profiles = DataCollector::new(&fetcher, &config).collect_competitor_data().await;

        assert_eq!(profiles[0].text_content.chars().count(), COMPETITOR_TEXT_LIMIT);
        assert!(profiles[0].strengths.is_empty());
        assert_eq!(profiles[0].market_position, "Unknown");
    }

    #[tokio::test]
    async fn overview_summary_keeps_first_3000_chars() {
        let config = test_config();
        let overview_url = config.sources.industry_overview[0].clone();
        let body = format!("<article><p>{}</p></article>", "y".repeat(5000));
        let fetcher = StaticFetcher::new(&[(overview_url.as_str(), body.as_str())]);

        let overview = DataCollector::new(&fetcher, &config).collect_industry_overview().await;

        assert_eq!(overview.content_summary.chars().count(), SUMMARY_TEXT_LIMIT);
        assert!(!overview.content_summary.ends_with("..."));
    }
}
