// Report rendering (HTML, Markdown) and the JSON data snapshot
pub mod view;

use crate::analyzer::AnalysisResult;
use crate::analyzer::competitive::CompetitiveAnalysis;
use crate::analyzer::market::MarketSizing;
use crate::analyzer::strategy::{PortersForces, SwotAnalysis};
use crate::analyzer::trends::TrendAnalysis;
use crate::config::AppConfig;
use crate::model::{RawIndustryData, ReportError};
use crate::visualizer::Visualizations;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tera::{Context, Tera};
use tracing::info;
use view::ReportView;

const HTML_TEMPLATE_NAME: &str = "report.html";
const MARKDOWN_TEMPLATE_NAME: &str = "report.md";
const HTML_TEMPLATE: &str = include_str!("../../templates/report.html.tera");
const MARKDOWN_TEMPLATE: &str = include_str!("../../templates/report.md.tera");
const STYLESHEET: &str = include_str!("../../templates/styles.css");
const STYLESHEET_FILE: &str = "styles.css";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_date: String,
    pub generated_time: String,
    pub report_version: String,
}

impl ReportMetadata {
    pub fn new(report_version: &str) -> Self {
        let now = Utc::now();
        Self {
            generated_date: now.format("%B %d, %Y").to_string(),
            generated_time: now.format("%H:%M UTC").to_string(),
            report_version: report_version.to_string(),
        }
    }
}

impl Default for ReportMetadata {
    fn default() -> Self {
        Self::new("1.0")
    }
}

/// Everything one report is built from. Serialized verbatim as the data snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportData {
    pub metadata: ReportMetadata,
    pub industry_data: RawIndustryData,
    pub competitive_analysis: CompetitiveAnalysis,
    pub porters_analysis: PortersForces,
    pub swot_analysis: SwotAnalysis,
    pub market_sizing: MarketSizing,
    pub trend_analysis: TrendAnalysis,
    pub visualizations: Visualizations,
}

impl ReportData {
    pub fn new(
        metadata: ReportMetadata,
        industry_data: RawIndustryData,
        analysis: AnalysisResult,
        visualizations: Visualizations,
    ) -> Self {
        Self {
            metadata,
            industry_data,
            competitive_analysis: analysis.competitive_analysis,
            porters_analysis: analysis.porters_analysis,
            swot_analysis: analysis.swot_analysis,
            market_sizing: analysis.market_sizing,
            trend_analysis: analysis.trend_analysis,
            visualizations,
        }
    }
}

/// Paths of the three documents written for one run.
#[derive(Debug, Clone)]
pub struct ReportFiles {
    pub html: PathBuf,
    pub markdown: PathBuf,
    pub data: PathBuf,
}

pub struct ReportGenerator {
    tera: Tera,
}

impl ReportGenerator {
    pub fn new() -> Result<Self, ReportError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            (HTML_TEMPLATE_NAME, HTML_TEMPLATE),
            (MARKDOWN_TEMPLATE_NAME, MARKDOWN_TEMPLATE),
        ])?;
        Ok(Self { tera })
    }

    pub fn generate_html_report(&self, data: &ReportData) -> Result<String, ReportError> {
        info!("Generating HTML report");
        self.render(HTML_TEMPLATE_NAME, data)
    }

    pub fn generate_markdown_report(&self, data: &ReportData) -> Result<String, ReportError> {
        info!("Generating Markdown report");
        self.render(MARKDOWN_TEMPLATE_NAME, data)
    }

    fn render(&self, template: &str, data: &ReportData) -> Result<String, ReportError> {
        let context = Context::from_serialize(ReportView::new(data))?;
        Ok(self.tera.render(template, &context)?)
    }

    /// Renders both documents and writes them with the JSON snapshot.
    pub async fn save_reports(&self, config: &AppConfig, data: &ReportData) -> Result<ReportFiles, ReportError> {
        let files = ReportFiles {
            html: config.html_report_path(),
            markdown: config.markdown_report_path(),
            data: config.data_snapshot_path(),
        };

        tokio::fs::write(&files.html, self.generate_html_report(data)?).await?;
        tokio::fs::write(&files.markdown, self.generate_markdown_report(data)?).await?;
        tokio::fs::write(&files.data, serde_json::to_string_pretty(data)?).await?;
        ensure_stylesheet(&config.static_dir()).await?;

        info!("Reports saved to {}", config.output_dir.display());
        Ok(files)
    }
}

/// Writes the default stylesheet unless one already exists. Returns whether
/// a file was written.
pub async fn ensure_stylesheet(static_dir: &Path) -> Result<bool, ReportError> {
    let path = static_dir.join(STYLESHEET_FILE);
    if tokio::fs::try_exists(&path).await? {
        return Ok(false);
    }
    tokio::fs::create_dir_all(static_dir).await?;
    tokio::fs::write(&path, STYLESHEET).await?;
    info!("Wrote default stylesheet to {}", path.display());
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze;
    use crate::collector::tests::test_config;
    use crate::model::CompetitorProfile;
    use crate::visualizer::{MARKET_GROWTH_CHART, Visualizations};

    fn sample_data() -> ReportData {
        let raw = RawIndustryData {
            competitors: ["Tesla Supercharger", "ChargePoint", "Electrify America"]
                .iter()
                .map(|name| CompetitorProfile {
                    company: name.to_string(),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        };
        let analysis = analyze(&raw);
        let visualizations = Visualizations {
            market_growth: Some(MARKET_GROWTH_CHART.into()),
            ..Default::default()
        };
        ReportData::new(ReportMetadata::default(), raw, analysis, visualizations)
    }

    #[test]
    fn default_data_renders_both_templates() {
        let generator = ReportGenerator::new().unwrap();
        let data = ReportData::default();

        let html = generator.generate_html_report(&data).unwrap();
        assert!(html.contains("EV Charging Industry Analysis"));
        assert!(html.contains("Industry Challenges"));
        assert!(html.contains("labels: []"));

        let markdown = generator.generate_markdown_report(&data).unwrap();
        assert!(markdown.starts_with("# EV Charging Industry Analysis"));
        assert!(markdown.contains("**Market Leader:** N/A"));
    }

    #[test]
    fn html_contains_matrix_charts_and_images() {
        let generator = ReportGenerator::new().unwrap();
        let html = generator.generate_html_report(&sample_data()).unwrap();

        assert!(html.contains("<strong>Tesla Supercharger</strong>"));
        assert!(html.contains("<td>★★★★★</td>"));
        assert!(html.contains("\"Tesla Supercharger\",\"ChargePoint\",\"Electrify America\",\"Others\""));
        assert!(html.contains("[28.5,22.0,12.5,37.0]"));
        assert!(html.contains("src=\"visualizations/market_growth_projection.png\""));
        assert!(html.contains("Threat of New Entrants"));
    }

    #[test]
    fn markdown_contains_scores_and_overview() {
        let generator = ReportGenerator::new().unwrap();
        let markdown = generator.generate_markdown_report(&sample_data()).unwrap();

        assert!(markdown.contains("| ChargePoint | 5/5 | 3/5 | 4/5 | 4/5 | 3/5 | 3/5 |"));
        assert!(markdown.contains("### Threat of New Entrants: 4/5"));
        assert!(markdown.contains("The global EV charging market is valued at $15.2B"));
        assert!(markdown.contains("- **Tesla Supercharger:** 28.5%"));
    }

    #[tokio::test]
    async fn reports_and_stylesheet_are_written() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            output_dir: dir.path().to_path_buf(),
            ..test_config()
        };
        let generator = ReportGenerator::new().unwrap();
        let data = sample_data();

        let files = generator.save_reports(&config, &data).await.unwrap();
        assert!(files.html.exists());
        assert!(files.markdown.exists());

        let snapshot: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&files.data).unwrap()).unwrap();
        assert_eq!(snapshot["competitive_analysis"]["top_players"][0], "Tesla Supercharger");
        assert_eq!(snapshot["metadata"]["report_version"], "1.0");
        assert!(dir.path().join("static").join("styles.css").exists());

        let custom = dir.path().join("static").join("styles.css");
        std::fs::write(&custom, "body {}").unwrap();
        assert!(!ensure_stylesheet(&config.static_dir()).await.unwrap());
        assert_eq!(std::fs::read_to_string(&custom).unwrap(), "body {}");
    }
}
