// One full generation run: collect, analyze, draw, render, write
use crate::analyzer::analyze;
use crate::collector::DataCollector;
use crate::config::AppConfig;
use crate::model::ReportError;
use crate::report::{ReportData, ReportFiles, ReportGenerator, ReportMetadata};
use crate::scraper::Fetcher;
use crate::utils::{format_currency, format_percentage};
use crate::visualizer::{Visualizations, Visualizer, init_chart_font};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub struct GenerationSummary {
    pub files: ReportFiles,
    pub visualizations_dir: PathBuf,
    pub charts: Visualizations,
    pub market_value_billion: f64,
    pub growth_rate: f64,
    pub market_leader: Option<String>,
    pub attractiveness: String,
}

pub async fn run(config: &AppConfig, fetcher: &dyn Fetcher) -> Result<GenerationSummary, ReportError> {
    info!("🚗⚡ Starting EV charging industry analysis");

    let visualizations_dir = config.visualizations_dir();
    tokio::fs::create_dir_all(&visualizations_dir).await?;
    tokio::fs::create_dir_all(config.static_dir()).await?;

    info!("📊 Step 1: Collecting industry data...");
    let raw = DataCollector::new(fetcher, config).collect_all_data().await;

    info!("🔍 Step 2: Performing strategic analysis...");
    let analysis = analyze(&raw);

    info!("📈 Step 3: Creating visualizations...");
    let labels = init_chart_font(config.chart_font.as_deref());
    let chart_dir = visualizations_dir.clone();
    let chart_input = analysis.clone();
    let charts = tokio::task::spawn_blocking(move || {
        Visualizer::new(chart_dir, labels).create_visualizations(&chart_input)
    })
    .await
    .map_err(|e| ReportError::Task(e.to_string()))?;

    info!("📝 Step 4: Generating reports...");
    let generator = ReportGenerator::new()?;
    let data = ReportData::new(
        ReportMetadata::new(&config.report_version),
        raw,
        analysis,
        charts.clone(),
    );
    let files = generator.save_reports(config, &data).await?;

    let summary = GenerationSummary {
        files,
        visualizations_dir,
        charts,
        market_value_billion: data.market_sizing.current_market.global_value_billion,
        growth_rate: data.market_sizing.current_market.annual_growth_rate,
        market_leader: data.competitive_analysis.top_players.first().cloned(),
        attractiveness: data.porters_analysis.overall_assessment.attractiveness.clone(),
    };
    log_summary(&summary);
    Ok(summary)
}

fn log_summary(summary: &GenerationSummary) {
    info!("✅ Analysis complete");
    info!("📄 HTML report: {}", summary.files.html.display());
    info!("📄 Markdown report: {}", summary.files.markdown.display());
    info!("💾 Data snapshot: {}", summary.files.data.display());
    info!("📈 Charts: {}", summary.visualizations_dir.display());

    info!("🎯 Key findings:");
    info!(
        "   • Market value: {}",
        format_currency(summary.market_value_billion * 1_000_000_000.0)
    );
    info!("   • Growth rate: {}", format_percentage(Some(summary.growth_rate)));
    info!(
        "   • Market leader: {}",
        summary.market_leader.as_deref().unwrap_or("N/A")
    );
    info!("   • Industry attractiveness: {}", summary.attractiveness);
}
