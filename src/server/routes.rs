use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use std::path::Path as FsPath;
use tracing::{info, warn};

use super::state::AppState;
use crate::visualizer::{
    COMPETITIVE_RADAR_CHART, MARKET_GROWTH_CHART, MARKET_SHARE_CHART, REGIONAL_CHART,
};

const PLACEHOLDER_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>EV Charging Industry Analysis</title>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <style>
        body { font-family: Arial, sans-serif; padding: 40px; text-align: center; background: #f8f9fa; }
        .container { max-width: 600px; margin: 0 auto; background: white; padding: 40px; border-radius: 10px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
        h1 { color: #2E8B57; margin-bottom: 20px; }
        .loading { color: #666; margin: 20px 0; }
        .button { background: #2E8B57; color: white; padding: 12px 24px; border-radius: 5px; text-decoration: none; display: inline-block; margin: 10px; }
    </style>
</head>
<body>
    <div class="container">
        <h1>🚗⚡ EV Charging Industry Analysis</h1>
        <div class="loading">
            <p>📊 Reports are being generated in the background...</p>
            <p>This may take 30-60 seconds for the first load.</p>
        </div>
        <a href="/generate" class="button">🔄 Generate Report</a>
        <a href="/status" class="button">📈 Check Status</a>
        <p><small>This page refreshes every 10 seconds until the report is ready.</small></p>
    </div>
    <script>
        setTimeout(function() { window.location.reload(); }, 10000);
    </script>
</body>
</html>
"#;

const GENERATING_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Generating EV Analysis Report</title>
    <meta charset="UTF-8">
    <meta http-equiv="refresh" content="30;url=/">
    <style>
        body { font-family: Arial, sans-serif; padding: 40px; text-align: center; background: #f8f9fa; }
        .container { max-width: 600px; margin: 0 auto; background: white; padding: 40px; border-radius: 10px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
        h1 { color: #2E8B57; }
        .spinner { border: 4px solid #f3f3f3; border-top: 4px solid #2E8B57; border-radius: 50%; width: 40px; height: 40px; animation: spin 1s linear infinite; margin: 20px auto; }
        @keyframes spin { 0% { transform: rotate(0deg); } 100% { transform: rotate(360deg); } }
        .button { background: #2E8B57; color: white; padding: 12px 24px; border-radius: 5px; text-decoration: none; display: inline-block; margin: 10px; }
    </style>
</head>
<body>
    <div class="container">
        <h1>🚗⚡ Generating EV Charging Analysis</h1>
        <div class="spinner"></div>
        <p>The industry analysis is running: data collection, competitive analysis, Porter's Five Forces, SWOT analysis and market sizing.</p>
        <p>This page will automatically refresh in 30 seconds.</p>
        <a href="/" class="button">🔄 Check Report</a>
    </div>
</body>
</html>
"#;

#[derive(Debug, Serialize)]
pub struct ChartStatus {
    pub market_growth: bool,
    pub competitive_radar: bool,
    pub market_share: bool,
    pub regional_distribution: bool,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub html_report: bool,
    pub markdown_report: bool,
    pub analysis_data: bool,
    pub visualizations: ChartStatus,
    pub last_generated: Option<String>,
    pub generating: bool,
    pub server_status: &'static str,
}

async fn exists(path: impl AsRef<FsPath>) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}

/// GET / and /report - the HTML report, or a self-refreshing placeholder.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    match tokio::fs::read_to_string(state.config.html_report_path()).await {
        Ok(html) => Html(html),
        Err(_) => Html(PLACEHOLDER_PAGE.to_string()),
    }
}

/// GET /data - the JSON data snapshot.
pub async fn data(State(state): State<AppState>) -> Json<serde_json::Value> {
    let content = match tokio::fs::read_to_string(state.config.data_snapshot_path()).await {
        Ok(content) => content,
        Err(_) => {
            return Json(json!({ "error": "Analysis data not found. Report is being generated." }));
        }
    };
    match serde_json::from_str(&content) {
        Ok(value) => Json(value),
        Err(e) => {
            warn!("Invalid data snapshot: {}", e);
            Json(json!({ "error": e.to_string() }))
        }
    }
}

/// GET /generate - wake the generation worker.
pub async fn generate(State(state): State<AppState>) -> Html<&'static str> {
    info!("Report generation requested over HTTP");
    state.request_generation();
    Html(GENERATING_PAGE)
}

pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let config = &state.config;
    let charts = config.visualizations_dir();
    let html_path = config.html_report_path();

    let last_generated = tokio::fs::metadata(&html_path)
        .await
        .and_then(|m| m.modified())
        .ok()
        .map(|modified| DateTime::<Utc>::from(modified).to_rfc3339());

    Json(StatusResponse {
        html_report: exists(&html_path).await,
        markdown_report: exists(config.markdown_report_path()).await,
        analysis_data: exists(config.data_snapshot_path()).await,
        visualizations: ChartStatus {
            market_growth: exists(charts.join(MARKET_GROWTH_CHART)).await,
            competitive_radar: exists(charts.join(COMPETITIVE_RADAR_CHART)).await,
            market_share: exists(charts.join(MARKET_SHARE_CHART)).await,
            regional_distribution: exists(charts.join(REGIONAL_CHART)).await,
        },
        last_generated,
        generating: state.is_generating(),
        server_status: "running",
    })
}

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy", "service": "ev-charging-analysis" }))
}

/// Only plain file names are served; anything that could leave the charts
/// directory is treated as missing.
fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && !name.contains("..") && !name.contains('/') && !name.contains('\\')
}

/// GET /visualizations/{file} - a chart image.
pub async fn visualization(State(state): State<AppState>, Path(file): Path<String>) -> Response {
    let not_found = (StatusCode::NOT_FOUND, "Visualization not found");
    if !is_plain_file_name(&file) {
        warn!("Rejected visualization path: {}", file);
        return not_found.into_response();
    }

    match tokio::fs::read(state.config.visualizations_dir().join(&file)).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, "image/png")], bytes).into_response(),
        Err(_) => not_found.into_response(),
    }
}
