// PNG charts for the report
use crate::analyzer::AnalysisResult;
use crate::analyzer::competitive::{CRITERIA, CompetitiveAnalysis};
use crate::analyzer::market::MarketSizing;
use plotters::prelude::*;
use plotters::style::FontStyle;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::f64::consts::PI;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{info, warn};

pub const MARKET_GROWTH_CHART: &str = "market_growth_projection.png";
pub const COMPETITIVE_RADAR_CHART: &str = "competitive_analysis_radar.png";
pub const MARKET_SHARE_CHART: &str = "market_share_distribution.png";
pub const REGIONAL_CHART: &str = "regional_market_distribution.png";

const FONT: &str = "sans-serif";
const GROWTH_COLOR: RGBColor = RGBColor(0x2E, 0x8B, 0x57);
const PALETTE: [RGBColor; 4] = [
    RGBColor(0xFF, 0x6B, 0x6B),
    RGBColor(0x4E, 0xCD, 0xC4),
    RGBColor(0x45, 0xB7, 0xD1),
    RGBColor(0x96, 0xCE, 0xB4),
];

type ChartResult = Result<bool, Box<dyn Error>>;

/// File names of the charts that were written, plus the first drawing error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Visualizations {
    pub market_growth: Option<String>,
    pub competitive_radar: Option<String>,
    pub market_share: Option<String>,
    pub regional_distribution: Option<String>,
    pub error: Option<String>,
}

static FONT_READY: OnceLock<bool> = OnceLock::new();

/// Registers the TrueType font used for chart text. Only the first call has
/// an effect; returns whether text can be drawn.
pub fn init_chart_font(path: Option<&Path>) -> bool {
    *FONT_READY.get_or_init(|| match path {
        Some(path) => register_chart_font(path),
        None => {
            info!("No chart font configured, charts will be drawn without text");
            false
        }
    })
}

fn register_chart_font(path: &Path) -> bool {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Failed to read chart font {}: {}", path.display(), e);
            return false;
        }
    };
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    match plotters::style::register_font(FONT, FontStyle::Normal, bytes) {
        Ok(()) => true,
        Err(_) => {
            warn!("Invalid chart font {}", path.display());
            false
        }
    }
}

pub struct Visualizer {
    dir: PathBuf,
    labels: bool,
}

impl Visualizer {
    pub fn new(dir: impl Into<PathBuf>, labels: bool) -> Self {
        Self {
            dir: dir.into(),
            labels,
        }
    }

    /// Draws every chart whose data is available. Errors are logged and kept
    /// in the result; charts drawn before the failure are still reported.
    pub fn create_visualizations(&self, analysis: &AnalysisResult) -> Visualizations {
        info!("Creating visualizations");
        let mut out = Visualizations::default();

        let result = (|| -> Result<(), Box<dyn Error>> {
            if self.draw_market_growth(&analysis.market_sizing)? {
                out.market_growth = Some(MARKET_GROWTH_CHART.into());
            }
            if self.draw_competitive_radar(&analysis.competitive_analysis)? {
                out.competitive_radar = Some(COMPETITIVE_RADAR_CHART.into());
            }
            if self.draw_market_share(&analysis.competitive_analysis)? {
                out.market_share = Some(MARKET_SHARE_CHART.into());
            }
            if self.draw_regional(&analysis.market_sizing)? {
                out.regional_distribution = Some(REGIONAL_CHART.into());
            }
            Ok(())
        })();

        if let Err(e) = result {
            warn!("Error creating visualizations: {}", e);
            out.error = Some(e.to_string());
        }
        out
    }

    fn draw_market_growth(&self, sizing: &MarketSizing) -> ChartResult {
        let (years, values) = sizing.growth_series();
        if values.iter().all(|v| *v <= 0.0) {
            return Ok(false);
        }

        let path = self.dir.join(MARKET_GROWTH_CHART);
        let root = BitMapBackend::new(&path, (1000, 600)).into_drawing_area();
        root.fill(&WHITE)?;

        let y_max = values.iter().cloned().fold(0.0, f64::max) * 1.15;
        let x_max = values.len() as f64 - 0.5;

        let mut builder = ChartBuilder::on(&root);
        builder.margin(30);
        if self.labels {
            builder
                .caption("EV Charging Market Growth Projection", (FONT, 28.0).into_font())
                .x_label_area_size(40)
                .y_label_area_size(60);
        }
        let mut chart = builder.build_cartesian_2d(-0.5f64..x_max, 0f64..y_max)?;

        if self.labels {
            let formatter = |x: &f64| index_label(&years, *x);
            chart
                .configure_mesh()
                .x_labels(years.len())
                .x_label_formatter(&formatter)
                .x_desc("Year")
                .y_desc("Market Value (Billion USD)")
                .draw()?;
        }

        let series: Vec<(f64, f64)> = values.iter().enumerate().map(|(i, v)| (i as f64, *v)).collect();
        chart.draw_series(AreaSeries::new(series.clone(), 0.0, GROWTH_COLOR.mix(0.3).filled()))?;
        chart.draw_series(LineSeries::new(series.clone(), GROWTH_COLOR.stroke_width(3)))?;
        chart.draw_series(series.iter().map(|&p| Circle::new(p, 6, GROWTH_COLOR.filled())))?;

        if self.labels {
            chart.draw_series(series.iter().map(|&(x, y)| {
                Text::new(format!("${:.1}B", y), (x - 0.15, y + y_max * 0.04), (FONT, 15.0).into_font())
            }))?;
        }

        root.present()?;
        Ok(true)
    }

    fn draw_competitive_radar(&self, analysis: &CompetitiveAnalysis) -> ChartResult {
        if analysis.competitive_matrix.is_empty() {
            return Ok(false);
        }

        let path = self.dir.join(COMPETITIVE_RADAR_CHART);
        let root = BitMapBackend::new(&path, (1000, 800)).into_drawing_area();
        root.fill(&WHITE)?;

        let center = (440, 420);
        let radius = 280.0;
        let axes = CRITERIA.len();
        let point = |axis: usize, value: f64| -> (i32, i32) {
            let angle = -PI / 2.0 + 2.0 * PI * axis as f64 / axes as f64;
            let r = radius * value / 5.0;
            (
                center.0 + (r * angle.cos()).round() as i32,
                center.1 + (r * angle.sin()).round() as i32,
            )
        };

        for level in 1..=5 {
            let mut ring: Vec<(i32, i32)> = (0..axes).map(|a| point(a, level as f64)).collect();
            ring.push(ring[0]);
            root.draw(&PathElement::new(ring, BLACK.mix(0.2).stroke_width(1)))?;
        }
        for axis in 0..axes {
            root.draw(&PathElement::new(vec![center, point(axis, 5.0)], BLACK.mix(0.2).stroke_width(1)))?;
        }

        for (company, color) in analysis.competitive_matrix.iter().take(PALETTE.len()).zip(PALETTE) {
            let values = company.scores.values();
            let outline: Vec<(i32, i32)> = values
                .iter()
                .enumerate()
                .map(|(axis, v)| point(axis, *v as f64))
                .collect();
            root.draw(&Polygon::new(outline.clone(), color.mix(0.25).filled()))?;
            let mut closed = outline.clone();
            closed.push(outline[0]);
            root.draw(&PathElement::new(closed, color.stroke_width(2)))?;
            for p in outline {
                root.draw(&Circle::new(p, 4, color.filled()))?;
            }
        }

        if self.labels {
            root.draw(&Text::new("Competitive Analysis Matrix", (320, 20), (FONT, 28.0).into_font()))?;
            for (axis, name) in CRITERIA.iter().enumerate() {
                let (x, y) = point(axis, 5.6);
                root.draw(&Text::new(*name, (x - 60, y - 8), (FONT, 16.0).into_font()))?;
            }
            for (i, (company, color)) in analysis.competitive_matrix.iter().take(PALETTE.len()).zip(PALETTE).enumerate() {
                let y = 80 + i as i32 * 28;
                root.draw(&Rectangle::new([(800, y), (820, y + 16)], color.filled()))?;
                root.draw(&Text::new(company.company.clone(), (828, y), (FONT, 16.0).into_font()))?;
            }
        }

        root.present()?;
        Ok(true)
    }

    fn draw_market_share(&self, analysis: &CompetitiveAnalysis) -> ChartResult {
        let total: f64 = analysis.market_share_estimates.iter().map(|m| m.share).sum();
        if total <= 0.0 {
            return Ok(false);
        }

        let path = self.dir.join(MARKET_SHARE_CHART);
        let root = BitMapBackend::new(&path, (1000, 800)).into_drawing_area();
        root.fill(&WHITE)?;

        let center = (500.0, 430.0);
        let radius = 280.0;
        let at = |angle: f64, r: f64| -> (i32, i32) {
            (
                (center.0 + r * angle.cos()).round() as i32,
                (center.1 + r * angle.sin()).round() as i32,
            )
        };

        let mut start = -PI / 2.0;
        for (i, slice) in analysis.market_share_estimates.iter().enumerate() {
            let sweep = 2.0 * PI * slice.share / total;
            let steps = ((sweep.to_degrees() * 2.0).ceil() as usize).max(2);
            let mut wedge = vec![at(0.0, 0.0)];
            wedge.extend((0..=steps).map(|s| at(start + sweep * s as f64 / steps as f64, radius)));
            let color = PALETTE[i % PALETTE.len()];
            root.draw(&Polygon::new(wedge, color.filled()))?;

            if self.labels {
                let mid = start + sweep / 2.0;
                let (px, py) = at(mid, radius * 0.6);
                let pct_style = (FONT, 18.0).into_font().color(&WHITE);
                root.draw(&Text::new(format!("{:.1}%", slice.share / total * 100.0), (px - 24, py - 9), pct_style))?;
                let (lx, ly) = at(mid, radius * 1.15);
                root.draw(&Text::new(slice.company.clone(), (lx - 50, ly - 8), (FONT, 16.0).into_font()))?;
            }
            start += sweep;
        }

        if self.labels {
            root.draw(&Text::new("EV Charging Market Share Distribution", (270, 20), (FONT, 28.0).into_font()))?;
        }

        root.present()?;
        Ok(true)
    }

    fn draw_regional(&self, sizing: &MarketSizing) -> ChartResult {
        let regions = &sizing.regional_analysis;
        if regions.is_empty() {
            return Ok(false);
        }

        let path = self.dir.join(REGIONAL_CHART);
        let root = BitMapBackend::new(&path, (1000, 600)).into_drawing_area();
        root.fill(&WHITE)?;

        let names: Vec<String> = regions.iter().map(|r| r.region.clone()).collect();
        let y_max = regions.iter().map(|r| r.share).fold(0.0, f64::max) * 1.2 + 1.0;

        let mut builder = ChartBuilder::on(&root);
        builder.margin(30);
        if self.labels {
            builder
                .caption("Regional Market Distribution", (FONT, 28.0).into_font())
                .x_label_area_size(40)
                .y_label_area_size(60);
        }
        let mut chart = builder.build_cartesian_2d(-0.5f64..(regions.len() as f64 - 0.5), 0f64..y_max)?;

        if self.labels {
            let formatter = |x: &f64| index_label(&names, *x);
            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_labels(names.len())
                .x_label_formatter(&formatter)
                .x_desc("Region")
                .y_desc("Market Share (%)")
                .draw()?;
        }

        chart.draw_series(regions.iter().enumerate().map(|(i, r)| {
            let x = i as f64;
            Rectangle::new([(x - 0.35, 0.0), (x + 0.35, r.share)], PALETTE[i % PALETTE.len()].filled())
        }))?;

        if self.labels {
            chart.draw_series(regions.iter().enumerate().map(|(i, r)| {
                Text::new(format!("{:.1}%", r.share), (i as f64 - 0.1, r.share + y_max * 0.03), (FONT, 15.0).into_font())
            }))?;
        }

        root.present()?;
        Ok(true)
    }
}

/// Axis label for an integer tick position; blank between ticks.
fn index_label(labels: &[String], x: f64) -> String {
    let idx = x.round();
    if (x - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}
