// Analyzer module: aggregates submodules for the different business frameworks.

pub mod competitive;
pub mod market;
pub mod strategy;
pub mod trends;

use crate::model::RawIndustryData;
use competitive::CompetitiveAnalysis;
use market::MarketSizing;
use serde::{Deserialize, Serialize};
use strategy::{PortersForces, SwotAnalysis};
use tracing::warn;
use trends::TrendAnalysis;

/// Structure representing the overall analysis result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub competitive_analysis: CompetitiveAnalysis,
    pub porters_analysis: PortersForces,
    pub swot_analysis: SwotAnalysis,
    pub market_sizing: MarketSizing,
    pub trend_analysis: TrendAnalysis,
}

/// Runs every framework over the collected data. A failed competitive
/// analysis is replaced by an empty one that carries the error message.
pub fn analyze(raw: &RawIndustryData) -> AnalysisResult {
    let competitive_analysis = competitive::analyze_competitors(raw).unwrap_or_else(|e| {
        warn!("Competitive analysis failed: {}", e);
        CompetitiveAnalysis::failed(&e)
    });

    AnalysisResult {
        competitive_analysis,
        porters_analysis: strategy::porters_five_forces(raw),
        swot_analysis: strategy::swot_analysis(raw),
        market_sizing: market::market_sizing(raw),
        trend_analysis: trends::trend_analysis(raw),
    }
}

pub(crate) fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
