// Flattened view of a report: every value the templates print is present,
// with N/A standing in for anything missing.
use super::{ReportData, ReportMetadata};
use crate::analyzer::competitive::{CompanyScores, MarketShare};
use crate::analyzer::trends::Outlook;
use crate::model::{IndustryOverview, RegionShare, YearValue};
use crate::utils::executive_summary;
use serde::Serialize;

const NOT_AVAILABLE: &str = "N/A";
const MAX_STARS: u8 = 5;

const KEY_FINDINGS: [&str; 4] = [
    "The EV charging market is experiencing unprecedented growth driven by government mandates and declining EV costs",
    "Tesla maintains technological leadership but faces intensifying competition from network operators",
    "Market fragmentation creates opportunities for consolidation and strategic partnerships",
    "Rural market penetration remains a significant growth opportunity with infrastructure challenges",
];

const RECOMMENDATION_TIERS: [(&str, [&str; 4]); 3] = [
    (
        "Immediate Actions (0-6 months)",
        [
            "Secure prime locations in high-traffic corridors",
            "Establish partnerships with major fleet operators",
            "Invest in ultra-fast charging technology deployment",
            "Develop comprehensive customer experience strategy",
        ],
    ),
    (
        "Short-term Initiatives (6-18 months)",
        [
            "Expand network density in target metropolitan areas",
            "Launch subscription-based pricing models",
            "Integrate renewable energy sources at charging sites",
            "Develop strategic partnerships with utilities",
        ],
    ),
    (
        "Long-term Strategy (18+ months)",
        [
            "Pursue consolidation opportunities in fragmented markets",
            "Expand internationally in emerging EV markets",
            "Develop adjacent service offerings (retail, advertising)",
            "Invest in next-generation charging technologies",
        ],
    ),
];

const SUCCESS_METRICS: [&str; 5] = [
    "Network utilization rates and revenue per station",
    "Customer acquisition cost and lifetime value",
    "Market share in target geographic regions",
    "Technology differentiation and charging speeds",
    "Partnership development and strategic alliances",
];

const FORCE_CLASSES: [&str; 5] = [
    "threat-new-entrants",
    "supplier-power",
    "buyer-power",
    "threat-substitutes",
    "competitive-rivalry",
];

#[derive(Debug, Serialize)]
pub struct MatrixRow<'a> {
    pub company: &'a str,
    pub scores: [u8; 6],
    pub stars: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ForceCard<'a> {
    pub title: &'static str,
    pub css_class: &'static str,
    pub score: u8,
    pub assessment: &'a str,
    pub factors: &'a [String],
}

/// A titled list: SWOT quadrants, strategy options, trend groups, recommendation tiers.
#[derive(Debug, Serialize)]
pub struct ListBlock<'a> {
    pub title: &'static str,
    pub css_class: &'static str,
    pub items: Vec<&'a str>,
}

impl<'a> ListBlock<'a> {
    fn new(title: &'static str, css_class: &'static str, items: &'a [String]) -> Self {
        Self {
            title,
            css_class,
            items: items.iter().map(String::as_str).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChartImage {
    pub title: &'static str,
    pub file: String,
}

#[derive(Debug, Serialize)]
pub struct ReportView<'a> {
    pub metadata: &'a ReportMetadata,
    pub executive_summary: String,
    pub market_value: String,
    pub growth_rate: String,
    pub market_leader: String,
    pub attractiveness: String,
    pub average_force_score: String,
    pub key_findings: &'static [&'static str],
    pub industry_overview: &'a IndustryOverview,
    pub market_share: &'a [MarketShare],
    pub competitive_matrix: Vec<MatrixRow<'a>>,
    pub competitive_error: &'a str,
    pub key_insights: &'a [String],
    pub forces: Vec<ForceCard<'a>>,
    pub key_recommendations: &'a [String],
    pub swot_quadrants: Vec<ListBlock<'a>>,
    pub strategic_options: Vec<ListBlock<'a>>,
    pub tam: String,
    pub sam: String,
    pub som: String,
    pub regional: &'a [RegionShare],
    pub projections: &'a [YearValue],
    pub market_drivers: &'a [String],
    pub trend_groups: Vec<ListBlock<'a>>,
    pub outlook: &'a Outlook,
    pub recommendation_tiers: Vec<ListBlock<'static>>,
    pub success_metrics: &'static [&'static str],
    pub chart_images: Vec<ChartImage>,
    pub data_quality: &'a str,
    pub growth_labels: Vec<String>,
    pub growth_data: Vec<f64>,
    pub share_labels: Vec<&'a str>,
    pub share_data: Vec<f64>,
    pub regional_labels: Vec<&'a str>,
    pub regional_data: Vec<f64>,
}

/// "★★★☆☆" for a score of 3.
pub fn star_rating(score: u8) -> String {
    let filled = score.min(MAX_STARS) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(MAX_STARS as usize - filled))
}

fn known_amount(value: f64) -> Option<f64> {
    (value > 0.0).then_some(value)
}

fn amount_or_na(value: f64) -> String {
    known_amount(value).map_or_else(|| NOT_AVAILABLE.to_string(), |v| format!("{:.1}", v))
}

fn text_or_na(value: &str) -> String {
    if value.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        value.to_string()
    }
}

fn matrix_row(entry: &CompanyScores) -> MatrixRow<'_> {
    let scores = entry.scores.values();
    MatrixRow {
        company: &entry.company,
        scores,
        stars: scores.iter().map(|&s| star_rating(s)).collect(),
    }
}

impl<'a> ReportView<'a> {
    pub fn new(data: &'a ReportData) -> Self {
        let competitive = &data.competitive_analysis;
        let porters = &data.porters_analysis;
        let swot = &data.swot_analysis;
        let sizing = &data.market_sizing;
        let trends = &data.trend_analysis;
        let current = &sizing.current_market;

        let top_player = competitive.top_players.first().map(String::as_str);
        let (growth_labels, growth_data) = if current.global_value_billion > 0.0 {
            sizing.growth_series()
        } else {
            (Vec::new(), Vec::new())
        };

        let forces = porters
            .forces()
            .into_iter()
            .zip(FORCE_CLASSES)
            .map(|((title, force), css_class)| ForceCard {
                title,
                css_class,
                score: force.score,
                assessment: if force.assessment.is_empty() {
                    NOT_AVAILABLE
                } else {
                    force.assessment.as_str()
                },
                factors: &force.factors,
            })
            .collect();

        let charts = &data.visualizations;
        let chart_images = [
            ("Market Growth Projection", &charts.market_growth),
            ("Competitive Analysis Radar", &charts.competitive_radar),
            ("Market Share Distribution", &charts.market_share),
            ("Regional Market Distribution", &charts.regional_distribution),
        ]
        .into_iter()
        .filter_map(|(title, file)| file.clone().map(|file| ChartImage { title, file }))
        .collect();

        Self {
            metadata: &data.metadata,
            executive_summary: executive_summary(
                known_amount(current.global_value_billion),
                known_amount(current.annual_growth_rate),
                top_player,
            ),
            market_value: amount_or_na(current.global_value_billion),
            growth_rate: amount_or_na(current.annual_growth_rate),
            market_leader: text_or_na(top_player.unwrap_or_default()),
            attractiveness: text_or_na(&porters.overall_assessment.attractiveness),
            average_force_score: amount_or_na(porters.overall_assessment.average_score),
            key_findings: &KEY_FINDINGS,
            industry_overview: &data.industry_data.industry_overview,
            market_share: &competitive.market_share_estimates,
            competitive_matrix: competitive.competitive_matrix.iter().map(matrix_row).collect(),
            competitive_error: competitive.error.as_deref().unwrap_or_default(),
            key_insights: &competitive.key_insights,
            forces,
            key_recommendations: &porters.overall_assessment.key_recommendations,
            swot_quadrants: vec![
                ListBlock::new("Strengths", "strengths", &swot.strengths),
                ListBlock::new("Weaknesses", "weaknesses", &swot.weaknesses),
                ListBlock::new("Opportunities", "opportunities", &swot.opportunities),
                ListBlock::new("Threats", "threats", &swot.threats),
            ],
            strategic_options: vec![
                ListBlock::new(
                    "SO Strategies (Strengths + Opportunities)",
                    "so",
                    &swot.strategic_options.so_strategies,
                ),
                ListBlock::new(
                    "WO Strategies (Weaknesses + Opportunities)",
                    "wo",
                    &swot.strategic_options.wo_strategies,
                ),
                ListBlock::new(
                    "ST Strategies (Strengths + Threats)",
                    "st",
                    &swot.strategic_options.st_strategies,
                ),
                ListBlock::new(
                    "WT Strategies (Weaknesses + Threats)",
                    "wt",
                    &swot.strategic_options.wt_strategies,
                ),
            ],
            tam: amount_or_na(sizing.addressable_market.tam_billion),
            sam: amount_or_na(sizing.addressable_market.sam_billion),
            som: amount_or_na(sizing.addressable_market.som_billion),
            regional: &sizing.regional_analysis,
            projections: &sizing.projections,
            market_drivers: &sizing.market_drivers,
            trend_groups: vec![
                ListBlock::new("Technology Trends", "technology", &trends.technology_trends),
                ListBlock::new("Market Trends", "market", &trends.market_trends),
                ListBlock::new("Business Model Trends", "business-model", &trends.business_model_trends),
                ListBlock::new("Regulatory Trends", "regulatory", &trends.regulatory_trends),
            ],
            outlook: &trends.outlook_2025_2030,
            recommendation_tiers: RECOMMENDATION_TIERS
                .iter()
                .map(|&(title, items)| ListBlock {
                    title,
                    css_class: "recommendation",
                    items: items.to_vec(),
                })
                .collect(),
            success_metrics: &SUCCESS_METRICS,
            chart_images,
            data_quality: &data.industry_data.collection_metadata.data_quality,
            growth_labels,
            growth_data,
            share_labels: competitive
                .market_share_estimates
                .iter()
                .map(|s| s.company.as_str())
                .collect(),
            share_data: competitive.market_share_estimates.iter().map(|s| s.share).collect(),
            regional_labels: sizing.regional_analysis.iter().map(|r| r.region.as_str()).collect(),
            regional_data: sizing.regional_analysis.iter().map(|r| r.share).collect(),
        }
    }
}
