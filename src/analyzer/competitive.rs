use crate::analyzer::to_strings;
use crate::model::{AnalysisError, RawIndustryData};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Display names of the six rubric criteria, in `CriteriaScores::values` order.
pub const CRITERIA: [&str; 6] = [
    "Network Size",
    "Charging Speed",
    "Geographic Coverage",
    "Technology Innovation",
    "Brand Strength",
    "Financial Resources",
];

/// 1-5 scores for one company.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriteriaScores {
    pub network_size: u8,
    pub charging_speed: u8,
    pub geographic_coverage: u8,
    pub technology_innovation: u8,
    pub brand_strength: u8,
    pub financial_resources: u8,
}

// Substring rules per criterion; the first rule whose name occurs in the
// company name decides the score.
const NETWORK_SIZE: (&[(&str, u8)], u8) = (&[("Tesla", 5), ("ChargePoint", 5), ("Electrify America", 3)], 2);
const CHARGING_SPEED: (&[(&str, u8)], u8) = (&[("Tesla", 5), ("Electrify America", 5), ("ChargePoint", 3)], 3);
const COVERAGE: (&[(&str, u8)], u8) = (&[("Tesla", 5), ("ChargePoint", 4), ("Electrify America", 4)], 2);
const INNOVATION: (&[(&str, u8)], u8) = (&[("Tesla", 5), ("ChargePoint", 4)], 3);
const BRAND: (&[(&str, u8)], u8) = (&[("Tesla", 5), ("ChargePoint", 3)], 3);
const FINANCIAL: (&[(&str, u8)], u8) = (&[("Tesla", 5), ("Electrify America", 4)], 3);

fn score(company: &str, (rules, default): (&[(&str, u8)], u8)) -> u8 {
    rules
        .iter()
        .find(|(needle, _)| company.contains(needle))
        .map_or(default, |&(_, s)| s)
}

impl CriteriaScores {
    pub fn for_company(company: &str) -> Self {
        Self {
            network_size: score(company, NETWORK_SIZE),
            charging_speed: score(company, CHARGING_SPEED),
            geographic_coverage: score(company, COVERAGE),
            technology_innovation: score(company, INNOVATION),
            brand_strength: score(company, BRAND),
            financial_resources: score(company, FINANCIAL),
        }
    }

    pub fn values(&self) -> [u8; 6] {
        [
            self.network_size,
            self.charging_speed,
            self.geographic_coverage,
            self.technology_innovation,
            self.brand_strength,
            self.financial_resources,
        ]
    }

    pub fn total(&self) -> u32 {
        self.values().iter().map(|&v| v as u32).sum()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyScores {
    pub company: String,
    pub scores: CriteriaScores,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyProfileSummary {
    pub company: String,
    pub market_position: String,
    pub competitive_advantages: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketShare {
    pub company: String,
    pub share: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompetitiveAnalysis {
    pub competitive_matrix: Vec<CompanyScores>,
    pub market_positioning: Vec<CompanyProfileSummary>,
    pub top_players: Vec<String>,
    pub market_share_estimates: Vec<MarketShare>,
    pub key_insights: Vec<String>,
    pub error: Option<String>,
}

impl CompetitiveAnalysis {
    /// Stand-in used when the analysis could not run; carries the reason.
    pub fn failed(err: &AnalysisError) -> Self {
        Self {
            error: Some(err.to_string()),
            ..Self::default()
        }
    }
}

pub fn market_share_estimates() -> Vec<MarketShare> {
    [
        ("Tesla Supercharger", 28.5),
        ("ChargePoint", 22.0),
        ("Electrify America", 12.5),
        ("Others", 37.0),
    ]
    .into_iter()
    .map(|(company, share)| MarketShare {
        company: company.into(),
        share,
    })
    .collect()
}

/// Companies ordered by total score, highest first. Ties keep matrix order.
pub fn rank_competitors(matrix: &[CompanyScores]) -> Vec<String> {
    let mut ranked: Vec<&CompanyScores> = matrix.iter().collect();
    ranked.sort_by(|a, b| b.scores.total().cmp(&a.scores.total()));
    ranked.into_iter().map(|c| c.company.clone()).collect()
}

pub fn analyze_competitors(raw: &RawIndustryData) -> Result<CompetitiveAnalysis, AnalysisError> {
    info!("Starting competitive analysis");

    if raw.competitors.is_empty() {
        return Err(AnalysisError::NoCompetitorData);
    }

    let mut matrix = Vec::with_capacity(raw.competitors.len());
    let mut positioning = Vec::with_capacity(raw.competitors.len());

    for competitor in &raw.competitors {
        info!("Analyzing {}", competitor.company);
        matrix.push(CompanyScores {
            company: competitor.company.clone(),
            scores: CriteriaScores::for_company(&competitor.company),
        });
        positioning.push(CompanyProfileSummary {
            company: competitor.company.clone(),
            market_position: if competitor.market_position.is_empty() {
                "Unknown".into()
            } else {
                competitor.market_position.clone()
            },
            competitive_advantages: competitor.strengths.clone(),
        });
    }

    let top_players = rank_competitors(&matrix);

    Ok(CompetitiveAnalysis {
        competitive_matrix: matrix,
        market_positioning: positioning,
        top_players,
        market_share_estimates: market_share_estimates(),
        key_insights: to_strings(&[
            "Tesla maintains technological and brand advantages",
            "ChargePoint leads in network operator model",
            "Market fragmentation creates opportunities",
            "Fast charging becoming table stakes",
        ]),
        error: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CompetitorProfile;

    fn raw_with(companies: &[&str]) -> RawIndustryData {
        RawIndustryData {
            competitors: companies
                .iter()
                .map(|c| CompetitorProfile {
                    company: c.to_string(),
                    ..CompetitorProfile::default()
                })
                .collect(),
            ..RawIndustryData::default()
        }
    }

    #[test]
    fn documented_scores_for_known_operators() {
        assert_eq!(CriteriaScores::for_company("Tesla Supercharger").values(), [5, 5, 5, 5, 5, 5]);
        assert_eq!(CriteriaScores::for_company("ChargePoint").values(), [5, 3, 4, 4, 3, 3]);
        assert_eq!(CriteriaScores::for_company("Electrify America").values(), [3, 5, 4, 3, 3, 4]);
        assert_eq!(CriteriaScores::for_company("EVgo").values(), [2, 3, 2, 3, 3, 3]);
    }

    #[test]
    fn rule_order_differs_per_criterion() {
        // Charging speed checks Electrify America before ChargePoint, network size the reverse.
        let s = CriteriaScores::for_company("ChargePoint / Electrify America");
        assert_eq!(s.network_size, 5);
        assert_eq!(s.charging_speed, 5);
    }

    #[test]
    fn ranking_is_by_total_and_stable_on_ties() {
        let analysis = analyze_competitors(&raw_with(&["ChargePoint", "Electrify America", "Tesla Supercharger"])).unwrap();
        // ChargePoint and Electrify America both total 22.
        assert_eq!(
            analysis.top_players,
            vec!["Tesla Supercharger", "ChargePoint", "Electrify America"]
        );
    }

    #[test]
    fn market_share_table_is_constant() {
        let analysis = analyze_competitors(&raw_with(&["EVgo"])).unwrap();
        let total: f64 = analysis.market_share_estimates.iter().map(|m| m.share).sum();
        assert!((total - 100.0).abs() < 1e-9);
        assert_eq!(analysis.market_share_estimates[3].company, "Others");
        assert_eq!(analysis.market_positioning[0].market_position, "Unknown");
        assert_eq!(analysis.key_insights.len(), 4);
    }

    #[test]
    fn empty_competitor_list_is_an_error() {
        let err = analyze_competitors(&RawIndustryData::default()).unwrap_err();
        assert!(matches!(err, AnalysisError::NoCompetitorData));
        let fallback = CompetitiveAnalysis::failed(&err);
        assert_eq!(fallback.error.as_deref(), Some("No competitor data available"));
    }
}
