// Porter's Five Forces and SWOT rubrics
use crate::analyzer::to_strings;
use crate::model::RawIndustryData;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForceAssessment {
    /// 1 (weak force) to 5 (very strong force).
    pub score: u8,
    pub factors: Vec<String>,
    pub assessment: String,
}

impl ForceAssessment {
    fn new(score: u8, factors: &[&str], assessment: &str) -> Self {
        Self {
            score,
            factors: to_strings(factors),
            assessment: assessment.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OverallAssessment {
    pub average_score: f64,
    pub attractiveness: String,
    pub key_recommendations: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortersForces {
    pub threat_of_new_entrants: ForceAssessment,
    pub bargaining_power_suppliers: ForceAssessment,
    pub bargaining_power_buyers: ForceAssessment,
    pub threat_of_substitutes: ForceAssessment,
    pub competitive_rivalry: ForceAssessment,
    pub overall_assessment: OverallAssessment,
}

impl PortersForces {
    /// The five forces in presentation order, with their display titles.
    pub fn forces(&self) -> [(&'static str, &ForceAssessment); 5] {
        [
            ("Threat of New Entrants", &self.threat_of_new_entrants),
            ("Bargaining Power of Suppliers", &self.bargaining_power_suppliers),
            ("Bargaining Power of Buyers", &self.bargaining_power_buyers),
            ("Threat of Substitutes", &self.threat_of_substitutes),
            ("Competitive Rivalry", &self.competitive_rivalry),
        ]
    }
}

/// Maps an average force score to an attractiveness band. Lower forces mean
/// a more attractive industry.
pub fn assess_attractiveness(score: f64) -> &'static str {
    if score <= 2.0 {
        "HIGHLY ATTRACTIVE"
    } else if score <= 3.0 {
        "MODERATELY ATTRACTIVE"
    } else if score <= 4.0 {
        "NEUTRAL"
    } else {
        "UNATTRACTIVE"
    }
}

pub fn porters_five_forces(_raw: &RawIndustryData) -> PortersForces {
    info!("Conducting Porter's Five Forces analysis");

    let mut forces = PortersForces {
        threat_of_new_entrants: ForceAssessment::new(
            4,
            &[
                "Low switching costs for consumers",
                "Government incentives attract new players",
                "Technology becoming more accessible",
                "Large capital requirements as barrier",
            ],
            "HIGH - Easy market entry but capital intensive",
        ),
        bargaining_power_suppliers: ForceAssessment::new(
            3,
            &[
                "Limited number of charging equipment manufacturers",
                "Dependence on electrical grid infrastructure",
                "Battery technology supplier concentration",
                "Growing supplier base reducing power",
            ],
            "MEDIUM - Concentrated suppliers but expanding",
        ),
        bargaining_power_buyers: ForceAssessment::new(
            4,
            &[
                "Multiple charging network options",
                "Price-sensitive consumer base",
                "Low switching costs between networks",
                "Government and fleet buyers have leverage",
            ],
            "HIGH - Consumers have multiple options",
        ),
        threat_of_substitutes: ForceAssessment::new(
            2,
            &[
                "Home charging as primary alternative",
                "Workplace charging availability",
                "Battery swapping in limited markets",
                "Hydrogen fuel cells long-term threat",
            ],
            "LOW - Limited substitutes for public fast charging",
        ),
        competitive_rivalry: ForceAssessment::new(
            5,
            &[
                "Numerous players entering market",
                "Rapid capacity expansion",
                "Price competition for prime locations",
                "Technology differentiation attempts",
            ],
            "VERY HIGH - Intense competition for market share",
        ),
        overall_assessment: OverallAssessment::default(),
    };

    let total: u32 = forces.forces().iter().map(|(_, f)| f.score as u32).sum();
    let average_score = total as f64 / 5.0;

    forces.overall_assessment = OverallAssessment {
        average_score,
        attractiveness: assess_attractiveness(average_score).into(),
        key_recommendations: to_strings(&[
            "Focus on differentiation through technology and service",
            "Secure prime locations quickly",
            "Build network effects and switching costs",
            "Consider vertical integration opportunities",
        ]),
    };

    forces
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StrategicOptions {
    #[serde(rename = "SO_strategies")]
    pub so_strategies: Vec<String>,
    #[serde(rename = "WO_strategies")]
    pub wo_strategies: Vec<String>,
    #[serde(rename = "ST_strategies")]
    pub st_strategies: Vec<String>,
    #[serde(rename = "WT_strategies")]
    pub wt_strategies: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SwotAnalysis {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub opportunities: Vec<String>,
    pub threats: Vec<String>,
    pub strategic_options: StrategicOptions,
}

pub fn swot_analysis(_raw: &RawIndustryData) -> SwotAnalysis {
    info!("Performing SWOT analysis");

    SwotAnalysis {
        strengths: to_strings(&[
            "Growing EV adoption driving demand",
            "Government policy support globally",
            "Technological advancement in charging speeds",
            "Established players with network effects",
            "Multiple revenue streams (charging, services, data)",
            "Environmental benefits alignment with trends",
        ]),
        weaknesses: to_strings(&[
            "High capital investment requirements",
            "Grid infrastructure limitations",
            "Utilization rates still developing",
            "Standardization challenges across networks",
            "Limited rural coverage",
            "Dependence on EV adoption rates",
        ]),
        opportunities: to_strings(&[
            "Massive untapped market potential",
            "Fleet electrification acceleration",
            "Integration with renewable energy",
            "Autonomous vehicle charging services",
            "Energy storage and grid services",
            "International market expansion",
            "Value-added services (retail, advertising)",
        ]),
        threats: to_strings(&[
            "Regulatory changes affecting incentives",
            "Competition from home/workplace charging",
            "Economic downturn reducing EV sales",
            "Technology disruption (battery swapping, wireless)",
            "Grid capacity constraints",
            "Commodity price volatility",
            "Potential market saturation in urban areas",
        ]),
        strategic_options: StrategicOptions {
            so_strategies: to_strings(&[
                "Leverage government support for rapid network expansion",
                "Use technology leadership to capture fleet market",
            ]),
            wo_strategies: to_strings(&[
                "Partner with utilities to address grid limitations",
                "Focus on high-traffic locations to improve utilization",
            ]),
            st_strategies: to_strings(&[
                "Build brand loyalty to defend against new entrants",
                "Diversify revenue streams beyond charging",
            ]),
            wt_strategies: to_strings(&[
                "Form strategic alliances to share capital burden",
                "Develop flexible business models for market changes",
            ]),
        },
    }
}
