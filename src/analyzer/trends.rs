use crate::analyzer::market::{DEFAULT_GROWTH_RATE, or_default};
use crate::analyzer::to_strings;
use crate::model::RawIndustryData;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Outlook {
    pub market_maturity: String,
    pub competition_level: String,
    pub technology_focus: String,
    pub key_success_factors: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrendAnalysis {
    pub technology_trends: Vec<String>,
    pub market_trends: Vec<String>,
    pub business_model_trends: Vec<String>,
    pub regulatory_trends: Vec<String>,
    pub outlook_2025_2030: Outlook,
    pub growth_rate: f64,
}

pub fn trend_analysis(raw: &RawIndustryData) -> TrendAnalysis {
    info!("Analyzing industry trends");

    TrendAnalysis {
        technology_trends: to_strings(&[
            "Ultra-fast charging (350kW+) deployment",
            "Wireless/inductive charging development",
            "Smart grid integration and V2G capabilities",
            "AI-powered charging optimization",
            "Renewable energy integration",
        ]),
        market_trends: to_strings(&[
            "Shift from subsidies to market-driven growth",
            "Consolidation among smaller players",
            "Vertical integration by automakers",
            "Expansion into adjacent services",
            "Rural market development",
        ]),
        business_model_trends: to_strings(&[
            "Subscription-based charging plans",
            "Dynamic pricing strategies",
            "Fleet-focused solutions",
            "Charging-as-a-Service models",
            "Multi-modal transportation hubs",
        ]),
        regulatory_trends: to_strings(&[
            "Standardization requirements",
            "Interoperability mandates",
            "Grid modernization support",
            "Environmental impact assessments",
            "Data privacy regulations",
        ]),
        outlook_2025_2030: Outlook {
            market_maturity: "Rapid Growth Phase".into(),
            competition_level: "Intensifying".into(),
            technology_focus: "Ultra-fast charging and grid integration".into(),
            key_success_factors: to_strings(&[
                "Network density and coverage",
                "Charging speed and reliability",
                "Customer experience and pricing",
                "Strategic location acquisition",
            ]),
        },
        growth_rate: or_default(raw.market_sizing.growth_rate, DEFAULT_GROWTH_RATE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn growth_rate_comes_from_collected_data() {
        let mut raw = RawIndustryData::default();
        assert_eq!(trend_analysis(&raw).growth_rate, DEFAULT_GROWTH_RATE);

        raw.market_sizing.growth_rate = 31.0;
        let trends = trend_analysis(&raw);
        assert_eq!(trends.growth_rate, 31.0);
        assert_eq!(trends.outlook_2025_2030.key_success_factors.len(), 4);
    }
}
