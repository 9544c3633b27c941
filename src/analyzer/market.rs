use crate::analyzer::to_strings;
use crate::model::{RawIndustryData, RegionShare, YearValue};
use crate::utils::{calculate_growth_rate, project, round1};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Billion USD, used when no page yields a market size.
pub const DEFAULT_MARKET_SIZE: f64 = 15.2;
/// Percent per year, used when no page yields a growth rate.
pub const DEFAULT_GROWTH_RATE: f64 = 28.5;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeyMetrics {
    pub stations_per_million_people: u32,
    pub average_utilization_rate: f64,
    pub revenue_per_station_annual: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CurrentMarket {
    pub global_value_billion: f64,
    pub annual_growth_rate: f64,
    pub key_metrics: KeyMetrics,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddressableMarket {
    pub tam_billion: f64,
    pub sam_billion: f64,
    pub som_billion: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PenetrationAnalysis {
    pub current_penetration: f64,
    pub projected_2030: f64,
    pub saturation_timeline: String,
    /// CAGR implied by the first and last projection points.
    pub implied_cagr: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketSizing {
    pub current_market: CurrentMarket,
    pub projections: Vec<YearValue>,
    pub addressable_market: AddressableMarket,
    pub regional_analysis: Vec<RegionShare>,
    pub market_drivers: Vec<String>,
    pub penetration_analysis: PenetrationAnalysis,
}

impl MarketSizing {
    /// Chart series: the current value followed by every projection. The
    /// first label is the year before the first projection.
    pub fn growth_series(&self) -> (Vec<String>, Vec<f64>) {
        let base_label = self
            .projections
            .first()
            .map_or_else(|| "Current".to_string(), |p| (p.year - 1).to_string());

        let mut labels = vec![base_label];
        let mut values = vec![self.current_market.global_value_billion];
        for point in &self.projections {
            labels.push(point.year.to_string());
            values.push(point.value_billion);
        }
        (labels, values)
    }
}

/// Year-by-year forecast after `base_year`, compounded from `size`.
pub fn compound_forecast(size: f64, rate_percent: f64, base_year: i32, horizon_years: u32) -> Vec<YearValue> {
    (1..=forecast_span(horizon_years))
        .map(|ahead| YearValue {
            year: base_year.saturating_add(ahead),
            value_billion: round1(project(size, rate_percent, ahead)),
        })
        .collect()
}

fn forecast_span(horizon_years: u32) -> i32 {
    i32::try_from(horizon_years).unwrap_or(i32::MAX)
}

pub fn regional_breakdown() -> Vec<RegionShare> {
    [
        ("North America", 35.0),
        ("Europe", 30.0),
        ("Asia Pacific", 28.0),
        ("Rest of World", 7.0),
    ]
    .into_iter()
    .map(|(region, share)| RegionShare {
        region: region.into(),
        share,
    })
    .collect()
}

pub fn or_default(value: f64, default: f64) -> f64 {
    if value > 0.0 { value } else { default }
}

pub fn market_sizing(raw: &RawIndustryData) -> MarketSizing {
    info!("Calculating market sizing");

    let data = &raw.market_sizing;
    let current = or_default(data.global_market_size, DEFAULT_MARKET_SIZE);
    let growth = or_default(data.growth_rate, DEFAULT_GROWTH_RATE);

    let addressable_market = AddressableMarket {
        tam_billion: 180.0,
        sam_billion: 85.0,
        som_billion: 25.0,
    };

    let implied_cagr = match data.forecast.last() {
        Some(last) => round1(calculate_growth_rate(current, last.value_billion, data.forecast.len() as u32)),
        None => 0.0,
    };

    let penetration_analysis = PenetrationAnalysis {
        current_penetration: round1(current / addressable_market.tam_billion * 100.0),
        projected_2030: 18.5,
        saturation_timeline: "2035-2040".into(),
        implied_cagr,
    };

    MarketSizing {
        current_market: CurrentMarket {
            global_value_billion: current,
            annual_growth_rate: growth,
            key_metrics: KeyMetrics {
                stations_per_million_people: 125,
                average_utilization_rate: 0.15,
                revenue_per_station_annual: 45_000.0,
            },
        },
        projections: data.forecast.clone(),
        addressable_market,
        regional_analysis: data.regional_breakdown.clone(),
        market_drivers: to_strings(&[
            "Government EV mandates and incentives",
            "Declining EV battery costs",
            "Expanding EV model availability",
            "Corporate sustainability commitments",
            "Improving charging technology",
        ]),
        penetration_analysis,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MarketSizingData;

    #[test]
    fn forecast_matches_compound_formula() {
        let forecast = compound_forecast(15.2, 28.5, 2024, 5);
        assert_eq!(forecast.len(), 5);
        assert_eq!(forecast[0].year, 2025);
        assert_eq!(forecast[4].year, 2029);
        for point in &forecast {
            let years = point.year - 2024;
            let expected = 15.2 * 1.285_f64.powi(years);
            assert!((point.value_billion - expected).abs() <= 0.05 + 1e-9);
        }
        assert_eq!(forecast[0].value_billion, 19.5);
    }

    #[test]
    fn zero_horizon_gives_empty_forecast() {
        assert!(compound_forecast(10.0, 5.0, 2024, 0).is_empty());
    }

    #[test]
    fn oversized_horizon_saturates_instead_of_wrapping() {
        assert_eq!(forecast_span(5), 5);
        assert_eq!(forecast_span(u32::MAX), i32::MAX);
        assert_eq!(forecast_span(i32::MAX as u32 + 1), i32::MAX);
    }

    #[test]
    fn sizing_uses_defaults_for_missing_values() {
        let sizing = market_sizing(&RawIndustryData::default());
        assert_eq!(sizing.current_market.global_value_billion, DEFAULT_MARKET_SIZE);
        assert_eq!(sizing.current_market.annual_growth_rate, DEFAULT_GROWTH_RATE);
        assert_eq!(sizing.penetration_analysis.current_penetration, 8.4);
        assert_eq!(sizing.penetration_analysis.implied_cagr, 0.0);
        assert!(sizing.projections.is_empty());
    }

    #[test]
    fn sizing_carries_collected_data() {
        let raw = RawIndustryData {
            market_sizing: MarketSizingData {
                global_market_size: 36.0,
                growth_rate: 10.0,
                regional_breakdown: regional_breakdown(),
                forecast: compound_forecast(36.0, 10.0, 2024, 5),
            },
            ..RawIndustryData::default()
        };
        let sizing = market_sizing(&raw);
        assert_eq!(sizing.penetration_analysis.current_penetration, 20.0);
        assert_eq!(sizing.regional_analysis.len(), 4);
        assert_eq!(sizing.projections.len(), 5);
        assert!((sizing.penetration_analysis.implied_cagr - 10.0).abs() <= 0.1);

        let (labels, values) = sizing.growth_series();
        assert_eq!(labels.first().map(String::as_str), Some("2024"));
        assert_eq!(labels.len(), 6);
        assert_eq!(values[0], 36.0);
        assert_eq!(values[1], 39.6);
    }
}
