// Utility functions
use crate::model::RawIndustryData;
use serde::Serialize;

/// Formats a dollar amount with a B/M/K suffix.
pub fn format_currency(amount: f64) -> String {
    if amount >= 1_000_000_000.0 {
        format!("${:.1}B", amount / 1_000_000_000.0)
    } else if amount >= 1_000_000.0 {
        format!("${:.1}M", amount / 1_000_000.0)
    } else if amount >= 1_000.0 {
        format!("${:.1}K", amount / 1_000.0)
    } else {
        format!("${:.0}", amount)
    }
}

pub fn format_percentage(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{:.1}%", v))
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Compounds `value` at `rate_percent` per year for `years` years.
pub fn project(value: f64, rate_percent: f64, years: i32) -> f64 {
    value * (1.0 + rate_percent / 100.0).powi(years)
}

/// Compound annual growth rate in percent; 0 when any input is non-positive.
pub fn calculate_growth_rate(start_value: f64, end_value: f64, periods: u32) -> f64 {
    if start_value <= 0.0 || end_value <= 0.0 || periods == 0 {
        return 0.0;
    }
    ((end_value / start_value).powf(1.0 / periods as f64) - 1.0) * 100.0
}

/// First `max_chars` characters of `text`, cut on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Collapses whitespace and truncates with a trailing ellipsis.
pub fn clean_text(text: &str, max_length: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() > max_length {
        format!("{}...", truncate_chars(&collapsed, max_length))
    } else {
        collapsed
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DataQuality {
    pub completeness_score: f64,
    pub missing_fields: Vec<String>,
    pub quality_rating: String,
}

/// Rates how many of the three source categories produced data.
pub fn validate_data_quality(data: &RawIndustryData) -> DataQuality {
    let checks = [
        ("competitors", !data.competitors.is_empty()),
        (
            "industry_overview",
            !data.industry_overview.market_trends.is_empty()
                || !data.industry_overview.key_statistics.is_empty(),
        ),
        ("market_sizing", data.market_sizing.global_market_size > 0.0),
    ];

    let missing_fields: Vec<String> = checks
        .iter()
        .filter(|(_, present)| !present)
        .map(|(name, _)| name.to_string())
        .collect();
    let present = checks.len() - missing_fields.len();
    let completeness_score = present as f64 / checks.len() as f64 * 100.0;

    let quality_rating = if completeness_score >= 80.0 {
        "Excellent"
    } else if completeness_score >= 60.0 {
        "Good"
    } else if completeness_score >= 40.0 {
        "Fair"
    } else {
        "Poor"
    };

    DataQuality {
        completeness_score,
        missing_fields,
        quality_rating: quality_rating.into(),
    }
}

/// Four-sentence summary; unknown size, rate or leader read `N/A`.
pub fn executive_summary(market_size: Option<f64>, growth_rate: Option<f64>, top_player: Option<&str>) -> String {
    format!(
        "The global EV charging market is valued at {} with an annual growth rate of {}. \
         {} currently leads the market through technological innovation and network effects. \
         The industry shows high growth potential driven by government mandates and declining EV costs. \
         Market fragmentation presents consolidation opportunities for strategic players.",
        market_size.map_or_else(|| "N/A".to_string(), |v| format!("${:.1}B", v)),
        format_percentage(growth_rate),
        top_player.unwrap_or("N/A")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CompetitorProfile;

    #[test]
    fn currency_suffixes() {
        assert_eq!(format_currency(15_200_000_000.0), "$15.2B");
        assert_eq!(format_currency(2_500_000.0), "$2.5M");
        assert_eq!(format_currency(45_000.0), "$45.0K");
        assert_eq!(format_currency(999.0), "$999");
    }

    #[test]
    fn percentage_formatting() {
        assert_eq!(format_percentage(Some(28.456)), "28.5%");
        assert_eq!(format_percentage(None), "N/A");
    }

    #[test]
    fn projection_compounds_yearly() {
        let v = project(100.0, 10.0, 2);
        assert!((v - 121.0).abs() < 1e-9);
        assert_eq!(project(15.2, 28.5, 0), 15.2);
    }

    #[test]
    fn cagr_inverts_projection() {
        let end = project(15.2, 28.5, 5);
        assert!((calculate_growth_rate(15.2, end, 5) - 28.5).abs() < 1e-9);
        assert_eq!(calculate_growth_rate(0.0, 10.0, 5), 0.0);
        assert_eq!(calculate_growth_rate(1.0, 10.0, 0), 0.0);
    }

    #[test]
    fn clean_text_collapses_and_truncates() {
        assert_eq!(clean_text("  a   b\n c ", 100), "a b c");
        assert_eq!(clean_text("abcdef", 3), "abc...");
        assert_eq!(truncate_chars("héllo", 2), "hé");
    }

    #[test]
    fn quality_of_empty_data_is_poor() {
        let q = validate_data_quality(&RawIndustryData::default());
        assert_eq!(q.completeness_score, 0.0);
        assert_eq!(q.quality_rating, "Poor");
        assert_eq!(q.missing_fields.len(), 3);
    }

    #[test]
    fn quality_with_two_of_three_is_good() {
        let mut data = RawIndustryData::default();
        data.competitors.push(CompetitorProfile::default());
        data.market_sizing.global_market_size = 15.2;
        let q = validate_data_quality(&data);
        assert_eq!(q.quality_rating, "Good");
        assert_eq!(q.missing_fields, vec!["industry_overview".to_string()]);
    }

    #[test]
    fn summary_mentions_top_player() {
        let s = executive_summary(Some(15.2), Some(28.5), Some("Tesla Supercharger"));
        assert!(s.starts_with("The global EV charging market is valued at $15.2B with an annual growth rate of 28.5%."));
        assert!(s.contains("Tesla Supercharger currently leads"));
    }

    #[test]
    fn summary_without_numbers_reads_na() {
        let s = executive_summary(None, None, None);
        assert!(s.starts_with("The global EV charging market is valued at N/A with an annual growth rate of N/A."));
        assert!(s.contains("N/A currently leads"));
    }
}
