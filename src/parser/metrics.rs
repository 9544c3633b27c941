// Regex extraction of market size, growth rate and station counts
use crate::model::ExtractedMetrics;
use regex::Regex;
use std::sync::LazyLock;

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("static pattern"))
        .collect()
}

static MARKET_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"market.*?(\d+\.?\d*)\s*billion",
        r"worth.*?(\d+\.?\d*)\s*billion",
        r"valued.*?(\d+\.?\d*)\s*billion",
        r"\$(\d+\.?\d*)\s*billion",
    ])
});

static GROWTH_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"grow.*?(\d+\.?\d*)%",
        r"growth.*?(\d+\.?\d*)%",
        r"increase.*?(\d+\.?\d*)%",
    ])
});

static STATION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(\d+,?\d*)\s*charging\s*stations",
        r"(\d+,?\d*)\s*stations",
        r"(\d+,?\d*)\s*chargers",
    ])
});

/// Extracts whatever numeric facts the text mentions. Matching is done on
/// the lowercased text; for each metric the first pattern with a parseable
/// leftmost match wins.
pub fn extract_metrics(text: &str) -> ExtractedMetrics {
    let lower = text.to_lowercase();

    ExtractedMetrics {
        market_value_billion: first_number(&MARKET_PATTERNS, &lower, |s| s.to_string()),
        growth_rate: first_number(&GROWTH_PATTERNS, &lower, |s| s.to_string()),
        station_count: first_number(&STATION_PATTERNS, &lower, |s| s.replace(',', "")),
    }
}

fn first_number(patterns: &[Regex], text: &str, clean: impl Fn(&str) -> String) -> Option<f64> {
    patterns.iter().find_map(|re| {
        re.captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| clean(m.as_str()).parse::<f64>().ok())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_all_three_metrics() {
        let text = "The global charging Market is worth 12.4 Billion dollars. \
                    Installations continue to grow by 31.5% a year, reaching 1,500 charging stations.";
        let m = extract_metrics(text);
        assert_eq!(m.market_value_billion, Some(12.4));
        assert_eq!(m.growth_rate, Some(31.5));
        assert_eq!(m.station_count, Some(1500.0));
    }

    #[test]
    fn earlier_pattern_wins_over_earlier_text() {
        // "valued" appears first in the text but the "market" pattern is tried first.
        let text = "valued at 5 billion in 2019; the market reached 20 billion";
        assert_eq!(extract_metrics(text).market_value_billion, Some(20.0));
    }

    #[test]
    fn dollar_pattern_is_the_last_resort() {
        let m = extract_metrics("Investments of $7.5 billion were announced.");
        assert_eq!(m.market_value_billion, Some(7.5));
    }

    #[test]
    fn falls_back_to_plain_station_and_charger_patterns() {
        assert_eq!(extract_metrics("about 800 stations nationwide").station_count, Some(800.0));
        assert_eq!(extract_metrics("it operates 42 chargers").station_count, Some(42.0));
    }

    #[test]
    fn increase_pattern_finds_growth() {
        let m = extract_metrics("sales saw an increase of 12%");
        assert_eq!(m.growth_rate, Some(12.0));
    }

    #[test]
    fn patterns_do_not_span_lines() {
        let m = extract_metrics("market\n10 billion");
        assert_eq!(m.market_value_billion, None);
    }

    #[test]
    fn nothing_found_in_unrelated_text() {
        assert!(extract_metrics("Nothing numeric to see here.").is_empty());
    }
}
