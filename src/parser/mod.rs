// Parser module: pulls market numbers out of scraped text.

pub mod metrics;

pub use metrics::extract_metrics;
