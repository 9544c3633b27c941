// Scraper module: page fetching and HTML-to-text extraction.

pub mod fetcher;
pub mod text;
pub mod traits;

pub use fetcher::HttpFetcher;
pub use traits::Fetcher;

use crate::model::ScraperError;
use tracing::info;

/// Fetches `url` and returns its readable text. The article paragraphs are
/// preferred; the whole page text is the fallback.
pub async fn page_text(fetcher: &dyn Fetcher, url: &str) -> Result<String, ScraperError> {
    info!("Fetching content from: {}", url);
    let html = fetcher.fetch(url).await?;

    let main = text::extract_main_text(&html);
    if !main.is_empty() {
        return Ok(main);
    }
    Ok(text::extract_page_text(&html))
}
