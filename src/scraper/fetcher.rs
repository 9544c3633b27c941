use crate::model::ScraperError;
use crate::scraper::traits::Fetcher;

use reqwest::Client;
use std::time::Duration;

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout_secs: u64) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ScraperError::HttpError(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, ScraperError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                ScraperError::Timeout
            } else {
                ScraperError::HttpError(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::InvalidResponse(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| ScraperError::HttpError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, http::StatusCode, routing::get};
    use tokio::net::TcpListener;

    async fn spawn_site() -> String {
        let app = Router::new()
            .route("/ok", get(|| async { "<p>hi</p>" }))
            .route("/down", get(|| async { StatusCode::SERVICE_UNAVAILABLE }))
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    "late"
                }),
            );
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn maps_status_and_timeout_errors() {
        let base = spawn_site().await;
        let fetcher = HttpFetcher::new("charge-insight-test", 1).unwrap();

        assert_eq!(fetcher.fetch(&format!("{}/ok", base)).await.unwrap(), "<p>hi</p>");
        assert!(matches!(
            fetcher.fetch(&format!("{}/down", base)).await,
            Err(ScraperError::InvalidResponse(503))
        ));
        assert!(matches!(
            fetcher.fetch(&format!("{}/slow", base)).await,
            Err(ScraperError::Timeout)
        ));
    }

    #[tokio::test]
    async fn refused_connection_is_http_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let fetcher = HttpFetcher::new("charge-insight-test", 1).unwrap();
        let result = fetcher.fetch(&format!("http://{}/", addr)).await;
        assert!(matches!(result, Err(ScraperError::HttpError(_))), "{:?}", result);
    }
}
