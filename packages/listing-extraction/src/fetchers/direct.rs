//! Plain unrendered GET with a descriptive User-Agent.

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::error::{FetchError, FetchResult};
use crate::traits::fetcher::PageFetcher;

/// Fetches the listing page itself, without JavaScript rendering.
pub struct DirectFetcher {
    client: reqwest::Client,
    user_agent: String,
}

impl DirectFetcher {
    pub fn new(client: reqwest::Client, user_agent: impl Into<String>) -> Self {
        Self {
            client,
            user_agent: user_agent.into(),
        }
    }
}

#[async_trait]
impl PageFetcher for DirectFetcher {
    async fn fetch_html(&self, url: &Url) -> FetchResult<String> {
        debug!(url = %url, "Direct fetch starting");
        let endpoint = url.to_string();

        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml")
            .send()
            .await
            .map_err(|source| FetchError::Network {
                endpoint: endpoint.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|source| FetchError::Body { endpoint, source })
    }

    fn name(&self) -> &str {
        "direct"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sends_user_agent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/homedetails/1")
            .match_header("user-agent", "ListingBot/2.0")
            .with_status(200)
            .with_body("<html>ok</html>")
            .create_async()
            .await;

        let fetcher = DirectFetcher::new(reqwest::Client::new(), "ListingBot/2.0");
        let url = Url::parse(&format!("{}/homedetails/1", server.url())).unwrap();
        let html = fetcher.fetch_html(&url).await.unwrap();

        assert_eq!(html, "<html>ok</html>");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/gone")
            .with_status(404)
            .create_async()
            .await;

        let fetcher = DirectFetcher::new(reqwest::Client::new(), "ListingBot/2.0");
        let url = Url::parse(&format!("{}/gone", server.url())).unwrap();
        let err = fetcher.fetch_html(&url).await.unwrap_err();

        assert_eq!(err.status(), Some(404));
    }
}
