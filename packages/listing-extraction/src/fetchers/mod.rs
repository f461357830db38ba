//! HTML retrieval: direct GET, rendering proxy, and the strategy selector.

pub mod direct;
pub mod proxy;
pub mod retrieval;
pub mod strategy;

use std::time::Duration;

pub use direct::DirectFetcher;
pub use proxy::ProxyFetcher;
pub use retrieval::RetrievalFetcher;
pub use strategy::{RetrievalStrategy, StrategySelector};

use crate::error::{FetchError, FetchResult};
use crate::security::UrlValidator;

/// Most redirects followed by the guarded client.
pub const MAX_REDIRECTS: usize = 10;

/// Shared HTTP client for the proxy and the job service.
pub fn build_http_client(timeout: Duration) -> FetchResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(FetchError::Client)
}

/// Client for fetching caller-supplied URLs: every redirect target goes
/// through `validator`, and a blocked target stops the chain with the
/// redirect response itself.
pub fn build_guarded_client(
    timeout: Duration,
    validator: UrlValidator,
) -> FetchResult<reqwest::Client> {
    let policy = reqwest::redirect::Policy::custom(move |attempt| {
        if attempt.previous().len() >= MAX_REDIRECTS {
            attempt.error("too many redirects")
        } else if let Err(e) = validator.validate(attempt.url().as_str()) {
            tracing::warn!(error = %e, "Refusing redirect");
            attempt.stop()
        } else {
            attempt.follow()
        }
    });

    reqwest::Client::builder()
        .timeout(timeout)
        .redirect(policy)
        .build()
        .map_err(FetchError::Client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    use crate::traits::fetcher::PageFetcher;

    #[tokio::test]
    async fn test_guarded_client_refuses_private_redirect() {
        let mut server = mockito::Server::new_async().await;
        let redirect = server
            .mock("GET", "/listing/1")
            .with_status(302)
            .with_header("location", "http://169.254.169.254/latest/meta-data")
            .create_async()
            .await;

        let validator = UrlValidator::new().allow_host("127.0.0.1");
        let client = build_guarded_client(Duration::from_secs(5), validator).unwrap();
        let fetcher = DirectFetcher::new(client, "ListingBot/2.0");
        let url = Url::parse(&format!("{}/listing/1", server.url())).unwrap();

        let err = fetcher.fetch_html(&url).await.unwrap_err();

        assert_eq!(err.status(), Some(302));
        redirect.assert_async().await;
    }

    #[tokio::test]
    async fn test_guarded_client_follows_allowed_redirect() {
        let mut server = mockito::Server::new_async().await;
        let target = format!("{}/listing/2", server.url());
        server
            .mock("GET", "/listing/1")
            .with_status(301)
            .with_header("location", &target)
            .create_async()
            .await;
        server
            .mock("GET", "/listing/2")
            .with_status(200)
            .with_body("<h1>2 Elm St</h1>")
            .create_async()
            .await;

        let validator = UrlValidator::new().allow_host("127.0.0.1");
        let client = build_guarded_client(Duration::from_secs(5), validator).unwrap();
        let fetcher = DirectFetcher::new(client, "ListingBot/2.0");
        let url = Url::parse(&format!("{}/listing/1", server.url())).unwrap();

        assert_eq!(fetcher.fetch_html(&url).await.unwrap(), "<h1>2 Elm St</h1>");
    }
}
