//! Rendering proxy fetcher (ScraperAPI-style query interface).
//!
//! `GET {base}?api_key=..&url=..&render=true&country_code=us[&premium=true]`

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::error::{FetchError, FetchResult, ScrapeError, ScrapeResult};
use crate::traits::fetcher::PageFetcher;
use crate::types::config::{host_matches, ProxyConfig};

/// Fetches pages through a proxy that executes JavaScript before returning HTML.
pub struct ProxyFetcher {
    client: reqwest::Client,
    config: ProxyConfig,
    base_url: Url,
}

impl ProxyFetcher {
    pub fn new(client: reqwest::Client, config: ProxyConfig) -> ScrapeResult<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| ScrapeError::Configuration {
            reason: format!("invalid proxy base URL {:?}: {}", config.base_url, e),
        })?;
        Ok(Self {
            client,
            config,
            base_url,
        })
    }

    /// True when the target host is on the premium (residential) list.
    fn is_premium(&self, target: &Url) -> bool {
        let host = target.host_str().unwrap_or_default();
        self.config
            .premium_hosts
            .iter()
            .any(|pattern| host_matches(host, pattern))
    }

    /// Full request URL, api key included. Never log this.
    fn request_url(&self, target: &Url) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("api_key", self.config.api_key.expose())
                .append_pair("url", target.as_str());
            if self.config.render {
                query.append_pair("render", "true");
            }
            query.append_pair("country_code", &self.config.country_code);
            if self.is_premium(target) {
                query.append_pair("premium", "true");
            }
        }
        url
    }
}

#[async_trait]
impl PageFetcher for ProxyFetcher {
    async fn fetch_html(&self, url: &Url) -> FetchResult<String> {
        let premium = self.is_premium(url);
        debug!(url = %url, premium, "Proxy fetch starting");

        // Log-safe endpoint: the proxy root, never the keyed request URL.
        let endpoint = self.base_url.to_string();

        let response = self
            .client
            .get(self.request_url(url))
            .send()
            .await
            .map_err(|e| FetchError::Network {
                endpoint: endpoint.clone(),
                source: e.without_url(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| FetchError::Body {
            endpoint,
            source: e.without_url(),
        })
    }

    fn name(&self) -> &str {
        "proxy"
    }
}
