//! Proxy-then-direct retrieval.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

use crate::error::FetchResult;
use crate::traits::fetcher::PageFetcher;

/// Tries the rendering proxy (when configured) and falls back to a direct
/// fetch exactly once on any proxy failure.
///
/// No retries or backoff beyond that single fallback. When both attempts
/// fail, the direct attempt's error is returned.
pub struct RetrievalFetcher {
    proxy: Option<Arc<dyn PageFetcher>>,
    direct: Arc<dyn PageFetcher>,
}

impl RetrievalFetcher {
    pub fn new(proxy: Option<Arc<dyn PageFetcher>>, direct: Arc<dyn PageFetcher>) -> Self {
        Self { proxy, direct }
    }

    /// Direct fetch only.
    pub fn direct_only(direct: Arc<dyn PageFetcher>) -> Self {
        Self::new(None, direct)
    }

    pub fn has_proxy(&self) -> bool {
        self.proxy.is_some()
    }
}

#[async_trait]
impl PageFetcher for RetrievalFetcher {
    async fn fetch_html(&self, url: &Url) -> FetchResult<String> {
        if let Some(proxy) = &self.proxy {
            match proxy.fetch_html(url).await {
                Ok(html) => {
                    debug!(url = %url, fetcher = proxy.name(), bytes = html.len(), "Fetched page");
                    return Ok(html);
                }
                Err(e) => {
                    warn!(
                        url = %url,
                        fetcher = proxy.name(),
                        error = %e,
                        "Proxy fetch failed, falling back to direct fetch"
                    );
                }
            }
        }

        let html = self.direct.fetch_html(url).await?;
        debug!(url = %url, fetcher = self.direct.name(), bytes = html.len(), "Fetched page");
        Ok(html)
    }

    fn name(&self) -> &str {
        if self.proxy.is_some() {
            "proxy+direct"
        } else {
            "direct"
        }
    }
}
