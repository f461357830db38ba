//! Page fetcher trait.

use async_trait::async_trait;
use url::Url;

use crate::error::FetchResult;

/// Retrieves the raw HTML of a listing page.
///
/// Implementations make at most one outbound request per call; retry and
/// fallback policy lives in [`crate::fetchers::RetrievalFetcher`].
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the page body as text.
    async fn fetch_html(&self, url: &Url) -> FetchResult<String>;

    /// Short name used in log fields.
    fn name(&self) -> &str;
}
