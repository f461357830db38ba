//! The top-level scraper: URL in, canonical listing out.

use chrono::Utc;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::extract::{extract_from_html, extract_from_record};
use super::normalize::normalize;
use crate::cancel;
use crate::error::{ScrapeError, ScrapeResult};
use crate::fetchers::{
    build_guarded_client, build_http_client, DirectFetcher, ProxyFetcher, RetrievalFetcher,
    RetrievalStrategy, StrategySelector,
};
use crate::jobs::{run_job, ApifyJobService};
use crate::security::UrlValidator;
use crate::traits::{fetcher::PageFetcher, job_service::JobService};
use crate::types::config::{PollConfig, ScraperConfig};
use crate::types::listing::CanonicalListing;

/// Scrapes property listings.
///
/// Holds no per-request state, so one instance can serve concurrent scrapes
/// (wrap it in an `Arc`).
///
/// # Example
///
/// ```rust,ignore
/// use listing_extraction::{ListingScraper, ProxyConfig, ScraperConfig};
///
/// let config = ScraperConfig::new().with_proxy(ProxyConfig::new(api_key));
/// let scraper = ListingScraper::new(config)?;
/// let listing = scraper.scrape_property("https://homes.example.org/l/1").await?;
/// println!("{} - {}", listing.address, listing.price);
/// ```
pub struct ListingScraper {
    strategy: StrategySelector,
    fetcher: Arc<dyn PageFetcher>,
    jobs: Option<Arc<dyn JobService>>,
    validator: UrlValidator,
    poll: PollConfig,
    has_proxy: bool,
}

impl ListingScraper {
    /// Build the production stack from explicit configuration.
    ///
    /// A proxy with an empty API key counts as unconfigured. With
    /// `block_private_networks` set, hostnames are resolved and checked before
    /// HTML is fetched and direct-fetch redirects are validated hop by hop.
    pub fn new(config: ScraperConfig) -> ScrapeResult<Self> {
        let client = build_http_client(config.request_timeout)?;
        let validator = validator_for(&config);

        let direct_client = if config.block_private_networks {
            build_guarded_client(config.request_timeout, validator.clone())?
        } else {
            client.clone()
        };
        let direct: Arc<dyn PageFetcher> =
            Arc::new(DirectFetcher::new(direct_client, config.user_agent.as_str()));
        let proxy: Option<Arc<dyn PageFetcher>> = match &config.proxy {
            Some(proxy) if !proxy.api_key.is_empty() => {
                Some(Arc::new(ProxyFetcher::new(client.clone(), proxy.clone())?))
            }
            Some(_) => {
                warn!("Proxy configured without an API key, using direct fetch only");
                None
            }
            None => None,
        };
        let fetcher = Arc::new(RetrievalFetcher::new(proxy, direct));

        let jobs = config.actor.as_ref().map(|actor| {
            Arc::new(ApifyJobService::new(actor, client.clone())) as Arc<dyn JobService>
        });

        let has_proxy = fetcher.has_proxy();
        let mut scraper = Self::with_components(&config, fetcher, jobs);
        scraper.has_proxy = has_proxy;
        if config.block_private_networks {
            scraper.validator = validator.with_dns_check();
        }
        Ok(scraper)
    }

    /// Assemble a scraper from explicit parts (tests, custom providers).
    ///
    /// Input URLs are checked without DNS resolution; pass a validator built
    /// with [`UrlValidator::with_dns_check`] to [`Self::with_validator`] to
    /// add it.
    pub fn with_components(
        config: &ScraperConfig,
        fetcher: Arc<dyn PageFetcher>,
        jobs: Option<Arc<dyn JobService>>,
    ) -> Self {
        Self {
            strategy: StrategySelector::new(config.actor_hosts.clone(), jobs.is_some()),
            fetcher,
            jobs,
            validator: validator_for(config),
            poll: config.poll,
            has_proxy: false,
        }
    }

    /// Replace the input URL validator.
    pub fn with_validator(mut self, validator: UrlValidator) -> Self {
        self.validator = validator;
        self
    }

    /// True when HTML retrieval goes through the rendering proxy first.
    pub fn has_proxy(&self) -> bool {
        self.has_proxy
    }

    /// True when browser-automation jobs are available.
    pub fn has_actor(&self) -> bool {
        self.jobs.is_some()
    }

    /// Scrape one listing URL.
    pub async fn scrape_property(&self, url: &str) -> ScrapeResult<CanonicalListing> {
        self.scrape_property_with_cancel(url, &CancellationToken::new())
            .await
    }

    /// Scrape one listing URL, aborting at the next suspension point once
    /// `cancel` fires.
    pub async fn scrape_property_with_cancel(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> ScrapeResult<CanonicalListing> {
        let target = self.validator.validate(url)?;
        let strategy = self.strategy.select(&target);
        info!(url = %target, strategy = %strategy, "Scraping listing");

        let inputs = match (strategy, &self.jobs) {
            (RetrievalStrategy::ActorJob, Some(jobs)) => {
                let record = run_job(jobs.as_ref(), &target, self.poll, cancel).await?;
                extract_from_record(&record, &target)
            }
            _ => {
                let html = cancel::with_cancel(cancel, async {
                    self.validator.check_resolved(&target).await?;
                    self.fetcher
                        .fetch_html(&target)
                        .await
                        .map_err(ScrapeError::from)
                })
                .await?;
                extract_from_html(&html, &target)
            }
        };

        let listing = normalize(&inputs, url, Utc::now());
        let source = inputs
            .source
            .map_or_else(|| "none".to_string(), |source| source.to_string());
        info!(
            url = %target,
            strategy = %strategy,
            source = %source,
            resolved_fields = listing.resolved_field_count(),
            "Listing scraped"
        );
        Ok(listing)
    }
}

fn validator_for(config: &ScraperConfig) -> UrlValidator {
    if config.block_private_networks {
        UrlValidator::new()
    } else {
        UrlValidator::allow_private_networks()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockJobService, MockPageFetcher};
    use crate::types::config::{ActorConfig, ProxyConfig};
    use crate::types::job::JobState;
    use serde_json::json;
    use std::time::Duration;

    fn config() -> ScraperConfig {
        ScraperConfig::new().with_poll(PollConfig::new(
            Duration::from_millis(1),
            Duration::from_secs(5),
        ))
    }

    #[test]
    fn test_new_reports_configured_providers() {
        let plain = ListingScraper::new(ScraperConfig::new()).unwrap();
        assert!(!plain.has_proxy());
        assert!(!plain.has_actor());

        let full = ListingScraper::new(
            ScraperConfig::new()
                .with_proxy(ProxyConfig::new("key"))
                .with_actor(ActorConfig::new("token", "owner/actor")),
        )
        .unwrap();
        assert!(full.has_proxy());
        assert!(full.has_actor());

        let blank_key =
            ListingScraper::new(ScraperConfig::new().with_proxy(ProxyConfig::new(""))).unwrap();
        assert!(!blank_key.has_proxy());
    }

    #[tokio::test]
    async fn test_invalid_input_fails_before_fetching() {
        let fetcher = Arc::new(MockPageFetcher::new());
        let scraper = ListingScraper::with_components(&config(), fetcher.clone(), None);

        for bad in ["", "not a url", "ftp://example.org/x", "http://127.0.0.1/admin"] {
            let err = scraper.scrape_property(bad).await.unwrap_err();
            assert!(err.is_client_error(), "{bad:?} gave {err:?}");
        }
        assert_eq!(fetcher.call_count(), 0);
    }

    #[tokio::test]
    async fn test_actor_host_routes_to_job_service() {
        let fetcher = Arc::new(MockPageFetcher::new());
        let jobs = Arc::new(
            MockJobService::new()
                .with_states([JobState::Running, JobState::Succeeded])
                .with_items(vec![json!({
                    "address": {"streetAddress": "42 Lake Dr"},
                    "price": 615000,
                    "bedrooms": 4,
                    "bathrooms": 3,
                    "livingArea": 2650
                })]),
        );
        let scraper =
            ListingScraper::with_components(&config(), fetcher.clone(), Some(jobs.clone()));

        let listing = scraper
            .scrape_property("https://www.zillow.com/homedetails/42_zpid/")
            .await
            .unwrap();

        assert_eq!(listing.address, "42 Lake Dr");
        assert_eq!(listing.price, "$615,000");
        assert_eq!(listing.square_feet, 2650);
        assert_eq!(jobs.poll_count(), 2);
        assert_eq!(fetcher.call_count(), 0);
    }

    #[tokio::test]
    async fn test_other_hosts_fetch_html_even_with_actor() {
        let fetcher = Arc::new(MockPageFetcher::new().with_html("<h1>10 Bay St</h1>"));
        let jobs = Arc::new(MockJobService::new());
        let scraper =
            ListingScraper::with_components(&config(), fetcher.clone(), Some(jobs.clone()));

        let listing = scraper
            .scrape_property("https://www.redfin.com/home/10")
            .await
            .unwrap();

        assert_eq!(listing.address, "10 Bay St");
        assert_eq!(fetcher.call_count(), 1);
        assert!(jobs.calls().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_surfaces() {
        let fetcher = Arc::new(MockPageFetcher::new().with_status_error(503));
        let scraper = ListingScraper::with_components(&config(), fetcher, None);

        let err = scraper
            .scrape_property("https://homes.example.org/l/1")
            .await
            .unwrap_err();

        assert!(matches!(err, ScrapeError::Fetch(_)));
        assert!(!err.is_client_error());
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let fetcher = Arc::new(MockPageFetcher::new());
        let scraper = ListingScraper::with_components(&config(), fetcher, None);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = scraper
            .scrape_property_with_cancel("https://homes.example.org/l/1", &cancel)
            .await
            .unwrap_err();

        assert!(matches!(err, ScrapeError::Cancelled));
    }

    #[tokio::test]
    async fn test_listing_url_is_echoed() {
        let fetcher = Arc::new(MockPageFetcher::new());
        let scraper = ListingScraper::with_components(&config(), fetcher, None);

        let listing = scraper
            .scrape_property("https://homes.example.org/l/1?ref=Mail")
            .await
            .unwrap();

        assert_eq!(listing.listing_url, "https://homes.example.org/l/1?ref=Mail");
    }

    #[tokio::test]
    async fn test_mapped_loopback_is_rejected() {
        let fetcher = Arc::new(MockPageFetcher::new());
        let scraper = ListingScraper::with_components(&config(), fetcher.clone(), None)
            .with_validator(UrlValidator::new().with_dns_check());

        let err = scraper
            .scrape_property("http://[::ffff:127.0.0.1]:8080/listing")
            .await
            .unwrap_err();

        assert!(err.is_client_error());
        assert_eq!(fetcher.call_count(), 0);
    }

    #[tokio::test]
    async fn test_unresolvable_host_is_rejected_before_fetch() {
        let fetcher = Arc::new(MockPageFetcher::new());
        let scraper = ListingScraper::with_components(&config(), fetcher.clone(), None)
            .with_validator(UrlValidator::new().with_dns_check());

        let err = scraper
            .scrape_property("https://listing.invalid/home/1")
            .await
            .unwrap_err();

        assert!(err.is_client_error());
        assert_eq!(fetcher.call_count(), 0);
    }
}
