//! Property Listing Extraction Library
//!
//! Turns an arbitrary listing URL into a [`CanonicalListing`] even though
//! provider markup is unstable, partly rendered client-side, and never
//! agrees on field names.
//!
//! # Design Philosophy
//!
//! - Schema-agnostic: reward "looks like a property record", not an exact shape
//! - Every output field is present, with a sentinel when unresolved
//! - One bad script block never aborts an otherwise good extraction
//! - Credentials arrive through [`ScraperConfig`], never the environment
//!
//! # Usage
//!
//! ```rust,ignore
//! use listing_extraction::{ActorConfig, ListingScraper, ProxyConfig, ScraperConfig};
//!
//! let config = ScraperConfig::new()
//!     .with_proxy(ProxyConfig::new(scraper_api_key))
//!     .with_actor(ActorConfig::new(apify_token, "maxcopell/zillow-detail-scraper"));
//!
//! let scraper = ListingScraper::new(config)?;
//! let listing = scraper.scrape_property("https://www.redfin.com/home/123").await?;
//! ```
//!
//! # Modules
//!
//! - [`fetchers`] - Retrieval strategy, rendering proxy and direct fetch
//! - [`jobs`] - Browser-automation jobs and the bounded poll loop
//! - [`extractors`] - Structured data, pattern and selector fallback
//! - [`pipeline`] - Orchestration and normalization
//! - [`security`] - Credential handling and SSRF protection
//! - [`testing`] - Mock implementations for testing

pub mod cancel;
pub mod error;
pub mod extractors;
pub mod fetchers;
pub mod jobs;
pub mod pipeline;
pub mod security;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{FetchError, FetchResult, ScrapeError, ScrapeResult};
pub use fetchers::{
    DirectFetcher, ProxyFetcher, RetrievalFetcher, RetrievalStrategy, StrategySelector,
};
pub use jobs::{run_job, ApifyJobService};
pub use pipeline::{
    extract_from_html, extract_from_record, normalize, ExtractionInputs, ListingScraper,
};
pub use security::{SecretString, UrlValidator};
pub use traits::{JobService, PageFetcher};
pub use types::{
    candidate::{CandidateSource, ExtractionCandidate},
    config::{ActorConfig, PollConfig, ProxyConfig, ScraperConfig},
    job::{JobHandle, JobSnapshot, JobState},
    listing::{
        CanonicalListing, ListingDraft, ADDRESS_NOT_FOUND, NEIGHBORHOOD_NOT_SPECIFIED,
        NO_DESCRIPTION, PRICE_NOT_AVAILABLE,
    },
};

// Re-export tokio-util so callers can build cancellation tokens without a
// direct dependency.
pub use tokio_util::sync::CancellationToken;
