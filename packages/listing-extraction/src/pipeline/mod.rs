//! Scrape pipeline: retrieval, extraction, and normalization.
//!
//! The pipeline orchestrates:
//! - Strategy selection (actor job vs. HTML fetch)
//! - Structured-data extraction with candidate scoring
//! - Pattern and selector fallback for unresolved fields
//! - Normalization into a [`crate::CanonicalListing`]

pub mod extract;
pub mod listing_scraper;
pub mod normalize;

pub use extract::{extract_from_html, extract_from_record, ExtractionInputs};
pub use listing_scraper::ListingScraper;
pub use normalize::normalize;
