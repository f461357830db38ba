// Listing Scraper - HTTP API
//
// Thin axum layer over the listing-extraction library: configuration from the
// environment, the scrape endpoint, health check and graceful shutdown.

pub mod config;
pub mod server;

pub use config::*;
