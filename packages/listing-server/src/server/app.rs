use std::sync::Arc;

use axum::{
    extract::Extension,
    http::Method,
    routing::{get, post},
    Router,
};
use listing_extraction::{CancellationToken, ListingScraper};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::server::routes::{health_handler, scrape_property_handler};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub scraper: Arc<ListingScraper>,
    /// Cancelled on shutdown; each request scrapes with a child token.
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(scraper: ListingScraper) -> Self {
        Self {
            scraper: Arc::new(scraper),
            shutdown: CancellationToken::new(),
        }
    }
}

pub fn build_app(state: AppState) -> Router {
    // Browser callers come from anywhere
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/api/scrape-property", post(scrape_property_handler))
        .route("/scrape-property", post(scrape_property_handler))
        .route("/health", get(health_handler))
        .layer(Extension(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
