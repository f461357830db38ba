use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    proxy: bool,
    actor: bool,
}

/// Health check endpoint
///
/// Reports which retrieval providers are configured. Always 200 while the
/// process is serving.
pub async fn health_handler(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            proxy: state.scraper.has_proxy(),
            actor: state.scraper.has_actor(),
        }),
    )
}
