use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use listing_extraction::CanonicalListing;
use serde::{Deserialize, Serialize};

use crate::server::app::AppState;

#[derive(Debug, Deserialize)]
pub struct ScrapeRequest {
    pub url: Option<String>,
}

#[derive(Serialize)]
pub struct ScrapeResponse {
    success: bool,
    data: CanonicalListing,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    error: String,
}

fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
        .into_response()
}

/// Scrape one listing
///
/// `POST {"url": "..."}` returns `{"success": true, "data": {...}}`, or
/// `{"error": "..."}` with 400 for caller mistakes and 500 for upstream
/// failures.
pub async fn scrape_property_handler(
    Extension(state): Extension<AppState>,
    body: Result<Json<ScrapeRequest>, JsonRejection>,
) -> Response {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Rejected scrape request body");
            return error_response(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };

    let Some(url) = request.url.filter(|u| !u.trim().is_empty()) else {
        return error_response(StatusCode::BAD_REQUEST, "URL is required");
    };

    let cancel = state.shutdown.child_token();
    match state.scraper.scrape_property_with_cancel(&url, &cancel).await {
        Ok(listing) => (
            StatusCode::OK,
            Json(ScrapeResponse {
                success: true,
                data: listing,
            }),
        )
            .into_response(),
        Err(e) if e.is_client_error() => error_response(StatusCode::BAD_REQUEST, e.to_string()),
        Err(e) => {
            tracing::error!(url = %url, error = %e, "Scrape failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}
