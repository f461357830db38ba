//! In-process tests for the HTTP surface, driven through `tower::ServiceExt`.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use listing_extraction::testing::MockPageFetcher;
use listing_extraction::{ListingScraper, ScraperConfig};
use listing_server::server::{build_app, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

const LISTING_HTML: &str = r#"
<html><body>
  <script type="application/ld+json">
    {"@type": "SingleFamilyResidence", "address": {"streetAddress": "12 Harbor Rd"},
     "offers": {"price": 725000}, "numberOfBedrooms": 4, "numberOfBathroomsTotal": 2.5,
     "floorSize": {"value": 2100}}
  </script>
</body></html>
"#;

fn app_with(fetcher: MockPageFetcher) -> Router {
    let scraper =
        ListingScraper::with_components(&ScraperConfig::new(), Arc::new(fetcher), None);
    build_app(AppState::new(scraper))
}

fn scrape_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn test_scrape_success_returns_full_listing() {
    let app = app_with(MockPageFetcher::new().with_html(LISTING_HTML));

    let (status, body) = send(
        app,
        scrape_request(
            "/api/scrape-property",
            r#"{"url": "https://homes.example.org/listing/12"}"#,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["address"], "12 Harbor Rd");
    assert_eq!(body["data"]["price"], "$725,000");
    assert_eq!(body["data"]["bathrooms"], 2.5);
    assert_eq!(body["data"]["squareFeet"], 2100);
    assert_eq!(body["data"]["listingUrl"], "https://homes.example.org/listing/12");
    assert!(body["data"]["scrapedAt"].is_string());
}

#[tokio::test]
async fn test_legacy_route_is_served() {
    let app = app_with(MockPageFetcher::new());

    let (status, body) = send(
        app,
        scrape_request("/scrape-property", r#"{"url": "https://homes.example.org/l/1"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["address"], "Address not found");
    assert_eq!(body["data"]["neighborhood"], "Neighborhood not specified");
}

#[tokio::test]
async fn test_missing_url_is_bad_request() {
    let fetcher = MockPageFetcher::new();
    let app = app_with(fetcher.clone());

    for body in [r#"{}"#, r#"{"url": ""}"#, r#"{"url": null}"#] {
        let (status, json) = send(app.clone(), scrape_request("/api/scrape-property", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert!(json["error"].is_string());
    }
    assert_eq!(fetcher.call_count(), 0);
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let app = app_with(MockPageFetcher::new());

    let (status, body) = send(app, scrape_request("/api/scrape-property", "{not json")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_invalid_url_is_bad_request() {
    let fetcher = MockPageFetcher::new();
    let app = app_with(fetcher.clone());

    for url in ["not a url", "ftp://homes.example.org/l/1", "http://10.0.0.5/l/1"] {
        let body = json!({ "url": url }).to_string();
        let (status, json) = send(app.clone(), scrape_request("/api/scrape-property", &body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{url}");
        assert!(json["error"].is_string());
    }
    assert_eq!(fetcher.call_count(), 0);
}

#[tokio::test]
async fn test_fetch_failure_is_server_error() {
    let app = app_with(MockPageFetcher::new().with_status_error(502));

    let (status, body) = send(
        app,
        scrape_request(
            "/api/scrape-property",
            r#"{"url": "https://homes.example.org/l/1"}"#,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("502"));
    assert!(body.get("success").is_none());
}

#[tokio::test]
async fn test_shutdown_cancels_scrapes() {
    let scraper = ListingScraper::with_components(
        &ScraperConfig::new(),
        Arc::new(MockPageFetcher::new()),
        None,
    );
    let state = AppState::new(scraper);
    state.shutdown.cancel();
    let app = build_app(state);

    let (status, body) = send(
        app,
        scrape_request(
            "/api/scrape-property",
            r#"{"url": "https://homes.example.org/l/1"}"#,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_health_reports_providers() {
    let app = app_with(MockPageFetcher::new());

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"status": "healthy", "proxy": false, "actor": false})
    );
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let app = app_with(MockPageFetcher::new());

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/scrape-property")
        .header(header::ORIGIN, "https://app.example.org")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}
