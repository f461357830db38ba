//! Framework preload blobs: state globals and the GraphQL cache tag.

use scraper::{Html, Selector};
use serde_json::Value;
use tracing::debug;

use super::braces::matching_brace;

/// Global assignments that carry server-rendered application state.
pub const PRELOAD_STATE_ANCHORS: &[&str] =
    &["window.__PRELOADED_STATE__", "window.__INITIAL_STATE__"];

/// Script tag holding a serialized GraphQL client cache.
pub const GRAPHQL_CACHE_SELECTOR: &str = "script#hdpApolloPreloadedData";

/// Parse the object assigned to the first preload-state global found.
pub fn preload_state(html: &str) -> Option<Value> {
    PRELOAD_STATE_ANCHORS
        .iter()
        .find_map(|anchor| assigned_object(html, anchor))
}

/// `anchor = {...}` → the parsed object.
fn assigned_object(html: &str, anchor: &str) -> Option<Value> {
    let after_anchor = html.find(anchor)? + anchor.len();
    let rest = &html[after_anchor..];
    let rest_trimmed = rest.trim_start();
    let rest_trimmed = rest_trimmed.strip_prefix('=')?.trim_start();

    let open = html.len() - rest_trimmed.len();
    let close = matching_brace(html, open)?;
    match serde_json::from_str::<Value>(&html[open..=close]) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(anchor, error = %e, "Preload state is not valid JSON");
            None
        }
    }
}

/// Parse the GraphQL cache tag. A string-encoded `apiCache` inside it is
/// decoded and returned in place of the wrapper.
pub fn graphql_cache(document: &Html) -> Option<Value> {
    let selector = Selector::parse(GRAPHQL_CACHE_SELECTOR).ok()?;
    let raw: String = document.select(&selector).next()?.text().collect();

    let outer: Value = match serde_json::from_str(raw.trim()) {
        Ok(value) => value,
        Err(e) => {
            debug!(error = %e, "GraphQL cache tag is not valid JSON");
            return None;
        }
    };

    if let Some(Value::String(inner)) = outer.get("apiCache") {
        match serde_json::from_str::<Value>(inner) {
            Ok(decoded) => return Some(decoded),
            Err(e) => debug!(error = %e, "GraphQL apiCache string is not valid JSON"),
        }
    }
    Some(outer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_preloaded_state_assignment() {
        let html = r#"<script>window.__PRELOADED_STATE__ = {"listing": {"beds": 2}};</script>"#;
        assert_eq!(preload_state(html), Some(json!({"listing": {"beds": 2}})));
    }

    #[test]
    fn test_initial_state_is_second_choice() {
        let html = r#"<script>window.__INITIAL_STATE__={"price":"$300,000"}</script>"#;
        assert_eq!(preload_state(html), Some(json!({"price": "$300,000"})));
    }

    #[test]
    fn test_non_json_state_is_ignored() {
        let html = r#"<script>window.__PRELOADED_STATE__ = {listing: undefined};</script>"#;
        assert_eq!(preload_state(html), None);
        assert_eq!(preload_state("<p>nothing</p>"), None);
    }

    #[test]
    fn test_graphql_cache_decodes_api_cache() {
        let inner = json!({"Property:1": {"bedrooms": 4, "bathrooms": 3}}).to_string();
        let outer = json!({"queryState": {}, "apiCache": inner}).to_string();
        let html = format!(
            r#"<html><body><script id="hdpApolloPreloadedData" type="application/json">{}</script></body></html>"#,
            outer
        );
        let document = Html::parse_document(&html);

        assert_eq!(
            graphql_cache(&document),
            Some(json!({"Property:1": {"bedrooms": 4, "bathrooms": 3}}))
        );
    }

    #[test]
    fn test_graphql_cache_without_api_cache() {
        let html = r#"<script id="hdpApolloPreloadedData">{"bedrooms": 1}</script>"#;
        let document = Html::parse_document(html);
        assert_eq!(graphql_cache(&document), Some(json!({"bedrooms": 1})));
    }
}
