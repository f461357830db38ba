//! Property tests for candidate scoring and record completeness.

use proptest::prelude::*;
use serde_json::{Map, Value};
use url::Url;

use listing_extraction::extractors::{aliases, score, structured::extract_candidate};
use listing_extraction::{extract_from_html, normalize};

fn all_aliases() -> Vec<&'static str> {
    aliases::SCORED
        .iter()
        .flat_map(|(family, _)| family.iter().copied())
        .collect()
}

fn object_with(keys: &[&str]) -> Value {
    let map: Map<String, Value> = keys
        .iter()
        .map(|k| (k.to_string(), Value::String("1".to_string())))
        .collect();
    Value::Object(map)
}

proptest! {
    #[test]
    fn superset_never_scores_lower(
        mask in prop::collection::vec(any::<bool>(), 38),
        extra in prop::collection::vec(any::<bool>(), 38),
    ) {
        let keys = all_aliases();
        let subset: Vec<&str> = keys
            .iter()
            .zip(&mask)
            .filter(|(_, m)| **m)
            .map(|(k, _)| *k)
            .collect();
        let superset: Vec<&str> = keys
            .iter()
            .zip(mask.iter().zip(&extra))
            .filter(|(_, (m, e))| **m || **e)
            .map(|(k, _)| *k)
            .collect();

        let a = object_with(&superset);
        let b = object_with(&subset);
        prop_assert!(score(&a) >= score(&b));
        prop_assert!(score(&a) <= aliases::max_score());
    }

    #[test]
    fn extractor_prefers_superset_block(
        mask in prop::collection::vec(any::<bool>(), 38),
        pick in 0usize..38,
    ) {
        let keys = all_aliases();
        let mut subset: Vec<&str> = keys
            .iter()
            .zip(&mask)
            .filter(|(_, m)| **m)
            .map(|(k, _)| *k)
            .collect();
        if subset.is_empty() {
            subset.push(keys[pick % keys.len()]);
        }
        let mut superset = subset.clone();
        superset.push(keys[pick % keys.len()]);

        let small = object_with(&subset);
        let large = object_with(&superset);
        let html = format!(
            r#"<script type="application/ld+json">{small}</script><script type="application/ld+json">{large}</script>"#
        );
        let document = scraper::Html::parse_document(&html);
        let best = extract_candidate(&document, &html).unwrap();

        prop_assert!(best.score >= score(&small));
        prop_assert_eq!(best.score, score(&large).max(score(&small)));
    }

    #[test]
    fn every_key_present_for_any_html(html in ".{0,400}") {
        let url = Url::parse("https://homes.example.org/listing/1").unwrap();
        let inputs = extract_from_html(&html, &url);
        let listing = normalize(&inputs, url.as_str(), chrono::Utc::now());
        let json = serde_json::to_value(&listing).unwrap();
        let obj = json.as_object().unwrap();

        prop_assert_eq!(obj.len(), 11);
        for value in obj.values() {
            prop_assert!(!value.is_null());
        }
        prop_assert!(!listing.address.is_empty());
        prop_assert!(!listing.price.is_empty());
    }
}
