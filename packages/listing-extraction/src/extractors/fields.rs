//! Value normalization: provider JSON into typed listing fields.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use std::collections::HashSet;
use url::Url;

use super::aliases;
use super::json_walk::find_map;
use crate::types::listing::ListingDraft;

lazy_static! {
    static ref NUMBER: Regex = Regex::new(r"\d[\d,]*(?:\.\d+)?").unwrap();
    static ref PLAIN_AMOUNT: Regex = Regex::new(r"^\$?\s*\d[\d,]*(?:\.\d+)?$").unwrap();
}

/// Substrings that mark decoy or placeholder images.
pub const PLACEHOLDER_MARKERS: &[&str] = &[
    "placeholder",
    "no-image",
    "noimage",
    "no_photo",
    "data:image",
];

/// Resolve every listing field from one JSON record.
pub fn resolve_fields(record: &Value, base: &Url) -> ListingDraft {
    ListingDraft {
        address: find_map(record, aliases::ADDRESS, &mut address),
        price: find_map(record, aliases::PRICE, &mut price),
        bedrooms: find_map(record, aliases::BEDROOMS, &mut |v| count(v)),
        bathrooms: find_map(record, aliases::BATHROOMS, &mut |v| {
            number(v).filter(|n| n.is_finite() && *n >= 0.0)
        }),
        square_feet: find_map(record, aliases::FLOOR_SIZE, &mut |v| count(v).filter(|n| *n > 0)),
        description: find_map(record, aliases::DESCRIPTION, &mut text),
        features: find_map(record, aliases::FEATURES, &mut features),
        neighborhood: find_map(record, aliases::NEIGHBORHOOD, &mut named_text),
        images: find_map(record, aliases::IMAGES, &mut |v| images(v, base)),
    }
}

/// Numbers arrive as numbers, numeric strings ("2,200 sqft"), `{"value": n}`
/// objects, or arrays whose first element is one of those.
pub fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_number(s),
        Value::Object(map) => map.get("value").and_then(number),
        Value::Array(items) => items.first().and_then(number),
        _ => None,
    }
}

/// First number in free text, thousands separators removed.
pub fn parse_number(s: &str) -> Option<f64> {
    NUMBER
        .find(s)
        .and_then(|m| m.as_str().replace(',', "").parse().ok())
}

fn count(value: &Value) -> Option<u32> {
    number(value)
        .filter(|n| n.is_finite() && *n >= 0.0 && *n <= u32::MAX as f64)
        .map(|n| n.round() as u32)
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let s = collapse_whitespace(s);
            (!s.is_empty()).then_some(s)
        }
        _ => None,
    }
}

fn named_text(value: &Value) -> Option<String> {
    match value {
        Value::Object(map) => map.get("name").and_then(text),
        other => text(other),
    }
}

/// Structured addresses prefer the street line, then locality, then region.
fn address(value: &Value) -> Option<String> {
    match value {
        Value::Object(map) => ["streetAddress", "addressLocality", "addressRegion"]
            .iter()
            .find_map(|key| map.get(*key).and_then(text))
            .or_else(|| Some(value.to_string())),
        other => text(other),
    }
}

/// Numeric prices are formatted as `$450,000`; display strings such as
/// `$2,500/mo` are kept as given.
fn price(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => n.as_f64().map(format_currency),
        Value::String(s) => {
            let s = s.trim();
            if PLAIN_AMOUNT.is_match(s) {
                parse_number(s).map(format_currency)
            } else {
                let s = collapse_whitespace(s);
                (!s.is_empty()).then_some(s)
            }
        }
        Value::Object(map) => ["value", "amount", "price"]
            .iter()
            .find_map(|key| map.get(*key).and_then(price)),
        _ => None,
    }
}

/// `$` plus thousands separators; cents only when non-zero.
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let (whole, frac) = (cents / 100, cents % 100);

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    if frac == 0 {
        format!("{sign}${grouped}")
    } else {
        format!("{sign}${grouped}.{frac:02}")
    }
}

fn features(value: &Value) -> Option<Vec<String>> {
    let items: Vec<String> = match value {
        Value::Array(items) => items.iter().filter_map(feature).collect(),
        other => feature(other).into_iter().collect(),
    };
    (!items.is_empty()).then_some(items)
}

fn feature(value: &Value) -> Option<String> {
    match value {
        Value::String(_) => text(value),
        Value::Object(map) => {
            let name = ["name", "factLabel", "label"]
                .iter()
                .find_map(|key| map.get(*key).and_then(text))?;
            match ["value", "factValue"].iter().find_map(|key| map.get(*key)) {
                Some(Value::Bool(false)) => None,
                Some(Value::String(s)) if !s.trim().is_empty() => {
                    Some(format!("{}: {}", name, s.trim()))
                }
                Some(Value::Number(n)) => Some(format!("{}: {}", name, n)),
                _ => Some(name),
            }
        }
        _ => None,
    }
}

/// Image URLs from strings or `{url|contentUrl|src}` objects, resolved
/// against the listing URL, placeholders dropped, first occurrence kept.
pub fn images(value: &Value, base: &Url) -> Option<Vec<String>> {
    let mut raw = Vec::new();
    collect_image_urls(value, &mut raw);
    let cleaned = clean_image_urls(raw, base);
    (!cleaned.is_empty()).then_some(cleaned)
}

fn collect_image_urls(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(s) => out.push(s.trim().to_string()),
        Value::Array(items) => items.iter().for_each(|item| collect_image_urls(item, out)),
        Value::Object(map) => {
            if let Some(url) = ["url", "contentUrl", "src", "href"]
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_str))
            {
                out.push(url.trim().to_string());
            }
        }
        _ => {}
    }
}

/// Resolve, filter placeholders, and de-duplicate image URLs.
pub fn clean_image_urls(raw: impl IntoIterator<Item = String>, base: &Url) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.into_iter()
        .filter(|url| !url.is_empty() && !is_placeholder(url))
        .filter_map(|url| base.join(&url).ok())
        .filter(|url| matches!(url.scheme(), "http" | "https"))
        .map(String::from)
        .filter(|url| seen.insert(url.clone()))
        .collect()
}

pub fn is_placeholder(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    PLACEHOLDER_MARKERS.iter().any(|marker| lower.contains(marker))
}

pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
