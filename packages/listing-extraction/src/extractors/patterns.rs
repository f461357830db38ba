//! Natural-language fallback for bedroom, bathroom and floor-area facts.

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::listing::ListingDraft;

lazy_static! {
    static ref BEDROOM_PATTERNS: Vec<Regex> = [
        r"(?i)\b(\d+)\s*-?\s*bedrooms?\b",
        r"(?i)\b(\d+)\s*-?\s*beds?\b",
        r"(?i)\b(\d+)\s*br\b",
        r"(?i)\bbedrooms?\s*:\s*(\d+)",
        r"(?i)\bbeds?\s*:\s*(\d+)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();

    // Decimal values carry half-baths.
    static ref BATHROOM_PATTERNS: Vec<Regex> = [
        r"(?i)\b(\d+(?:\.\d+)?)\s*-?\s*bathrooms?\b",
        r"(?i)\b(\d+(?:\.\d+)?)\s*-?\s*baths?\b",
        r"(?i)\b(\d+(?:\.\d+)?)\s*ba\b",
        r"(?i)\bbathrooms?\s*:\s*(\d+(?:\.\d+)?)",
        r"(?i)\bbaths?\s*:\s*(\d+(?:\.\d+)?)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();

    static ref SQUARE_FEET_PATTERNS: Vec<Regex> = [
        r"(?i)\b(\d{1,3}(?:,\d{3})+|\d+)\s*(?:sq\.?\s*ft\.?|sqft|square\s+f(?:ee|oo)t)",
        r"(?i)\b(?:square\s+feet|sq\.?\s*ft\.?|sqft)\s*:\s*(\d{1,3}(?:,\d{3})+|\d+)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();
}

/// First capture of the first pattern that matches.
fn first_capture<'t>(patterns: &[Regex], text: &'t str) -> Option<&'t str> {
    patterns
        .iter()
        .find_map(|re| re.captures(text).and_then(|c| c.get(1)))
        .map(|m| m.as_str())
}

pub fn bedrooms(text: &str) -> Option<u32> {
    first_capture(&BEDROOM_PATTERNS, text).and_then(|s| s.parse().ok())
}

pub fn bathrooms(text: &str) -> Option<f64> {
    first_capture(&BATHROOM_PATTERNS, text)
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|n| n.is_finite())
}

pub fn square_feet(text: &str) -> Option<u32> {
    first_capture(&SQUARE_FEET_PATTERNS, text)
        .and_then(|s| s.replace(',', "").parse().ok())
        .filter(|n| *n > 0)
}

/// Numeric facts found in `text`, as a draft with only numeric fields set.
pub fn numeric_facts(text: &str) -> ListingDraft {
    ListingDraft {
        bedrooms: bedrooms(text),
        bathrooms: bathrooms(text),
        square_feet: square_feet(text),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_sentence() {
        let facts = numeric_facts("Spacious 4 bedroom, 2.5 bath home, 2,200 sq ft");
        assert_eq!(facts.bedrooms, Some(4));
        assert_eq!(facts.bathrooms, Some(2.5));
        assert_eq!(facts.square_feet, Some(2200));
        assert_eq!(facts.address, None);
    }

    #[test]
    fn test_bedroom_variants_in_order() {
        assert_eq!(bedrooms("3 Bedrooms"), Some(3));
        assert_eq!(bedrooms("cozy 2-bed flat"), Some(2));
        assert_eq!(bedrooms("5br / 3ba"), Some(5));
        assert_eq!(bedrooms("Bedrooms: 6"), Some(6));
        assert_eq!(bedrooms("Beds: 1"), Some(1));
        assert_eq!(bedrooms("bedroom furniture included"), None);
    }

    #[test]
    fn test_bathroom_variants() {
        assert_eq!(bathrooms("2 bathrooms"), Some(2.0));
        assert_eq!(bathrooms("1.5 baths"), Some(1.5));
        assert_eq!(bathrooms("5br / 3ba"), Some(3.0));
        assert_eq!(bathrooms("Bathrooms: 2.75"), Some(2.75));
        assert_eq!(bathrooms("2 barns on the lot"), None);
    }

    #[test]
    fn test_square_feet_variants() {
        assert_eq!(square_feet("1,850 sqft"), Some(1850));
        assert_eq!(square_feet("approx 960 square feet"), Some(960));
        assert_eq!(square_feet("12,400 Sq. Ft. lot"), Some(12400));
        assert_eq!(square_feet("Sq Ft: 3,100"), Some(3100));
        assert_eq!(square_feet("no size given"), None);
    }
}
