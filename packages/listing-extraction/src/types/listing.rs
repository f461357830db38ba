//! Listing types - the canonical output record and its in-progress draft.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

pub const ADDRESS_NOT_FOUND: &str = "Address not found";
pub const PRICE_NOT_AVAILABLE: &str = "Price not available";
pub const NO_DESCRIPTION: &str = "No description available";
pub const NEIGHBORHOOD_NOT_SPECIFIED: &str = "Neighborhood not specified";

/// The canonical property record produced for every successful scrape.
///
/// Every field is always present: unresolved text fields carry their
/// sentinel, numeric fields default to zero and lists to empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalListing {
    pub address: String,
    pub price: String,
    pub bedrooms: u32,
    pub bathrooms: f64,
    pub square_feet: u32,
    pub description: String,
    pub features: Vec<String>,
    pub neighborhood: String,
    pub images: Vec<String>,
    pub listing_url: String,
    #[serde(serialize_with = "serialize_timestamp")]
    pub scraped_at: DateTime<Utc>,
}

fn serialize_timestamp<S: Serializer>(
    ts: &DateTime<Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}

impl CanonicalListing {
    pub fn has_address(&self) -> bool {
        self.address != ADDRESS_NOT_FOUND
    }

    pub fn has_price(&self) -> bool {
        self.price != PRICE_NOT_AVAILABLE
    }

    /// Number of fields that hold a real value rather than a sentinel/default.
    pub fn resolved_field_count(&self) -> usize {
        [
            self.has_address(),
            self.has_price(),
            self.bedrooms > 0,
            self.bathrooms > 0.0,
            self.square_feet > 0,
            self.description != NO_DESCRIPTION,
            !self.features.is_empty(),
            self.neighborhood != NEIGHBORHOOD_NOT_SPECIFIED,
            !self.images.is_empty(),
        ]
        .iter()
        .filter(|resolved| **resolved)
        .count()
    }
}

/// Partially resolved listing fields.
///
/// Each extraction source produces a draft; drafts are merged in priority
/// order with [`ListingDraft::fill_gaps`], which never overwrites a field
/// that is already set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingDraft {
    pub address: Option<String>,
    pub price: Option<String>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<f64>,
    pub square_feet: Option<u32>,
    pub description: Option<String>,
    pub features: Option<Vec<String>>,
    pub neighborhood: Option<String>,
    pub images: Option<Vec<String>>,
}

impl ListingDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill every unset field from `other`, leaving set fields untouched.
    pub fn fill_gaps(&mut self, other: ListingDraft) {
        fill(&mut self.address, other.address);
        fill(&mut self.price, other.price);
        fill(&mut self.bedrooms, other.bedrooms);
        fill(&mut self.bathrooms, other.bathrooms);
        fill(&mut self.square_feet, other.square_feet);
        fill(&mut self.description, other.description);
        fill(&mut self.features, other.features);
        fill(&mut self.neighborhood, other.neighborhood);
        fill(&mut self.images, other.images);
    }

    /// True when any of the three numeric facts is still unresolved.
    pub fn missing_numeric(&self) -> bool {
        self.bedrooms.is_none() || self.bathrooms.is_none() || self.square_feet.is_none()
    }

    /// Apply sentinels and defaults, producing the final record.
    pub fn finalize(self, listing_url: &str, scraped_at: DateTime<Utc>) -> CanonicalListing {
        CanonicalListing {
            address: self.address.unwrap_or_else(|| ADDRESS_NOT_FOUND.to_string()),
            price: self.price.unwrap_or_else(|| PRICE_NOT_AVAILABLE.to_string()),
            bedrooms: self.bedrooms.unwrap_or(0),
            bathrooms: self.bathrooms.unwrap_or(0.0),
            square_feet: self.square_feet.unwrap_or(0),
            description: self.description.unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            features: self.features.unwrap_or_default(),
            neighborhood: self
                .neighborhood
                .unwrap_or_else(|| NEIGHBORHOOD_NOT_SPECIFIED.to_string()),
            images: self.images.unwrap_or_default(),
            listing_url: listing_url.to_string(),
            scraped_at,
        }
    }
}

fn fill<T>(slot: &mut Option<T>, value: Option<T>) {
    if slot.is_none() {
        *slot = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_empty_draft_finalizes_to_sentinels() {
        let ts = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let listing = ListingDraft::new().finalize("https://example.com/l/1", ts);

        assert_eq!(listing.address, ADDRESS_NOT_FOUND);
        assert_eq!(listing.price, PRICE_NOT_AVAILABLE);
        assert_eq!(listing.bedrooms, 0);
        assert_eq!(listing.bathrooms, 0.0);
        assert_eq!(listing.square_feet, 0);
        assert_eq!(listing.description, NO_DESCRIPTION);
        assert!(listing.features.is_empty());
        assert_eq!(listing.neighborhood, NEIGHBORHOOD_NOT_SPECIFIED);
        assert!(listing.images.is_empty());
        assert_eq!(listing.listing_url, "https://example.com/l/1");
        assert_eq!(listing.resolved_field_count(), 0);
    }

    #[test]
    fn test_fill_gaps_never_overwrites() {
        let mut draft = ListingDraft {
            bedrooms: Some(3),
            ..Default::default()
        };
        draft.fill_gaps(ListingDraft {
            bedrooms: Some(5),
            bathrooms: Some(2.0),
            ..Default::default()
        });

        assert_eq!(draft.bedrooms, Some(3));
        assert_eq!(draft.bathrooms, Some(2.0));
    }

    #[test]
    fn test_serializes_every_key_in_camel_case() {
        let ts = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let listing = ListingDraft::new().finalize("https://example.com", ts);
        let json = serde_json::to_value(&listing).unwrap();
        let obj = json.as_object().unwrap();

        for key in [
            "address",
            "price",
            "bedrooms",
            "bathrooms",
            "squareFeet",
            "description",
            "features",
            "neighborhood",
            "images",
            "listingUrl",
            "scrapedAt",
        ] {
            assert!(obj.contains_key(key), "missing key {key}");
        }
        assert_eq!(obj.len(), 11);
        assert_eq!(json["scrapedAt"], "2026-01-02T03:04:05.000Z");
    }
}
