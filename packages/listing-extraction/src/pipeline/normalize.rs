//! Result normalizer: merge per-source drafts into the canonical record.

use chrono::{DateTime, Utc};

use super::extract::ExtractionInputs;
use crate::types::listing::{CanonicalListing, ListingDraft};

/// Merge sources by priority and apply sentinels.
///
/// Structured data wins every field it resolved. Pattern facts (description
/// first, then page text) fill only the numeric fields; selector results fill
/// only text fields. Pure apart from the supplied timestamp.
pub fn normalize(
    inputs: &ExtractionInputs,
    listing_url: &str,
    scraped_at: DateTime<Utc>,
) -> CanonicalListing {
    let mut draft = inputs.structured.clone();
    draft.fill_gaps(numeric_part(&inputs.description_facts));
    draft.fill_gaps(numeric_part(&inputs.page_facts));
    draft.fill_gaps(text_part(&inputs.selector));
    draft.finalize(listing_url, scraped_at)
}

fn numeric_part(draft: &ListingDraft) -> ListingDraft {
    ListingDraft {
        bedrooms: draft.bedrooms,
        bathrooms: draft.bathrooms,
        square_feet: draft.square_feet,
        ..Default::default()
    }
}

fn text_part(draft: &ListingDraft) -> ListingDraft {
    ListingDraft {
        bedrooms: None,
        bathrooms: None,
        square_feet: None,
        ..draft.clone()
    }
}
