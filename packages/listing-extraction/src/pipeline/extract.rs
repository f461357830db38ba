//! Gather every extraction source for one page or job record.

use scraper::Html;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::extractors::{patterns, resolve_fields, score, selectors, structured};
use crate::types::candidate::{CandidateSource, ExtractionCandidate};
use crate::types::listing::ListingDraft;

/// Per-source drafts, merged by [`super::normalize`] in field order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractionInputs {
    /// Fields resolved from the best structured candidate.
    pub structured: ListingDraft,
    /// Numeric facts found in the description or summary.
    pub description_facts: ListingDraft,
    /// Numeric facts found in the visible page text.
    pub page_facts: ListingDraft,
    /// Text fields found by CSS selectors.
    pub selector: ListingDraft,
    /// Where the structured draft came from, if anywhere.
    pub source: Option<CandidateSource>,
}

/// Run every extractor over raw HTML.
///
/// Never fails: empty or garbage HTML yields empty drafts.
pub fn extract_from_html(html: &str, url: &Url) -> ExtractionInputs {
    let document = Html::parse_document(html);

    let (structured, source) = match structured::extract_candidate(&document, html) {
        Some(candidate) => {
            debug!(
                source = %candidate.source,
                score = candidate.score,
                "Selected structured candidate"
            );
            (resolve_fields(&candidate.data, url), Some(candidate.source))
        }
        None => {
            debug!(url = %url, "No structured data on page");
            (ListingDraft::default(), None)
        }
    };

    let selector = selectors::selector_fallback(&document, url);

    let description_facts = structured
        .description
        .as_deref()
        .or(selector.description.as_deref())
        .map(patterns::numeric_facts)
        .unwrap_or_default();

    let mut known = structured.clone();
    known.fill_gaps(description_facts.clone());
    let page_facts = if known.missing_numeric() {
        patterns::numeric_facts(&selectors::page_text(&document))
    } else {
        ListingDraft::default()
    };

    ExtractionInputs {
        structured,
        description_facts,
        page_facts,
        selector,
        source,
    }
}

/// Resolve a job-service record the same way as an HTML candidate.
pub fn extract_from_record(record: &Value, url: &Url) -> ExtractionInputs {
    let candidate =
        ExtractionCandidate::new(record.clone(), score(record), CandidateSource::ActorRecord);
    debug!(
        source = %candidate.source,
        score = candidate.score,
        "Resolving job record"
    );
    let structured = resolve_fields(&candidate.data, url);
    let description_facts = structured
        .description
        .as_deref()
        .map(patterns::numeric_facts)
        .unwrap_or_default();

    ExtractionInputs {
        structured,
        description_facts,
        source: Some(candidate.source),
        ..Default::default()
    }
}
