//! Extraction candidates - parsed JSON blobs that might describe the listing.

use serde_json::Value;
use std::fmt;

/// Where a candidate was found on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateSource {
    /// `<script type="application/ld+json">`
    JsonLd,
    /// Object literal inside any other inline script
    InlineScript,
    /// `window.__PRELOADED_STATE__` style assignment
    PreloadState,
    /// GraphQL cache preload tag
    GraphqlCache,
    /// First dataset item of an actor job
    ActorRecord,
}

impl fmt::Display for CandidateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CandidateSource::JsonLd => "json-ld",
            CandidateSource::InlineScript => "inline-script",
            CandidateSource::PreloadState => "preload-state",
            CandidateSource::GraphqlCache => "graphql-cache",
            CandidateSource::ActorRecord => "actor-record",
        };
        f.write_str(name)
    }
}

/// A parsed JSON object plus its completeness score.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionCandidate {
    pub data: Value,
    pub score: u32,
    pub source: CandidateSource,
}

impl ExtractionCandidate {
    pub fn new(data: Value, score: u32, source: CandidateSource) -> Self {
        Self {
            data,
            score,
            source,
        }
    }
}
