//! Extraction of listing facts from pages and job records.
//!
//! Sources in priority order: embedded structured data ([`structured`],
//! [`preload`]), free-text patterns ([`patterns`]), then CSS selectors
//! ([`selectors`]).

pub mod aliases;
pub mod braces;
pub mod fields;
pub mod json_walk;
pub mod patterns;
pub mod preload;
pub mod selectors;
pub mod structured;

pub use fields::resolve_fields;
pub use structured::{extract_candidate, score};
