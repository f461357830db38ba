//! Data types for listing extraction.

pub mod candidate;
pub mod config;
pub mod job;
pub mod listing;
