//! Core trait abstractions for the extraction library.
//!
//! These traits are the seams between the pipeline and the outside world:
//! page retrieval and the asynchronous job-execution service.

pub mod fetcher;
pub mod job_service;

pub use fetcher::PageFetcher;
pub use job_service::JobService;
