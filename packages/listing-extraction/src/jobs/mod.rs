//! Asynchronous actor-job path: service adapter and bounded poll loop.

pub mod apify;
pub mod poller;

pub use apify::ApifyJobService;
pub use poller::run_job;
