//! Job-execution service trait (browser automation actors).

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use crate::error::ScrapeResult;
use crate::types::job::{JobHandle, JobSnapshot};

/// An external service that scrapes a listing asynchronously.
///
/// The poll loop itself lives in [`crate::jobs::poller`]; implementations
/// only translate single requests.
#[async_trait]
pub trait JobService: Send + Sync {
    /// Start a job for `url`.
    ///
    /// Fails with [`crate::ScrapeError::JobSubmission`] when the service
    /// does not hand back a job identifier.
    async fn submit(&self, url: &Url) -> ScrapeResult<JobHandle>;

    /// One status check.
    async fn poll(&self, job: &JobHandle) -> ScrapeResult<JobSnapshot>;

    /// Items of a finished job's result dataset.
    async fn fetch_items(&self, dataset_id: &str) -> ScrapeResult<Vec<Value>>;

    fn name(&self) -> &str;
}
