//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that use the listing scraper
//! without making real network calls.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, RwLock};
use url::Url;

use crate::error::{FetchError, FetchResult, ScrapeError, ScrapeResult};
use crate::traits::{fetcher::PageFetcher, job_service::JobService};
use crate::types::job::{JobHandle, JobSnapshot, JobState};

/// Canned answer for [`MockPageFetcher`].
#[derive(Debug, Clone)]
enum MockPage {
    Html(String),
    Status(u16),
}

/// A mock page fetcher returning the same canned answer for every URL.
#[derive(Clone)]
pub struct MockPageFetcher {
    response: MockPage,

    /// URLs requested, in order
    calls: Arc<RwLock<Vec<String>>>,
}

impl Default for MockPageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPageFetcher {
    /// Create a mock that serves an empty document.
    pub fn new() -> Self {
        Self {
            response: MockPage::Html(String::new()),
            calls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Serve this HTML.
    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.response = MockPage::Html(html.into());
        self
    }

    /// Fail every request with this HTTP status.
    pub fn with_status_error(mut self, status: u16) -> Self {
        self.response = MockPage::Status(status);
        self
    }

    /// Get all URLs requested from this mock.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

#[async_trait]
impl PageFetcher for MockPageFetcher {
    async fn fetch_html(&self, url: &Url) -> FetchResult<String> {
        self.calls.write().unwrap().push(url.to_string());
        match &self.response {
            MockPage::Html(html) => Ok(html.clone()),
            MockPage::Status(status) => Err(FetchError::Status {
                endpoint: url.to_string(),
                status: *status,
            }),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Record of a call made to the mock job service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockJobCall {
    Submit { url: String },
    Poll { run_id: String },
    FetchItems { dataset_id: String },
}

/// A mock job service driven by a scripted sequence of states.
///
/// Each poll pops the next state; the last one repeats forever.
pub struct MockJobService {
    states: Arc<RwLock<VecDeque<JobState>>>,
    items: Vec<Value>,
    submit_failure: Option<String>,
    calls: Arc<RwLock<Vec<MockJobCall>>>,
}

impl Default for MockJobService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockJobService {
    /// A job that succeeds on the first poll with an empty dataset.
    pub fn new() -> Self {
        Self {
            states: Arc::new(RwLock::new(VecDeque::from([JobState::Succeeded]))),
            items: Vec::new(),
            submit_failure: None,
            calls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// States returned by successive polls.
    pub fn with_states(self, states: impl IntoIterator<Item = JobState>) -> Self {
        *self.states.write().unwrap() = states.into_iter().collect();
        self
    }

    /// Items in the result dataset.
    pub fn with_items(mut self, items: Vec<Value>) -> Self {
        self.items = items;
        self
    }

    /// Make submission fail as if the service returned no run id.
    pub fn with_submit_failure(mut self, reason: impl Into<String>) -> Self {
        self.submit_failure = Some(reason.into());
        self
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<MockJobCall> {
        self.calls.read().unwrap().clone()
    }

    pub fn poll_count(&self) -> usize {
        self.count(|call| matches!(call, MockJobCall::Poll { .. }))
    }

    pub fn fetch_count(&self) -> usize {
        self.count(|call| matches!(call, MockJobCall::FetchItems { .. }))
    }

    fn count(&self, pred: impl Fn(&MockJobCall) -> bool) -> usize {
        self.calls.read().unwrap().iter().filter(|c| pred(c)).count()
    }
}

#[async_trait]
impl JobService for MockJobService {
    async fn submit(&self, url: &Url) -> ScrapeResult<JobHandle> {
        self.calls.write().unwrap().push(MockJobCall::Submit {
            url: url.to_string(),
        });
        match &self.submit_failure {
            Some(reason) => Err(ScrapeError::JobSubmission {
                reason: reason.clone(),
            }),
            None => Ok(JobHandle::new("mock-run")),
        }
    }

    async fn poll(&self, job: &JobHandle) -> ScrapeResult<JobSnapshot> {
        self.calls.write().unwrap().push(MockJobCall::Poll {
            run_id: job.run_id.clone(),
        });
        let mut states = self.states.write().unwrap();
        let state = if states.len() > 1 {
            states.pop_front()
        } else {
            states.front().copied()
        }
        .unwrap_or(JobState::Running);

        Ok(JobSnapshot {
            state,
            dataset_id: Some("mock-dataset".to_string()),
        })
    }

    async fn fetch_items(&self, dataset_id: &str) -> ScrapeResult<Vec<Value>> {
        self.calls.write().unwrap().push(MockJobCall::FetchItems {
            dataset_id: dataset_id.to_string(),
        });
        Ok(self.items.clone())
    }

    fn name(&self) -> &str {
        "mock"
    }
}
