//! [`JobService`] backed by the Apify REST client.

use apify_client::{ApifyClient, ApifyError, StartUrlsInput};
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::{ScrapeError, ScrapeResult};
use crate::traits::job_service::JobService;
use crate::types::config::ActorConfig;
use crate::types::job::{JobHandle, JobSnapshot, JobState};

/// Runs a listing-detail actor for one URL.
#[derive(Debug)]
pub struct ApifyJobService {
    client: ApifyClient,
    actor_id: String,
}

impl ApifyJobService {
    pub fn new(config: &ActorConfig, http: reqwest::Client) -> Self {
        let mut client = ApifyClient::new(config.token.expose()).with_client(http);
        if let Some(base_url) = &config.base_url {
            client = client.with_base_url(base_url.as_str());
        }
        Self::from_client(client, config.actor_id.clone())
    }

    pub fn from_client(client: ApifyClient, actor_id: impl Into<String>) -> Self {
        Self {
            client,
            actor_id: actor_id.into(),
        }
    }
}

fn service_error(e: ApifyError) -> ScrapeError {
    ScrapeError::JobService(Box::new(e))
}

#[async_trait]
impl JobService for ApifyJobService {
    async fn submit(&self, url: &Url) -> ScrapeResult<JobHandle> {
        let run = self
            .client
            .start_run(&self.actor_id, &StartUrlsInput::single(url.as_str()))
            .await
            .map_err(|e| ScrapeError::JobSubmission {
                reason: e.to_string(),
            })?;

        debug!(actor = %self.actor_id, run_id = %run.id, "Actor run submitted");
        let handle = JobHandle::new(run.id);
        Ok(match run.default_dataset_id {
            Some(dataset_id) => handle.with_dataset(dataset_id),
            None => handle,
        })
    }

    async fn poll(&self, job: &JobHandle) -> ScrapeResult<JobSnapshot> {
        let run = self
            .client
            .get_run(&job.run_id)
            .await
            .map_err(service_error)?;

        Ok(JobSnapshot {
            state: JobState::from_service_status(&run.status),
            dataset_id: run.default_dataset_id,
        })
    }

    async fn fetch_items(&self, dataset_id: &str) -> ScrapeResult<Vec<Value>> {
        self.client
            .get_dataset_items(dataset_id)
            .await
            .map_err(service_error)
    }

    fn name(&self) -> &str {
        "apify"
    }
}
