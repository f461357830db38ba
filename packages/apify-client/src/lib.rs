//! Pure Apify REST API client.
//!
//! A minimal client for the Apify platform API. Supports starting actor runs,
//! reading run status, and fetching dataset results. Polling policy (interval,
//! deadline, cancellation) belongs to the caller.
//!
//! # Example
//!
//! ```rust,ignore
//! use apify_client::{ApifyClient, StartUrlsInput};
//!
//! let client = ApifyClient::new("your-api-token");
//!
//! let run = client
//!     .start_run("maxcopell/zillow-detail-scraper", &StartUrlsInput::single(url))
//!     .await?;
//! let run = client.get_run(&run.id).await?;
//! ```

pub mod error;
pub mod types;

pub use error::{ApifyError, Result};
pub use types::{RunData, StartUrl, StartUrlsInput};

use secrecy::{ExposeSecret, SecretBox};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use types::ApiResponse;

const BASE_URL: &str = "https://api.apify.com/v2";

pub struct ApifyClient {
    client: reqwest::Client,
    token: SecretBox<str>,
    base_url: String,
}

impl fmt::Debug for ApifyClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApifyClient")
            .field("token", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl ApifyClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            token: SecretBox::new(Box::from(token.into().as_str())),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point the client at a different API root (tests, self-hosted gateways).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Use a preconfigured HTTP client (timeouts, proxies).
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Start an actor run. Returns immediately with run metadata.
    ///
    /// Actor ids in `owner/name` form are sent as `owner~name`, which is what
    /// the API expects in the path.
    pub async fn start_run<I: Serialize + ?Sized>(
        &self,
        actor_id: &str,
        input: &I,
    ) -> Result<RunData> {
        let url = format!("{}/acts/{}/runs", self.base_url, actor_id.replace('/', "~"));
        let resp = self
            .client
            .post(&url)
            .query(&[("token", self.token.expose_secret())])
            .json(input)
            .send()
            .await
            .map_err(redact)?;

        let api_resp: ApiResponse<RunData> = Self::decode(resp).await?;
        match api_resp.data {
            Some(run) if !run.id.is_empty() => {
                tracing::debug!(run_id = %run.id, status = %run.status, "Apify run accepted");
                Ok(run)
            }
            _ => Err(ApifyError::MissingRunId),
        }
    }

    /// Read the current state of a run.
    pub async fn get_run(&self, run_id: &str) -> Result<RunData> {
        let url = format!("{}/actor-runs/{}", self.base_url, run_id);
        let resp = self
            .client
            .get(&url)
            .query(&[("token", self.token.expose_secret())])
            .send()
            .await
            .map_err(redact)?;

        let api_resp: ApiResponse<RunData> = Self::decode(resp).await?;
        api_resp.data.ok_or_else(|| ApifyError::Api {
            status: 200,
            message: format!("run {} response had no data", run_id),
        })
    }

    /// Fetch dataset items from a completed run.
    pub async fn get_dataset_items<T: DeserializeOwned>(&self, dataset_id: &str) -> Result<Vec<T>> {
        let url = format!("{}/datasets/{}/items", self.base_url, dataset_id);
        let resp = self
            .client
            .get(&url)
            .query(&[("token", self.token.expose_secret()), ("format", "json")])
            .send()
            .await
            .map_err(redact)?;

        Self::decode(resp).await
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApifyError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        resp.json().await.map_err(redact)
    }
}

/// Request URLs carry the token in the query string; keep them out of errors.
fn redact(e: reqwest::Error) -> ApifyError {
    ApifyError::Http(e.without_url())
}
