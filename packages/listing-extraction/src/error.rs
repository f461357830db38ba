//! Typed errors for the listing extraction library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use std::time::Duration;
use thiserror::Error;

use crate::types::job::JobState;

/// Errors that can occur while scraping a listing.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Caller supplied something that is not an http(s) URL
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// Both the proxy attempt and the direct fetch failed
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// The job service did not accept the run
    #[error("job submission failed: {reason}")]
    JobSubmission { reason: String },

    /// The run reached a terminal state other than SUCCEEDED
    #[error("job {run_id} finished with state {state}")]
    JobExecution { run_id: String, state: JobState },

    /// The run succeeded but its dataset was empty
    #[error("job {run_id} succeeded but returned no items")]
    EmptyResult { run_id: String },

    /// The run did not reach a terminal state before the deadline
    #[error("job {run_id} still running after {waited:?}")]
    PollTimeout { run_id: String, waited: Duration },

    /// Transport or API failure while talking to the job service
    #[error("job service error: {0}")]
    JobService(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Provider configuration is unusable (e.g. unparseable base URL)
    #[error("configuration error: {reason}")]
    Configuration { reason: String },

    /// Operation was cancelled
    #[error("operation cancelled")]
    Cancelled,
}

impl ScrapeError {
    /// True when the failure was caused by the caller's input rather than
    /// an upstream service.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ScrapeError::InvalidInput { .. })
    }
}

/// Errors from a single HTML retrieval attempt.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Upstream answered with a non-2xx status
    #[error("HTTP {status} from {endpoint}")]
    Status { endpoint: String, status: u16 },

    /// Request never completed (DNS, connect, TLS, timeout)
    #[error("network error contacting {endpoint}: {source}")]
    Network {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// Response body could not be read
    #[error("failed to read body from {endpoint}: {source}")]
    Body {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl FetchError {
    /// HTTP status carried by this error, if the upstream answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias for scrape operations.
pub type ScrapeResult<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_invalid_input_is_client_error() {
        let invalid = ScrapeError::InvalidInput {
            reason: "not a URL".into(),
        };
        assert!(invalid.is_client_error());

        let fetch = ScrapeError::Fetch(FetchError::Status {
            endpoint: "https://example.com".into(),
            status: 503,
        });
        assert!(!fetch.is_client_error());
        assert!(!ScrapeError::Cancelled.is_client_error());
    }

    #[test]
    fn test_job_execution_message_names_state() {
        let err = ScrapeError::JobExecution {
            run_id: "run-1".into(),
            state: JobState::Aborted,
        };
        assert_eq!(err.to_string(), "job run-1 finished with state ABORTED");
    }

    #[test]
    fn test_fetch_error_status() {
        let err = FetchError::Status {
            endpoint: "https://example.com".into(),
            status: 500,
        };
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "HTTP 500 from https://example.com");
    }
}
