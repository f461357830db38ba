//! Job types for the asynchronous actor path.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of a job on the execution service.
///
/// `Ready` and `Running` keep the poller waiting. `Succeeded` is the only
/// terminal state that yields data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobState {
    Submitted,
    Ready,
    Running,
    Succeeded,
    Failed,
    Aborted,
    TimedOut,
}

impl JobState {
    /// Map the service's status vocabulary onto [`JobState`].
    ///
    /// Unknown strings (and transitional ones such as `ABORTING` or
    /// `TIMING-OUT`) map to `Running` so vocabulary drift keeps polling.
    pub fn from_service_status(status: &str) -> Self {
        match status.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "READY" => JobState::Ready,
            "RUNNING" => JobState::Running,
            "SUCCEEDED" => JobState::Succeeded,
            "FAILED" => JobState::Failed,
            "ABORTED" => JobState::Aborted,
            "TIMED_OUT" => JobState::TimedOut,
            other => {
                tracing::debug!(status = other, "Unrecognized job status, treating as RUNNING");
                JobState::Running
            }
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            JobState::Succeeded | JobState::Failed | JobState::Aborted | JobState::TimedOut
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            JobState::Submitted => "SUBMITTED",
            JobState::Ready => "READY",
            JobState::Running => "RUNNING",
            JobState::Succeeded => "SUCCEEDED",
            JobState::Failed => "FAILED",
            JobState::Aborted => "ABORTED",
            JobState::TimedOut => "TIMED_OUT",
        }
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifiers returned when a job is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobHandle {
    pub run_id: String,
    /// Some services announce the result dataset at submission time.
    pub dataset_id: Option<String>,
}

impl JobHandle {
    pub fn new(run_id: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            dataset_id: None,
        }
    }

    pub fn with_dataset(mut self, dataset_id: impl Into<String>) -> Self {
        self.dataset_id = Some(dataset_id.into());
        self
    }
}

/// One status observation of a running job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSnapshot {
    pub state: JobState,
    pub dataset_id: Option<String>,
}

impl JobSnapshot {
    pub fn new(state: JobState) -> Self {
        Self {
            state,
            dataset_id: None,
        }
    }
}
