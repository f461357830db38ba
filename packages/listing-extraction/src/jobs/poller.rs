//! Bounded poll loop for actor jobs.

use serde_json::Value;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;

use crate::cancel;
use crate::error::{ScrapeError, ScrapeResult};
use crate::traits::job_service::JobService;
use crate::types::config::PollConfig;
use crate::types::job::JobState;

/// Submit a job for `url`, poll it to a terminal state, and return the first
/// item of its result dataset.
///
/// The deadline runs from the first status check. A check is always made
/// before the deadline is consulted, so a job that is already finished is
/// never reported as timed out.
pub async fn run_job(
    service: &dyn JobService,
    url: &Url,
    poll: PollConfig,
    cancel: &CancellationToken,
) -> ScrapeResult<Value> {
    let handle = cancel::with_cancel(cancel, service.submit(url)).await?;
    info!(
        service = service.name(),
        run_id = %handle.run_id,
        url = %url,
        "Job submitted"
    );

    let started = Instant::now();
    let mut attempt: u32 = 0;

    let snapshot = loop {
        attempt += 1;
        let snapshot = cancel::with_cancel(cancel, service.poll(&handle)).await?;
        debug!(
            run_id = %handle.run_id,
            state = %snapshot.state,
            attempt,
            "Job status"
        );

        if snapshot.state.is_terminal() {
            break snapshot;
        }

        let waited = started.elapsed();
        if waited >= poll.timeout {
            warn!(run_id = %handle.run_id, attempt, waited = ?waited, "Job poll deadline exceeded");
            return Err(ScrapeError::PollTimeout {
                run_id: handle.run_id,
                waited,
            });
        }

        cancel::sleep(cancel, poll.interval.min(poll.timeout - waited)).await?;
    };

    if snapshot.state != JobState::Succeeded {
        return Err(ScrapeError::JobExecution {
            run_id: handle.run_id,
            state: snapshot.state,
        });
    }

    let Some(dataset_id) = snapshot.dataset_id.or(handle.dataset_id) else {
        return Err(ScrapeError::EmptyResult {
            run_id: handle.run_id,
        });
    };

    let items = cancel::with_cancel(cancel, service.fetch_items(&dataset_id)).await?;
    debug!(run_id = %handle.run_id, items = items.len(), "Job results fetched");

    items
        .into_iter()
        .next()
        .ok_or(ScrapeError::EmptyResult {
            run_id: handle.run_id,
        })
}
