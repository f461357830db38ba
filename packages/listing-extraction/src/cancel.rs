//! Cancellation helpers.

use std::future::Future;
use tokio_util::sync::CancellationToken;

use crate::error::{ScrapeError, ScrapeResult};

/// Race `fut` against `cancel`, yielding [`ScrapeError::Cancelled`] if the
/// token fires first.
pub async fn with_cancel<F, T>(cancel: &CancellationToken, fut: F) -> ScrapeResult<T>
where
    F: Future<Output = ScrapeResult<T>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ScrapeError::Cancelled),
        result = fut => result,
    }
}

/// Cancellable sleep.
pub async fn sleep(cancel: &CancellationToken, duration: std::time::Duration) -> ScrapeResult<()> {
    with_cancel(cancel, async {
        tokio::time::sleep(duration).await;
        Ok(())
    })
    .await
}
