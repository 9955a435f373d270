//! Bounded waits for storage and crypto steps.

use std::borrow::Cow;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// A step did not finish within its limit. The step's own outcome is unknown.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{what} did not finish within {}ms", .limit.as_millis())]
pub struct DeadlineExceeded {
    pub what: Cow<'static, str>,
    pub limit: Duration,
}

/// Runs `fut` to completion or gives up after `limit`.
///
/// # Errors
/// Returns [`DeadlineExceeded`] naming `what` if the limit elapses first. The future is dropped.
pub async fn within<F, T>(
    limit: Duration,
    what: impl Into<Cow<'static, str>>,
    fut: F,
) -> Result<T, DeadlineExceeded>
where
    F: Future<Output = T>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(value) => Ok(value),
        Err(_) => {
            let what = what.into();
            warn!(%what, limit_ms = limit.as_millis(), "Deadline exceeded");
            Err(DeadlineExceeded { what, limit })
        },
    }
}
