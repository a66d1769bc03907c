use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::time::{sleep, Instant};

/// Why a bounded poll ended without a value.
#[derive(Debug, Error)]
pub enum PollError<E> {
    #[error("condition not met within {0:?}")]
    TimedOut(Duration),
    #[error("{0}")]
    Failed(E),
}

/// Runs `probe` every `interval` until it yields a value or `timeout`
/// elapses. `Ok(None)` means "not yet"; an `Err` from the probe is a hard
/// failure and aborts the poll immediately.
pub async fn poll_until<T, E, F, Fut>(
    interval: Duration,
    timeout: Duration,
    mut probe: F,
) -> Result<T, PollError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>, E>>,
{
    let deadline = Instant::now() + timeout;
    loop {
        match probe().await {
            Ok(Some(value)) => return Ok(value),
            Ok(None) => {}
            Err(err) => return Err(PollError::Failed(err)),
        }
        if Instant::now() >= deadline {
            return Err(PollError::TimedOut(timeout));
        }
        sleep(interval).await;
    }
}
