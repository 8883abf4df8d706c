use futures::future::{self, Either};
use std::{future::Future, time::Duration};

use crate::api::ApiError;

/// Upper bound for a single remote round trip as seen by the user.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[cfg(target_arch = "wasm32")]
pub async fn sleep(duration: Duration) {
    gloo_timers::future::sleep(duration).await;
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}

/// Resolves `fut`, or fails with a retryable `TIMEOUT` error once `limit`
/// elapses first. The losing future is dropped.
pub async fn with_timeout<T, F>(limit: Duration, fut: F) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, ApiError>>,
{
    let fut = Box::pin(fut);
    let timer = Box::pin(sleep(limit));
    match future::select(fut, timer).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => Err(ApiError::timeout(format!(
            "The server did not respond within {} seconds",
            limit.as_secs()
        ))),
    }
}
