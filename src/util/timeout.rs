//! Timeout helper.

use std::future::Future;
use std::time::Duration;

use crate::error::AssistantError;

/// Wrap a future with an optional timeout. `None` waits indefinitely.
pub async fn with_timeout<T>(
    duration: Option<Duration>,
    future: impl Future<Output = Result<T, AssistantError>>,
) -> Result<T, AssistantError> {
    let Some(duration) = duration else {
        return future.await;
    };
    match tokio::time::timeout(duration, future).await {
        Ok(result) => result,
        Err(_) => Err(AssistantError::Timeout(duration.as_millis() as u64)),
    }
}
