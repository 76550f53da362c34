//! Time-limited handler callbacks.
//!
//! **Note**: enforcing a limit requires the `timeout` feature and a running
//! Tokio runtime. Without either, callbacks run to completion.

use ordo_core::{DispatchError, HandlerResult, LifecyclePhase};
use std::{future::Future, time::Duration};

/// Await a handler callback, applying `limit` when one is configured, and
/// attribute any failure to `handler_id`.
pub(crate) async fn call_handler<Fut>(
    handler_id: &str,
    phase: LifecyclePhase,
    limit: Option<Duration>,
    call: Fut,
) -> Result<(), DispatchError>
where
    Fut: Future<Output = HandlerResult> + Send,
{
    let result = match limit {
        #[cfg(feature = "timeout")]
        Some(duration) if tokio::runtime::Handle::try_current().is_ok() => {
            match tokio::time::timeout(duration, call).await {
                Ok(result) => result,
                Err(_) => {
                    return Err(DispatchError::Timeout {
                        handler_id: handler_id.to_string(),
                        duration,
                    });
                }
            }
        }
        Some(duration) => {
            tracing::warn!(?duration, handler_id, "handler timeout not enforced outside Tokio");
            call.await
        }
        None => call.await,
    };

    result.map_err(|source| DispatchError::Handler {
        handler_id: handler_id.to_string(),
        phase,
        source,
    })
}
