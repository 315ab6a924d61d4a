// src/error_recovery.rs
//! Bounded blind retry for generation attempts.

use std::fmt::Display;
use std::future::Future;

/// Runs `attempt` up to `max_retries + 1` times, returning the first success.
///
/// Retries are immediate: no backoff, no jitter, and no state carried from
/// one attempt to the next. Every failure is logged; only the last one is
/// returned.
pub async fn with_retry<F, Fut, T, E>(mut attempt: F, max_retries: u32) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut index = 0;
    loop {
        match attempt().await {
            Ok(result) => return Ok(result),
            Err(e) if index < max_retries => {
                log::warn!("Attempt {} failed: {}", index + 1, e);
                index += 1;
            }
            Err(e) => {
                log::error!("Attempt {} failed, giving up: {}", index + 1, e);
                return Err(e);
            }
        }
    }
}
