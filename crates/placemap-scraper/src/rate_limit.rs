//! Retry with exponential backoff for place and booking fetches.
//!
//! The platform throttles aggressively and its edge returns sporadic 5xx
//! pages. Those and network failures are retried; everything else is
//! returned on the first failure.

use std::future::Future;
use std::time::Duration;

use crate::error::ScraperError;

/// Upper bound on a single backoff sleep.
const MAX_DELAY_MS: u64 = 60_000;

/// Returns `true` if `err` is transient and worth another attempt.
///
/// Retriable:
/// - [`ScraperError::RateLimited`]: HTTP 429.
/// - [`ScraperError::Http`]: network-level failure (connect, timeout, reset).
/// - [`ScraperError::UnexpectedStatus`] with a 5xx status.
///
/// Not retriable: 404, other 4xx, body parse failures, GraphQL errors and
/// invalid URLs. Retrying would return the same result.
pub(crate) fn is_retriable(err: &ScraperError) -> bool {
    match err {
        ScraperError::RateLimited { .. } | ScraperError::Http(_) => true,
        ScraperError::UnexpectedStatus { status, .. } => (500..600).contains(status),
        ScraperError::NotFound { .. }
        | ScraperError::Deserialize { .. }
        | ScraperError::GraphQl { .. }
        | ScraperError::InvalidUrl { .. } => false,
    }
}

/// Wait before the retry that follows failed attempt `attempt` (0-based).
///
/// `backoff_base_secs * 2^attempt` seconds with ±25% jitter. A 429 waits at
/// least its `Retry-After`. Both are capped at 60 s.
fn backoff_delay_ms(err: &ScraperError, attempt: u32, backoff_base_secs: u64) -> u64 {
    let base_ms = backoff_base_secs.saturating_mul(1000);
    let capped = base_ms
        .saturating_mul(1u64 << attempt.min(20))
        .min(MAX_DELAY_MS);
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let jittered = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;

    let retry_after_ms = match err {
        ScraperError::RateLimited {
            retry_after_secs, ..
        } => retry_after_secs.saturating_mul(1000).min(MAX_DELAY_MS),
        _ => 0,
    };
    jittered.min(MAX_DELAY_MS).max(retry_after_ms)
}

/// Executes `operation` with up to `max_retries` extra attempts on
/// transient errors.
///
/// See [`backoff_delay_ms`] for the wait between attempts. With
/// `max_retries = 3` the operation runs at most 4 times. The last error is
/// returned when retries run out.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, ScraperError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ScraperError>>,
{
    let mut attempt = 0u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }

                let delay_ms = backoff_delay_ms(&err, attempt, backoff_base_secs);
                attempt += 1;
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "transient fetch error, retrying after backoff"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}
