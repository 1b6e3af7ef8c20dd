//! Per-id fan-out shared by the `hours`, `menu` and `place` commands.
//!
//! Each id runs as its own task under `buffer_unordered`. A failed id prints
//! an error document and the remaining ids continue; the command only fails
//! when every id failed.

use std::future::Future;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use rand::Rng;
use serde_json::{json, Value};

/// Scales `base_ms` by a random factor in `[0.5, 1.5]`.
pub(crate) fn jittered_delay(base_ms: u64) -> Duration {
    let half = base_ms / 2;
    Duration::from_millis(rand::rng().random_range(half..=base_ms.saturating_add(half)))
}

/// One output line for a finished id.
pub(crate) fn outcome_document(id: &str, outcome: anyhow::Result<Value>) -> Value {
    match outcome {
        Ok(value) => value,
        Err(e) => json!({ "id": id, "error": format!("{e:#}") }),
    }
}

/// Runs `task` for every id with at most `max_concurrent` in flight and
/// prints one JSON document per id, in input order.
///
/// `delay_ms` is slept (jittered) before every task after the first.
///
/// # Errors
///
/// Returns an error when every id failed.
pub(crate) async fn run_per_id<F, Fut>(
    ids: &[String],
    max_concurrent: usize,
    delay_ms: u64,
    task: F,
) -> anyhow::Result<()>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = anyhow::Result<Value>>,
{
    let mut results: Vec<(usize, &str, anyhow::Result<Value>)> = stream::iter(ids.iter().enumerate())
        .map(|(index, id)| {
            let fut = task(id.clone());
            async move {
                if index > 0 && delay_ms > 0 {
                    tokio::time::sleep(jittered_delay(delay_ms)).await;
                }
                (index, id.as_str(), fut.await)
            }
        })
        .buffer_unordered(max_concurrent.max(1))
        .collect()
        .await;
    results.sort_by_key(|(index, _, _)| *index);

    let mut failed = 0usize;
    for (_, id, outcome) in results {
        if let Err(e) = &outcome {
            tracing::error!(id, error = %e, "failed to process place");
            failed += 1;
        }
        println!("{}", outcome_document(id, outcome));
    }

    if failed > 0 && failed == ids.len() {
        anyhow::bail!("all {failed} ids failed");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jittered_delay_stays_within_half_to_one_and_a_half() {
        for _ in 0..100 {
            let delay = jittered_delay(1000);
            assert!(delay >= Duration::from_millis(500));
            assert!(delay <= Duration::from_millis(1500));
        }
    }

    #[test]
    fn zero_delay_is_zero() {
        assert_eq!(jittered_delay(0), Duration::ZERO);
    }

    #[test]
    fn failed_outcome_becomes_error_document() {
        let doc = outcome_document("42", Err(anyhow::anyhow!("boom")));
        assert_eq!(doc, json!({"id": "42", "error": "boom"}));
    }

    #[tokio::test]
    async fn partial_failure_is_not_an_error() {
        let ids = vec!["1".to_string(), "2".to_string()];
        let result = run_per_id(&ids, 2, 0, |id| async move {
            if id == "1" {
                Ok(json!({"id": id}))
            } else {
                Err(anyhow::anyhow!("unavailable"))
            }
        })
        .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn all_failed_is_an_error() {
        let ids = vec!["1".to_string(), "2".to_string()];
        let result = run_per_id(&ids, 1, 0, |_| async { Err(anyhow::anyhow!("down")) }).await;
        assert!(result.is_err());
    }
}
