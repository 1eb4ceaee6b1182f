//! Transaction script handling
//!
//! Checkout and cancellation run as single multi-statement SurrealQL
//! transactions (`BEGIN TRANSACTION; ...; COMMIT TRANSACTION;`) submitted
//! in one query. Business guards inside the script abort the whole
//! transaction with `THROW '<kind>|<field>|...'`; once a THROW fires,
//! every other statement of the transaction reports a generic
//! cancellation error, so the response has to be scanned for the real
//! cause rather than taking the first error.
//!
//! Two failure classes come back:
//! - [`TxError::Thrown`]: a business guard fired; never retried
//! - [`TxError::Conflict`]: optimistic write conflict in the storage
//!   engine; the caller may re-run the script (guards re-evaluate
//!   against fresh state)

use surrealdb::Response;
use thiserror::Error;

/// Bound on re-running a script after storage-level write conflicts.
/// Concurrent checkouts all touch the order counter, so the bound has
/// to cover a realistic queue of committers, not just the odd clash.
pub const MAX_TX_RETRIES: u32 = 10;

#[derive(Debug, Error)]
pub enum TxError {
    /// A THROW fired inside the script; payload as thrown
    #[error("transaction aborted: {0}")]
    Thrown(String),

    /// Optimistic write conflict, safe to retry the whole script
    #[error("transaction conflict")]
    Conflict,

    #[error("database error: {0}")]
    Database(String),
}

/// Payload of a THROWn value, if this statement error carries one.
///
/// The engine renders thrown values as `An error occurred: <payload>`.
fn thrown_payload(message: &str) -> Option<&str> {
    message.strip_prefix("An error occurred: ")
}

fn is_conflict(message: &str) -> bool {
    message.contains("read or write conflict")
}

fn is_cancellation_noise(message: &str) -> bool {
    message.contains("cancelled transaction")
}

/// Classify the outcome of a script response.
///
/// Returns the response back when every statement succeeded, so callers
/// can still `take()` results out of it.
pub fn collect(mut response: Response) -> Result<Response, TxError> {
    let errors = response.take_errors();
    if errors.is_empty() {
        return Ok(response);
    }

    let mut sorted: Vec<(usize, surrealdb::Error)> = errors.into_iter().collect();
    sorted.sort_by_key(|(idx, _)| *idx);

    let mut fallback: Option<String> = None;
    for (_, err) in &sorted {
        let msg = err.to_string();
        if let Some(payload) = thrown_payload(&msg) {
            return Err(TxError::Thrown(payload.to_string()));
        }
        if is_conflict(&msg) {
            return Err(TxError::Conflict);
        }
        if fallback.is_none() && !is_cancellation_noise(&msg) {
            fallback = Some(msg);
        }
    }

    Err(TxError::Database(
        fallback.unwrap_or_else(|| "transaction cancelled".to_string()),
    ))
}

/// Run a script, re-submitting it after storage conflicts.
///
/// `make_query` builds a fresh query (bindings included) per attempt.
/// Business aborts and plain database errors pass straight through;
/// only [`TxError::Conflict`] is retried, up to [`MAX_TX_RETRIES`].
pub async fn run_with_retry<F, Fut>(mut make_query: F) -> Result<Response, TxError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Response, surrealdb::Error>>,
{
    for attempt in 1..=MAX_TX_RETRIES {
        let response = make_query()
            .await
            .map_err(|e| TxError::Database(e.to_string()))?;
        match collect(response) {
            Ok(response) => return Ok(response),
            Err(TxError::Conflict) => {
                tracing::debug!(attempt, "write conflict, re-running transaction");
            }
            Err(other) => return Err(other),
        }
    }
    Err(TxError::Conflict)
}

/// Split a `<kind>|a|b|...` THROW payload into its parts
pub fn split_payload(payload: &str) -> Vec<&str> {
    payload.split('|').collect()
}
