//! Record id helpers
//!
//! Ids cross the wire as `table:key` strings; inside the server they are
//! native [`RecordId`] values so record links stay links. Path parameters
//! accept both the full form and the bare key.

use shared::error::AppError;
use surrealdb::RecordId;

/// Parse a client-supplied id for `table`.
///
/// Accepts `table:key` or a bare `key`. An id carrying a different table
/// prefix is rejected rather than silently rewritten.
pub fn parse_record_id(table: &str, raw: &str) -> Result<RecordId, AppError> {
    match raw.split_once(':') {
        Some((tb, key)) if tb == table => {
            let key = key.trim_start_matches('⟨').trim_end_matches('⟩');
            if key.is_empty() {
                return Err(AppError::invalid_request(format!("empty {} id", table)));
            }
            Ok(RecordId::from_table_key(table, key))
        }
        Some((tb, _)) => Err(AppError::invalid_request(format!(
            "expected a {} id, got '{}'",
            table, tb
        ))),
        None if !raw.is_empty() => Ok(RecordId::from_table_key(table, raw)),
        None => Err(AppError::invalid_request(format!("empty {} id", table))),
    }
}
