//! Timestamp helpers
//!
//! Timestamps are stored and served as RFC3339 strings in UTC. Fixed
//! millisecond precision keeps them lexicographically sortable, so
//! `ORDER BY created_at DESC` behaves like a time sort.

use chrono::{SecondsFormat, Utc};

/// Current UTC time, e.g. `2026-08-21T09:30:12.345Z`
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Current date compacted for order numbers, e.g. `20260821`
pub fn today_compact() -> String {
    Utc::now().format("%Y%m%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_rfc3339_shape() {
        let ts = now_rfc3339();
        assert!(ts.ends_with('Z'));
        assert_eq!(ts.len(), "2026-08-21T09:30:12.345Z".len());
    }

    #[test]
    fn test_today_compact_shape() {
        let d = today_compact();
        assert_eq!(d.len(), 8);
        assert!(d.chars().all(|c| c.is_ascii_digit()));
    }
}
