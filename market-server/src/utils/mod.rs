//! Utility module - common helpers and re-exported error types
//!
//! - [`AppError`] / [`ApiResponse`] - application error types (from `shared::error`)
//! - [`logger`] - tracing setup
//! - [`time`] - RFC3339 timestamp helpers
//! - [`record`] - record id parsing for path parameters

pub mod logger;
pub mod record;
pub mod time;

// Re-export error types so handlers can `use crate::utils::{AppError, AppResult}`
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
