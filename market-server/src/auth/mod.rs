//! Authentication
//!
//! The market server never mints tokens; buyers and staff sign in
//! against the farmgate account service and arrive here with a bearer
//! token. This module validates those tokens and turns their claims
//! into a [`CurrentUser`] for the handlers.

pub mod extractor;
pub mod jwt;

pub use jwt::{Claims, CurrentUser, JwtError, JwtService};

/// Role staff-side endpoints require
pub const STAFF_ROLE: &str = "staff";
