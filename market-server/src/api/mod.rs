//! API routes
//!
//! # Structure
//!
//! - [`health`] - liveness probe, no auth
//! - [`supplies`] - catalog reads
//! - [`cart`] - the caller's cart
//! - [`orders`] - checkout, order reads, lifecycle
//!
//! Every route except health authenticates via the bearer-token
//! extractor; the status route additionally requires the staff role.

pub mod cart;
pub mod health;
pub mod orders;
pub mod supplies;

// Re-export common types for handlers
pub use crate::utils::{ApiResponse, AppResult};
