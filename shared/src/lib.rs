//! Shared types for the Farmgate marketplace
//!
//! Wire contract used by the market server and its clients: error codes and
//! the response envelope, cart and order DTOs, and the order status machine.

pub mod cart;
pub mod error;
pub mod order;
pub mod supply;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use order::OrderStatus;
