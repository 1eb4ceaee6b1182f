//! Order domain errors

use crate::db::repository::{RepoError, StockError};
use crate::db::tx::TxError;
use shared::error::{AppError, ErrorCode};
use shared::order::OrderStatus;
use thiserror::Error;

/// Failures of checkout, lifecycle, and reorder operations
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("insufficient stock for {supply_id}: requested {requested}, available {available}")]
    InsufficientStock {
        supply_id: String,
        requested: i64,
        available: i64,
    },

    #[error("order {order_id} cannot leave status {from}")]
    InvalidTransition {
        order_id: String,
        from: OrderStatus,
    },

    #[error("order not found: {0}")]
    OrderNotFound(String),

    #[error("supply not found: {0}")]
    SupplyNotFound(String),

    #[error(transparent)]
    Repo(#[from] RepoError),

    #[error("database error: {0}")]
    Database(String),
}

pub type OrderResult<T> = Result<T, OrderError>;

impl From<StockError> for OrderError {
    fn from(err: StockError) -> Self {
        match err {
            StockError::Insufficient {
                supply_id,
                requested,
                available,
            } => Self::InsufficientStock {
                supply_id,
                requested,
                available,
            },
            StockError::SupplyMissing(id) => Self::SupplyNotFound(id),
            StockError::Repo(e) => Self::Repo(e),
        }
    }
}

/// Fallback for script failures that are not business THROWs the caller
/// already picked apart
impl From<TxError> for OrderError {
    fn from(err: TxError) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::EmptyCart => AppError::new(ErrorCode::CartEmpty),
            OrderError::InsufficientStock {
                supply_id,
                requested,
                available,
            } => AppError::insufficient_stock(supply_id, requested, available),
            OrderError::InvalidTransition { order_id, from } => AppError::with_message(
                ErrorCode::InvalidOrderStatus,
                format!("order cannot leave status {from}"),
            )
            .with_detail("order_id", order_id)
            .with_detail("from_status", from.as_str()),
            OrderError::OrderNotFound(id) => AppError::with_message(
                ErrorCode::OrderNotFound,
                format!("order {id} not found"),
            ),
            OrderError::SupplyNotFound(id) => AppError::with_message(
                ErrorCode::SupplyNotFound,
                format!("supply {id} not found"),
            ),
            OrderError::Repo(e) => e.into(),
            OrderError::Database(msg) => AppError::database(msg),
        }
    }
}
