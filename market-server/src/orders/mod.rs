//! Order domain: checkout, lifecycle, reorder
//!
//! - **processor**: turns a cart into an order in one storage
//!   transaction (stock re-validated and decremented, prices frozen,
//!   cart cleared)
//! - **lifecycle**: cancellation with restock, and forward status moves
//! - **reorder**: rebuilds a cart from a past order, best effort
//!
//! # Data flow
//!
//! ```text
//! cart_line ──(price + freeze)──▶ order + order_item
//!     ▲                               │
//!     └──────── reorder ◀── cancel ───┘ (restock)
//! ```
//!
//! Writes that must hold together run as single SurrealQL scripts
//! through [`crate::db::tx`]; everything the API reads back comes from
//! [`OrderRepository`] projections.

pub mod error;
mod lifecycle;
mod processor;
mod reorder;

pub use error::{OrderError, OrderResult};

use crate::db::models::Cart;
use crate::db::repository::{
    CartRepository, OrderHead, OrderRepository, SupplyRepository,
};
use crate::services::UserLocks;
use shared::order::{OrderSummary, OrderView};
use std::sync::Arc;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct OrderService {
    db: Surreal<Db>,
    orders: OrderRepository,
    carts: CartRepository,
    supplies: SupplyRepository,
    locks: Arc<UserLocks>,
}

impl OrderService {
    pub fn new(db: Surreal<Db>, locks: Arc<UserLocks>) -> Self {
        Self {
            orders: OrderRepository::new(db.clone()),
            carts: CartRepository::new(db.clone()),
            supplies: SupplyRepository::new(db.clone()),
            db,
            locks,
        }
    }

    /// Full order detail, scoped to its owner
    pub async fn detail(&self, user_id: &str, order_id: &RecordId) -> OrderResult<OrderView> {
        self.orders
            .detail(order_id)
            .await?
            .filter(|view| view.user_id == user_id)
            .ok_or_else(|| OrderError::OrderNotFound(order_id.to_string()))
    }

    /// Newest-first summaries for the user
    pub async fn list(&self, user_id: &str) -> OrderResult<Vec<OrderSummary>> {
        Ok(self.orders.summaries_for_user(user_id).await?)
    }

    /// Head row scoped to its owner. A foreign order reads the same as
    /// a missing one.
    async fn owned_head(&self, user_id: &str, order_id: &RecordId) -> OrderResult<OrderHead> {
        self.orders
            .head(order_id)
            .await?
            .filter(|head| head.user_id == user_id)
            .ok_or_else(|| OrderError::OrderNotFound(order_id.to_string()))
    }

    /// Re-read an order the service just wrote
    async fn fresh_view(&self, order_id: &RecordId) -> OrderResult<OrderView> {
        self.orders
            .detail(order_id)
            .await?
            .ok_or_else(|| OrderError::Database(format!("order {order_id} vanished after write")))
    }
}

fn cart_record_id(cart: &Cart) -> OrderResult<RecordId> {
    cart.id
        .clone()
        .ok_or_else(|| OrderError::Database("cart row missing id".to_string()))
}

#[cfg(test)]
mod tests;
