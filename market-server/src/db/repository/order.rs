//! Order reads
//!
//! Orders and their items are written by the checkout and cancellation
//! transaction scripts; this repository only projects them back out,
//! with record ids cast to strings for the wire.

use super::{BaseRepository, RepoResult};
use serde::Deserialize;
use shared::order::{OrderStatus, OrderSummary, OrderView};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

pub const ORDER_TABLE: &str = "order";
pub const ORDER_ITEM_TABLE: &str = "order_item";

/// Minimal head row for ownership and transition checks
#[derive(Debug, Clone, Deserialize)]
pub struct OrderHead {
    pub id: String,
    pub user_id: String,
    pub status: OrderStatus,
}

/// Raw item row with its live supply link, for restock and reorder
#[derive(Debug, Clone, Deserialize)]
pub struct OrderItemRow {
    pub supply: RecordId,
    pub supply_name: String,
    pub quantity: i64,
}

#[derive(Debug, Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn head(&self, id: &RecordId) -> RepoResult<Option<OrderHead>> {
        let mut result = self
            .base
            .db()
            .query("SELECT <string>id AS id, user_id, status FROM order WHERE id = $id")
            .bind(("id", id.clone()))
            .await?;
        let rows: Vec<OrderHead> = result.take(0)?;
        Ok(rows.into_iter().next())
    }

    /// Full order with its frozen items, items alphabetical by name
    pub async fn detail(&self, id: &RecordId) -> RepoResult<Option<OrderView>> {
        let mut result = self
            .base
            .db()
            .query(
                r#"
                SELECT
                    <string>id AS id,
                    number,
                    user_id,
                    status,
                    subtotal,
                    discount,
                    tax,
                    total,
                    shipping,
                    tracking_number,
                    created_at,
                    shipped_at,
                    delivered_at,
                    cancelled_at,
                    (
                        SELECT
                            <string>supply AS supply_id,
                            supply_name,
                            unit,
                            quantity,
                            unit_price,
                            discount,
                            subtotal
                        FROM order_item
                        WHERE order_id = $parent.id
                        ORDER BY supply_name
                    ) AS items
                FROM order WHERE id = $id
                "#,
            )
            .bind(("id", id.clone()))
            .await?;
        let rows: Vec<OrderView> = result.take(0)?;
        Ok(rows.into_iter().next())
    }

    /// Newest-first summaries for one user
    pub async fn summaries_for_user(&self, user_id: &str) -> RepoResult<Vec<OrderSummary>> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT <string>id AS id, number, status, subtotal, discount, tax, total, \
                 created_at \
                 FROM order WHERE user_id = $user_id ORDER BY created_at DESC",
            )
            .bind(("user_id", user_id.to_string()))
            .await?;
        Ok(result.take(0)?)
    }

    /// Item rows with native supply links
    pub async fn items(&self, id: &RecordId) -> RepoResult<Vec<OrderItemRow>> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT supply, supply_name, quantity FROM order_item \
                 WHERE order_id = $id ORDER BY supply_name",
            )
            .bind(("id", id.clone()))
            .await?;
        Ok(result.take(0)?)
    }
}
