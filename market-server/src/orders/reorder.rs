//! Reorder
//!
//! Rebuilds the user's cart from a past order, best effort: the cart is
//! cleared first, then every item whose supply still covers its
//! historical quantity goes back in; the rest are reported by the name
//! frozen on the order item, since the supply itself may be gone.
//! Nothing is reserved, and the order is left untouched.

use super::{OrderResult, OrderService, cart_record_id};
use crate::services::cart_service::build_preview;
use shared::order::ReorderOutcome;
use surrealdb::RecordId;

impl OrderService {
    pub async fn reorder(&self, user_id: &str, order_id: &RecordId) -> OrderResult<ReorderOutcome> {
        let _guard = self.locks.acquire(user_id).await;
        self.owned_head(user_id, order_id).await?;

        let items = self.orders.items(order_id).await?;
        let cart = self.carts.get_or_create(user_id).await?;
        let cart_id = cart_record_id(&cart)?;
        self.carts.clear(&cart_id).await?;

        let mut skipped = Vec::new();
        for item in items {
            match self.supplies.find_by_id(&item.supply).await? {
                Some(supply) if supply.available_stock >= item.quantity => {
                    self.carts
                        .add_line(&cart_id, &item.supply, item.quantity)
                        .await?;
                }
                _ => skipped.push(item.supply_name),
            }
        }

        let rows = self.carts.lines_joined(&cart_id).await?;
        let cart_view = build_preview(rows);
        tracing::info!(
            user = user_id,
            order = %order_id,
            restored = cart_view.lines.len(),
            skipped = skipped.len(),
            "🛒 cart rebuilt from past order"
        );
        Ok(ReorderOutcome {
            cart: cart_view,
            skipped,
        })
    }
}
