//! Order lifecycle
//!
//! Cancellation flips a pending or processing order to cancelled and
//! returns stock for every item, one transaction for both; a supply
//! deleted since purchase is skipped without complaint. Forward moves
//! (pending → processing → shipped → delivered) go through
//! [`OrderService::update_status`], guarded on the immediate
//! predecessor so a stale client can never jump the chain.

use super::{OrderError, OrderResult, OrderService};
use crate::db::repository::supply::RESTOCK_FRAGMENT;
use crate::db::repository::{OrderHead, RepoError};
use crate::db::tx::{self, TxError};
use crate::utils::time::now_rfc3339;
use shared::order::{OrderStatus, OrderView};
use surrealdb::RecordId;

/// The transition guard lives inside the script: with two cancels in
/// flight, the loser's retry re-reads the committed status, throws, and
/// never restocks a second time.
fn cancel_script() -> String {
    format!(
        r#"
        BEGIN TRANSACTION;
        LET $ord = (SELECT id, status FROM $order_id)[0];
        IF $ord == NONE {{
            THROW 'order_missing|' + <string>$order_id;
        }};
        IF $ord.status NOT IN ['pending', 'processing'] {{
            THROW 'invalid_transition|' + $ord.status;
        }};
        {RESTOCK_FRAGMENT}
        UPDATE $order_id SET status = 'cancelled', cancelled_at = $now;
        COMMIT TRANSACTION;
        "#
    )
}

impl OrderService {
    /// Cancel an order, restocking every item
    pub async fn cancel(&self, user_id: &str, order_id: &RecordId) -> OrderResult<OrderView> {
        self.owned_head(user_id, order_id).await?;

        let script = cancel_script();
        let db = self.db.clone();
        let now = now_rfc3339();
        let outcome = tx::run_with_retry(|| {
            let db = db.clone();
            let script = script.clone();
            let order_id = order_id.clone();
            let now = now.clone();
            async move {
                db.query(script)
                    .bind(("order_id", order_id))
                    .bind(("now", now))
                    .await
            }
        })
        .await;

        match outcome {
            Ok(_) => {}
            Err(TxError::Thrown(payload)) => return Err(cancel_abort(order_id, &payload)),
            Err(other) => return Err(other.into()),
        }

        let view = self.fresh_view(order_id).await?;
        tracing::info!(user = user_id, order = %view.number, "✅ order cancelled, stock returned");
        Ok(view)
    }

    /// Move an order one step forward along
    /// pending → processing → shipped → delivered.
    ///
    /// Staff-side operation: not scoped to the buyer. Shipping stamps
    /// `shipped_at` and the tracking number, delivery stamps
    /// `delivered_at`. Cancellation is not reachable from here.
    pub async fn update_status(
        &self,
        order_id: &RecordId,
        next: OrderStatus,
        tracking_number: Option<String>,
    ) -> OrderResult<OrderView> {
        let head = self
            .orders
            .head(order_id)
            .await?
            .ok_or_else(|| OrderError::OrderNotFound(order_id.to_string()))?;

        let Some(required) = OrderStatus::predecessor_of(next) else {
            return Err(OrderError::InvalidTransition {
                order_id: order_id.to_string(),
                from: head.status,
            });
        };

        let stamp = match next {
            OrderStatus::Shipped => ", shipped_at = $now, tracking_number = $tracking",
            OrderStatus::Delivered => ", delivered_at = $now",
            _ => "",
        };
        let query = format!(
            "UPDATE $order_id SET status = $next{stamp} WHERE status = $required \
             RETURN <string>id AS id, user_id, status"
        );

        let mut response = self
            .db
            .query(query)
            .bind(("order_id", order_id.clone()))
            .bind(("next", next))
            .bind(("required", required))
            .bind(("now", now_rfc3339()))
            .bind(("tracking", tracking_number))
            .await
            .map_err(RepoError::from)?;
        let moved: Vec<OrderHead> = response.take(0).map_err(RepoError::from)?;

        if moved.is_empty() {
            // guard missed: report the status the order actually has
            let head = self
                .orders
                .head(order_id)
                .await?
                .ok_or_else(|| OrderError::OrderNotFound(order_id.to_string()))?;
            return Err(OrderError::InvalidTransition {
                order_id: order_id.to_string(),
                from: head.status,
            });
        }

        let view = self.fresh_view(order_id).await?;
        tracing::info!(order = %view.number, status = %next, "📦 order status updated");
        Ok(view)
    }
}

fn cancel_abort(order_id: &RecordId, payload: &str) -> OrderError {
    let parts = tx::split_payload(payload);
    match parts.as_slice() {
        ["invalid_transition", from] => OrderError::InvalidTransition {
            order_id: order_id.to_string(),
            from: from.parse().unwrap_or(OrderStatus::Cancelled),
        },
        ["order_missing", id] => OrderError::OrderNotFound((*id).to_string()),
        _ => OrderError::Database(format!("cancellation aborted: {payload}")),
    }
}
