//! Checkout
//!
//! Converts the user's cart into an order. Pricing happens in Rust
//! against the catalog rows read under the user's lock; the writes run
//! as one storage transaction: every line's stock conditionally
//! decremented, the order and its frozen items created, the order
//! numbered from the persistent counter, the cart cleared. Any guard
//! firing rolls all of it back, so a failed checkout changes nothing.

use super::{OrderError, OrderResult, OrderService, cart_record_id};
use crate::db::models::{DecrementLine, OrderCreate, OrderItemCreate, Supply};
use crate::db::repository::order::ORDER_TABLE;
use crate::db::repository::supply::DECREMENT_FRAGMENT;
use crate::db::repository::StockError;
use crate::db::tx::{self, TxError};
use crate::pricing;
use crate::utils::time::{now_rfc3339, today_compact};
use shared::order::{OrderStatus, OrderView, ShippingInfo};
use std::collections::HashMap;
use surrealdb::RecordId;
use uuid::Uuid;

/// Order numbers read `FM<yyyymmdd><seq>`, seq from the counter record
const ORDER_NUMBER_PREFIX: &str = "FM";

fn checkout_script() -> String {
    format!(
        r#"
        BEGIN TRANSACTION;
        {DECREMENT_FRAGMENT}
        LET $seq = (UPSERT ONLY order_counter:checkout SET value += 1 RETURN AFTER).value;
        CREATE $order_id CONTENT $order;
        UPDATE $order_id SET number = $number_prefix + <string>(100000 + $seq);
        FOR $item IN $items {{
            CREATE order_item CONTENT $item;
        }};
        DELETE cart_line WHERE cart = $cart;
        COMMIT TRANSACTION;
        "#
    )
}

impl OrderService {
    /// All-or-nothing checkout of the user's cart
    pub async fn checkout(&self, user_id: &str, shipping: ShippingInfo) -> OrderResult<OrderView> {
        let _guard = self.locks.acquire(user_id).await;

        let cart = self.carts.get_or_create(user_id).await?;
        let cart_id = cart_record_id(&cart)?;
        let lines = self.carts.lines(&cart_id).await?;
        if lines.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        // Catalog rows for pricing; a supply that vanished since it was
        // added fails exactly like an empty shelf
        let ids: Vec<RecordId> = lines.iter().map(|line| line.supply.clone()).collect();
        let supplies = self.supplies.find_bulk(ids).await?;
        let by_id: HashMap<String, Supply> = supplies
            .into_iter()
            .filter_map(|s| s.id.clone().map(|id| (id.to_string(), s)))
            .collect();

        let order_id = RecordId::from_table_key(ORDER_TABLE, Uuid::new_v4().simple().to_string());

        let mut decrements = Vec::with_capacity(lines.len());
        let mut items = Vec::with_capacity(lines.len());
        let mut priced = Vec::with_capacity(lines.len());
        for line in &lines {
            let supply = by_id.get(&line.supply.to_string()).ok_or_else(|| {
                OrderError::InsufficientStock {
                    supply_id: line.supply.to_string(),
                    requested: line.quantity,
                    available: 0,
                }
            })?;

            let p = pricing::price_line(supply.unit_price, line.quantity);
            decrements.push(DecrementLine {
                supply: line.supply.clone(),
                quantity: line.quantity,
            });
            items.push(OrderItemCreate {
                order_id: order_id.clone(),
                supply: line.supply.clone(),
                supply_name: supply.name.clone(),
                unit: supply.unit.clone(),
                quantity: line.quantity,
                unit_price: p.unit_price,
                discount: p.discount,
                subtotal: p.line_total,
            });
            priced.push(p);
        }
        let totals = pricing::price_order(&priced);

        let order = OrderCreate {
            user_id: user_id.to_string(),
            status: OrderStatus::Pending,
            subtotal: totals.subtotal,
            discount: totals.discount,
            tax: totals.tax,
            total: totals.total,
            shipping,
            created_at: now_rfc3339(),
        };
        let number_prefix = format!("{ORDER_NUMBER_PREFIX}{}", today_compact());

        let script = checkout_script();
        let db = self.db.clone();
        let outcome = tx::run_with_retry(|| {
            let db = db.clone();
            let script = script.clone();
            let lines = decrements.clone();
            let order_id = order_id.clone();
            let order = order.clone();
            let items = items.clone();
            let cart = cart_id.clone();
            let number_prefix = number_prefix.clone();
            async move {
                db.query(script)
                    .bind(("lines", lines))
                    .bind(("order_id", order_id))
                    .bind(("order", order))
                    .bind(("items", items))
                    .bind(("cart", cart))
                    .bind(("number_prefix", number_prefix))
                    .await
            }
        })
        .await;

        match outcome {
            Ok(_) => {}
            Err(TxError::Thrown(payload)) => {
                if let Some(stock) = StockError::from_thrown(&payload) {
                    return Err(stock.into());
                }
                return Err(OrderError::Database(format!("checkout aborted: {payload}")));
            }
            Err(other) => return Err(other.into()),
        }

        let view = self.fresh_view(&order_id).await?;
        tracing::info!(
            user = user_id,
            order = %view.number,
            total = %view.total,
            "🧾 order placed"
        );
        Ok(view)
    }
}
