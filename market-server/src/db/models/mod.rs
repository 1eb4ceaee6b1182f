//! Database records and write payloads
//!
//! Write models keep native [`RecordId`] links so SDK binds produce true
//! record links, never look-alike strings. Read models for the wire are
//! produced by `<string>`-cast projections in the repositories instead
//! of re-serializing these structs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::order::{OrderStatus, ShippingInfo};
use surrealdb::RecordId;

/// A supply row as stored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supply {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub name: String,
    pub unit: String,
    pub unit_price: Decimal,
    pub available_stock: i64,
    pub created_at: String,
}

/// Payload for creating a supply (seeding and tests; the catalog has no
/// public write API)
#[derive(Debug, Clone, Serialize)]
pub struct SupplyCreate {
    pub name: String,
    pub unit: String,
    pub unit_price: Decimal,
    pub available_stock: i64,
    pub created_at: String,
}

/// A user's cart header. Lines live in `cart_line`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub user_id: String,
    pub created_at: String,
}

/// One cart line; unique per (cart, supply)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub cart: RecordId,
    pub supply: RecordId,
    pub quantity: i64,
    pub added_at: String,
}

/// Payload for creating a cart line
#[derive(Debug, Clone, Serialize)]
pub struct CartLineCreate {
    pub cart: RecordId,
    pub supply: RecordId,
    pub quantity: i64,
    pub added_at: String,
}

/// Order content written by the checkout transaction. The order number
/// is assigned inside the script from the persistent counter, so it is
/// not part of this payload.
#[derive(Debug, Clone, Serialize)]
pub struct OrderCreate {
    pub user_id: String,
    pub status: OrderStatus,
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub shipping: ShippingInfo,
    pub created_at: String,
}

/// Order item content with values frozen at checkout. `subtotal` is the
/// post-discount line total.
#[derive(Debug, Clone, Serialize)]
pub struct OrderItemCreate {
    pub order_id: RecordId,
    pub supply: RecordId,
    pub supply_name: String,
    pub unit: String,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub discount: Decimal,
    pub subtotal: Decimal,
}

/// One stock decrement inside the checkout transaction
#[derive(Debug, Clone, Serialize)]
pub struct DecrementLine {
    pub supply: RecordId,
    pub quantity: i64,
}
