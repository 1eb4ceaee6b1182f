//! Supply catalog wire types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A farm supply as exposed by the catalog API.
///
/// `unit_price` is the price per `unit` ("bunch", "dozen", "kg", ...).
/// Prices are fixed-point decimals end to end; they are serialized as
/// strings in JSON so no client ever touches a binary float.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplyView {
    /// Record id in `supply:key` form
    pub id: String,
    pub name: String,
    pub unit: String,
    pub unit_price: Decimal,
    pub available_stock: i64,
}
