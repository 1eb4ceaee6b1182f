//! Cart wire types: mutation requests and the priced preview

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request body for `POST /api/cart/items`
///
/// Adding a supply that is already in the cart merges by summing
/// quantities; it never creates a second line.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddItemRequest {
    #[validate(length(min = 1, message = "supply_id is required"))]
    pub supply_id: String,
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: i64,
}

/// Request body for `PUT /api/cart/items/{supply_id}`
///
/// Sets the line quantity outright. Use DELETE to drop a line; a
/// quantity of zero is rejected.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateItemRequest {
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: i64,
}

/// One cart line priced against the current catalog.
///
/// `name`/`unit` are `None` when the supply has been removed from the
/// catalog since the line was added; such lines price at zero and fail
/// checkout with insufficient stock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricedLineView {
    /// Record id in `supply:key` form
    pub supply_id: String,
    pub name: Option<String>,
    pub unit: Option<String>,
    pub unit_price: Decimal,
    pub quantity: i64,
    /// unit_price * quantity, before discount
    pub subtotal: Decimal,
    /// Volume discount amount for this line
    pub discount: Decimal,
    /// subtotal - discount
    pub line_total: Decimal,
    /// Current catalog stock (0 when the supply no longer exists)
    pub available_stock: i64,
    /// Advisory only: whether available_stock covers this line's quantity.
    /// Checkout re-validates under the commit transaction.
    pub in_stock: bool,
}

/// The user's cart, priced read-only with the same engine checkout uses.
///
/// `subtotal` is the sum of post-discount line totals (it already has
/// `discount` taken out); `total = subtotal + tax`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricedCartView {
    pub lines: Vec<PricedLineView>,
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl PricedCartView {
    /// An empty cart still prices to all-zero totals
    pub fn empty() -> Self {
        Self {
            lines: Vec::new(),
            subtotal: Decimal::ZERO,
            discount: Decimal::ZERO,
            tax: Decimal::ZERO,
            total: Decimal::ZERO,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_item_request_validation() {
        let ok = AddItemRequest {
            supply_id: "supply:kale".into(),
            quantity: 3,
        };
        assert!(ok.validate().is_ok());

        let zero_qty = AddItemRequest {
            supply_id: "supply:kale".into(),
            quantity: 0,
        };
        assert!(zero_qty.validate().is_err());

        let no_id = AddItemRequest {
            supply_id: "".into(),
            quantity: 3,
        };
        assert!(no_id.validate().is_err());
    }

    #[test]
    fn test_update_item_request_rejects_negative() {
        let req = UpdateItemRequest { quantity: -2 };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_empty_cart_view() {
        let view = PricedCartView::empty();
        assert!(view.is_empty());
        assert_eq!(view.total, Decimal::ZERO);
    }
}
