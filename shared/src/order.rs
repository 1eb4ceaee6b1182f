//! Order wire types: status machine, checkout inputs, order views

use crate::cart::PricedCartView;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Order lifecycle status
///
/// The only legal transitions:
///
/// ```text
/// pending -> processing -> shipped -> delivered
/// pending | processing -> cancelled
/// ```
///
/// `delivered` and `cancelled` are terminal. Stored and serialized as
/// lowercase strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether `self -> next` is a legal lifecycle transition
    pub const fn can_transition_to(&self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Processing)
                | (Self::Processing, Self::Shipped)
                | (Self::Shipped, Self::Delivered)
                | (Self::Pending, Self::Cancelled)
                | (Self::Processing, Self::Cancelled)
        )
    }

    /// Orders can only be cancelled before they ship
    pub const fn is_cancellable(&self) -> bool {
        matches!(self, Self::Pending | Self::Processing)
    }

    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// The status that must currently hold for a forward move to `next`.
    /// Cancellation is not a forward move; it has its own path.
    pub const fn predecessor_of(next: OrderStatus) -> Option<OrderStatus> {
        match next {
            Self::Processing => Some(Self::Pending),
            Self::Shipped => Some(Self::Processing),
            Self::Delivered => Some(Self::Shipped),
            Self::Pending | Self::Cancelled => None,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(format!("unknown order status: {}", other)),
        }
    }
}

/// Shipping block frozen onto the order at checkout
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ShippingInfo {
    #[validate(length(min = 1, message = "recipient is required"))]
    pub recipient: String,
    #[validate(length(min = 5, message = "phone is required"))]
    pub phone: String,
    #[validate(length(min = 1, message = "address is required"))]
    pub address: String,
    #[validate(length(min = 1, message = "city is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "postal_code is required"))]
    pub postal_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Request body for `POST /api/orders/checkout`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CheckoutRequest {
    #[validate(nested)]
    pub shipping: ShippingInfo,
}

/// Request body for `PUT /api/orders/{id}/status` (merchant operation)
///
/// Only forward moves are accepted here; cancellation goes through the
/// cancel endpoint because it restocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
}

/// One order line with values frozen at checkout time.
///
/// `unit_price`, `discount` and `subtotal` never change after the order
/// is placed, no matter what happens to the catalog. `subtotal` is the
/// post-discount line total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemView {
    /// Record id of the supply at purchase time (`supply:key`); the
    /// supply itself may no longer exist.
    pub supply_id: String,
    pub supply_name: String,
    pub unit: String,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub discount: Decimal,
    pub subtotal: Decimal,
}

/// Order list row (no items)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSummary {
    /// Record id in `order:key` form
    pub id: String,
    pub number: String,
    pub status: OrderStatus,
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub created_at: String,
}

/// Full order detail with frozen items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderView {
    /// Record id in `order:key` form
    pub id: String,
    pub number: String,
    pub user_id: String,
    pub status: OrderStatus,
    /// Sum of post-discount line totals
    pub subtotal: Decimal,
    /// Sum of per-line volume discounts (informational; already
    /// reflected in `subtotal`)
    pub discount: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub shipping: ShippingInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipped_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivered_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<String>,
    pub items: Vec<OrderItemView>,
}

/// Result of `POST /api/orders/{id}/reorder`
///
/// Best-effort by design: items that no longer have enough stock (or
/// whose supply vanished) are skipped and reported by their frozen
/// name; the rest land in the freshly cleared cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderOutcome {
    pub cart: PricedCartView,
    pub skipped: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legal_transitions() {
        use OrderStatus::*;
        assert!(Pending.can_transition_to(Processing));
        assert!(Processing.can_transition_to(Shipped));
        assert!(Shipped.can_transition_to(Delivered));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Processing.can_transition_to(Cancelled));
    }

    #[test]
    fn test_illegal_transitions() {
        use OrderStatus::*;
        assert!(!Pending.can_transition_to(Shipped));
        assert!(!Pending.can_transition_to(Delivered));
        assert!(!Shipped.can_transition_to(Cancelled));
        assert!(!Delivered.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Pending));
        assert!(!Cancelled.can_transition_to(Cancelled));
        assert!(!Delivered.can_transition_to(Pending));
    }

    #[test]
    fn test_cancellable_states() {
        assert!(OrderStatus::Pending.is_cancellable());
        assert!(OrderStatus::Processing.is_cancellable());
        assert!(!OrderStatus::Shipped.is_cancellable());
        assert!(!OrderStatus::Delivered.is_cancellable());
        assert!(!OrderStatus::Cancelled.is_cancellable());
    }

    #[test]
    fn test_terminal_states() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::Processing.is_terminal());
        assert!(!OrderStatus::Shipped.is_terminal());
    }

    #[test]
    fn test_predecessor_chain() {
        assert_eq!(
            OrderStatus::predecessor_of(OrderStatus::Processing),
            Some(OrderStatus::Pending)
        );
        assert_eq!(
            OrderStatus::predecessor_of(OrderStatus::Shipped),
            Some(OrderStatus::Processing)
        );
        assert_eq!(
            OrderStatus::predecessor_of(OrderStatus::Delivered),
            Some(OrderStatus::Shipped)
        );
        assert_eq!(OrderStatus::predecessor_of(OrderStatus::Cancelled), None);
    }

    #[test]
    fn test_status_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Pending).unwrap(),
            "\"pending\""
        );
        let status: OrderStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(status, OrderStatus::Cancelled);
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("shipped".parse::<OrderStatus>(), Ok(OrderStatus::Shipped));
        assert!("returned".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_shipping_info_validation() {
        let ok = ShippingInfo {
            recipient: "Marta Oliveira".into(),
            phone: "+34 600 123 456".into(),
            address: "Camí de l'Horta 12".into(),
            city: "Valencia".into(),
            postal_code: "46001".into(),
            note: None,
        };
        assert!(ok.validate().is_ok());

        let missing_city = ShippingInfo {
            city: "".into(),
            ..ok.clone()
        };
        assert!(missing_city.validate().is_err());

        let short_phone = ShippingInfo {
            phone: "12".into(),
            ..ok
        };
        assert!(short_phone.validate().is_err());
    }
}
