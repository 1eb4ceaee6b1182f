//! Volume Pricing
//!
//! Pure price calculation for cart lines and order totals:
//! - per-line volume discounts (quantity tiers)
//! - flat sales tax on the post-discount order subtotal
//!
//! Uses rust_decimal end to end; binary floats never enter money math.
//! Checkout freezes these results into order items; the cart preview runs
//! the same functions read-only, so preview and checkout always agree.

use rust_decimal::{Decimal, RoundingStrategy};

/// Monetary values round to 2 decimal places, midpoint away from zero
const DECIMAL_PLACES: u32 = 2;

/// Lines of 10+ units get 10% off
pub const BULK_TIER_MIN_QTY: i64 = 10;
const BULK_TIER_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2); // 0.10

/// Lines of 5..=9 units get 5% off
pub const CASE_TIER_MIN_QTY: i64 = 5;
const CASE_TIER_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2); // 0.05

/// Flat sales tax, applied to the sum of post-discount line totals
pub const TAX_RATE: Decimal = Decimal::from_parts(7, 0, 0, false, 2); // 0.07

/// Round a monetary amount to cents
#[inline]
fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Discount rate for a line quantity. Exactly one tier applies: the
/// highest one the quantity reaches.
pub fn discount_rate(quantity: i64) -> Decimal {
    if quantity >= BULK_TIER_MIN_QTY {
        BULK_TIER_RATE
    } else if quantity >= CASE_TIER_MIN_QTY {
        CASE_TIER_RATE
    } else {
        Decimal::ZERO
    }
}

/// One line priced: input values plus every derived amount.
///
/// Invariant: `line_total == subtotal - discount`.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedLine {
    pub unit_price: Decimal,
    pub quantity: i64,
    /// unit_price * quantity, before discount
    pub subtotal: Decimal,
    /// Volume discount amount
    pub discount: Decimal,
    /// subtotal - discount
    pub line_total: Decimal,
}

/// Price a single line at the given catalog unit price
pub fn price_line(unit_price: Decimal, quantity: i64) -> PricedLine {
    let subtotal = round_money(unit_price * Decimal::from(quantity));
    let discount = round_money(subtotal * discount_rate(quantity));
    PricedLine {
        unit_price,
        quantity,
        subtotal,
        discount,
        line_total: subtotal - discount,
    }
}

/// Order-level totals over a set of priced lines.
///
/// `subtotal` is the sum of post-discount line totals; `discount` is the
/// informational sum of per-line discounts (already inside `subtotal`);
/// `total == subtotal + tax`.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

/// Sum priced lines into order totals and apply tax
pub fn price_order(lines: &[PricedLine]) -> OrderTotals {
    let subtotal: Decimal = lines.iter().map(|l| l.line_total).sum();
    let discount: Decimal = lines.iter().map(|l| l.discount).sum();
    let tax = round_money(subtotal * TAX_RATE);
    OrderTotals {
        subtotal,
        discount,
        tax,
        total: subtotal + tax,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(mantissa: i64, scale: u32) -> Decimal {
        Decimal::new(mantissa, scale)
    }

    // ==================== Discount tiers ====================

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(discount_rate(1), Decimal::ZERO);
        assert_eq!(discount_rate(4), Decimal::ZERO);
        assert_eq!(discount_rate(5), dec(5, 2));
        assert_eq!(discount_rate(9), dec(5, 2));
        assert_eq!(discount_rate(10), dec(10, 2));
        assert_eq!(discount_rate(250), dec(10, 2));
    }

    #[test]
    fn test_single_tier_applies() {
        // qty 12 reaches both tiers but only the bulk rate is applied
        let line = price_line(dec(1000, 2), 12);
        assert_eq!(line.discount, dec(1200, 2));
        assert_ne!(line.discount, dec(1200 + 600, 2));
    }

    // ==================== Line math ====================

    #[test]
    fn test_line_no_discount() {
        let line = price_line(dec(250, 2), 4);
        assert_eq!(line.subtotal, dec(1000, 2));
        assert_eq!(line.discount, Decimal::ZERO);
        assert_eq!(line.line_total, dec(1000, 2));
    }

    #[test]
    fn test_line_case_tier() {
        // 3.20 * 5 = 16.00, 5% = 0.80
        let line = price_line(dec(320, 2), 5);
        assert_eq!(line.subtotal, dec(1600, 2));
        assert_eq!(line.discount, dec(80, 2));
        assert_eq!(line.line_total, dec(1520, 2));
    }

    #[test]
    fn test_line_bulk_tier_worked_example() {
        // The canonical example: 10.00 * 12
        let line = price_line(dec(1000, 2), 12);
        assert_eq!(line.subtotal, dec(12000, 2));
        assert_eq!(line.discount, dec(1200, 2));
        assert_eq!(line.line_total, dec(10800, 2));
    }

    #[test]
    fn test_line_invariant_holds_under_rounding() {
        // 1.67 * 5 = 8.35, 5% = 0.4175 -> 0.42
        let line = price_line(dec(167, 2), 5);
        assert_eq!(line.subtotal, dec(835, 2));
        assert_eq!(line.discount, dec(42, 2));
        assert_eq!(line.line_total, dec(793, 2));
        assert_eq!(line.line_total + line.discount, line.subtotal);
    }

    #[test]
    fn test_discount_rounds_midpoint_away_from_zero() {
        // 1.70 * 5 = 8.50, 5% = 0.425: midpoint rounds up, not to even
        let line = price_line(dec(170, 2), 5);
        assert_eq!(line.discount, dec(43, 2));
    }

    // ==================== Order math ====================

    #[test]
    fn test_order_worked_example() {
        // One line of 10.00 * 12 -> subtotal 108.00, tax 7.56, total 115.56
        let lines = vec![price_line(dec(1000, 2), 12)];
        let totals = price_order(&lines);
        assert_eq!(totals.subtotal, dec(10800, 2));
        assert_eq!(totals.discount, dec(1200, 2));
        assert_eq!(totals.tax, dec(756, 2));
        assert_eq!(totals.total, dec(11556, 2));
    }

    #[test]
    fn test_order_mixed_tiers() {
        let lines = vec![
            price_line(dec(450, 2), 2),  // 9.00, no discount
            price_line(dec(200, 2), 6),  // 12.00 - 0.60 = 11.40
            price_line(dec(125, 2), 10), // 12.50 - 1.25 = 11.25
        ];
        let totals = price_order(&lines);
        assert_eq!(totals.subtotal, dec(3165, 2));
        assert_eq!(totals.discount, dec(185, 2));
        // 31.65 * 0.07 = 2.2155 -> 2.22
        assert_eq!(totals.tax, dec(222, 2));
        assert_eq!(totals.total, dec(3387, 2));
    }

    #[test]
    fn test_tax_rounds_midpoint_away_from_zero() {
        // subtotal 7.50 -> tax 0.525 -> 0.53
        let lines = vec![price_line(dec(750, 2), 1)];
        let totals = price_order(&lines);
        assert_eq!(totals.tax, dec(53, 2));
        assert_eq!(totals.total, dec(803, 2));
    }

    #[test]
    fn test_empty_order_is_all_zero() {
        let totals = price_order(&[]);
        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.discount, Decimal::ZERO);
        assert_eq!(totals.tax, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::ZERO);
    }

    #[test]
    fn test_order_invariants() {
        let lines = vec![
            price_line(dec(399, 2), 7),
            price_line(dec(1249, 2), 11),
            price_line(dec(85, 2), 3),
        ];
        let totals = price_order(&lines);
        let line_sum: Decimal = lines.iter().map(|l| l.line_total).sum();
        assert_eq!(totals.subtotal, line_sum);
        assert_eq!(totals.total, totals.subtotal + totals.tax);
    }
}
