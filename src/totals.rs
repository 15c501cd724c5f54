//! Order totals

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{carts::LineItem, percentages::DiscountPercent};

/// The tax rate applied to the post-discount order total, as a fraction.
///
/// The standard rate is a named, overridable value rather than a literal
/// scattered through calculations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(Decimal);

impl TaxRate {
    /// The standard rate, 10%.
    #[must_use]
    pub fn standard() -> Self {
        TaxRate(Decimal::new(10, 2))
    }

    /// Creates a rate from a fraction (`0.10` for 10%).
    ///
    /// Negative fractions normalize to zero.
    #[must_use]
    pub fn new(fraction: Decimal) -> Self {
        TaxRate(fraction.max(Decimal::ZERO))
    }

    /// A rate that applies no tax.
    #[must_use]
    pub fn zero() -> Self {
        TaxRate(Decimal::ZERO)
    }

    /// The rate as a fraction.
    #[must_use]
    pub fn fraction(self) -> Decimal {
        self.0
    }

    /// The rate in percentage points, for display.
    #[must_use]
    pub fn points(self) -> Decimal {
        self.0 * Decimal::ONE_HUNDRED
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        Self::standard()
    }
}

/// The financial breakdown of a cart.
///
/// Recomputed on every call from the current line items and cart discount;
/// never stored as an independent entity. A checkout persists the grand
/// total (and optionally this whole breakdown) onto its order record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderTotals {
    /// Sum of unit price times quantity across all lines, before discounts.
    pub subtotal: Decimal,

    /// Sum of all per-item discount amounts.
    pub item_discount_total: Decimal,

    /// Amount removed by the cart-level discount, taken from the subtotal
    /// after item discounts.
    pub cart_discount_amount: Decimal,

    /// The tax base: subtotal after both item and cart discounts.
    pub taxable_amount: Decimal,

    /// Tax charged on the taxable amount.
    pub tax_amount: Decimal,

    /// Final amount due: taxable amount plus tax.
    pub grand_total: Decimal,
}

impl OrderTotals {
    /// The all-zero breakdown of an empty cart.
    #[must_use]
    pub fn zero() -> Self {
        OrderTotals {
            subtotal: Decimal::ZERO,
            item_discount_total: Decimal::ZERO,
            cart_discount_amount: Decimal::ZERO,
            taxable_amount: Decimal::ZERO,
            tax_amount: Decimal::ZERO,
            grand_total: Decimal::ZERO,
        }
    }
}

/// Computes the totals breakdown for a list of line items.
///
/// The order of operations is load-bearing business policy: item discounts
/// come off first, the cart discount applies to what remains, and tax is
/// charged only on the fully discounted base. An empty list yields the
/// all-zero breakdown. This function has no failure modes; out-of-range
/// discount percentages have already been clamped by [`DiscountPercent`].
#[must_use]
pub fn order_totals(
    lines: &[LineItem],
    cart_discount: DiscountPercent,
    tax_rate: TaxRate,
) -> OrderTotals {
    let subtotal: Decimal = lines.iter().map(LineItem::original_amount).sum();
    let item_discount_total: Decimal = lines.iter().map(LineItem::discount_amount).sum();

    let after_item_discounts = subtotal - item_discount_total;
    let cart_discount_amount = cart_discount.as_ratio() * after_item_discounts;

    let taxable_amount = after_item_discounts - cart_discount_amount;
    let tax_amount = taxable_amount * tax_rate.fraction();

    OrderTotals {
        subtotal,
        item_discount_total,
        cart_discount_amount,
        taxable_amount,
        tax_amount,
        grand_total: taxable_amount + tax_amount,
    }
}
