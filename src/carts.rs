//! Carts and line items

use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use serde::{Deserialize, Serialize};

use crate::{
    percentages::DiscountPercent,
    totals::{OrderTotals, TaxRate, order_totals},
};

/// One product entry in a cart.
///
/// The identifier is opaque and unique per distinct product and
/// configuration within a cart. Quantity is assumed to be at least one;
/// validating that is the caller's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    id: String,
    unit_price: Decimal,
    quantity: u32,
    #[serde(default)]
    discount: DiscountPercent,
}

impl LineItem {
    /// Creates an undiscounted line item.
    #[must_use]
    pub fn new(id: impl Into<String>, unit_price: Decimal, quantity: u32) -> Self {
        Self {
            id: id.into(),
            unit_price,
            quantity,
            discount: DiscountPercent::ZERO,
        }
    }

    /// Sets the per-item discount.
    #[must_use]
    pub fn with_discount(mut self, discount: DiscountPercent) -> Self {
        self.discount = discount;
        self
    }

    /// The opaque line identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The price of a single unit.
    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// The number of units.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// The per-item discount.
    #[must_use]
    pub fn discount(&self) -> DiscountPercent {
        self.discount
    }

    /// The pre-discount amount for this line: unit price times quantity.
    #[must_use]
    pub fn original_amount(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }

    /// The amount removed from this line by its discount.
    ///
    /// The discount percentage is clamped into `[0, 100]` on the way
    /// through [`DiscountPercent::as_ratio`], whatever was stored.
    #[must_use]
    pub fn discount_amount(&self) -> Decimal {
        self.discount.as_ratio() * self.original_amount()
    }

    /// The amount actually charged for this line after its discount.
    ///
    /// Never negative for non-negative unit prices.
    #[must_use]
    pub fn final_amount(&self) -> Decimal {
        self.original_amount() - self.discount_amount()
    }
}

/// An ordered collection of line items plus a cart-level discount.
///
/// The cart discount applies after item discounts and before tax. The
/// currency is presentation metadata; all arithmetic stays in [`Decimal`].
#[derive(Debug, Clone)]
pub struct Cart {
    lines: Vec<LineItem>,
    discount: DiscountPercent,
    currency: &'static Currency,
}

impl Cart {
    /// Creates an empty cart.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            lines: Vec::new(),
            discount: DiscountPercent::ZERO,
            currency,
        }
    }

    /// Creates a cart with the given lines.
    #[must_use]
    pub fn with_lines(lines: impl Into<Vec<LineItem>>, currency: &'static Currency) -> Self {
        Cart {
            lines: lines.into(),
            discount: DiscountPercent::ZERO,
            currency,
        }
    }

    /// Sets the cart-level discount.
    #[must_use]
    pub fn with_discount(mut self, discount: DiscountPercent) -> Self {
        self.discount = discount;
        self
    }

    /// Appends a line item.
    pub fn push(&mut self, line: LineItem) {
        self.lines.push(line);
    }

    /// The line items, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    /// Iterates over the line items.
    pub fn iter(&self) -> std::slice::Iter<'_, LineItem> {
        self.lines.iter()
    }

    /// The cart-level discount.
    #[must_use]
    pub fn discount(&self) -> DiscountPercent {
        self.discount
    }

    /// The number of line items in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Checks whether the cart has no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The display currency of the cart.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Computes the totals breakdown for the cart at the given tax rate.
    #[must_use]
    pub fn totals(&self, tax_rate: TaxRate) -> OrderTotals {
        order_totals(&self.lines, self.discount, tax_rate)
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
