//! Receipts
//!
//! Terminal rendering of a priced cart. All arithmetic happens upstream in
//! [`crate::totals`]; this module only converts exact decimal amounts to
//! display money, rounding half away from zero at the last moment.

use std::io;

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    carts::Cart,
    totals::{OrderTotals, TaxRate},
};

/// Errors that can occur while rendering a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// An amount was too large to express in minor currency units.
    #[error("amount {0} cannot be represented in minor units")]
    AmountOverflow(Decimal),

    /// IO error writing the receipt.
    #[error("failed to write receipt: {0}")]
    Io(#[from] io::Error),
}

/// A printable receipt for a priced cart.
#[derive(Debug)]
pub struct Receipt<'a> {
    cart: &'a Cart,
    totals: OrderTotals,
    tax_points: Decimal,
}

impl<'a> Receipt<'a> {
    /// Builds a receipt from a cart and the tax rate it was priced at.
    #[must_use]
    pub fn new(cart: &'a Cart, tax_rate: TaxRate) -> Self {
        Receipt {
            cart,
            totals: cart.totals(tax_rate),
            tax_points: tax_rate.points(),
        }
    }

    /// The totals breakdown backing this receipt.
    #[must_use]
    pub fn totals(&self) -> &OrderTotals {
        &self.totals
    }

    /// The amount saved across item and cart discounts.
    #[must_use]
    pub fn savings(&self) -> Decimal {
        self.totals.item_discount_total + self.totals.cart_discount_amount
    }

    /// The savings as a fraction of the pre-discount subtotal.
    #[must_use]
    pub fn savings_percent(&self) -> Percentage {
        if self.totals.subtotal.is_zero() {
            return Percentage::from(0.0);
        }

        Percentage::from(self.savings() / self.totals.subtotal)
    }

    /// Writes the rendered receipt: an item table followed by the totals
    /// summary.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if an amount cannot be expressed in the
    /// cart currency's minor units, or if writing to `out` fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let currency = self.cart.currency();
        let mut builder = Builder::default();

        builder.push_record(["#", "Item", "Qty", "Unit Price", "Discount", "Line Total"]);

        for (idx, line) in self.cart.iter().enumerate() {
            let discount_cell = if line.discount().is_zero() {
                String::new()
            } else {
                format!(
                    "-{} ({})",
                    display_money(line.discount_amount(), currency)?,
                    line.discount()
                )
            };

            builder.push_record([
                format!("{}", idx + 1),
                line.id().to_string(),
                line.quantity().to_string(),
                display_money(line.unit_price(), currency)?.to_string(),
                discount_cell,
                display_money(line.final_amount(), currency)?.to_string(),
            ]);
        }

        write_receipt_table(&mut out, builder)?;
        self.write_summary(&mut out, currency)
    }

    fn write_summary(
        &self,
        out: &mut impl io::Write,
        currency: &'static Currency,
    ) -> Result<(), ReceiptError> {
        let mut rows: Vec<(String, String)> = vec![(
            "Subtotal".to_string(),
            display_money(self.totals.subtotal, currency)?.to_string(),
        )];

        if !self.totals.item_discount_total.is_zero() {
            rows.push((
                "Item discounts".to_string(),
                format!(
                    "-{}",
                    display_money(self.totals.item_discount_total, currency)?
                ),
            ));
        }

        if !self.totals.cart_discount_amount.is_zero() {
            rows.push((
                format!("Cart discount ({})", self.cart.discount()),
                format!(
                    "-{}",
                    display_money(self.totals.cart_discount_amount, currency)?
                ),
            ));
        }

        rows.push((
            format!("Tax ({}%)", self.tax_points.round_dp(2)),
            display_money(self.totals.tax_amount, currency)?.to_string(),
        ));

        rows.push((
            "Total".to_string(),
            display_money(self.totals.grand_total, currency)?.to_string(),
        ));

        let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
        let value_width = rows.iter().map(|(_, value)| value.len()).max().unwrap_or(0);

        for (label, value) in &rows {
            writeln!(out, " {label:<label_width$}  {value:>value_width$}")?;
        }

        writeln!(out)?;

        Ok(())
    }
}

/// Converts an exact decimal amount to display money in `currency`.
fn display_money(
    amount: Decimal,
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, ReceiptError> {
    Ok(Money::from_minor(minor_units(amount, currency)?, currency))
}

/// Rounds an amount to the currency's minor units, half away from zero.
fn minor_units(amount: Decimal, currency: &Currency) -> Result<i64, ReceiptError> {
    let factor = Decimal::from(10u64.pow(currency.exponent));

    let scaled = amount
        .checked_mul(factor)
        .ok_or(ReceiptError::AmountOverflow(amount))?;

    scaled
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(ReceiptError::AmountOverflow(amount))
}

fn write_receipt_table(out: &mut impl io::Write, builder: Builder) -> Result<(), ReceiptError> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator);

    table.with(theme);
    table.modify(Rows::first(), Alignment::center());
    table.modify(Columns::new(2..6), Alignment::right());

    writeln!(out, "{table}")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::iso;
    use testresult::TestResult;

    use crate::{
        carts::{Cart, LineItem},
        percentages::DiscountPercent,
        totals::TaxRate,
    };

    use super::*;

    fn decimal(value: &str) -> Decimal {
        Decimal::from_str_exact(value).unwrap_or(Decimal::ZERO)
    }

    fn reference_cart() -> Cart {
        Cart::with_lines(
            vec![
                LineItem::new("tomato soup", decimal("5.50"), 2),
                LineItem::new("bread roll", decimal("3.00"), 1)
                    .with_discount(DiscountPercent::new(decimal("50"))),
            ],
            iso::USD,
        )
        .with_discount(DiscountPercent::new(decimal("10")))
    }

    fn render(receipt: &Receipt<'_>) -> Result<String, ReceiptError> {
        let mut out = Vec::new();
        receipt.write_to(&mut out)?;

        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    #[test]
    fn minor_units_round_half_away_from_zero() -> TestResult {
        assert_eq!(minor_units(decimal("12.375"), iso::USD)?, 1238);
        assert_eq!(minor_units(decimal("1.125"), iso::USD)?, 113);
        assert_eq!(minor_units(decimal("14.00"), iso::USD)?, 1400);

        Ok(())
    }

    #[test]
    fn minor_units_overflow_is_reported() {
        let result = minor_units(Decimal::MAX, iso::USD);

        assert!(
            matches!(result, Err(ReceiptError::AmountOverflow(_))),
            "expected overflow error"
        );
    }

    #[test]
    fn rendered_receipt_contains_the_breakdown() -> TestResult {
        let cart = reference_cart();
        let receipt = Receipt::new(&cart, TaxRate::standard());
        let rendered = render(&receipt)?;

        assert!(rendered.contains("tomato soup"), "missing item name");
        assert!(rendered.contains("$14.00"), "missing subtotal");
        assert!(rendered.contains("Cart discount (10%)"), "missing cart discount");
        assert!(rendered.contains("$1.13"), "missing rounded tax");
        assert!(rendered.contains("$12.38"), "missing rounded total");

        Ok(())
    }

    #[test]
    fn zero_discount_lines_leave_the_discount_column_blank() -> TestResult {
        let cart = Cart::with_lines(vec![LineItem::new("espresso", decimal("2.50"), 1)], iso::USD);
        let receipt = Receipt::new(&cart, TaxRate::standard());
        let rendered = render(&receipt)?;

        assert!(
            !rendered.contains("Item discounts"),
            "summary must omit a zero item-discount row"
        );

        Ok(())
    }

    #[test]
    fn savings_percent_of_empty_cart_is_zero() {
        let cart = Cart::new(iso::USD);
        let receipt = Receipt::new(&cart, TaxRate::standard());

        assert_eq!(receipt.savings_percent() * Decimal::ONE, Decimal::ZERO);
    }

    #[test]
    fn savings_cover_both_discount_layers() {
        let cart = reference_cart();
        let receipt = Receipt::new(&cart, TaxRate::standard());

        assert_eq!(receipt.savings(), decimal("2.75"));
    }
}
