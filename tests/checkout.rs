//! Integration test walking a full checkout: load a cart fixture, price it,
//! issue an order number and render the receipt.
//!
//! The lunch fixture is the reference discount scenario: two soups at $5.50,
//! one half-price roll at $3.00, a 10% cart discount and the standard 10%
//! tax rate. Exact decimal expectations:
//!
//! - subtotal 14.00
//! - item discounts 1.50
//! - cart discount 1.25 (10% of 12.50)
//! - taxable amount 11.25
//! - tax 1.125
//! - grand total 12.375, displayed as $12.38

use std::cell::Cell;

use jiff::civil::{Date, date};
use rust_decimal::Decimal;
use testresult::TestResult;

use till::prelude::*;

struct FixedClock(Cell<Date>);

impl Clock for &FixedClock {
    fn today(&self) -> Date {
        self.0.get()
    }
}

#[test]
fn lunch_fixture_prices_exactly() -> TestResult {
    let cart = CartFixture::from_set("lunch")?.into_cart()?;
    let totals = cart.totals(TaxRate::standard());

    assert_eq!(totals.subtotal, Decimal::from_str_exact("14.00")?);
    assert_eq!(totals.item_discount_total, Decimal::from_str_exact("1.50")?);
    assert_eq!(
        totals.cart_discount_amount,
        Decimal::from_str_exact("1.25")?
    );
    assert_eq!(totals.taxable_amount, Decimal::from_str_exact("11.25")?);
    assert_eq!(totals.tax_amount, Decimal::from_str_exact("1.125")?);
    assert_eq!(totals.grand_total, Decimal::from_str_exact("12.375")?);

    Ok(())
}

#[test]
fn breakfast_fixture_taxes_after_its_item_discount() -> TestResult {
    let cart = CartFixture::from_set("breakfast")?.into_cart()?;
    let totals = cart.totals(TaxRate::standard());

    // 2 x 2.50 + 3.25 + 4.00 = 12.25, minus 25% of 4.00.
    assert_eq!(totals.subtotal, Decimal::from_str_exact("12.25")?);
    assert_eq!(totals.item_discount_total, Decimal::from_str_exact("1.00")?);
    assert_eq!(totals.cart_discount_amount, Decimal::ZERO);
    assert_eq!(totals.taxable_amount, Decimal::from_str_exact("11.25")?);
    assert_eq!(totals.grand_total, Decimal::from_str_exact("12.375")?);

    Ok(())
}

#[test]
fn edited_fixture_round_trips_through_a_temp_file() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("lunch.yml");

    let contents = std::fs::read_to_string("./fixtures/lunch.yml")?;
    std::fs::write(&path, contents.replace("10%", "0%"))?;

    let cart = CartFixture::from_path(&path)?.into_cart()?;
    let totals = cart.totals(TaxRate::standard());

    // Without the cart discount the 12.50 post-item-discount base is taxed
    // directly.
    assert_eq!(totals.cart_discount_amount, Decimal::ZERO);
    assert_eq!(totals.grand_total, Decimal::from_str_exact("13.75")?);

    Ok(())
}

#[test]
fn checkout_renders_a_receipt_and_numbers_the_order() -> TestResult {
    let cart = CartFixture::from_set("lunch")?.into_cart()?;
    let receipt = Receipt::new(&cart, TaxRate::standard());

    let mut rendered = Vec::new();
    receipt.write_to(&mut rendered)?;
    let rendered = String::from_utf8(rendered)?;

    assert!(rendered.contains("tomato soup"), "receipt lists the items");
    assert!(rendered.contains("$12.38"), "receipt shows the rounded total");

    let clock = FixedClock(Cell::new(date(2026, 8, 26)));
    let sequence = OrderSequence::with_clock(&clock);

    let first = sequence.next_number();
    let second = sequence.next_number();

    assert_eq!(first.to_string(), "ORD-20260826-0001");
    assert_eq!(second.to_string(), "ORD-20260826-0002");

    clock.0.set(date(2026, 8, 27));

    assert_eq!(sequence.next_number().to_string(), "ORD-20260827-0001");

    Ok(())
}

#[test]
fn persisted_breakdown_survives_serialization() -> TestResult {
    let cart = CartFixture::from_set("lunch")?.into_cart()?;
    let totals = cart.totals(TaxRate::standard());

    let stored = serde_norway::to_string(&totals)?;
    let restored: OrderTotals = serde_norway::from_str(&stored)?;

    assert_eq!(restored, totals);

    Ok(())
}
