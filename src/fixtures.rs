//! Cart fixtures
//!
//! YAML-backed carts for tests and demos. Fixture files keep amounts as
//! strings so they read like the receipts they produce; parsing converts
//! them to exact decimals.

use std::{fs, path::Path};

use rust_decimal::Decimal;
use rusty_money::iso;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    carts::{Cart, LineItem},
    percentages::DiscountPercent,
};

/// Fixture parsing errors.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercent(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// A cart fixture file.
#[derive(Debug, Deserialize)]
pub struct CartFixture {
    /// ISO alpha code for every amount in the fixture.
    currency: String,

    /// Cart-level discount, e.g. `"10%"`.
    #[serde(default)]
    discount: Option<String>,

    /// Line items, in cart order.
    lines: Vec<LineFixture>,
}

/// One line item in a fixture file.
#[derive(Debug, Deserialize)]
struct LineFixture {
    id: String,
    unit_price: String,
    #[serde(default = "default_quantity")]
    quantity: u32,
    #[serde(default)]
    discount: Option<String>,
}

fn default_quantity() -> u32 {
    1
}

impl std::str::FromStr for CartFixture {
    type Err = FixtureError;

    fn from_str(contents: &str) -> Result<Self, Self::Err> {
        Ok(serde_norway::from_str(contents)?)
    }
}

impl CartFixture {
    /// Loads a fixture from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let contents = fs::read_to_string(path)?;

        contents.parse()
    }

    /// Loads `./fixtures/<name>.yml`.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if the file cannot be read or parsed.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        Self::from_path(Path::new("./fixtures").join(format!("{name}.yml")))
    }

    /// Builds the cart this fixture describes.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if the currency code is unknown or an
    /// amount or percentage fails to parse.
    pub fn into_cart(self) -> Result<Cart, FixtureError> {
        let currency = iso::find(&self.currency)
            .ok_or_else(|| FixtureError::UnknownCurrency(self.currency.clone()))?;

        let mut cart = Cart::new(currency);

        for line in self.lines {
            let unit_price = parse_price(&line.unit_price)?;

            let mut item = LineItem::new(line.id, unit_price, line.quantity);

            if let Some(raw) = &line.discount {
                item = item.with_discount(parse_percent(raw)?);
            }

            cart.push(item);
        }

        if let Some(raw) = &self.discount {
            cart = cart.with_discount(parse_percent(raw)?);
        }

        Ok(cart)
    }
}

/// Parses a plain decimal price string such as `"5.50"`.
fn parse_price(raw: &str) -> Result<Decimal, FixtureError> {
    Decimal::from_str_exact(raw.trim()).map_err(|_source| FixtureError::InvalidPrice(raw.to_string()))
}

/// Parses a percentage string in points, with an optional `%` suffix.
fn parse_percent(raw: &str) -> Result<DiscountPercent, FixtureError> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();

    let points = Decimal::from_str_exact(digits)
        .map_err(|_source| FixtureError::InvalidPercent(raw.to_string()))?;

    Ok(DiscountPercent::new(points))
}
