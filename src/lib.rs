//! Till
//!
//! Till is a point-of-sale checkout core: deterministic order totals with
//! item- and cart-level percentage discounts, tax applied strictly after all
//! discounts, printable receipts, role-based permissions and per-day order
//! numbering.
//!
//! All currency arithmetic is done in [`rust_decimal::Decimal`]; amounts are
//! only converted to minor units when formatted for display.

pub mod carts;
pub mod fixtures;
pub mod percentages;
pub mod permissions;
pub mod prelude;
pub mod receipt;
pub mod sequence;
pub mod totals;
