//! Till prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    carts::{Cart, LineItem},
    fixtures::{CartFixture, FixtureError},
    percentages::{DiscountPercent, clamp_percent},
    permissions::{
        Permission, Role, User, can_access_path, default_permissions_for, has_permission,
        required_permission, validate_permissions,
    },
    receipt::{Receipt, ReceiptError},
    sequence::{Clock, OrderNumber, OrderSequence, SystemClock},
    totals::{OrderTotals, TaxRate, order_totals},
};
