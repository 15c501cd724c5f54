//! Discount percentages

use std::fmt;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Clamps a percentage value into the `[0, 100]` range.
///
/// Idempotent. Out-of-range input is silently corrected rather than
/// reported; callers that need visibility must validate before calling.
#[must_use]
pub fn clamp_percent(value: Decimal) -> Decimal {
    value.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}

/// A percentage discount in points, always within `[0, 100]`.
///
/// Construction and deserialization both clamp, so a stored discount can
/// never be negative or exceed 100%.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Decimal", into = "Decimal")]
pub struct DiscountPercent(Decimal);

impl DiscountPercent {
    /// No discount.
    pub const ZERO: DiscountPercent = DiscountPercent(Decimal::ZERO);

    /// Creates a discount, clamping the value into `[0, 100]`.
    #[must_use]
    pub fn new(points: Decimal) -> Self {
        Self(clamp_percent(points))
    }

    /// The discount in percentage points.
    #[must_use]
    pub fn points(self) -> Decimal {
        self.0
    }

    /// The discount as a multiplier fraction (`50%` becomes `0.5`).
    ///
    /// The stored value is clamped again here, so discount arithmetic never
    /// sees an out-of-range percentage even if the stored value predates the
    /// write-time clamp.
    #[must_use]
    pub fn as_ratio(self) -> Percentage {
        Percentage::from(clamp_percent(self.0) / Decimal::ONE_HUNDRED)
    }

    /// True when no discount applies.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }
}

impl From<Decimal> for DiscountPercent {
    fn from(points: Decimal) -> Self {
        Self::new(points)
    }
}

impl From<DiscountPercent> for Decimal {
    fn from(discount: DiscountPercent) -> Self {
        discount.0
    }
}

impl fmt::Display for DiscountPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
