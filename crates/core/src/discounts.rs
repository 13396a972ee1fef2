//! Discounts

use std::{fmt, str::FromStr};

use rust_decimal::{Decimal, prelude::ToPrimitive};
use thiserror::Error;

use crate::windows::{DiscountWindow, InvalidWindow};

/// Errors raised when discount terms are created or changed.
#[derive(Debug, Error, PartialEq)]
pub enum DiscountError {
    /// The validity window is malformed.
    #[error(transparent)]
    InvalidWindow(#[from] InvalidWindow),

    /// Discount amounts cannot be negative.
    #[error("discount amount must not be negative")]
    NegativeAmount,

    /// Percentage discounts cannot exceed the full price.
    #[error("percentage discount {0} exceeds 100")]
    PercentageAboveHundred(Decimal),

    /// Unrecognised discount type name.
    #[error("unknown discount type: {0}")]
    UnknownKind(String),
}

/// How a discount reduces a unit price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscountKind {
    /// Percentage points of the unit price (e.g. `25` for "25% off")
    Percent(Decimal),

    /// Amount subtracted from each unit, in minor units (e.g. `500` for "£5 off")
    Fixed(i64),
}

impl DiscountKind {
    /// Stable name used at storage and wire boundaries.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Percent(_) => "percent",
            Self::Fixed(_) => "fixed",
        }
    }

    /// Check the amount against the ranges a new discount may carry.
    ///
    /// # Errors
    ///
    /// - [`DiscountError::NegativeAmount`] for a negative amount of either kind.
    /// - [`DiscountError::PercentageAboveHundred`] for a percentage over 100.
    pub fn check(&self) -> Result<(), DiscountError> {
        match *self {
            Self::Percent(percent) if percent < Decimal::ZERO => {
                Err(DiscountError::NegativeAmount)
            }
            Self::Percent(percent) if percent > Decimal::ONE_HUNDRED => {
                Err(DiscountError::PercentageAboveHundred(percent))
            }
            Self::Fixed(amount) if amount < 0 => Err(DiscountError::NegativeAmount),
            Self::Percent(_) | Self::Fixed(_) => Ok(()),
        }
    }
}

/// Discriminant of [`DiscountKind`] without its amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscountType {
    /// Percentage of the unit price
    Percent,

    /// Fixed amount per unit
    Fixed,
}

impl DiscountType {
    /// Pair this type with an amount.
    ///
    /// Percent amounts are percentage points; fixed amounts are minor units and
    /// must be whole.
    pub fn with_amount(self, amount: Decimal) -> Option<DiscountKind> {
        match self {
            Self::Percent => Some(DiscountKind::Percent(amount)),
            Self::Fixed => {
                if amount.fract().is_zero() {
                    amount.to_i64().map(DiscountKind::Fixed)
                } else {
                    None
                }
            }
        }
    }
}

impl From<&DiscountKind> for DiscountType {
    fn from(kind: &DiscountKind) -> Self {
        match kind {
            DiscountKind::Percent(_) => Self::Percent,
            DiscountKind::Fixed(_) => Self::Fixed,
        }
    }
}

impl FromStr for DiscountType {
    type Err = DiscountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "percent" => Ok(Self::Percent),
            "fixed" => Ok(Self::Fixed),
            other => Err(DiscountError::UnknownKind(other.to_string())),
        }
    }
}

impl fmt::Display for DiscountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Percent => "percent",
            Self::Fixed => "fixed",
        })
    }
}

/// A product discount: what it takes off, when, and whether it is switched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Discount {
    kind: DiscountKind,
    window: DiscountWindow,
    active: bool,
}

impl Discount {
    /// Create a new, active discount.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is out of range (see [`DiscountKind::check`]).
    pub fn new(kind: DiscountKind, window: DiscountWindow) -> Result<Self, DiscountError> {
        kind.check()?;

        Ok(Self {
            kind,
            window,
            active: true,
        })
    }

    /// Rebuild a discount from stored parts without range checks.
    ///
    /// Stored records are trusted as-is; calculations clamp out-of-range amounts.
    pub const fn from_parts(kind: DiscountKind, window: DiscountWindow, active: bool) -> Self {
        Self {
            kind,
            window,
            active,
        }
    }

    /// Return the discount kind
    pub const fn kind(&self) -> &DiscountKind {
        &self.kind
    }

    /// Return the validity window
    pub const fn window(&self) -> &DiscountWindow {
        &self.window
    }

    /// Administrative on/off switch
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Copy with the active flag set.
    #[must_use]
    pub const fn with_active(self, active: bool) -> Self {
        Self { active, ..self }
    }

    /// Copy with the active flag flipped.
    #[must_use]
    pub const fn toggled(self) -> Self {
        self.with_active(!self.active)
    }

    /// Copy with a different window.
    #[must_use]
    pub const fn with_window(self, window: DiscountWindow) -> Self {
        Self { window, ..self }
    }

    /// Copy with different terms, checked like [`Discount::new`].
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is out of range.
    pub fn with_kind(self, kind: DiscountKind) -> Result<Self, DiscountError> {
        kind.check()?;

        Ok(Self { kind, ..self })
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use super::*;

    fn window() -> DiscountWindow {
        DiscountWindow::single_day(date(2024, 1, 1))
    }

    #[test]
    fn new_discount_is_active() -> TestResult {
        let discount = Discount::new(DiscountKind::Fixed(500), window())?;

        assert!(discount.is_active());
        assert_eq!(discount.kind(), &DiscountKind::Fixed(500));

        Ok(())
    }

    #[test]
    fn new_rejects_negative_fixed_amount() {
        let result = Discount::new(DiscountKind::Fixed(-1), window());

        assert_eq!(result, Err(DiscountError::NegativeAmount));
    }

    #[test]
    fn new_rejects_negative_percentage() {
        let result = Discount::new(DiscountKind::Percent(Decimal::new(-5, 1)), window());

        assert_eq!(result, Err(DiscountError::NegativeAmount));
    }

    #[test]
    fn new_rejects_percentage_above_hundred() {
        let result = Discount::new(DiscountKind::Percent(Decimal::new(10001, 2)), window());

        assert_eq!(
            result,
            Err(DiscountError::PercentageAboveHundred(Decimal::new(10001, 2)))
        );
    }

    #[test]
    fn new_accepts_boundary_percentages() {
        assert!(Discount::new(DiscountKind::Percent(Decimal::ZERO), window()).is_ok());
        assert!(Discount::new(DiscountKind::Percent(Decimal::ONE_HUNDRED), window()).is_ok());
    }

    #[test]
    fn from_parts_keeps_out_of_range_amounts() {
        let discount = Discount::from_parts(DiscountKind::Percent(Decimal::from(150)), window(), false);

        assert_eq!(discount.kind(), &DiscountKind::Percent(Decimal::from(150)));
        assert!(!discount.is_active());
    }

    #[test]
    fn toggled_flips_active_flag() -> TestResult {
        let discount = Discount::new(DiscountKind::Fixed(1), window())?;

        assert!(!discount.toggled().is_active());
        assert!(discount.toggled().toggled().is_active());

        Ok(())
    }

    #[test]
    fn discount_type_round_trips_through_strings() -> TestResult {
        assert_eq!("percent".parse::<DiscountType>()?, DiscountType::Percent);
        assert_eq!("fixed".parse::<DiscountType>()?, DiscountType::Fixed);
        assert_eq!(DiscountType::Fixed.to_string(), "fixed");
        assert!(matches!(
            "bogus".parse::<DiscountType>(),
            Err(DiscountError::UnknownKind(_))
        ));

        Ok(())
    }

    #[test]
    fn fixed_type_requires_whole_minor_units() {
        assert_eq!(
            DiscountType::Fixed.with_amount(Decimal::from(500)),
            Some(DiscountKind::Fixed(500))
        );
        assert_eq!(DiscountType::Fixed.with_amount(Decimal::new(55, 1)), None);
        assert_eq!(
            DiscountType::Percent.with_amount(Decimal::new(125, 1)),
            Some(DiscountKind::Percent(Decimal::new(125, 1)))
        );
    }
}
