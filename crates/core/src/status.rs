//! Discount Status
//!
//! Temporal view of a discount derived from its window, its active flag and a
//! reference date. Nothing here is stored.

use std::{fmt, str::FromStr};

use jiff::civil::Date;
use thiserror::Error;

use crate::discounts::Discount;

/// Unrecognised status name
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown discount status: {0}")]
pub struct UnknownStatus(pub String);

/// Where a discount sits relative to a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiscountStatus {
    /// The window has not started yet.
    Upcoming,

    /// Active and inside its window.
    Current,

    /// The window has ended.
    Expired,

    /// Switched off, whatever the window says.
    Inactive,
}

impl DiscountStatus {
    /// Every status, in display order.
    pub const ALL: [Self; 4] = [Self::Upcoming, Self::Current, Self::Expired, Self::Inactive];

    /// Stable name used at wire boundaries.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Current => "current",
            Self::Expired => "expired",
            Self::Inactive => "inactive",
        }
    }
}

impl fmt::Display for DiscountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiscountStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// Classify `discount` as of `date`.
pub fn status(discount: &Discount, date: Date) -> DiscountStatus {
    let window = discount.window();

    if !discount.is_active() {
        DiscountStatus::Inactive
    } else if date < window.start() {
        DiscountStatus::Upcoming
    } else if date > window.end() {
        DiscountStatus::Expired
    } else {
        DiscountStatus::Current
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use crate::{discounts::DiscountKind, windows::DiscountWindow};

    use super::*;

    fn january(active: bool) -> TestResult<Discount> {
        let window = DiscountWindow::new(date(2024, 1, 1), date(2024, 1, 31))?;

        Ok(Discount::from_parts(DiscountKind::Fixed(100), window, active))
    }

    #[test]
    fn status_follows_the_calendar() -> TestResult {
        let discount = january(true)?;

        assert_eq!(status(&discount, date(2023, 12, 31)), DiscountStatus::Upcoming);
        assert_eq!(status(&discount, date(2024, 1, 1)), DiscountStatus::Current);
        assert_eq!(status(&discount, date(2024, 1, 31)), DiscountStatus::Current);
        assert_eq!(status(&discount, date(2024, 2, 1)), DiscountStatus::Expired);

        Ok(())
    }

    #[test]
    fn inactive_takes_precedence_over_window() -> TestResult {
        let discount = january(false)?;

        for day in [date(2023, 12, 31), date(2024, 1, 15), date(2024, 2, 1)] {
            assert_eq!(status(&discount, day), DiscountStatus::Inactive);
        }

        Ok(())
    }

    #[test]
    fn extending_an_expired_discount_makes_it_current() -> TestResult {
        let discount = january(true)?;
        let extended = discount.with_window(discount.window().extend(date(2024, 2, 29))?);

        assert_eq!(status(&discount, date(2024, 2, 10)), DiscountStatus::Expired);
        assert_eq!(status(&extended, date(2024, 2, 10)), DiscountStatus::Current);

        Ok(())
    }

    #[test]
    fn status_names_are_stable() {
        let names: Vec<String> = DiscountStatus::ALL.iter().map(ToString::to_string).collect();

        assert_eq!(names, ["upcoming", "current", "expired", "inactive"]);
    }

    #[test]
    fn status_parses_from_its_name() -> TestResult {
        for status in DiscountStatus::ALL {
            assert_eq!(status.as_str().parse::<DiscountStatus>()?, status);
        }

        assert_eq!(
            "live".parse::<DiscountStatus>(),
            Err(UnknownStatus("live".to_string()))
        );

        Ok(())
    }
}
