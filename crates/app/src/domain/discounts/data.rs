//! Discounts Data

use jiff::civil::Date;
use rebate::{discounts::DiscountKind, engine::LineApplication, status::DiscountStatus};
use rust_decimal::Decimal;

use crate::domain::discounts::records::{DiscountRecord, DiscountUuid, ProductUuid};

/// New Discount Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewDiscount {
    /// Client-chosen discount identifier
    pub uuid: DiscountUuid,

    /// Product the discount applies to
    pub product_uuid: ProductUuid,

    /// Type and amount
    pub kind: DiscountKind,

    /// First day of the window
    pub start: Date,

    /// Last day of the window
    pub end: Date,
}

/// Discount Terms Update Data
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountUpdate {
    /// Replacement type and amount
    pub kind: DiscountKind,

    /// Replacement first day
    pub start: Date,

    /// Replacement last day
    pub end: Date,
}

/// Discount listing filter
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountFilter {
    /// Only discounts for this product
    pub product: Option<ProductUuid>,

    /// Only discounts with this derived status
    pub status: Option<DiscountStatus>,

    /// Reference date for the derived status
    pub at: Date,
}

impl DiscountFilter {
    /// Unfiltered listing as of `at`.
    pub fn at(at: Date) -> Self {
        Self {
            product: None,
            status: None,
            at,
        }
    }
}

/// Order line priced against a discount
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    /// Unit price in minor units of the store currency
    pub unit_price: i64,

    /// Number of units; may be fractional
    pub quantity: Decimal,

    /// Pricing date
    pub as_of: Date,
}

/// Winning discount for an order line
#[derive(Debug, Clone, PartialEq)]
pub struct BestDiscount {
    /// Discount that takes the most off the line
    pub record: DiscountRecord,

    /// The line priced with that discount
    pub application: LineApplication<'static>,
}

/// Number of discounts in each derived status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusSummary {
    /// Active, window not yet started
    pub upcoming: u64,

    /// Active, inside the window
    pub current: u64,

    /// Active, window ended
    pub expired: u64,

    /// Paused
    pub inactive: u64,
}

impl StatusSummary {
    /// Count one discount in `status`.
    pub fn record(&mut self, status: DiscountStatus) {
        let count = match status {
            DiscountStatus::Upcoming => &mut self.upcoming,
            DiscountStatus::Current => &mut self.current,
            DiscountStatus::Expired => &mut self.expired,
            DiscountStatus::Inactive => &mut self.inactive,
        };

        *count = count.saturating_add(1);
    }

    /// Total discounts counted
    pub fn total(&self) -> u64 {
        self.upcoming
            .saturating_add(self.current)
            .saturating_add(self.expired)
            .saturating_add(self.inactive)
    }
}

impl FromIterator<DiscountStatus> for StatusSummary {
    fn from_iter<I: IntoIterator<Item = DiscountStatus>>(iter: I) -> Self {
        let mut summary = Self::default();

        for status in iter {
            summary.record(status);
        }

        summary
    }
}
