//! Pricing

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};

/// Round a minor-unit amount half-up to a whole minor unit.
///
/// Returns `None` when the value does not fit in an `i64`.
pub fn round_minor(value: Decimal) -> Option<i64> {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

/// Undiscounted total of `quantity` units at `unit_price`.
///
/// Non-positive quantities and prices yield zero; totals beyond the `i64`
/// minor-unit range saturate.
pub fn line_total<'a>(unit_price: &Money<'a, Currency>, quantity: Decimal) -> Money<'a, Currency> {
    let unit_minor = unit_price.to_minor_units();

    let total = if quantity <= Decimal::ZERO || unit_minor <= 0 {
        0
    } else {
        Decimal::from(unit_minor)
            .checked_mul(quantity)
            .and_then(round_minor)
            .unwrap_or(i64::MAX)
    };

    Money::from_minor(total, unit_price.currency())
}
