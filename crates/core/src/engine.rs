//! Discount Engine
//!
//! Pure functions deciding whether a discount applies and how much it takes off
//! an order line. Only the window mutations can fail; every calculation
//! degrades to "no discount" on malformed input so pricing never blocks
//! checkout.

use jiff::civil::Date;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};

use crate::{
    discounts::{Discount, DiscountKind},
    pricing::{line_total, round_minor},
    status::{DiscountStatus, status},
    windows::InvalidWindow,
};

/// Outcome of applying a discount to one order line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineApplication<'a> {
    line_total: Money<'a, Currency>,
    discount_amount: Money<'a, Currency>,
    final_line_total: Money<'a, Currency>,
}

impl<'a> LineApplication<'a> {
    /// Undiscounted line total
    pub fn line_total(&self) -> &Money<'a, Currency> {
        &self.line_total
    }

    /// Amount the discount removed
    pub fn discount_amount(&self) -> &Money<'a, Currency> {
        &self.discount_amount
    }

    /// Line total after the discount
    pub fn final_line_total(&self) -> &Money<'a, Currency> {
        &self.final_line_total
    }

    /// Whether the discount removed anything.
    pub fn is_discounted(&self) -> bool {
        self.discount_amount.to_minor_units() > 0
    }
}

/// Whether `discount` is switched on and `as_of` lies inside its window.
pub fn is_currently_valid(discount: &Discount, as_of: Date) -> bool {
    status(discount, as_of) == DiscountStatus::Current
}

/// Amount `discount` takes off `quantity` units at `unit_price`.
///
/// Fixed amounts are capped at the unit price and percentages are clamped to
/// `[0, 100]`, so the result never exceeds the undiscounted line total. The
/// result is rounded half-up to the currency's minor unit. Non-positive
/// quantities or prices, and amounts that cannot be represented, yield zero.
pub fn calculate<'a>(
    discount: &Discount,
    unit_price: &Money<'a, Currency>,
    quantity: Decimal,
) -> Money<'a, Currency> {
    let currency = unit_price.currency();
    let unit_minor = unit_price.to_minor_units();

    if quantity <= Decimal::ZERO || unit_minor <= 0 {
        return Money::from_minor(0, currency);
    }

    let per_unit = match *discount.kind() {
        DiscountKind::Fixed(amount) => Some(Decimal::from(amount.clamp(0, unit_minor))),
        DiscountKind::Percent(percent) => {
            let percent = percent.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);

            Decimal::from(unit_minor)
                .checked_mul(percent)
                .and_then(|value| value.checked_div(Decimal::ONE_HUNDRED))
        }
    };

    let minor = per_unit
        .and_then(|value| value.checked_mul(quantity))
        .and_then(round_minor)
        .unwrap_or(0);

    Money::from_minor(minor, currency)
}

/// Whether `discount` may be applied to a line of `quantity` units totalling
/// `total_amount` on `as_of`.
///
/// Quantity must be positive and the total non-negative. Minimum quantity or
/// amount thresholds are not modelled, so beyond that this is
/// [`is_currently_valid`].
pub fn validate(
    discount: &Discount,
    quantity: Decimal,
    total_amount: &Money<'_, Currency>,
    as_of: Date,
) -> bool {
    quantity > Decimal::ZERO
        && total_amount.to_minor_units() >= 0
        && is_currently_valid(discount, as_of)
}

/// Move the end date of `discount` to `new_end`, which must not be earlier.
///
/// # Errors
///
/// Returns [`InvalidWindow::WouldShorten`] if `new_end` precedes the current end.
pub fn extend(discount: &Discount, new_end: Date) -> Result<Discount, InvalidWindow> {
    Ok(discount.with_window(discount.window().extend(new_end)?))
}

/// Move the end date of `discount` earlier, to no sooner than its start.
///
/// # Errors
///
/// - [`InvalidWindow::PrecedesStart`] if `new_end` precedes the start.
/// - [`InvalidWindow::DoesNotShorten`] if `new_end` is not before the current end.
pub fn shorten(discount: &Discount, new_end: Date) -> Result<Discount, InvalidWindow> {
    Ok(discount.with_window(discount.window().shorten(new_end)?))
}

/// [`shorten`], refusing to end a live discount before `today`.
///
/// # Errors
///
/// As [`shorten`], plus [`InvalidWindow::EndsBeforeToday`] if the discount is
/// current on `today` and `new_end` precedes it.
pub fn shorten_as_of(
    discount: &Discount,
    new_end: Date,
    today: Date,
) -> Result<Discount, InvalidWindow> {
    let shortened = shorten(discount, new_end)?;

    if is_currently_valid(discount, today) && new_end < today {
        return Err(InvalidWindow::EndsBeforeToday {
            today,
            requested: new_end,
        });
    }

    Ok(shortened)
}

/// Apply `discount` to `quantity` units at `unit_price` on `as_of`.
///
/// Discounts that are not currently valid leave the line untouched.
pub fn apply_to_line<'a>(
    discount: &Discount,
    unit_price: &Money<'a, Currency>,
    quantity: Decimal,
    as_of: Date,
) -> LineApplication<'a> {
    let line_total = line_total(unit_price, quantity);

    let discount_amount = if is_currently_valid(discount, as_of) {
        calculate(discount, unit_price, quantity)
    } else {
        Money::from_minor(0, unit_price.currency())
    };

    let final_minor = line_total
        .to_minor_units()
        .saturating_sub(discount_amount.to_minor_units())
        .max(0);

    LineApplication {
        line_total,
        discount_amount,
        final_line_total: Money::from_minor(final_minor, unit_price.currency()),
    }
}

/// Pick the discount that takes the most off a line.
///
/// Only currently valid discounts compete; ties go to the earliest in
/// `discounts`. Returns the winner's position alongside its application.
pub fn best_for_line<'a>(
    discounts: &[Discount],
    unit_price: &Money<'a, Currency>,
    quantity: Decimal,
    as_of: Date,
) -> Option<(usize, LineApplication<'a>)> {
    discounts
        .iter()
        .enumerate()
        .filter(|(_, discount)| is_currently_valid(discount, as_of))
        .map(|(position, discount)| {
            (
                position,
                apply_to_line(discount, unit_price, quantity, as_of),
            )
        })
        .fold(None, |best, candidate| {
            let keep = best.as_ref().is_some_and(|(_, current): &(usize, LineApplication<'a>)| {
                current.discount_amount.to_minor_units()
                    >= candidate.1.discount_amount.to_minor_units()
            });

            if keep { best } else { Some(candidate) }
        })
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use rusty_money::iso::{GBP, JPY};
    use testresult::TestResult;

    use crate::windows::DiscountWindow;

    use super::*;

    fn january(kind: DiscountKind, active: bool) -> TestResult<Discount> {
        let window = DiscountWindow::new(date(2024, 1, 1), date(2024, 1, 31))?;

        Ok(Discount::from_parts(kind, window, active))
    }

    fn gbp(minor: i64) -> Money<'static, Currency> {
        Money::from_minor(minor, GBP)
    }

    #[test]
    fn fixed_discount_applies_per_unit() -> TestResult {
        let discount = january(DiscountKind::Fixed(5_00), true)?;

        assert_eq!(calculate(&discount, &gbp(20_00), Decimal::from(3)), gbp(15_00));

        let line = apply_to_line(&discount, &gbp(20_00), Decimal::from(3), date(2024, 1, 15));

        assert_eq!(line.line_total(), &gbp(60_00));
        assert_eq!(line.discount_amount(), &gbp(15_00));
        assert_eq!(line.final_line_total(), &gbp(45_00));
        assert!(line.is_discounted());

        Ok(())
    }

    #[test]
    fn fixed_discount_above_unit_price_is_clamped() -> TestResult {
        let discount = january(DiscountKind::Fixed(25_00), true)?;

        assert_eq!(calculate(&discount, &gbp(20_00), Decimal::from(3)), gbp(60_00));

        let line = apply_to_line(&discount, &gbp(20_00), Decimal::from(3), date(2024, 1, 15));

        assert_eq!(line.final_line_total(), &gbp(0));

        Ok(())
    }

    #[test]
    fn negative_fixed_amount_discounts_nothing() -> TestResult {
        let discount = january(DiscountKind::Fixed(-5_00), true)?;

        assert_eq!(calculate(&discount, &gbp(20_00), Decimal::from(3)), gbp(0));

        Ok(())
    }

    #[test]
    fn percentage_above_hundred_is_clamped() -> TestResult {
        let over = january(DiscountKind::Percent(Decimal::from(150)), true)?;
        let full = january(DiscountKind::Percent(Decimal::ONE_HUNDRED), true)?;

        assert_eq!(calculate(&over, &gbp(10_00), Decimal::from(2)), gbp(20_00));
        assert_eq!(
            calculate(&over, &gbp(10_00), Decimal::from(2)),
            calculate(&full, &gbp(10_00), Decimal::from(2))
        );

        Ok(())
    }

    #[test]
    fn negative_percentage_discounts_nothing() -> TestResult {
        let discount = january(DiscountKind::Percent(Decimal::from(-10)), true)?;

        assert_eq!(calculate(&discount, &gbp(10_00), Decimal::ONE), gbp(0));

        Ok(())
    }

    #[test]
    fn percentage_rounds_half_up_to_minor_units() -> TestResult {
        // 12.5% of 0.99 = 12.375p per unit, 3 units = 37.125p
        let discount = january(DiscountKind::Percent(Decimal::new(125, 1)), true)?;

        assert_eq!(calculate(&discount, &gbp(99), Decimal::from(3)), gbp(37));

        // 50% of 0.05 = 2.5p -> 3p
        let half = january(DiscountKind::Percent(Decimal::from(50)), true)?;

        assert_eq!(calculate(&half, &gbp(5), Decimal::ONE), gbp(3));

        Ok(())
    }

    #[test]
    fn percentage_respects_zero_exponent_currencies() -> TestResult {
        let discount = january(DiscountKind::Percent(Decimal::from(15)), true)?;
        let price = Money::from_minor(999, JPY);

        // 15% of 999 yen = 149.85 -> 150
        assert_eq!(
            calculate(&discount, &price, Decimal::ONE),
            Money::from_minor(150, JPY)
        );

        Ok(())
    }

    #[test]
    fn fractional_quantities_are_supported() -> TestResult {
        let discount = january(DiscountKind::Fixed(50), true)?;

        // 1.5 kg at 3.00/kg with 0.50/kg off
        let line = apply_to_line(&discount, &gbp(3_00), Decimal::new(15, 1), date(2024, 1, 2));

        assert_eq!(line.discount_amount(), &gbp(75));
        assert_eq!(line.final_line_total(), &gbp(3_75));

        Ok(())
    }

    #[test]
    fn calculate_degrades_to_zero_on_bad_inputs() -> TestResult {
        let discount = january(DiscountKind::Percent(Decimal::from(10)), true)?;

        assert_eq!(calculate(&discount, &gbp(10_00), Decimal::ZERO), gbp(0));
        assert_eq!(calculate(&discount, &gbp(10_00), Decimal::NEGATIVE_ONE), gbp(0));
        assert_eq!(calculate(&discount, &gbp(-10_00), Decimal::ONE), gbp(0));
        assert_eq!(calculate(&discount, &gbp(i64::MAX), Decimal::MAX), gbp(0));

        Ok(())
    }

    #[test]
    fn calculate_is_idempotent() -> TestResult {
        let discount = january(DiscountKind::Percent(Decimal::new(3333, 2)), true)?;

        let first = calculate(&discount, &gbp(7_77), Decimal::from(7));
        let second = calculate(&discount, &gbp(7_77), Decimal::from(7));

        assert_eq!(first, second);

        Ok(())
    }

    #[test]
    fn final_line_total_is_never_negative() -> TestResult {
        let kinds = [
            DiscountKind::Fixed(0),
            DiscountKind::Fixed(1),
            DiscountKind::Fixed(i64::MAX),
            DiscountKind::Percent(Decimal::ZERO),
            DiscountKind::Percent(Decimal::new(999, 1)),
            DiscountKind::Percent(Decimal::from(1_000)),
        ];

        for kind in kinds {
            let discount = january(kind, true)?;

            let lines = [
                (1, Decimal::ONE),
                (19_99, Decimal::new(25, 1)),
                (0, Decimal::TEN),
            ];

            for (price, quantity) in lines {
                let line = apply_to_line(&discount, &gbp(price), quantity, date(2024, 1, 10));

                assert!(
                    line.final_line_total().to_minor_units() >= 0,
                    "negative total for {kind:?} at {price} x {quantity}"
                );
                assert!(
                    line.discount_amount().to_minor_units() <= line.line_total().to_minor_units(),
                    "discount exceeds line total for {kind:?}"
                );
            }
        }

        Ok(())
    }

    #[test]
    fn validity_is_inclusive_at_boundaries() -> TestResult {
        let discount = january(DiscountKind::Fixed(1), true)?;

        assert!(is_currently_valid(&discount, date(2024, 1, 1)));
        assert!(is_currently_valid(&discount, date(2024, 1, 31)));
        assert!(!is_currently_valid(&discount, date(2023, 12, 31)));
        assert!(!is_currently_valid(&discount, date(2024, 2, 1)));

        Ok(())
    }

    #[test]
    fn inactive_discount_is_never_applied() -> TestResult {
        let discount = january(DiscountKind::Fixed(5_00), false)?;

        assert!(!is_currently_valid(&discount, date(2024, 1, 15)));

        let line = apply_to_line(&discount, &gbp(20_00), Decimal::from(3), date(2024, 1, 15));

        assert_eq!(line.discount_amount(), &gbp(0));
        assert_eq!(line.final_line_total(), &gbp(60_00));
        assert!(!line.is_discounted());

        Ok(())
    }

    #[test]
    fn validate_requires_positive_quantity() -> TestResult {
        let discount = january(DiscountKind::Fixed(1), true)?;
        let today = date(2024, 1, 15);

        assert!(validate(&discount, Decimal::ONE, &gbp(10_00), today));
        assert!(!validate(&discount, Decimal::ZERO, &gbp(10_00), today));
        assert!(!validate(&discount, Decimal::NEGATIVE_ONE, &gbp(10_00), today));

        Ok(())
    }

    #[test]
    fn validate_rejects_expired_inactive_and_negative_totals() -> TestResult {
        let discount = january(DiscountKind::Fixed(1), true)?;
        let inactive = january(DiscountKind::Fixed(1), false)?;

        assert!(!validate(&discount, Decimal::ONE, &gbp(10_00), date(2024, 2, 1)));
        assert!(!validate(&inactive, Decimal::ONE, &gbp(10_00), date(2024, 1, 15)));
        assert!(!validate(&discount, Decimal::ONE, &gbp(-1), date(2024, 1, 15)));

        Ok(())
    }

    #[test]
    fn extend_moves_end_date_only() -> TestResult {
        let discount = january(DiscountKind::Fixed(5_00), true)?;
        let extended = extend(&discount, date(2024, 2, 15))?;

        assert_eq!(extended.window().end(), date(2024, 2, 15));
        assert_eq!(extended.window().start(), date(2024, 1, 1));
        assert_eq!(extended.kind(), discount.kind());
        assert_eq!(extended.is_active(), discount.is_active());

        Ok(())
    }

    #[test]
    fn extend_to_current_end_is_noop() -> TestResult {
        let discount = january(DiscountKind::Fixed(5_00), true)?;

        assert_eq!(extend(&discount, date(2024, 1, 31))?, discount);

        Ok(())
    }

    #[test]
    fn shorten_before_start_fails() -> TestResult {
        let discount = january(DiscountKind::Fixed(5_00), true)?;

        assert_eq!(
            shorten(&discount, date(2023, 12, 31)),
            Err(InvalidWindow::PrecedesStart {
                start: date(2024, 1, 1),
                requested: date(2023, 12, 31),
            })
        );

        Ok(())
    }

    #[test]
    fn shorten_to_start_succeeds_but_not_to_end() -> TestResult {
        let discount = january(DiscountKind::Fixed(5_00), true)?;

        assert_eq!(shorten(&discount, date(2024, 1, 1))?.window().end(), date(2024, 1, 1));
        assert!(matches!(
            shorten(&discount, date(2024, 1, 31)),
            Err(InvalidWindow::DoesNotShorten { .. })
        ));

        Ok(())
    }

    #[test]
    fn shorten_as_of_keeps_live_discounts_running_until_today() -> TestResult {
        let discount = january(DiscountKind::Fixed(5_00), true)?;
        let today = date(2024, 1, 15);

        assert_eq!(
            shorten_as_of(&discount, date(2024, 1, 10), today),
            Err(InvalidWindow::EndsBeforeToday {
                today,
                requested: date(2024, 1, 10),
            })
        );
        assert_eq!(
            shorten_as_of(&discount, today, today)?.window().end(),
            today
        );

        Ok(())
    }

    #[test]
    fn shorten_as_of_allows_past_end_for_inactive_or_upcoming() -> TestResult {
        let inactive = january(DiscountKind::Fixed(5_00), false)?;
        let upcoming = january(DiscountKind::Fixed(5_00), true)?;

        assert!(shorten_as_of(&inactive, date(2024, 1, 10), date(2024, 1, 15)).is_ok());
        assert!(shorten_as_of(&upcoming, date(2024, 1, 10), date(2023, 12, 1)).is_ok());

        Ok(())
    }

    #[test]
    fn best_for_line_prefers_largest_discount() -> TestResult {
        let discounts = [
            january(DiscountKind::Fixed(1_00), true)?,
            january(DiscountKind::Percent(Decimal::from(20)), true)?,
            january(DiscountKind::Fixed(9_00), false)?,
        ];

        let Some((position, line)) =
            best_for_line(&discounts, &gbp(10_00), Decimal::ONE, date(2024, 1, 5))
        else {
            unreachable!("two discounts are current")
        };

        assert_eq!(position, 1);
        assert_eq!(line.discount_amount(), &gbp(2_00));

        Ok(())
    }

    #[test]
    fn best_for_line_keeps_first_on_tie() -> TestResult {
        let discounts = [
            january(DiscountKind::Fixed(2_00), true)?,
            january(DiscountKind::Percent(Decimal::from(20)), true)?,
        ];

        let best = best_for_line(&discounts, &gbp(10_00), Decimal::ONE, date(2024, 1, 5));

        assert_eq!(best.map(|(position, _)| position), Some(0));

        Ok(())
    }

    #[test]
    fn best_for_line_is_none_without_valid_discounts() -> TestResult {
        let discounts = [january(DiscountKind::Fixed(2_00), true)?];

        assert!(best_for_line(&discounts, &gbp(10_00), Decimal::ONE, date(2024, 3, 1)).is_none());
        assert!(best_for_line(&[], &gbp(10_00), Decimal::ONE, date(2024, 1, 5)).is_none());

        Ok(())
    }
}
