use clap::Args;
use jiff::civil::Date;
use rebate::prelude::*;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};

use rebate_app::currency::find_currency;

/// Price one order line against discount terms without touching storage.
#[derive(Debug, Args)]
pub(crate) struct QuoteArgs {
    /// Discount type (percent, fixed)
    #[arg(long = "type")]
    discount_type: DiscountType,

    /// Percentage points, or minor units for fixed discounts
    #[arg(long)]
    amount: Decimal,

    /// First valid day (YYYY-MM-DD)
    #[arg(long)]
    start: Date,

    /// Last valid day (YYYY-MM-DD)
    #[arg(long)]
    end: Date,

    /// Treat the discount as switched off
    #[arg(long)]
    inactive: bool,

    /// Unit price in minor units
    #[arg(long)]
    unit_price: i64,

    /// Number of units; may be fractional
    #[arg(long, default_value = "1")]
    quantity: Decimal,

    /// Pricing date (YYYY-MM-DD)
    #[arg(long)]
    as_of: Date,

    /// Currency (ISO 4217 code)
    #[arg(long, env = "CURRENCY", default_value = "GBP", value_parser = find_currency)]
    currency: &'static Currency,
}

pub(crate) fn run(args: &QuoteArgs) -> Result<(), String> {
    let kind = args
        .discount_type
        .with_amount(args.amount)
        .ok_or_else(|| format!("invalid {} amount: {}", args.discount_type, args.amount))?;

    let window = DiscountWindow::new(args.start, args.end).map_err(|error| error.to_string())?;

    let discount = Discount::new(kind, window)
        .map_err(|error| error.to_string())?
        .with_active(!args.inactive);

    let unit_price = Money::from_minor(args.unit_price, args.currency);
    let line = apply_to_line(&discount, &unit_price, args.quantity, args.as_of);

    println!("status: {}", status(&discount, args.as_of));
    println!(
        "valid: {}",
        validate(&discount, args.quantity, line.line_total(), args.as_of)
    );
    println!("line_total: {}", line.line_total());
    println!("discount_amount: {}", line.discount_amount());
    println!("final_line_total: {}", line.final_line_total());

    Ok(())
}
