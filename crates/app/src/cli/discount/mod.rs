use clap::{Args, Subcommand};
use jiff::{Zoned, civil::Date};
use rebate::discounts::DiscountKind;

use rebate_app::domain::discounts::records::DiscountRecord;

mod create;
mod extend;
mod list;
mod shorten;
mod toggle;

#[derive(Debug, Args)]
pub(crate) struct DiscountCommand {
    #[command(subcommand)]
    command: DiscountSubcommand,
}

#[derive(Debug, Subcommand)]
enum DiscountSubcommand {
    Create(create::CreateDiscountArgs),
    List(list::ListDiscountsArgs),
    Extend(extend::ExtendDiscountArgs),
    Shorten(shorten::ShortenDiscountArgs),
    Toggle(toggle::ToggleDiscountArgs),
}

pub(crate) async fn run(command: DiscountCommand) -> Result<(), String> {
    match command.command {
        DiscountSubcommand::Create(args) => create::run(args).await,
        DiscountSubcommand::List(args) => list::run(args).await,
        DiscountSubcommand::Extend(args) => extend::run(args).await,
        DiscountSubcommand::Shorten(args) => shorten::run(args).await,
        DiscountSubcommand::Toggle(args) => toggle::run(args).await,
    }
}

pub(crate) fn today() -> Date {
    Zoned::now().date()
}

pub(crate) fn print_discount(record: &DiscountRecord, at: Date) {
    let discount = &record.discount;

    let amount = match discount.kind() {
        DiscountKind::Percent(percent) => format!("{percent}%"),
        DiscountKind::Fixed(minor) => format!("{minor} (minor units)"),
    };

    println!("discount_uuid: {}", record.uuid);
    println!("product_uuid: {}", record.product_uuid);
    println!("type: {}", discount.kind().as_str());
    println!("amount: {amount}");
    println!("start: {}", discount.window().start());
    println!("end: {}", discount.window().end());
    println!("active: {}", discount.is_active());
    println!("status: {}", record.status(at));
}
