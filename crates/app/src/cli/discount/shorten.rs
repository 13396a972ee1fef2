use clap::Args;
use jiff::civil::Date;

use rebate_app::{
    domain::discounts::{DiscountsService, records::DiscountUuid},
    policy::Actor,
};

use crate::cli::{
    StoreArgs,
    discount::{print_discount, today},
};

#[derive(Debug, Args)]
pub(crate) struct ShortenDiscountArgs {
    #[command(flatten)]
    store: StoreArgs,

    /// Discount to shorten
    #[arg(long)]
    discount: DiscountUuid,

    /// New last valid day, before the current one (YYYY-MM-DD)
    #[arg(long)]
    end: Date,
}

pub(crate) async fn run(args: ShortenDiscountArgs) -> Result<(), String> {
    let service = args.store.discounts_service().await?;
    let today = today();

    let shortened = service
        .shorten_discount(&Actor::system(), args.discount, args.end, today)
        .await
        .map_err(|error| format!("failed to shorten discount: {error}"))?;

    print_discount(&shortened, today);

    Ok(())
}
