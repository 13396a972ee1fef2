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
pub(crate) struct ExtendDiscountArgs {
    #[command(flatten)]
    store: StoreArgs,

    /// Discount to extend
    #[arg(long)]
    discount: DiscountUuid,

    /// New last valid day, no earlier than the current one (YYYY-MM-DD)
    #[arg(long)]
    end: Date,
}

pub(crate) async fn run(args: ExtendDiscountArgs) -> Result<(), String> {
    let service = args.store.discounts_service().await?;

    let extended = service
        .extend_discount(&Actor::system(), args.discount, args.end)
        .await
        .map_err(|error| format!("failed to extend discount: {error}"))?;

    print_discount(&extended, today());

    Ok(())
}
