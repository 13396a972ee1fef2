use clap::Args;

use rebate_app::{
    domain::discounts::{DiscountsService, records::DiscountUuid},
    policy::Actor,
};

use crate::cli::{
    StoreArgs,
    discount::{print_discount, today},
};

#[derive(Debug, Args)]
pub(crate) struct ToggleDiscountArgs {
    #[command(flatten)]
    store: StoreArgs,

    /// Discount to switch on or off
    #[arg(long)]
    discount: DiscountUuid,
}

pub(crate) async fn run(args: ToggleDiscountArgs) -> Result<(), String> {
    let service = args.store.discounts_service().await?;

    let toggled = service
        .toggle_discount(&Actor::system(), args.discount)
        .await
        .map_err(|error| format!("failed to toggle discount: {error}"))?;

    print_discount(&toggled, today());

    Ok(())
}
