use clap::Args;
use jiff::civil::Date;
use rebate::status::DiscountStatus;

use rebate_app::{
    domain::discounts::{DiscountsService, data::DiscountFilter, records::ProductUuid},
    policy::Actor,
};

use crate::cli::{
    StoreArgs,
    discount::{print_discount, today},
};

#[derive(Debug, Args)]
pub(crate) struct ListDiscountsArgs {
    #[command(flatten)]
    store: StoreArgs,

    /// Only discounts for this product
    #[arg(long)]
    product: Option<ProductUuid>,

    /// Only discounts in this status (upcoming, current, expired, inactive)
    #[arg(long)]
    status: Option<DiscountStatus>,

    /// Reference date for statuses; today when omitted
    #[arg(long)]
    at: Option<Date>,
}

pub(crate) async fn run(args: ListDiscountsArgs) -> Result<(), String> {
    let service = args.store.discounts_service().await?;
    let at = args.at.unwrap_or_else(today);

    let discounts = service
        .list_discounts(
            &Actor::system(),
            DiscountFilter {
                product: args.product,
                status: args.status,
                at,
            },
        )
        .await
        .map_err(|error| format!("failed to list discounts: {error}"))?;

    if discounts.is_empty() {
        println!("no discounts found");
        return Ok(());
    }

    for discount in &discounts {
        print_discount(discount, at);
        println!();
    }

    Ok(())
}
