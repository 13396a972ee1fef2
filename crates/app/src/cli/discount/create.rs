use clap::Args;
use jiff::civil::Date;
use rebate::discounts::DiscountType;
use rust_decimal::Decimal;

use rebate_app::{
    domain::discounts::{
        DiscountsService,
        data::NewDiscount,
        records::{DiscountUuid, ProductUuid},
    },
    policy::Actor,
};

use crate::cli::{
    StoreArgs,
    discount::{print_discount, today},
};

#[derive(Debug, Args)]
pub(crate) struct CreateDiscountArgs {
    #[command(flatten)]
    store: StoreArgs,

    /// Product the discount applies to
    #[arg(long)]
    product: ProductUuid,

    /// Discount type (percent, fixed)
    #[arg(long = "type")]
    discount_type: DiscountType,

    /// Percentage points, or minor units of the store currency for fixed discounts
    #[arg(long)]
    amount: Decimal,

    /// First valid day (YYYY-MM-DD)
    #[arg(long)]
    start: Date,

    /// Last valid day (YYYY-MM-DD)
    #[arg(long)]
    end: Date,

    /// Optional discount UUID; generated when omitted
    #[arg(long)]
    uuid: Option<DiscountUuid>,
}

pub(crate) async fn run(args: CreateDiscountArgs) -> Result<(), String> {
    let kind = args.discount_type.with_amount(args.amount).ok_or_else(|| {
        format!(
            "invalid {} amount: {}",
            args.discount_type, args.amount
        )
    })?;

    let service = args.store.discounts_service().await?;

    let created = service
        .create_discount(
            &Actor::system(),
            NewDiscount {
                uuid: args.uuid.unwrap_or_default(),
                product_uuid: args.product,
                kind,
                start: args.start,
                end: args.end,
            },
        )
        .await
        .map_err(|error| format!("failed to create discount: {error}"))?;

    print_discount(&created, today());

    Ok(())
}
