//! Best Discount Handler

use std::sync::Arc;

use rebate_app::domain::discounts::data::OrderLine;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    discounts::{
        apply::ApplyResponse,
        errors::into_status_error,
        models::DiscountResponse,
        requests::{parse_date, parse_decimal},
    },
    extensions::*,
    state::State,
};

/// Best Discount Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BestDiscountRequest {
    /// Product whose discounts compete
    pub product_uuid: Uuid,

    /// Unit price in minor units of the store currency
    pub unit_price: i64,

    /// Number of units, may be fractional
    pub quantity: String,

    /// Pricing date (`YYYY-MM-DD`), defaults to today
    #[serde(default)]
    pub as_of: Option<String>,
}

/// Best Discount Response
///
/// Both fields are `null` when no discount for the product is currently
/// valid.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BestDiscountResponse {
    /// The winning discount
    pub discount: Option<DiscountResponse>,

    /// The line priced with the winning discount
    pub line: Option<ApplyResponse>,
}

/// Best Discount Handler
///
/// Prices an order line with whichever of the product's currently valid
/// discounts takes the most off it.
#[endpoint(
    tags("discounts"),
    summary = "Best Discount For Line",
    responses(
        (status_code = StatusCode::OK, description = "Best discount chosen"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<BestDiscountRequest>,
    depot: &mut Depot,
) -> Result<Json<BestDiscountResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;
    let request = json.into_inner();

    let line = OrderLine {
        unit_price: request.unit_price,
        quantity: parse_decimal("quantity", &request.quantity)?,
        as_of: match request.as_of.as_deref() {
            Some(value) => parse_date("as_of", value)?,
            None => today(),
        },
    };
    let as_of = line.as_of;

    let best = state
        .discounts
        .best_discount(actor, request.product_uuid.into(), line)
        .await
        .map_err(into_status_error)?;

    Ok(Json(match best {
        Some(best) => BestDiscountResponse {
            discount: Some(DiscountResponse::from_record(&best.record, as_of)),
            line: Some(best.application.into()),
        },
        None => BestDiscountResponse {
            discount: None,
            line: None,
        },
    }))
}
