//! Update Discount Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use rebate_app::domain::discounts::data::DiscountUpdate;

use crate::{
    discounts::{
        errors::into_status_error, models::DiscountResponse, requests::DiscountTermsRequest,
    },
    extensions::*,
    state::State,
};

/// Discount Update Handler
///
/// Replaces the discount's type, amount and window. The active flag is left
/// alone.
#[endpoint(
    tags("discounts"),
    summary = "Update Discount",
    responses(
        (status_code = StatusCode::OK, description = "Discount updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Discount not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid window"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "discounts.update",
    skip(discount, json, depot),
    fields(discount_uuid = tracing::field::Empty, discount_type = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    discount: PathParam<Uuid>,
    json: JsonBody<DiscountTermsRequest>,
    depot: &mut Depot,
) -> Result<Json<DiscountResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;
    let discount = discount.into_inner();
    let terms = json.into_inner().parse()?;

    let span = tracing::Span::current();

    span.record("discount_uuid", tracing::field::display(discount));
    span.record("discount_type", terms.kind.as_str());

    let record = state
        .discounts
        .update_discount(
            actor,
            discount.into(),
            DiscountUpdate {
                kind: terms.kind,
                start: terms.start,
                end: terms.end,
            },
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(DiscountResponse::from_record(&record, today())))
}
