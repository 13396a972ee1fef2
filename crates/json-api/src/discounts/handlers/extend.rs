//! Extend Discount Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    discounts::{errors::into_status_error, models::DiscountResponse, requests::EndDateRequest},
    extensions::*,
    state::State,
};

/// Extend Discount Handler
///
/// Moves the end date later. An end date earlier than the current one is
/// rejected with 422; the current end date is accepted and changes nothing.
#[endpoint(
    tags("discounts"),
    summary = "Extend Discount",
    responses(
        (status_code = StatusCode::OK, description = "Discount extended"),
        (status_code = StatusCode::NOT_FOUND, description = "Discount not found"),
        (status_code = StatusCode::CONFLICT, description = "Discount changed concurrently"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid window"),
    ),
)]
#[tracing::instrument(
    name = "discounts.extend",
    skip(discount, json, depot),
    fields(discount_uuid = %*discount, end_date = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    discount: PathParam<Uuid>,
    json: JsonBody<EndDateRequest>,
    depot: &mut Depot,
) -> Result<Json<DiscountResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;
    let new_end = json.into_inner().parse()?;

    tracing::Span::current().record("end_date", tracing::field::display(new_end));

    let record = state
        .discounts
        .extend_discount(actor, discount.into_inner().into(), new_end)
        .await
        .map_err(into_status_error)?;

    Ok(Json(DiscountResponse::from_record(&record, today())))
}
