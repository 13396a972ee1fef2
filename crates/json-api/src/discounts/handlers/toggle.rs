//! Toggle Discount Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    discounts::{errors::into_status_error, models::DiscountResponse},
    extensions::*,
    state::State,
};

/// Toggle Discount Handler
///
/// Flips the discount's active flag. Dates are untouched.
#[endpoint(
    tags("discounts"),
    summary = "Toggle Discount",
    responses(
        (status_code = StatusCode::OK, description = "Discount toggled"),
        (status_code = StatusCode::NOT_FOUND, description = "Discount not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Forbidden"),
    ),
)]
#[tracing::instrument(
    name = "discounts.toggle",
    skip(discount, depot),
    fields(discount_uuid = %*discount),
    err
)]
pub(crate) async fn handler(
    discount: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<DiscountResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let record = state
        .discounts
        .toggle_discount(actor, discount.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(DiscountResponse::from_record(&record, today())))
}
