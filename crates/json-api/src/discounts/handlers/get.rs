//! Get Discount Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{PathParam, QueryParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    discounts::{errors::into_status_error, models::DiscountResponse},
    extensions::*,
    state::State,
};

/// Get Discount Handler
///
/// Returns a discount with its status derived as of `at` (default today).
#[endpoint(
    tags("discounts"),
    summary = "Get Discount",
    responses(
        (status_code = StatusCode::OK, description = "Discount found"),
        (status_code = StatusCode::NOT_FOUND, description = "Discount not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Forbidden"),
    ),
)]
pub(crate) async fn handler(
    discount: PathParam<Uuid>,
    at: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<DiscountResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;
    let at = at.into_date_or_today()?;

    let record = state
        .discounts
        .get_discount(actor, discount.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(DiscountResponse::from_record(&record, at)))
}
