//! Calculate Discount Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    discounts::{errors::into_status_error, requests::parse_decimal},
    extensions::*,
    state::State,
};

/// Calculate Discount Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CalculateRequest {
    /// Unit price in minor units of the store currency
    pub unit_price: i64,

    /// Number of units, may be fractional
    pub quantity: String,
}

/// Calculated Discount Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CalculateResponse {
    /// Amount taken off the line, in minor units
    pub discount_amount: i64,

    /// ISO currency code
    pub currency: String,
}

/// Calculate Discount Handler
///
/// Amount the discount would take off a line, ignoring its dates and active
/// flag. Never exceeds the line total.
#[endpoint(
    tags("discounts"),
    summary = "Calculate Discount",
    responses(
        (status_code = StatusCode::OK, description = "Discount amount calculated"),
        (status_code = StatusCode::NOT_FOUND, description = "Discount not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    discount: PathParam<Uuid>,
    json: JsonBody<CalculateRequest>,
    depot: &mut Depot,
) -> Result<Json<CalculateResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;
    let request = json.into_inner();
    let quantity = parse_decimal("quantity", &request.quantity)?;

    let amount = state
        .discounts
        .calculate_discount(
            actor,
            discount.into_inner().into(),
            request.unit_price,
            quantity,
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(CalculateResponse {
        discount_amount: amount.to_minor_units(),
        currency: amount.currency().iso_alpha_code.to_string(),
    }))
}
