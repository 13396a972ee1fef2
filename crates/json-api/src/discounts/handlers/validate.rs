//! Validate Discount Handler

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
    discounts::{
        errors::into_status_error,
        requests::{parse_date, parse_decimal},
    },
    extensions::*,
    state::State,
};

/// Validate Discount Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ValidateRequest {
    /// Number of units, may be fractional
    pub quantity: String,

    /// Line total in minor units of the store currency
    pub total_amount: i64,

    /// Pricing date (`YYYY-MM-DD`), defaults to today
    #[serde(default)]
    pub as_of: Option<String>,
}

/// Validation Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ValidateResponse {
    /// Whether the discount may be applied to the line
    pub valid: bool,
}

/// Validate Discount Handler
///
/// A discount validates when it is currently valid on the pricing date, the
/// quantity is positive and the line total is not negative.
#[endpoint(
    tags("discounts"),
    summary = "Validate Discount",
    responses(
        (status_code = StatusCode::OK, description = "Discount validated"),
        (status_code = StatusCode::NOT_FOUND, description = "Discount not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    discount: PathParam<Uuid>,
    json: JsonBody<ValidateRequest>,
    depot: &mut Depot,
) -> Result<Json<ValidateResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;
    let request = json.into_inner();
    let quantity = parse_decimal("quantity", &request.quantity)?;

    let as_of = match request.as_of.as_deref() {
        Some(value) => parse_date("as_of", value)?,
        None => today(),
    };

    let valid = state
        .discounts
        .validate_discount(
            actor,
            discount.into_inner().into(),
            quantity,
            request.total_amount,
            as_of,
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(ValidateResponse { valid }))
}
