//! Apply Discount Handler

use std::sync::Arc;

use rebate::engine::LineApplication;
use rebate_app::domain::discounts::data::OrderLine;
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

/// Apply Discount Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ApplyRequest {
    /// Unit price in minor units of the store currency
    pub unit_price: i64,

    /// Number of units, may be fractional
    pub quantity: String,

    /// Pricing date (`YYYY-MM-DD`), defaults to today
    #[serde(default)]
    pub as_of: Option<String>,
}

/// Priced Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ApplyResponse {
    /// Undiscounted line total, in minor units
    pub line_total: i64,

    /// Amount the discount removed, in minor units
    pub discount_amount: i64,

    /// Line total after the discount, in minor units
    pub final_line_total: i64,

    /// Whether the discount took anything off
    pub discounted: bool,

    /// ISO currency code
    pub currency: String,
}

impl From<LineApplication<'_>> for ApplyResponse {
    fn from(application: LineApplication<'_>) -> Self {
        Self {
            line_total: application.line_total().to_minor_units(),
            discount_amount: application.discount_amount().to_minor_units(),
            final_line_total: application.final_line_total().to_minor_units(),
            discounted: application.is_discounted(),
            currency: application.line_total().currency().iso_alpha_code.to_string(),
        }
    }
}

/// Apply Discount Handler
///
/// Prices an order line with the discount. A discount that is not currently
/// valid on the pricing date leaves the line at full price.
#[endpoint(
    tags("discounts"),
    summary = "Apply Discount",
    responses(
        (status_code = StatusCode::OK, description = "Line priced"),
        (status_code = StatusCode::NOT_FOUND, description = "Discount not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    discount: PathParam<Uuid>,
    json: JsonBody<ApplyRequest>,
    depot: &mut Depot,
) -> Result<Json<ApplyResponse>, StatusError> {
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

    let application = state
        .discounts
        .apply_discount(actor, discount.into_inner().into(), line)
        .await
        .map_err(into_status_error)?;

    Ok(Json(application.into()))
}
