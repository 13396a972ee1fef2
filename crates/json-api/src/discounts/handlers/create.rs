//! Create Discount Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use rebate_app::domain::discounts::data::NewDiscount;

use crate::{
    discounts::{
        errors::into_status_error,
        models::DiscountResponse,
        requests::DiscountTermsRequest,
    },
    extensions::*,
    state::State,
};

/// Create Discount Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateDiscountRequest {
    /// Client-chosen discount UUID
    pub uuid: Uuid,

    /// Product the discount applies to
    pub product_uuid: Uuid,

    #[serde(flatten)]
    pub terms: DiscountTermsRequest,
}

/// Create Discount Handler
#[endpoint(
    tags("discounts"),
    summary = "Create Discount",
    responses(
        (status_code = StatusCode::CREATED, description = "Discount created"),
        (status_code = StatusCode::CONFLICT, description = "Discount already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid window"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "discounts.create",
    skip(json, depot, res),
    fields(discount_uuid = tracing::field::Empty, product_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateDiscountRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<DiscountResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;
    let request = json.into_inner();
    let terms = request.terms.parse()?;

    let span = tracing::Span::current();

    span.record("discount_uuid", tracing::field::display(request.uuid));
    span.record("product_uuid", tracing::field::display(request.product_uuid));

    let record = state
        .discounts
        .create_discount(
            actor,
            NewDiscount {
                uuid: request.uuid.into(),
                product_uuid: request.product_uuid.into(),
                kind: terms.kind,
                start: terms.start,
                end: terms.end,
            },
        )
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/product-discounts/{}", record.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(DiscountResponse::from_record(&record, today())))
}
