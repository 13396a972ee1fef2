//! Shorten Discount Handler

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

/// Shorten Discount Handler
///
/// Moves the end date earlier. The new end date must be strictly before the
/// current one and not before the start date; a running discount also cannot
/// be cut short to end before today.
#[endpoint(
    tags("discounts"),
    summary = "Shorten Discount",
    responses(
        (status_code = StatusCode::OK, description = "Discount shortened"),
        (status_code = StatusCode::NOT_FOUND, description = "Discount not found"),
        (status_code = StatusCode::CONFLICT, description = "Discount changed concurrently"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid window"),
    ),
)]
#[tracing::instrument(
    name = "discounts.shorten",
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
    let today = today();

    tracing::Span::current().record("end_date", tracing::field::display(new_end));

    let record = state
        .discounts
        .shorten_discount(actor, discount.into_inner().into(), new_end, today)
        .await
        .map_err(into_status_error)?;

    Ok(Json(DiscountResponse::from_record(&record, today)))
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use rebate::{discounts::DiscountKind, windows::InvalidWindow};
    use rebate_app::domain::discounts::{
        DiscountsServiceError, MockDiscountsService, records::DiscountUuid,
    };
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        discounts::models::tests::make_discount,
        test_helpers::{TEST_ACTOR_ID, discounts_service},
    };

    use super::*;

    fn make_service(discounts: MockDiscountsService) -> Service {
        discounts_service(
            discounts,
            Router::with_path("product-discounts/{discount}/shorten").post(handler),
        )
    }

    #[tokio::test]
    async fn test_shorten_discount_passes_today() -> TestResult {
        let uuid = DiscountUuid::new();
        let mut record = make_discount(uuid, DiscountKind::Fixed(5_00))?;

        record.discount = rebate::engine::shorten(&record.discount, date(2024, 1, 20))?;

        let expected_today = today();

        let mut discounts = MockDiscountsService::new();

        discounts
            .expect_shorten_discount()
            .once()
            .withf(move |actor, u, end, today| {
                actor.id() == TEST_ACTOR_ID
                    && *u == uuid
                    && *end == date(2024, 1, 20)
                    && *today >= expected_today
            })
            .return_once(move |_, _, _, _| Ok(record));

        discounts.expect_extend_discount().never();

        let response: DiscountResponse =
            TestClient::post(format!("http://example.com/product-discounts/{uuid}/shorten"))
                .json(&json!({ "end_date": "2024-01-20" }))
                .send(&make_service(discounts))
                .await
                .take_json()
                .await?;

        assert_eq!(response.end_date, "2024-01-20");

        Ok(())
    }

    #[tokio::test]
    async fn test_shorten_before_start_returns_422() -> TestResult {
        let mut discounts = MockDiscountsService::new();

        discounts
            .expect_shorten_discount()
            .once()
            .return_once(|_, _, requested, _| {
                Err(DiscountsServiceError::InvalidWindow(
                    InvalidWindow::PrecedesStart {
                        start: date(2024, 1, 1),
                        requested,
                    },
                ))
            });

        let res = TestClient::post(format!(
            "http://example.com/product-discounts/{}/shorten",
            DiscountUuid::new()
        ))
        .json(&json!({ "end_date": "2023-12-31" }))
        .send(&make_service(discounts))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));

        Ok(())
    }

    #[tokio::test]
    async fn test_shorten_missing_discount_returns_404() -> TestResult {
        let mut discounts = MockDiscountsService::new();

        discounts
            .expect_shorten_discount()
            .once()
            .return_once(|_, _, _, _| Err(DiscountsServiceError::NotFound));

        let res = TestClient::post(format!(
            "http://example.com/product-discounts/{}/shorten",
            DiscountUuid::new()
        ))
        .json(&json!({ "end_date": "2024-01-10" }))
        .send(&make_service(discounts))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
