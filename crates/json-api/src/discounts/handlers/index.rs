//! Discount Index Handler

use std::sync::Arc;

use rebate::status::DiscountStatus;
use rebate_app::domain::discounts::data::DiscountFilter;
use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    discounts::{
        errors::into_status_error,
        models::{DiscountResponse, responses},
    },
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DiscountsResponse {
    /// The list of discounts
    pub discounts: Vec<DiscountResponse>,
}

/// Discount Index Handler
///
/// Returns live discounts, optionally narrowed to one product or to one
/// derived status on the reference date.
#[endpoint(
    tags("discounts"),
    summary = "List Discounts",
    responses(
        (status_code = StatusCode::OK, description = "Discounts listed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Forbidden"),
    ),
)]
pub(crate) async fn handler(
    product: QueryParam<Uuid, false>,
    status: QueryParam<String, false>,
    at: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<DiscountsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;
    let at = at.into_date_or_today()?;

    let status = status
        .into_inner()
        .map(|value| value.parse::<DiscountStatus>())
        .transpose()
        .or_400("could not parse \"status\" query parameter")?;

    let filter = DiscountFilter {
        product: product.into_inner().map(Into::into),
        status,
        at,
    };

    let discounts = state
        .discounts
        .list_discounts(actor, filter)
        .await
        .map_err(into_status_error)?;

    Ok(Json(DiscountsResponse {
        discounts: responses(&discounts, at),
    }))
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use rebate::discounts::DiscountKind;
    use rebate_app::domain::discounts::{
        DiscountsServiceError, MockDiscountsService,
        records::{DiscountUuid, ProductUuid},
    };
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::{
        discounts::models::tests::make_discount,
        test_helpers::{TEST_ACTOR_ID, discounts_service},
    };

    use super::*;

    fn make_service(discounts: MockDiscountsService) -> Service {
        discounts_service(discounts, Router::with_path("product-discounts").get(handler))
    }

    #[tokio::test]
    async fn test_index_returns_discounts_with_status() -> TestResult {
        let uuid_a = DiscountUuid::new();
        let uuid_b = DiscountUuid::new();
        let record_a = make_discount(uuid_a, DiscountKind::Fixed(5_00))?;
        let mut record_b = make_discount(uuid_b, DiscountKind::Fixed(1_00))?;

        record_b.discount = record_b.discount.toggled();

        let mut discounts = MockDiscountsService::new();

        discounts
            .expect_list_discounts()
            .once()
            .withf(|actor, filter| {
                actor.id() == TEST_ACTOR_ID && *filter == DiscountFilter::at(date(2024, 1, 15))
            })
            .return_once(move |_, _| Ok(vec![record_a, record_b]));

        discounts.expect_summarize_discounts().never();

        let response: DiscountsResponse =
            TestClient::get("http://example.com/product-discounts?at=2024-01-15")
                .send(&make_service(discounts))
                .await
                .take_json()
                .await?;

        assert_eq!(response.discounts.len(), 2, "expected two discounts");

        let statuses: Vec<_> = response
            .discounts
            .iter()
            .map(|discount| (discount.uuid, discount.status.as_str()))
            .collect();

        assert_eq!(
            statuses,
            vec![
                (uuid_a.into_uuid(), "current"),
                (uuid_b.into_uuid(), "inactive"),
            ]
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_index_passes_product_and_status_filters() -> TestResult {
        let product = ProductUuid::new();

        let mut discounts = MockDiscountsService::new();

        discounts
            .expect_list_discounts()
            .once()
            .withf(move |_, filter| {
                filter.product == Some(product)
                    && filter.status == Some(DiscountStatus::Expired)
                    && filter.at == date(2024, 3, 1)
            })
            .return_once(|_, _| Ok(vec![]));

        let response: DiscountsResponse = TestClient::get(format!(
            "http://example.com/product-discounts?product={product}&status=expired&at=2024-03-01"
        ))
        .send(&make_service(discounts))
        .await
        .take_json()
        .await?;

        assert!(response.discounts.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_index_unknown_status_returns_400() -> TestResult {
        let mut discounts = MockDiscountsService::new();

        discounts.expect_list_discounts().never();

        let res = TestClient::get("http://example.com/product-discounts?status=paused")
            .send(&make_service(discounts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_forbidden_returns_403() -> TestResult {
        let mut discounts = MockDiscountsService::new();

        discounts
            .expect_list_discounts()
            .once()
            .return_once(|_, _| Err(DiscountsServiceError::Forbidden));

        let res = TestClient::get("http://example.com/product-discounts")
            .send(&make_service(discounts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
