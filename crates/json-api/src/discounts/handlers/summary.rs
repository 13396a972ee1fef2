//! Discount Status Summary Handler

use std::sync::Arc;

use rebate_app::domain::discounts::data::StatusSummary;
use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{discounts::errors::into_status_error, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SummaryResponse {
    /// Reference date the statuses were derived on
    pub at: String,

    pub upcoming: u64,
    pub current: u64,
    pub expired: u64,
    pub inactive: u64,

    /// Live discounts counted
    pub total: u64,
}

impl SummaryResponse {
    fn new(summary: StatusSummary, at: String) -> Self {
        Self {
            at,
            upcoming: summary.upcoming,
            current: summary.current,
            expired: summary.expired,
            inactive: summary.inactive,
            total: summary.total(),
        }
    }
}

/// Discount Status Summary Handler
///
/// Counts live discounts in each derived status.
#[endpoint(
    tags("discounts"),
    summary = "Summarise Discount Statuses",
    responses(
        (status_code = StatusCode::OK, description = "Statuses counted"),
        (status_code = StatusCode::FORBIDDEN, description = "Forbidden"),
    ),
)]
pub(crate) async fn handler(
    at: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<SummaryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;
    let at = at.into_date_or_today()?;

    let summary = state
        .discounts
        .summarize_discounts(actor, at)
        .await
        .map_err(into_status_error)?;

    Ok(Json(SummaryResponse::new(summary, at.to_string())))
}
