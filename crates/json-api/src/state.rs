//! Shared handler state

use std::sync::Arc;

use rebate_app::{context::AppContext, domain::discounts::DiscountsService};
use rusty_money::iso::Currency;

/// Services available to every handler through the depot.
#[derive(Clone)]
pub(crate) struct State {
    pub(crate) discounts: Arc<dyn DiscountsService>,
    pub(crate) currency: &'static Currency,
}

impl State {
    #[must_use]
    pub(crate) fn new(discounts: Arc<dyn DiscountsService>, currency: &'static Currency) -> Self {
        Self {
            discounts,
            currency,
        }
    }

    #[must_use]
    pub(crate) fn from_app_context(app: AppContext) -> Arc<Self> {
        Arc::new(Self::new(app.discounts, app.currency))
    }
}
