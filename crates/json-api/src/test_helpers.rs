//! Test helpers.

use std::sync::Arc;

use rebate_app::{
    domain::discounts::MockDiscountsService,
    policy::{Actor, Permission},
};
use rusty_money::iso::GBP;
use salvo::{affix_state::inject, prelude::*};

use crate::{extensions::*, state::State};

pub(crate) const TEST_ACTOR_ID: &str = "tester";

pub(crate) fn test_actor() -> Actor {
    Actor::new(TEST_ACTOR_ID, Permission::ALL)
}

#[salvo::handler]
pub(crate) async fn inject_actor(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_actor(test_actor());
    ctrl.call_next(req, depot, res).await;
}

pub(crate) fn state_with_discounts(discounts: MockDiscountsService) -> Arc<State> {
    Arc::new(State::new(Arc::new(discounts), GBP))
}

pub(crate) fn discounts_service(discounts: MockDiscountsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_discounts(discounts)))
            .hoop(inject_actor)
            .push(route),
    )
}
