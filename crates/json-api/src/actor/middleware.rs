//! Actor middleware.
//!
//! Resolves the acting principal from the `x-actor` and
//! `x-actor-permissions` headers set by the upstream gateway.

use rebate_app::policy::Actor;
use salvo::prelude::*;
use tracing::debug;

use crate::extensions::*;

/// Header naming the acting principal
pub(crate) const ACTOR_HEADER: &str = "x-actor";

/// Header carrying the actor's comma separated permission names
pub(crate) const PERMISSIONS_HEADER: &str = "x-actor-permissions";

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(actor_id) = header_value(req, ACTOR_HEADER).filter(|id| !id.is_empty()) else {
        res.render(StatusError::unauthorized().brief("Missing or invalid x-actor header"));

        return;
    };

    let permissions = header_value(req, PERMISSIONS_HEADER).unwrap_or_default();

    let actor = match Actor::with_permission_list(actor_id, permissions) {
        Ok(actor) => actor,
        Err(error) => {
            res.render(StatusError::bad_request().brief(error.to_string()));

            return;
        }
    };

    debug!(actor = actor.id(), "resolved request actor");

    depot.insert_actor(actor);

    ctrl.call_next(req, depot, res).await;
}

fn header_value<'r>(req: &'r Request, name: &str) -> Option<&'r str> {
    req.headers()
        .get(name)?
        .to_str()
        .ok()
        .map(str::trim)
}
