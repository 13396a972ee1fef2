//! Acting principal stored in the depot.

use rebate_app::policy::Actor;
use salvo::prelude::{Depot, StatusError};

/// Store and retrieve the request's [`Actor`].
pub(crate) trait ActorExt {
    fn insert_actor(&mut self, actor: Actor);

    fn actor_or_401(&self) -> Result<&Actor, StatusError>;
}

impl ActorExt for Depot {
    fn insert_actor(&mut self, actor: Actor) {
        self.inject(actor);
    }

    fn actor_or_401(&self) -> Result<&Actor, StatusError> {
        self.obtain::<Actor>()
            .map_err(|_ignored| StatusError::unauthorized())
    }
}
