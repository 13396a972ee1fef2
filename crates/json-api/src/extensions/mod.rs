//! Extension traits

mod actor;
mod as_of;
mod depot;
mod result;

pub(crate) use actor::ActorExt as _;
pub(crate) use as_of::{AsOfExt as _, today};
pub(crate) use depot::DepotExt as _;
pub(crate) use result::ResultExt as _;
