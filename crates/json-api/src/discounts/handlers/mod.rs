//! Discount Handlers

pub(crate) mod apply;
pub(crate) mod best;
pub(crate) mod calculate;
pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod extend;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod shorten;
pub(crate) mod summary;
pub(crate) mod toggle;
pub(crate) mod update;
pub(crate) mod validate;
