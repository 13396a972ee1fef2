//! Shared application domain and persistence modules.

pub mod context;
pub mod currency;
pub mod database;
pub mod domain;
pub mod policy;

mod uuids;
