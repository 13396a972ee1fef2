//! Rebate
//!
//! Rebate is a product discount engine: time-bounded fixed or percentage
//! reductions applied to order lines, with window mutations and a status view.

pub mod discounts;
pub mod engine;
pub mod fixtures;
pub mod prelude;
pub mod pricing;
pub mod status;
pub mod windows;
