//! Rebate prelude.
//!
//! Everything needed to build discounts and price order lines.

pub use crate::{
    discounts::{Discount, DiscountError, DiscountKind, DiscountType},
    engine::{
        LineApplication, apply_to_line, best_for_line, calculate, extend, is_currently_valid,
        shorten, shorten_as_of, validate,
    },
    pricing::line_total,
    status::{DiscountStatus, UnknownStatus, status},
    windows::{DiscountWindow, InvalidWindow},
};
