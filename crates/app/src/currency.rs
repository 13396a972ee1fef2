//! Store currency lookup

use rusty_money::{Findable, iso::Currency};
use thiserror::Error;

/// Unrecognised ISO 4217 code
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown currency code: {0}")]
pub struct UnknownCurrency(pub String);

/// Find an ISO 4217 currency by code, ignoring case.
///
/// # Errors
///
/// Returns an error if the code is not a known currency.
pub fn find_currency(code: &str) -> Result<&'static Currency, UnknownCurrency> {
    Currency::find(&code.trim().to_ascii_uppercase())
        .ok_or_else(|| UnknownCurrency(code.to_string()))
}
