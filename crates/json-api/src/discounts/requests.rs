//! Discount request bodies and their parsing.

use jiff::civil::Date;
use rebate::discounts::{DiscountKind, DiscountType};
use rust_decimal::Decimal;
use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};

use crate::extensions::*;

/// Discount terms shared by create and update
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DiscountTermsRequest {
    /// Either `percent` or `fixed`
    pub discount_type: String,

    /// Percentage points, or minor units taken off each unit
    pub amount: String,

    /// First day the discount applies (`YYYY-MM-DD`)
    pub start_date: String,

    /// Last day the discount applies (`YYYY-MM-DD`)
    pub end_date: String,
}

/// Parsed discount terms
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DiscountTerms {
    pub kind: DiscountKind,
    pub start: Date,
    pub end: Date,
}

impl DiscountTermsRequest {
    pub(crate) fn parse(&self) -> Result<DiscountTerms, StatusError> {
        let discount_type = self
            .discount_type
            .parse::<DiscountType>()
            .or_400("invalid discount_type")?;

        let amount = parse_decimal("amount", &self.amount)?;

        let kind = discount_type.with_amount(amount).ok_or_else(|| {
            StatusError::bad_request().brief("fixed amounts must be whole minor units")
        })?;

        Ok(DiscountTerms {
            kind,
            start: parse_date("start_date", &self.start_date)?,
            end: parse_date("end_date", &self.end_date)?,
        })
    }
}

/// New end date for extend and shorten
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct EndDateRequest {
    /// Requested last day (`YYYY-MM-DD`)
    pub end_date: String,
}

impl EndDateRequest {
    pub(crate) fn parse(&self) -> Result<Date, StatusError> {
        parse_date("end_date", &self.end_date)
    }
}

pub(crate) fn parse_date(field: &str, value: &str) -> Result<Date, StatusError> {
    value
        .trim()
        .parse::<Date>()
        .or_400(&format!("could not parse {field}"))
}

pub(crate) fn parse_decimal(field: &str, value: &str) -> Result<Decimal, StatusError> {
    value
        .trim()
        .parse::<Decimal>()
        .or_400(&format!("could not parse {field}"))
}
