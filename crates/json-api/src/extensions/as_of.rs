//! Reference date query parsing helpers.

use jiff::{Zoned, civil::Date};
use salvo::{oapi::extract::QueryParam, prelude::StatusError};

use crate::extensions::*;

pub(crate) trait AsOfExt {
    /// Parse an optional `YYYY-MM-DD` date, defaulting to today.
    fn into_date_or_today(self) -> Result<Date, StatusError>;
}

impl AsOfExt for QueryParam<String, false> {
    fn into_date_or_today(self) -> Result<Date, StatusError> {
        self.into_inner()
            .map(|value| value.parse::<Date>())
            .transpose()
            .or_400("could not parse \"at\" query parameter")
            .map(|date| date.unwrap_or_else(today))
    }
}

/// Current civil date in the server's time zone.
pub(crate) fn today() -> Date {
    Zoned::now().date()
}
