//! Discounts service errors.

use rebate::{discounts::DiscountError, windows::InvalidWindow};
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

/// Failures surfaced by the discounts service.
#[derive(Debug, Error)]
pub enum DiscountsServiceError {
    /// A discount with this UUID is already stored.
    #[error("discount already exists")]
    AlreadyExists,

    /// No live discount with this UUID.
    #[error("discount not found")]
    NotFound,

    /// A referenced row does not exist.
    #[error("related resource not found")]
    InvalidReference,

    /// A required column was null.
    #[error("missing required data")]
    MissingRequiredData,

    /// A storage check constraint rejected the row.
    #[error("invalid data")]
    InvalidData,

    /// The requested window is not allowed.
    #[error(transparent)]
    InvalidWindow(#[from] InvalidWindow),

    /// Type or amount failed validation.
    #[error("invalid discount terms: {0}")]
    InvalidTerms(#[source] DiscountError),

    /// The end date moved between read and write.
    #[error("discount was changed concurrently")]
    Conflict,

    /// The actor lacks the required permission.
    #[error("action not permitted")]
    Forbidden,

    /// Any other database failure.
    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<DiscountError> for DiscountsServiceError {
    fn from(error: DiscountError) -> Self {
        match error {
            DiscountError::InvalidWindow(window) => Self::InvalidWindow(window),
            other => Self::InvalidTerms(other),
        }
    }
}

impl From<Error> for DiscountsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        let error = DiscountsServiceError::from(Error::RowNotFound);

        assert!(matches!(error, DiscountsServiceError::NotFound));
    }

    #[test]
    fn other_storage_errors_are_kept() {
        let error = DiscountsServiceError::from(Error::PoolTimedOut);

        assert!(matches!(error, DiscountsServiceError::Sql(Error::PoolTimedOut)));
    }

    #[test]
    fn window_errors_are_lifted_out_of_discount_errors() {
        let window = InvalidWindow::EndBeforeStart {
            start: date(2024, 2, 1),
            end: date(2024, 1, 1),
        };

        assert!(matches!(
            DiscountsServiceError::from(DiscountError::InvalidWindow(window)),
            DiscountsServiceError::InvalidWindow(inner) if inner == window
        ));
        assert!(matches!(
            DiscountsServiceError::from(DiscountError::NegativeAmount),
            DiscountsServiceError::InvalidTerms(DiscountError::NegativeAmount)
        ));
    }
}
