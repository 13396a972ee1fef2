//! Discount Errors

use salvo::http::StatusError;
use tracing::error;

use rebate_app::domain::discounts::DiscountsServiceError;

pub(crate) fn into_status_error(error: DiscountsServiceError) -> StatusError {
    match error {
        DiscountsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Discount already exists")
        }
        DiscountsServiceError::Conflict => {
            StatusError::conflict().brief("Discount was changed by another request")
        }
        DiscountsServiceError::InvalidWindow(window) => {
            StatusError::unprocessable_entity().brief(window.to_string())
        }
        DiscountsServiceError::InvalidTerms(terms) => {
            StatusError::bad_request().brief(terms.to_string())
        }
        DiscountsServiceError::InvalidReference => {
            StatusError::bad_request().brief("Product does not exist")
        }
        DiscountsServiceError::MissingRequiredData | DiscountsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid discount payload")
        }
        DiscountsServiceError::Forbidden => StatusError::forbidden(),
        DiscountsServiceError::NotFound => StatusError::not_found(),
        DiscountsServiceError::Sql(source) => {
            error!("discount storage failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
