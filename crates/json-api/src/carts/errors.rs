//! Cart Errors

use salvo::http::StatusError;
use tracing::error;

use shopfront_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::NotFound => {
            StatusError::not_found().brief("Product or cart item not found")
        }
        CartsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Cart item already exists")
        }
        CartsServiceError::InvalidData | CartsServiceError::InvalidQuantity(_) => {
            StatusError::bad_request().brief("Invalid cart item quantity")
        }
        CartsServiceError::Sql(source) => {
            error!("cart storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
