//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use shopfront_app::domain::orders::OrdersServiceError;

use crate::validation;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::Forbidden => {
            StatusError::forbidden().brief("Order belongs to another user")
        }
        OrdersServiceError::InvalidTransition(transition) => {
            StatusError::conflict().brief(transition.to_string())
        }
        OrdersServiceError::Validation(errors) => {
            validation::bad_request("checkout details", &errors)
        }
        OrdersServiceError::AlreadyExists => StatusError::conflict().brief("Order already exists"),
        OrdersServiceError::InvalidReference
        | OrdersServiceError::MissingRequiredData
        | OrdersServiceError::InvalidData
        | OrdersServiceError::InvalidQuantity(_) => {
            StatusError::bad_request().brief("Invalid order data")
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use shopfront_app::domain::orders::{OrderAction, OrderStatus};

    use super::*;

    #[test]
    fn invalid_transition_is_a_conflict_naming_the_states() {
        let error = OrderAction::Pay
            .apply(OrderStatus::Canceled)
            .map_err(OrdersServiceError::from)
            .err();

        let status = error.map(into_status_error);

        assert_eq!(status.as_ref().map(|s| s.code), Some(StatusCode::CONFLICT));
        assert_eq!(
            status.map(|s| s.brief),
            Some("cannot pay an order that is canceled".to_owned())
        );
    }

    #[test]
    fn forbidden_maps_to_403() {
        assert_eq!(
            into_status_error(OrdersServiceError::Forbidden).code,
            StatusCode::FORBIDDEN
        );
    }
}
