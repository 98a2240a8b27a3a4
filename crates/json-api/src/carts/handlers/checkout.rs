//! Checkout Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use shopfront_app::domain::orders::data::CheckoutDetails;

use crate::{
    extensions::*,
    observability::record_checkout,
    orders::{errors::into_status_error, get::OrderResponse},
    state::State,
};

/// Checkout Request
///
/// Customer and shipping details recorded on the order.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutRequest {
    pub name: String,
    pub email: String,

    /// At least 10 digits, optionally prefixed by `+`
    pub phone: String,

    /// Letters, whitespace and hyphens, with at least one letter (max 100 characters).
    /// Digits and punctuation are rejected.
    pub street: String,
    pub building: String,
    pub apartment: Option<String>,
    pub floor: Option<i16>,
}

impl From<CheckoutRequest> for CheckoutDetails {
    fn from(request: CheckoutRequest) -> Self {
        CheckoutDetails {
            name: request.name,
            email: request.email,
            phone: request.phone,
            street: request.street,
            building: request.building,
            apartment: request.apartment,
            floor: request.floor,
        }
    }
}

/// Checkout Handler
///
/// Turns the cart into a pending order and empties the cart. Nothing changes when the
/// details are invalid.
#[endpoint(
    tags("cart"),
    summary = "Checkout",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order created", body = OrderResponse),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid checkout details"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CheckoutRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let order = state
        .app
        .orders
        .checkout(user, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    record_checkout(order.items.len());

    res.add_header(LOCATION, format!("/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;
    use validator::Validate;

    use shopfront_app::domain::orders::{
        MockOrdersService, OrderStatus, OrdersServiceError, records::OrderUuid,
    };

    use crate::test_helpers::{Mocks, TEST_USER_UUID, make_order};

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        Mocks {
            orders,
            ..Mocks::default()
        }
        .service(Router::with_path("cart/checkout").post(handler))
    }

    fn checkout_body() -> Value {
        json!({
            "name": "Alice",
            "email": "alice@example.com",
            "phone": "+375291234567",
            "street": "Nezavisimosti Avenue",
            "building": "4",
            "floor": 2,
        })
    }

    #[tokio::test]
    async fn test_checkout_creates_order() -> TestResult {
        let uuid = OrderUuid::new();
        let mut orders = MockOrdersService::new();

        orders
            .expect_checkout()
            .once()
            .withf(|user, details| {
                *user == TEST_USER_UUID
                    && details.phone == "+375291234567"
                    && details.apartment.is_none()
                    && details.floor == Some(2)
            })
            .return_once(move |_, _| Ok(make_order(uuid, OrderStatus::Pending)));

        let mut res = TestClient::post("http://example.com/cart/checkout")
            .json(&checkout_body())
            .send(&make_service(orders))
            .await;

        let body: OrderResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/orders/{uuid}").as_str()));
        assert_eq!(body.status, "pending");
        assert_eq!(body.total_price, 20_00);

        let metrics = crate::observability::scrape_metrics().await;

        assert!(
            metrics.contains("shopfront_json_checkouts_total"),
            "checkout should be counted"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_invalid_details_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_checkout().once().return_once(|_, details| {
            let errors = details
                .validate()
                .err()
                .unwrap_or_else(validator::ValidationErrors::new);

            Err(OrdersServiceError::Validation(errors))
        });

        let mut body = checkout_body();
        body["phone"] = json!("123");

        let res = TestClient::post("http://example.com/cart/checkout")
            .json(&body)
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[test]
    fn request_converts_to_checkout_details() {
        let details = CheckoutDetails::from(CheckoutRequest {
            name: "Alice".to_owned(),
            email: "alice@example.com".to_owned(),
            phone: "+375291234567".to_owned(),
            street: "Main Street".to_owned(),
            building: "1A".to_owned(),
            apartment: Some("12".to_owned()),
            floor: None,
        });

        assert!(details.validate().is_ok(), "expected valid details");
    }

    #[test]
    fn street_accepts_whitespace_and_hyphens_but_not_digits() {
        let request = |street: &str| CheckoutRequest {
            name: "Alice".to_owned(),
            email: "alice@example.com".to_owned(),
            phone: "+375291234567".to_owned(),
            street: street.to_owned(),
            building: "1A".to_owned(),
            apartment: None,
            floor: None,
        };

        let spaced = CheckoutDetails::from(request("Old Mill-Lane"));
        let numbered = CheckoutDetails::from(request("Street 9"));

        assert!(spaced.validate().is_ok(), "spaces and hyphens are allowed");
        assert!(
            numbered
                .validate()
                .is_err_and(|errors| errors.field_errors().contains_key("street")),
            "digits are rejected"
        );
    }
}
