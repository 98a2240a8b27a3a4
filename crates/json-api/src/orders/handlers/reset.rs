//! Reset Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use shopfront_app::domain::orders::OrderAction;

use crate::{
    extensions::*,
    observability::record_order_transition,
    orders::{errors::into_status_error, get::OrderResponse},
    state::State,
};

/// Reset Order Handler
///
/// Moves an order back to pending from any status. Any authenticated user may reset any
/// order.
#[endpoint(
    tags("orders"),
    summary = "Reset Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Updated order", body = OrderResponse),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let order = state
        .app
        .orders
        .reset(user, order.into_inner().into())
        .await
        .map_err(into_status_error)?;

    record_order_transition(OrderAction::Reset, order.status);

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

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
        .service(Router::with_path("orders/{order}/reset").post(handler))
    }

    #[tokio::test]
    async fn test_reset_returns_updated_order() -> TestResult {
        let uuid = OrderUuid::new();
        let mut orders = MockOrdersService::new();

        orders
            .expect_reset()
            .once()
            .withf(move |user, o| *user == TEST_USER_UUID && *o == uuid)
            .return_once(|_, o| Ok(make_order(o, OrderStatus::Pending)));

        let mut res = TestClient::post(format!("http://example.com/orders/{uuid}/reset"))
            .send(&make_service(orders))
            .await;

        let body: OrderResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.status, "pending");

        Ok(())
    }

    #[tokio::test]
    async fn test_reset_missing_order_returns_404() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_reset()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::NotFound));

        let res = TestClient::post(format!(
            "http://example.com/orders/{}/reset",
            OrderUuid::new()
        ))
        .send(&make_service(orders))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
