//! Decrement Cart Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    carts::{errors::into_status_error, get::CartItemResponse},
    extensions::*,
    state::State,
};

/// Decrement Cart Item Handler
///
/// Lowers the quantity by one. An item at quantity one is removed instead and the
/// response is `204 No Content`.
#[endpoint(
    tags("cart"),
    summary = "Decrement Cart Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Quantity lowered by one", body = CartItemResponse),
        (status_code = StatusCode::NO_CONTENT, description = "Item removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not in cart"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let item = state
        .app
        .carts
        .decrement(user, product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    match item {
        Some(item) => res.render(Json(CartItemResponse::from(item))),
        None => {
            res.status_code(StatusCode::NO_CONTENT);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use shopfront_app::domain::{
        carts::{CartsServiceError, MockCartsService},
        products::records::ProductUuid,
    };

    use crate::test_helpers::{Mocks, TEST_USER_UUID, make_cart_item};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        Mocks {
            carts,
            ..Mocks::default()
        }
        .service(Router::with_path("cart/items/{product}/decrement").post(handler))
    }

    #[tokio::test]
    async fn test_decrement_returns_lowered_quantity() -> TestResult {
        let product = ProductUuid::new();
        let mut carts = MockCartsService::new();

        carts
            .expect_decrement()
            .once()
            .withf(move |user, p| *user == TEST_USER_UUID && *p == product)
            .return_once(|_, p| Ok(Some(make_cart_item(p, 10_00, 1))));

        let mut res =
            TestClient::post(format!("http://example.com/cart/items/{product}/decrement"))
                .send(&make_service(carts))
                .await;

        let body: CartItemResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.quantity, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_decrement_to_zero_returns_204() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_decrement()
            .once()
            .return_once(|_, _| Ok(None));

        let res = TestClient::post(format!(
            "http://example.com/cart/items/{}/decrement",
            ProductUuid::new()
        ))
        .send(&make_service(carts))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_decrement_missing_item_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_decrement()
            .once()
            .return_once(|_, _| Err(CartsServiceError::NotFound));

        let res = TestClient::post(format!(
            "http://example.com/cart/items/{}/decrement",
            ProductUuid::new()
        ))
        .send(&make_service(carts))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
