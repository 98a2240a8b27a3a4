//! Product Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use shopfront_app::domain::products::data::{ProductOrder, ProductsQuery};

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// The list of products
    pub products: Vec<ProductResponse>,
}

fn parse_order(order: Option<&str>) -> Result<ProductOrder, StatusError> {
    match order {
        None | Some("newest") => Ok(ProductOrder::Newest),
        Some("oldest") => Ok(ProductOrder::Oldest),
        Some(other) => Err(StatusError::bad_request().brief(format!(
            "Unknown order `{other}`, expected `newest` or `oldest`"
        ))),
    }
}

/// Product Index Handler
///
/// Lists products, optionally limited to one category (by slug) and to active or inactive
/// products.
#[endpoint(
    tags("products"),
    summary = "List Products",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    category: QueryParam<String, false>,
    order: QueryParam<String, false>,
    active: QueryParam<bool, false>,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let query = ProductsQuery {
        category: category.into_inner(),
        order: parse_order(order.into_inner().as_deref())?,
        active: active.into_inner(),
    };

    let products = state
        .app
        .products
        .list_products(query)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductsResponse {
        products: products.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use shopfront_app::domain::products::{
        MockProductsService, ProductsServiceError, records::ProductUuid,
    };

    use crate::test_helpers::{Mocks, make_product};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        Mocks {
            products,
            ..Mocks::default()
        }
        .service(Router::with_path("products").get(handler))
    }

    #[tokio::test]
    async fn test_index_defaults_to_newest_unfiltered() -> TestResult {
        let uuid = ProductUuid::new();
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .withf(|query| *query == ProductsQuery::default())
            .return_once(move |_| Ok(vec![make_product(uuid)]));

        let mut res = TestClient::get("http://example.com/products")
            .send(&make_service(products))
            .await;

        let body: ProductsResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.products.len(), 1);
        assert_eq!(body.products.first().map(|p| p.uuid), Some(uuid.into_uuid()));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_forwards_filters() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .withf(|query| {
                *query
                    == ProductsQuery {
                        category: Some("fruit".to_owned()),
                        order: ProductOrder::Oldest,
                        active: Some(true),
                    }
            })
            .return_once(|_| Ok(Vec::new()));

        let res = TestClient::get("http://example.com/products?category=fruit&order=oldest&active=true")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_unknown_order_returns_400() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_list_products().never();

        let res = TestClient::get("http://example.com/products?order=cheapest")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_unknown_category_returns_404() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .return_once(|_| Err(ProductsServiceError::NotFound));

        let res = TestClient::get("http://example.com/products?category=nope")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
