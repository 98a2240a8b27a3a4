//! Create Category Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shopfront_app::{
    domain::categories::{data::NewCategory, records::CategoryUuid},
    slugs::slugify,
};

use crate::{
    categories::{errors::into_status_error, index::CategoryResponse},
    extensions::*,
    state::State,
};

/// Create Category Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateCategoryRequest {
    /// Client-chosen identifier; generated when omitted
    pub uuid: Option<Uuid>,
    pub name: String,

    /// Derived from the name when omitted
    pub slug: Option<String>,
}

impl From<CreateCategoryRequest> for NewCategory {
    fn from(request: CreateCategoryRequest) -> Self {
        let slug = request.slug.unwrap_or_else(|| slugify(&request.name));

        NewCategory {
            uuid: request.uuid.map_or_else(CategoryUuid::new, Into::into),
            name: request.name,
            slug,
        }
    }
}

/// Create Category Handler
#[endpoint(
    tags("categories"),
    summary = "Create Category",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Category created"),
        (status_code = StatusCode::CONFLICT, description = "Category already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateCategoryRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CategoryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let category = state
        .app
        .categories
        .create_category(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/categories/{}", category.slug), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(category.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;
    use validator::{ValidationError, ValidationErrors};

    use shopfront_app::domain::categories::{CategoriesServiceError, MockCategoriesService};

    use crate::test_helpers::{Mocks, make_category};

    use super::*;

    fn make_service(categories: MockCategoriesService) -> Service {
        Mocks {
            categories,
            ..Mocks::default()
        }
        .service(Router::with_path("categories").post(handler))
    }

    #[tokio::test]
    async fn test_create_category_derives_slug() -> TestResult {
        let mut categories = MockCategoriesService::new();

        categories
            .expect_create_category()
            .once()
            .withf(|new| new.name == "Fresh Fruit" && new.slug == "fresh-fruit")
            .return_once(|_| Ok(make_category("fresh-fruit")));

        let mut res = TestClient::post("http://example.com/categories")
            .json(&json!({ "name": "Fresh Fruit" }))
            .send(&make_service(categories))
            .await;

        let body: CategoryResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some("/categories/fresh-fruit"));
        assert_eq!(body.slug, "fresh-fruit");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_category_keeps_given_uuid() -> TestResult {
        let uuid = CategoryUuid::new();
        let mut categories = MockCategoriesService::new();

        categories
            .expect_create_category()
            .once()
            .withf(move |new| new.uuid == uuid && new.slug == "veg")
            .return_once(|_| Ok(make_category("veg")));

        let res = TestClient::post("http://example.com/categories")
            .json(&json!({ "uuid": uuid.into_uuid(), "name": "Vegetables", "slug": "veg" }))
            .send(&make_service(categories))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_category_conflict_returns_409() -> TestResult {
        let mut categories = MockCategoriesService::new();

        categories
            .expect_create_category()
            .once()
            .return_once(|_| Err(CategoriesServiceError::AlreadyExists));

        let res = TestClient::post("http://example.com/categories")
            .json(&json!({ "name": "Fruit" }))
            .send(&make_service(categories))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_category_invalid_returns_400() -> TestResult {
        let mut categories = MockCategoriesService::new();

        categories.expect_create_category().once().return_once(|_| {
            let mut errors = ValidationErrors::new();
            errors.add("name", ValidationError::new("length"));

            Err(CategoriesServiceError::Validation(errors))
        });

        let res = TestClient::post("http://example.com/categories")
            .json(&json!({ "name": "", "slug": "empty" }))
            .send(&make_service(categories))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
