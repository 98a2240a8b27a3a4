//! Get Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shopfront_app::domain::products::records::ProductRecord;

use crate::{
    comments::{self, create::CommentResponse},
    extensions::*,
    products::errors::into_status_error,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub uuid: Uuid,
    pub name: String,
    pub slug: String,

    /// The price of the product in minor units
    pub price: u64,
    pub description: Option<String>,
    pub image: Option<String>,
    pub is_active: bool,

    /// Names of the categories the product belongs to
    pub categories: Vec<String>,

    /// The date and time the product was created
    pub created_at: String,

    /// The date and time the product was last updated
    pub updated_at: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        let categories = product
            .category_names()
            .into_iter()
            .map(str::to_owned)
            .collect();

        ProductResponse {
            uuid: product.uuid.into(),
            categories,
            name: product.name,
            slug: product.slug,
            price: product.price,
            description: product.description,
            image: product.image,
            is_active: product.is_active,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductDetailResponse {
    pub product: ProductResponse,

    /// Comments on the product, oldest first
    pub comments: Vec<CommentResponse>,
}

/// Get Product Handler
///
/// Looks the product up by UUID, or by slug when the path segment is not a UUID, and
/// returns it with its comments.
#[endpoint(
    tags("products"),
    summary = "Get Product",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    product: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<ProductDetailResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let key = product.into_inner();

    let product = match Uuid::parse_str(&key) {
        Ok(uuid) => state.app.products.get_product(uuid.into()).await,
        Err(_not_a_uuid) => state.app.products.get_product_by_slug(&key).await,
    }
    .map_err(into_status_error)?;

    let comments = state
        .app
        .comments
        .list_comments(product.uuid)
        .await
        .map_err(comments::errors::into_status_error)?;

    Ok(Json(ProductDetailResponse {
        product: product.into(),
        comments: comments.into_iter().map(Into::into).collect(),
    }))
}
