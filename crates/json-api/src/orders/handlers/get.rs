//! Get Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shopfront_app::domain::orders::records::{OrderItemRecord, OrderRecord};

use crate::{extensions::*, orders::errors::into_status_error, state::State};

/// Order Response
///
/// All prices are minor units computed from current product prices.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,

    /// `pending`, `confirmed` or `canceled`
    pub status: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub street: String,
    pub building: String,
    pub apartment: Option<String>,
    pub floor: Option<i16>,

    /// Discount percentage, if any
    pub discount: Option<u8>,
    pub items: Vec<OrderItemResponse>,

    /// Sum of item prices before discount
    pub price: u64,
    pub discount_amount: u64,

    /// Price after discount
    pub total_price: u64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        let price = order.price();
        let discount_amount = order.discount_amount();
        let total_price = order.total_price();

        Self {
            uuid: order.uuid.into(),
            status: order.status.to_string(),
            name: order.name,
            email: order.email,
            phone: order.phone,
            street: order.street,
            building: order.building,
            apartment: order.apartment,
            floor: order.floor,
            discount: order.discount.map(|discount| discount.percent()),
            items: order.items.into_iter().map(Into::into).collect(),
            price,
            discount_amount,
            total_price,
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

/// Order Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub product_name: String,
    pub unit_price: u64,
    pub quantity: u32,
    pub price: u64,
}

impl From<OrderItemRecord> for OrderItemResponse {
    fn from(item: OrderItemRecord) -> Self {
        Self {
            uuid: item.uuid.into(),
            product_uuid: item.product_uuid.into(),
            price: item.price(),
            product_name: item.product_name,
            unit_price: item.unit_price,
            quantity: item.quantity,
        }
    }
}

/// Get Order Handler
///
/// Returns one of the authenticated user's orders.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order", body = OrderResponse),
        (status_code = StatusCode::FORBIDDEN, description = "Order belongs to another user"),
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
        .get_order(user, order.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}
