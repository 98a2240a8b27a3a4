//! Pay Order Handler

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

/// Pay Order Handler
///
/// Confirms a pending order. Only the owner may pay.
#[endpoint(
    tags("orders"),
    summary = "Pay Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Updated order", body = OrderResponse),
        (status_code = StatusCode::FORBIDDEN, description = "Order belongs to another user"),
        (status_code = StatusCode::CONFLICT, description = "Order is not pending"),
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
        .pay(user, order.into_inner().into())
        .await
        .map_err(into_status_error)?;

    record_order_transition(OrderAction::Pay, order.status);

    Ok(Json(order.into()))
}
