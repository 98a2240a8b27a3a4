//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use validator::Validate;

use crate::{
    database::Db,
    domain::{
        carts::repositories::{PgCartItemsRepository, PgCartsRepository},
        orders::{
            data::CheckoutDetails,
            errors::OrdersServiceError,
            records::{OrderItemUuid, OrderRecord, OrderUuid},
            repositories::{NewOrderItem, PgOrderItemsRepository, PgOrdersRepository},
            status::OrderAction,
        },
        users::records::UserUuid,
    },
    money::Discount,
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders_repository: PgOrdersRepository,
    items_repository: PgOrderItemsRepository,
    carts_repository: PgCartsRepository,
    cart_items_repository: PgCartItemsRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders_repository: PgOrdersRepository::new(),
            items_repository: PgOrderItemsRepository::new(),
            carts_repository: PgCartsRepository::new(),
            cart_items_repository: PgCartItemsRepository::new(),
        }
    }

    #[tracing::instrument(
        name = "orders.service.transition",
        skip(self),
        fields(from = tracing::field::Empty, to = tracing::field::Empty),
        err
    )]
    async fn transition(
        &self,
        user: UserUuid,
        order: OrderUuid,
        action: OrderAction,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.orders_repository.lock_order(&mut tx, order).await?;

        if !current.is_owned_by(user) {
            if action.requires_owner() {
                return Err(OrdersServiceError::Forbidden);
            }

            tracing::warn!(
                order_uuid = %order,
                owner_uuid = %current.user_uuid,
                actor_uuid = %user,
                %action,
                "order transition by non-owner"
            );
        }

        let next = action.apply(current.status)?;

        let span = tracing::Span::current();
        span.record("from", current.status.as_str());
        span.record("to", next.as_str());

        let updated = self
            .orders_repository
            .update_status(&mut tx, order, next)
            .await?;

        let updated = self.items_repository.with_items(&mut tx, updated).await?;

        tx.commit().await?;

        tracing::info!(
            order_uuid = %order,
            %action,
            status = %updated.status,
            "order status changed"
        );

        Ok(updated)
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    #[tracing::instrument(
        name = "orders.service.checkout",
        skip(self, details),
        fields(order_uuid = tracing::field::Empty, item_count = tracing::field::Empty),
        err
    )]
    async fn checkout(
        &self,
        user: UserUuid,
        details: CheckoutDetails,
    ) -> Result<OrderRecord, OrdersServiceError> {
        details.validate()?;

        let mut tx = self.db.begin().await?;

        let cart = self
            .carts_repository
            .get_or_create_cart(&mut tx, user)
            .await?;

        let cart_items = self
            .cart_items_repository
            .list_cart_items(&mut tx, cart.uuid)
            .await?;

        let order_uuid = OrderUuid::new();

        let order = self
            .orders_repository
            .create_order(&mut tx, order_uuid, user, details)
            .await?;

        let items = cart_items
            .iter()
            .map(|item| {
                Ok(NewOrderItem {
                    uuid: OrderItemUuid::new(),
                    product_uuid: item.product_uuid,
                    quantity: i32::try_from(item.quantity)?,
                })
            })
            .collect::<Result<Vec<_>, OrdersServiceError>>()?;

        self.items_repository
            .create_order_items(&mut tx, order_uuid, &items)
            .await?;

        self.cart_items_repository
            .clear_cart_items(&mut tx, cart.uuid)
            .await?;

        let order = self.items_repository.with_items(&mut tx, order).await?;

        tx.commit().await?;

        let span = tracing::Span::current();
        span.record("order_uuid", tracing::field::display(order.uuid));
        span.record("item_count", order.items.len());

        tracing::info!(
            order_uuid = %order.uuid,
            cart_uuid = %cart.uuid,
            item_count = order.items.len(),
            "checked out cart"
        );

        Ok(order)
    }

    async fn list_orders(&self, user: UserUuid) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut orders = self.orders_repository.list_orders(&mut tx, user).await?;

        self.items_repository
            .attach_items(&mut tx, &mut orders)
            .await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn get_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let order = self.orders_repository.get_order(&mut tx, order).await?;

        if !order.is_owned_by(user) {
            return Err(OrdersServiceError::Forbidden);
        }

        let order = self.items_repository.with_items(&mut tx, order).await?;

        tx.commit().await?;

        Ok(order)
    }

    async fn pay(&self, user: UserUuid, order: OrderUuid) -> Result<OrderRecord, OrdersServiceError> {
        self.transition(user, order, OrderAction::Pay).await
    }

    async fn cancel(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        self.transition(user, order, OrderAction::Cancel).await
    }

    async fn reset(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        self.transition(user, order, OrderAction::Reset).await
    }

    async fn set_discount(
        &self,
        order: OrderUuid,
        discount: Option<Discount>,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .orders_repository
            .update_discount(&mut tx, order, discount)
            .await?;

        let updated = self.items_repository.with_items(&mut tx, updated).await?;

        tx.commit().await?;

        tracing::info!(
            order_uuid = %order,
            discount = discount.map(Discount::percent),
            "order discount set"
        );

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Turns the user's cart into a pending order and empties the cart.
    ///
    /// Details are validated before anything is written. Either the order is created
    /// with every cart item and the cart is emptied, or nothing changes.
    async fn checkout(
        &self,
        user: UserUuid,
        details: CheckoutDetails,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// The user's own orders, newest first.
    async fn list_orders(&self, user: UserUuid) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    async fn get_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Confirms a pending order. Owner only.
    async fn pay(&self, user: UserUuid, order: OrderUuid) -> Result<OrderRecord, OrdersServiceError>;

    /// Cancels an order in any status. Owner only.
    async fn cancel(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Moves an order back to pending. Any authenticated user may do this.
    async fn reset(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Sets or clears the order's discount.
    async fn set_discount(
        &self,
        order: OrderUuid,
        discount: Option<Discount>,
    ) -> Result<OrderRecord, OrdersServiceError>;
}
