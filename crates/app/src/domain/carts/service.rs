//! Carts service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        carts::{
            data::NewCartItem,
            errors::CartsServiceError,
            records::{CartItemRecord, CartItemUuid, CartRecord},
            repositories::{PgCartItemsRepository, PgCartsRepository},
        },
        products::records::ProductUuid,
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
        }
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let mut cart = self.carts_repository.get_or_create_cart(&mut tx, user).await?;

        let items = self
            .items_repository
            .list_cart_items(&mut tx, cart.uuid)
            .await?;

        tx.commit().await?;

        cart.items.extend(items);

        Ok(cart)
    }

    #[tracing::instrument(name = "carts.service.add_to_cart", skip(self), err)]
    async fn add_to_cart(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<CartItemRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.carts_repository.get_or_create_cart(&mut tx, user).await?;

        let item = self
            .items_repository
            .add_cart_item(
                &mut tx,
                cart.uuid,
                NewCartItem {
                    uuid: CartItemUuid::new(),
                    product_uuid: product,
                },
            )
            .await?;

        tx.commit().await?;

        tracing::info!(
            cart_uuid = %cart.uuid,
            quantity = item.quantity,
            "added product to cart"
        );

        Ok(item)
    }

    #[tracing::instrument(name = "carts.service.remove_from_cart", skip(self), err)]
    async fn remove_from_cart(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.carts_repository.get_or_create_cart(&mut tx, user).await?;

        let rows_affected = self
            .items_repository
            .delete_cart_item(&mut tx, cart.uuid, product)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        tx.commit().await?;

        tracing::info!(cart_uuid = %cart.uuid, "removed product from cart");

        Ok(())
    }

    async fn increment(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<CartItemRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.carts_repository.get_or_create_cart(&mut tx, user).await?;

        let item = self
            .items_repository
            .adjust_quantity(&mut tx, cart.uuid, product, 1)
            .await?;

        tx.commit().await?;

        Ok(item)
    }

    async fn decrement(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<Option<CartItemRecord>, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.carts_repository.get_or_create_cart(&mut tx, user).await?;

        let quantity = self
            .items_repository
            .lock_quantity(&mut tx, cart.uuid, product)
            .await?;

        let remaining = if quantity <= 1 {
            self.items_repository
                .delete_cart_item(&mut tx, cart.uuid, product)
                .await?;

            None
        } else {
            let item = self
                .items_repository
                .adjust_quantity(&mut tx, cart.uuid, product, -1)
                .await?;

            Some(item)
        };

        tx.commit().await?;

        Ok(remaining)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve the user's cart with its items, creating an empty cart on first access.
    async fn get_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError>;

    /// Puts one unit of `product` in the user's cart.
    ///
    /// A product already in the cart has its quantity raised by one.
    async fn add_to_cart(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<CartItemRecord, CartsServiceError>;

    /// Removes the product's item from the cart whatever its quantity.
    async fn remove_from_cart(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<(), CartsServiceError>;

    async fn increment(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<CartItemRecord, CartsServiceError>;

    /// Lowers the quantity by one, removing the item instead when it would reach zero.
    ///
    /// Returns `None` when the item was removed.
    async fn decrement(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<Option<CartItemRecord>, CartsServiceError>;
}
