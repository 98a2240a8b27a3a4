//! Order Items Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rustc_hash::FxHashMap;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::{
    orders::records::{OrderItemRecord, OrderItemUuid, OrderRecord, OrderUuid},
    products::records::ProductUuid,
};

const CREATE_ORDER_ITEMS_SQL: &str = include_str!("../sql/create_order_items.sql");
const LIST_ORDER_ITEMS_SQL: &str = include_str!("../sql/list_order_items.sql");

/// Line to copy into a new order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NewOrderItem {
    pub uuid: OrderItemUuid,
    pub product_uuid: ProductUuid,
    pub quantity: i32,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderItemsRepository;

impl PgOrderItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    #[tracing::instrument(
        name = "orders.repository.create_order_items",
        skip(self, tx, items),
        fields(item_count = items.len()),
        err
    )]
    pub(crate) async fn create_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        items: &[NewOrderItem],
    ) -> Result<u64, sqlx::Error> {
        if items.is_empty() {
            return Ok(0);
        }

        let uuids: Vec<Uuid> = items.iter().map(|i| i.uuid.into_uuid()).collect();
        let products: Vec<Uuid> = items.iter().map(|i| i.product_uuid.into_uuid()).collect();
        let quantities: Vec<i32> = items.iter().map(|i| i.quantity).collect();

        let rows_affected = query(CREATE_ORDER_ITEMS_SQL)
            .bind(order.into_uuid())
            .bind(&uuids)
            .bind(&products)
            .bind(&quantities)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Loads the items of every order in `orders` in one query.
    pub(crate) async fn attach_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &mut [OrderRecord],
    ) -> Result<(), sqlx::Error> {
        if orders.is_empty() {
            return Ok(());
        }

        let order_uuids: Vec<Uuid> = orders.iter().map(|o| o.uuid.into_uuid()).collect();

        let items: Vec<OrderItemRecord> = query_as(LIST_ORDER_ITEMS_SQL)
            .bind(&order_uuids)
            .fetch_all(&mut **tx)
            .await?;

        let mut by_order: FxHashMap<OrderUuid, Vec<OrderItemRecord>> = FxHashMap::default();

        for item in items {
            by_order.entry(item.order_uuid).or_default().push(item);
        }

        for order in orders.iter_mut() {
            if let Some(items) = by_order.remove(&order.uuid) {
                order.items = items;
            }
        }

        Ok(())
    }

    pub(crate) async fn with_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderRecord,
    ) -> Result<OrderRecord, sqlx::Error> {
        let mut orders = [order];

        self.attach_items(tx, &mut orders).await?;

        let [order] = orders;

        Ok(order)
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let unit_price_i64: i64 = row.try_get("unit_price")?;
        let quantity_i32: i32 = row.try_get("quantity")?;

        Ok(Self {
            uuid: OrderItemUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            product_name: row.try_get("product_name")?,
            unit_price: u64::try_from(unit_price_i64).map_err(|e| sqlx::Error::ColumnDecode {
                index: "unit_price".to_string(),
                source: Box::new(e),
            })?,
            quantity: u32::try_from(quantity_i32).map_err(|e| sqlx::Error::ColumnDecode {
                index: "quantity".to_string(),
                source: Box::new(e),
            })?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
