//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rustc_hash::FxHashMap;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use tracing::debug;
use uuid::Uuid;

use crate::domain::{
    categories::records::{CategoryRecord, CategoryUuid},
    products::{
        data::ProductOrder,
        records::{ProductCategories, ProductRecord, ProductUuid},
    },
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const GET_PRODUCT_BY_SLUG_SQL: &str = include_str!("sql/get_product_by_slug.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const LINK_PRODUCT_CATEGORIES_SQL: &str = include_str!("sql/link_product_categories.sql");
const LIST_PRODUCT_CATEGORIES_SQL: &str = include_str!("sql/list_product_categories.sql");

/// Product row as stored, before categories are attached.
pub(crate) struct ProductInsert<'a> {
    pub uuid: ProductUuid,
    pub name: &'a str,
    pub slug: &'a str,
    pub price: i64,
    pub description: Option<&'a str>,
    pub image: Option<&'a str>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    #[tracing::instrument(
        name = "products.repository.list_products",
        skip(self, tx),
        fields(product_count = tracing::field::Empty),
        err
    )]
    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: Option<CategoryUuid>,
        active: Option<bool>,
        order: ProductOrder,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        let mut products = query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_SQL)
            .bind(category.map(CategoryUuid::into_uuid))
            .bind(active)
            .bind(order == ProductOrder::Oldest)
            .fetch_all(&mut **tx)
            .await?;

        tracing::Span::current().record("product_count", products.len());

        self.attach_categories(tx, &mut products).await?;

        Ok(products)
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        let product = query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        self.with_categories(tx, product).await
    }

    pub(crate) async fn get_product_by_slug(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        slug: &str,
    ) -> Result<ProductRecord, sqlx::Error> {
        let product = query_as::<Postgres, ProductRecord>(GET_PRODUCT_BY_SLUG_SQL)
            .bind(slug)
            .fetch_one(&mut **tx)
            .await?;

        self.with_categories(tx, product).await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductInsert<'_>,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(product.name)
            .bind(product.slug)
            .bind(product.price)
            .bind(product.description)
            .bind(product.image)
            .bind(product.is_active)
            .fetch_one(&mut **tx)
            .await
    }

    #[tracing::instrument(
        name = "products.repository.link_categories",
        skip(self, tx, categories),
        fields(category_count = categories.len()),
        err
    )]
    pub(crate) async fn link_categories(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        categories: &[CategoryUuid],
    ) -> Result<(), sqlx::Error> {
        let category_uuids: Vec<Uuid> = categories.iter().map(|c| c.into_uuid()).collect();

        query(LINK_PRODUCT_CATEGORIES_SQL)
            .bind(product.into_uuid())
            .bind(&category_uuids)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn with_categories(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductRecord,
    ) -> Result<ProductRecord, sqlx::Error> {
        let mut products = vec![product];

        self.attach_categories(tx, &mut products).await?;

        products.pop().ok_or(sqlx::Error::RowNotFound)
    }

    async fn attach_categories(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        products: &mut [ProductRecord],
    ) -> Result<(), sqlx::Error> {
        if products.is_empty() {
            return Ok(());
        }

        let product_uuids: Vec<Uuid> = products.iter().map(|p| p.uuid.into_uuid()).collect();

        let rows: Vec<ProductCategoryRow> = query_as(LIST_PRODUCT_CATEGORIES_SQL)
            .bind(&product_uuids)
            .fetch_all(&mut **tx)
            .await?;

        let mut by_product: FxHashMap<Uuid, ProductCategories> = FxHashMap::default();

        for row in rows {
            by_product
                .entry(row.product_uuid)
                .or_default()
                .push(row.category);
        }

        debug!(
            product_count = products.len(),
            linked = by_product.len(),
            "attached product categories"
        );

        for product in products.iter_mut() {
            if let Some(categories) = by_product.remove(&product.uuid.into_uuid()) {
                product.categories = categories;
            }
        }

        Ok(())
    }
}

struct ProductCategoryRow {
    product_uuid: Uuid,
    category: CategoryRecord,
}

impl<'r> FromRow<'r, PgRow> for ProductCategoryRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            product_uuid: row.try_get("product_uuid")?,
            category: CategoryRecord::from_row(row)?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let price_i64: i64 = row.try_get("price")?;

        let price = u64::try_from(price_i64).map_err(|e| sqlx::Error::ColumnDecode {
            index: "price".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            slug: row.try_get("slug")?,
            price,
            description: row.try_get("description")?,
            image: row.try_get("image")?,
            is_active: row.try_get("is_active")?,
            categories: ProductCategories::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
