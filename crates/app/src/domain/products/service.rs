//! Products service.

use async_trait::async_trait;
use mockall::automock;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
    database::Db,
    domain::{
        categories::repository::PgCategoriesRepository,
        products::{
            data::{NewProduct, ProductsQuery},
            errors::ProductsServiceError,
            records::{ProductRecord, ProductUuid},
            repository::{PgProductsRepository, ProductInsert},
        },
    },
    slugs::slugify,
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
    categories: PgCategoriesRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
            categories: PgCategoriesRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        query: ProductsQuery,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let category = match query.category.as_deref() {
            Some(slug) => Some(
                self.categories
                    .get_category_by_slug(&mut tx, slug)
                    .await?
                    .uuid,
            ),
            None => None,
        };

        let products = self
            .repository
            .list_products(&mut tx, category, query.active, query.order)
            .await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn get_product_by_slug(&self, slug: &str) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product_by_slug(&mut tx, slug).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(
        &self,
        mut product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        if product.slug.as_deref().is_some_and(|s| s.trim().is_empty()) {
            product.slug = None;
        }

        product.validate()?;

        let slug = match product.slug.take() {
            Some(slug) => slug,
            None => slugify(&product.name),
        };

        if slug.is_empty() {
            let mut errors = ValidationErrors::new();
            errors.add("slug", ValidationError::new("slug"));

            return Err(errors.into());
        }

        let price = i64::try_from(product.price)?;

        let mut tx = self.db.begin().await?;

        self.repository
            .create_product(
                &mut tx,
                ProductInsert {
                    uuid: product.uuid,
                    name: &product.name,
                    slug: &slug,
                    price,
                    description: product.description.as_deref(),
                    image: product.image.as_deref(),
                    is_active: product.is_active,
                },
            )
            .await?;

        self.repository
            .link_categories(&mut tx, product.uuid, &product.categories)
            .await?;

        let created = self.repository.get_product(&mut tx, product.uuid).await?;

        tx.commit().await?;

        tracing::info!(
            product_uuid = %created.uuid,
            slug = %created.slug,
            price = created.price,
            "created product"
        );

        Ok(created)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Lists products matching the given filters, newest first unless asked otherwise.
    async fn list_products(
        &self,
        query: ProductsQuery,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product with its categories.
    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError>;

    async fn get_product_by_slug(&self, slug: &str) -> Result<ProductRecord, ProductsServiceError>;

    /// Creates a product and links it to its categories.
    ///
    /// A missing or blank slug is derived from the product name.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::{categories::records::CategoryUuid, products::data::ProductOrder},
        test::TestContext,
    };

    use super::*;

    fn new_product(name: &str, price: u64, category: CategoryUuid) -> NewProduct {
        NewProduct {
            uuid: ProductUuid::new(),
            name: name.to_string(),
            price,
            description: None,
            slug: None,
            image: None,
            is_active: true,
            categories: vec![category],
        }
    }

    #[tokio::test]
    async fn create_product_derives_slug_from_name() -> TestResult {
        let ctx = TestContext::new().await;
        let fruit = ctx.create_category("Fruit", "fruit").await;

        let product = ctx
            .products
            .create_product(new_product("Green Apple", 1_000, fruit.uuid))
            .await?;

        assert_eq!(product.slug, "green-apple");
        assert_eq!(product.price, 1_000);
        assert_eq!(product.category_names(), ["Fruit"]);

        Ok(())
    }

    #[tokio::test]
    async fn create_product_keeps_explicit_slug() -> TestResult {
        let ctx = TestContext::new().await;
        let fruit = ctx.create_category("Fruit", "fruit").await;

        let product = ctx
            .products
            .create_product(NewProduct {
                slug: Some("apple-1".to_string()),
                ..new_product("Apple", 500, fruit.uuid)
            })
            .await?;

        assert_eq!(product.slug, "apple-1");

        Ok(())
    }

    #[tokio::test]
    async fn create_product_with_unsluggable_name_is_rejected() {
        let ctx = TestContext::new().await;
        let fruit = ctx.create_category("Fruit", "fruit").await;

        let result = ctx
            .products
            .create_product(new_product("Яблоко", 500, fruit.uuid))
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::Validation(_))),
            "expected Validation, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_product_without_categories_is_rejected() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .create_product(NewProduct {
                categories: Vec::new(),
                ..new_product("Apple", 500, CategoryUuid::new())
            })
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::Validation(_))),
            "expected Validation, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_product_unknown_category_returns_invalid_reference() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .create_product(new_product("Apple", 500, CategoryUuid::new()))
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );
    }

    #[tokio::test]
    async fn duplicate_slug_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;
        let fruit = ctx.create_category("Fruit", "fruit").await;

        ctx.products
            .create_product(new_product("Apple", 500, fruit.uuid))
            .await?;

        let result = ctx
            .products
            .create_product(new_product("Apple", 700, fruit.uuid))
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn get_product_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.products.get_product(ProductUuid::new()).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn get_product_by_slug_returns_created_product() -> TestResult {
        let ctx = TestContext::new().await;
        let fruit = ctx.create_category("Fruit", "fruit").await;
        let created = ctx.create_product("Pear", 300, &fruit).await;

        let product = ctx.products.get_product_by_slug("pear").await?;

        assert_eq!(product, created);

        Ok(())
    }

    #[tokio::test]
    async fn list_products_filters_by_category_slug() -> TestResult {
        let ctx = TestContext::new().await;
        let fruit = ctx.create_category("Fruit", "fruit").await;
        let bakery = ctx.create_category("Bakery", "bakery").await;

        let apple = ctx.create_product("Apple", 100, &fruit).await;
        ctx.create_product("Bread", 200, &bakery).await;

        let products = ctx
            .products
            .list_products(ProductsQuery {
                category: Some("fruit".to_string()),
                ..ProductsQuery::default()
            })
            .await?;

        assert_eq!(products, [apple]);

        Ok(())
    }

    #[tokio::test]
    async fn list_products_unknown_category_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .list_products(ProductsQuery {
                category: Some("missing".to_string()),
                ..ProductsQuery::default()
            })
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_products_orders_by_creation_time() -> TestResult {
        let ctx = TestContext::new().await;
        let fruit = ctx.create_category("Fruit", "fruit").await;

        let first = ctx.create_product("Apple", 100, &fruit).await;
        let second = ctx.create_product("Pear", 100, &fruit).await;

        let newest: Vec<ProductUuid> = ctx
            .products
            .list_products(ProductsQuery::default())
            .await?
            .into_iter()
            .map(|p| p.uuid)
            .collect();

        let oldest: Vec<ProductUuid> = ctx
            .products
            .list_products(ProductsQuery {
                order: ProductOrder::Oldest,
                ..ProductsQuery::default()
            })
            .await?
            .into_iter()
            .map(|p| p.uuid)
            .collect();

        assert_eq!(newest, [second.uuid, first.uuid]);
        assert_eq!(oldest, [first.uuid, second.uuid]);

        Ok(())
    }

    #[tokio::test]
    async fn list_products_filters_by_active_flag() -> TestResult {
        let ctx = TestContext::new().await;
        let fruit = ctx.create_category("Fruit", "fruit").await;

        let active = ctx.create_product("Apple", 100, &fruit).await;

        ctx.products
            .create_product(NewProduct {
                is_active: false,
                ..new_product("Quince", 100, fruit.uuid)
            })
            .await?;

        let products = ctx
            .products
            .list_products(ProductsQuery {
                active: Some(true),
                ..ProductsQuery::default()
            })
            .await?;

        assert_eq!(products, [active]);

        Ok(())
    }
}
