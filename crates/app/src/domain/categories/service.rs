//! Categories service.

use async_trait::async_trait;
use mockall::automock;
use validator::Validate;

use crate::{
    database::Db,
    domain::categories::{
        data::NewCategory, errors::CategoriesServiceError, records::CategoryRecord,
        repository::PgCategoriesRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCategoriesService {
    db: Db,
    repository: PgCategoriesRepository,
}

impl PgCategoriesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCategoriesRepository::new(),
        }
    }
}

#[async_trait]
impl CategoriesService for PgCategoriesService {
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let categories = self.repository.list_categories(&mut tx).await?;

        tx.commit().await?;

        Ok(categories)
    }

    async fn get_category(&self, slug: &str) -> Result<CategoryRecord, CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let category = self.repository.get_category_by_slug(&mut tx, slug).await?;

        tx.commit().await?;

        Ok(category)
    }

    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        category.validate()?;

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_category(&mut tx, category).await?;

        tx.commit().await?;

        tracing::info!(category_uuid = %created.uuid, slug = %created.slug, "created category");

        Ok(created)
    }
}

#[automock]
#[async_trait]
pub trait CategoriesService: Send + Sync {
    /// Retrieves all categories ordered by name.
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, CategoriesServiceError>;

    /// Retrieve a single category by slug.
    async fn get_category(&self, slug: &str) -> Result<CategoryRecord, CategoriesServiceError>;

    /// Creates a new category.
    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, CategoriesServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{domain::categories::records::CategoryUuid, test::TestContext};

    use super::*;

    #[tokio::test]
    async fn create_category_returns_record() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = CategoryUuid::new();

        let category = ctx
            .categories
            .create_category(NewCategory {
                uuid,
                name: "Fruit".to_string(),
                slug: "fruit".to_string(),
            })
            .await?;

        assert_eq!(category.uuid, uuid);
        assert_eq!(category.name, "Fruit");
        assert_eq!(category.slug, "fruit");

        Ok(())
    }

    #[tokio::test]
    async fn get_category_by_slug_returns_created_category() -> TestResult {
        let ctx = TestContext::new().await;
        let created = ctx.create_category("Tea", "tea").await;

        let category = ctx.categories.get_category("tea").await?;

        assert_eq!(category, created);

        Ok(())
    }

    #[tokio::test]
    async fn get_category_unknown_slug_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.categories.get_category("missing").await;

        assert!(
            matches!(result, Err(CategoriesServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn duplicate_slug_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.create_category("Tea", "tea").await;

        let result = ctx
            .categories
            .create_category(NewCategory {
                uuid: CategoryUuid::new(),
                name: "More Tea".to_string(),
                slug: "tea".to_string(),
            })
            .await;

        assert!(
            matches!(result, Err(CategoriesServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn invalid_slug_is_rejected_before_storage() {
        let ctx = TestContext::new().await;

        let result = ctx
            .categories
            .create_category(NewCategory {
                uuid: CategoryUuid::new(),
                name: "Tea".to_string(),
                slug: "green tea".to_string(),
            })
            .await;

        assert!(
            matches!(result, Err(CategoriesServiceError::Validation(_))),
            "expected Validation, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_categories_is_sorted_by_name() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.create_category("Vegetables", "veg").await;
        ctx.create_category("Bakery", "bakery").await;

        let names: Vec<String> = ctx
            .categories
            .list_categories()
            .await?
            .into_iter()
            .map(|c| c.name)
            .collect();

        assert_eq!(names, ["Bakery", "Vegetables"]);

        Ok(())
    }
}
