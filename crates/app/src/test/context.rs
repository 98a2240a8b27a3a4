//! Test context for service-level integration tests.

use crate::{
    auth::PgAuthService,
    database::Db,
    domain::{
        carts::PgCartsService,
        categories::{
            CategoriesService, PgCategoriesService,
            data::NewCategory,
            records::{CategoryRecord, CategoryUuid},
        },
        comments::PgCommentsService,
        orders::PgOrdersService,
        products::{
            PgProductsService, ProductsService,
            data::NewProduct,
            records::{ProductRecord, ProductUuid},
        },
        users::{
            PgUsersService, UsersService,
            data::NewUser,
            records::UserUuid,
        },
    },
};

use super::db::TestDb;

pub struct TestContext {
    pub db: TestDb,
    pub users: PgUsersService,
    pub auth: PgAuthService,
    pub categories: PgCategoriesService,
    pub products: PgProductsService,
    pub comments: PgCommentsService,
    pub carts: PgCartsService,
    pub orders: PgOrdersService,
}

impl TestContext {
    pub async fn new() -> Self {
        let test_db = TestDb::new().await;
        let pool = test_db.pool().clone();
        let db = Db::new(pool.clone());

        Self {
            users: PgUsersService::new(pool.clone()),
            auth: PgAuthService::new(pool),
            categories: PgCategoriesService::new(db.clone()),
            products: PgProductsService::new(db.clone()),
            comments: PgCommentsService::new(db.clone()),
            carts: PgCartsService::new(db.clone()),
            orders: PgOrdersService::new(db),
            db: test_db,
        }
    }

    /// Create a user with a throwaway email address.
    pub async fn create_user(&self, username: &str) -> UserUuid {
        let uuid = UserUuid::new();

        self.users
            .create_user(NewUser {
                uuid,
                username: username.to_string(),
                email: format!("{username}@example.com"),
            })
            .await
            .expect("Failed to create test user");

        uuid
    }

    pub async fn create_category(&self, name: &str, slug: &str) -> CategoryRecord {
        self.categories
            .create_category(NewCategory {
                uuid: CategoryUuid::new(),
                name: name.to_string(),
                slug: slug.to_string(),
            })
            .await
            .expect("Failed to create test category")
    }

    /// Create an active product in `category` with a slug derived from `name`.
    pub async fn create_product(
        &self,
        name: &str,
        price: u64,
        category: &CategoryRecord,
    ) -> ProductRecord {
        self.products
            .create_product(NewProduct {
                uuid: ProductUuid::new(),
                name: name.to_string(),
                price,
                description: None,
                slug: None,
                image: None,
                is_active: true,
                categories: vec![category.uuid],
            })
            .await
            .expect("Failed to create test product")
    }
}
