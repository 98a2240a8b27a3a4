//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use shopfront_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        carts::{
            MockCartsService,
            records::{CartItemRecord, CartItemUuid, CartUuid},
        },
        categories::{
            MockCategoriesService,
            records::{CategoryRecord, CategoryUuid},
        },
        comments::MockCommentsService,
        orders::{
            MockOrdersService, OrderStatus,
            records::{OrderItemRecord, OrderItemUuid, OrderRecord, OrderUuid},
        },
        products::{
            MockProductsService,
            records::{ProductRecord, ProductUuid},
        },
        users::{MockUsersService, records::UserUuid},
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_user_uuid(TEST_USER_UUID);
    ctrl.call_next(req, depot, res).await;
}

/// One mock per service. Mocks without expectations fail on any call.
#[derive(Default)]
pub(crate) struct Mocks {
    pub(crate) users: MockUsersService,
    pub(crate) auth: MockAuthService,
    pub(crate) categories: MockCategoriesService,
    pub(crate) products: MockProductsService,
    pub(crate) comments: MockCommentsService,
    pub(crate) carts: MockCartsService,
    pub(crate) orders: MockOrdersService,
}

impl Mocks {
    fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            users: Arc::new(self.users),
            auth: Arc::new(self.auth),
            categories: Arc::new(self.categories),
            products: Arc::new(self.products),
            comments: Arc::new(self.comments),
            carts: Arc::new(self.carts),
            orders: Arc::new(self.orders),
        })
    }

    /// Serve `route` as [`TEST_USER_UUID`].
    pub(crate) fn service(self, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.into_state()))
                .hoop(inject_user)
                .push(route),
        )
    }

    /// Serve `route` without an authenticated user.
    pub(crate) fn unauthenticated_service(self, route: Router) -> Service {
        Service::new(Router::new().hoop(inject(self.into_state())).push(route))
    }
}

pub(crate) fn make_category(slug: &str) -> CategoryRecord {
    CategoryRecord {
        uuid: CategoryUuid::new(),
        name: slug.to_uppercase(),
        slug: slug.to_owned(),
        created_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_product(uuid: ProductUuid) -> ProductRecord {
    ProductRecord {
        uuid,
        name: "Apple".to_owned(),
        slug: "apple".to_owned(),
        price: 10_00,
        description: None,
        image: None,
        is_active: true,
        categories: [make_category("fruit")].into_iter().collect(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_order(uuid: OrderUuid, status: OrderStatus) -> OrderRecord {
    let item = OrderItemRecord {
        uuid: OrderItemUuid::new(),
        order_uuid: uuid,
        product_uuid: ProductUuid::new(),
        product_name: "Apple".to_owned(),
        unit_price: 10_00,
        quantity: 2,
        created_at: Timestamp::UNIX_EPOCH,
    };

    OrderRecord {
        uuid,
        user_uuid: TEST_USER_UUID,
        name: "Alice".to_owned(),
        email: "alice@example.com".to_owned(),
        phone: "+375291234567".to_owned(),
        street: "Nezavisimosti Avenue".to_owned(),
        building: "4".to_owned(),
        apartment: None,
        floor: None,
        discount: None,
        status,
        items: vec![item],
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_cart_item(product: ProductUuid, unit_price: u64, quantity: u32) -> CartItemRecord {
    CartItemRecord {
        uuid: CartItemUuid::new(),
        cart_uuid: CartUuid::new(),
        product_uuid: product,
        product_name: "Apple".to_owned(),
        unit_price,
        quantity,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
