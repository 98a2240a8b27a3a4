//! App Router

use salvo::Router;

use crate::{auth, carts, categories, comments, orders, products};

/// Routes behind bearer authentication.
pub(crate) fn app_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(
            Router::with_path("categories")
                .get(categories::index::handler)
                .post(categories::create::handler),
        )
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .post(products::create::handler)
                .push(
                    Router::with_path("{product}")
                        .get(products::get::handler)
                        .push(Router::with_path("comments").post(comments::create::handler)),
                ),
        )
        .push(
            Router::with_path("cart")
                .get(carts::get::handler)
                .push(Router::with_path("checkout").post(carts::checkout::handler))
                .push(
                    Router::with_path("items/{product}")
                        .post(carts::items::create::handler)
                        .delete(carts::items::delete::handler)
                        .push(Router::with_path("increment").post(carts::items::increment::handler))
                        .push(Router::with_path("decrement").post(carts::items::decrement::handler)),
                ),
        )
        .push(
            Router::with_path("orders")
                .get(orders::index::handler)
                .push(
                    Router::with_path("{order}")
                        .get(orders::get::handler)
                        .push(Router::with_path("pay").post(orders::pay::handler))
                        .push(Router::with_path("cancel").post(orders::cancel::handler))
                        .push(Router::with_path("reset").post(orders::reset::handler)),
                ),
        )
}
