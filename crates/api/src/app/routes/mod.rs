use axum::{
    routing::{get, post, put},
    Router,
};

pub mod orders;
pub mod products;
pub mod reviews;
pub mod system;

/// Routes served without authentication: catalog reads, tone
/// recommendations, review reads.
pub fn public_router() -> Router {
    Router::new()
        .route("/products", get(products::list_products))
        .route("/products/:id", get(products::get_product))
        .route(
            "/products/recommended/:tone",
            get(products::recommended_by_tone),
        )
        .route("/reviews/:product_id", get(reviews::product_reviews))
}

/// Routes behind the bearer-token middleware.
pub fn protected_router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .route("/orders", post(orders::create_order).get(orders::list_orders))
        .route("/orders/:id", get(orders::get_order))
        .route("/orders/:id/status", put(orders::update_status))
        .route("/orders/:id/tracking", put(orders::set_tracking))
        .route(
            "/products/recommended-by-user/:user_id",
            get(products::recommended_for_user),
        )
        .route("/reviews", post(reviews::submit_review))
}
