use std::sync::Arc;

use axum::{extract::Path, http::StatusCode, response::Response, Extension, Json};
use serde_json::json;

use tonecart_core::ProductId;

use crate::app::{dto, errors, services::AppServices};
use crate::context::RequestContext;

/// `POST /reviews` — one review per (user, product) pair.
pub async fn submit_review(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
    Json(body): Json<dto::SubmitReviewRequest>,
) -> Response {
    let product_id: ProductId = match body.product_id.parse() {
        Ok(id) => id,
        Err(err) => return errors::domain_error_to_response(err),
    };

    match services.submit_review(ctx.user_id(), product_id, body.rating, body.body) {
        Ok(review) => errors::json_ok(
            StatusCode::CREATED,
            "review submitted",
            json!({ "review": dto::review_to_json(&review) }),
        ),
        Err(err) => errors::domain_error_to_response(err),
    }
}

/// `GET /reviews/:product_id` — summary plus the individual reviews.
pub async fn product_reviews(
    Extension(services): Extension<Arc<AppServices>>,
    Path(product_id): Path<String>,
) -> Response {
    let product_id: ProductId = match product_id.parse() {
        Ok(id) => id,
        Err(err) => return errors::domain_error_to_response(err),
    };

    match services.reviews_for_product(&product_id) {
        Ok((summary, reviews)) => {
            let reviews: Vec<_> = reviews.iter().map(dto::review_to_json).collect();
            errors::json_ok(
                StatusCode::OK,
                "reviews",
                json!({
                    "count": summary.count,
                    "average_rating": summary.average_rating,
                    "reviews": reviews,
                }),
            )
        }
        Err(err) => errors::domain_error_to_response(err),
    }
}
