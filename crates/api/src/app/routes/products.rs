use std::sync::Arc;

use axum::{extract::Path, http::StatusCode, response::Response, Extension};
use serde_json::json;

use tonecart_catalog::ToneTag;
use tonecart_core::{ProductId, UserId};

use crate::app::{dto, errors, services::AppServices};
use crate::context::RequestContext;

/// `GET /products` — full catalog, in catalog order.
pub async fn list_products(Extension(services): Extension<Arc<AppServices>>) -> Response {
    let products: Vec<_> = services
        .list_products()
        .iter()
        .map(dto::product_to_json)
        .collect();
    errors::json_ok(StatusCode::OK, "products", json!({ "products": products }))
}

/// `GET /products/:id`
pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Response {
    let id: ProductId = match id.parse() {
        Ok(id) => id,
        Err(err) => return errors::domain_error_to_response(err),
    };

    match services.get_product(&id) {
        Ok(product) => errors::json_ok(
            StatusCode::OK,
            "product",
            json!({ "product": dto::product_to_json(&product) }),
        ),
        Err(err) => errors::domain_error_to_response(err),
    }
}

/// `GET /products/recommended/:tone` — products suggesting a tone label.
/// An unknown tone matches nothing, so the result is simply empty.
pub async fn recommended_by_tone(
    Extension(services): Extension<Arc<AppServices>>,
    Path(tone): Path<String>,
) -> Response {
    let products: Vec<_> = services
        .recommended_by_tone(&ToneTag::from(tone))
        .iter()
        .map(dto::product_to_json)
        .collect();
    errors::json_ok(StatusCode::OK, "products", json!({ "products": products }))
}

/// `GET /products/recommended-by-user/:user_id` — recommendations keyed on
/// the user's questionnaire tone. Self or admin only.
pub async fn recommended_for_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
    Path(user_id): Path<String>,
) -> Response {
    let user_id: UserId = match user_id.parse() {
        Ok(id) => id,
        Err(err) => return errors::domain_error_to_response(err),
    };
    if !ctx.may_act_for(user_id) {
        return errors::forbidden();
    }

    match services.recommended_for_user(&user_id) {
        Ok(products) => {
            let products: Vec<_> = products.iter().map(dto::product_to_json).collect();
            errors::json_ok(StatusCode::OK, "products", json!({ "products": products }))
        }
        Err(err) => errors::domain_error_to_response(err),
    }
}
