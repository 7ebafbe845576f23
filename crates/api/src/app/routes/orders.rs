use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::Response,
    Extension, Json,
};
use serde_json::json;

use tonecart_core::{OrderId, UserId};
use tonecart_orders::{OrderLineRequest, OrderStatus, PaymentMethod};

use crate::app::{dto, errors, services::AppServices};
use crate::context::RequestContext;

/// `POST /orders` — create an order for the authenticated user.
pub async fn create_order(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
    Json(body): Json<dto::CreateOrderRequest>,
) -> Response {
    let payment_method: PaymentMethod = match body.payment_method.parse() {
        Ok(method) => method,
        Err(err) => return errors::domain_error_to_response(err),
    };

    let mut lines = Vec::with_capacity(body.lines.len());
    for line in body.lines {
        let product_id = match line.product_id.parse() {
            Ok(id) => id,
            Err(err) => return errors::domain_error_to_response(err),
        };
        lines.push(OrderLineRequest {
            product_id,
            quantity: line.quantity,
        });
    }

    match services.create_order(
        ctx.user_id(),
        lines,
        body.shipping_address.into(),
        body.shipping_fee,
        payment_method,
    ) {
        Ok(order) => errors::json_ok(
            StatusCode::CREATED,
            "order created",
            json!({ "order": dto::order_to_json(&order) }),
        ),
        Err(err) => errors::domain_error_to_response(err),
    }
}

/// `GET /orders/:id` — owner or admin.
pub async fn get_order(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<String>,
) -> Response {
    let id: OrderId = match id.parse() {
        Ok(id) => id,
        Err(err) => return errors::domain_error_to_response(err),
    };

    match services.get_order(&id) {
        Ok(order) => {
            if !ctx.may_act_for(order.user_id()) {
                return errors::forbidden();
            }
            errors::json_ok(
                StatusCode::OK,
                "order",
                json!({ "order": dto::order_to_json(&order) }),
            )
        }
        Err(err) => errors::domain_error_to_response(err),
    }
}

/// `GET /orders[?user=<id>]` — a user's own orders, or everything for admins.
pub async fn list_orders(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
    Query(query): Query<dto::ListOrdersQuery>,
) -> Response {
    let orders = match query.user {
        Some(user) => {
            let user_id: UserId = match user.parse() {
                Ok(id) => id,
                Err(err) => return errors::domain_error_to_response(err),
            };
            if !ctx.may_act_for(user_id) {
                return errors::forbidden();
            }
            services.list_orders_for_user(&user_id)
        }
        None => {
            if !ctx.is_admin() {
                return errors::forbidden();
            }
            services.list_orders()
        }
    };

    let orders: Vec<_> = orders.iter().map(dto::order_to_json).collect();
    errors::json_ok(StatusCode::OK, "orders", json!({ "orders": orders }))
}

/// `PUT /orders/:id/status` — admin-only status transition.
pub async fn update_status(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateStatusRequest>,
) -> Response {
    if !ctx.is_admin() {
        return errors::forbidden();
    }
    let id: OrderId = match id.parse() {
        Ok(id) => id,
        Err(err) => return errors::domain_error_to_response(err),
    };
    let target: OrderStatus = match body.status.parse() {
        Ok(status) => status,
        Err(err) => return errors::domain_error_to_response(err),
    };

    match services.transition_order(&id, target) {
        Ok(order) => errors::json_ok(
            StatusCode::OK,
            "order status updated",
            json!({ "order": dto::order_to_json(&order) }),
        ),
        Err(err) => errors::domain_error_to_response(err),
    }
}

/// `PUT /orders/:id/tracking` — admin-only; order must be `shipped`.
pub async fn set_tracking(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::SetTrackingRequest>,
) -> Response {
    if !ctx.is_admin() {
        return errors::forbidden();
    }
    let id: OrderId = match id.parse() {
        Ok(id) => id,
        Err(err) => return errors::domain_error_to_response(err),
    };

    match services.set_tracking(&id, body.into()) {
        Ok(order) => errors::json_ok(
            StatusCode::OK,
            "tracking updated",
            json!({ "order": dto::order_to_json(&order) }),
        ),
        Err(err) => errors::domain_error_to_response(err),
    }
}
