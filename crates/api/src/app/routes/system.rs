use axum::{http::StatusCode, response::Response, Extension};
use serde_json::json;

use crate::app::errors;
use crate::context::RequestContext;

/// `GET /health` — liveness probe, no auth.
pub async fn health() -> Response {
    errors::json_ok(StatusCode::OK, "ok", json!({ "status": "up" }))
}

/// `GET /whoami` — echo the authenticated identity; mainly a smoke test for
/// token plumbing.
pub async fn whoami(Extension(ctx): Extension<RequestContext>) -> Response {
    errors::json_ok(
        StatusCode::OK,
        "whoami",
        json!({
            "user_id": ctx.user_id().to_string(),
            "roles": ctx.roles().iter().map(|r| r.as_str()).collect::<Vec<_>>(),
        }),
    )
}
