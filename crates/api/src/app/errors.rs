use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use tonecart_core::DomainError;

/// Success envelope: `{success: true, message, data}`.
pub fn json_ok(
    status: StatusCode,
    message: impl Into<String>,
    data: serde_json::Value,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "success": true,
            "message": message.into(),
            "data": data,
        })),
    )
        .into_response()
}

/// Error envelope: same shape, `success: false`, `data: null`.
pub fn json_error(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "success": false,
            "message": message.into(),
            "data": serde_json::Value::Null,
        })),
    )
        .into_response()
}

/// Single-point mapping from the domain error taxonomy to HTTP statuses.
pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    let status = match &err {
        DomainError::Validation(_) | DomainError::InvalidId(_) => StatusCode::BAD_REQUEST,
        DomainError::NotFound(_) => StatusCode::NOT_FOUND,
        DomainError::InvalidTransition(_) | DomainError::InvalidState(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        DomainError::DuplicateReview
        | DomainError::InsufficientStock { .. }
        | DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::Unauthorized => StatusCode::FORBIDDEN,
    };
    json_error(status, err.to_string())
}

pub fn forbidden() -> axum::response::Response {
    json_error(StatusCode::FORBIDDEN, "forbidden")
}
