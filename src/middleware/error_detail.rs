use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::ErrorDetail;
use crate::state::AppState;

/// In development, rewrite 500 bodies to include the underlying error under
/// `error`. Other environments pass responses through untouched.
pub async fn expose_error_detail(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    if !state.config.is_development() {
        return response;
    }

    let Some(detail) = response.extensions().get::<ErrorDetail>().cloned() else {
        return response;
    };

    (
        response.status(),
        Json(json!({
            "message": detail.message,
            "code": "INTERNAL_SERVER_ERROR",
            "error": detail.detail,
        })),
    )
        .into_response()
}
