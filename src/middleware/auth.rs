use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated admin, inserted into request extensions by the gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthAdmin {
    pub user_id: i32,
}

/// Bearer-token gate for admin routes. Rejections never reach the handler.
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(token) = extract_bearer(request.headers()) else {
        tracing::warn!(
            "Rejected {} {}: no bearer token",
            request.method(),
            request.uri().path()
        );
        return Err(ApiError::unauthorized("Unauthorized: No token provided"));
    };

    let Some(user_id) = state.tokens.verify_token(token) else {
        tracing::warn!(
            "Rejected {} {}: invalid token",
            request.method(),
            request.uri().path()
        );
        return Err(ApiError::unauthorized("Unauthorized: Invalid token"));
    };

    request.extensions_mut().insert(AuthAdmin { user_id });
    Ok(next.run(request).await)
}

/// Token from `Authorization: Bearer <token>`. Anything else counts as absent.
fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}
