// handlers/public/auth.rs - POST /api/auth/login

use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::auth::{verify_credentials, AuthError};
use crate::error::ApiError;
use crate::handlers::extract::JsonBody;
use crate::state::AppState;

fn required<'a>(body: &'a Value, key: &str) -> Option<&'a str> {
    body.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// POST /api/auth/login - exchange admin credentials for a bearer token
///
/// Returns `{ token, user: { id, username } }`. Unknown users and wrong
/// passwords get the same 401.
pub async fn login(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<Json<Value>, ApiError> {
    let (Some(username), Some(password)) = (required(&body, "username"), required(&body, "password"))
    else {
        return Err(ApiError::bad_request("Username and password required"));
    };

    let user = match verify_credentials(state.storage.clone(), username, password).await {
        Ok(user) => user,
        Err(err @ (AuthError::NotFound | AuthError::InvalidCredentials)) => {
            warn!("Failed login for {}: {}", username, err);
            return Err(err.into());
        }
        Err(err) => return Err(err.into()),
    };

    let token = state.tokens.issue_token(user.id)?;
    info!("Admin {} logged in", user.username);

    Ok(Json(json!({
        "token": token,
        "user": {
            "id": user.id,
            "username": user.username,
        }
    })))
}
