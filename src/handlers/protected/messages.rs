use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use super::deleted;
use crate::database::models::Message;
use crate::database::query_builder::SqlValue;
use crate::error::ApiError;
use crate::handlers::extract::{ensure_reachable, parse_id, JsonBody};
use crate::schema::ReadStatus;
use crate::state::AppState;

const NOT_FOUND: &str = "Message not found";

/// GET /api/messages - inbox, oldest first
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Message>>, ApiError> {
    ensure_reachable(state.storage.as_ref()).await?;
    let messages = state
        .repo::<Message>()
        .select_all()
        .await
        .map_err(|e| ApiError::storage("Failed to fetch messages", e))?;
    Ok(Json(messages))
}

/// GET /api/messages/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Message>, ApiError> {
    let id = parse_id(&id, NOT_FOUND)?;
    state
        .repo::<Message>()
        .select_one(id)
        .await
        .map_err(|e| ApiError::storage("Failed to fetch message", e))?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))
}

/// PUT /api/messages/:id/read - body `{ "isRead": bool }`
pub async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<Json<Message>, ApiError> {
    let status = ReadStatus::parse(&body)
        .map_err(|_| ApiError::bad_request("isRead field must be a boolean"))?;
    let id = parse_id(&id, NOT_FOUND)?;

    state
        .repo::<Message>()
        .update(id, vec![("is_read", SqlValue::Bool(status.is_read))])
        .await
        .map_err(|e| ApiError::storage("Failed to update message read status", e))?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))
}

/// DELETE /api/messages/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id, NOT_FOUND)?;
    let removed = state
        .repo::<Message>()
        .delete(id)
        .await
        .map_err(|e| ApiError::storage("Failed to delete message", e))?;

    if removed {
        Ok(Json(deleted()))
    } else {
        Err(ApiError::not_found(NOT_FOUND))
    }
}
