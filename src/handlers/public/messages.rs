use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::database::models::Message;
use crate::error::ApiError;
use crate::handlers::extract::{validate, JsonBody};
use crate::schema::InsertMessage;
use crate::state::AppState;

/// POST /api/messages - contact form submission
pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let input = validate(&body, "Invalid message data", InsertMessage::parse)?;

    let message = state
        .repo::<Message>()
        .create(input.columns())
        .await
        .map_err(|e| ApiError::storage("Failed to create message", e))?;
    tracing::info!("Message {} received from {}", message.id, message.email);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Message created successfully",
            "data": message,
        })),
    ))
}
