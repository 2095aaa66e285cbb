use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::Value;
use tracing::info;

use super::deleted;
use crate::database::models::Property;
use crate::error::ApiError;
use crate::handlers::extract::{parse_id, validate, JsonBody};
use crate::middleware::AuthAdmin;
use crate::schema::{InsertProperty, PropertyPatch};
use crate::state::AppState;

const NOT_FOUND: &str = "Property not found";

/// POST /api/properties
pub async fn create(
    State(state): State<AppState>,
    Extension(admin): Extension<AuthAdmin>,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<Property>), ApiError> {
    let input = validate(&body, "Invalid property data", InsertProperty::parse)?;

    let property = state
        .repo::<Property>()
        .create(input.columns())
        .await
        .map_err(|e| ApiError::storage("Failed to create property", e))?;

    info!("Admin {} created property {}", admin.user_id, property.id);
    Ok((StatusCode::CREATED, Json(property)))
}

/// PUT /api/properties/:id - partial update; absent fields are left alone
pub async fn update(
    State(state): State<AppState>,
    Extension(admin): Extension<AuthAdmin>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<Json<Property>, ApiError> {
    let id = parse_id(&id, NOT_FOUND)?;
    let patch = validate(&body, "Invalid property data", PropertyPatch::parse)?;

    let property = state
        .repo::<Property>()
        .update(id, patch.columns())
        .await
        .map_err(|e| ApiError::storage("Failed to update property", e))?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;

    info!("Admin {} updated property {}", admin.user_id, id);
    Ok(Json(property))
}

/// DELETE /api/properties/:id
pub async fn delete(
    State(state): State<AppState>,
    Extension(admin): Extension<AuthAdmin>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id, NOT_FOUND)?;
    let removed = state
        .repo::<Property>()
        .delete(id)
        .await
        .map_err(|e| ApiError::storage("Failed to delete property", e))?;

    if !removed {
        return Err(ApiError::not_found(NOT_FOUND));
    }
    info!("Admin {} deleted property {}", admin.user_id, id);
    Ok(Json(deleted()))
}
