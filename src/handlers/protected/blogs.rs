use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use super::deleted;
use crate::database::models::BlogPost;
use crate::error::ApiError;
use crate::handlers::extract::{parse_id, validate, JsonBody};
use crate::schema::{BlogPostPatch, InsertBlogPost};
use crate::state::AppState;

const NOT_FOUND: &str = "Blog post not found";

/// POST /api/blogs
pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<BlogPost>), ApiError> {
    let input = validate(&body, "Invalid blog data", InsertBlogPost::parse)?;
    let post = state
        .repo::<BlogPost>()
        .create(input.columns())
        .await
        .map_err(|e| ApiError::storage("Failed to create blog post", e))?;

    tracing::info!("Created blog post {}", post.id);
    Ok((StatusCode::CREATED, Json(post)))
}

/// PUT /api/blogs/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<Json<BlogPost>, ApiError> {
    let id = parse_id(&id, NOT_FOUND)?;
    let patch = validate(&body, "Invalid blog data", BlogPostPatch::parse)?;

    state
        .repo::<BlogPost>()
        .update(id, patch.columns())
        .await
        .map_err(|e| ApiError::storage("Failed to update blog post", e))?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))
}

/// DELETE /api/blogs/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id, NOT_FOUND)?;
    let removed = state
        .repo::<BlogPost>()
        .delete(id)
        .await
        .map_err(|e| ApiError::storage("Failed to delete blog post", e))?;

    if removed {
        Ok(Json(deleted()))
    } else {
        Err(ApiError::not_found(NOT_FOUND))
    }
}
