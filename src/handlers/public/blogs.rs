use axum::{
    extract::{Path, State},
    Json,
};

use crate::database::models::BlogPost;
use crate::error::ApiError;
use crate::handlers::extract::{ensure_reachable, parse_id};
use crate::state::AppState;

/// GET /api/blogs
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<BlogPost>>, ApiError> {
    ensure_reachable(state.storage.as_ref()).await?;
    let posts = state
        .repo::<BlogPost>()
        .select_all()
        .await
        .map_err(|e| ApiError::storage("Failed to fetch blog posts", e))?;
    Ok(Json(posts))
}

/// GET /api/blogs/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BlogPost>, ApiError> {
    let id = parse_id(&id, "Blog post not found")?;
    state
        .repo::<BlogPost>()
        .select_one(id)
        .await
        .map_err(|e| ApiError::storage("Failed to fetch blog post", e))?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Blog post not found"))
}
