use axum::{
    extract::{Path, State},
    Json,
};

use crate::database::models::Testimonial;
use crate::error::ApiError;
use crate::handlers::extract::{ensure_reachable, parse_id};
use crate::state::AppState;

/// GET /api/testimonials
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Testimonial>>, ApiError> {
    ensure_reachable(state.storage.as_ref()).await?;
    let testimonials = state
        .repo::<Testimonial>()
        .select_all()
        .await
        .map_err(|e| ApiError::storage("Failed to fetch testimonials", e))?;
    Ok(Json(testimonials))
}

/// GET /api/testimonials/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Testimonial>, ApiError> {
    let id = parse_id(&id, "Testimonial not found")?;
    state
        .repo::<Testimonial>()
        .select_one(id)
        .await
        .map_err(|e| ApiError::storage("Failed to fetch testimonial", e))?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Testimonial not found"))
}
