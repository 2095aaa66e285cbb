use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::database::models::Testimonial;
use crate::error::ApiError;
use crate::handlers::extract::{parse_id, validate, JsonBody};
use crate::schema::{InsertTestimonial, TestimonialPatch};
use crate::state::AppState;

/// POST /api/testimonials
pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let input = validate(&body, "Invalid testimonial data", InsertTestimonial::parse)?;
    let testimonial = state
        .repo::<Testimonial>()
        .create(input.columns())
        .await
        .map_err(|e| ApiError::storage("Failed to create testimonial", e))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Testimonial created successfully",
            "data": testimonial,
        })),
    ))
}

/// PUT /api/testimonials/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<Json<Testimonial>, ApiError> {
    let id = parse_id(&id, "Testimonial not found")?;
    let patch = validate(&body, "Invalid testimonial data", TestimonialPatch::parse)?;

    state
        .repo::<Testimonial>()
        .update(id, patch.columns())
        .await
        .map_err(|e| ApiError::storage("Failed to update testimonial", e))?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Testimonial not found"))
}
