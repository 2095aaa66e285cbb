use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::database::models::Property;
use crate::database::PropertyFilter;
use crate::error::ApiError;
use crate::handlers::extract::{ensure_reachable, parse_id};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PropertyQuery {
    #[serde(rename = "type")]
    pub property_type: Option<String>,
    pub featured: Option<String>,
}

/// GET /api/properties?type=&featured=
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<PropertyQuery>,
) -> Result<Json<Vec<Property>>, ApiError> {
    ensure_reachable(state.storage.as_ref()).await?;

    let filter = PropertyFilter::from_query(
        query.property_type.as_deref().filter(|t| !t.is_empty()),
        query.featured.as_deref(),
    );
    let properties = state
        .repo::<Property>()
        .select_filtered(&filter)
        .await
        .map_err(|e| ApiError::storage("Failed to fetch properties", e))?;

    tracing::debug!("Fetched {} properties ({:?})", properties.len(), filter);
    Ok(Json(properties))
}

/// GET /api/properties/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Property>, ApiError> {
    let id = parse_id(&id, "Property not found")?;
    state
        .repo::<Property>()
        .select_one(id)
        .await
        .map_err(|e| ApiError::storage("Failed to fetch property", e))?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Property not found"))
}
