use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde_json::Value;
use tracing::error;

use crate::database::Storage;
use crate::error::ApiError;
use crate::schema::ValidationError;

/// Raw JSON body whose parse failures use the API error shape.
pub struct JsonBody(pub Value);

#[async_trait]
impl<S: Send + Sync> FromRequest<S> for JsonBody {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<Value>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError::invalid_json(rejection.body_text())),
        }
    }
}

/// Path ids that are not integers cannot name a row.
pub fn parse_id(raw: &str, not_found: &str) -> Result<i32, ApiError> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::not_found(not_found))
}

/// Connectivity check ahead of collection reads. Any failed ping is a 503.
pub async fn ensure_reachable(storage: &dyn Storage) -> Result<(), ApiError> {
    storage.ping().await.map_err(|err| {
        error!("Database connectivity check failed: {}", err);
        ApiError::service_unavailable("Database connection failed")
    })
}

/// Run a schema parser, mapping failures to a 400 under `message`.
pub fn validate<T>(
    body: &Value,
    message: &str,
    parse: impl FnOnce(&Value) -> Result<T, ValidationError>,
) -> Result<T, ApiError> {
    if !body.is_object() {
        return Err(ApiError::bad_request("Invalid request body"));
    }
    parse(body).map_err(|err| ApiError::validation(message, err))
}
