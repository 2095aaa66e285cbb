pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod schema;
pub mod state;

use axum::{
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::error::ApiError;
use crate::handlers::{protected, public};
pub use crate::state::AppState;

/// Full API router, everything under `/api`.
pub fn app(state: AppState) -> Router {
    let api = public_routes().merge(protected_routes(state.clone()));

    Router::new()
        .nest("/api", api)
        .fallback(not_found)
        .layer(from_fn_with_state(state.clone(), middleware::expose_error_detail))
        .layer(cors_layer(&state.config.security.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(public::health::get))
        .route("/auth/login", post(public::auth::login))
        .route("/properties", get(public::properties::list))
        .route("/properties/:id", get(public::properties::get))
        .route("/blogs", get(public::blogs::list))
        .route("/blogs/:id", get(public::blogs::get))
        .route("/messages", post(public::messages::create))
        .route("/testimonials", get(public::testimonials::list))
        .route("/testimonials/:id", get(public::testimonials::get))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/properties", post(protected::properties::create))
        .route(
            "/properties/:id",
            put(protected::properties::update).delete(protected::properties::delete),
        )
        .route("/blogs", post(protected::blogs::create))
        .route(
            "/blogs/:id",
            put(protected::blogs::update).delete(protected::blogs::delete),
        )
        .route("/messages", get(protected::messages::list))
        .route(
            "/messages/:id",
            get(protected::messages::get).delete(protected::messages::delete),
        )
        .route("/messages/:id/read", put(protected::messages::mark_read))
        .route("/testimonials", post(protected::testimonials::create))
        .route("/testimonials/:id", put(protected::testimonials::update))
        .route_layer(from_fn_with_state(state, middleware::jwt_auth_middleware))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if origins.iter().any(|o| o == "*") {
        return layer.allow_origin(AllowOrigin::any());
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();
    layer.allow_origin(allowed)
}

async fn not_found() -> ApiError {
    ApiError::not_found("Not found")
}
