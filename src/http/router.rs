use axum::{Router, http::HeaderValue, routing::get};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::http::{handlers, state::AppState};

/// Build the API router, only the dashboard origin is allowed to call it.
pub fn create_router(state: AppState, allowed_origin: HeaderValue) -> Router {
    let cors = CorsLayer::new().allow_origin(allowed_origin).allow_methods(Any).allow_headers(Any);
    Router::new()
        .route("/api/elecDemand", get(handlers::get_demand))
        .route("/api/elecProduction", get(handlers::get_production))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
