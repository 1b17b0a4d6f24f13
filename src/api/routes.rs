//! HTTP API route definitions

use axum::routing::get;
use axum::Router;

use super::handlers::{self, AppState};

/// Create the API router with all routes
pub fn create_router(app_state: AppState) -> Router {
    let api_v1 = Router::new()
        .route("/health", get(handlers::health))
        .route("/well/:api", get(handlers::get_well))
        .route("/polygon", get(handlers::wells_in_polygon))
        .with_state(app_state);

    Router::new().nest("/api/v1", api_v1)
}
