//! HTTP API request handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::store::WellStore;

use super::geometry::{parse_polygon, point_in_polygon};
use super::types::{ErrorResponse, HealthResponse, PolygonQuery, PolygonResponse};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<WellStore>,
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Point lookup by API number
pub async fn get_well(State(state): State<AppState>, Path(api): Path<String>) -> Response {
    debug!(api, "well lookup");

    match state.store.get(&api) {
        Ok(Some(record)) => (StatusCode::OK, Json(record)).into_response(),
        Ok(None) => {
            warn!(api, "well not found");
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new(
                    "not_found",
                    format!("well {} not found", api),
                )),
            )
                .into_response()
        }
        Err(e) => {
            error!(api, "well lookup failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal_error(e.to_string())),
            )
                .into_response()
        }
    }
}

/// API numbers whose stored coordinates fall inside the given polygon
pub async fn wells_in_polygon(
    State(state): State<AppState>,
    Query(query): Query<PolygonQuery>,
) -> Response {
    debug!(coords = %query.coords, "polygon query");

    let polygon = match parse_polygon(&query.coords) {
        Ok(polygon) => polygon,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("bad_request", e.to_string())),
            )
                .into_response();
        }
    };

    match state.store.coordinates() {
        Ok(rows) => {
            // Wells without a stored coordinate pair can never match.
            let apis: Vec<String> = rows
                .into_iter()
                .filter_map(|(api, lat, lon)| match (lat, lon) {
                    (Some(lat), Some(lon)) if point_in_polygon((lat, lon), &polygon) => Some(api),
                    _ => None,
                })
                .collect();

            debug!(count = apis.len(), "polygon query matched");
            Json(PolygonResponse { apis }).into_response()
        }
        Err(e) => {
            error!("polygon query failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal_error(e.to_string())),
            )
                .into_response()
        }
    }
}
