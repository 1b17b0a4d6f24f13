//! HTTP API request/response types

use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub healthy: bool,
    pub version: String,
}

/// Polygon query parameters
#[derive(Debug, Clone, Deserialize)]
pub struct PolygonQuery {
    /// Flat comma-separated list of lat/lon values.
    pub coords: String,
}

/// Polygon query response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolygonResponse {
    /// API numbers of wells inside the polygon.
    pub apis: Vec<String>,
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new("internal_error", message)
    }
}
