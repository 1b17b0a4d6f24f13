//! HTTP read API
//!
//! Point lookup by API number, point-in-polygon filtering over stored
//! coordinates, and a health check, served under `/api/v1`.

pub mod geometry;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod types;

pub use routes::create_router;
pub use server::HttpServer;
