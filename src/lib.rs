//! wellscrape: scraper and read API for New Mexico OCD well records
//!
//! Retrieves public well detail pages by API number, extracts a fixed
//! field set from known span IDs, persists records into SQLite, and
//! serves lookups over HTTP with a point-in-polygon filter.
//!
//! Components:
//! - `fields`: the logical-field to markup-locator map
//! - `scraping`: fetch / extract / retry pipeline with bounded
//!   concurrency and per-identifier failure accounting
//! - `store`: SQLite persistence with CSV/JSON export
//! - `api`: axum read API (point lookup, polygon containment, health)
//! - `input`: identifier CSV reading
//! - `config`: TOML configuration

pub mod api;
pub mod config;
pub mod fields;
pub mod input;
pub mod scraping;
pub mod store;
pub mod types;

pub use config::Config;
pub use types::{RunSummary, WellRecord};
