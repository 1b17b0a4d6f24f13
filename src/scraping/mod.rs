//! Scraping pipeline for well detail pages
//!
//! Components:
//! - `coords`: coordinate text parsing (all-or-nothing triple)
//! - `fetcher`: HTTP GET with rate-limit detection and bounded backoff
//! - `extractor`: markup to [`crate::types::WellRecord`]
//! - `coordinator`: sequential or bounded-parallel fan-out with
//!   per-identifier outcome accounting

pub mod coordinator;
pub mod coords;
pub mod extractor;
pub mod fetcher;

pub use coordinator::{ProcessOutcome, RunMode, RunReport, ScrapeCoordinator};
pub use coords::parse_lat_lon_crs;
pub use extractor::FieldExtractor;
pub use fetcher::{FetchConfig, FetchError, WellFetcher, RATE_LIMIT_MARKER};
