//! Closing Finder - locate closing attorneys near a property
//!
//! This library provides the proximity ranking engine, the Mapbox geocoding
//! client and the results-view controller behind the closing finder service.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{haversine_distance, MarkerSet, Ranker, ResultsView};
pub use models::{Firm, GeocodeResult, RankedResultSet, SearchLocation};
pub use services::{FirmCatalog, GeocodingClient};
