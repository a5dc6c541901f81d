// Service exports
pub mod cache;
pub mod catalog;
pub mod geocoding;

pub use cache::{CacheKey, CacheStats, GeocodeCache};
pub use catalog::{sample_firms, CatalogError, FirmCatalog};
pub use geocoding::{GeocodingClient, GeocodingError, GeocodingOptions};
