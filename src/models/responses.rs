use serde::{Deserialize, Serialize};

use crate::models::domain::{BoundingBox, Firm, SearchLocation, Suggestion};

/// Response to a successful search submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Results view location with the navigation parameters encoded
    pub redirect: String,
    pub location: SearchLocation,
    #[serde(rename = "closingDate")]
    pub closing_date: Option<String>,
}

/// Map layer derived from the primary result set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapView {
    #[serde(rename = "mapAvailable")]
    pub map_available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(rename = "markerIds")]
    pub marker_ids: Vec<u32>,
    /// Initial camera, before `bounds` are fitted
    pub center: crate::models::Coordinates,
    pub zoom: u8,
    pub bounds: Option<BoundingBox>,
    pub padding: u32,
    #[serde(rename = "maxZoom")]
    pub max_zoom: u8,
    pub focus: Option<FocusTarget>,
}

/// Point the map flies to when a firm is selected
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FocusTarget {
    #[serde(rename = "firmId")]
    pub firm_id: u32,
    pub center: crate::models::Coordinates,
    pub zoom: u8,
}

/// Response for the results view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultsResponse {
    pub heading: String,
    pub summary: String,
    #[serde(rename = "searchLocation")]
    pub search_location: Option<SearchLocation>,
    #[serde(rename = "closingDate")]
    pub closing_date: Option<String>,
    #[serde(rename = "searchTerm")]
    pub search_term: String,
    pub primary: Vec<Firm>,
    pub additional: Vec<Firm>,
    pub selected: Option<Firm>,
    pub map: MapView,
}

/// Response for the suggestions endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionsResponse {
    pub query: String,
    pub suggestions: Vec<Suggestion>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    #[serde(rename = "firmCount")]
    pub firm_count: usize,
    #[serde(rename = "cacheEntries", skip_serializing_if = "Option::is_none")]
    pub cache_entries: Option<u64>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
