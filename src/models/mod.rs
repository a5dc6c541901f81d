// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BoundingBox, Coordinates, Firm, GeocodeResult, RankedResultSet, SearchLocation, Suggestion,
};
pub use requests::{ResultsQuery, SearchRequest, SuggestQuery};
pub use responses::{
    ErrorResponse, FocusTarget, HealthResponse, MapView, ResultsResponse, SearchResponse,
    SuggestionsResponse,
};
