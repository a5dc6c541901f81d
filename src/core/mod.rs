// Core algorithm exports
pub mod autocomplete;
pub mod distance;
pub mod filters;
pub mod markers;
pub mod ranker;
pub mod view;

pub use autocomplete::{
    AddressAutocomplete, LookupOutcome, RequestGeneration, SuggestionSource, Ticket,
};
pub use distance::{calculate_bounds, distance_between, haversine_distance, is_within_bounding_box};
pub use filters::{matches_search_term, normalize_search_term};
pub use markers::{Marker, MarkerDiff, MarkerSet};
pub use ranker::Ranker;
pub use view::ResultsView;
