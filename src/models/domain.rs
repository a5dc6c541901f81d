use serde::{Deserialize, Serialize};

/// A `(longitude, latitude)` pair in degrees, serialized as a two-element array
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates(pub f64, pub f64);

impl Coordinates {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self(longitude, latitude)
    }

    #[inline]
    pub fn longitude(&self) -> f64 {
        self.0
    }

    #[inline]
    pub fn latitude(&self) -> f64 {
        self.1
    }
}

/// Closing attorney firm listed in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Firm {
    pub id: u32,
    pub name: String,
    pub address: String,
    pub coordinates: Coordinates,
    pub phone: String,
    pub email: String,
    pub rating: f64,
    #[serde(rename = "reviewCount")]
    pub review_count: u32,
    #[serde(default)]
    pub specialties: Vec<String>,
    /// Miles from the active search location, set only by ranking
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

impl Firm {
    /// Copy of this firm carrying the given distance
    pub fn with_distance(&self, miles: f64) -> Self {
        Self {
            distance: Some(miles),
            ..self.clone()
        }
    }
}

/// Geocoded origin of a search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchLocation {
    pub address: String,
    pub coordinates: Coordinates,
}

impl SearchLocation {
    pub fn new(address: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            address: address.into(),
            coordinates: Coordinates::new(longitude, latitude),
        }
    }
}

/// Two-tier output of the ranking engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankedResultSet {
    pub primary: Vec<Firm>,
    pub additional: Vec<Firm>,
}

impl RankedResultSet {
    pub fn is_empty(&self) -> bool {
        self.primary.is_empty() && self.additional.is_empty()
    }

    /// Look a firm up by id across both tiers
    pub fn find(&self, firm_id: u32) -> Option<&Firm> {
        self.primary
            .iter()
            .chain(self.additional.iter())
            .find(|firm| firm.id == firm_id)
    }
}

/// Resolved address returned by the geocoding provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub address: String,
    pub coordinates: Coordinates,
    pub city: String,
    pub state: String,
    #[serde(rename = "zipCode")]
    pub zip_code: String,
}

impl GeocodeResult {
    pub fn to_search_location(&self) -> SearchLocation {
        SearchLocation {
            address: self.address.clone(),
            coordinates: self.coordinates,
        }
    }
}

/// Address autocomplete candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(rename = "placeName")]
    pub place_name: String,
    pub coordinates: Coordinates,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Geographic bounds of a set of points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}
