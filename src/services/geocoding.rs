use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::core::SuggestionSource;
use crate::models::{Coordinates, GeocodeResult, Suggestion};
use crate::services::cache::GeocodeCache;

pub const DEFAULT_BASE_URL: &str = "https://api.mapbox.com";

/// Errors that can occur when talking to the geocoding provider
///
/// These never leave the client: callers only see "result" or "no result".
#[derive(Debug, Error)]
pub enum GeocodingError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Mapbox access token is not configured")]
    MissingToken,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Provider query filters
#[derive(Debug, Clone)]
pub struct GeocodingOptions {
    pub country: String,
    pub types: String,
    pub suggestion_limit: u8,
}

impl Default for GeocodingOptions {
    fn default() -> Self {
        Self {
            country: "US".to_string(),
            types: "address,poi".to_string(),
            suggestion_limit: 5,
        }
    }
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    place_name: String,
    center: Coordinates,
    #[serde(default)]
    context: Vec<ContextEntry>,
    #[serde(default)]
    properties: FeatureProperties,
}

#[derive(Debug, Default, Deserialize)]
struct FeatureProperties {
    #[serde(default)]
    address: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContextEntry {
    id: String,
    #[serde(default)]
    text: String,
}

impl Feature {
    /// Text of the first context entry whose id starts with `kind`
    fn context_value(&self, kind: &str) -> String {
        self.context
            .iter()
            .find(|entry| entry.id.starts_with(kind))
            .map(|entry| entry.text.clone())
            .unwrap_or_default()
    }

    fn into_geocode_result(self) -> GeocodeResult {
        GeocodeResult {
            city: self.context_value("place"),
            state: self.context_value("region"),
            zip_code: self.context_value("postcode"),
            address: self.place_name,
            coordinates: self.center,
        }
    }

    fn into_suggestion(self) -> Suggestion {
        Suggestion {
            place_name: self.place_name,
            coordinates: self.center,
            address: self.properties.address,
        }
    }
}

/// Mapbox Places geocoding client
///
/// Handles:
/// - Resolving a submitted address to its top-ranked place
/// - Address autocomplete suggestions
pub struct GeocodingClient {
    base_url: String,
    access_token: Option<String>,
    options: GeocodingOptions,
    client: Client,
    cache: Option<GeocodeCache>,
}

impl GeocodingClient {
    /// Create a new geocoding client. A blank token counts as missing.
    pub fn new(
        base_url: String,
        access_token: Option<String>,
        options: GeocodingOptions,
        timeout: Duration,
    ) -> Result<Self, GeocodingError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            access_token: access_token.filter(|t| !t.trim().is_empty()),
            options,
            client,
            cache: None,
        })
    }

    pub fn with_cache(mut self, cache: GeocodeCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Whether an access token is available
    pub fn is_configured(&self) -> bool {
        self.access_token.is_some()
    }

    pub fn cache(&self) -> Option<&GeocodeCache> {
        self.cache.as_ref()
    }

    /// Resolve an address to its top-ranked place.
    ///
    /// Every failure (no token, blank input, network error, non-success
    /// status, no features) reduces to `None`.
    pub async fn geocode(&self, address: &str) -> Option<GeocodeResult> {
        match self.try_geocode(address).await {
            Ok(result) => {
                if result.is_none() {
                    tracing::info!("No geocoding result for {:?}", address);
                }
                result
            }
            Err(e) => {
                tracing::warn!("Geocoding failed for {:?}: {}", address, e);
                None
            }
        }
    }

    /// Fallible form of [`geocode`](Self::geocode)
    pub async fn try_geocode(
        &self,
        address: &str,
    ) -> Result<Option<GeocodeResult>, GeocodingError> {
        let query = address.trim();
        if query.is_empty() {
            return Ok(None);
        }

        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get(query).await {
                return Ok(Some(hit));
            }
        }

        let features = self.fetch_features(query, 1, false).await?;
        let Some(feature) = features.into_iter().next() else {
            return Ok(None);
        };
        let result = feature.into_geocode_result();

        if let Some(cache) = &self.cache {
            cache.insert(query, result.clone()).await;
        }

        Ok(Some(result))
    }

    /// Autocomplete candidates for a partial address; failures yield none
    pub async fn suggestions(&self, query: &str) -> Vec<Suggestion> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        match self
            .fetch_features(query, self.options.suggestion_limit, true)
            .await
        {
            Ok(features) => features.into_iter().map(Feature::into_suggestion).collect(),
            Err(e) => {
                tracing::warn!("Address suggestions failed for {:?}: {}", query, e);
                Vec::new()
            }
        }
    }

    fn places_url(&self, query: &str) -> String {
        format!(
            "{}/geocoding/v5/mapbox.places/{}.json",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(query)
        )
    }

    async fn fetch_features(
        &self,
        query: &str,
        limit: u8,
        autocomplete: bool,
    ) -> Result<Vec<Feature>, GeocodingError> {
        let token = self.access_token.as_deref().ok_or(GeocodingError::MissingToken)?;
        let url = self.places_url(query);

        tracing::debug!("Querying geocoder: {} (limit {})", url, limit);

        let limit = limit.to_string();
        let mut params = vec![
            ("access_token", token),
            ("country", self.options.country.as_str()),
            ("types", self.options.types.as_str()),
            ("limit", limit.as_str()),
        ];
        if autocomplete {
            params.push(("autocomplete", "true"));
        }

        let response = self.client.get(&url).query(&params).send().await?;

        if !response.status().is_success() {
            return Err(GeocodingError::ApiError(format!(
                "Geocoding request failed: {}",
                response.status()
            )));
        }

        let collection: FeatureCollection = response
            .json()
            .await
            .map_err(|e| GeocodingError::InvalidResponse(e.to_string()))?;

        Ok(collection.features)
    }
}

impl SuggestionSource for GeocodingClient {
    async fn suggest(&self, query: &str) -> Vec<Suggestion> {
        self.suggestions(query).await
    }
}
