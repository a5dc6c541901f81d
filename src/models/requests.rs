use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::SearchLocation;

/// Search submission from the entry view
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchRequest {
    #[validate(length(min = 1, max = 512))]
    pub address: String,
    #[serde(default, alias = "closing_date", rename = "closingDate")]
    pub closing_date: Option<String>,
}

/// Query parameters carried by the results view location
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultsQuery {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub lat: Option<String>,
    #[serde(default)]
    pub lng: Option<String>,
    #[serde(default, rename = "closingDate")]
    pub closing_date: Option<String>,
    /// Free-text filter typed into the sidebar
    #[serde(default)]
    pub q: Option<String>,
    /// Firm activated from a marker or list entry
    #[serde(default)]
    pub selected: Option<u32>,
}

impl ResultsQuery {
    /// Rebuild the search origin from `lat`/`lng`.
    ///
    /// Both values must be present and parse as finite numbers, otherwise the
    /// view runs without a location.
    pub fn search_location(&self) -> Option<SearchLocation> {
        let lat = parse_finite(self.lat.as_deref()?)?;
        let lng = parse_finite(self.lng.as_deref()?)?;

        let address = self
            .address
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}, {}", lat, lng));

        Some(SearchLocation::new(address, lat, lng))
    }

    /// Parsed closing date; malformed values are dropped
    pub fn closing_date(&self) -> Option<NaiveDate> {
        parse_closing_date(self.closing_date.as_deref()?)
    }

    pub fn search_term(&self) -> &str {
        self.q.as_deref().unwrap_or("")
    }
}

/// Autocomplete lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestQuery {
    #[serde(default)]
    pub q: String,
}

fn parse_finite(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse an ISO `YYYY-MM-DD` closing date
pub fn parse_closing_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}
