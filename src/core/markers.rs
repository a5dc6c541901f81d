use std::collections::BTreeMap;

use crate::core::distance::calculate_bounds;
use crate::models::{BoundingBox, Coordinates, Firm, FocusTarget, SearchLocation};

/// Padding in pixels around fitted bounds
pub const FIT_PADDING: u32 = 80;
/// Upper zoom bound when fitting markers
pub const FIT_MAX_ZOOM: u8 = 14;
/// Zoom used when flying to a selected firm
pub const FOCUS_ZOOM: u8 = 15;
/// Map center before any search: downtown Charlotte
pub const DEFAULT_CENTER: Coordinates = Coordinates(-80.8431, 35.2271);
/// Initial zoom with and without a search origin
pub const ORIGIN_ZOOM: u8 = 12;
pub const DEFAULT_ZOOM: u8 = 11;

/// Camera the map opens with, before bounds are fitted
pub fn initial_camera(origin: Option<&SearchLocation>) -> (Coordinates, u8) {
    match origin {
        Some(location) => (location.coordinates, ORIGIN_ZOOM),
        None => (DEFAULT_CENTER, DEFAULT_ZOOM),
    }
}

/// Map marker for one firm
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub firm_id: u32,
    pub coordinates: Coordinates,
    /// Text drawn inside the pin (the firm rating)
    pub label: String,
}

impl Marker {
    fn for_firm(firm: &Firm) -> Self {
        Self {
            firm_id: firm.id,
            coordinates: firm.coordinates,
            label: firm.rating.to_string(),
        }
    }
}

/// Marker changes produced by a reconcile
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerDiff {
    pub added: Vec<u32>,
    pub removed: Vec<u32>,
}

impl MarkerDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Owned collection of firm markers keyed by firm id
#[derive(Debug, Clone, Default)]
pub struct MarkerSet {
    markers: BTreeMap<u32, Marker>,
}

impl MarkerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the markers in line with `firms`.
    ///
    /// Markers whose firm is no longer present are removed, new firms get a
    /// marker, and surviving markers are left in place.
    pub fn reconcile(&mut self, firms: &[Firm]) -> MarkerDiff {
        let wanted: BTreeMap<u32, &Firm> = firms.iter().map(|firm| (firm.id, firm)).collect();

        let removed: Vec<u32> = self
            .markers
            .keys()
            .filter(|id| !wanted.contains_key(id))
            .copied()
            .collect();
        for id in &removed {
            self.markers.remove(id);
        }

        let mut added = Vec::new();
        for (id, firm) in wanted {
            if !self.markers.contains_key(&id) {
                self.markers.insert(id, Marker::for_firm(firm));
                added.push(id);
            }
        }

        MarkerDiff { added, removed }
    }

    pub fn get(&self, firm_id: u32) -> Option<&Marker> {
        self.markers.get(&firm_id)
    }

    pub fn contains(&self, firm_id: u32) -> bool {
        self.markers.contains_key(&firm_id)
    }

    pub fn ids(&self) -> Vec<u32> {
        self.markers.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Marker> {
        self.markers.values()
    }

    /// Bounds covering the search origin and every marker
    pub fn fit_bounds(&self, origin: Option<&SearchLocation>) -> Option<BoundingBox> {
        calculate_bounds(
            origin
                .map(|o| &o.coordinates)
                .into_iter()
                .chain(self.iter().map(|m| &m.coordinates)),
        )
    }

    /// Camera target for a selected firm; `None` when it has no marker
    pub fn focus(&self, firm_id: u32) -> Option<FocusTarget> {
        self.markers.get(&firm_id).map(|marker| FocusTarget {
            firm_id,
            center: marker.coordinates,
            zoom: FOCUS_ZOOM,
        })
    }
}
