use std::sync::Arc;

use crate::core::markers::{MarkerDiff, MarkerSet};
use crate::core::ranker::Ranker;
use crate::models::{Firm, FocusTarget, RankedResultSet, SearchLocation};

/// Results-page controller.
///
/// Owns the inputs (catalog, origin, search term, selection) and the values
/// derived from them. Every setter reruns the ranking and reconciles the map
/// markers against the new primary set.
#[derive(Debug, Clone)]
pub struct ResultsView {
    firms: Arc<Vec<Firm>>,
    ranker: Ranker,
    origin: Option<SearchLocation>,
    search_term: String,
    selected: Option<u32>,
    ranked: RankedResultSet,
    markers: MarkerSet,
}

impl ResultsView {
    pub fn new(firms: Arc<Vec<Firm>>, ranker: Ranker) -> Self {
        let mut view = Self {
            firms,
            ranker,
            origin: None,
            search_term: String::new(),
            selected: None,
            ranked: RankedResultSet::default(),
            markers: MarkerSet::new(),
        };
        view.recompute();
        view
    }

    pub fn set_firms(&mut self, firms: Arc<Vec<Firm>>) -> MarkerDiff {
        self.firms = firms;
        self.recompute()
    }

    /// Replace the search origin (a new search never mutates the old one)
    pub fn set_origin(&mut self, origin: Option<SearchLocation>) -> MarkerDiff {
        self.origin = origin;
        self.recompute()
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) -> MarkerDiff {
        self.search_term = term.into();
        self.recompute()
    }

    /// Activate a firm from a marker or list entry.
    ///
    /// Only firms visible in either tier can be selected.
    pub fn select(&mut self, firm_id: u32) -> Option<&Firm> {
        if self.ranked.find(firm_id).is_some() {
            self.selected = Some(firm_id);
        }
        self.selected()
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&Firm> {
        self.selected.and_then(|id| self.ranked.find(id))
    }

    /// Camera target for the current selection, if it has a marker
    pub fn focus(&self) -> Option<FocusTarget> {
        self.selected.and_then(|id| self.markers.focus(id))
    }

    pub fn origin(&self) -> Option<&SearchLocation> {
        self.origin.as_ref()
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn results(&self) -> &RankedResultSet {
        &self.ranked
    }

    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    fn recompute(&mut self) -> MarkerDiff {
        self.ranked = self
            .ranker
            .rank(&self.firms, self.origin.as_ref(), &self.search_term);

        if let Some(id) = self.selected {
            if self.ranked.find(id).is_none() {
                self.selected = None;
            }
        }

        self.markers.reconcile(&self.ranked.primary)
    }
}
