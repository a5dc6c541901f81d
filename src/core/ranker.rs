use std::collections::HashSet;

use crate::core::{
    distance::distance_between,
    filters::{matches_search_term, normalize_search_term},
};
use crate::models::{Firm, RankedResultSet, SearchLocation};

/// Default number of firms kept in the nearby tier
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Proximity ranking and filter engine
///
/// # Pipeline Stages
/// 1. Distance attachment (only with a search origin)
/// 2. Stable sort by distance and cap to `max_results`
/// 3. Search-term filtering of the capped base set
/// 4. Search-term scan of the whole catalog for the additional tier
#[derive(Debug, Clone, Copy)]
pub struct Ranker {
    max_results: usize,
}

impl Ranker {
    /// A cap of zero would empty the nearby tier, so it is raised to one
    pub fn new(max_results: usize) -> Self {
        if max_results == 0 {
            tracing::warn!("ranking.max_results must be at least 1, using 1");
        }
        Self {
            max_results: max_results.max(1),
        }
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Base candidate set before any text filtering.
    ///
    /// Without an origin this is every firm in input order. With one it is
    /// the `max_results` closest firms, each carrying its distance.
    pub fn base_candidates(&self, firms: &[Firm], origin: Option<&SearchLocation>) -> Vec<Firm> {
        let Some(origin) = origin else {
            return firms.to_vec();
        };

        let mut ranked: Vec<Firm> = firms
            .iter()
            .map(|firm| {
                firm.with_distance(distance_between(&origin.coordinates, &firm.coordinates))
            })
            .collect();

        // sort_by is stable: equal distances keep catalog order
        ranked.sort_by(|a, b| {
            let a = a.distance.unwrap_or(f64::INFINITY);
            let b = b.distance.unwrap_or(f64::INFINITY);
            a.total_cmp(&b)
        });
        ranked.truncate(self.max_results);
        ranked
    }

    /// Produce the primary and additional result sets
    pub fn rank(
        &self,
        firms: &[Firm],
        origin: Option<&SearchLocation>,
        search_term: &str,
    ) -> RankedResultSet {
        let base = self.base_candidates(firms, origin);

        let Some(needle) = normalize_search_term(search_term) else {
            return RankedResultSet {
                primary: base,
                additional: Vec::new(),
            };
        };

        let additional = match origin {
            Some(origin) => {
                let base_ids: HashSet<u32> = base.iter().map(|firm| firm.id).collect();
                firms
                    .iter()
                    .filter(|firm| !base_ids.contains(&firm.id))
                    .filter(|firm| matches_search_term(firm, &needle))
                    .map(|firm| {
                        firm.with_distance(distance_between(&origin.coordinates, &firm.coordinates))
                    })
                    .collect()
            }
            None => Vec::new(),
        };

        let primary = base
            .into_iter()
            .filter(|firm| matches_search_term(firm, &needle))
            .collect();

        RankedResultSet { primary, additional }
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RESULTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinates;
    use crate::services::catalog::sample_firms;

    fn charlotte() -> SearchLocation {
        SearchLocation::new("Downtown Charlotte, NC", 35.2271, -80.8431)
    }

    fn firm_at(id: u32, lat: f64, lon: f64) -> Firm {
        Firm {
            id,
            name: format!("Firm {}", id),
            address: format!("{} Main Street", id),
            coordinates: Coordinates::new(lon, lat),
            phone: String::new(),
            email: String::new(),
            rating: 4.0,
            review_count: 1,
            specialties: vec!["Closings".to_string()],
            distance: None,
        }
    }

    fn ids(firms: &[Firm]) -> Vec<u32> {
        firms.iter().map(|f| f.id).collect()
    }

    #[test]
    fn test_zero_cap_is_raised_to_one() {
        let ranker = Ranker::new(0);
        assert_eq!(ranker.max_results(), 1);

        let result = ranker.rank(&sample_firms(), Some(&charlotte()), "title");
        assert_eq!(ids(&result.primary), vec![1]);
        assert_eq!(ids(&result.additional), vec![3, 8, 11, 14]);
    }

    #[test]
    fn test_no_origin_returns_all_in_order() {
        let firms = sample_firms();
        let result = Ranker::default().rank(&firms, None, "");

        assert_eq!(result.primary, firms);
        assert!(result.additional.is_empty());
        assert!(result.primary.iter().all(|f| f.distance.is_none()));
    }

    #[test]
    fn test_no_origin_never_has_additional() {
        let firms = sample_firms();
        let result = Ranker::default().rank(&firms, None, "title");

        assert!(result.additional.is_empty());
        assert!(!result.primary.is_empty());
    }

    #[test]
    fn test_origin_caps_and_sorts() {
        let firms = sample_firms();
        let origin = charlotte();
        let result = Ranker::default().rank(&firms, Some(&origin), "");

        assert_eq!(ids(&result.primary), vec![1, 5, 3, 4, 2, 6, 14, 8, 7, 9]);
        assert_eq!(result.primary[0].distance, Some(0.0));
        assert!(result.additional.is_empty());
    }

    #[test]
    fn test_ties_keep_input_order() {
        let firms = vec![
            firm_at(7, 35.30, -80.84),
            firm_at(3, 35.30, -80.84),
            firm_at(9, 35.2271, -80.8431),
            firm_at(1, 35.30, -80.84),
        ];
        let origin = charlotte();
        let result = Ranker::default().rank(&firms, Some(&origin), "");

        assert_eq!(ids(&result.primary), vec![9, 7, 3, 1]);
    }

    #[test]
    fn test_custom_cap() {
        let firms = sample_firms();
        let origin = charlotte();
        let result = Ranker::new(3).rank(&firms, Some(&origin), "");

        assert_eq!(ids(&result.primary), vec![1, 5, 3]);
    }

    #[test]
    fn test_search_term_splits_tiers() {
        let firms = sample_firms();
        let origin = charlotte();
        let result = Ranker::default().rank(&firms, Some(&origin), "Title");

        assert_eq!(ids(&result.primary), vec![1, 3, 14, 8]);
        assert_eq!(ids(&result.additional), vec![11]);
        assert!(result.additional[0].distance.unwrap() > 40.0);
    }

    #[test]
    fn test_whitespace_term_is_empty() {
        let firms = sample_firms();
        let origin = charlotte();
        let blank = Ranker::default().rank(&firms, Some(&origin), "   ");
        let empty = Ranker::default().rank(&firms, Some(&origin), "");

        assert_eq!(blank, empty);
    }

    #[test]
    fn test_empty_catalog() {
        let origin = charlotte();
        let result = Ranker::default().rank(&[], Some(&origin), "title");

        assert!(result.is_empty());
    }
}
