use actix_web::{web, HttpResponse, Responder};

use crate::core::markers::{initial_camera, FIT_MAX_ZOOM, FIT_PADDING};
use crate::core::{Ranker, ResultsView};
use crate::models::{Firm, MapView, ResultsQuery, ResultsResponse};
use crate::routes::{AppState, TOKEN_REQUIRED_MESSAGE};

/// Configure results-view routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/firms", web::get().to(list_firms));
}

/// Results view endpoint
///
/// GET /api/v1/firms?address=..&lat=..&lng=..&closingDate=..&q=..&selected=..
///
/// Missing or unparseable coordinates fall back to listing every firm.
async fn list_firms(
    state: web::Data<AppState>,
    query: web::Query<ResultsQuery>,
) -> impl Responder {
    let response = build_results(
        state.catalog.firms(),
        state.ranker,
        state.geocoder.is_configured(),
        &query,
    );

    tracing::info!(
        "Returning {} primary and {} additional firms (origin: {})",
        response.primary.len(),
        response.additional.len(),
        response
            .search_location
            .as_ref()
            .map(|l| l.address.as_str())
            .unwrap_or("none")
    );

    HttpResponse::Ok().json(response)
}

/// Assemble the results view for a navigation query
pub fn build_results(
    firms: std::sync::Arc<Vec<Firm>>,
    ranker: Ranker,
    map_available: bool,
    query: &ResultsQuery,
) -> ResultsResponse {
    let mut view = ResultsView::new(firms, ranker);
    view.set_origin(query.search_location());
    view.set_search_term(query.search_term());
    if let Some(id) = query.selected {
        view.select(id);
    }

    let results = view.results();
    let origin = view.origin();

    let (heading, summary) = match origin {
        Some(location) => (
            "Nearby Law Firms",
            format!("{} closest firms to {}", results.primary.len(), location.address),
        ),
        None => (
            "Available Law Firms",
            format!("{} firms found in your area", results.primary.len()),
        ),
    };

    let (center, zoom) = initial_camera(origin);
    let map = MapView {
        map_available,
        message: (!map_available).then(|| TOKEN_REQUIRED_MESSAGE.to_string()),
        marker_ids: results.primary.iter().map(|f| f.id).collect(),
        center,
        zoom,
        bounds: view.markers().fit_bounds(origin),
        padding: FIT_PADDING,
        max_zoom: FIT_MAX_ZOOM,
        focus: view.focus(),
    };

    ResultsResponse {
        heading: heading.to_string(),
        summary,
        search_location: origin.cloned(),
        closing_date: query
            .closing_date()
            .map(|d| d.format("%A, %B %-d, %Y").to_string()),
        search_term: view.search_term().to_string(),
        primary: results.primary.clone(),
        additional: results.additional.clone(),
        selected: view.selected().cloned(),
        map,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::FirmCatalog;

    fn charlotte_query() -> ResultsQuery {
        ResultsQuery {
            address: Some("Downtown Charlotte, NC".to_string()),
            lat: Some("35.2271".to_string()),
            lng: Some("-80.8431".to_string()),
            closing_date: Some("2026-11-20".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_results_with_origin() {
        let response = build_results(
            FirmCatalog::sample().firms(),
            Ranker::default(),
            true,
            &charlotte_query(),
        );

        assert_eq!(response.heading, "Nearby Law Firms");
        assert_eq!(response.summary, "10 closest firms to Downtown Charlotte, NC");
        assert_eq!(response.primary.len(), 10);
        assert_eq!(response.map.marker_ids.len(), 10);
        assert_eq!(response.closing_date.as_deref(), Some("Friday, November 20, 2026"));
        assert!(response.map.message.is_none());
        assert!(response.map.bounds.is_some());
        assert_eq!(response.map.center, crate::models::Coordinates::new(-80.8431, 35.2271));
        assert_eq!(response.map.zoom, 12);
    }

    #[test]
    fn test_results_without_origin() {
        let response = build_results(
            FirmCatalog::sample().firms(),
            Ranker::default(),
            true,
            &ResultsQuery::default(),
        );

        assert_eq!(response.heading, "Available Law Firms");
        assert_eq!(response.primary.len(), 14);
        assert!(response.additional.is_empty());
        assert!(response.search_location.is_none());
        assert_eq!(response.map.zoom, 11);
    }

    #[test]
    fn test_map_unavailable_message() {
        let response = build_results(
            FirmCatalog::sample().firms(),
            Ranker::default(),
            false,
            &ResultsQuery::default(),
        );

        assert!(!response.map.map_available);
        assert_eq!(response.map.message.as_deref(), Some(TOKEN_REQUIRED_MESSAGE));
        assert_eq!(response.primary.len(), 14);
    }

    #[test]
    fn test_selected_firm_focus() {
        let mut query = charlotte_query();
        query.selected = Some(5);
        let response = build_results(
            FirmCatalog::sample().firms(),
            Ranker::default(),
            true,
            &query,
        );

        assert_eq!(response.selected.unwrap().name, "SouthPark Legal Group");
        assert_eq!(response.map.focus.unwrap().firm_id, 5);
    }
}
