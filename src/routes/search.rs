use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::models::requests::parse_closing_date;
use crate::models::{
    ErrorResponse, HealthResponse, SearchLocation, SearchRequest, SearchResponse, SuggestQuery,
    SuggestionsResponse,
};
use crate::routes::{AppState, TOKEN_REQUIRED_MESSAGE};

pub const ADDRESS_NOT_FOUND_MESSAGE: &str =
    "Could not find the specified address. Please try a different address.";

/// Configure search, suggestion and health routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/search", web::post().to(submit_search))
        .route("/suggestions", web::get().to(suggest_addresses));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let status = if state.geocoder.is_configured() { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        firm_count: state.catalog.len(),
        cache_entries: state.geocoder.cache().map(|c| c.stats().entries),
        timestamp: chrono::Utc::now(),
    })
}

fn service_unavailable() -> HttpResponse {
    HttpResponse::ServiceUnavailable().json(ErrorResponse {
        error: "service_unavailable".to_string(),
        message: TOKEN_REQUIRED_MESSAGE.to_string(),
        status_code: 503,
    })
}

/// Results view location carrying the navigation parameters
pub fn navigation_url(location: &SearchLocation, closing_date: Option<&str>) -> String {
    let mut url = format!(
        "/map?address={}&lat={}&lng={}",
        urlencoding::encode(&location.address),
        location.coordinates.latitude(),
        location.coordinates.longitude(),
    );
    if let Some(date) = closing_date {
        url.push_str("&closingDate=");
        url.push_str(&urlencoding::encode(date));
    }
    url
}

/// Search submission endpoint
///
/// POST /api/v1/search
///
/// Request body:
/// ```json
/// {
///   "address": "string",
///   "closingDate": "YYYY-MM-DD"
/// }
/// ```
async fn submit_search(
    state: web::Data<AppState>,
    req: web::Json<SearchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for search request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let address = req.address.trim();
    if address.is_empty() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: "Please enter a property address".to_string(),
            status_code: 400,
        });
    }

    if !state.geocoder.is_configured() {
        tracing::warn!("Search rejected: Mapbox access token is not configured");
        return service_unavailable();
    }

    let closing_date = req.closing_date.as_deref().and_then(|raw| {
        let parsed = parse_closing_date(raw);
        if parsed.is_none() && !raw.trim().is_empty() {
            tracing::debug!("Dropping malformed closing date {:?}", raw);
        }
        parsed.map(|d| d.format("%Y-%m-%d").to_string())
    });

    let Some(result) = state.geocoder.geocode(address).await else {
        return HttpResponse::NotFound().json(ErrorResponse {
            error: "address_not_found".to_string(),
            message: ADDRESS_NOT_FOUND_MESSAGE.to_string(),
            status_code: 404,
        });
    };

    let location = result.to_search_location();
    let redirect = navigation_url(&location, closing_date.as_deref());

    tracing::info!(
        "Resolved {:?} to {} ({}, {})",
        address,
        location.address,
        location.coordinates.latitude(),
        location.coordinates.longitude()
    );

    HttpResponse::Ok().json(SearchResponse {
        redirect,
        location,
        closing_date,
    })
}

/// Address autocomplete endpoint
///
/// GET /api/v1/suggestions?q={partial address}
async fn suggest_addresses(
    state: web::Data<AppState>,
    query: web::Query<SuggestQuery>,
) -> impl Responder {
    if !state.geocoder.is_configured() {
        return service_unavailable();
    }

    let suggestions = state.geocoder.suggestions(&query.q).await;
    tracing::debug!("{} suggestions for {:?}", suggestions.len(), query.q);

    HttpResponse::Ok().json(SuggestionsResponse {
        query: query.q.clone(),
        suggestions,
    })
}
