use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use closing_finder::config::Settings;
use closing_finder::core::Ranker;
use closing_finder::routes::{self, handle_json_payload_error, handle_query_payload_error, AppState};
use closing_finder::services::{FirmCatalog, GeocodeCache, GeocodingClient, GeocodingOptions};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn init_logging(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }
}

fn load_catalog(path: Option<&str>) -> FirmCatalog {
    let Some(path) = path else {
        return FirmCatalog::sample();
    };

    match FirmCatalog::load_from(path) {
        Ok(catalog) => catalog,
        Err(e) => {
            warn!("Failed to load firm catalog from {} ({}), using sample firms", path, e);
            FirmCatalog::sample()
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            init_logging("info", "full");
            error!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    init_logging(&settings.logging.level, &settings.logging.format);

    info!("Starting closing finder service...");

    let catalog = load_catalog(settings.catalog.path.as_deref());
    info!("Firm catalog loaded ({} firms)", catalog.len());

    let options = GeocodingOptions {
        country: settings.geocoding.country.clone(),
        types: settings.geocoding.types.clone(),
        suggestion_limit: settings.geocoding.suggestion_limit,
    };

    let cache = GeocodeCache::new(settings.cache.capacity, settings.cache.ttl_secs);

    let geocoder = GeocodingClient::new(
        settings.mapbox.base_url.clone(),
        settings.mapbox.token().map(str::to_string),
        options,
        Duration::from_secs(settings.mapbox.timeout_secs),
    )
    .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?
    .with_cache(cache);

    if geocoder.is_configured() {
        info!(
            "Geocoding client initialized (cache: {} entries, TTL: {}s)",
            settings.cache.capacity, settings.cache.ttl_secs
        );
    } else {
        warn!("MAPBOX_ACCESS_TOKEN is not set; search and map are unavailable");
    }

    let ranker = Ranker::new(settings.ranking.max_results);
    info!("Ranker initialized (max results: {})", ranker.max_results());

    let app_state = AppState {
        catalog,
        geocoder: Arc::new(geocoder),
        ranker,
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
