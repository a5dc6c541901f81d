// Geocoding client tests against a mock Mapbox server

use std::time::Duration;

use closing_finder::models::Coordinates;
use closing_finder::services::{GeocodeCache, GeocodingClient, GeocodingError, GeocodingOptions};
use mockito::Matcher;

const PLACES_PATH: &str = r"^/geocoding/v5/mapbox\.places/.+\.json";

fn client(base_url: String) -> GeocodingClient {
    GeocodingClient::new(
        base_url,
        Some("pk.test".to_string()),
        GeocodingOptions::default(),
        Duration::from_secs(5),
    )
    .unwrap()
}

fn charlotte_body() -> String {
    serde_json::json!({
        "type": "FeatureCollection",
        "features": [{
            "place_name": "123 Main Street, Charlotte, North Carolina 28202, United States",
            "center": [-80.8431, 35.2271],
            "place_type": ["address"],
            "context": [
                {"id": "postcode.8361", "text": "28202"},
                {"id": "place.9017", "text": "Charlotte"},
                {"id": "region.9535", "text": "North Carolina"},
                {"id": "country.8940", "text": "United States"}
            ]
        }]
    })
    .to_string()
}

#[tokio::test]
async fn test_geocode_resolves_top_feature() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Regex(PLACES_PATH.to_string()))
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("access_token".into(), "pk.test".into()),
            Matcher::UrlEncoded("country".into(), "US".into()),
            Matcher::UrlEncoded("types".into(), "address,poi".into()),
            Matcher::UrlEncoded("limit".into(), "1".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(charlotte_body())
        .create_async()
        .await;

    let result = client(server.url()).geocode("123 Main St, Charlotte").await.unwrap();

    assert_eq!(result.address, "123 Main Street, Charlotte, North Carolina 28202, United States");
    assert_eq!(result.coordinates, Coordinates::new(-80.8431, 35.2271));
    assert_eq!(result.city, "Charlotte");
    assert_eq!(result.state, "North Carolina");
    assert_eq!(result.zip_code, "28202");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_geocode_no_features_is_none() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", Matcher::Regex(PLACES_PATH.to_string()))
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"type":"FeatureCollection","features":[]}"#)
        .create_async()
        .await;

    let client = client(server.url());
    assert!(client.geocode("nowhere at all 99999").await.is_none());
    assert!(matches!(client.try_geocode("nowhere at all 99999").await, Ok(None)));
}

#[tokio::test]
async fn test_geocode_http_error_is_none() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", Matcher::Regex(PLACES_PATH.to_string()))
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body(r#"{"message":"Not Authorized - Invalid Token"}"#)
        .create_async()
        .await;

    let client = client(server.url());
    assert!(client.geocode("123 Main St").await.is_none());
    assert!(matches!(
        client.try_geocode("123 Main St").await,
        Err(GeocodingError::ApiError(_))
    ));
}

#[tokio::test]
async fn test_geocode_malformed_body_is_none() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", Matcher::Regex(PLACES_PATH.to_string()))
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("<html>gateway</html>")
        .create_async()
        .await;

    let client = client(server.url());
    assert!(matches!(
        client.try_geocode("123 Main St").await,
        Err(GeocodingError::InvalidResponse(_))
    ));
}

#[tokio::test]
async fn test_geocode_network_error_is_none() {
    // Nothing listens on port 1
    let client = GeocodingClient::new(
        "http://127.0.0.1:1".to_string(),
        Some("pk.test".to_string()),
        GeocodingOptions::default(),
        Duration::from_secs(2),
    )
    .unwrap();

    assert!(client.geocode("123 Main St").await.is_none());
}

#[tokio::test]
async fn test_blank_address_skips_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    assert!(client(server.url()).geocode("   ").await.is_none());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_geocode_results_are_cached() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Regex(PLACES_PATH.to_string()))
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(charlotte_body())
        .expect(1)
        .create_async()
        .await;

    let client = client(server.url()).with_cache(GeocodeCache::new(10, 60));

    let first = client.geocode("123 Main St, Charlotte").await;
    let second = client.geocode("123 MAIN ST, CHARLOTTE ").await;

    assert!(first.is_some());
    assert_eq!(first, second);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_suggestions_request_autocomplete() {
    let mut server = mockito::Server::new_async().await;
    let body = serde_json::json!({
        "features": [
            {"place_name": "123 Main Street, Charlotte, NC", "center": [-80.8431, 35.2271],
             "properties": {"address": "123 Main Street"}},
            {"place_name": "123 Main Street, Rock Hill, SC", "center": [-81.0251, 34.9249]}
        ]
    });
    let mock = server
        .mock("GET", Matcher::Regex(PLACES_PATH.to_string()))
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("limit".into(), "5".into()),
            Matcher::UrlEncoded("autocomplete".into(), "true".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;

    let suggestions = client(server.url()).suggestions("123 Main").await;

    assert_eq!(suggestions.len(), 2);
    assert_eq!(suggestions[0].address.as_deref(), Some("123 Main Street"));
    assert!(suggestions[1].address.is_none());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_suggestions_failure_is_empty() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    assert!(client(server.url()).suggestions("123 Main").await.is_empty());
}
