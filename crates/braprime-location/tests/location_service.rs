//! `LocationService` end to end: live answers when the provider cooperates,
//! deterministic fallback data when it does not.

use std::sync::Arc;
use std::time::Duration;

use braprime_core::{AppConfig, Coordinates, Environment, FallbackPolicy};
use braprime_location::{
    LocationService, MapsClient, PlaceSearch, ReverseGeocode, SearchDebouncer, SelectionState,
};
use rust_decimal::Decimal;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service(base_url: &str, api_key: Option<&str>) -> LocationService {
    let client = MapsClient::with_base_url(api_key, 5, base_url)
        .expect("client construction should not fail");
    LocationService::new(client, FallbackPolicy::default())
}

fn config_for(base_url: &str) -> AppConfig {
    AppConfig {
        env: Environment::Test,
        log_level: "debug".to_owned(),
        maps_api_key: Some("test-key".to_owned()),
        maps_base_url: base_url.to_owned(),
        maps_language: "fr".to_owned(),
        maps_region: "gn".to_owned(),
        request_timeout_secs: 5,
        user_agent: "braprime-tests".to_owned(),
        search_debounce_ms: 50,
        search_radius_m: 12_000,
        max_delivery_distance_km: 20.0,
    }
}

/// A server that fails every request with a provider error status.
async fn denying_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid."
        })))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn live_search_results_are_returned() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/place/textsearch/json"))
        .and(query_param("query", "pharmacie"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "OK",
            "results": [{
                "place_id": "ChIJpharma",
                "name": "Pharmacie du Port",
                "formatted_address": "Boulbinet, Kaloum, Conakry",
                "geometry": { "location": { "lat": 9.512, "lng": -13.709 } },
                "types": ["pharmacy"]
            }]
        })))
        .mount(&server)
        .await;

    let places = service(&server.uri(), Some("test-key"))
        .search_places("  pharmacie ", None)
        .await;
    assert_eq!(places.len(), 1);
    assert_eq!(places[0].id, "ChIJpharma");
}

#[tokio::test]
async fn default_bias_is_sent_when_caller_has_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/place/textsearch/json"))
        .and(query_param("location", "9.6412,-13.5784"))
        .and(query_param("radius", "8000"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "status": "ZERO_RESULTS" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let svc = service(&server.uri(), Some("test-key"))
        .with_search_radius(8000)
        .with_default_bias(Some(Coordinates::CONAKRY));
    assert!(svc.search_places("boulangerie", None).await.is_empty());
}

#[tokio::test]
async fn blank_query_short_circuits() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let places = service(&server.uri(), Some("test-key"))
        .search_places(" \t ", None)
        .await;
    assert!(places.is_empty());
}

#[tokio::test]
async fn provider_error_falls_back_to_gazetteer() {
    let server = denying_server().await;
    let svc = service(&server.uri(), Some("test-key"));

    let first = svc.search_places("kaloum", None).await;
    let second = svc.search_places("kaloum", None).await;

    assert!(!first.is_empty());
    assert_eq!(first, second);
    assert_eq!(first, svc.fallback().search("kaloum"));
    assert!(first
        .iter()
        .all(|p| svc.fallback().gazetteer().contains(p)));
}

#[tokio::test]
async fn unreachable_provider_falls_back_to_gazetteer() {
    // Nothing listens on the discard port.
    let svc = service("http://127.0.0.1:9", Some("test-key"));
    let places = svc.search_places("Madina", None).await;
    let names: Vec<&str> = places.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Marché Madina"]);
}

#[tokio::test]
async fn missing_key_falls_back_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let svc = service(&server.uri(), None);
    let places = svc.search_places("dixinn", None).await;
    assert_eq!(places, FallbackPolicy::default().search("dixinn"));

    let location = svc.reverse_geocode(Coordinates::new(9.1234, -13.5678)).await;
    assert_eq!(location.address, "Selected address (9.1234, -13.5678)");
}

#[tokio::test]
async fn reverse_geocode_failure_yields_placeholder() {
    let server = denying_server().await;
    let location = service(&server.uri(), Some("test-key"))
        .reverse_geocode(Coordinates::new(9.1234, -13.5678))
        .await;

    assert_eq!(location.address, "Selected address (9.1234, -13.5678)");
    assert_eq!(location.neighborhood, "Selected neighborhood");
    assert!((location.latitude - 9.1234).abs() < f64::EPSILON);
    assert!((location.longitude - -13.5678).abs() < f64::EPSILON);
}

#[tokio::test]
async fn reverse_geocode_miss_yields_placeholder() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geocode/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "status": "ZERO_RESULTS", "results": [] })),
        )
        .mount(&server)
        .await;

    let location = service(&server.uri(), Some("test-key"))
        .reverse_geocode(Coordinates::new(9.5, -13.7))
        .await;
    assert_eq!(location.address, "Selected address (9.5000, -13.7000)");
}

#[tokio::test]
async fn reverse_geocode_without_locality_gets_placeholder_neighborhood() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geocode/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "OK",
            "results": [{
                "formatted_address": "Route Le Prince, Conakry",
                "address_components": [{ "long_name": "Conakry", "types": ["locality"] }]
            }]
        })))
        .mount(&server)
        .await;

    let location = service(&server.uri(), Some("test-key"))
        .reverse_geocode(Coordinates::new(9.58, -13.62))
        .await;
    assert_eq!(location.address, "Route Le Prince, Conakry");
    assert_eq!(location.neighborhood, "Selected neighborhood");
}

#[tokio::test]
async fn debounced_search_over_service_hits_provider_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/place/textsearch/json"))
        .and(query_param("query", "abc"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "status": "ZERO_RESULTS" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let svc = Arc::new(service(&server.uri(), Some("test-key")));
    let mut debouncer = SearchDebouncer::new(svc, Duration::from_millis(50));
    let mut rx = debouncer.subscribe();

    debouncer.on_query_changed("a");
    debouncer.on_query_changed("ab");
    debouncer.on_query_changed("abc");

    tokio::time::timeout(Duration::from_secs(5), rx.changed())
        .await
        .expect("results within timeout")
        .expect("debouncer still open");
    assert_eq!(rx.borrow().query, "abc");
}

#[tokio::test]
async fn map_tap_under_outage_still_confirms_and_prices() {
    let server = denying_server().await;
    let svc = Arc::new(service(&server.uri(), Some("test-key")));
    let mut selection = SelectionState::new(svc);
    let merchant = Coordinates::new(9.5370, -13.6785);

    selection.select_map_point(9.5370, -13.7050).await;
    selection.update_landmark("En face de la station Total");

    let confirmed = selection.confirm().expect("placeholder location is confirmable");
    assert_eq!(confirmed.address, "Selected address (9.5370, -13.7050)");
    assert_eq!(confirmed.landmark.as_deref(), Some("En face de la station Total"));
    assert_eq!(
        selection.calculate_delivery_fee(merchant, Decimal::from(15_000)),
        Decimal::from(20_000)
    );
    assert_eq!(selection.estimated_delivery_time(merchant), "30-45 min");
    assert!(selection.is_delivery_available(merchant, 20.0));
}

#[tokio::test]
async fn config_wires_locale_radius_and_debounce() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/place/textsearch/json"))
        .and(query_param("query", "gbessia"))
        .and(query_param("location", "9.6412,-13.5784"))
        .and(query_param("radius", "12000"))
        .and(query_param("language", "fr"))
        .and(query_param("region", "gn"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "status": "ZERO_RESULTS" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server.uri());
    let svc = Arc::new(LocationService::from_config(&config).expect("service from config"));
    let mut debouncer = SearchDebouncer::from_config(svc, &config);
    let mut rx = debouncer.subscribe();

    debouncer.on_query_changed("gbessia");
    tokio::time::timeout(Duration::from_secs(5), rx.changed())
        .await
        .expect("results within timeout")
        .expect("debouncer still open");
    assert_eq!(rx.borrow().query, "gbessia");
    assert!(rx.borrow().places.is_empty());
}
