//! Integration tests for `MapsClient` using wiremock HTTP mocks.

use braprime_core::Coordinates;
use braprime_location::{GeoError, MapsClient};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> MapsClient {
    MapsClient::with_base_url(Some("test-key"), 5, base_url)
        .expect("client construction should not fail")
}

#[tokio::test]
async fn text_search_returns_parsed_places() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": "OK",
        "results": [
            {
                "place_id": "ChIJmadina",
                "name": "Marché Madina",
                "formatted_address": "Madina, Dixinn, Conakry, Guinée",
                "geometry": { "location": { "lat": 9.5447, "lng": -13.6731 } },
                "types": ["market", "point_of_interest"]
            },
            {
                "place_id": "ChIJniger",
                "name": "Marché Niger",
                "formatted_address": "Kaloum, Conakry, Guinée",
                "geometry": { "location": { "lat": 9.52, "lng": -13.698 } },
                "types": ["market"]
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/place/textsearch/json"))
        .and(query_param("key", "test-key"))
        .and(query_param("query", "marché"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let places = client
        .text_search("marché", None, 20_000)
        .await
        .expect("should parse places");

    assert_eq!(places.len(), 2);
    assert_eq!(places[0].id, "ChIJmadina");
    assert_eq!(places[0].name, "Marché Madina");
    assert_eq!(places[0].types, ["market", "point_of_interest"]);
    assert_eq!(places[1].address, "Kaloum, Conakry, Guinée");
}

#[tokio::test]
async fn text_search_sends_bias_and_locale() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/place/textsearch/json"))
        .and(query_param("location", "9.5,-13.7"))
        .and(query_param("radius", "5000"))
        .and(query_param("region", "gn"))
        .and(query_param("language", "fr"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "status": "ZERO_RESULTS", "results": [] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri()).with_locale(Some("fr"), Some("gn"));
    let places = client
        .text_search("pharmacie", Some(Coordinates::new(9.5, -13.7)), 5000)
        .await
        .expect("zero results is not an error");
    assert!(places.is_empty());
}

#[tokio::test]
async fn text_search_surfaces_provider_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/place/textsearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "REQUEST_DENIED",
            "error_message": "This API project is not authorized to use this API."
        })))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .text_search("kaloum", None, 20_000)
        .await
        .unwrap_err();
    assert!(
        matches!(err, GeoError::ProviderStatus { ref status, .. } if status == "REQUEST_DENIED"),
        "got {err:?}"
    );
}

#[tokio::test]
async fn text_search_maps_http_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .text_search("kaloum", None, 20_000)
        .await
        .unwrap_err();
    assert!(matches!(err, GeoError::Http(_)), "got {err:?}");
}

#[tokio::test]
async fn http_failure_does_not_expose_api_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let key = "AIzaSyDistinctiveTestKey42";
    let client = MapsClient::with_base_url(Some(key), 5, &server.uri())
        .expect("client construction should not fail");

    let search_err = client.text_search("kaloum", None, 20_000).await.unwrap_err();
    let reverse_err = client
        .reverse_geocode(Coordinates::new(9.5, -13.7))
        .await
        .unwrap_err();

    for err in [search_err, reverse_err] {
        assert!(matches!(err, GeoError::Http(_)), "got {err:?}");
        assert!(!err.to_string().contains(key), "key in Display: {err}");
        assert!(!format!("{err:?}").contains(key), "key in Debug: {err:?}");
    }
}

#[tokio::test]
async fn connection_failure_does_not_expose_api_key() {
    let key = "AIzaSyDistinctiveTestKey42";
    // Nothing listens on the discard port.
    let client = MapsClient::with_base_url(Some(key), 5, "http://127.0.0.1:9")
        .expect("client construction should not fail");

    let err = client.text_search("kaloum", None, 20_000).await.unwrap_err();
    assert!(matches!(err, GeoError::Http(_)), "got {err:?}");
    assert!(!err.to_string().contains(key), "key in Display: {err}");
}

#[tokio::test]
async fn text_search_rejects_malformed_payload() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "OK",
            "results": [{ "name": "no id or geometry" }]
        })))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .text_search("kaloum", None, 20_000)
        .await
        .unwrap_err();
    assert!(matches!(err, GeoError::Deserialize { .. }), "got {err:?}");
}

#[tokio::test]
async fn missing_key_never_reaches_the_network() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = MapsClient::with_base_url(Some("YOUR_GOOGLE_MAPS_API_KEY"), 5, &server.uri())
        .expect("client construction should not fail");
    let search = client.text_search("kaloum", None, 20_000).await;
    let reverse = client.reverse_geocode(Coordinates::new(9.5, -13.7)).await;

    assert!(matches!(search, Err(GeoError::MissingApiKey)));
    assert!(matches!(reverse, Err(GeoError::MissingApiKey)));
}

#[tokio::test]
async fn reverse_geocode_returns_address_and_neighborhood() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": "OK",
        "results": [{
            "formatted_address": "Avenue de la République, Conakry, Guinée",
            "address_components": [
                { "long_name": "Avenue de la République", "types": ["route"] },
                { "long_name": "Kaloum", "types": ["sublocality_level_1", "sublocality", "political"] },
                { "long_name": "Conakry", "types": ["locality", "political"] }
            ]
        }]
    });

    Mock::given(method("GET"))
        .and(path("/geocode/json"))
        .and(query_param("latlng", "9.5092,-13.7122"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let location = test_client(&server.uri())
        .reverse_geocode(Coordinates::new(9.5092, -13.7122))
        .await
        .expect("request should succeed")
        .expect("provider has an address");

    assert_eq!(location.address, "Avenue de la République, Conakry, Guinée");
    assert_eq!(location.neighborhood, "Kaloum");
    assert!((location.latitude - 9.5092).abs() < f64::EPSILON);
    assert!(location.landmark.is_none());
}

#[tokio::test]
async fn reverse_geocode_zero_results_is_a_miss() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocode/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "status": "ZERO_RESULTS", "results": [] })),
        )
        .mount(&server)
        .await;

    let result = test_client(&server.uri())
        .reverse_geocode(Coordinates::new(9.0, -14.5))
        .await
        .expect("zero results is not an error");
    assert!(result.is_none());
}

#[tokio::test]
async fn base_url_path_prefix_is_preserved() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/geocode/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "status": "ZERO_RESULTS" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let base = format!("{}/maps/api", server.uri());
    let result = test_client(&base)
        .reverse_geocode(Coordinates::new(9.5, -13.7))
        .await
        .expect("request should succeed");
    assert!(result.is_none());
}
