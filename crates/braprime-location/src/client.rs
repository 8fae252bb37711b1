//! HTTP client for the maps provider's place search and reverse geocoding.
//!
//! Wraps `reqwest` with API key handling, percent-encoded query building, and
//! typed response decoding. Every endpoint checks the `"status"` field of the
//! JSON envelope and surfaces provider-level failures as
//! [`GeoError::ProviderStatus`].

use std::time::Duration;

use braprime_core::{
    is_usable_api_key, AppConfig, Coordinates, Location, Place, DEFAULT_MAPS_BASE_URL,
};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::GeoError;
use crate::types::{GeocodeResponse, TextSearchResponse, STATUS_OK, STATUS_ZERO_RESULTS};

const DEFAULT_USER_AGENT: &str = "braprime/0.1 (location-selection)";

const TEXT_SEARCH_PATH: &str = "place/textsearch/json";
const REVERSE_GEOCODE_PATH: &str = "geocode/json";

/// Client for the places text-search and reverse-geocoding endpoints.
///
/// Use [`MapsClient::from_config`] in applications, or
/// [`MapsClient::with_base_url`] to point at a mock server in tests.
pub struct MapsClient {
    client: Client,
    api_key: Option<String>,
    base_url: Url,
    language: Option<String>,
    region: Option<String>,
}

impl MapsClient {
    /// Creates a client pointed at the production provider.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed.
    pub fn new(api_key: Option<&str>, timeout_secs: u64) -> Result<Self, GeoError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_MAPS_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`GeoError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn with_base_url(
        api_key: Option<&str>,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, GeoError> {
        Self::build(api_key, timeout_secs, base_url, DEFAULT_USER_AGENT)
    }

    /// Creates a client from application config, including locale hints.
    ///
    /// # Errors
    ///
    /// Same as [`MapsClient::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, GeoError> {
        let client = Self::build(
            config.maps_api_key.as_deref(),
            config.request_timeout_secs,
            &config.maps_base_url,
            &config.user_agent,
        )?;
        Ok(client.with_locale(
            Some(config.maps_language.as_str()),
            Some(config.maps_region.as_str()),
        ))
    }

    fn build(
        api_key: Option<&str>,
        timeout_secs: u64,
        base_url: &str,
        user_agent: &str,
    ) -> Result<Self, GeoError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so endpoint paths join under the base
        // path instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| GeoError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.map(str::to_owned),
            base_url: parsed,
            language: None,
            region: None,
        })
    }

    /// Sets the `language` and `region` hints sent with every request.
    /// Blank values are omitted.
    #[must_use]
    pub fn with_locale(mut self, language: Option<&str>, region: Option<&str>) -> Self {
        let non_blank = |v: Option<&str>| v.map(str::trim).filter(|s| !s.is_empty()).map(str::to_owned);
        self.language = non_blank(language);
        self.region = non_blank(region);
        self
    }

    /// Whether a request could possibly succeed. `false` means every call
    /// returns [`GeoError::MissingApiKey`] without touching the network.
    #[must_use]
    pub fn has_usable_key(&self) -> bool {
        is_usable_api_key(self.api_key.as_deref())
    }

    /// Free-text place search, optionally biased toward `bias` within
    /// `radius_m` metres.
    ///
    /// `ZERO_RESULTS` is an empty `Ok`.
    ///
    /// # Errors
    ///
    /// - [`GeoError::MissingApiKey`] if no usable key is configured.
    /// - [`GeoError::ProviderStatus`] if the provider reports an error status.
    /// - [`GeoError::Http`] on network failure, timeout, or non-2xx status.
    /// - [`GeoError::Deserialize`] if the response does not match the expected shape.
    pub async fn text_search(
        &self,
        query: &str,
        bias: Option<Coordinates>,
        radius_m: u32,
    ) -> Result<Vec<Place>, GeoError> {
        let mut params = vec![("query", query.to_owned())];
        if let Some(center) = bias {
            params.push((
                "location",
                format!("{},{}", center.latitude, center.longitude),
            ));
            params.push(("radius", radius_m.to_string()));
        }
        if let Some(region) = &self.region {
            params.push(("region", region.clone()));
        }

        let response: TextSearchResponse = self
            .get_envelope(TEXT_SEARCH_PATH, &params, &format!("textsearch(query={query})"))
            .await?;
        let places: Vec<Place> = response.results.into_iter().map(Place::from).collect();
        tracing::debug!(query, count = places.len(), "place search answered");
        Ok(places)
    }

    /// Reverse-geocodes `coordinates` into a formatted address.
    ///
    /// Returns `Ok(None)` when the provider has no address for the point.
    /// The returned location's `neighborhood` may be empty.
    ///
    /// # Errors
    ///
    /// Same as [`MapsClient::text_search`].
    pub async fn reverse_geocode(
        &self,
        coordinates: Coordinates,
    ) -> Result<Option<Location>, GeoError> {
        let latlng = format!("{},{}", coordinates.latitude, coordinates.longitude);
        let params = vec![("latlng", latlng.clone())];
        let response: GeocodeResponse = self
            .get_envelope(
                REVERSE_GEOCODE_PATH,
                &params,
                &format!("reverse_geocode(latlng={latlng})"),
            )
            .await?;
        Ok(response.into_location(coordinates))
    }

    /// Sends the request, checks the envelope status, and decodes the body.
    async fn get_envelope<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
        context: &str,
    ) -> Result<T, GeoError> {
        let api_key = match self.api_key.as_deref() {
            Some(key) if is_usable_api_key(Some(key)) => key,
            _ => return Err(GeoError::MissingApiKey),
        };
        let url = self.build_url(path, api_key, params)?;
        let body = self.request_json(&url).await?;
        Self::check_status(&body)?;
        serde_json::from_value(body).map_err(|e| GeoError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }

    /// Builds the full request URL with percent-encoded query parameters.
    ///
    /// The key goes first, then the endpoint parameters, then `language`.
    fn build_url(
        &self,
        path: &str,
        api_key: &str,
        params: &[(&str, String)],
    ) -> Result<Url, GeoError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| GeoError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("key", api_key);
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
            if let Some(language) = &self.language {
                pairs.append_pair("language", language);
            }
        }
        Ok(url)
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the body as JSON.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, GeoError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| GeoError::Deserialize {
            // The URL carries the API key; report only the path.
            context: url.path().to_owned(),
            source: e,
        })
    }

    /// Accepts `OK` and `ZERO_RESULTS`; anything else is a provider error.
    fn check_status(body: &serde_json::Value) -> Result<(), GeoError> {
        let status = body
            .get("status")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("MISSING_STATUS");
        if status == STATUS_OK || status == STATUS_ZERO_RESULTS {
            return Ok(());
        }
        let message = body
            .get("error_message")
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned);
        Err(GeoError::ProviderStatus {
            status: status.to_owned(),
            message,
        })
    }
}
