//! Provider lookups with offline fallback.

use std::future::Future;

use braprime_core::{AppConfig, Coordinates, FallbackPolicy, Location, Place};

use crate::client::MapsClient;
use crate::error::GeoError;

const DEFAULT_SEARCH_RADIUS_M: u32 = 20_000;

/// Anything that can answer a free-text place search.
///
/// Implementations must not fail: provider problems are absorbed into a
/// (possibly empty) answer.
pub trait PlaceSearch: Send + Sync {
    fn search_places(
        &self,
        query: &str,
        bias: Option<Coordinates>,
    ) -> impl Future<Output = Vec<Place>> + Send;
}

/// Anything that can turn a map point into a usable [`Location`].
pub trait ReverseGeocode: Send + Sync {
    fn reverse_geocode(&self, coordinates: Coordinates) -> impl Future<Output = Location> + Send;
}

/// Place search and reverse geocoding that always answer.
///
/// Tries the live provider through [`MapsClient`] and substitutes the
/// [`FallbackPolicy`] on any [`GeoError`]. Build one per app from config and
/// share it behind an `Arc`.
pub struct LocationService {
    client: MapsClient,
    fallback: FallbackPolicy,
    search_radius_m: u32,
    default_bias: Option<Coordinates>,
}

impl LocationService {
    #[must_use]
    pub fn new(client: MapsClient, fallback: FallbackPolicy) -> Self {
        Self {
            client,
            fallback,
            search_radius_m: DEFAULT_SEARCH_RADIUS_M,
            default_bias: None,
        }
    }

    /// Service with the Conakry gazetteer, a Conakry-centred default bias,
    /// and the configured search radius.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError`] if the HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, GeoError> {
        let client = MapsClient::from_config(config)?;
        if !client.has_usable_key() {
            tracing::warn!("no usable maps API key configured; serving offline fallback data");
        }
        Ok(Self::new(client, FallbackPolicy::default())
            .with_search_radius(config.search_radius_m)
            .with_default_bias(Some(Coordinates::CONAKRY)))
    }

    #[must_use]
    pub fn with_search_radius(mut self, radius_m: u32) -> Self {
        self.search_radius_m = radius_m;
        self
    }

    /// Bias applied when a search call does not supply one.
    #[must_use]
    pub fn with_default_bias(mut self, bias: Option<Coordinates>) -> Self {
        self.default_bias = bias;
        self
    }

    #[must_use]
    pub fn fallback(&self) -> &FallbackPolicy {
        &self.fallback
    }
}

impl PlaceSearch for LocationService {
    /// Blank queries return nothing without a request. Provider failures
    /// fall back to the gazetteer filtered by `query`.
    async fn search_places(&self, query: &str, bias: Option<Coordinates>) -> Vec<Place> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        let bias = bias.or(self.default_bias);
        match self
            .client
            .text_search(query, bias, self.search_radius_m)
            .await
        {
            Ok(places) => places,
            Err(e) => {
                let places = self.fallback.search(query);
                tracing::warn!(
                    query,
                    error = %e,
                    fallback_count = places.len(),
                    "place search failed; using local gazetteer"
                );
                places
            }
        }
    }
}

impl ReverseGeocode for LocationService {
    /// Provider misses and failures both yield the placeholder location.
    /// A provider address without a locality gets the placeholder
    /// neighborhood so it stays confirmable.
    async fn reverse_geocode(&self, coordinates: Coordinates) -> Location {
        match self.client.reverse_geocode(coordinates).await {
            Ok(Some(mut location)) => {
                if location.neighborhood.trim().is_empty() {
                    location.neighborhood = self.fallback.neighborhood_label().to_owned();
                }
                location
            }
            Ok(None) => {
                tracing::debug!(%coordinates, "no address for point; using placeholder");
                self.fallback.placeholder_location(coordinates)
            }
            Err(e) => {
                tracing::warn!(
                    %coordinates,
                    error = %e,
                    "reverse geocode failed; using placeholder"
                );
                self.fallback.placeholder_location(coordinates)
            }
        }
    }
}
