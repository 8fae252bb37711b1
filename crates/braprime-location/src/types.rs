//! Wire types for the maps provider's JSON responses.
//!
//! Only the fields the location flow reads are modelled; everything else in
//! the payload is ignored.

use braprime_core::{Coordinates, Location, Place};
use serde::Deserialize;

/// Provider status meaning "the request was fine, nothing matched".
pub const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";
pub const STATUS_OK: &str = "OK";

/// Address component types tried in order when picking a neighborhood.
const NEIGHBORHOOD_TYPES: &[&str] = &[
    "sublocality",
    "sublocality_level_1",
    "neighborhood",
    "administrative_area_level_3",
];

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

/// `place/textsearch/json` response body.
#[derive(Debug, Deserialize)]
pub struct TextSearchResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<TextSearchResult>,
}

#[derive(Debug, Deserialize)]
pub struct TextSearchResult {
    pub place_id: String,
    pub name: String,
    #[serde(default)]
    pub formatted_address: Option<String>,
    pub geometry: Geometry,
    #[serde(default)]
    pub types: Vec<String>,
}

impl From<TextSearchResult> for Place {
    fn from(result: TextSearchResult) -> Self {
        let mut types: Vec<String> = Vec::with_capacity(result.types.len());
        for t in result.types {
            if !types.contains(&t) {
                types.push(t);
            }
        }
        Place {
            id: result.place_id,
            address: result.formatted_address.unwrap_or_default(),
            name: result.name,
            latitude: result.geometry.location.lat,
            longitude: result.geometry.location.lng,
            types,
        }
    }
}

/// `geocode/json` (reverse) response body.
#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    pub formatted_address: String,
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
}

#[derive(Debug, Deserialize)]
pub struct AddressComponent {
    pub long_name: String,
    #[serde(default)]
    pub types: Vec<String>,
}

impl GeocodeResponse {
    /// Converts the best match into a [`Location`] pinned to `tapped`.
    ///
    /// The tapped point is kept rather than the result's geometry so the pin
    /// does not jump. `neighborhood` is empty when no locality-level component
    /// exists in any result; callers decide what to put there.
    #[must_use]
    pub fn into_location(self, tapped: Coordinates) -> Option<Location> {
        let neighborhood = neighborhood_from_results(&self.results).unwrap_or_default();
        let best = self.results.into_iter().next()?;
        Some(Location::new(best.formatted_address, tapped, neighborhood))
    }
}

/// First component matching [`NEIGHBORHOOD_TYPES`], by type priority, across
/// all results (the top result often lacks a sublocality that the next one has).
fn neighborhood_from_results(results: &[GeocodeResult]) -> Option<String> {
    NEIGHBORHOOD_TYPES.iter().find_map(|wanted| {
        results
            .iter()
            .flat_map(|r| r.address_components.iter())
            .find(|c| c.types.iter().any(|t| t == wanted) && !c.long_name.trim().is_empty())
            .map(|c| c.long_name.trim().to_owned())
    })
}
