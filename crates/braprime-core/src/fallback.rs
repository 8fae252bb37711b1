//! Offline answers used whenever the maps provider cannot be reached.
//!
//! Search and reverse geocoding share one [`FallbackPolicy`] so the gazetteer
//! and placeholder wording live in a single place.

use std::sync::LazyLock;

use regex::Regex;

use crate::location::{Coordinates, Location, Place};

/// Matches template values left in `.env` files (`YOUR_API_KEY`,
/// `<api-key>`, `placeholder`, `changeme`, `xxx...`).
static PLACEHOLDER_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(your[_-]|<)|placeholder|changeme|^x{3,}$")
        .expect("valid placeholder key regex")
});

/// Returns `true` if `key` looks like a real provider credential.
///
/// Missing, blank, and template keys are rejected so callers can go straight
/// to the fallback without a doomed round trip.
#[must_use]
pub fn is_usable_api_key(key: Option<&str>) -> bool {
    match key.map(str::trim) {
        None | Some("") => false,
        Some(k) => !PLACEHOLDER_KEY.is_match(k),
    }
}

/// `(id, name, address, latitude, longitude, types)`
type GazetteerEntry = (
    &'static str,
    &'static str,
    &'static str,
    f64,
    f64,
    &'static [&'static str],
);

const CONAKRY_GAZETTEER: &[GazetteerEntry] = &[
    (
        "local-kaloum",
        "Centre-ville Kaloum",
        "Kaloum, Conakry",
        9.509_2,
        -13.712_2,
        &["sublocality"],
    ),
    (
        "local-marche-madina",
        "Marché Madina",
        "Madina, Dixinn, Conakry",
        9.544_7,
        -13.673_1,
        &["market"],
    ),
    (
        "local-marche-niger",
        "Marché Niger",
        "Niger, Kaloum, Conakry",
        9.520_0,
        -13.698_0,
        &["market"],
    ),
    (
        "local-aeroport-gbessia",
        "Aéroport International de Conakry-Gbessia",
        "Gbessia, Matoto, Conakry",
        9.576_9,
        -13.612_0,
        &["airport"],
    ),
    (
        "local-universite-gamal",
        "Université Gamal Abdel Nasser",
        "Dixinn, Conakry",
        9.542_2,
        -13.678_6,
        &["university"],
    ),
    (
        "local-stade-28-septembre",
        "Stade du 28 Septembre",
        "Dixinn, Conakry",
        9.534_6,
        -13.679_0,
        &["stadium"],
    ),
    (
        "local-mosquee-faycal",
        "Grande Mosquée Fayçal",
        "Camayenne, Dixinn, Conakry",
        9.534_1,
        -13.683_3,
        &["place_of_worship"],
    ),
    (
        "local-palais-du-peuple",
        "Palais du Peuple",
        "Boulbinet, Kaloum, Conakry",
        9.514_1,
        -13.706_9,
        &["point_of_interest"],
    ),
    (
        "local-hopital-ignace-deen",
        "Hôpital Ignace Deen",
        "Kaloum, Conakry",
        9.511_1,
        -13.711_7,
        &["hospital"],
    ),
    (
        "local-kipe",
        "Kipé Centre Émetteur",
        "Kipé, Ratoma, Conakry",
        9.600_0,
        -13.650_0,
        &["sublocality"],
    ),
];

/// Deterministic data substituted for provider answers.
#[derive(Debug, Clone)]
pub struct FallbackPolicy {
    gazetteer: Vec<Place>,
    address_label: String,
    neighborhood_label: String,
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        Self::new(
            conakry_gazetteer(),
            "Selected address",
            "Selected neighborhood",
        )
    }
}

impl FallbackPolicy {
    #[must_use]
    pub fn new(
        gazetteer: Vec<Place>,
        address_label: impl Into<String>,
        neighborhood_label: impl Into<String>,
    ) -> Self {
        Self {
            gazetteer,
            address_label: address_label.into(),
            neighborhood_label: neighborhood_label.into(),
        }
    }

    #[must_use]
    pub fn gazetteer(&self) -> &[Place] {
        &self.gazetteer
    }

    /// Label used when a reverse-geocode result has no locality component.
    #[must_use]
    pub fn neighborhood_label(&self) -> &str {
        &self.neighborhood_label
    }

    /// Gazetteer entries whose name or address contains `query`,
    /// case-insensitively, in gazetteer order. Blank queries match nothing.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<Place> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        let hits: Vec<Place> = self
            .gazetteer
            .iter()
            .filter(|place| {
                place.name.to_lowercase().contains(&needle)
                    || place.address.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();
        tracing::debug!(query = %needle, count = hits.len(), "served gazetteer matches");
        hits
    }

    /// Placeholder location embedding the coordinates rounded to 4 decimals,
    /// e.g. `"Selected address (9.1234, -13.5678)"`.
    #[must_use]
    pub fn placeholder_location(&self, coordinates: Coordinates) -> Location {
        tracing::debug!(%coordinates, "served placeholder location");
        Location::new(
            format!("{} ({coordinates})", self.address_label),
            coordinates,
            self.neighborhood_label.clone(),
        )
    }
}

/// Well-known Conakry places served when the provider is unavailable.
#[must_use]
pub fn conakry_gazetteer() -> Vec<Place> {
    CONAKRY_GAZETTEER
        .iter()
        .map(|&(id, name, address, latitude, longitude, types)| Place {
            id: id.to_owned(),
            name: name.to_owned(),
            address: address.to_owned(),
            latitude,
            longitude,
            types: types.iter().map(|t| (*t).to_owned()).collect(),
        })
        .collect()
}
