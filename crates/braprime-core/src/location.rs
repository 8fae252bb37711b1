//! Location types shared by search, reverse geocoding, and checkout.

use serde::{Deserialize, Serialize};

/// A WGS84 latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Conakry city centre. Default bias for place searches.
    pub const CONAKRY: Coordinates = Coordinates {
        latitude: 9.641_2,
        longitude: -13.578_4,
    };

    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// `(0, 0)` is treated as "never set".
    ///
    /// This is the only place the zero sentinel is interpreted; swap it here
    /// if real deliveries ever land on the Gulf of Guinea null island.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_unset(&self) -> bool {
        self.latitude == 0.0 && self.longitude == 0.0
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// A place search candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Provider identifier, stable for a given provider result.
    pub id: String,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Provider category tags (`restaurant`, `market`, ...). Informational only.
    #[serde(default)]
    pub types: Vec<String>,
}

impl Place {
    #[must_use]
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    /// Best-effort neighborhood for a search hit.
    ///
    /// Addresses are formatted most-specific first, ending with the city, so
    /// the segment before the city is the commune or quartier
    /// (`"Madina, Dixinn, Conakry"` yields `"Dixinn"`). Single-segment
    /// addresses fall back to the place name.
    #[must_use]
    pub fn neighborhood(&self) -> String {
        let segments: Vec<&str> = self
            .address
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        if segments.len() >= 2 {
            segments[segments.len() - 2].to_owned()
        } else {
            self.name.trim().to_owned()
        }
    }
}

/// A delivery location, either in progress or confirmed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub neighborhood: String,
    /// Free-text hint for the courier ("behind the pharmacy").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landmark: Option<String>,
}

impl Location {
    #[must_use]
    pub fn new(
        address: impl Into<String>,
        coordinates: Coordinates,
        neighborhood: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
            neighborhood: neighborhood.into(),
            landmark: None,
        }
    }

    #[must_use]
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    /// Returns a copy with `landmark` replaced. Blank text clears it.
    #[must_use]
    pub fn with_landmark(&self, landmark: &str) -> Self {
        let trimmed = landmark.trim();
        Self {
            landmark: (!trimmed.is_empty()).then(|| trimmed.to_owned()),
            ..self.clone()
        }
    }
}

impl From<&Place> for Location {
    fn from(place: &Place) -> Self {
        let address = if place.address.trim().is_empty() {
            place.name.clone()
        } else {
            place.address.clone()
        };
        Location::new(address, place.coordinates(), place.neighborhood())
    }
}
