//! Distance-tiered delivery fee and ETA estimation.
//!
//! Every function takes the merchant coordinate and the current selection and
//! recomputes from scratch: the merchant varies by call site, so nothing here
//! is cached.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::location::{Coordinates, Location};

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Radius beyond which merchants do not deliver.
pub const DEFAULT_MAX_DELIVERY_DISTANCE_KM: f64 = 20.0;

/// ETA shown when no delivery location has been chosen yet.
pub const DEFAULT_ETA: &str = "30-45 min";

/// Great-circle distance between two points in kilometres (haversine).
#[must_use]
pub fn haversine_km(from: Coordinates, to: Coordinates) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_lng = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    // Rounding can push `a` past 1 for near-antipodal points.
    let c = 2.0 * a.min(1.0).sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Distance bracket used to pick a fee surcharge and an ETA bucket.
///
/// Upper bounds are inclusive: exactly 2 km is still [`DistanceTier::Near`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceTier {
    /// Up to 2 km.
    Near,
    /// Up to 5 km.
    Short,
    /// Up to 10 km.
    Medium,
    /// Beyond 10 km.
    Far,
}

impl DistanceTier {
    #[must_use]
    pub fn from_km(distance_km: f64) -> Self {
        if distance_km <= 2.0 {
            Self::Near
        } else if distance_km <= 5.0 {
            Self::Short
        } else if distance_km <= 10.0 {
            Self::Medium
        } else {
            Self::Far
        }
    }

    /// Amount added to the merchant's base fee, in GNF.
    #[must_use]
    pub fn surcharge(self) -> Decimal {
        let gnf: i64 = match self {
            Self::Near => 0,
            Self::Short => 5_000,
            Self::Medium => 10_000,
            Self::Far => 15_000,
        };
        Decimal::from(gnf)
    }

    #[must_use]
    pub fn eta(self) -> &'static str {
        match self {
            Self::Near => "20-30 min",
            Self::Short => "30-45 min",
            Self::Medium => "45-60 min",
            Self::Far => "60-90 min",
        }
    }
}

fn distance_to(merchant: Coordinates, selected: Option<&Location>) -> Option<f64> {
    selected.map(|loc| haversine_km(merchant, loc.coordinates()))
}

/// Delivery fee for the current selection.
///
/// Returns `base_fee` unchanged when nothing is selected.
#[must_use]
pub fn calculate_delivery_fee(
    merchant: Coordinates,
    selected: Option<&Location>,
    base_fee: Decimal,
) -> Decimal {
    match distance_to(merchant, selected) {
        Some(km) => base_fee + DistanceTier::from_km(km).surcharge(),
        None => base_fee,
    }
}

/// Human-readable ETA range such as `"30-45 min"`.
#[must_use]
pub fn estimated_delivery_time(merchant: Coordinates, selected: Option<&Location>) -> &'static str {
    distance_to(merchant, selected).map_or(DEFAULT_ETA, |km| DistanceTier::from_km(km).eta())
}

/// Whether the selection lies within `max_distance_km` of the merchant.
///
/// Always `false` when nothing is selected.
#[must_use]
pub fn is_delivery_available(
    merchant: Coordinates,
    selected: Option<&Location>,
    max_distance_km: f64,
) -> bool {
    distance_to(merchant, selected).is_some_and(|km| km <= max_distance_km)
}

/// Everything checkout shows about a delivery, computed in one pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeliveryQuote {
    pub distance_km: f64,
    pub tier: DistanceTier,
    pub fee: Decimal,
    pub eta: &'static str,
    pub available: bool,
}

/// Builds a [`DeliveryQuote`], or `None` when nothing is selected.
#[must_use]
pub fn delivery_quote(
    merchant: Coordinates,
    selected: Option<&Location>,
    base_fee: Decimal,
    max_distance_km: f64,
) -> Option<DeliveryQuote> {
    let distance_km = distance_to(merchant, selected)?;
    let tier = DistanceTier::from_km(distance_km);
    Some(DeliveryQuote {
        distance_km,
        tier,
        fee: base_fee + tier.surcharge(),
        eta: tier.eta(),
        available: distance_km <= max_distance_km,
    })
}

#[cfg(test)]
#[path = "delivery_test.rs"]
mod tests;
