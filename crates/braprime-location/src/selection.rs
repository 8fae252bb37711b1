//! The delivery location chosen during one checkout flow.

use std::sync::Arc;

use braprime_core::{
    calculate_delivery_fee, delivery_quote, estimated_delivery_time, is_delivery_available,
    validate_location, Coordinates, DeliveryQuote, Location, LocationRejection, Place,
};
use rust_decimal::Decimal;

use crate::service::ReverseGeocode;

/// Holds the current selection: `None` is "unselected".
///
/// One instance per selection flow; it is mutated through `&mut self` by its
/// single owner and never shared. Map taps go through the injected
/// [`ReverseGeocode`].
pub struct SelectionState<G> {
    geocoder: Arc<G>,
    current: Option<Location>,
}

impl<G: ReverseGeocode> SelectionState<G> {
    #[must_use]
    pub fn new(geocoder: Arc<G>) -> Self {
        Self {
            geocoder,
            current: None,
        }
    }

    #[must_use]
    pub fn location(&self) -> Option<&Location> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.current.is_some()
    }

    /// Replaces the selection with `location` if it passes validation.
    ///
    /// # Errors
    ///
    /// Returns the [`LocationRejection`] reason and keeps the previous
    /// selection when `location` is not confirmable.
    pub fn select_location(&mut self, location: Location) -> Result<&Location, LocationRejection> {
        if let Err(reason) = validate_location(&location) {
            tracing::info!(%reason, address = %location.address, "location rejected");
            return Err(reason);
        }
        tracing::info!(
            address = %location.address,
            neighborhood = %location.neighborhood,
            "delivery location selected"
        );
        Ok(&*self.current.insert(location))
    }

    /// Selects a search result.
    ///
    /// # Errors
    ///
    /// Same as [`SelectionState::select_location`].
    pub fn select_place(&mut self, place: &Place) -> Result<&Location, LocationRejection> {
        self.select_location(Location::from(place))
    }

    /// Stores `location` as-is, without validation.
    pub fn set_selected_location(&mut self, location: Location) {
        self.current = Some(location);
    }

    /// Reverse-geocodes a map tap and stores the answer.
    ///
    /// The geocoder always answers (falling back to a placeholder address),
    /// so this never fails.
    pub async fn select_map_point(&mut self, latitude: f64, longitude: f64) -> &Location {
        let location = self
            .geocoder
            .reverse_geocode(Coordinates::new(latitude, longitude))
            .await;
        &*self.current.insert(location)
    }

    pub fn reset_location(&mut self) {
        self.current = None;
    }

    /// Replaces the landmark of the current selection. No-op when unselected.
    pub fn update_landmark(&mut self, landmark: &str) {
        if let Some(current) = &self.current {
            self.current = Some(current.with_landmark(landmark));
        }
    }

    /// Final check before checkout takes the location.
    ///
    /// # Errors
    ///
    /// [`LocationRejection::NoSelection`] when unselected, otherwise the
    /// validation failure of the stored location.
    pub fn confirm(&self) -> Result<Location, LocationRejection> {
        let location = self
            .current
            .as_ref()
            .ok_or(LocationRejection::NoSelection)?;
        validate_location(location)?;
        Ok(location.clone())
    }

    #[must_use]
    pub fn calculate_delivery_fee(&self, merchant: Coordinates, base_fee: Decimal) -> Decimal {
        calculate_delivery_fee(merchant, self.location(), base_fee)
    }

    #[must_use]
    pub fn estimated_delivery_time(&self, merchant: Coordinates) -> &'static str {
        estimated_delivery_time(merchant, self.location())
    }

    #[must_use]
    pub fn is_delivery_available(&self, merchant: Coordinates, max_distance_km: f64) -> bool {
        is_delivery_available(merchant, self.location(), max_distance_km)
    }

    #[must_use]
    pub fn delivery_quote(
        &self,
        merchant: Coordinates,
        base_fee: Decimal,
        max_distance_km: f64,
    ) -> Option<DeliveryQuote> {
        delivery_quote(merchant, self.location(), base_fee, max_distance_km)
    }
}

#[cfg(test)]
#[path = "selection_test.rs"]
mod tests;
