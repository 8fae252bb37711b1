//! Confirmation rules for a delivery location.

use crate::error::LocationRejection;
use crate::location::Location;

/// Checks that `location` can be confirmed for delivery.
///
/// Rules run in order and the first failure is reported:
///
/// 1. `address` must contain a non-whitespace character.
/// 2. `neighborhood` must contain a non-whitespace character.
/// 3. Coordinates must not be the `(0, 0)` "unset" pair.
///
/// # Errors
///
/// Returns the [`LocationRejection`] for the first rule that fails.
pub fn validate_location(location: &Location) -> Result<(), LocationRejection> {
    if location.address.trim().is_empty() {
        return Err(LocationRejection::AddressRequired);
    }
    if location.neighborhood.trim().is_empty() {
        return Err(LocationRejection::NeighborhoodRequired);
    }
    if location.coordinates().is_unset() {
        return Err(LocationRejection::InvalidCoordinates);
    }
    Ok(())
}

#[must_use]
pub fn is_valid_location(location: &Location) -> bool {
    validate_location(location).is_ok()
}
