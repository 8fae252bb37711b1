//! Delivery-location selection for BraPrime.
//!
//! [`MapsClient`] talks to the places and reverse-geocoding provider.
//! [`LocationService`] wraps it with the offline [`FallbackPolicy`] so search
//! and reverse geocoding always produce something usable. On top of that sit
//! the [`SearchDebouncer`] for type-ahead search and the [`SelectionState`]
//! that owns the chosen location for one checkout flow.
//!
//! [`FallbackPolicy`]: braprime_core::FallbackPolicy

pub mod client;
pub mod debounce;
pub mod error;
pub mod selection;
pub mod service;
pub mod types;

pub use client::MapsClient;
pub use debounce::{SearchDebouncer, SearchResults};
pub use error::GeoError;
pub use selection::SelectionState;
pub use service::{LocationService, PlaceSearch, ReverseGeocode};
