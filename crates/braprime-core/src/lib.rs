//! Core domain for BraPrime delivery-location selection.
//!
//! Holds the location types, the confirmation rules, the distance-tiered
//! delivery estimator, the offline fallback policy, and configuration
//! loading. Nothing in this crate touches the network.

pub mod app_config;
pub mod config;
pub mod delivery;
pub mod error;
pub mod fallback;
pub mod location;
pub mod validate;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env, DEFAULT_MAPS_BASE_URL};
pub use delivery::{
    calculate_delivery_fee, delivery_quote, estimated_delivery_time, haversine_km,
    is_delivery_available, DeliveryQuote, DistanceTier, DEFAULT_ETA,
    DEFAULT_MAX_DELIVERY_DISTANCE_KM,
};
pub use error::{ConfigError, LocationRejection};
pub use fallback::{is_usable_api_key, FallbackPolicy};
pub use location::{Coordinates, Location, Place};
pub use validate::{is_valid_location, validate_location};
