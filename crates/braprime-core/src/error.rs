use thiserror::Error;

/// Errors raised while loading [`crate::AppConfig`] from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Why a location cannot be confirmed.
///
/// The `Display` text is the user-facing rejection reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LocationRejection {
    #[error("address required")]
    AddressRequired,

    #[error("neighborhood required")]
    NeighborhoodRequired,

    #[error("invalid coordinates")]
    InvalidCoordinates,

    #[error("no location selected")]
    NoSelection,
}
