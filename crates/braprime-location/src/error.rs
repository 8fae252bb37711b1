use thiserror::Error;

/// Errors returned by the maps provider client.
///
/// [`crate::LocationService`] turns every one of these into a fallback answer;
/// they only surface to callers that use [`crate::MapsClient`] directly.
#[derive(Debug, Error)]
pub enum GeoError {
    /// Network, TLS, timeout, or non-2xx failure from the underlying HTTP client.
    ///
    /// The request URL is stripped on conversion because it carries the API key.
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    /// No API key configured, or the configured key is a template value.
    #[error("maps API key is missing or a placeholder")]
    MissingApiKey,

    /// The provider answered with a status other than `OK` / `ZERO_RESULTS`.
    #[error("maps provider returned {status}: {}", .message.as_deref().unwrap_or("no error message"))]
    ProviderStatus {
        status: String,
        message: Option<String>,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid maps base URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl From<reqwest::Error> for GeoError {
    fn from(e: reqwest::Error) -> Self {
        GeoError::Http(e.without_url())
    }
}
