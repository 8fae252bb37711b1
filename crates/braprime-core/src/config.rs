use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Production endpoint of the places and geocoding provider.
pub const DEFAULT_MAPS_BASE_URL: &str = "https://maps.googleapis.com/maps/api/";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a plain
/// `HashMap` instead of `set_var`/`remove_var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_positive_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let value = or_default(var, default)
            .parse::<f64>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if value.is_finite() && value > 0.0 {
            Ok(value)
        } else {
            Err(invalid(var, format!("must be a positive number, got {value}")))
        }
    };

    let env = parse_environment(&or_default("BRAPRIME_ENV", "development"))?;
    let log_level = or_default("BRAPRIME_LOG_LEVEL", "info");

    let maps_api_key = lookup("GOOGLE_MAPS_API_KEY")
        .ok()
        .filter(|k| !k.trim().is_empty());
    let maps_base_url = or_default("BRAPRIME_MAPS_BASE_URL", DEFAULT_MAPS_BASE_URL);
    let maps_language = or_default("BRAPRIME_MAPS_LANGUAGE", "fr");
    let maps_region = or_default("BRAPRIME_MAPS_REGION", "gn");

    let request_timeout_secs = parse_u64("BRAPRIME_REQUEST_TIMEOUT_SECS", "10")?;
    let user_agent = or_default("BRAPRIME_USER_AGENT", "braprime/0.1 (location-selection)");

    let search_debounce_ms = parse_u64("BRAPRIME_SEARCH_DEBOUNCE_MS", "400")?;
    let search_radius_m = parse_u32("BRAPRIME_SEARCH_RADIUS_M", "20000")?;
    let max_delivery_distance_km = parse_positive_f64("BRAPRIME_MAX_DELIVERY_DISTANCE_KM", "20")?;

    Ok(AppConfig {
        env,
        log_level,
        maps_api_key,
        maps_base_url,
        maps_language,
        maps_region,
        request_timeout_secs,
        user_agent,
        search_debounce_ms,
        search_radius_m,
        max_delivery_distance_km,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "BRAPRIME_ENV".to_string(),
            reason: format!("expected development, test, or production; got {other:?}"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
