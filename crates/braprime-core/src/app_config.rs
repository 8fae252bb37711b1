#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub maps_api_key: Option<String>,
    pub maps_base_url: String,
    pub maps_language: String,
    pub maps_region: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub search_debounce_ms: u64,
    pub search_radius_m: u32,
    pub max_delivery_distance_km: f64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field(
                "maps_api_key",
                &self.maps_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("maps_base_url", &self.maps_base_url)
            .field("maps_language", &self.maps_language)
            .field("maps_region", &self.maps_region)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("search_debounce_ms", &self.search_debounce_ms)
            .field("search_radius_m", &self.search_radius_m)
            .field("max_delivery_distance_km", &self.max_delivery_distance_km)
            .finish()
    }
}
