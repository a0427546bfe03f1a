use crate::location::LocationCode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeoConfig {
    /// MaxMind country database path.
    #[serde(default = "default_database")]
    pub database: String,

    /// Location substituted whenever geolocation fails.
    #[serde(default = "default_location")]
    pub default_location: String,
}

impl GeoConfig {
    pub fn default_location_code(&self) -> LocationCode {
        LocationCode::new(&self.default_location)
    }
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            database: default_database(),
            default_location: default_location(),
        }
    }
}

fn default_database() -> String {
    "GeoLite2-Country.mmdb".to_string()
}

fn default_location() -> String {
    crate::location::RESERVED_DEFAULT.to_string()
}
