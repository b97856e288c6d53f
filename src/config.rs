//! Engine and provider configuration.

use std::env;
use std::str::FromStr;

use tracing::warn;

const ENV_PREFIX: &str = "ROUTE_OPTIMIZER_";

/// Per-request engine settings.
#[derive(Debug, Clone)]
pub struct OptimizerConfig {
    /// Region bias passed to every geocoding lookup.
    pub region_bias: String,
    /// Hard deadline for a whole request.
    pub request_timeout_secs: u64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            region_bias: "us".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl OptimizerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            region_bias: env_string("REGION").unwrap_or(defaults.region_bias),
            request_timeout_secs: env_parsed("REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GoogleMapsConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl Default for GoogleMapsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://maps.googleapis.com".to_string(),
            api_key: String::new(),
            timeout_secs: 10,
        }
    }
}

impl GoogleMapsConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env_string("GOOGLE_MAPS_BASE_URL").unwrap_or(defaults.base_url),
            api_key: env_string("GOOGLE_MAPS_API_KEY").unwrap_or(defaults.api_key),
            timeout_secs: env_parsed("PROVIDER_TIMEOUT_SECS", defaults.timeout_secs),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            profile: "car".to_string(),
            timeout_secs: 10,
        }
    }
}

impl OsrmConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env_string("OSRM_BASE_URL").unwrap_or(defaults.base_url),
            profile: env_string("OSRM_PROFILE").unwrap_or(defaults.profile),
            timeout_secs: env_parsed("PROVIDER_TIMEOUT_SECS", defaults.timeout_secs),
        }
    }
}

fn env_string(key: &str) -> Option<String> {
    env::var(format!("{}{}", ENV_PREFIX, key))
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn env_parsed<T: FromStr + Copy + std::fmt::Debug>(key: &str, default: T) -> T {
    match env_string(key) {
        Some(raw) => parse_or(key, &raw, default),
        None => default,
    }
}

fn parse_or<T: FromStr + Copy + std::fmt::Debug>(key: &str, raw: &str, default: T) -> T {
    raw.parse().unwrap_or_else(|_| {
        warn!(key, value = raw, ?default, "unparseable config value, using default");
        default
    })
}
