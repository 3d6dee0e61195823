//! Runtime configuration read from the environment.
//!
//! Keys come from `SEOUL_API_KEY` and `MAP_API_KEY`. The binary loads a
//! `.env` file first via `dotenvy`, so either source works.

use crate::error::{Error, Result};

/// Public citydata endpoint (plain HTTP on port 8088 is what the API serves).
pub const DEFAULT_CITYDATA_BASE_URL: &str = "http://openapi.seoul.go.kr:8088";
/// Mapbox API root for the Static Images endpoint.
pub const DEFAULT_MAP_BASE_URL: &str = "https://api.mapbox.com";

const SEOUL_API_KEY_VAR: &str = "SEOUL_API_KEY";
const MAP_API_KEY_VAR: &str = "MAP_API_KEY";

/// API keys and endpoint roots.
#[derive(Debug, Clone)]
pub struct Config {
    /// Key for the Seoul open data citydata API
    pub seoul_api_key: String,
    /// Mapbox access token
    pub map_api_key: String,
    /// Root of the citydata API, without trailing slash
    pub citydata_base_url: String,
    /// Root of the static map API, without trailing slash
    pub map_base_url: String,
}

impl Config {
    /// Config against the public endpoints with the given keys.
    pub fn new(seoul_api_key: impl Into<String>, map_api_key: impl Into<String>) -> Self {
        Self {
            seoul_api_key: seoul_api_key.into(),
            map_api_key: map_api_key.into(),
            citydata_base_url: DEFAULT_CITYDATA_BASE_URL.to_string(),
            map_base_url: DEFAULT_MAP_BASE_URL.to_string(),
        }
    }

    /// Read both keys from the process environment.
    pub fn from_env() -> Result<Self> {
        let seoul = std::env::var(SEOUL_API_KEY_VAR)
            .map_err(|_| Error::MissingEnv(SEOUL_API_KEY_VAR))?;
        let map = std::env::var(MAP_API_KEY_VAR).map_err(|_| Error::MissingEnv(MAP_API_KEY_VAR))?;
        Ok(Self::new(seoul, map))
    }

    /// Point both APIs at another root, e.g. a local mock server.
    pub fn with_base_urls(mut self, citydata: &str, map: &str) -> Self {
        self.citydata_base_url = citydata.trim_end_matches('/').to_string();
        self.map_base_url = map.trim_end_matches('/').to_string();
        self
    }
}
