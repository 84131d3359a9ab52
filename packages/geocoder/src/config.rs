//! Geocoder settings, embedded from `data/geocoder.toml`.

use std::time::Duration;

use serde::Deserialize;

use crate::{GeocodeError, resolver::DEFAULT_TIMEOUT};

const EMBEDDED_CONFIG: &str = include_str!("../data/geocoder.toml");

/// How locations are geocoded before falling back to the gazetteer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeocoderConfig {
    /// Whether Nominatim is queried at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// How long Nominatim gets to answer a query.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Nominatim endpoint settings.
    pub nominatim: NominatimConfig,
}

/// Nominatim endpoint settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NominatimConfig {
    /// Search endpoint.
    pub base_url: String,
    /// ISO 3166-1 alpha-2 codes results are restricted to.
    #[serde(default)]
    pub country_codes: Vec<String>,
    /// Minimum delay between requests in milliseconds.
    pub rate_limit_ms: u64,
}

const fn default_true() -> bool {
    true
}

fn default_timeout_ms() -> u64 {
    u64::try_from(DEFAULT_TIMEOUT.as_millis()).unwrap_or(u64::MAX)
}

impl GeocoderConfig {
    /// The settings compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Data`] if the embedded TOML is malformed.
    pub fn embedded() -> Result<Self, GeocodeError> {
        Self::from_toml_str(EMBEDDED_CONFIG)
    }

    /// Parses settings from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Data`] if `input` is not valid geocoder TOML.
    pub fn from_toml_str(input: &str) -> Result<Self, GeocodeError> {
        Ok(toml::from_str(input)?)
    }

    /// Per-query timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl NominatimConfig {
    /// Minimum delay between requests.
    #[must_use]
    pub const fn rate_limit(&self) -> Duration {
        Duration::from_millis(self.rate_limit_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_config_targets_india() {
        let config = GeocoderConfig::embedded().unwrap();
        assert!(config.enabled);
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
        assert!(config.nominatim.base_url.starts_with("https://"));
        assert_eq!(config.nominatim.country_codes, ["in"]);
    }

    #[test]
    fn embedded_config_respects_public_rate_limit() {
        let config = GeocoderConfig::embedded().unwrap();
        assert!(config.nominatim.rate_limit() >= Duration::from_secs(1));
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config = GeocoderConfig::from_toml_str(
            r#"
            [nominatim]
            base_url = "http://localhost:8088/search"
            rate_limit_ms = 0
            "#,
        )
        .unwrap();
        assert!(config.enabled);
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
        assert!(config.nominatim.country_codes.is_empty());
    }

    #[test]
    fn missing_endpoint_is_rejected() {
        assert!(matches!(
            GeocoderConfig::from_toml_str("enabled = true"),
            Err(GeocodeError::Data(_))
        ));
    }
}
