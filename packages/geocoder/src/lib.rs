#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Location resolution for property assessments.
//!
//! Turns a [`LocationQuery`] into a point to assess. The embedded
//! [`GeocoderConfig`] enables **Nominatim / `OpenStreetMap`**, restricted
//! to India and limited to 1 request per second.
//!
//! When no provider places the query (not found, error, or timeout) the
//! [`Gazetteer`] supplies a deterministic stand-in:
//! locality, then city, then state, then the national centroid. Results
//! carry a [`LocationPrecision`] so callers can tell the user an
//! approximate location was used.

pub mod address;
pub mod config;
pub mod gazetteer;
pub mod nominatim;
pub mod resolver;

use std::sync::Arc;

pub use config::{GeocoderConfig, NominatimConfig};
pub use gazetteer::Gazetteer;
pub use laras_geocoder_models::{LocationPrecision, LocationQuery, ResolvedLocation};
use laras_project_models::{GeoPoint, InvalidCoordinateError};
pub use resolver::LocationResolver;
use thiserror::Error;

/// A geocoding result.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedAddress {
    /// Where the provider placed the address.
    pub point: GeoPoint,
    /// The matched/canonical address returned by the provider.
    pub matched_address: Option<String>,
}

/// Errors from geocoding operations.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response parsing failed.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },

    /// Rate limit exceeded.
    #[error("Rate limit exceeded")]
    RateLimited,

    /// The provider did not answer in time.
    #[error("Geocoder timed out after {millis}ms")]
    Timeout {
        /// The timeout that elapsed.
        millis: u64,
    },

    /// Gazetteer or geocoder settings are malformed.
    #[error("Data error: {0}")]
    Data(#[from] toml::de::Error),

    /// A coordinate is out of range.
    #[error(transparent)]
    InvalidCoordinate(#[from] InvalidCoordinateError),
}

/// A geocoding provider.
#[async_trait::async_trait]
pub trait Geocoder: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Places a free-form address.
    ///
    /// Returns `Ok(None)` when the provider has no match.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError`] if the provider could not be queried.
    async fn geocode(&self, address: &str) -> Result<Option<GeocodedAddress>, GeocodeError>;
}

/// A geocoder that never places anything.
///
/// Used when no provider is enabled, so every query goes straight to the
/// gazetteer.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineGeocoder;

#[async_trait::async_trait]
impl Geocoder for OfflineGeocoder {
    fn name(&self) -> &'static str {
        "offline"
    }

    async fn geocode(&self, _address: &str) -> Result<Option<GeocodedAddress>, GeocodeError> {
        Ok(None)
    }
}

/// Builds the geocoders `config` enables.
///
/// Falls back to a single [`OfflineGeocoder`] if network geocoding is
/// disabled.
#[must_use]
pub fn create_geocoders(
    client: &reqwest::Client,
    config: &GeocoderConfig,
) -> Vec<Arc<dyn Geocoder>> {
    if !config.enabled {
        log::info!("Network geocoding disabled, using the offline gazetteer only");
        return vec![Arc::new(OfflineGeocoder)];
    }

    log::info!(
        "Enabling Nominatim at {} (countries: {})",
        config.nominatim.base_url,
        config.nominatim.country_codes.join(",")
    );
    vec![Arc::new(nominatim::NominatimGeocoder::new(
        client.clone(),
        &config.nominatim,
    ))]
}
