//! Nominatim / `OpenStreetMap` geocoder client.
//!
//! Searches are restricted to the configured countries (`countrycodes`).
//! Nominatim has strict rate limits: **1 request per second** maximum on
//! the public instance, enforced here per client with `rate_limit`.
//!
//! See <https://nominatim.org/release-docs/develop/api/Search/>

use std::time::Duration;

use laras_project_models::GeoPoint;
use tokio::{sync::Mutex, time::Instant};

use crate::{GeocodeError, GeocodedAddress, Geocoder, config::NominatimConfig};

/// Free-form Nominatim search.
#[derive(Debug)]
pub struct NominatimGeocoder {
    client: reqwest::Client,
    base_url: String,
    country_codes: String,
    rate_limit: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl NominatimGeocoder {
    /// Creates a client for the endpoint in `config`, sending at most one
    /// request per `config.rate_limit_ms`.
    #[must_use]
    pub fn new(client: reqwest::Client, config: &NominatimConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            country_codes: config.country_codes.join(","),
            rate_limit: config.rate_limit(),
            last_request: Mutex::new(None),
        }
    }

    fn search_params<'a>(&'a self, address: &'a str) -> Vec<(&'static str, &'a str)> {
        let mut params = vec![("q", address), ("format", "jsonv2"), ("limit", "1")];
        if !self.country_codes.is_empty() {
            params.push(("countrycodes", self.country_codes.as_str()));
        }
        params
    }

    /// Waits until the rate limit allows another request.
    async fn wait_turn(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.rate_limit {
                tokio::time::sleep(self.rate_limit - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}

#[async_trait::async_trait]
impl Geocoder for NominatimGeocoder {
    fn name(&self) -> &'static str {
        "nominatim"
    }

    async fn geocode(&self, address: &str) -> Result<Option<GeocodedAddress>, GeocodeError> {
        self.wait_turn().await;

        let resp = self
            .client
            .get(&self.base_url)
            .query(&self.search_params(address))
            .send()
            .await?;

        if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GeocodeError::RateLimited);
        }

        let body: serde_json::Value = resp.error_for_status()?.json().await?;
        parse_response(&body)
    }
}

/// Parses Nominatim JSON response.
fn parse_response(body: &serde_json::Value) -> Result<Option<GeocodedAddress>, GeocodeError> {
    let results = body.as_array().ok_or_else(|| GeocodeError::Parse {
        message: "Nominatim response is not an array".to_string(),
    })?;

    let Some(first) = results.first() else {
        return Ok(None);
    };

    let lat = first["lat"]
        .as_str()
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(|| GeocodeError::Parse {
            message: "Missing lat in Nominatim response".to_string(),
        })?;

    let lon = first["lon"]
        .as_str()
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(|| GeocodeError::Parse {
            message: "Missing lon in Nominatim response".to_string(),
        })?;

    let display_name = first["display_name"].as_str().map(String::from);

    Ok(Some(GeocodedAddress {
        point: GeoPoint::new(lat, lon)?,
        matched_address: display_name,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nominatim_result() {
        let body = serde_json::json!([{
            "lat": "12.9698",
            "lon": "77.7500",
            "display_name": "Whitefield, Bengaluru, Karnataka, 560066, India"
        }]);
        let result = parse_response(&body).unwrap().unwrap();
        assert!((result.point.latitude() - 12.9698).abs() < 1e-4);
        assert!((result.point.longitude() - 77.75).abs() < 1e-4);
        assert_eq!(
            result.matched_address.as_deref(),
            Some("Whitefield, Bengaluru, Karnataka, 560066, India")
        );
    }

    #[test]
    fn parses_nominatim_empty() {
        let body = serde_json::json!([]);
        assert!(parse_response(&body).unwrap().is_none());
    }

    #[test]
    fn rejects_non_array() {
        let body = serde_json::json!({"error": "Unable to geocode"});
        assert!(matches!(
            parse_response(&body),
            Err(GeocodeError::Parse { .. })
        ));
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        let body = serde_json::json!([{"lat": "97.0", "lon": "77.75"}]);
        assert!(matches!(
            parse_response(&body),
            Err(GeocodeError::InvalidCoordinate(_))
        ));
    }

    fn local_config(country_codes: &[&str]) -> NominatimConfig {
        NominatimConfig {
            base_url: "http://localhost/search".to_string(),
            country_codes: country_codes.iter().map(ToString::to_string).collect(),
            rate_limit_ms: 1000,
        }
    }

    #[test]
    fn restricts_search_to_configured_countries() {
        let geocoder = NominatimGeocoder::new(reqwest::Client::new(), &local_config(&["in", "np"]));
        let params = geocoder.search_params("Parandur, Tamil Nadu");
        assert!(params.contains(&("q", "Parandur, Tamil Nadu")));
        assert!(params.contains(&("countrycodes", "in,np")));
    }

    #[test]
    fn no_country_codes_means_worldwide() {
        let geocoder = NominatimGeocoder::new(reqwest::Client::new(), &local_config(&[]));
        let params = geocoder.search_params("Kathmandu");
        assert!(params.iter().all(|(key, _)| *key != "countrycodes"));
    }

    #[tokio::test(start_paused = true)]
    async fn spaces_requests_by_rate_limit() {
        let geocoder = NominatimGeocoder::new(reqwest::Client::new(), &local_config(&["in"]));

        let start = Instant::now();
        geocoder.wait_turn().await;
        assert!(start.elapsed() < Duration::from_millis(10));

        geocoder.wait_turn().await;
        assert!(start.elapsed() >= Duration::from_secs(1));
    }
}
