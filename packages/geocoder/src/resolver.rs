//! Provider chain with gazetteer fallback.

use std::{sync::Arc, time::Duration};

use laras_geocoder_models::{LocationPrecision, LocationQuery, ResolvedLocation};

use crate::{GeocodeError, Geocoder, Gazetteer, OfflineGeocoder, address::clean_address};

/// Default per-provider timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Resolves location queries to points.
///
/// Each provider gets `timeout` to answer. The first match wins; if none
/// matches, the gazetteer places the query. Resolution therefore always
/// succeeds, with [`ResolvedLocation::precision`] recording how.
pub struct LocationResolver {
    geocoders: Vec<Arc<dyn Geocoder>>,
    gazetteer: Arc<Gazetteer>,
    timeout: Duration,
}

impl std::fmt::Debug for LocationResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocationResolver")
            .field(
                "geocoders",
                &self.geocoders.iter().map(|g| g.name()).collect::<Vec<_>>(),
            )
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl LocationResolver {
    /// Creates a resolver trying `geocoders` in order.
    #[must_use]
    pub fn new(
        geocoders: Vec<Arc<dyn Geocoder>>,
        gazetteer: Arc<Gazetteer>,
        timeout: Duration,
    ) -> Self {
        Self {
            geocoders,
            gazetteer,
            timeout,
        }
    }

    /// Creates a resolver that only consults the gazetteer.
    #[must_use]
    pub fn offline(gazetteer: Arc<Gazetteer>) -> Self {
        Self::new(vec![Arc::new(OfflineGeocoder)], gazetteer, DEFAULT_TIMEOUT)
    }

    /// The fallback gazetteer.
    #[must_use]
    pub fn gazetteer(&self) -> &Gazetteer {
        &self.gazetteer
    }

    /// Resolves `query`, falling back to the gazetteer when no provider
    /// places it.
    pub async fn resolve(&self, query: &LocationQuery) -> ResolvedLocation {
        if let Some(found) = self.geocode(query).await {
            return found;
        }

        let fallback = self.gazetteer.fallback(query);
        log::warn!(
            "Using approximate location for '{}': {} ({})",
            query.search_text(),
            fallback.label,
            fallback.precision
        );
        fallback
    }

    async fn geocode(&self, query: &LocationQuery) -> Option<ResolvedLocation> {
        let text = clean_address(&query.search_text())?;

        for geocoder in &self.geocoders {
            match tokio::time::timeout(self.timeout, geocoder.geocode(&text)).await {
                Ok(Ok(Some(found))) => {
                    log::debug!(
                        "Geocoder '{}' placed '{text}' at {}",
                        geocoder.name(),
                        found.point
                    );
                    return Some(ResolvedLocation {
                        point: found.point,
                        precision: LocationPrecision::Geocoded,
                        label: found.matched_address.unwrap_or(text),
                    });
                }
                Ok(Ok(None)) => {
                    log::debug!("Geocoder '{}' found no match for '{text}'", geocoder.name());
                }
                Ok(Err(e)) => {
                    log::warn!("Geocoder '{}' failed for '{text}': {e}", geocoder.name());
                }
                Err(_) => {
                    let millis = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
                    log::warn!(
                        "Geocoder '{}' for '{text}': {}",
                        geocoder.name(),
                        GeocodeError::Timeout { millis }
                    );
                }
            }
        }

        None
    }
}
