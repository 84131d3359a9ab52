//! Offline place coordinates.
//!
//! The gazetteer is the deterministic fallback behind every provider. It
//! never does I/O once loaded, so [`Gazetteer::fallback`] is safe to call
//! from synchronous code and always produces a point.

use laras_geocoder_models::{LocationPrecision, LocationQuery, ResolvedLocation};
use laras_project_models::GeoPoint;
use serde::Deserialize;

use crate::{GeocodeError, address::same_place};

const GAZETTEER_TOML: &str = include_str!("../data/gazetteer.toml");

/// A named point: a state centroid or the national centroid.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Place {
    /// Place name.
    pub name: String,
    /// Coordinates.
    #[serde(flatten)]
    pub location: GeoPoint,
}

/// A city center.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct City {
    /// City name.
    pub name: String,
    /// District the city is in.
    #[serde(default)]
    pub district: Option<String>,
    /// State the city is in.
    pub state: String,
    /// Coordinates.
    #[serde(flatten)]
    pub location: GeoPoint,
}

/// A neighborhood within a city.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Locality {
    /// Locality name.
    pub name: String,
    /// City the locality is in.
    pub city: String,
    /// State the locality is in.
    pub state: String,
    /// Coordinates.
    #[serde(flatten)]
    pub location: GeoPoint,
}

/// Known localities, cities, and states, plus the national centroid.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Gazetteer {
    national: Place,
    #[serde(default)]
    states: Vec<Place>,
    #[serde(default)]
    cities: Vec<City>,
    #[serde(default)]
    localities: Vec<Locality>,
}

impl Gazetteer {
    /// Loads the gazetteer embedded at compile time.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Data`] if the embedded data is
    /// malformed.
    pub fn embedded() -> Result<Self, GeocodeError> {
        Self::from_toml_str(GAZETTEER_TOML)
    }

    /// Parses a gazetteer from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Data`] if parsing fails or a
    /// coordinate is out of range.
    pub fn from_toml_str(input: &str) -> Result<Self, GeocodeError> {
        Ok(toml::de::from_str(input)?)
    }

    /// The national centroid, used when nothing finer is known.
    #[must_use]
    pub fn national(&self) -> ResolvedLocation {
        ResolvedLocation {
            point: self.national.location,
            precision: LocationPrecision::National,
            label: self.national.name.clone(),
        }
    }

    /// Places `query` using only local data.
    ///
    /// Tries the locality, then the city (by name, then by district), then
    /// the state, and finally the national centroid. A finer match is
    /// only accepted inside the query's state.
    #[must_use]
    pub fn fallback(&self, query: &LocationQuery) -> ResolvedLocation {
        let in_state = |state: &str| same_place(state, &query.state);

        if let Some(name) = non_blank(query.locality.as_deref()) {
            let city_filter = non_blank(query.city.as_deref());
            let district_filter = non_blank(query.district.as_deref());
            let found = self.localities.iter().find(|l| {
                same_place(&l.name, name)
                    && in_state(&l.state)
                    && (city_filter.is_none_or(|c| same_place(&l.city, c))
                        || district_filter.is_some_and(|d| same_place(&l.city, d)))
            });
            if let Some(locality) = found {
                log::debug!("Gazetteer matched locality {}", locality.name);
                return ResolvedLocation {
                    point: locality.location,
                    precision: LocationPrecision::Locality,
                    label: format!("{}, {}, {}", locality.name, locality.city, locality.state),
                };
            }
        }

        let by_name = non_blank(query.city.as_deref()).and_then(|name| {
            self.cities
                .iter()
                .find(|c| same_place(&c.name, name) && in_state(&c.state))
        });
        let by_district = || {
            non_blank(query.district.as_deref()).and_then(|name| {
                self.cities.iter().find(|c| {
                    c.district.as_deref().is_some_and(|d| same_place(d, name)) && in_state(&c.state)
                })
            })
        };
        if let Some(city) = by_name.or_else(by_district) {
            log::debug!("Gazetteer matched city {}", city.name);
            return ResolvedLocation {
                point: city.location,
                precision: LocationPrecision::City,
                label: format!("{}, {}", city.name, city.state),
            };
        }

        if let Some(state) = self.states.iter().find(|s| in_state(&s.name)) {
            log::debug!("Gazetteer matched state {}", state.name);
            return ResolvedLocation {
                point: state.location,
                precision: LocationPrecision::State,
                label: state.name.clone(),
            };
        }

        log::debug!(
            "Gazetteer has no entry for state '{}', using national centroid",
            query.state
        );
        self.national()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gazetteer() -> Gazetteer {
        Gazetteer::embedded().unwrap()
    }

    fn query(state: &str, city: Option<&str>, locality: Option<&str>) -> LocationQuery {
        LocationQuery {
            state: state.to_string(),
            city: city.map(String::from),
            locality: locality.map(String::from),
            ..LocationQuery::default()
        }
    }

    #[test]
    fn embedded_gazetteer_loads() {
        let g = gazetteer();
        assert_eq!(g.states.len(), 20);
        assert!(!g.cities.is_empty());
        assert!(!g.localities.is_empty());
    }

    #[test]
    fn locality_is_most_precise() {
        let resolved = gazetteer().fallback(&query(
            "Karnataka",
            Some("Bengaluru"),
            Some("whitefield"),
        ));
        assert_eq!(resolved.precision, LocationPrecision::Locality);
        assert_eq!(resolved.label, "Whitefield, Bangalore, Karnataka");
        assert!(resolved.approximate());
    }

    #[test]
    fn unknown_locality_falls_back_to_city() {
        let resolved = gazetteer().fallback(&query(
            "Tamil Nadu",
            Some("Chennai"),
            Some("Somewhere Unlisted"),
        ));
        assert_eq!(resolved.precision, LocationPrecision::City);
        assert!((resolved.point.latitude() - 13.0827).abs() < 1e-9);
        assert!((resolved.point.longitude() - 80.2707).abs() < 1e-9);
    }

    #[test]
    fn district_places_city_when_city_is_missing() {
        let resolved = gazetteer().fallback(&LocationQuery {
            state: "Uttar Pradesh".to_string(),
            district: Some("Gautam Buddha Nagar".to_string()),
            ..LocationQuery::default()
        });
        assert_eq!(resolved.precision, LocationPrecision::City);
        assert_eq!(resolved.label, "Noida, Uttar Pradesh");
    }

    #[test]
    fn city_must_be_in_the_requested_state() {
        let resolved = gazetteer().fallback(&query("Kerala", Some("Chennai"), None));
        assert_eq!(resolved.precision, LocationPrecision::State);
        assert_eq!(resolved.label, "Kerala");
    }

    #[test]
    fn unknown_state_uses_national_centroid() {
        let resolved = gazetteer().fallback(&query("Ladakh", None, None));
        assert_eq!(resolved.precision, LocationPrecision::National);
        assert!((resolved.point.latitude() - 20.5937).abs() < 1e-9);
        assert!((resolved.point.longitude() - 78.9629).abs() < 1e-9);
    }

    #[test]
    fn out_of_range_entry_is_rejected() {
        let input = r#"
            [national]
            name = "India"
            latitude = 120.0
            longitude = 78.9629
        "#;
        assert!(matches!(
            Gazetteer::from_toml_str(input),
            Err(GeocodeError::Data(_))
        ));
    }
}
