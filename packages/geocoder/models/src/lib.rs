#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Location query and resolution types shared by the geocoder and the API.

use laras_project_models::GeoPoint;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A user-supplied location, from coarsest to finest.
///
/// Only `state` is required. Finer fields narrow the result when the
/// geocoder or the gazetteer can place them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationQuery {
    /// State or union territory.
    pub state: String,
    /// District within the state.
    #[serde(default)]
    pub district: Option<String>,
    /// City or town.
    #[serde(default)]
    pub city: Option<String>,
    /// Neighborhood or locality within the city.
    #[serde(default)]
    pub locality: Option<String>,
    /// Free-form street address.
    #[serde(default)]
    pub address: Option<String>,
}

impl LocationQuery {
    /// Creates a query for a whole state.
    #[must_use]
    pub fn state(state: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            ..Self::default()
        }
    }

    /// One-line search text, finest component first, ending in the
    /// country. Blank components are skipped.
    #[must_use]
    pub fn search_text(&self) -> String {
        [
            self.address.as_deref(),
            self.locality.as_deref(),
            self.city.as_deref(),
            self.district.as_deref(),
            Some(self.state.as_str()),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .chain(std::iter::once("India"))
        .collect::<Vec<_>>()
        .join(", ")
    }
}

/// How precisely a location was placed.
///
/// Ordered from most to least precise.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LocationPrecision {
    /// Coordinates supplied by the caller.
    Exact,
    /// Placed by a geocoding provider.
    Geocoded,
    /// Gazetteer locality coordinates.
    Locality,
    /// Gazetteer city center.
    City,
    /// Gazetteer state centroid.
    State,
    /// Center of the country.
    National,
}

impl LocationPrecision {
    /// Whether the point is a stand-in rather than the actual location.
    #[must_use]
    pub const fn is_approximate(self) -> bool {
        !matches!(self, Self::Exact | Self::Geocoded)
    }
}

/// The point a [`LocationQuery`] resolved to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedLocation {
    /// Where the assessment is run.
    pub point: GeoPoint,
    /// How the point was obtained.
    pub precision: LocationPrecision,
    /// Human-readable description of the place the point stands for.
    pub label: String,
}

impl ResolvedLocation {
    /// See [`LocationPrecision::is_approximate`].
    #[must_use]
    pub const fn approximate(&self) -> bool {
        self.precision.is_approximate()
    }
}
