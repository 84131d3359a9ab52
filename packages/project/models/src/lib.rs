#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Infrastructure project types, lifecycle phases, and geometries.
//!
//! This crate defines the canonical project vocabulary shared by the
//! catalog, the proximity resolver, and the risk engine. All data sources
//! (embedded seed data, `GeoJSON` imports, API payloads) normalize their
//! project types and phases into these enums at the catalog boundary.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use thiserror::Error;

/// Default influence (buffer) radius around a project, in meters.
pub const DEFAULT_INFLUENCE_RADIUS_METERS: f64 = 5000.0;

/// Error returned when a latitude/longitude pair is outside the valid
/// WGS84 range or is not a finite number.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("invalid coordinate ({latitude}, {longitude}): outside [-90, 90] x [-180, 180]")]
pub struct InvalidCoordinateError {
    /// The rejected latitude.
    pub latitude: f64,
    /// The rejected longitude.
    pub longitude: f64,
}

/// A WGS84 point in degrees.
///
/// Immutable once constructed; [`GeoPoint::new`] is the only way in, so
/// every `GeoPoint` in the system is known to be in range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeoPoint")]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawGeoPoint {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawGeoPoint> for GeoPoint {
    type Error = InvalidCoordinateError;

    fn try_from(raw: RawGeoPoint) -> Result<Self, Self::Error> {
        Self::new(raw.latitude, raw.longitude)
    }
}

impl GeoPoint {
    /// Creates a point from a latitude and longitude in degrees.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCoordinateError`] if either value is non-finite or
    /// outside its valid range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinateError> {
        if latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude)
        {
            Ok(Self {
                latitude,
                longitude,
            })
        } else {
            Err(InvalidCoordinateError {
                latitude,
                longitude,
            })
        }
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

/// Kind of infrastructure a project builds.
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
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ProjectType {
    /// National/state highways and expressways
    Highway,
    /// Urban metro rail
    Metro,
    /// Conventional, suburban, and high-speed rail
    Railway,
    /// Greenfield and expansion airports
    Airport,
    /// Industrial parks and corridors
    Industrial,
    /// Smart city developments
    SmartCity,
    /// Sea and river ports
    Port,
    /// Power generation plants
    PowerPlant,
}

impl ProjectType {
    /// Parses a type string from any data source, normalizing case,
    /// whitespace, hyphens, and spaces the same way as
    /// [`ProjectPhase::canonicalize`].
    ///
    /// Returns `None` if the type is not recognized.
    #[must_use]
    pub fn canonicalize(raw: &str) -> Option<Self> {
        normalize_separators(raw).parse().ok()
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Highway => "Highway",
            Self::Metro => "Metro",
            Self::Railway => "Railway",
            Self::Airport => "Airport",
            Self::Industrial => "Industrial",
            Self::SmartCity => "Smart City",
            Self::Port => "Port",
            Self::PowerPlant => "Power Plant",
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Highway,
            Self::Metro,
            Self::Railway,
            Self::Airport,
            Self::Industrial,
            Self::SmartCity,
            Self::Port,
            Self::PowerPlant,
        ]
    }
}

/// Lifecycle phase of a project.
///
/// Source data spells the active-construction phase both
/// `under_construction` and `construction_started`; both parse to
/// [`ProjectPhase::UnderConstruction`].
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
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ProjectPhase {
    /// Announced, no formal approval yet
    Proposed,
    /// Feasibility study in progress
    FeasibilityStudy,
    /// Detailed project report being prepared
    DprPreparation,
    /// Sanctioned by the competent authority
    Approved,
    /// Land acquisition notification issued
    LandNotification,
    /// Construction tender floated
    TenderFloated,
    /// Construction has started
    #[serde(alias = "construction_started")]
    #[strum(to_string = "under_construction", serialize = "construction_started")]
    UnderConstruction,
    /// Partially operational, work continuing
    Ongoing,
    /// Built and operational
    Completed,
}

impl ProjectPhase {
    /// Parses a phase string from any data source.
    ///
    /// Case, surrounding whitespace, hyphens, and spaces are normalized
    /// before matching, so `"Land Notification"`, `"land-notification"`,
    /// and `"LAND_NOTIFICATION"` all resolve to the same phase.
    ///
    /// Returns `None` if the phase is not recognized.
    #[must_use]
    pub fn canonicalize(raw: &str) -> Option<Self> {
        normalize_separators(raw).parse().ok()
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Proposed => "Proposed",
            Self::FeasibilityStudy => "Feasibility Study",
            Self::DprPreparation => "DPR Preparation",
            Self::Approved => "Approved",
            Self::LandNotification => "Land Notification",
            Self::TenderFloated => "Tender Floated",
            Self::UnderConstruction => "Under Construction",
            Self::Ongoing => "Ongoing",
            Self::Completed => "Completed",
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Proposed,
            Self::FeasibilityStudy,
            Self::DprPreparation,
            Self::Approved,
            Self::LandNotification,
            Self::TenderFloated,
            Self::UnderConstruction,
            Self::Ongoing,
            Self::Completed,
        ]
    }
}

fn normalize_separators(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| if c == '-' || c == ' ' { '_' } else { c })
        .collect()
}

/// Spatial footprint of a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProjectGeometry {
    /// A single location (airport, plant, port).
    Point {
        /// The project location.
        location: GeoPoint,
    },
    /// An ordered vertex sequence approximating an alignment. Should hold
    /// at least two vertices; a path whose first and last vertices
    /// coincide approximates an area.
    Path {
        /// Alignment vertices in order.
        vertices: Vec<GeoPoint>,
    },
}

impl ProjectGeometry {
    /// Builds a geometry from a coordinate list: one coordinate becomes a
    /// [`ProjectGeometry::Point`], two or more a [`ProjectGeometry::Path`].
    ///
    /// Returns `None` for an empty list.
    #[must_use]
    pub fn from_points(mut points: Vec<GeoPoint>) -> Option<Self> {
        match points.len() {
            0 => None,
            1 => points.pop().map(|location| Self::Point { location }),
            _ => Some(Self::Path { vertices: points }),
        }
    }

    /// Whether this is a path whose first and last vertices coincide.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        match self {
            Self::Point { .. } => false,
            Self::Path { vertices } => {
                vertices.len() > 2 && vertices.first() == vertices.last()
            }
        }
    }

    /// Number of vertices in the geometry.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        match self {
            Self::Point { .. } => 1,
            Self::Path { vertices } => vertices.len(),
        }
    }
}

/// A government infrastructure project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfrastructureProject {
    /// Unique project identifier (e.g. `"BSRP-KA"`).
    pub id: String,
    /// Project name.
    pub name: String,
    /// Kind of infrastructure.
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    /// Current lifecycle phase.
    pub phase: ProjectPhase,
    /// Spatial footprint.
    pub geometry: ProjectGeometry,
    /// Buffer radius within which the project materially affects risk.
    #[serde(default = "default_influence_radius")]
    pub influence_radius_meters: f64,
    /// State the project is filed under.
    #[serde(default)]
    pub state: Option<String>,
    /// Short description.
    #[serde(default)]
    pub description: Option<String>,
}

const fn default_influence_radius() -> f64 {
    DEFAULT_INFLUENCE_RADIUS_METERS
}

impl InfrastructureProject {
    /// Influence radius in kilometers.
    #[must_use]
    pub fn influence_radius_km(&self) -> f64 {
        self.influence_radius_meters / 1000.0
    }
}
