#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Immutable infrastructure project catalog.
//!
//! A [`CatalogSnapshot`] is built once from a data source and never
//! mutated. Refreshing the catalog means building a new snapshot and
//! publishing it through a [`CatalogHandle`]; assessments already holding
//! the previous snapshot keep a consistent view.
//!
//! Supported sources:
//!
//! * the seed catalog embedded at compile time ([`seed`]),
//! * TOML files in the seed format ([`record`]),
//! * `GeoJSON` feature collections ([`geojson_import`]).
//!
//! Every source is normalized through [`record::ProjectRecord`], which is
//! the only place phase and type strings are canonicalized.

pub mod geojson_import;
pub mod record;
pub mod snapshot;

pub use snapshot::{CatalogHandle, CatalogSnapshot, ProjectFilter};

use laras_project_models::InvalidCoordinateError;
use thiserror::Error;

/// Errors from loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Reading a catalog file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing failed.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// `GeoJSON` parsing or geometry conversion failed.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// A `GeoJSON` feature's properties could not be read as a project.
    #[error("Feature {index}: {source}")]
    Feature {
        /// Position of the feature in the collection.
        index: usize,
        /// Underlying deserialization error.
        source: serde_json::Error,
    },

    /// The input is not in a supported catalog format.
    #[error("Unsupported catalog format: {message}")]
    Format {
        /// Description of the problem.
        message: String,
    },

    /// The project type is not recognized.
    #[error("Project {id}: unknown type '{value}'")]
    UnknownType {
        /// Project ID.
        id: String,
        /// The unrecognized value.
        value: String,
    },

    /// The project phase is not recognized.
    #[error("Project {id}: unknown phase '{value}'")]
    UnknownPhase {
        /// Project ID.
        id: String,
        /// The unrecognized value.
        value: String,
    },

    /// A project coordinate is out of range.
    #[error("Project {id}: {source}")]
    InvalidCoordinate {
        /// Project ID.
        id: String,
        /// The coordinate error.
        source: InvalidCoordinateError,
    },

    /// A project's influence radius is not a positive number.
    #[error("Project {id}: influence radius must be positive, got {radius}")]
    InvalidRadius {
        /// Project ID.
        id: String,
        /// The rejected radius in meters.
        radius: f64,
    },

    /// Two projects share an ID.
    #[error("Duplicate project id: {id}")]
    DuplicateId {
        /// The repeated ID.
        id: String,
    },
}

const SEED_TOML: &str = include_str!("../data/projects.toml");

/// Source label of the embedded seed catalog.
pub const SEED_SOURCE: &str = "embedded seed";

/// Builds a snapshot of the seed catalog embedded at compile time.
///
/// # Errors
///
/// Returns [`CatalogError`] if the embedded data is malformed.
pub fn seed() -> Result<CatalogSnapshot, CatalogError> {
    CatalogSnapshot::from_toml_str(SEED_SOURCE, SEED_TOML)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use laras_project_models::{ProjectGeometry, ProjectPhase};

    use super::*;

    #[test]
    fn seed_catalog_loads() {
        let catalog = seed().unwrap();
        assert_eq!(catalog.len(), 18);
        assert_eq!(catalog.source(), SEED_SOURCE);
    }

    #[test]
    fn seed_ids_are_unique() {
        let catalog = seed().unwrap();
        let mut seen = BTreeSet::new();
        for project in catalog.projects() {
            assert!(seen.insert(&project.id), "Duplicate project ID: {}", project.id);
        }
    }

    #[test]
    fn seed_phase_synonyms_are_canonical() {
        let catalog = seed().unwrap();
        let bullet = catalog.get("MAHSR-BULLET").unwrap();
        let jewar = catalog.get("NIA-JEWAR").unwrap();
        assert_eq!(bullet.phase, ProjectPhase::UnderConstruction);
        assert_eq!(jewar.phase, ProjectPhase::UnderConstruction);
    }

    #[test]
    fn seed_area_project_is_closed_loop() {
        let catalog = seed().unwrap();
        let pharma = catalog.get("HYD-PHARMA").unwrap();
        assert!(pharma.geometry.is_closed());
        assert!((pharma.influence_radius_meters - 2000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn seed_point_projects_use_default_radius() {
        let catalog = seed().unwrap();
        let airport = catalog.get("GIA-PARANDUR").unwrap();
        assert!(matches!(airport.geometry, ProjectGeometry::Point { .. }));
        assert!((airport.influence_radius_meters - 5000.0).abs() < f64::EPSILON);
    }
}
