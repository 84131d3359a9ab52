//! Raw project records and their normalization into
//! [`InfrastructureProject`]s.
//!
//! Records carry type and phase as free strings, exactly as the data
//! source spells them. [`ProjectRecord::into_project`] is the single place
//! those strings are canonicalized.

use laras_project_models::{
    DEFAULT_INFLUENCE_RADIUS_METERS, GeoPoint, InfrastructureProject, ProjectGeometry,
    ProjectPhase, ProjectType,
};
use serde::Deserialize;

use crate::CatalogError;

/// A project as it appears in a data source.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProjectRecord {
    /// Unique project identifier.
    pub id: String,
    /// Project name.
    pub name: String,
    /// Project type, any casing or separator style.
    #[serde(rename = "type")]
    pub project_type: String,
    /// Lifecycle phase, any casing or separator style.
    pub phase: String,
    /// State the project is filed under.
    #[serde(default)]
    pub state: Option<String>,
    /// Short description.
    #[serde(default)]
    pub description: Option<String>,
    /// Buffer radius in meters.
    #[serde(default)]
    pub influence_radius_meters: Option<f64>,
    /// `[latitude, longitude]` pairs.
    #[serde(default)]
    pub coordinates: Vec<[f64; 2]>,
}

impl ProjectRecord {
    /// Normalizes the record into a project.
    ///
    /// Returns `Ok(None)` for a record without coordinates: a project
    /// whose location is unknown cannot be placed, so it is left out of
    /// the catalog instead of being given a made-up position.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the type or phase is unrecognized, a
    /// coordinate is out of range, or the influence radius is not
    /// positive.
    pub fn into_project(self) -> Result<Option<InfrastructureProject>, CatalogError> {
        let project_type = ProjectType::canonicalize(&self.project_type).ok_or_else(|| {
            CatalogError::UnknownType {
                id: self.id.clone(),
                value: self.project_type.clone(),
            }
        })?;

        let phase =
            ProjectPhase::canonicalize(&self.phase).ok_or_else(|| CatalogError::UnknownPhase {
                id: self.id.clone(),
                value: self.phase.clone(),
            })?;

        let influence_radius_meters = self
            .influence_radius_meters
            .unwrap_or(DEFAULT_INFLUENCE_RADIUS_METERS);
        if !influence_radius_meters.is_finite() || influence_radius_meters <= 0.0 {
            return Err(CatalogError::InvalidRadius {
                id: self.id,
                radius: influence_radius_meters,
            });
        }

        let points = self
            .coordinates
            .iter()
            .map(|[lat, lng]| GeoPoint::new(*lat, *lng))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| CatalogError::InvalidCoordinate {
                id: self.id.clone(),
                source,
            })?;

        let Some(geometry) = ProjectGeometry::from_points(points) else {
            log::warn!("Project {} has no coordinates, leaving it out", self.id);
            return Ok(None);
        };

        Ok(Some(InfrastructureProject {
            id: self.id,
            name: self.name,
            project_type,
            phase,
            geometry,
            influence_radius_meters,
            state: self.state,
            description: self.description,
        }))
    }
}
