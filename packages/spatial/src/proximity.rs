//! Proximity resolution of a query point against a project catalog.

use laras_project_models::{GeoPoint, InfrastructureProject};

use crate::{GeometryError, distance::distance_to_geometry};

/// A project and its distance from the query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityResult<'a> {
    /// The nearby project.
    pub project: &'a InfrastructureProject,
    /// Minimum distance from the query point to the project geometry.
    pub distance_km: f64,
}

impl ProximityResult<'_> {
    /// Whether the point falls inside the project's own influence radius.
    #[must_use]
    pub fn within_influence_radius(&self) -> bool {
        self.distance_km <= self.project.influence_radius_km()
    }
}

/// Finds every project strictly closer than `max_radius_km` to `point`.
///
/// Results are in catalog order; callers sort as needed. Projects with
/// malformed geometry are logged and skipped rather than failing the
/// whole resolution.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidState`] if a computed distance is
/// negative or not finite.
pub fn resolve<'a, I>(
    point: &GeoPoint,
    projects: I,
    max_radius_km: f64,
) -> Result<Vec<ProximityResult<'a>>, GeometryError>
where
    I: IntoIterator<Item = &'a InfrastructureProject>,
{
    let mut results = Vec::new();

    for project in projects {
        let distance_km = match distance_to_geometry(point, &project.geometry) {
            Ok(d) => d,
            Err(e @ GeometryError::InvalidGeometry { .. }) => {
                log::warn!("Skipping project {}: {e}", project.id);
                continue;
            }
            Err(e) => return Err(e),
        };

        if !distance_km.is_finite() || distance_km < 0.0 {
            return Err(GeometryError::InvalidState {
                message: format!(
                    "computed distance {distance_km} km to project {} from {point}",
                    project.id
                ),
            });
        }

        if distance_km < max_radius_km {
            results.push(ProximityResult {
                project,
                distance_km,
            });
        }
    }

    log::debug!(
        "Resolved {} project(s) within {max_radius_km} km of {point}",
        results.len()
    );

    Ok(results)
}
