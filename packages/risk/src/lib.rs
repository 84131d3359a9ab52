#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Land acquisition risk assessment.
//!
//! [`assess_risk`] is the single entry point the application calls:
//!
//! 1. **Proximity**: distances from the point to every project geometry,
//!    filtered to the relevance radius ([`laras_spatial::proximity`]).
//! 2. **Scoring**: phase weight times a distance-decay factor per project,
//!    added to a base score and capped ([`scoring`]).
//! 3. **Recommendations**: fixed advisory rules keyed on the score
//!    ([`recommendations`]).
//!
//! The computation is pure. The catalog is borrowed for the duration of
//! the call and never mutated, so concurrent assessments need no
//! coordination.

pub mod recommendations;
pub mod scoring;

use laras_project_models::{GeoPoint, InfrastructureProject};
use laras_risk_models::{AssessOptions, RiskAssessment};
use laras_spatial::{GeometryError, proximity};
use thiserror::Error;

/// Errors from an assessment.
///
/// None of these are retryable: they indicate malformed input or a
/// defect, not a transient condition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssessError {
    /// Geometry or distance invariant failure.
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// The supplied options cannot be used.
    #[error("Invalid options: {message}")]
    InvalidOptions {
        /// Description of the problem.
        message: String,
    },
}

/// Assesses land acquisition risk at `point` against `catalog`.
///
/// An empty catalog, or one with nothing in range, is a valid outcome and
/// yields the base score.
///
/// # Errors
///
/// * [`AssessError::InvalidOptions`] if `max_radius_km` is negative or
///   not finite.
/// * [`AssessError::Geometry`] if a distance invariant is violated.
pub fn assess_risk<'a, I>(
    point: &GeoPoint,
    catalog: I,
    options: &AssessOptions,
) -> Result<RiskAssessment, AssessError>
where
    I: IntoIterator<Item = &'a InfrastructureProject>,
{
    if !options.max_radius_km.is_finite() || options.max_radius_km < 0.0 {
        return Err(AssessError::InvalidOptions {
            message: format!(
                "max radius must be a non-negative number of kilometers, got {}",
                options.max_radius_km
            ),
        });
    }

    let nearby = proximity::resolve(point, catalog, options.max_radius_km)?;
    let card = scoring::score(&nearby, options.base_score)?;

    log::info!(
        "Assessed {point}: score {} ({}) from {} nearby project(s)",
        card.score,
        card.tier,
        card.contributions.len()
    );

    Ok(RiskAssessment {
        score: card.score,
        tier: card.tier,
        base_score: options.base_score,
        recommendations: recommendations::recommendations(card.score),
        summary: recommendations::summary(card.tier).to_string(),
        contributions: card.contributions,
    })
}

#[cfg(test)]
mod tests {
    use laras_project_models::{ProjectGeometry, ProjectPhase, ProjectType};
    use laras_risk_models::{DEFAULT_BASE_SCORE, RiskTier};
    use laras_spatial::distance;

    use super::*;

    fn pt(lat: f64, lng: f64) -> GeoPoint {
        GeoPoint::new(lat, lng).unwrap()
    }

    /// A point `km` kilometers due north of `origin`.
    fn north_of(origin: &GeoPoint, km: f64) -> GeoPoint {
        let degrees = (km / distance::EARTH_RADIUS_KM).to_degrees();
        pt(origin.latitude() + degrees, origin.longitude())
    }

    fn point_project(id: &str, phase: ProjectPhase, location: GeoPoint) -> InfrastructureProject {
        InfrastructureProject {
            id: id.to_string(),
            name: format!("Project {id}"),
            project_type: ProjectType::Highway,
            phase,
            geometry: ProjectGeometry::Point { location },
            influence_radius_meters: 5000.0,
            state: None,
            description: None,
        }
    }

    fn assess(point: &GeoPoint, catalog: &[InfrastructureProject]) -> RiskAssessment {
        assess_risk(point, catalog, &AssessOptions::default()).unwrap()
    }

    #[test]
    fn empty_catalog_yields_baseline() {
        let result = assess(&pt(12.97, 77.59), &[]);
        assert_eq!(result.score, DEFAULT_BASE_SCORE);
        assert_eq!(result.tier, RiskTier::VeryLow);
        assert!(result.contributions.is_empty());
        assert_eq!(
            result.recommendations,
            vec!["Keep all property documents readily accessible"]
        );
    }

    #[test]
    fn point_on_land_notification_project() {
        let site = pt(12.94, 79.78);
        let catalog = vec![point_project("GIA-PAR", ProjectPhase::LandNotification, site)];

        let result = assess(&site, &catalog);
        assert!(result.contributions[0].distance_km < 1e-9);
        assert_eq!(result.contributions[0].contribution_points, 60);
        assert_eq!(result.score, 70);
        assert_eq!(result.tier, RiskTier::High);
        assert_eq!(result.recommendations.len(), 6);
    }

    #[test]
    fn project_ten_km_away_adds_nothing() {
        let origin = pt(19.07, 72.87);
        let catalog = vec![point_project(
            "far",
            ProjectPhase::LandNotification,
            north_of(&origin, 10.0),
        )];

        let result = assess(&origin, &catalog);
        assert_eq!(result.contributions.len(), 1);
        assert_eq!(result.contributions[0].contribution_points, 0);
        assert_eq!(result.score, 10);
        assert_eq!(result.tier, RiskTier::VeryLow);
    }

    #[test]
    fn completed_project_keeps_residual_weight() {
        let origin = pt(18.99, 72.85);
        let catalog = vec![point_project(
            "MTHL-01",
            ProjectPhase::Completed,
            north_of(&origin, 1.0),
        )];

        let result = assess(&origin, &catalog);
        assert!((result.contributions[0].distance_km - 1.0).abs() < 1e-6);
        assert_eq!(result.contributions[0].contribution_points, 5);
        assert_eq!(result.score, 15);
        assert_eq!(result.tier, RiskTier::VeryLow);
    }

    #[test]
    fn two_projects_sum_and_order_nearest_first() {
        let origin = pt(13.08, 80.27);
        let catalog = vec![
            point_project("proposed", ProjectPhase::Proposed, north_of(&origin, 4.0)),
            point_project(
                "construction",
                ProjectPhase::UnderConstruction,
                north_of(&origin, 0.3),
            ),
        ];

        let result = assess(&origin, &catalog);
        let ids: Vec<_> = result
            .contributions
            .iter()
            .map(|c| c.project_id.as_str())
            .collect();
        assert_eq!(ids, ["construction", "proposed"]);
        assert_eq!(result.contributions[0].contribution_points, 38);
        assert_eq!(result.contributions[1].contribution_points, 8);
        assert_eq!(result.score, 10 + 38 + 8);
        assert_eq!(result.tier, RiskTier::Medium);
    }

    #[test]
    fn score_equals_clamped_base_plus_contributions() {
        let origin = pt(12.97, 77.59);
        let catalog: Vec<_> = ProjectPhase::all()
            .iter()
            .enumerate()
            .map(|(i, phase)| {
                #[allow(clippy::cast_precision_loss)]
                let km = 0.4 * i as f64;
                point_project(&format!("p{i}"), *phase, north_of(&origin, km))
            })
            .collect();

        for base in [0_u8, 10, 50, 95] {
            let options = AssessOptions {
                base_score: base,
                ..AssessOptions::default()
            };
            let result = assess_risk(&origin, &catalog, &options).unwrap();
            let expected = (u32::from(base) + result.total_contribution()).min(95);
            assert_eq!(u32::from(result.score), expected);
            assert!(result.score <= 95);
            assert_eq!(result.tier, RiskTier::from_score(result.score));
        }
    }

    #[test]
    fn path_project_uses_nearest_segment() {
        let catalog = vec![InfrastructureProject {
            id: "BSRP-KA".to_string(),
            name: "Bangalore Suburban Rail".to_string(),
            project_type: ProjectType::Railway,
            phase: ProjectPhase::LandNotification,
            geometry: ProjectGeometry::Path {
                vertices: vec![pt(13.20, 77.50), pt(13.0285, 77.5197), pt(12.9716, 77.5946)],
            },
            influence_radius_meters: 300.0,
            state: Some("Karnataka".to_string()),
            description: None,
        }];

        // Midway between the second and third vertices.
        let result = assess(&pt(13.0, 77.557), &catalog);
        assert_eq!(result.contributions.len(), 1);
        assert!(result.contributions[0].distance_km < 0.5);
        assert_eq!(result.score, 70);
    }

    #[test]
    fn negative_radius_is_rejected() {
        let options = AssessOptions {
            max_radius_km: -1.0,
            ..AssessOptions::default()
        };
        let catalog: Vec<InfrastructureProject> = Vec::new();
        assert!(matches!(
            assess_risk(&pt(12.97, 77.59), &catalog, &options),
            Err(AssessError::InvalidOptions { .. })
        ));
    }
}
