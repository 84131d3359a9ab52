//! Phase-weighted, distance-decayed scoring of proximity results.
//!
//! Each nearby project adds `round(phase_weight * impact_factor)` points
//! to a base score. The total is capped at [`SCORE_CEILING`] so that no
//! assessment reads as a certainty.

use laras_project_models::ProjectPhase;
use laras_risk_models::{ProjectContribution, RiskTier};
use laras_spatial::{GeometryError, proximity::ProximityResult};

/// Highest score an assessment can reach.
pub const SCORE_CEILING: u8 = 95;

/// Distance-decay bands: `(exclusive upper bound in km, impact factor)`.
const IMPACT_BANDS: &[(f64, f64)] = &[(0.5, 1.5), (2.0, 1.0), (5.0, 0.5)];

/// Score, tier, and explainability for a set of proximity results.
#[derive(Debug, Clone, PartialEq)]
pub struct Scorecard {
    /// Clamped score.
    pub score: u8,
    /// Tier derived from `score`.
    pub tier: RiskTier,
    /// Per-project contributions, nearest first.
    pub contributions: Vec<ProjectContribution>,
}

/// Impact multiplier for a project at `distance_km`.
///
/// `1.5` under 0.5 km, `1.0` under 2 km, `0.5` under 5 km, otherwise `0`.
#[must_use]
pub fn impact_factor(distance_km: f64) -> f64 {
    IMPACT_BANDS
        .iter()
        .find(|(limit, _)| distance_km < *limit)
        .map_or(0.0, |(_, factor)| *factor)
}

/// Weight of a lifecycle phase; higher for more imminent acquisition.
///
/// Completed projects keep a small residual weight for realized impact.
#[must_use]
pub const fn phase_weight(phase: ProjectPhase) -> u32 {
    match phase {
        ProjectPhase::LandNotification => 40,
        ProjectPhase::TenderFloated => 30,
        ProjectPhase::UnderConstruction => 25,
        ProjectPhase::Approved => 20,
        ProjectPhase::Proposed | ProjectPhase::Ongoing => 15,
        ProjectPhase::DprPreparation | ProjectPhase::FeasibilityStudy => 10,
        ProjectPhase::Completed => 5,
    }
}

/// Points a project in `phase` at `distance_km` adds to the score.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn contribution_points(phase: ProjectPhase, distance_km: f64) -> u32 {
    // Bounded by 40 * 1.5, so the cast cannot truncate.
    (f64::from(phase_weight(phase)) * impact_factor(distance_km)).round() as u32
}

/// Scores proximity results against `base_score`.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidState`] if any result carries a
/// negative or non-finite distance.
pub fn score(results: &[ProximityResult<'_>], base_score: u8) -> Result<Scorecard, GeometryError> {
    let mut total = u32::from(base_score);
    let mut contributions = Vec::with_capacity(results.len());

    for result in results {
        if !result.distance_km.is_finite() || result.distance_km < 0.0 {
            return Err(GeometryError::InvalidState {
                message: format!(
                    "distance {} km for project {} is not a non-negative number",
                    result.distance_km, result.project.id
                ),
            });
        }

        let points = contribution_points(result.project.phase, result.distance_km);
        log::debug!(
            "Project {} ({}) at {:.3} km contributes {points}",
            result.project.id,
            result.project.phase,
            result.distance_km
        );
        total += points;

        contributions.push(ProjectContribution {
            project_id: result.project.id.clone(),
            project_name: result.project.name.clone(),
            project_type: result.project.project_type,
            phase: result.project.phase,
            distance_km: result.distance_km,
            within_influence_radius: result.within_influence_radius(),
            contribution_points: points,
        });
    }

    contributions.sort_by(|a, b| {
        a.distance_km
            .total_cmp(&b.distance_km)
            .then_with(|| a.project_id.cmp(&b.project_id))
    });

    let score = u8::try_from(total.min(u32::from(SCORE_CEILING))).unwrap_or(SCORE_CEILING);

    Ok(Scorecard {
        score,
        tier: RiskTier::from_score(score),
        contributions,
    })
}
