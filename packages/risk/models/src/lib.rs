#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Risk tier, contribution, and assessment types.
//!
//! An assessment is produced once per query point and never persisted by
//! the engine; whether to store it is the caller's decision.

use laras_project_models::{ProjectPhase, ProjectType};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Score every assessment starts from before any project contributes.
pub const DEFAULT_BASE_SCORE: u8 = 10;

/// Projects at or beyond this distance are not considered at all.
pub const DEFAULT_MAX_RADIUS_KM: f64 = 50.0;

/// Qualitative risk bucket, ordered from least to most severe.
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
pub enum RiskTier {
    /// Score 0-20
    VeryLow,
    /// Score 21-40
    Low,
    /// Score 41-60
    Medium,
    /// Score 61-80
    High,
    /// Score above 80
    Critical,
}

impl RiskTier {
    /// Maps a score to its tier. Upper bounds are inclusive.
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        match score {
            0..=20 => Self::VeryLow,
            21..=40 => Self::Low,
            41..=60 => Self::Medium,
            61..=80 => Self::High,
            _ => Self::Critical,
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::VeryLow => "Very Low Risk",
            Self::Low => "Low Risk",
            Self::Medium => "Medium Risk",
            Self::High => "High Risk",
            Self::Critical => "Critical Risk",
        }
    }

    /// Returns all variants of this enum, least severe first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::VeryLow,
            Self::Low,
            Self::Medium,
            Self::High,
            Self::Critical,
        ]
    }
}

/// One project's share of an assessment score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectContribution {
    /// Contributing project ID.
    pub project_id: String,
    /// Project name.
    pub project_name: String,
    /// Kind of infrastructure.
    pub project_type: ProjectType,
    /// Lifecycle phase at scoring time.
    pub phase: ProjectPhase,
    /// Distance from the assessed point to the project geometry.
    pub distance_km: f64,
    /// Whether the point lies inside the project's influence radius.
    pub within_influence_radius: bool,
    /// Points added to the score. Zero for projects 5 km or further away;
    /// those are reported for transparency only.
    pub contribution_points: u32,
}

/// The result of assessing one point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    /// Bounded score, 0-95.
    pub score: u8,
    /// Tier derived from `score`.
    pub tier: RiskTier,
    /// Score the assessment started from.
    pub base_score: u8,
    /// Per-project contributions, nearest first.
    pub contributions: Vec<ProjectContribution>,
    /// Advisory items, most urgent first.
    pub recommendations: Vec<String>,
    /// One-sentence summary of the tier.
    pub summary: String,
}

impl RiskAssessment {
    /// Sum of all project contributions, before clamping.
    #[must_use]
    pub fn total_contribution(&self) -> u32 {
        self.contributions.iter().map(|c| c.contribution_points).sum()
    }
}

/// Per-call tuning for an assessment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssessOptions {
    /// Relevance radius for proximity resolution, in kilometers.
    pub max_radius_km: f64,
    /// Starting score.
    pub base_score: u8,
}

impl Default for AssessOptions {
    fn default() -> Self {
        Self {
            max_radius_km: DEFAULT_MAX_RADIUS_KM,
            base_score: DEFAULT_BASE_SCORE,
        }
    }
}
