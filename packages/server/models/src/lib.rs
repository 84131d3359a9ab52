#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the land acquisition risk server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the engine types to allow independent evolution of the API
//! contract.

use chrono::{DateTime, Utc};
use laras_geocoder_models::{LocationPrecision, LocationQuery, ResolvedLocation};
use laras_project_models::{
    GeoPoint, InfrastructureProject, ProjectGeometry, ProjectPhase, ProjectType,
};
use laras_risk_models::{AssessOptions, RiskAssessment};
use serde::{Deserialize, Serialize};

/// Server health.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Always `true` when the server answers.
    pub healthy: bool,
    /// Server version.
    pub version: String,
}

/// An infrastructure project as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiProject {
    /// Unique project ID.
    pub id: String,
    /// Project name.
    pub name: String,
    /// Kind of infrastructure.
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    /// Display label for the type.
    pub type_label: String,
    /// Current lifecycle phase.
    pub phase: ProjectPhase,
    /// Display label for the phase.
    pub phase_label: String,
    /// Spatial footprint.
    pub geometry: ProjectGeometry,
    /// Buffer radius in meters.
    pub influence_radius_meters: f64,
    /// State the project is filed under.
    pub state: Option<String>,
    /// Short description.
    pub description: Option<String>,
}

impl From<&InfrastructureProject> for ApiProject {
    fn from(project: &InfrastructureProject) -> Self {
        Self {
            id: project.id.clone(),
            name: project.name.clone(),
            project_type: project.project_type,
            type_label: project.project_type.label().to_string(),
            phase: project.phase,
            phase_label: project.phase.label().to_string(),
            geometry: project.geometry.clone(),
            influence_radius_meters: project.influence_radius_meters,
            state: project.state.clone(),
            description: project.description.clone(),
        }
    }
}

/// Query parameters for the projects endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectQueryParams {
    /// Only projects of this type.
    #[serde(rename = "type")]
    pub project_type: Option<String>,
    /// Only projects in this phase.
    pub phase: Option<String>,
    /// Only projects filed under this state.
    pub state: Option<String>,
}

/// Body of an assessment request.
///
/// Exactly one of `point` and `location` must be set.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessRequest {
    /// Coordinates to assess.
    #[serde(default)]
    pub point: Option<GeoPoint>,
    /// A place to resolve and assess.
    #[serde(default)]
    pub location: Option<LocationQuery>,
    /// Engine tuning; missing fields take their defaults.
    #[serde(default)]
    pub options: AssessOptions,
}

/// Where an assessment was run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiLocation {
    /// The assessed point.
    pub point: GeoPoint,
    /// How the point was obtained.
    pub precision: LocationPrecision,
    /// Whether the point is a stand-in for the requested location.
    pub approximate: bool,
    /// Human-readable description of the place.
    pub label: String,
}

impl From<ResolvedLocation> for ApiLocation {
    fn from(location: ResolvedLocation) -> Self {
        Self {
            approximate: location.approximate(),
            point: location.point,
            precision: location.precision,
            label: location.label,
        }
    }
}

/// Response of the assessment endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiAssessment {
    /// Unique ID for this assessment.
    pub id: String,
    /// When the assessment was computed.
    pub assessed_at: DateTime<Utc>,
    /// Where the assessment was run.
    pub location: ApiLocation,
    /// Score, tier, contributions, and recommendations.
    pub assessment: RiskAssessment,
}

/// Response of the catalog reload endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCatalogStatus {
    /// Where the served catalog was loaded from.
    pub source: String,
    /// Number of projects served.
    pub project_count: usize,
}
