//! HTTP handler functions for the land acquisition risk API.

use actix_web::{HttpResponse, web};
use chrono::Utc;
use laras_catalog::ProjectFilter;
use laras_geocoder::{LocationPrecision, ResolvedLocation};
use laras_project_models::{ProjectPhase, ProjectType};
use laras_risk::{AssessError, assess_risk};
use laras_server_models::{
    ApiAssessment, ApiCatalogStatus, ApiHealth, ApiProject, AssessRequest, ProjectQueryParams,
};

use crate::{AppState, load_catalog};

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/projects`
///
/// Lists catalog projects, optionally filtered by type, phase, and state.
pub async fn projects(
    state: web::Data<AppState>,
    params: web::Query<ProjectQueryParams>,
) -> HttpResponse {
    let filter = match parse_filter(&params) {
        Ok(filter) => filter,
        Err(message) => return bad_request(message),
    };

    let catalog = state.catalog.snapshot();
    let projects: Vec<ApiProject> = catalog.filter(&filter).map(ApiProject::from).collect();

    HttpResponse::Ok().json(projects)
}

/// `GET /api/projects/{id}`
pub async fn project(state: web::Data<AppState>, id: web::Path<String>) -> HttpResponse {
    let catalog = state.catalog.snapshot();
    catalog.get(&id).map_or_else(
        || {
            HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Unknown project '{id}'")
            }))
        },
        |project| HttpResponse::Ok().json(ApiProject::from(project)),
    )
}

/// `POST /api/assess`
///
/// Assesses a point, or a location resolved through the geocoder with
/// gazetteer fallback, against the current catalog snapshot.
pub async fn assess(state: web::Data<AppState>, body: web::Json<AssessRequest>) -> HttpResponse {
    let request = body.into_inner();

    let location = match (request.point, request.location) {
        (Some(point), None) => ResolvedLocation {
            point,
            precision: LocationPrecision::Exact,
            label: point.to_string(),
        },
        (None, Some(query)) => {
            if query.state.trim().is_empty() {
                return bad_request("location.state is required".to_string());
            }
            state.resolver.resolve(&query).await
        }
        (Some(_), Some(_)) => {
            return bad_request("Provide either a point or a location, not both".to_string());
        }
        (None, None) => return bad_request("Provide a point or a location".to_string()),
    };

    let catalog = state.catalog.snapshot();

    match assess_risk(&location.point, catalog.projects(), &request.options) {
        Ok(assessment) => HttpResponse::Ok().json(ApiAssessment {
            id: uuid::Uuid::new_v4().to_string(),
            assessed_at: Utc::now(),
            location: location.into(),
            assessment,
        }),
        Err(e @ AssessError::InvalidOptions { .. }) => bad_request(e.to_string()),
        Err(e) => {
            log::error!("Failed to assess {}: {e}", location.point);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to assess risk"
            }))
        }
    }
}

/// `POST /api/catalog/reload`
///
/// Re-reads the configured catalog source and publishes it. Assessments
/// already running keep the snapshot they started with.
pub async fn reload_catalog(state: web::Data<AppState>) -> HttpResponse {
    let path = state.catalog_path.clone();

    match web::block(move || load_catalog(path.as_deref())).await {
        Ok(Ok(snapshot)) => {
            let status = ApiCatalogStatus {
                source: snapshot.source().to_string(),
                project_count: snapshot.len(),
            };
            state.catalog.publish(snapshot);
            HttpResponse::Ok().json(status)
        }
        Ok(Err(e)) => {
            log::error!("Failed to reload catalog: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Failed to reload catalog: {e}")
            }))
        }
        Err(e) => {
            log::error!("Catalog reload task failed: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to reload catalog"
            }))
        }
    }
}

/// Parses project listing filters. Unknown values are an error rather
/// than being silently ignored.
fn parse_filter(params: &ProjectQueryParams) -> Result<ProjectFilter, String> {
    let project_type = params
        .project_type
        .as_deref()
        .map(|raw| {
            ProjectType::canonicalize(raw).ok_or_else(|| format!("Unknown project type '{raw}'"))
        })
        .transpose()?;

    let phase = params
        .phase
        .as_deref()
        .map(|raw| ProjectPhase::canonicalize(raw).ok_or_else(|| format!("Unknown phase '{raw}'")))
        .transpose()?;

    Ok(ProjectFilter {
        project_type,
        phase,
        state: params.state.clone(),
    })
}

fn bad_request(message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": message }))
}
