//! Catalog snapshots and the handle that publishes them.

use std::{
    collections::BTreeSet,
    path::Path,
    sync::{Arc, PoisonError, RwLock},
};

use laras_project_models::{InfrastructureProject, ProjectPhase, ProjectType};
use serde::Deserialize;

use crate::{CatalogError, geojson_import, record::ProjectRecord};

#[derive(Deserialize)]
struct SeedFile {
    #[serde(default)]
    projects: Vec<ProjectRecord>,
}

/// An immutable set of projects with unique IDs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogSnapshot {
    source: String,
    projects: Vec<InfrastructureProject>,
}

impl CatalogSnapshot {
    /// Builds a snapshot from already-normalized projects.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateId`] if two projects share an ID.
    pub fn new(
        source: impl Into<String>,
        projects: Vec<InfrastructureProject>,
    ) -> Result<Self, CatalogError> {
        let mut seen = BTreeSet::new();
        for project in &projects {
            if !seen.insert(project.id.as_str()) {
                return Err(CatalogError::DuplicateId {
                    id: project.id.clone(),
                });
            }
        }

        let source = source.into();
        log::info!("Loaded {} project(s) from {source}", projects.len());

        Ok(Self { source, projects })
    }

    /// Builds a snapshot from raw records, dropping records that have no
    /// coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if any record is malformed or IDs repeat.
    pub fn from_records(
        source: impl Into<String>,
        records: Vec<ProjectRecord>,
    ) -> Result<Self, CatalogError> {
        let mut projects = Vec::with_capacity(records.len());
        for record in records {
            if let Some(project) = record.into_project()? {
                projects.push(project);
            }
        }
        Self::new(source, projects)
    }

    /// Parses a TOML catalog with a `[[projects]]` array.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if parsing or normalization fails.
    pub fn from_toml_str(source: impl Into<String>, input: &str) -> Result<Self, CatalogError> {
        let file: SeedFile = toml::de::from_str(input)?;
        Self::from_records(source, file.projects)
    }

    /// Parses a `GeoJSON` feature collection.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if parsing or normalization fails.
    pub fn from_geojson_str(source: impl Into<String>, input: &str) -> Result<Self, CatalogError> {
        Self::from_records(source, geojson_import::parse_records(input)?)
    }

    /// Loads a catalog file, choosing the format by extension (`.toml`,
    /// `.geojson`, or `.json`).
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the file cannot be read, has an
    /// unsupported extension, or fails to parse.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let source = path.display().to_string();

        match extension.as_deref() {
            Some("toml") => Self::from_toml_str(source, &std::fs::read_to_string(path)?),
            Some("geojson" | "json") => {
                Self::from_geojson_str(source, &std::fs::read_to_string(path)?)
            }
            _ => Err(CatalogError::Format {
                message: format!("cannot infer catalog format of {source}"),
            }),
        }
    }

    /// Where this snapshot was loaded from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// All projects, in source order.
    #[must_use]
    pub fn projects(&self) -> &[InfrastructureProject] {
        &self.projects
    }

    /// Looks up a project by ID.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&InfrastructureProject> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Number of projects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// Whether the snapshot holds no projects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Projects matching `filter`.
    pub fn filter<'a>(
        &'a self,
        filter: &'a ProjectFilter,
    ) -> impl Iterator<Item = &'a InfrastructureProject> + 'a {
        self.projects.iter().filter(move |p| filter.matches(p))
    }
}

/// Criteria for listing projects. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFilter {
    /// Only this type.
    pub project_type: Option<ProjectType>,
    /// Only this phase.
    pub phase: Option<ProjectPhase>,
    /// Only this state, compared case-insensitively.
    pub state: Option<String>,
}

impl ProjectFilter {
    /// Whether `project` satisfies every set criterion.
    #[must_use]
    pub fn matches(&self, project: &InfrastructureProject) -> bool {
        self.project_type.is_none_or(|t| t == project.project_type)
            && self.phase.is_none_or(|p| p == project.phase)
            && self.state.as_deref().is_none_or(|state| {
                project
                    .state
                    .as_deref()
                    .is_some_and(|s| s.eq_ignore_ascii_case(state))
            })
    }
}

/// Holder of the current catalog snapshot.
///
/// Readers take an `Arc` to the current snapshot and keep it for as long
/// as they need; [`CatalogHandle::publish`] swaps in a replacement without
/// touching snapshots already handed out.
#[derive(Debug)]
pub struct CatalogHandle {
    current: RwLock<Arc<CatalogSnapshot>>,
}

impl CatalogHandle {
    /// Creates a handle serving `snapshot`.
    #[must_use]
    pub fn new(snapshot: CatalogSnapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(snapshot)),
        }
    }

    /// The snapshot currently being served.
    #[must_use]
    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Replaces the served snapshot, returning the previous one.
    pub fn publish(&self, snapshot: CatalogSnapshot) -> Arc<CatalogSnapshot> {
        log::info!(
            "Publishing catalog snapshot from {} ({} project(s))",
            snapshot.source(),
            snapshot.len()
        );
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *current, Arc::new(snapshot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOML: &str = r#"
        [[projects]]
        id = "A"
        name = "Alpha Expressway"
        type = "highway"
        phase = "land_notification"
        state = "Haryana"
        coordinates = [[28.45, 77.02], [28.40, 76.90]]

        [[projects]]
        id = "B"
        name = "Beta Airport"
        type = "airport"
        phase = "approved"
        state = "Tamil Nadu"
        coordinates = [[12.93, 79.78]]

        [[projects]]
        id = "C"
        name = "Gamma Port (location pending)"
        type = "port"
        phase = "proposed"
    "#;

    #[test]
    fn toml_catalog_skips_records_without_geometry() {
        let catalog = CatalogSnapshot::from_toml_str("test", TOML).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.get("C").is_none());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut projects = CatalogSnapshot::from_toml_str("test", TOML)
            .unwrap()
            .projects()
            .to_vec();
        projects.push(projects[0].clone());

        assert!(matches!(
            CatalogSnapshot::new("test", projects),
            Err(CatalogError::DuplicateId { id }) if id == "A"
        ));
    }

    #[test]
    fn filter_by_type_phase_and_state() {
        let catalog = CatalogSnapshot::from_toml_str("test", TOML).unwrap();

        let by_state = ProjectFilter {
            state: Some("tamil nadu".to_string()),
            ..ProjectFilter::default()
        };
        let ids: Vec<_> = catalog.filter(&by_state).map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["B"]);

        let by_phase = ProjectFilter {
            phase: Some(ProjectPhase::LandNotification),
            project_type: Some(ProjectType::Highway),
            ..ProjectFilter::default()
        };
        assert_eq!(catalog.filter(&by_phase).count(), 1);

        assert_eq!(catalog.filter(&ProjectFilter::default()).count(), 2);
    }

    #[test]
    fn publish_leaves_existing_readers_untouched() {
        let handle = CatalogHandle::new(CatalogSnapshot::from_toml_str("v1", TOML).unwrap());
        let in_flight = handle.snapshot();

        let previous = handle.publish(CatalogSnapshot::default());

        assert_eq!(in_flight.len(), 2);
        assert_eq!(previous.source(), "v1");
        assert!(handle.snapshot().is_empty());
    }

    #[test]
    fn unknown_extension_is_rejected() {
        assert!(matches!(
            CatalogSnapshot::load(Path::new("catalog.csv")),
            Err(CatalogError::Format { .. })
        ));
    }
}
