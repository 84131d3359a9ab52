#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for land acquisition risk assessments.
//!
//! Serves the project catalog and the assessment endpoint. The catalog
//! is the embedded seed unless `LARAS_CATALOG_PATH` names a TOML or
//! `GeoJSON` file; `POST /api/catalog/reload` re-reads that file and
//! swaps it in without interrupting in-flight assessments.

mod handlers;

use std::{path::PathBuf, sync::Arc, time::Duration};

use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, error::InternalError, middleware, web};
use laras_catalog::{CatalogError, CatalogHandle, CatalogSnapshot};
use laras_geocoder::{Gazetteer, GeocodeError, GeocoderConfig, LocationResolver, create_geocoders};
use thiserror::Error;

/// Errors that stop the server from starting.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The project catalog could not be loaded.
    #[error("Failed to load catalog: {0}")]
    Catalog(#[from] CatalogError),

    /// The gazetteer or geocoder settings could not be loaded.
    #[error("Failed to load geocoder data: {0}")]
    Geocode(#[from] GeocodeError),

    /// The HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),

    /// Binding or serving failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Runtime configuration, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind (`BIND_ADDR`, default `127.0.0.1`).
    pub bind_addr: String,
    /// Port to bind (`PORT`, default `8080`).
    pub port: u16,
    /// Catalog file overriding the embedded seed (`LARAS_CATALOG_PATH`).
    pub catalog_path: Option<PathBuf>,
    /// Geocoding timeout (`GEOCODE_TIMEOUT_MS`), overriding the embedded
    /// geocoder settings.
    pub geocode_timeout: Option<Duration>,
    /// Skip network geocoding entirely (`LARAS_GEOCODER=offline`).
    pub offline_geocoding: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1".to_string(),
            port: 8080,
            catalog_path: None,
            geocode_timeout: None,
            offline_geocoding: false,
        }
    }
}

impl ServerConfig {
    /// Reads the configuration from environment variables, using defaults
    /// for anything unset or unparseable.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            catalog_path: lookup("LARAS_CATALOG_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            geocode_timeout: lookup("GEOCODE_TIMEOUT_MS")
                .and_then(|ms| ms.parse().ok())
                .map(Duration::from_millis)
                .or(defaults.geocode_timeout),
            offline_geocoding: lookup("LARAS_GEOCODER")
                .is_some_and(|g| g.eq_ignore_ascii_case("offline")),
        }
    }
}

/// Shared application state.
#[derive(Debug)]
pub struct AppState {
    /// The project catalog being served.
    pub catalog: CatalogHandle,
    /// Turns location queries into points.
    pub resolver: LocationResolver,
    /// Catalog file to reload from, if any.
    pub catalog_path: Option<PathBuf>,
}

/// Loads the catalog from `path`, or the embedded seed if `None`.
///
/// # Errors
///
/// Returns [`CatalogError`] if the catalog cannot be read or parsed.
pub fn load_catalog(path: Option<&std::path::Path>) -> Result<CatalogSnapshot, CatalogError> {
    path.map_or_else(laras_catalog::seed, CatalogSnapshot::load)
}

/// Builds the application state for `config`.
///
/// # Errors
///
/// Returns [`ServerError`] if the catalog or gazetteer cannot be loaded or
/// the HTTP client cannot be built.
pub fn build_state(config: &ServerConfig) -> Result<AppState, ServerError> {
    log::info!("Loading project catalog...");
    let catalog = load_catalog(config.catalog_path.as_deref())?;

    log::info!("Loading gazetteer...");
    let gazetteer = Arc::new(Gazetteer::embedded()?);

    let resolver = if config.offline_geocoding {
        log::info!("Network geocoding disabled, using the offline gazetteer only");
        LocationResolver::offline(gazetteer)
    } else {
        let geocoder_config = GeocoderConfig::embedded()?;
        let timeout = config
            .geocode_timeout
            .unwrap_or_else(|| geocoder_config.timeout());
        let client = reqwest::Client::builder()
            .user_agent(concat!("laras/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let geocoders = create_geocoders(&client, &geocoder_config);
        LocationResolver::new(geocoders, gazetteer, timeout)
    };

    Ok(AppState {
        catalog: CatalogHandle::new(catalog),
        resolver,
        catalog_path: config.catalog_path.clone(),
    })
}

/// Registers the `/api` routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(serde_json::json!({ "error": message })),
        )
        .into()
    }))
    .service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/projects", web::get().to(handlers::projects))
            .route("/projects/{id}", web::get().to(handlers::project))
            .route("/assess", web::post().to(handlers::assess))
            .route("/catalog/reload", web::post().to(handlers::reload_catalog)),
    );
}

/// Starts the land acquisition risk API server.
///
/// Reads [`ServerConfig`] from the environment, loads the catalog and
/// gazetteer, and starts the Actix-Web HTTP server. The caller is
/// responsible for providing the async runtime (e.g. via
/// `#[actix_web::main]`).
///
/// # Errors
///
/// Returns [`ServerError`] if startup data cannot be loaded, or the HTTP
/// server fails to bind or encounters a runtime error.
pub async fn run_server() -> Result<(), ServerError> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let config = ServerConfig::from_env();
    let state = web::Data::new(build_state(&config)?);

    log::info!("Starting server on {}:{}", config.bind_addr, config.port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((config.bind_addr.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
