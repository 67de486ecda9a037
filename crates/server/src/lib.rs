//! servicerec-server library crate
//!
//! Exposes `build_app`, `AppState` and `config` for integration tests.
//! The actual binary entrypoint is in `main.rs`.

mod actions;
mod clients;
pub mod config;
pub mod error;
mod middleware;
mod routes;

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use axum::{Extension, Router, middleware as axum_mw, routing::get};
use servicerec_core::{CodeTables, FilterRegistry};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use clients::{AttributesClient, RecommenderClient};
use config::Config;
use error::StartupError;
use middleware::ApiKeyAuth;

/// Shared state handed to every action
#[derive(Clone)]
pub struct AppState {
    registry: Arc<FilterRegistry>,
    recommender: RecommenderClient,
    attributes: AttributesClient,
    transfer_targets: Arc<BTreeMap<String, String>>,
}

impl AppState {
    /// Load code tables and set up the remote service clients
    pub fn from_config(config: &Config) -> Result<Self, StartupError> {
        let tables = match &config.code_tables_path {
            Some(path) => CodeTables::from_json_file(path)?,
            None => {
                let tables = CodeTables::bundled()?;
                tracing::warn!(
                    municipalities = tables.municipality.len(),
                    "CODE_TABLES_PATH not set; using the bundled sample code tables. \
                     Codes missing from them are dropped from filters"
                );
                tables
            }
        };
        let timeout = Duration::from_secs(config.http_timeout_secs);

        Ok(Self {
            registry: Arc::new(FilterRegistry::new(&tables)),
            recommender: RecommenderClient::new(
                &config.recommender_url,
                config.recommender_api_key.clone(),
                timeout,
            )?,
            attributes: AttributesClient::new(&config.attributes_url, timeout)?,
            transfer_targets: Arc::new(config.transfer_targets.iter().cloned().collect()),
        })
    }
}

/// Build the full application router with all routes and middleware.
///
/// Extracted from `main()` so integration tests can construct the app
/// without binding to a TCP port.
pub fn build_app(state: AppState, config: &Config) -> Router {
    let auth = ApiKeyAuth::new(config.api_key.clone());
    let rate_limiter = middleware::create_rate_limiter(config.rate_limit_rps);

    // Protected routes (require auth)
    let protected_routes = routes::action_routes()
        .layer(axum_mw::from_fn(middleware::auth::auth_middleware))
        .layer(Extension(auth))
        .layer(axum_mw::from_fn(middleware::rate_limit_middleware))
        .layer(Extension(rate_limiter));

    // build_recorder() + set_global_recorder() so repeated calls in tests
    // keep a valid handle instead of panicking on the second install.
    let recorder = metrics_exporter_prometheus::PrometheusBuilder::new().build_recorder();
    let prometheus_handle = recorder.handle();
    let _ = metrics::set_global_recorder(recorder);

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(routes::health::check))
        .route("/metrics", get(routes::metrics::get))
        .layer(Extension(prometheus_handle));

    let cors = if config.cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
        .layer(axum_mw::from_fn(middleware::audit_middleware))
        .layer(axum_mw::from_fn(middleware::request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum_mw::from_fn(middleware::metrics_middleware))
}
