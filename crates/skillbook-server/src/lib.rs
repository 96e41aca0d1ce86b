//! HTTP server assembly for Skillbook: configuration, middleware, and the
//! top-level router.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
  time::Duration,
};

use axum::{
  Router,
  http::{
    HeaderValue, Method,
    header::{CONTENT_TYPE, InvalidHeaderValue},
  },
  routing::get,
};
use serde::Deserialize;
use skillbook_core::{notification::Notification, progress::LearningProgress, repository::Repository};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration.
///
/// Layered from built-in defaults, then `config.toml` (if present), then
/// `SKILLBOOK_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:        String,
  pub port:        u16,
  pub store_path:  PathBuf,
  /// The single browser origin allowed to call the API cross-origin.
  pub cors_origin: String,
}

impl ServerConfig {
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .set_default("host", "127.0.0.1")?
      .set_default("port", 8080)?
      .set_default("store_path", "skillbook.db")?
      .set_default("cors_origin", "http://localhost:3000")?
      .add_source(config::File::from(path.to_path_buf()).required(false))
      .add_source(config::Environment::with_prefix("SKILLBOOK").try_parsing(true))
      .build()?
      .try_deserialize()
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// CORS policy admitting `origin` only. Requests from any other origin get no
/// `Access-Control-Allow-Origin` header.
pub fn cors_layer(origin: &str) -> Result<CorsLayer, InvalidHeaderValue> {
  Ok(
    CorsLayer::new()
      .allow_origin([origin.parse::<HeaderValue>()?])
      .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
      .allow_headers([CONTENT_TYPE])
      .max_age(Duration::from_secs(3600)),
  )
}

/// Build the full application: API routes, `/health`, request tracing, CORS.
pub fn router<S>(store: Arc<S>, cors: CorsLayer) -> Router
where
  S: Repository<LearningProgress> + Repository<Notification> + 'static,
{
  Router::new()
    .route("/health", get(|| async { "ok" }))
    .merge(skillbook_api::api_router(store))
    .layer(TraceLayer::new_for_http())
    .layer(cors)
}
