//! HTTP front for Rolodex: mounts the record API under `/api` and puts the
//! auth gate in front of every route.

pub mod gate;
pub mod session;

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::{Router, http::Uri, middleware};
use rolodex_api::ApiError;
use rolodex_core::repository::ContactRepository;
use serde::Deserialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use gate::{Gate, GatePolicy};
use session::{CookieSession, SessionResolver};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `rolodex.toml` and
/// `ROLODEX_*` environment variables.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
  pub host:            String,
  pub port:            u16,
  pub store_path:      PathBuf,
  /// Import the bundled contacts when the store is empty at startup.
  pub seed_bundled:    bool,
  pub session_cookie:  String,
  pub login_path:      String,
  pub protected_paths: Vec<String>,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:            "127.0.0.1".to_owned(),
      port:            5000,
      store_path:      PathBuf::from("rolodex.db"),
      seed_bundled:    true,
      session_cookie:  "rolodex-session".to_owned(),
      login_path:      "/login".to_owned(),
      protected_paths: ["/dashboard", "/profile", "/add-listing", "/edit-listing"]
        .map(String::from)
        .to_vec(),
    }
  }
}

impl ServerConfig {
  /// Layer the optional TOML file at `path` under the environment.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix("ROLODEX")
          .try_parsing(true)
          .list_separator(",")
          .with_list_parse_key("protected_paths"),
      )
      .build()?
      .try_deserialize()
  }

  pub fn gate_policy(&self) -> GatePolicy {
    GatePolicy::new(self.login_path.clone(), self.protected_paths.iter().cloned())
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the server router with the stock cookie-based session check.
pub fn router<S>(store: Arc<S>, config: &ServerConfig) -> Router
where
  S: ContactRepository + 'static,
{
  let sessions = Arc::new(CookieSession::new(config.session_cookie.clone()));
  router_with_sessions(store, config, sessions)
}

/// Build the server router with a caller-supplied [`SessionResolver`].
pub fn router_with_sessions<S>(
  store:    Arc<S>,
  config:   &ServerConfig,
  sessions: Arc<dyn SessionResolver>,
) -> Router
where
  S: ContactRepository + 'static,
{
  let gate_state = Arc::new(Gate { policy: config.gate_policy(), sessions });

  Router::new()
    .nest("/api", rolodex_api::api_router(store))
    .fallback(not_found)
    .layer(middleware::from_fn_with_state(gate_state, gate::enforce))
    .layer(CorsLayer::permissive())
    .layer(TraceLayer::new_for_http())
}

async fn not_found(uri: Uri) -> ApiError {
  ApiError::NotFound(format!("not found: {}", uri.path()))
}

#[cfg(test)]
mod tests;
