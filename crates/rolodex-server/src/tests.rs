//! Full-router tests: gate, API mount and fallback together.

use std::sync::Arc;

use axum::{
  body::Body,
  http::{Request, StatusCode, header},
  response::Response,
};
use rolodex_core::seed;
use rolodex_store_sqlite::SqliteStore;
use tower::ServiceExt as _;

use super::*;

async fn app() -> Router {
  let store = SqliteStore::open_in_memory().await.expect("in-memory store");
  store
    .import_contacts(&seed::bundled().unwrap())
    .await
    .unwrap();
  router(Arc::new(store), &ServerConfig::default())
}

async fn get(app: Router, uri: &str, cookie: Option<&str>) -> Response {
  let mut builder = Request::builder().uri(uri);
  if let Some(c) = cookie {
    builder = builder.header(header::COOKIE, c);
  }
  app.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap()
}

fn location(resp: &Response) -> &str {
  resp.headers()[header::LOCATION].to_str().unwrap()
}

#[tokio::test]
async fn protected_page_without_session_redirects_to_login() {
  let resp = get(app().await, "/dashboard/team", None).await;
  assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
  assert_eq!(location(&resp), "/login?redirectedFrom=%2Fdashboard%2Fteam");
}

#[tokio::test]
async fn login_with_session_redirects_home() {
  let resp = get(app().await, "/login", Some("rolodex-session=abc")).await;
  assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
  assert_eq!(location(&resp), "/");
}

#[tokio::test]
async fn protected_page_with_session_passes_through() {
  let resp = get(app().await, "/profile", Some("rolodex-session=abc")).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn api_is_mounted_and_ungated() {
  let resp = get(app().await, "/api/contacts", None).await;
  assert_eq!(resp.status(), StatusCode::OK);

  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  let contacts: Vec<rolodex_core::Contact> = serde_json::from_slice(&bytes).unwrap();
  assert_eq!(contacts.len(), seed::bundled().unwrap().len());
}

#[tokio::test]
async fn unknown_path_is_json_404() {
  let resp = get(app().await, "/nope", None).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);

  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
  assert_eq!(body["error"], "not found: /nope");
}

#[tokio::test]
async fn custom_session_resolver_is_consulted() {
  struct Always;
  impl SessionResolver for Always {
    fn has_session(&self, _: &axum::http::HeaderMap) -> bool { true }
  }

  let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
  let app = router_with_sessions(store, &ServerConfig::default(), Arc::new(Always));
  let resp = get(app, "/login", None).await;
  assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
}

// ─── Configuration ──────────────────────────────────────────────────────────

#[test]
fn missing_config_file_yields_defaults() {
  let dir = tempfile::tempdir().unwrap();
  let cfg = ServerConfig::load(&dir.path().join("absent.toml")).unwrap();
  assert_eq!(cfg.login_path, ServerConfig::default().login_path);
  assert_eq!(cfg.protected_paths.len(), 4);
}

#[test]
fn config_file_overrides_defaults() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("rolodex.toml");
  std::fs::write(
    &path,
    "port = 8080\nlogin_path = \"/signin\"\nprotected_paths = [\"/admin\"]\n",
  )
  .unwrap();

  let cfg = ServerConfig::load(&path).unwrap();
  assert_eq!(cfg.port, 8080);
  assert_eq!(cfg.login_path, "/signin");
  assert_eq!(cfg.protected_paths, ["/admin"]);
  assert_eq!(cfg.session_cookie, "rolodex-session");

  let policy = cfg.gate_policy();
  assert_eq!(
    policy.decide("/admin", false),
    gate::Decision::ToLogin("/signin?redirectedFrom=%2Fadmin".into())
  );
}
