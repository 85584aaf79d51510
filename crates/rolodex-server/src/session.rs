//! Session detection for the auth gate.

use axum::http::{HeaderMap, header};

/// Decides whether a request carries an authenticated session.
///
/// The gate only needs a yes/no answer; verifying the session itself is the
/// identity provider's job.
pub trait SessionResolver: Send + Sync {
  fn has_session(&self, headers: &HeaderMap) -> bool;
}

/// Treats a non-empty cookie named `name` as a live session.
#[derive(Debug, Clone)]
pub struct CookieSession {
  name: String,
}

impl CookieSession {
  pub fn new(name: impl Into<String>) -> Self { Self { name: name.into() } }
}

impl SessionResolver for CookieSession {
  fn has_session(&self, headers: &HeaderMap) -> bool {
    headers
      .get_all(header::COOKIE)
      .iter()
      .filter_map(|v| v.to_str().ok())
      .flat_map(|v| v.split(';'))
      .filter_map(|pair| pair.split_once('='))
      .any(|(k, v)| k.trim() == self.name && !v.trim().is_empty())
  }
}
