//! Route gate: keeps anonymous visitors out of protected pages and bounces
//! signed-in visitors away from the login page.

use std::sync::Arc;

use axum::{
  extract::{Request, State},
  middleware::Next,
  response::{IntoResponse, Redirect, Response},
};

use crate::session::SessionResolver;

/// Outcome of [`GatePolicy::decide`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
  Pass,
  /// Redirect to the login page; carries the full `Location`.
  ToLogin(String),
  ToHome,
}

/// Which paths are protected and where the login page lives.
#[derive(Debug, Clone)]
pub struct GatePolicy {
  login_path: String,
  protected:  Vec<String>,
}

impl GatePolicy {
  pub fn new(login_path: impl Into<String>, protected: impl IntoIterator<Item = String>) -> Self {
    Self {
      login_path: login_path.into(),
      protected:  protected
        .into_iter()
        .map(|p| p.trim_end_matches('/').to_owned())
        .filter(|p| !p.is_empty())
        .collect(),
    }
  }

  /// `true` when `path` is a protected prefix or lies beneath one.
  pub fn is_protected(&self, path: &str) -> bool {
    self.protected.iter().any(|prefix| {
      path
        .strip_prefix(prefix.as_str())
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    })
  }

  pub fn decide(&self, path: &str, has_session: bool) -> Decision {
    if !has_session && self.is_protected(path) {
      let from: String = url::form_urlencoded::byte_serialize(path.as_bytes()).collect();
      return Decision::ToLogin(format!("{}?redirectedFrom={from}", self.login_path));
    }
    if has_session && path == self.login_path {
      return Decision::ToHome;
    }
    Decision::Pass
  }
}

/// Policy plus the session source, shared as middleware state.
#[derive(Clone)]
pub struct Gate {
  pub policy:   GatePolicy,
  pub sessions: Arc<dyn SessionResolver>,
}

/// axum middleware applying [`Gate`] to every request.
pub async fn enforce(State(gate): State<Arc<Gate>>, req: Request, next: Next) -> Response {
  let path = req.uri().path();
  let has_session = gate.sessions.has_session(req.headers());

  match gate.policy.decide(path, has_session) {
    Decision::Pass => next.run(req).await,
    Decision::ToLogin(location) => {
      tracing::debug!(%path, %location, "redirecting anonymous request to login");
      Redirect::temporary(&location).into_response()
    }
    Decision::ToHome => {
      tracing::debug!(%path, "redirecting signed-in request home");
      Redirect::temporary("/").into_response()
    }
  }
}
