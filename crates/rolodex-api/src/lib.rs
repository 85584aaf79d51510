//! JSON record API for Rolodex.
//!
//! Exposes an axum [`Router`] backed by any
//! [`rolodex_core::repository::ContactRepository`]. Auth, TLS, and transport
//! concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", rolodex_api::api_router(store.clone()))
//! ```

pub mod contacts;
pub mod error;

use std::sync::Arc;

use axum::{Router, routing::get};
use rolodex_core::repository::ContactRepository;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: ContactRepository + 'static,
{
  Router::new()
    .route("/contacts", get(contacts::list::<S>).post(contacts::create::<S>))
    .with_state(store)
}
