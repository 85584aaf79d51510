//! The `ContactRepository` trait: persistence behind the record API.
//!
//! Implemented by storage backends (e.g. `rolodex-store-sqlite`). The API
//! crate depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::contact::{Contact, NewContact};

/// A persistent contact collection with exactly the two operations the
/// record API exposes.
///
/// All methods return `Send` futures so the trait can be used from axum
/// handlers on a multi-threaded runtime.
pub trait ContactRepository: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Every stored contact, in insertion order.
  fn list_contacts(
    &self,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;

  /// Persist `input` under a fresh id with creation timestamps set by the
  /// repository. Callers validate required fields first.
  fn create_contact(
    &self,
    input: NewContact,
  ) -> impl Future<Output = Result<Contact, Self::Error>> + Send + '_;
}
