//! Error types for `rolodex-core`.

use thiserror::Error;

use crate::contact::{ContactId, Field};

#[derive(Debug, Error)]
pub enum Error {
  #[error("contact not found: {0}")]
  NotFound(ContactId),

  /// A record lacks one or more of `name`, `email`, `company`.
  /// `position` is the 1-based index within a batch, if any.
  #[error("{}", describe_missing(.position, .missing))]
  Validation {
    position: Option<usize>,
    missing:  Vec<Field>,
  },

  #[error("duplicate contact id: {0}")]
  DuplicateId(ContactId),

  #[error("unknown field: {0:?}")]
  UnknownField(String),

  #[error("field {0} is maintained by the store and cannot be edited")]
  ReadOnlyField(Field),

  #[error("unknown sort direction: {0:?}")]
  UnknownDirection(String),

  #[error("invalid timestamp: {0:?}")]
  InvalidTimestamp(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

impl Error {
  pub fn is_not_found(&self) -> bool { matches!(self, Self::NotFound(_)) }

  pub fn is_validation(&self) -> bool { matches!(self, Self::Validation { .. }) }
}

fn describe_missing(position: &Option<usize>, missing: &[Field]) -> String {
  let fields = missing
    .iter()
    .map(|f| f.as_str())
    .collect::<Vec<_>>()
    .join(", ");
  match position {
    Some(n) => format!("record {n}: missing required fields: {fields}"),
    None => format!("missing required fields: {fields}"),
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
