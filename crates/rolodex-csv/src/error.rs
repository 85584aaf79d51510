//! Error types for the rolodex-csv codec. Every variant means the file was
//! not imported at all.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("not a CSV file: {0}")]
  WrongFileType(String),

  #[error("CSV input has no header row")]
  EmptyInput,

  #[error("missing required columns: {}", .0.join(", "))]
  MissingColumns(Vec<String>),

  #[error("malformed CSV: {0}")]
  Csv(#[from] csv::Error),

  #[error("cannot read CSV file: {0}")]
  Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
