//! CSV import codec for Rolodex.
//!
//! Decodes a header-led CSV document into [`NewContact`] inputs. Pure and
//! synchronous; the caller hands the result to
//! [`rolodex_core::Directory::add_batch`], which validates every row before
//! admitting any of them.
//!
//! # Format
//!
//! - The first row is the header. Names are matched case-insensitively.
//! - `name`, `email` and `company` columns are required; a document missing
//!   any of them is rejected as a whole.
//! - `phone`, `title`, `country`, `industry`, `notes` and `tags` are
//!   optional. Other columns (including store-maintained dates) are ignored.
//! - Quoted cells may contain commas, quotes and newlines.
//! - A `tags` cell is split on `;` or `,`.
//! - Blank rows are skipped; short rows leave the missing cells empty.
//!
//! ```
//! let rows = rolodex_csv::parse("Name,Email,Company\nAnn,a@x.com,\"Acme, Inc.\"\n").unwrap();
//! assert_eq!(rows[0].company, "Acme, Inc.");
//! ```

pub mod error;

use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use rolodex_core::{Field, NewContact};

pub use error::{Error, Result};

/// Parse a CSV document into contact inputs.
pub fn parse(input: &str) -> Result<Vec<NewContact>> {
  let input = input.strip_prefix('\u{feff}').unwrap_or(input);

  let mut reader = ReaderBuilder::new()
    .has_headers(true)
    .flexible(true)
    .trim(Trim::All)
    .from_reader(input.as_bytes());

  let headers = reader.headers()?.clone();
  if headers.iter().all(str::is_empty) {
    return Err(Error::EmptyInput);
  }
  let columns = map_columns(&headers)?;

  let mut rows = Vec::new();
  for record in reader.records() {
    let record = record?;
    if record.iter().all(str::is_empty) {
      continue;
    }
    rows.push(decode_row(&columns, &record));
  }

  tracing::debug!(rows = rows.len(), "decoded CSV import");
  Ok(rows)
}

/// Read and parse the file at `path`. Files without a `.csv` extension are
/// refused before they are read.
pub fn import_path(path: impl AsRef<Path>) -> Result<Vec<NewContact>> {
  let path = path.as_ref();
  let is_csv = path
    .extension()
    .and_then(|e| e.to_str())
    .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
  if !is_csv {
    return Err(Error::WrongFileType(path.display().to_string()));
  }
  parse(&std::fs::read_to_string(path)?)
}

/// Resolve each header to the field it feeds, or `None` for ignored
/// columns, and check that every required field has a column.
fn map_columns(headers: &StringRecord) -> Result<Vec<Option<Field>>> {
  let columns: Vec<Option<Field>> = headers
    .iter()
    .map(|h| {
      h.parse::<Field>()
        .ok()
        .filter(|f| !f.is_temporal())
    })
    .collect();

  let missing: Vec<String> = Field::REQUIRED
    .iter()
    .filter(|f| !columns.contains(&Some(**f)))
    .map(|f| f.as_str().to_owned())
    .collect();

  if missing.is_empty() {
    Ok(columns)
  } else {
    Err(Error::MissingColumns(missing))
  }
}

fn decode_row(columns: &[Option<Field>], record: &StringRecord) -> NewContact {
  let mut contact = NewContact::default();
  for (i, field) in columns.iter().enumerate() {
    let (Some(field), Some(value)) = (field, record.get(i)) else {
      continue;
    };
    // Only temporal fields are refused by `set`, and those were filtered
    // out of `columns`.
    let _ = contact.set(*field, value);
  }
  contact
}

#[cfg(test)]
mod tests {
  use super::*;
  use rolodex_core::Directory;

  #[test]
  fn parses_required_and_optional_columns() {
    let csv = "name,email,company,country,industry,tags\n\
               Ann,a@x.com,Acme,Canada,Tech,saas;b2b\n\
               Bob,b@y.com,Globex,,,\n";
    let rows = parse(csv).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].country.as_deref(), Some("Canada"));
    assert_eq!(rows[0].tags, vec!["saas".to_string(), "b2b".to_string()]);
    assert_eq!(rows[1].industry, None);
    assert!(rows[1].tags.is_empty());
  }

  #[test]
  fn headers_are_case_insensitive_and_reorderable() {
    let rows = parse(" Company , EMAIL,Name\nAcme,a@x.com,Ann\n").unwrap();
    assert_eq!(rows[0], NewContact::new("Ann", "a@x.com", "Acme"));
  }

  #[test]
  fn missing_required_header_names_every_gap() {
    let err = parse("name,country\nAnn,Peru\n").unwrap_err();
    assert_eq!(err.to_string(), "missing required columns: email, company");
  }

  #[test]
  fn quoted_cells_keep_commas() {
    let rows = parse("name,email,company,tags\n\"Lee, Ann\",a@x.com,\"Acme, Inc.\",\"a, b\"\n").unwrap();
    assert_eq!(rows[0].name, "Lee, Ann");
    assert_eq!(rows[0].company, "Acme, Inc.");
    assert_eq!(rows[0].tags.len(), 2);
  }

  #[test]
  fn blank_and_short_rows() {
    let rows = parse("name,email,company,country\n\nAnn,a@x.com\n,,,\n").unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].company, "");
  }

  #[test]
  fn unknown_and_date_columns_are_ignored() {
    let rows = parse("name,email,company,dateAdded,favourite\nAnn,a@x.com,Acme,2020-01-01,tea\n").unwrap();
    assert_eq!(rows[0], NewContact::new("Ann", "a@x.com", "Acme"));
  }

  #[test]
  fn empty_input_is_rejected() {
    assert!(matches!(parse(""), Err(Error::EmptyInput)));
  }

  #[test]
  fn byte_order_mark_is_tolerated() {
    let rows = parse("\u{feff}name,email,company\nAnn,a@x.com,Acme\n").unwrap();
    assert_eq!(rows.len(), 1);
  }

  #[test]
  fn import_is_all_or_nothing() {
    let mut d = Directory::from_contacts(rolodex_core::seed::bundled().unwrap()).unwrap();
    let before = d.len();

    assert!(parse("name,email\nAnn,a@x.com\n").is_err());
    assert_eq!(d.len(), before);

    let rows = parse("name,email,company\nAnn,a@x.com,Acme\nBob,,Globex\n").unwrap();
    let err = d.add_batch(rows).unwrap_err();
    assert!(err.is_validation());
    assert_eq!(d.len(), before);
  }

  #[test]
  fn import_path_checks_extension() {
    let dir = tempfile::tempdir().unwrap();
    let txt = dir.path().join("contacts.txt");
    std::fs::write(&txt, "name,email,company\nAnn,a@x.com,Acme\n").unwrap();
    assert!(matches!(import_path(&txt), Err(Error::WrongFileType(_))));

    let csv = dir.path().join("contacts.CSV");
    std::fs::copy(&txt, &csv).unwrap();
    assert_eq!(import_path(&csv).unwrap().len(), 1);

    assert!(matches!(import_path(dir.path().join("absent.csv")), Err(Error::Io(_))));
  }
}
