//! Local data files in the `{"contacts": [...]}` shape.

use std::path::Path;

use anyhow::{Context, Result};
use rolodex_core::{Contact, seed};

/// Read the contacts in `path`; a file that does not exist yet is empty.
pub fn load(path: &Path) -> Result<Vec<Contact>> {
  if !path.exists() {
    tracing::info!(path = %path.display(), "data file not found, starting empty");
    return Ok(Vec::new());
  }
  let raw = std::fs::read_to_string(path)
    .with_context(|| format!("reading data file {}", path.display()))?;
  seed::parse(&raw).with_context(|| format!("parsing data file {}", path.display()))
}

pub fn save(path: &Path, contacts: &[Contact]) -> Result<()> {
  let json = seed::to_json(contacts)?;
  std::fs::write(path, json).with_context(|| format!("writing data file {}", path.display()))
}

#[cfg(test)]
mod tests {
  use rolodex_core::{Directory, NewContact};

  use super::*;

  #[test]
  fn missing_file_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load(&dir.path().join("none.json")).unwrap().is_empty());
  }

  #[test]
  fn saved_directory_reloads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contacts.json");

    let mut directory = Directory::new();
    directory
      .add(NewContact::new("Ann", "ann@example.com", "Acme"))
      .unwrap();
    save(&path, directory.contacts()).unwrap();

    assert_eq!(load(&path).unwrap(), directory.contacts());
  }

  #[test]
  fn malformed_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, "not json").unwrap();
    assert!(load(&path).is_err());
  }
}
