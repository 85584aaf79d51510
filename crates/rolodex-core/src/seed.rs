//! Seed data in the `{"contacts": [...]}` file shape.

use serde::{Deserialize, Serialize};

use crate::{Result, contact::Contact};

const BUNDLED: &str = include_str!("../data/contacts.json");

#[derive(Debug, Clone, Default, Deserialize)]
struct ContactsData {
  contacts: Vec<Contact>,
}

#[derive(Serialize)]
struct ContactsDataRef<'a> {
  contacts: &'a [Contact],
}

/// Parse a contacts file.
pub fn parse(json: &str) -> Result<Vec<Contact>> {
  Ok(serde_json::from_str::<ContactsData>(json)?.contacts)
}

/// The contacts compiled into this crate.
pub fn bundled() -> Result<Vec<Contact>> { parse(BUNDLED) }

/// Render `contacts` in the same file shape that [`parse`] reads.
pub fn to_json(contacts: &[Contact]) -> Result<String> {
  Ok(serde_json::to_string_pretty(&ContactsDataRef { contacts })?)
}
