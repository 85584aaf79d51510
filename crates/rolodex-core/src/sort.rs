//! Sort engine: one field, one direction, stable, missing values last.

use std::{cmp::Ordering, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  contact::{Contact, Field, Timestamp},
};

// ─── Direction ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
  #[default]
  Asc,
  Desc,
}

impl Direction {
  pub fn reversed(self) -> Self {
    match self {
      Self::Asc => Self::Desc,
      Self::Desc => Self::Asc,
    }
  }

  fn apply(self, ord: Ordering) -> Ordering {
    match self {
      Self::Asc => ord,
      Self::Desc => ord.reverse(),
    }
  }
}

impl fmt::Display for Direction {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::Asc => "asc",
      Self::Desc => "desc",
    })
  }
}

impl FromStr for Direction {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s.trim().to_ascii_lowercase().as_str() {
      "asc" | "ascending" => Ok(Self::Asc),
      "desc" | "descending" => Ok(Self::Desc),
      _ => Err(Error::UnknownDirection(s.to_owned())),
    }
  }
}

// ─── SortSpec ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
  pub field:     Field,
  #[serde(default)]
  pub direction: Direction,
}

impl SortSpec {
  pub fn new(field: Field, direction: Direction) -> Self { Self { field, direction } }
}

impl Default for SortSpec {
  fn default() -> Self { Self::new(Field::Name, Direction::Asc) }
}

// ─── Collation ───────────────────────────────────────────────────────────────

/// Locale-aware text ordering: compare the ASCII transliteration case-
/// insensitively, then fall back to raw codepoints so that distinct strings
/// never compare equal.
pub fn collate(a: &str, b: &str) -> Ordering {
  fold(a).cmp(&fold(b)).then_with(|| a.cmp(b))
}

fn fold(s: &str) -> String { deunicode::deunicode(s).to_lowercase() }

#[derive(Debug)]
enum SortKey {
  Text { folded: String, raw: String },
  Time(Timestamp),
}

impl SortKey {
  fn of(contact: &Contact, field: Field) -> Option<Self> {
    if field.is_temporal() {
      return contact.timestamp(field).map(Self::Time);
    }
    contact.text(field).map(|raw| Self::Text {
      folded: fold(&raw),
      raw:    raw.into_owned(),
    })
  }

  fn compare(&self, other: &Self) -> Ordering {
    match (self, other) {
      (Self::Text { folded: fa, raw: ra }, Self::Text { folded: fb, raw: rb }) => {
        fa.cmp(fb).then_with(|| ra.cmp(rb))
      }
      (Self::Time(a), Self::Time(b)) => a.cmp(b),
      (Self::Text { .. }, Self::Time(_)) => Ordering::Less,
      (Self::Time(_), Self::Text { .. }) => Ordering::Greater,
    }
  }
}

/// Absent keys go last regardless of direction.
fn compare_keys(a: Option<&SortKey>, b: Option<&SortKey>, direction: Direction) -> Ordering {
  match (a, b) {
    (Some(a), Some(b)) => direction.apply(a.compare(b)),
    (Some(_), None) => Ordering::Less,
    (None, Some(_)) => Ordering::Greater,
    (None, None) => Ordering::Equal,
  }
}

/// Order `contacts` by `spec`. Records with equal keys keep their input
/// order.
pub fn sort<'a>(contacts: Vec<&'a Contact>, spec: SortSpec) -> Vec<&'a Contact> {
  let mut keyed: Vec<(Option<SortKey>, &'a Contact)> = contacts
    .into_iter()
    .map(|c| (SortKey::of(c, spec.field), c))
    .collect();

  // `sort_by` is a stable merge sort.
  keyed.sort_by(|(a, _), (b, _)| compare_keys(a.as_ref(), b.as_ref(), spec.direction));
  keyed.into_iter().map(|(_, c)| c).collect()
}
