//! Group partitioner: split a sorted sequence into named buckets.

use std::{collections::HashMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  contact::{Contact, Field},
  sort::collate,
};

pub const ALL_LABEL: &str = "All Contacts";
pub const OTHER_LABEL: &str = "Other";

// ─── Grouping ────────────────────────────────────────────────────────────────

/// `none`, or the field whose value names each bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Grouping {
  #[default]
  None,
  By(Field),
}

impl fmt::Display for Grouping {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::None => f.write_str("none"),
      Self::By(field) => f.write_str(field.as_str()),
    }
  }
}

impl FromStr for Grouping {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    let s = s.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("none") {
      Ok(Self::None)
    } else {
      s.parse().map(Self::By)
    }
  }
}

impl TryFrom<String> for Grouping {
  type Error = Error;

  fn try_from(s: String) -> Result<Self> { s.parse() }
}

impl From<Grouping> for String {
  fn from(g: Grouping) -> Self { g.to_string() }
}

// ─── Buckets ─────────────────────────────────────────────────────────────────

/// Identity of a bucket. A record whose value is literally `"Other"` lands
/// in `Value("Other")`, which is a different bucket from the catch-all.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum BucketKey {
  /// The single bucket produced when grouping is off.
  All,
  Value(String),
  /// Records whose grouping field is absent or empty.
  Other,
}

impl BucketKey {
  pub fn label(&self) -> &str {
    match self {
      Self::All => ALL_LABEL,
      Self::Value(v) => v,
      Self::Other => OTHER_LABEL,
    }
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct Bucket<'a> {
  pub key:      BucketKey,
  pub contacts: Vec<&'a Contact>,
}

impl Bucket<'_> {
  pub fn label(&self) -> &str { self.key.label() }

  pub fn len(&self) -> usize { self.contacts.len() }

  pub fn is_empty(&self) -> bool { self.contacts.is_empty() }
}

/// Partition `contacts` without reordering them inside a bucket.
///
/// Value buckets are ordered by [`collate`] on their exact (case-sensitive)
/// value; the catch-all bucket is always last.
pub fn partition<'a>(contacts: Vec<&'a Contact>, grouping: Grouping) -> Vec<Bucket<'a>> {
  let field = match grouping {
    Grouping::None => return vec![Bucket { key: BucketKey::All, contacts }],
    Grouping::By(field) => field,
  };

  let mut buckets: Vec<Bucket<'a>> = Vec::new();
  let mut slots: HashMap<BucketKey, usize> = HashMap::new();

  for contact in contacts {
    let key = match contact.text(field) {
      Some(v) => BucketKey::Value(v.into_owned()),
      None => BucketKey::Other,
    };
    let slot = *slots.entry(key.clone()).or_insert_with(|| {
      buckets.push(Bucket { key, contacts: Vec::new() });
      buckets.len() - 1
    });
    buckets[slot].contacts.push(contact);
  }

  buckets.sort_by(|a, b| match (&a.key, &b.key) {
    (BucketKey::Other, BucketKey::Other) => std::cmp::Ordering::Equal,
    (BucketKey::Other, _) => std::cmp::Ordering::Greater,
    (_, BucketKey::Other) => std::cmp::Ordering::Less,
    (ka, kb) => collate(ka.label(), kb.label()),
  });
  buckets
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::contact::{ContactId, NewContact, Timestamp};

  fn contact(id: &str, industry: Option<&str>) -> Contact {
    let mut input = NewContact::new(id, format!("{id}@x.com"), "Acme");
    input.industry = industry.map(str::to_owned);
    Contact::from_new(ContactId::from(id), input, Timestamp::now())
  }

  fn layout(buckets: &[Bucket<'_>]) -> Vec<(String, Vec<String>)> {
    buckets
      .iter()
      .map(|b| {
        let ids = b.contacts.iter().map(|c| c.id.to_string()).collect();
        (b.label().to_owned(), ids)
      })
      .collect()
  }

  #[test]
  fn none_yields_one_bucket_in_input_order() {
    let rs = [contact("b", None), contact("a", Some("Tech"))];
    let buckets = partition(rs.iter().collect(), Grouping::None);
    assert_eq!(
      layout(&buckets),
      [(ALL_LABEL.to_owned(), vec!["b".to_owned(), "a".to_owned()])]
    );
  }

  #[test]
  fn buckets_are_alphabetical_with_other_last() {
    let rs = [
      contact("1", Some("tech")),
      contact("2", None),
      contact("3", Some("Agri")),
      contact("4", Some("Zinc")),
      contact("5", Some("Tech")),
      contact("6", Some("Agri")),
    ];
    let buckets = partition(rs.iter().collect(), Grouping::By(Field::Industry));
    let labels: Vec<_> = buckets.iter().map(|b| b.label().to_owned()).collect();
    assert_eq!(labels, ["Agri", "Tech", "tech", "Zinc", OTHER_LABEL]);
    assert_eq!(buckets[0].contacts.len(), 2);
    assert_eq!(buckets[0].contacts[0].id.as_str(), "3");
    assert_eq!(buckets[0].contacts[1].id.as_str(), "6");
  }

  #[test]
  fn literal_other_is_not_the_catch_all() {
    let rs = [contact("1", Some("Other")), contact("2", None)];
    let buckets = partition(rs.iter().collect(), Grouping::By(Field::Industry));
    assert_eq!(buckets.len(), 2);
    assert_eq!(buckets[0].key, BucketKey::Value("Other".into()));
    assert_eq!(buckets[1].key, BucketKey::Other);
  }

  #[test]
  fn partition_is_exhaustive_and_disjoint() {
    let rs: Vec<Contact> = ["Tech", "", "Agri", "Tech", "Retail", ""]
      .iter()
      .enumerate()
      .map(|(i, ind)| contact(&i.to_string(), Some(*ind)))
      .collect();

    for grouping in [Grouping::None, Grouping::By(Field::Industry), Grouping::By(Field::Name)] {
      let buckets = partition(rs.iter().collect(), grouping);
      let mut seen: Vec<&str> = buckets
        .iter()
        .flat_map(|b| b.contacts.iter().map(|c| c.id.as_str()))
        .collect();
      seen.sort_unstable();
      let mut expected: Vec<&str> = rs.iter().map(|c| c.id.as_str()).collect();
      expected.sort_unstable();
      assert_eq!(seen, expected, "{grouping}");
    }
  }

  #[test]
  fn grouping_round_trips_through_strings() {
    assert_eq!("none".parse::<Grouping>().unwrap(), Grouping::None);
    assert_eq!("country".parse::<Grouping>().unwrap(), Grouping::By(Field::Country));
    let json = serde_json::to_string(&Grouping::By(Field::DateAdded)).unwrap();
    assert_eq!(json, "\"dateAdded\"");
    assert!(serde_json::from_str::<Grouping>("\"favourite colour\"").is_err());
  }
}
