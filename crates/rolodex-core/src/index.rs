//! Search index: one lowercase blob per record.
//!
//! The index is a plain vector parallel to the record sequence and is rebuilt
//! in full whenever the store changes. At directory scale (a few hundred
//! records) incremental maintenance buys nothing.

use crate::contact::Contact;

/// Joins field values inside a blob. Queries have their line breaks turned
/// into spaces before matching, so they never straddle two fields.
pub const SEPARATOR: char = '\n';

#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
  blobs: Vec<String>,
}

impl SearchIndex {
  pub fn build(contacts: &[Contact]) -> Self {
    Self { blobs: contacts.iter().map(search_blob).collect() }
  }

  pub fn len(&self) -> usize { self.blobs.len() }

  pub fn is_empty(&self) -> bool { self.blobs.is_empty() }

  /// The blob of the record at `position` in the store.
  pub fn get(&self, position: usize) -> Option<&str> {
    self.blobs.get(position).map(String::as_str)
  }

  /// `needle` must already be lowercased.
  pub fn contains(&self, position: usize, needle: &str) -> bool {
    self.get(position).is_some_and(|blob| blob.contains(needle))
  }
}

/// The lowercase concatenation of a record's searchable values: name,
/// company, industry, title, email, phone, country, notes and every tag.
pub fn search_blob(contact: &Contact) -> String {
  let optional = [
    contact.industry.as_deref(),
    contact.title.as_deref(),
    Some(contact.email.as_str()),
    contact.phone.as_deref(),
    contact.country.as_deref(),
    contact.notes.as_deref(),
  ];

  [Some(contact.name.as_str()), Some(contact.company.as_str())]
    .into_iter()
    .chain(optional)
    .flatten()
    .chain(contact.tags.iter().map(String::as_str))
    .map(str::trim)
    .filter(|v| !v.is_empty())
    .map(str::to_lowercase)
    .collect::<Vec<_>>()
    .join(&SEPARATOR.to_string())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::contact::{ContactId, NewContact, Timestamp};

  fn contact(input: NewContact) -> Contact {
    Contact::from_new(ContactId::generate(), input, Timestamp::now())
  }

  #[test]
  fn blob_is_lowercase_and_skips_empty_values() {
    let mut input = NewContact::new("Ann Lee", "Ann@X.com", "Acme");
    input.industry = Some("Tech".into());
    input.tags = vec!["SaaS".into()];
    let blob = search_blob(&contact(input));
    assert_eq!(blob, "ann lee\nacme\ntech\nann@x.com\nsaas");
  }

  #[test]
  fn index_is_parallel_to_records() {
    let records = vec![
      contact(NewContact::new("Ann", "a@x.com", "Acme")),
      contact(NewContact::new("Bob", "b@y.com", "Globex")),
    ];
    let index = SearchIndex::build(&records);
    assert_eq!(index.len(), 2);
    assert!(index.contains(1, "globex"));
    assert!(!index.contains(0, "globex"));
    assert!(!index.contains(5, "ann"));
  }
}
