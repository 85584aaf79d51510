//! Filter composition: free-text query AND structured filters.

use serde::{Deserialize, Serialize};

use crate::{
  contact::Contact,
  index::{self, SearchIndex},
};

/// Structured filters. An empty value means "no constraint" for that
/// dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Filters {
  /// Case-insensitive substring of the record's industry.
  pub industry: Option<String>,
  /// Case-insensitive substring of the record's country.
  pub country:  Option<String>,
  /// Matches when the record carries at least one of these tags.
  pub tags:     Vec<String>,
}

impl Filters {
  /// Number of active constraints; each tag counts separately.
  pub fn active_count(&self) -> usize {
    let active = |v: &Option<String>| usize::from(needle(v.as_deref()).is_some());
    active(&self.industry) + active(&self.country) + self.wanted_tags().len()
  }

  pub fn is_empty(&self) -> bool { self.active_count() == 0 }

  pub fn matches(&self, contact: &Contact) -> bool {
    substring(contact.industry.as_deref(), self.industry.as_deref())
      && substring(contact.country.as_deref(), self.country.as_deref())
      && self.matches_tags(&contact.tags)
  }

  fn wanted_tags(&self) -> Vec<String> {
    self
      .tags
      .iter()
      .filter_map(|t| needle(Some(t)))
      .collect()
  }

  fn matches_tags(&self, tags: &[String]) -> bool {
    let wanted = self.wanted_tags();
    wanted.is_empty()
      || tags
        .iter()
        .any(|t| wanted.contains(&t.trim().to_lowercase()))
  }
}

/// Lowercase and trim a free-text query; `None` when nothing is left.
/// Interior line breaks become spaces so a query never spans two fields.
pub fn normalize_query(query: &str) -> Option<String> {
  needle(Some(query)).map(|q| q.replace(['\r', index::SEPARATOR], " "))
}

/// Records (in store order) whose blob contains the query and which satisfy
/// every filter.
///
/// `index` must have been built from `contacts`.
pub fn apply<'a>(
  contacts: &'a [Contact],
  index: &SearchIndex,
  query: &str,
  filters: &Filters,
) -> Vec<&'a Contact> {
  debug_assert_eq!(contacts.len(), index.len(), "stale search index");

  let query = normalize_query(query);
  let structured = !filters.is_empty();

  if query.is_none() && !structured {
    return contacts.iter().collect();
  }

  contacts
    .iter()
    .enumerate()
    .filter(|(i, _)| query.as_deref().is_none_or(|q| index.contains(*i, q)))
    .filter(|(_, c)| !structured || filters.matches(c))
    .map(|(_, c)| c)
    .collect()
}

fn needle(value: Option<&str>) -> Option<String> {
  value
    .map(str::trim)
    .filter(|v| !v.is_empty())
    .map(str::to_lowercase)
}

fn substring(haystack: Option<&str>, wanted: Option<&str>) -> bool {
  match needle(wanted) {
    None => true,
    Some(w) => haystack.is_some_and(|h| h.to_lowercase().contains(&w)),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::contact::{ContactId, NewContact, Timestamp};

  fn records() -> Vec<Contact> {
    let mut ann = NewContact::new("Ann", "a@x.com", "Acme");
    ann.industry = Some("Tech".into());
    ann.country = Some("Canada".into());
    ann.tags = vec!["saas".into(), "b2b".into()];

    let mut bob = NewContact::new("Bob", "b@y.com", "Globex");
    bob.industry = Some("Biotech".into());
    bob.country = Some("Germany".into());
    bob.tags = vec!["Pharma".into()];

    let cid = NewContact::new("Cid", "c@z.com", "Initech");

    [ann, bob, cid]
      .into_iter()
      .map(|n| Contact::from_new(ContactId::generate(), n, Timestamp::now()))
      .collect()
  }

  fn names(found: &[&Contact]) -> Vec<String> {
    found.iter().map(|c| c.name.clone()).collect()
  }

  #[test]
  fn query_matches_exactly_the_records_whose_blob_contains_it() {
    let rs = records();
    let index = SearchIndex::build(&rs);
    for query in ["acme", "TECH", " b@ ", "zzz", "a"] {
      let found = apply(&rs, &index, query, &Filters::default());
      let q = query.trim().to_lowercase();
      for (i, c) in rs.iter().enumerate() {
        let included = found.iter().any(|f| f.id == c.id);
        assert_eq!(included, index.get(i).unwrap().contains(&q), "{query:?}");
      }
    }
  }

  #[test]
  fn query_cannot_span_two_fields() {
    let rs = records();
    let index = SearchIndex::build(&rs);
    assert!(apply(&rs, &index, "ann\nacme", &Filters::default()).is_empty());
    assert!(apply(&rs, &index, "ann\r\nacme", &Filters::default()).is_empty());
    assert_eq!(normalize_query(" Ann\nAcme "), Some("ann acme".into()));
  }

  #[test]
  fn blank_query_and_no_filters_returns_everything() {
    let rs = records();
    let index = SearchIndex::build(&rs);
    assert_eq!(apply(&rs, &index, "   ", &Filters::default()).len(), 3);
  }

  #[test]
  fn structured_filters_are_case_insensitive_substrings() {
    let rs = records();
    let index = SearchIndex::build(&rs);
    let filters = Filters { industry: Some("TECH".into()), ..Filters::default() };
    assert_eq!(names(&apply(&rs, &index, "", &filters)), ["Ann", "Bob"]);

    let filters = Filters {
      industry: Some("tech".into()),
      country: Some("germ".into()),
      ..Filters::default()
    };
    assert_eq!(names(&apply(&rs, &index, "", &filters)), ["Bob"]);
  }

  #[test]
  fn tag_filter_needs_any_overlap() {
    let rs = records();
    let index = SearchIndex::build(&rs);
    let filters = Filters {
      tags: vec!["pharma".into(), "b2b".into()],
      ..Filters::default()
    };
    assert_eq!(names(&apply(&rs, &index, "", &filters)), ["Ann", "Bob"]);
    assert_eq!(filters.active_count(), 2);
  }

  #[test]
  fn query_and_filters_compose_with_and() {
    let rs = records();
    let index = SearchIndex::build(&rs);
    let filters = Filters { country: Some("canada".into()), ..Filters::default() };
    assert_eq!(names(&apply(&rs, &index, "globex", &filters)), Vec::<String>::new());
    assert_eq!(names(&apply(&rs, &index, "acme", &filters)), ["Ann"]);
  }

  #[test]
  fn blank_filter_values_impose_nothing() {
    let filters = Filters {
      industry: Some("  ".into()),
      country: None,
      tags: vec![String::new()],
    };
    assert!(filters.is_empty());
  }
}
