//! The read pipeline: filter → sort → group.

use serde::{Deserialize, Serialize};

use crate::{
  contact::Contact,
  filter::{self, Filters},
  group::{self, Bucket, Grouping},
  index::SearchIndex,
  sort::{self, SortSpec},
};

/// Everything that shapes a directory view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewQuery {
  /// Free-text search; blank matches everything.
  pub text:     String,
  pub filters:  Filters,
  pub sort:     SortSpec,
  pub grouping: Grouping,
}

/// A read-only projection of the store.
#[derive(Debug, Clone, Serialize)]
pub struct DirectoryView<'a> {
  /// Records in the store.
  pub total:   usize,
  /// Records that passed the query and filters.
  pub matched: usize,
  pub buckets: Vec<Bucket<'a>>,
}

impl<'a> DirectoryView<'a> {
  /// Matched records in display order, across buckets.
  pub fn contacts(&self) -> impl Iterator<Item = &'a Contact> + '_ {
    self.buckets.iter().flat_map(|b| b.contacts.iter().copied())
  }
}

pub fn run<'a>(
  contacts: &'a [Contact],
  index: &SearchIndex,
  query: &ViewQuery,
) -> DirectoryView<'a> {
  let filtered = filter::apply(contacts, index, &query.text, &query.filters);
  let matched = filtered.len();
  let sorted = sort::sort(filtered, query.sort);
  DirectoryView {
    total: contacts.len(),
    matched,
    buckets: group::partition(sorted, query.grouping),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::contact::{ContactId, Field, NewContact, Timestamp};
  use crate::sort::Direction;

  #[test]
  fn stages_run_in_order() {
    let make = |name: &str, industry: &str| {
      let mut input = NewContact::new(name, format!("{name}@x.com"), "Acme");
      input.industry = Some(industry.into());
      Contact::from_new(ContactId::generate(), input, Timestamp::now())
    };
    let rs = vec![
      make("Cy", "Tech"),
      make("Al", "Agri"),
      make("Bo", "Tech"),
      make("Di", "Mining"),
    ];
    let index = SearchIndex::build(&rs);
    let query = ViewQuery {
      text:     String::new(),
      filters:  Filters { industry: Some("t".into()), ..Filters::default() },
      sort:     SortSpec::new(Field::Name, Direction::Desc),
      grouping: Grouping::By(Field::Industry),
    };

    let view = run(&rs, &index, &query);
    assert_eq!(view.total, 4);
    assert_eq!(view.matched, 2);
    assert_eq!(view.buckets.len(), 1);
    let names: Vec<_> = view.contacts().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Cy", "Bo"]);
  }

  #[test]
  fn query_deserializes_from_partial_json() {
    let q: ViewQuery =
      serde_json::from_str(r#"{"text":"acme","sort":{"field":"dateAdded"},"grouping":"country"}"#)
        .unwrap();
    assert_eq!(q.sort, SortSpec::new(Field::DateAdded, Direction::Asc));
    assert_eq!(q.grouping, Grouping::By(Field::Country));
    assert!(q.filters.is_empty());
  }
}
