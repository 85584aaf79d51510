//! Undo log for mutating actions.
//!
//! Only edits and deletes are recorded; adds and imports are not undoable.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::contact::{Contact, ContactId};

/// Entries kept before the oldest is discarded.
pub const DEFAULT_DEPTH: usize = 32;

/// A reversible description of one mutating action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HistoryEntry {
  /// A full-record replace. `previous` is the exact pre-edit snapshot.
  Edit {
    current:  Contact,
    previous: Contact,
  },
  Delete {
    removed: Contact,
  },
}

impl HistoryEntry {
  pub fn contact_id(&self) -> &ContactId {
    match self {
      Self::Edit { current, .. } => &current.id,
      Self::Delete { removed } => &removed.id,
    }
  }

  /// Short user-facing description, e.g. for an undo prompt.
  pub fn describe(&self) -> &'static str {
    match self {
      Self::Edit { .. } => "Contact updated",
      Self::Delete { .. } => "Contact deleted",
    }
  }
}

/// Bounded last-in-first-out log.
#[derive(Debug, Clone)]
pub struct History {
  entries: VecDeque<HistoryEntry>,
  depth:   usize,
}

impl Default for History {
  fn default() -> Self { Self::with_depth(DEFAULT_DEPTH) }
}

impl History {
  /// A log retaining at most `depth` entries (at least one).
  pub fn with_depth(depth: usize) -> Self {
    let depth = depth.max(1);
    Self { entries: VecDeque::with_capacity(depth), depth }
  }

  pub fn push(&mut self, entry: HistoryEntry) {
    if self.entries.len() == self.depth {
      self.entries.pop_front();
    }
    self.entries.push_back(entry);
  }

  pub fn pop(&mut self) -> Option<HistoryEntry> { self.entries.pop_back() }

  /// The entry the next undo would reverse.
  pub fn last(&self) -> Option<&HistoryEntry> { self.entries.back() }

  pub fn len(&self) -> usize { self.entries.len() }

  pub fn is_empty(&self) -> bool { self.entries.is_empty() }

  pub fn depth(&self) -> usize { self.depth }

  pub fn clear(&mut self) { self.entries.clear(); }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::contact::{NewContact, Timestamp};

  fn removed(id: &str) -> HistoryEntry {
    HistoryEntry::Delete {
      removed: Contact::from_new(
        ContactId::from(id),
        NewContact::new("Ann", "a@x.com", "Acme"),
        Timestamp::now(),
      ),
    }
  }

  #[test]
  fn pops_newest_first() {
    let mut h = History::default();
    h.push(removed("1"));
    h.push(removed("2"));
    assert_eq!(h.pop().unwrap().contact_id().as_str(), "2");
    assert_eq!(h.pop().unwrap().contact_id().as_str(), "1");
    assert!(h.pop().is_none());
  }

  #[test]
  fn discards_oldest_beyond_depth() {
    let mut h = History::with_depth(2);
    for id in ["1", "2", "3"] {
      h.push(removed(id));
    }
    assert_eq!(h.len(), 2);
    assert_eq!(h.pop().unwrap().contact_id().as_str(), "3");
    assert_eq!(h.pop().unwrap().contact_id().as_str(), "2");
    assert!(h.is_empty());
  }

  #[test]
  fn zero_depth_still_keeps_the_latest() {
    let mut h = History::with_depth(0);
    h.push(removed("1"));
    h.push(removed("2"));
    assert_eq!(h.depth(), 1);
    assert_eq!(h.last().unwrap().contact_id().as_str(), "2");
  }
}
