//! [`Directory`]: one browsing session over a contact collection.
//!
//! Owns the record store, its search index and the undo log, and keeps the
//! three consistent: every successful mutation rebuilds the index, and every
//! edit or delete leaves a [`HistoryEntry`] behind.

use tracing::debug;

use crate::{
  Result,
  contact::{Contact, ContactId, NewContact},
  history::{History, HistoryEntry},
  index::SearchIndex,
  store::RecordStore,
  view::{self, DirectoryView, ViewQuery},
};

#[derive(Debug, Clone, Default)]
pub struct Directory {
  store:   RecordStore,
  index:   SearchIndex,
  history: History,
}

impl Directory {
  pub fn new() -> Self { Self::default() }

  /// Open a session over existing records (seed data, a saved file, the
  /// API's listing).
  pub fn from_contacts(contacts: Vec<Contact>) -> Result<Self> {
    let store = RecordStore::from_contacts(contacts)?;
    let index = SearchIndex::build(store.contacts());
    Ok(Self { store, index, history: History::default() })
  }

  pub fn with_history_depth(mut self, depth: usize) -> Self {
    self.history = History::with_depth(depth);
    self
  }

  pub fn contacts(&self) -> &[Contact] { self.store.contacts() }

  pub fn into_contacts(self) -> Vec<Contact> { self.store.into_contacts() }

  pub fn get(&self, id: &ContactId) -> Option<&Contact> { self.store.get(id) }

  pub fn len(&self) -> usize { self.store.len() }

  pub fn is_empty(&self) -> bool { self.store.is_empty() }

  pub fn history(&self) -> &History { &self.history }

  // ── Mutations ─────────────────────────────────────────────────────────────

  pub fn add(&mut self, input: NewContact) -> Result<Contact> {
    let added = self.store.add(input)?;
    self.reindex();
    Ok(added)
  }

  pub fn add_batch(&mut self, inputs: Vec<NewContact>) -> Result<Vec<Contact>> {
    let added = self.store.add_batch(inputs)?;
    self.reindex();
    Ok(added)
  }

  /// Full-record edit. Returns the updated record.
  pub fn update(&mut self, id: &ContactId, input: NewContact) -> Result<Contact> {
    let previous = self.store.update(id, input)?;
    let current = self.store.get(id).cloned().unwrap_or_else(|| previous.clone());
    self.history.push(HistoryEntry::Edit { current: current.clone(), previous });
    self.reindex();
    Ok(current)
  }

  /// Delete a record. Returns the removed record.
  pub fn remove(&mut self, id: &ContactId) -> Result<Contact> {
    let removed = self.store.remove(id)?;
    self.history.push(HistoryEntry::Delete { removed: removed.clone() });
    self.reindex();
    Ok(removed)
  }

  /// Mark a record as opened. Not an edit, so not undoable.
  pub fn touch(&mut self, id: &ContactId) -> Result<()> {
    self.store.touch(id)?;
    Ok(())
  }

  /// Reverse the most recent edit or delete.
  ///
  /// A deleted record is re-appended at the end of the sequence; an edited
  /// one is swapped back to its exact prior snapshot. Returns `Ok(None)` when
  /// there is nothing to undo. If the entry cannot be applied it is put back
  /// on the log and the error is returned.
  pub fn undo(&mut self) -> Result<Option<HistoryEntry>> {
    let Some(entry) = self.history.pop() else {
      return Ok(None);
    };

    let applied = match &entry {
      HistoryEntry::Delete { removed } => self.store.restore(removed.clone()),
      HistoryEntry::Edit { previous, .. } => {
        self.store.replace(previous.clone()).map(|_| ())
      }
    };

    if let Err(e) = applied {
      self.history.push(entry);
      return Err(e);
    }

    debug!(id = %entry.contact_id(), action = entry.describe(), "undone");
    self.reindex();
    Ok(Some(entry))
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  pub fn view(&self, query: &ViewQuery) -> DirectoryView<'_> {
    view::run(self.store.contacts(), &self.index, query)
  }

  fn reindex(&mut self) { self.index = SearchIndex::build(self.store.contacts()); }
}
