//! [`RecordStore`]: the authoritative in-memory contact sequence.
//!
//! Every operation validates before it touches the sequence, so a failed
//! call leaves the store exactly as it was.

use std::collections::HashSet;

use tracing::debug;

use crate::{
  Error, Result,
  contact::{Contact, ContactId, NewContact, Timestamp},
};

#[derive(Debug, Clone, Default)]
pub struct RecordStore {
  contacts: Vec<Contact>,
}

impl RecordStore {
  pub fn new() -> Self { Self::default() }

  /// Build a store from existing records, e.g. seed data. Rejects duplicate
  /// ids and records missing a required field.
  pub fn from_contacts(contacts: Vec<Contact>) -> Result<Self> {
    let mut seen = HashSet::with_capacity(contacts.len());
    for (i, contact) in contacts.iter().enumerate() {
      if !seen.insert(&contact.id) {
        return Err(Error::DuplicateId(contact.id.clone()));
      }
      let missing = contact.missing_required();
      if !missing.is_empty() {
        return Err(Error::Validation { position: Some(i + 1), missing });
      }
    }
    Ok(Self { contacts: contacts.into_iter().map(Contact::normalized).collect() })
  }

  pub fn contacts(&self) -> &[Contact] { &self.contacts }

  pub fn into_contacts(self) -> Vec<Contact> { self.contacts }

  pub fn len(&self) -> usize { self.contacts.len() }

  pub fn is_empty(&self) -> bool { self.contacts.is_empty() }

  pub fn get(&self, id: &ContactId) -> Option<&Contact> {
    self.contacts.iter().find(|c| &c.id == id)
  }

  fn position(&self, id: &ContactId) -> Result<usize> {
    self
      .contacts
      .iter()
      .position(|c| &c.id == id)
      .ok_or_else(|| Error::NotFound(id.clone()))
  }

  // ── Mutations ─────────────────────────────────────────────────────────────

  /// Validate, assign a fresh id and timestamps, and append.
  pub fn add(&mut self, input: NewContact) -> Result<Contact> {
    input.validate()?;
    Ok(self.admit(input, Timestamp::now()).clone())
  }

  /// Add every record in input order, or none of them. The error names the
  /// first invalid record's 1-based position and its missing fields.
  pub fn add_batch(&mut self, inputs: Vec<NewContact>) -> Result<Vec<Contact>> {
    NewContact::validate_batch(&inputs)?;

    let now = Timestamp::now();
    Ok(
      inputs
        .into_iter()
        .map(|input| self.admit(input, now).clone())
        .collect(),
    )
  }

  fn admit(&mut self, input: NewContact, now: Timestamp) -> &Contact {
    let contact = Contact::from_new(ContactId::generate(), input, now);
    if self
      .contacts
      .iter()
      .any(|c| c.email.eq_ignore_ascii_case(&contact.email))
    {
      debug!(email = %contact.email, "adding contact with an email already in the store");
    }
    debug!(id = %contact.id, "contact added");
    self.contacts.push(contact);
    &self.contacts[self.contacts.len() - 1]
  }

  /// Replace the editable fields of `id`, stamping `dateModified`. The id,
  /// `dateAdded`, `dateCreated` and `lastOpened` carry over. Returns the
  /// previous snapshot.
  pub fn update(&mut self, id: &ContactId, input: NewContact) -> Result<Contact> {
    let pos = self.position(id)?;
    input.validate()?;

    let slot = &mut self.contacts[pos];
    let mut updated = Contact::from_new(slot.id.clone(), input, Timestamp::now());
    updated.date_added = slot.date_added;
    updated.date_created = slot.date_created;
    updated.last_opened = slot.last_opened;

    debug!(%id, "contact updated");
    Ok(std::mem::replace(slot, updated))
  }

  /// Remove `id` and return its last snapshot.
  pub fn remove(&mut self, id: &ContactId) -> Result<Contact> {
    let pos = self.position(id)?;
    debug!(%id, "contact removed");
    Ok(self.contacts.remove(pos))
  }

  /// Stamp `lastOpened` without counting as an edit.
  pub fn touch(&mut self, id: &ContactId) -> Result<&Contact> {
    let pos = self.position(id)?;
    let slot = &mut self.contacts[pos];
    slot.last_opened = Some(Timestamp::now());
    Ok(slot)
  }

  // ── Undo support ──────────────────────────────────────────────────────────

  /// Re-append a previously removed record, keeping its id and timestamps.
  pub(crate) fn restore(&mut self, contact: Contact) -> Result<()> {
    if self.get(&contact.id).is_some() {
      return Err(Error::DuplicateId(contact.id));
    }
    self.contacts.push(contact);
    Ok(())
  }

  /// Swap in `contact` for the record with the same id, verbatim.
  pub(crate) fn replace(&mut self, contact: Contact) -> Result<Contact> {
    let pos = self.position(&contact.id)?;
    Ok(std::mem::replace(&mut self.contacts[pos], contact))
  }
}
