//! [`SqliteStore`], the SQLite implementation of [`ContactRepository`].

use std::path::Path;

use rolodex_core::{Contact, ContactId, NewContact, Timestamp, repository::ContactRepository};

use crate::{
  Error, Result,
  encode::{CONTACT_COLUMNS, RawContact},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A contact repository backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Number of stored contacts.
  pub async fn count(&self) -> Result<usize> {
    let n: i64 = self
      .conn
      .call(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM contacts", [], |r| r.get(0))?))
      .await?;
    Ok(usize::try_from(n).unwrap_or_default())
  }

  /// Insert fully-formed contacts (e.g. the bundled seed data) in a single
  /// transaction. Either every contact is stored or none is.
  pub async fn import_contacts(&self, contacts: &[Contact]) -> Result<usize> {
    let rows = contacts
      .iter()
      .map(RawContact::from_contact)
      .collect::<Result<Vec<_>>>()?;
    let count = rows.len();

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        for row in &rows {
          row.insert(&tx)?;
        }
        tx.commit()?;
        Ok(())
      })
      .await?;

    tracing::info!(count, "imported contacts");
    Ok(count)
  }

  async fn insert(&self, contact: &Contact) -> Result<()> {
    let row = RawContact::from_contact(contact)?;
    self
      .conn
      .call(move |conn| {
        row.insert(conn)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── ContactRepository impl ──────────────────────────────────────────────────

impl ContactRepository for SqliteStore {
  type Error = Error;

  async fn list_contacts(&self) -> Result<Vec<Contact>> {
    let raws: Vec<RawContact> = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare(&format!("SELECT {CONTACT_COLUMNS} FROM contacts ORDER BY seq"))?;
        let rows = stmt
          .query_map([], RawContact::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawContact::into_contact).collect()
  }

  async fn create_contact(&self, input: NewContact) -> Result<Contact> {
    input.validate()?;
    let contact = Contact::from_new(ContactId::generate(), input, Timestamp::now());
    self.insert(&contact).await?;
    tracing::debug!(id = %contact.id, "created contact");
    Ok(contact)
  }
}
