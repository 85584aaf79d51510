//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored in their canonical string form (RFC 3339, or
//! `YYYY-MM-DD` for date-only values). Tags are stored as a compact JSON
//! array.

use rolodex_core::{Contact, ContactId, Timestamp};

use crate::Result;

// ─── Timestamp ───────────────────────────────────────────────────────────────

pub fn encode_ts(ts: Option<Timestamp>) -> Option<String> { ts.map(|t| t.to_string()) }

pub fn decode_ts(s: Option<String>) -> Result<Option<Timestamp>> {
  Ok(s.map(|s| s.parse::<Timestamp>()).transpose()?)
}

// ─── Tags ────────────────────────────────────────────────────────────────────

pub fn encode_tags(tags: &[String]) -> Result<String> { Ok(serde_json::to_string(tags)?) }

pub fn decode_tags(s: &str) -> Result<Vec<String>> { Ok(serde_json::from_str(s)?) }

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching the field order of [`RawContact`].
pub const CONTACT_COLUMNS: &str = "contact_id, name, email, company, phone, title, country, \
   industry, notes, tags, date_added, date_modified, date_created, last_opened";

/// A `contacts` row exactly as read from SQLite.
pub struct RawContact {
  pub contact_id:    String,
  pub name:          String,
  pub email:         String,
  pub company:       String,
  pub phone:         Option<String>,
  pub title:         Option<String>,
  pub country:       Option<String>,
  pub industry:      Option<String>,
  pub notes:         Option<String>,
  pub tags:          String,
  pub date_added:    Option<String>,
  pub date_modified: Option<String>,
  pub date_created:  Option<String>,
  pub last_opened:   Option<String>,
}

impl RawContact {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      contact_id:    row.get(0)?,
      name:          row.get(1)?,
      email:         row.get(2)?,
      company:       row.get(3)?,
      phone:         row.get(4)?,
      title:         row.get(5)?,
      country:       row.get(6)?,
      industry:      row.get(7)?,
      notes:         row.get(8)?,
      tags:          row.get(9)?,
      date_added:    row.get(10)?,
      date_modified: row.get(11)?,
      date_created:  row.get(12)?,
      last_opened:   row.get(13)?,
    })
  }

  pub fn from_contact(c: &Contact) -> Result<Self> {
    Ok(Self {
      contact_id:    c.id.to_string(),
      name:          c.name.clone(),
      email:         c.email.clone(),
      company:       c.company.clone(),
      phone:         c.phone.clone(),
      title:         c.title.clone(),
      country:       c.country.clone(),
      industry:      c.industry.clone(),
      notes:         c.notes.clone(),
      tags:          encode_tags(&c.tags)?,
      date_added:    encode_ts(c.date_added),
      date_modified: encode_ts(c.date_modified),
      date_created:  encode_ts(c.date_created),
      last_opened:   encode_ts(c.last_opened),
    })
  }

  pub fn into_contact(self) -> Result<Contact> {
    Ok(Contact {
      id:            ContactId::from(self.contact_id),
      name:          self.name,
      email:         self.email,
      company:       self.company,
      phone:         self.phone,
      title:         self.title,
      country:       self.country,
      industry:      self.industry,
      notes:         self.notes,
      tags:          decode_tags(&self.tags)?,
      date_added:    decode_ts(self.date_added)?,
      date_modified: decode_ts(self.date_modified)?,
      date_created:  decode_ts(self.date_created)?,
      last_opened:   decode_ts(self.last_opened)?,
    })
  }

  /// Insert this row; runs on the connection thread.
  pub fn insert(&self, conn: &rusqlite::Connection) -> rusqlite::Result<()> {
    conn.execute(
      &format!(
        "INSERT INTO contacts ({CONTACT_COLUMNS})
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)"
      ),
      rusqlite::params![
        self.contact_id,
        self.name,
        self.email,
        self.company,
        self.phone,
        self.title,
        self.country,
        self.industry,
        self.notes,
        self.tags,
        self.date_added,
        self.date_modified,
        self.date_created,
        self.last_opened,
      ],
    )?;
    Ok(())
  }
}
