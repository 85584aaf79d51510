//! The contact record: the sole entity of the directory.
//!
//! Optional text fields follow one convention throughout the crate: an empty
//! or whitespace-only value is the same as an absent one. Records are
//! normalised on their way into the store, so `Some("")` never survives
//! admission.

use std::{borrow::Cow, cmp::Ordering, fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::{Error, Result};

// ─── ContactId ───────────────────────────────────────────────────────────────

/// Opaque record identifier. Ids minted by the store are UUID v4 strings;
/// seed data may carry any string.
#[derive(
  Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ContactId(String);

impl ContactId {
  /// Mint a fresh id that has never been handed out before.
  pub fn generate() -> Self { Self(Uuid::new_v4().to_string()) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for ContactId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<String> for ContactId {
  fn from(s: String) -> Self { Self(s) }
}

impl From<&str> for ContactId {
  fn from(s: &str) -> Self { Self(s.to_owned()) }
}

// ─── Timestamp ───────────────────────────────────────────────────────────────

/// A record timestamp: either a full RFC 3339 instant or a bare calendar
/// date (`YYYY-MM-DD`). Date-only values order as midnight UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timestamp {
  Instant(DateTime<Utc>),
  Date(NaiveDate),
}

impl Timestamp {
  pub fn now() -> Self { Self::Instant(Utc::now()) }

  /// The instant used for chronological comparison.
  pub fn as_instant(&self) -> DateTime<Utc> {
    match self {
      Self::Instant(dt) => *dt,
      Self::Date(d) => d.and_time(NaiveTime::MIN).and_utc(),
    }
  }

  fn rank(&self) -> u8 {
    match self {
      Self::Date(_) => 0,
      Self::Instant(_) => 1,
    }
  }
}

impl Ord for Timestamp {
  fn cmp(&self, other: &Self) -> Ordering {
    self
      .as_instant()
      .cmp(&other.as_instant())
      .then_with(|| self.rank().cmp(&other.rank()))
  }
}

impl PartialOrd for Timestamp {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl fmt::Display for Timestamp {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Instant(dt) => {
        f.write_str(&dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
      }
      Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
    }
  }
}

impl FromStr for Timestamp {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
      return Ok(Self::Instant(dt.with_timezone(&Utc)));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
      .map(Self::Date)
      .map_err(|_| Error::InvalidTimestamp(s.to_owned()))
  }
}

impl Serialize for Timestamp {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(self)
  }
}

impl<'de> Deserialize<'de> for Timestamp {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
  }
}

// ─── Field ───────────────────────────────────────────────────────────────────

/// Selects one field of a [`Contact`] for sorting, grouping or editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
  Name,
  Email,
  Company,
  Phone,
  Title,
  Country,
  Industry,
  Notes,
  Tags,
  DateAdded,
  DateModified,
  DateCreated,
  LastOpened,
}

impl Field {
  pub const ALL: [Field; 13] = [
    Field::Name,
    Field::Email,
    Field::Company,
    Field::Phone,
    Field::Title,
    Field::Country,
    Field::Industry,
    Field::Notes,
    Field::Tags,
    Field::DateAdded,
    Field::DateModified,
    Field::DateCreated,
    Field::LastOpened,
  ];

  /// Fields every admitted record must carry with a non-empty value.
  pub const REQUIRED: [Field; 3] = [Field::Name, Field::Email, Field::Company];

  /// The camelCase name used in JSON and on the command line.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Name => "name",
      Self::Email => "email",
      Self::Company => "company",
      Self::Phone => "phone",
      Self::Title => "title",
      Self::Country => "country",
      Self::Industry => "industry",
      Self::Notes => "notes",
      Self::Tags => "tags",
      Self::DateAdded => "dateAdded",
      Self::DateModified => "dateModified",
      Self::DateCreated => "dateCreated",
      Self::LastOpened => "lastOpened",
    }
  }

  pub fn is_temporal(self) -> bool {
    matches!(
      self,
      Self::DateAdded | Self::DateModified | Self::DateCreated | Self::LastOpened
    )
  }

  pub fn is_required(self) -> bool { Self::REQUIRED.contains(&self) }
}

impl fmt::Display for Field {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Accepts the camelCase name in any case, with or without `_`/`-`
/// separators: `dateAdded`, `date_added` and `DATE-ADDED` all parse.
impl FromStr for Field {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    let wanted = squash(s);
    Field::ALL
      .into_iter()
      .find(|f| squash(f.as_str()) == wanted)
      .ok_or_else(|| Error::UnknownField(s.to_owned()))
  }
}

fn squash(s: &str) -> String {
  s.chars()
    .filter(char::is_ascii_alphanumeric)
    .map(|c| c.to_ascii_lowercase())
    .collect()
}

// ─── Contact ─────────────────────────────────────────────────────────────────

/// A contact as held by the record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
  pub id:            ContactId,
  pub name:          String,
  pub email:         String,
  pub company:       String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub phone:         Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub title:         Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub country:       Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub industry:      Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub notes:         Option<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub tags:          Vec<String>,
  /// Set once at creation; never changes afterwards.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub date_added:    Option<Timestamp>,
  /// Set at creation and on every edit.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub date_modified: Option<Timestamp>,
  /// Set once at creation; never changes afterwards.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub date_created:  Option<Timestamp>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub last_opened:   Option<Timestamp>,
}

impl Contact {
  /// Build a stored record from caller input. All creation timestamps are
  /// set to `now`.
  pub fn from_new(id: ContactId, input: NewContact, now: Timestamp) -> Self {
    let input = input.normalized();
    Self {
      id,
      name: input.name,
      email: input.email,
      company: input.company,
      phone: input.phone,
      title: input.title,
      country: input.country,
      industry: input.industry,
      notes: input.notes,
      tags: input.tags,
      date_added: Some(now),
      date_modified: Some(now),
      date_created: Some(now),
      last_opened: None,
    }
  }

  /// The editable fields of this record, e.g. as a starting point for an
  /// edit.
  pub fn to_new(&self) -> NewContact {
    NewContact {
      name:     self.name.clone(),
      email:    self.email.clone(),
      company:  self.company.clone(),
      phone:    self.phone.clone(),
      title:    self.title.clone(),
      country:  self.country.clone(),
      industry: self.industry.clone(),
      notes:    self.notes.clone(),
      tags:     self.tags.clone(),
    }
  }

  /// The value of `field` as text, or `None` if the field is absent or
  /// empty. Tags are joined with `", "`; timestamps use their canonical
  /// string form.
  pub fn text(&self, field: Field) -> Option<Cow<'_, str>> {
    fn borrowed(s: &str) -> Option<Cow<'_, str>> { present(s).map(Cow::Borrowed) }

    match field {
      Field::Name => borrowed(&self.name),
      Field::Email => borrowed(&self.email),
      Field::Company => borrowed(&self.company),
      Field::Phone => self.phone.as_deref().and_then(borrowed),
      Field::Title => self.title.as_deref().and_then(borrowed),
      Field::Country => self.country.as_deref().and_then(borrowed),
      Field::Industry => self.industry.as_deref().and_then(borrowed),
      Field::Notes => self.notes.as_deref().and_then(borrowed),
      Field::Tags => {
        let joined = join_tags(&self.tags);
        (!joined.is_empty()).then_some(Cow::Owned(joined))
      }
      Field::DateAdded
      | Field::DateModified
      | Field::DateCreated
      | Field::LastOpened => {
        self.timestamp(field).map(|t| Cow::Owned(t.to_string()))
      }
    }
  }

  /// The value of a temporal field; `None` for every other field.
  pub fn timestamp(&self, field: Field) -> Option<Timestamp> {
    match field {
      Field::DateAdded => self.date_added,
      Field::DateModified => self.date_modified,
      Field::DateCreated => self.date_created,
      Field::LastOpened => self.last_opened,
      _ => None,
    }
  }

  pub fn missing_required(&self) -> Vec<Field> {
    missing(&self.name, &self.email, &self.company)
  }

  /// Trim text fields and drop empty optional values and tags.
  pub fn normalized(self) -> Self {
    Self {
      name: self.name.trim().to_owned(),
      email: self.email.trim().to_owned(),
      company: self.company.trim().to_owned(),
      phone: clean(self.phone),
      title: clean(self.title),
      country: clean(self.country),
      industry: clean(self.industry),
      notes: clean(self.notes),
      tags: clean_tags(self.tags),
      ..self
    }
  }
}

// ─── NewContact ──────────────────────────────────────────────────────────────

/// Caller input for add, batch add and full-record edit. Ids and timestamps
/// are always assigned by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewContact {
  pub name:     String,
  pub email:    String,
  pub company:  String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub phone:    Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub title:    Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub country:  Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub industry: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub notes:    Option<String>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub tags:     Vec<String>,
}

impl NewContact {
  /// Convenience constructor with all optional fields empty.
  pub fn new(
    name: impl Into<String>,
    email: impl Into<String>,
    company: impl Into<String>,
  ) -> Self {
    Self {
      name: name.into(),
      email: email.into(),
      company: company.into(),
      ..Self::default()
    }
  }

  pub fn missing_required(&self) -> Vec<Field> {
    missing(&self.name, &self.email, &self.company)
  }

  /// Fails with [`Error::Validation`] naming every empty required field.
  pub fn validate(&self) -> Result<()> {
    let missing = self.missing_required();
    if missing.is_empty() {
      Ok(())
    } else {
      Err(Error::Validation { position: None, missing })
    }
  }

  /// Check a batch without admitting any of it. The error names the first
  /// invalid record's 1-based position.
  pub fn validate_batch(inputs: &[NewContact]) -> Result<()> {
    for (i, input) in inputs.iter().enumerate() {
      let missing = input.missing_required();
      if !missing.is_empty() {
        return Err(Error::Validation { position: Some(i + 1), missing });
      }
    }
    Ok(())
  }

  /// Assign `value` to `field`. An empty value clears an optional field;
  /// tags are split with [`split_tags`]. Timestamps are store-maintained and
  /// rejected with [`Error::ReadOnlyField`].
  pub fn set(&mut self, field: Field, value: &str) -> Result<()> {
    let value = value.trim();
    let optional = || present(value).map(str::to_owned);
    match field {
      Field::Name => self.name = value.to_owned(),
      Field::Email => self.email = value.to_owned(),
      Field::Company => self.company = value.to_owned(),
      Field::Phone => self.phone = optional(),
      Field::Title => self.title = optional(),
      Field::Country => self.country = optional(),
      Field::Industry => self.industry = optional(),
      Field::Notes => self.notes = optional(),
      Field::Tags => self.tags = split_tags(value),
      Field::DateAdded
      | Field::DateModified
      | Field::DateCreated
      | Field::LastOpened => return Err(Error::ReadOnlyField(field)),
    }
    Ok(())
  }

  /// Trim text fields and drop empty optional values and tags.
  pub fn normalized(self) -> Self {
    Self {
      name:     self.name.trim().to_owned(),
      email:    self.email.trim().to_owned(),
      company:  self.company.trim().to_owned(),
      phone:    clean(self.phone),
      title:    clean(self.title),
      country:  clean(self.country),
      industry: clean(self.industry),
      notes:    clean(self.notes),
      tags:     clean_tags(self.tags),
    }
  }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Split a tag cell on `;` or `,`, trimming and dropping empty entries.
pub fn split_tags(raw: &str) -> Vec<String> {
  clean_tags(raw.split([';', ',']).map(str::to_owned).collect())
}

/// The canonical single-string form of a tag list.
pub fn join_tags(tags: &[String]) -> String { tags.join(", ") }

fn present(s: &str) -> Option<&str> { (!s.trim().is_empty()).then_some(s) }

fn clean(value: Option<String>) -> Option<String> {
  value
    .map(|v| v.trim().to_owned())
    .filter(|v| !v.is_empty())
}

/// Trim, drop empties and drop repeats while keeping first-seen order.
fn clean_tags(tags: Vec<String>) -> Vec<String> {
  let mut out: Vec<String> = Vec::with_capacity(tags.len());
  for tag in tags {
    let tag = tag.trim();
    if !tag.is_empty() && !out.iter().any(|t| t == tag) {
      out.push(tag.to_owned());
    }
  }
  out
}

fn missing(name: &str, email: &str, company: &str) -> Vec<Field> {
  [(Field::Name, name), (Field::Email, email), (Field::Company, company)]
    .into_iter()
    .filter(|(_, v)| v.trim().is_empty())
    .map(|(f, _)| f)
    .collect()
}
