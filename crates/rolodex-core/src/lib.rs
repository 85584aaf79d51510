//! Core types and the data-processing pipeline for the Rolodex contact
//! directory.
//!
//! This crate has no HTTP or database dependencies. The
//! pipeline runs in a fixed order over an in-memory [`RecordStore`]:
//! search index → filters → sort → grouping. Every stage is a pure function
//! of its input; only the store and the undo [`History`] hold state, and the
//! [`Directory`] session owns both.

pub mod contact;
pub mod debounce;
pub mod directory;
pub mod error;
pub mod filter;
pub mod group;
pub mod history;
pub mod index;
pub mod repository;
pub mod seed;
pub mod sort;
pub mod store;
pub mod view;

pub use contact::{Contact, ContactId, Field, NewContact, Timestamp};
pub use directory::Directory;
pub use error::{Error, Result};
pub use filter::Filters;
pub use group::{Bucket, BucketKey, Grouping};
pub use history::{History, HistoryEntry};
pub use sort::{Direction, SortSpec};
pub use store::RecordStore;
pub use view::{DirectoryView, ViewQuery};
