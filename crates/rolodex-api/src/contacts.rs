//! Handlers for `/contacts` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/contacts` | Every contact, insertion order |
//! | `POST` | `/contacts` | Body: a new contact; `400` if a required field is empty |

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use rolodex_core::{Contact, NewContact, repository::ContactRepository};

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /contacts`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<Contact>>, ApiError>
where
  S: ContactRepository,
{
  let contacts = store.list_contacts().await.map_err(ApiError::store)?;
  Ok(Json(contacts))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /contacts` with body `{"name":"…","email":"…","company":"…", …}`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewContact>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ContactRepository,
{
  body
    .validate()
    .map_err(|e| ApiError::BadRequest(e.to_string()))?;

  let contact = store.create_contact(body).await.map_err(ApiError::store)?;
  tracing::info!(id = %contact.id, "contact created");
  Ok((StatusCode::CREATED, Json(contact)))
}
