//! Async HTTP client wrapping the rolodex record API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use reqwest::{Client, Response};
use rolodex_core::{Contact, NewContact};
use serde::Deserialize;

/// Async HTTP client for the rolodex JSON API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client:   Client,
  base_url: String,
}

#[derive(Deserialize)]
struct ErrorBody {
  error: String,
}

impl ApiClient {
  pub fn new(base_url: impl Into<String>) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, base_url: base_url.into() })
  }

  fn url(&self, path: &str) -> String {
    format!("{}/api{}", self.base_url.trim_end_matches('/'), path)
  }

  /// `GET /api/contacts`
  pub async fn list_contacts(&self) -> Result<Vec<Contact>> {
    let resp = self
      .client
      .get(self.url("/contacts"))
      .send()
      .await
      .context("GET /contacts failed")?;

    let resp = check(resp, "GET /contacts").await?;
    resp.json().await.context("deserialising contacts")
  }

  /// `POST /api/contacts`
  pub async fn create_contact(&self, contact: &NewContact) -> Result<Contact> {
    let resp = self
      .client
      .post(self.url("/contacts"))
      .json(contact)
      .send()
      .await
      .context("POST /contacts failed")?;

    let resp = check(resp, "POST /contacts").await?;
    resp.json().await.context("deserialising created contact")
  }
}

/// Turn a non-2xx response into an error carrying the server's message.
async fn check(resp: Response, what: &str) -> Result<Response> {
  let status = resp.status();
  if status.is_success() {
    return Ok(resp);
  }
  let detail = resp
    .json::<ErrorBody>()
    .await
    .map(|b| b.error)
    .unwrap_or_default();
  Err(anyhow!("{what} → {status} {detail}"))
}
