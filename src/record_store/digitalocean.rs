//! A [`RecordStore`] backed by the DigitalOcean domain records API.
//!
//! Uses two endpoints of the v2 API:
//!
//! - `GET /v2/domains/{zone}/records?type=...&name=...` to locate a
//!   record id
//! - `PUT /v2/domains/{zone}/records/{id}` with `{"data": "..."}` to
//!   replace its value

use crate::error::Error;
use crate::query::RecordKind;
use crate::record_store::{Lookup, RecordStore};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

const API_BASE: &str = "https://api.digitalocean.com/v2";

#[derive(Debug, Deserialize)]
struct DomainRecord {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct RecordsPage {
    #[serde(default)]
    domain_records: Vec<DomainRecord>,
}

/// A minimal DigitalOcean domains client.
#[allow(clippy::module_name_repetitions)]
pub struct DigitalOceanStore {
    client: reqwest::Client,
    api_token: String,
    base_url: String,
}

// The Debug form never includes the API token.
impl std::fmt::Debug for DigitalOceanStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DigitalOceanStore")
            .field("api_token", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl DigitalOceanStore {
    /// Builds a client authenticated with `api_token`. `timeout` bounds
    /// each HTTP call at the client level; the reconciler applies its
    /// own per-call deadline on top.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(api_token: impl Into<String>, timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_token: api_token.into(),
            base_url: API_BASE.to_string(),
        })
    }

    #[cfg(test)]
    fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl RecordStore for DigitalOceanStore {
    async fn find_record(
        &self,
        zone: &str,
        kind: RecordKind,
        name: &str,
    ) -> Result<Lookup, Error> {
        let response = self
            .client
            .get(format!("{}/domains/{zone}/records", self.base_url))
            .query(&[("type", kind.as_str()), ("name", name)])
            .bearer_auth(&self.api_token)
            .send()
            .await?;

        let status = response.status().as_u16();
        if status != 200 {
            return Ok(Lookup { status, id: None });
        }

        let page: RecordsPage = response.json().await?;
        Ok(Lookup {
            status,
            id: page.domain_records.first().map(|record| record.id),
        })
    }

    async fn update_record(&self, zone: &str, id: i64, addr: &str) -> Result<u16, Error> {
        let response = self
            .client
            .put(format!("{}/domains/{zone}/records/{id}", self.base_url))
            .bearer_auth(&self.api_token)
            .json(&json!({ "data": addr }))
            .send()
            .await?;

        Ok(response.status().as_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_page_parses_do_response() {
        let body = r#"{
            "domain_records": [
                {"id": 3352896, "type": "A", "name": "test", "data": "192.0.2.7"}
            ],
            "meta": {"total": 1}
        }"#;
        let page: RecordsPage = serde_json::from_str(body).unwrap();
        assert_eq!(page.domain_records.len(), 1);
        assert_eq!(page.domain_records[0].id, 3_352_896);
    }

    #[test]
    fn records_page_tolerates_missing_list() {
        let page: RecordsPage = serde_json::from_str("{}").unwrap();
        assert!(page.domain_records.is_empty());
    }

    #[test]
    fn debug_redacts_the_api_token() {
        let store = DigitalOceanStore::new("very-secret", Duration::from_secs(5))
            .unwrap()
            .with_base_url("http://localhost:1");
        let rendered = format!("{store:?}");
        assert!(!rendered.contains("very-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
