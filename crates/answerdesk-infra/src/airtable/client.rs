//! AirtableClient -- HTTP access to one Airtable base.
//!
//! Lists follow the `offset` cursor until the last page, so callers always
//! see the whole table. Creates and updates send one record per request.
//!
//! The access token is wrapped in [`secrecy::SecretString`] and is only
//! exposed when building the `Authorization` header.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;

use answerdesk_core::repository::table::{RecordTable, Tables};
use answerdesk_types::config::{AirtableConfig, TableNames};
use answerdesk_types::error::TableError;
use answerdesk_types::record::{Fields, Record, RecordId};

use super::types::{CreateRequest, ErrorBody, ListResponse, UpdateRequest};
use crate::credentials::AirtableCredentials;

/// Largest page the list endpoint returns.
const PAGE_SIZE: &str = "100";

struct ClientInner {
    http: reqwest::Client,
    token: SecretString,
    base_url: Url,
    base_id: String,
}

/// Client for one Airtable base. Cheap to clone.
#[derive(Clone)]
pub struct AirtableClient {
    inner: Arc<ClientInner>,
}

impl AirtableClient {
    pub fn new(config: &AirtableConfig, credentials: AirtableCredentials) -> Result<Self, TableError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            TableError::Configuration(format!("invalid base url {:?}: {e}", config.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(TableError::Configuration(format!(
                "base url {:?} cannot carry a path",
                config.base_url
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| TableError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                token: credentials.token,
                base_url,
                base_id: credentials.base_id,
            }),
        })
    }

    /// Bind the client to one table.
    pub fn table(&self, name: &str) -> AirtableTable {
        AirtableTable {
            client: self.clone(),
            name: name.to_string(),
        }
    }

    /// All four tables of the base under their configured names.
    pub fn tables(&self, names: &TableNames) -> Tables<AirtableTable> {
        Tables {
            questions: self.table(&names.questions),
            companies: self.table(&names.companies),
            robots: self.table(&names.robots),
            feedback: self.table(&names.feedback),
        }
    }

    /// `{base_url}/v0/{base_id}/{table}[/{record}]`, each segment percent-encoded.
    fn url(&self, table: &str, record: Option<&RecordId>) -> Url {
        let mut url = self.inner.base_url.clone();
        // `new` rejected cannot-be-a-base urls.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push("v0")
                .push(&self.inner.base_id)
                .push(table);
            if let Some(id) = record {
                segments.push(id.as_str());
            }
        }
        url
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.bearer_auth(self.inner.token.expose_secret())
    }

    async fn list_all(&self, table: &str) -> Result<Vec<Record>, TableError> {
        let url = self.url(table, None);
        let mut pages = PageCollector::default();
        let mut offset: Option<String> = None;

        loop {
            let mut request = self
                .authorized(self.inner.http.get(url.clone()))
                .query(&[("pageSize", PAGE_SIZE)]);
            if let Some(offset) = &offset {
                request = request.query(&[("offset", offset.as_str())]);
            }

            let page: ListResponse = send(request).await?;
            offset = pages.push(page)?;
            if offset.is_none() {
                break;
            }
        }

        tracing::debug!(table, pages = pages.pages, records = pages.records.len(), "table listed");
        Ok(pages.records)
    }

    async fn create(&self, table: &str, fields: &Fields) -> Result<Record, TableError> {
        let request = self
            .authorized(self.inner.http.post(self.url(table, None)))
            .json(&CreateRequest {
                fields,
                typecast: false,
            });
        let record: Record = send(request).await?;
        tracing::debug!(table, record = %record.id, "record created");
        Ok(record)
    }

    async fn update(&self, table: &str, id: &RecordId, fields: &Fields) -> Result<Record, TableError> {
        let request = self
            .authorized(self.inner.http.patch(self.url(table, Some(id))))
            .json(&UpdateRequest { fields });
        let record: Record = send(request).await?;
        tracing::debug!(table, record = %record.id, "record updated");
        Ok(record)
    }
}

// AirtableClient intentionally has no Debug impl; it holds the access token.

/// One table of an Airtable base.
#[derive(Clone)]
pub struct AirtableTable {
    client: AirtableClient,
    name: String,
}

impl AirtableTable {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl RecordTable for AirtableTable {
    async fn list_all(&self) -> Result<Vec<Record>, TableError> {
        self.client.list_all(&self.name).await
    }

    async fn create(&self, fields: Fields) -> Result<Record, TableError> {
        self.client.create(&self.name, &fields).await
    }

    async fn update(&self, id: &RecordId, fields: Fields) -> Result<Record, TableError> {
        self.client.update(&self.name, id, &fields).await
    }
}

/// Joins list pages in the order they arrive.
#[derive(Default)]
struct PageCollector {
    records: Vec<Record>,
    seen_offsets: HashSet<String>,
    pages: usize,
}

impl PageCollector {
    /// Add a page; returns the offset to request next, or `None` after the
    /// last page. An offset the server already handed out is an error.
    fn push(&mut self, page: ListResponse) -> Result<Option<String>, TableError> {
        self.pages += 1;
        self.records.extend(page.records);

        match page.offset {
            Some(next) if !self.seen_offsets.insert(next.clone()) => Err(
                TableError::Deserialization(format!("pagination offset {next:?} repeated")),
            ),
            next => Ok(next),
        }
    }
}

async fn send<T: DeserializeOwned>(request: reqwest::RequestBuilder) -> Result<T, TableError> {
    let response = request
        .send()
        .await
        .map_err(|e| TableError::Transport(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(status_error(status.as_u16(), &body));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| TableError::Deserialization(format!("failed to parse response: {e}")))
}

/// Map a non-success status and its body to a [`TableError`].
pub(crate) fn status_error(status: u16, body: &str) -> TableError {
    match status {
        401 | 403 => TableError::Unauthorized,
        404 => TableError::NotFound(error_message(body)),
        429 => TableError::RateLimited,
        _ => TableError::Http {
            status,
            message: error_message(body),
        },
    }
}

fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.error.describe(),
        Err(_) if body.trim().is_empty() => "empty response body".to_string(),
        Err(_) => body.trim().to_string(),
    }
}
