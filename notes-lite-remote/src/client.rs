//! Remote tabular API client
//!
//! Exposes the three verbs the notes backend needs: `select`, `upsert` and
//! `delete`, each addressed by table name and narrowed by equality filters.

use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{RemoteError, Result};
use crate::http_client::HttpUtils;
use crate::types::{Filter, RemoteConfig};

/// Path prefix of the REST interface below the project endpoint.
const REST_PREFIX: &str = "rest/v1/";

/// Client for a PostgREST-compatible backend.
#[derive(Clone)]
pub struct RemoteClient {
    client: Client,
    base_url: Url,
    access_key: String,
    max_retries: u32,
}

impl RemoteClient {
    /// Build a client from configuration.
    ///
    /// Validates the endpoint URL and key; no request is sent.
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        let endpoint = config.endpoint_url.trim();
        if endpoint.is_empty() {
            return Err(RemoteError::InvalidConfig {
                field: "endpoint_url".to_string(),
                detail: "must not be empty".to_string(),
            });
        }
        if config.access_key.trim().is_empty() {
            return Err(RemoteError::InvalidConfig {
                field: "access_key".to_string(),
                detail: "must not be empty".to_string(),
            });
        }

        let mut base_url = Url::parse(endpoint).map_err(|e| RemoteError::InvalidConfig {
            field: "endpoint_url".to_string(),
            detail: e.to_string(),
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(RemoteError::InvalidConfig {
                field: "endpoint_url".to_string(),
                detail: format!("unsupported scheme '{}'", base_url.scheme()),
            });
        }
        // `Url::join` replaces the last segment unless the path ends with '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| RemoteError::InvalidConfig {
                field: "http_client".to_string(),
                detail: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url,
            access_key: config.access_key.trim().to_string(),
            max_retries: config.max_retries,
        })
    }

    /// Normalized project endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.base_url
    }

    fn table_url(&self, table: &str) -> Result<Url> {
        self.base_url
            .join(REST_PREFIX)
            .and_then(|rest| rest.join(table))
            .map_err(|e| RemoteError::InvalidConfig {
                field: "table".to_string(),
                detail: format!("{table}: {e}"),
            })
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.access_key)
            .header("Authorization", format!("Bearer {}", self.access_key))
    }

    async fn send(
        &self,
        builder: RequestBuilder,
        method_name: &str,
        url: &Url,
        table: &str,
    ) -> Result<String> {
        let (status, body) = HttpUtils::execute_request_with_retry(
            builder,
            method_name,
            url.as_str(),
            self.max_retries,
        )
        .await?;

        if (200..300).contains(&status) {
            Ok(body)
        } else {
            let err = HttpUtils::status_error(status, &body, table);
            if err.is_expected() {
                log::warn!("[remote] {method_name} {table} failed: {err}");
            } else {
                log::error!("[remote] {method_name} {table} failed: {err}");
            }
            Err(err)
        }
    }

    /// `SELECT *` from `table` where every filter matches.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[Filter],
    ) -> Result<Vec<T>> {
        let url = self.table_url(table)?;
        let mut query = vec![("select".to_string(), "*".to_string())];
        query.extend(filters.iter().map(Filter::to_query_pair));

        let builder = self.authorized(self.client.get(url.clone()).query(&query));
        let body = self.send(builder, "GET", &url, table).await?;
        HttpUtils::parse_json(&body)
    }

    /// Insert `row`, replacing any existing row with the same primary key.
    pub async fn upsert<B: Serialize + ?Sized>(&self, table: &str, row: &B) -> Result<()> {
        let url = self.table_url(table)?;
        let payload =
            serde_json::to_vec(row).map_err(|e| RemoteError::SerializationError {
                detail: e.to_string(),
            })?;

        let builder = self.authorized(
            self.client
                .post(url.clone())
                .header("Content-Type", "application/json")
                .header("Prefer", "resolution=merge-duplicates,return=minimal")
                .body(payload),
        );
        self.send(builder, "POST", &url, table).await?;
        Ok(())
    }

    /// Delete rows of `table` matching every filter.
    ///
    /// Refuses to run without filters, which would empty the table.
    pub async fn delete(&self, table: &str, filters: &[Filter]) -> Result<()> {
        if filters.is_empty() {
            return Err(RemoteError::InvalidConfig {
                field: "filters".to_string(),
                detail: format!("refusing unfiltered delete on '{table}'"),
            });
        }
        let url = self.table_url(table)?;
        let query: Vec<(String, String)> = filters.iter().map(Filter::to_query_pair).collect();

        let builder = self.authorized(self.client.delete(url.clone()).query(&query));
        self.send(builder, "DELETE", &url, table).await?;
        Ok(())
    }
}

impl std::fmt::Debug for RemoteClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteClient")
            .field("base_url", &self.base_url.as_str())
            .field("max_retries", &self.max_retries)
            .finish_non_exhaustive()
    }
}
