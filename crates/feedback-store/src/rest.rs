use std::sync::Arc;

use feedback_types::{
    config::{StoreConfig, StoreCredentials},
    Submission,
};
use futures::{future::BoxFuture, FutureExt as _};
use reqwest::{
    header::{self, HeaderValue},
    StatusCode,
};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::{validate_table, Connector, Store, StoreError, StoreResult};

const REST_PATH: &str = "rest/v1/";

/// Client of a PostgREST compatible store (as hosted by Supabase).
#[derive(Clone)]
pub struct RestStore {
    client: reqwest::Client,
    base_url: Url,
    key: String,
}

impl RestStore {
    pub fn new(client: reqwest::Client, credentials: StoreCredentials) -> Self {
        let StoreCredentials { mut url, key } = credentials;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        RestStore {
            client,
            base_url: url,
            key,
        }
    }

    /// Builds a standalone store handle from configuration.
    ///
    /// Fails if url or key is missing, there is no usable handle without them.
    pub fn connect(config: &StoreConfig) -> StoreResult<Self> {
        let credentials = config.credentials()?;
        Ok(RestStore::new(reqwest::Client::new(), credentials))
    }

    pub fn table_url(&self, table: &str) -> StoreResult<Url> {
        validate_table(table)?;
        let url = self.base_url.join(REST_PATH)?.join(table)?;
        Ok(url)
    }

    pub async fn insert_rows(&self, table: &str, rows: &[Submission]) -> StoreResult<()> {
        let url = self.table_url(table)?;
        debug!("Inserting {} row(s) into {url}", rows.len());
        let response = self
            .client
            .post(url)
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
            .header("Prefer", HeaderValue::from_static("return=minimal"))
            .header(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .json(rows)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(rejection(status, &body))
        }
    }
}

impl Store for RestStore {
    fn insert<'a>(
        &'a self,
        table: &'a str,
        rows: &'a [Submission],
    ) -> BoxFuture<'a, StoreResult<()>> {
        self.insert_rows(table, rows).boxed()
    }
}

/// Error body as returned by PostgREST
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    code: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

fn rejection(status: StatusCode, body: &str) -> StoreError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(err) => {
            debug!(
                "Store rejected request: {} (details: {:?}, hint: {:?})",
                err.message, err.details, err.hint
            );
            StoreError::Rejected {
                status: status.as_u16(),
                code: err.code,
                message: err.message,
            }
        }
        Err(_) => {
            let message = if body.trim().is_empty() {
                status
                    .canonical_reason()
                    .map(str::to_string)
                    .unwrap_or_else(|| status.to_string())
            } else {
                body.trim().to_string()
            };
            StoreError::Rejected {
                status: status.as_u16(),
                code: None,
                message,
            }
        }
    }
}

/// Shares one http connection pool among all store clients it creates.
#[derive(Clone, Default)]
pub struct RestConnector {
    client: reqwest::Client,
}

impl RestConnector {
    pub fn new(client: reqwest::Client) -> Self {
        RestConnector { client }
    }
}

impl Connector for RestConnector {
    fn connect(&self, credentials: &StoreCredentials) -> StoreResult<Arc<dyn Store>> {
        Ok(Arc::new(RestStore::new(
            self.client.clone(),
            credentials.clone(),
        )))
    }
}
