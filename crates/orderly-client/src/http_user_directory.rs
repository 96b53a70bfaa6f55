//! HTTP-based remote user directory.
//!
//! Talks to the user service's REST API. Only the read path the order service
//! needs is implemented.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use orderly_config::DirectoryConfig;
use orderly_core::{CallContext, OrderlyError, OrderlyResult, Subject, UserId};
use orderly_service::UserDirectory;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Deserializer};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

const SERVICE_NAME: &str = "user-directory";

/// Remote user directory over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpUserDirectory {
    client: Client,
    base_url: String,
}

impl HttpUserDirectory {
    /// Creates a directory client from configuration.
    pub fn new(config: &DirectoryConfig) -> OrderlyResult<Self> {
        let base_url = config.base_url().ok_or_else(|| {
            OrderlyError::Configuration("directory.base_url is not set".to_string())
        })?;

        let client = Client::builder()
            .timeout(config.timeout())
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| OrderlyError::Configuration(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self::with_client(client, base_url))
    }

    /// Creates a directory client over an existing HTTP client.
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn fetch(&self, id: UserId) -> OrderlyResult<Subject> {
        let response = self
            .client
            .get(self.url(&format!("/v1/users/{id}")))
            .send()
            .await
            .map_err(|e| OrderlyError::external(SERVICE_NAME, format!("HTTP error: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_http_error(status, id, &body));
        }

        let envelope: HttpEnvelope = response
            .json()
            .await
            .map_err(|e| OrderlyError::external(SERVICE_NAME, format!("JSON parse error: {e}")))?;

        let user = envelope.data.ok_or_else(|| {
            OrderlyError::external(SERVICE_NAME, "response carried no user")
        })?;

        Ok(Subject {
            id: UserId::new(user.id),
            email: user.email,
            created_at: user.created_at,
        })
    }
}

#[async_trait]
impl UserDirectory for HttpUserDirectory {
    async fn get_user(&self, ctx: &CallContext, id: UserId) -> OrderlyResult<Subject> {
        debug!("HTTP GetUser: {}", id);
        ctx.run(self.fetch(id)).await
    }
}

/// Creates a shareable HTTP user directory.
pub fn create_http_user_directory(config: &DirectoryConfig) -> OrderlyResult<Arc<dyn UserDirectory>> {
    let directory = HttpUserDirectory::new(config)?;
    Ok(Arc::new(directory))
}

#[derive(Debug, Deserialize)]
struct HttpEnvelope {
    data: Option<HttpUser>,
}

#[derive(Debug, Deserialize)]
struct HttpUser {
    #[serde(deserialize_with = "int64_from_number_or_string")]
    id: i64,
    email: String,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

/// Accepts an int64 rendered either as a JSON number or as a decimal string.
fn int64_from_number_or_string<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Int64 {
        Number(i64),
        Text(String),
    }

    match Int64::deserialize(deserializer)? {
        Int64::Number(n) => Ok(n),
        Int64::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

fn map_http_error(status: StatusCode, id: UserId, body: &str) -> OrderlyError {
    match status {
        StatusCode::NOT_FOUND => OrderlyError::not_found("User", id),
        _ => {
            warn!("User directory returned {} for user {}", status, id);
            OrderlyError::external(SERVICE_NAME, format!("HTTP error {status}: {body}"))
        }
    }
}
