//! HTTP transport for GraphQL page requests.
//!
//! One POST per request, no retries. Non-2xx statuses are surfaced as
//! [`TransportError::FailedResponse`] without looking at the body shape.

use crate::query::PageQuery;
use anyhow::{Context, Result};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Url};
use shared::CatalogConfig;
use std::future::Future;
use std::ops::Range;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const HTTP_SUCCESS_CODES: Range<u16> = 200..300;

/// Failure at the HTTP/network layer
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("no HTTP response: {0}")]
    UnexpectedResponse(#[source] reqwest::Error),

    #[error("request failed with status {status}: {body}")]
    FailedResponse { status: u16, body: String },
}

/// Something that can deliver a page request and hand back the raw body
pub trait Transport: Send + Sync {
    fn send(
        &self,
        query: &PageQuery,
    ) -> impl Future<Output = std::result::Result<Vec<u8>, TransportError>> + Send;
}

/// GraphQL transport over a shared reqwest client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// HTTP client
    client: Client,
    /// GraphQL endpoint
    endpoint: Url,
}

impl HttpTransport {
    /// Create a transport posting to `endpoint`
    pub fn new(endpoint: &str, timeout: Duration, user_agent: &str) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .with_context(|| format!("Invalid GraphQL endpoint: {}", endpoint))?;

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, endpoint })
    }

    /// Create a transport from the `[catalog]` section
    pub fn from_config(config: &CatalogConfig) -> Result<Self> {
        Self::new(&config.endpoint, config.timeout(), &config.user_agent)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl Transport for HttpTransport {
    async fn send(&self, query: &PageQuery) -> std::result::Result<Vec<u8>, TransportError> {
        let body = serde_json::to_vec(query).map_err(TransportError::Encode)?;

        debug!(
            url = %self.endpoint,
            page = query.variables.page,
            media_type = %query.variables.media_type,
            "Making GraphQL request"
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                warn!(url = %self.endpoint, error = %e, "Request error");
                TransportError::UnexpectedResponse(e)
            })?;

        let status = response.status().as_u16();
        if !HTTP_SUCCESS_CODES.contains(&status) {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            warn!(
                url = %self.endpoint,
                status = status,
                error = %body,
                "Request failed"
            );
            return Err(TransportError::FailedResponse { status, body });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(TransportError::UnexpectedResponse)?;

        debug!(url = %self.endpoint, bytes = bytes.len(), "Request successful");
        Ok(bytes.to_vec())
    }
}
