//! HTTP transport seam
//!
//! The query chain only ever needs a single GET whose outcome is sorted into
//! ok / server error / client error. Connection handling, headers and
//! timeouts belong to the implementation behind [`Transport`].

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::classify::TransportOutcome;
use crate::config::HttpConfig;
use crate::error::Result;

/// Performs a GET and reports how it went
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch `url`.
    ///
    /// Returns `Err` only when no HTTP response was received at all.
    async fn get(&self, url: &str) -> Result<TransportOutcome>;
}

/// `reqwest`-backed transport
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    /// Build a transport from HTTP settings
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self::with_client(http))
    }

    /// Wrap an already configured client
    pub fn with_client(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<TransportOutcome> {
        tracing::debug!(%url, "dispatching GET");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        tracing::debug!(%url, status = status.as_u16(), bytes = body.len(), "response received");

        Ok(outcome_for(status, body))
    }
}

/// Sort an HTTP status into the three outcomes the classifier understands
fn outcome_for(status: reqwest::StatusCode, body: String) -> TransportOutcome {
    if status.is_success() {
        TransportOutcome::Ok(body)
    } else if status.is_client_error() {
        TransportOutcome::ClientError(body)
    } else {
        TransportOutcome::ServerError(body)
    }
}
