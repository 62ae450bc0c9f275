//! HTTP transport seam for the Gemini client.
//!
//! The dispatcher talks to the network through `Transport`, so tests can
//! script statuses and bodies without a live endpoint. Production uses the
//! reqwest-backed implementation.

use async_trait::async_trait;
use thiserror::Error;

use crate::llm_client::GenerateContentRequest;

/// Network-level failure (DNS, connect, TLS, aborted body).
#[derive(Debug, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Raw reply from one POST attempt: status code plus unparsed body.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(
        &self,
        url: &str,
        request: &GenerateContentRequest,
    ) -> Result<Reply, TransportError>;
}

pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
        }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(
        &self,
        url: &str,
        request: &GenerateContentRequest,
    ) -> Result<Reply, TransportError> {
        let response = self
            .client
            .post(url)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        Ok(Reply { status, body })
    }
}
