//! The HTTP transport seam.
//!
//! A [`Transport`] performs exactly one exchange and reports any status code
//! as a successful [`RawResponse`]. Status interpretation belongs to the
//! pipeline's around-layers. Implementations must not follow redirects, since
//! a redirect is surfaced to the caller as a failure.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::error::TransportError;
use crate::request::ObsRequest;
use crate::response::RawResponse;

/// Executes one HTTP exchange.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request and buffer the full response.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] for connection, timeout, body or protocol failures.
    async fn send(&self, request: &ObsRequest) -> Result<RawResponse, TransportError>;
}

/// A [`Transport`] backed by `reqwest` with redirect following disabled.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with an optional whole-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Request`] if the client cannot be built.
    pub fn new(timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder().redirect(reqwest::redirect::Policy::none());
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Wrap a preconfigured client. The caller is responsible for disabling redirects.
    #[must_use]
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &ObsRequest) -> Result<RawResponse, TransportError> {
        let body = request.body.read_all()?;

        debug!(
            method = %request.method,
            uri = %request.uri,
            body_len = body.len(),
            "Sending OBS request"
        );

        let response = self
            .client
            .request(request.method.clone(), request.uri.to_string())
            .headers(request.headers.clone())
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        debug!(status = status.as_u16(), body_len = body.len(), "Received OBS response");

        Ok(RawResponse::new(status, headers, body))
    }
}
