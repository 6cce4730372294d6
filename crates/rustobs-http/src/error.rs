//! Error types and translation of failed exchanges.
//!
//! The pipeline reports a non-success status as [`DispatchError::Status`],
//! carrying the request that was sent and the response that came back. The
//! translator turns it into an [`ApiError`] by decoding the error body, so
//! callers always see the machine-readable code and message fields.

use std::io;

use http::StatusCode;
use rustobs_core::ConfigError;
use rustobs_xml::XmlError;
use serde_json::Value;
use tracing::debug;

use crate::decode::{ParsedResult, decode_error};
use crate::request::ObsRequest;
use crate::response::RawResponse;

/// Failures of the underlying HTTP exchange. Never produced for a status code.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The HTTP client failed to connect, send or receive.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The request body could not be read.
    #[error("failed to read request body: {0}")]
    Body(#[from] io::Error),

    /// Any other transport failure.
    #[error("transport error: {0}")]
    Connection(String),
}

/// Failures of a response decoding strategy.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// A single-field extractor found no matching element.
    #[error("missing element <{0}> in response body")]
    MissingElement(String),

    /// The body is not a well-formed XML document.
    #[error("invalid XML response: {0}")]
    Xml(#[from] XmlError),

    /// A caller-provided decoder failed.
    #[error("{0}")]
    Custom(String),
}

/// Outcome of the around-layers before translation.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The service answered with a redirect, client error or server error status.
    #[error("unexpected status {}", .response.status)]
    Status {
        /// The request as it was sent.
        request: Box<ObsRequest>,
        /// The response as it was received.
        response: RawResponse,
    },

    /// The exchange itself failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// A non-success response from the service, redirects included.
#[derive(Debug, thiserror::Error)]
#[error("{summary}")]
pub struct ApiError {
    /// The request as it was sent.
    pub request: ObsRequest,
    /// Response status.
    pub status: StatusCode,
    /// Decoded error body, or the diagnostic headers when the body is empty.
    pub error: ParsedResult,
    /// The raw response.
    pub response: RawResponse,
    /// Human-readable summary of the exchange.
    pub summary: String,
}

impl ApiError {
    /// Translate a failed exchange, decoding the error body.
    #[must_use]
    pub fn from_exchange(request: ObsRequest, response: RawResponse) -> Self {
        let status = response.status;
        let error = decode_error(&response);
        let kind = if status.is_redirection() {
            "Redirect"
        } else if status.is_client_error() {
            "Client"
        } else if status.is_server_error() {
            "Server"
        } else {
            "Unexpected"
        };
        let summary = format!(
            "{kind} error: `{} {}` resulted in a `{status}` response",
            request.method, request.uri
        );

        debug!(
            status = status.as_u16(),
            code = ?error.get("Code").and_then(serde_json::Value::as_str),
            "Translated error response"
        );

        Self {
            request,
            status,
            error,
            response,
            summary,
        }
    }

    /// The service error code, e.g. `NoSuchKey`.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.field("Code")
    }

    /// The service error message.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.field("Message")
    }

    /// The request ID assigned by the service.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.field("RequestId")
    }

    fn field(&self, key: &str) -> Option<&str> {
        self.error.get(key).and_then(Value::as_str)
    }
}

/// Every failure an [`ObsClient`](crate::ObsClient) call can return.
#[derive(Debug, thiserror::Error)]
pub enum ObsError {
    /// Invalid client configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The HTTP exchange failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The service returned a non-success status.
    #[error(transparent)]
    Api(Box<ApiError>),

    /// A success response could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The request body could not be read.
    #[error("failed to read request body: {0}")]
    Body(#[from] io::Error),

    /// An XML request document could not be written.
    #[error("failed to encode request body: {0}")]
    Encode(#[source] XmlError),

    /// The request could not be built.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ObsError {
    /// The API error, if this is one.
    #[must_use]
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }
}

impl From<XmlError> for ObsError {
    fn from(err: XmlError) -> Self {
        Self::Encode(err)
    }
}

impl From<ApiError> for ObsError {
    fn from(err: ApiError) -> Self {
        Self::Api(Box::new(err))
    }
}

impl From<DispatchError> for ObsError {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::Status { request, response } => {
                ApiError::from_exchange(*request, response).into()
            }
            DispatchError::Transport(err) => Self::Transport(err),
        }
    }
}
