//! Inbound response types.

use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use serde_json::Value;

use crate::decode::ParsedResult;
use crate::request::header_line;

/// Status, headers and fully buffered body as returned by a [`Transport`](crate::Transport).
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body.
    pub body: Bytes,
}

impl RawResponse {
    /// Create a response.
    #[must_use]
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// A header joined across repeated values with `", "`, if present.
    #[must_use]
    pub fn header_line(&self, name: &str) -> Option<String> {
        self.headers
            .contains_key(name)
            .then(|| header_line(&self.headers, name, ", "))
    }
}

/// A successful response together with its decoded result.
#[derive(Debug, Clone)]
pub struct ObsResponse {
    /// HTTP status.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Raw response body; object downloads keep their payload here.
    pub body: Bytes,
    result: ParsedResult,
}

impl ObsResponse {
    /// Combine a raw response with its decoded result.
    #[must_use]
    pub fn new(raw: RawResponse, result: ParsedResult) -> Self {
        Self {
            status: raw.status,
            headers: raw.headers,
            body: raw.body,
            result,
        }
    }

    /// Look up a decoded field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.result.get(key)
    }

    /// Look up a decoded field as a string.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// The `RequestId` field, when the decoder recorded one.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.get_str("RequestId")
    }

    /// The full decoded result.
    #[must_use]
    pub fn result(&self) -> &ParsedResult {
        &self.result
    }

    /// Consume the response, keeping only the decoded result.
    #[must_use]
    pub fn into_result(self) -> ParsedResult {
        self.result
    }
}
