//! The `Content-MD5` stage.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use http::header::{HeaderName, HeaderValue};
use md5::{Digest, Md5};
use tracing::debug;

use crate::error::ObsError;
use crate::pipeline::RequestTransform;
use crate::request::ObsRequest;

/// The `Content-MD5` header name.
pub const CONTENT_MD5: HeaderName = HeaderName::from_static("content-md5");

/// Base64 of the MD5 digest of `data`.
///
/// # Examples
///
/// ```
/// assert_eq!(rustobs_http::transform::content_md5(b""), "1B2M2Y8AsgTpgAmY7PhCfg==");
/// ```
#[must_use]
pub fn content_md5(data: &[u8]) -> String {
    BASE64.encode(Md5::digest(data))
}

/// Sets `Content-MD5` from the full body, empty bodies included.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentMd5;

impl RequestTransform for ContentMd5 {
    fn name(&self) -> &'static str {
        "content-md5"
    }

    fn transform(&self, mut request: ObsRequest) -> Result<ObsRequest, ObsError> {
        let body = request.body.read_all()?;
        let digest = content_md5(&body);

        debug!(body_len = body.len(), content_md5 = %digest, "Computed Content-MD5");

        let value =
            HeaderValue::from_str(&digest).map_err(|e| ObsError::InvalidRequest(e.to_string()))?;
        request.headers.insert(CONTENT_MD5, value);
        Ok(request)
    }
}
