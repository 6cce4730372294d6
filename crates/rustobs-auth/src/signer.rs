//! String-to-sign layout and HMAC-SHA1 signature computation.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::{Hmac, KeyInit, Mac};
use rustobs_core::SecretKey;
use sha1::Sha1;
use tracing::trace;

use crate::canonical::CanonicalHeaders;

type HmacSha1 = Hmac<Sha1>;

/// Build the OBS string to sign.
///
/// ```text
/// HTTP-Verb + "\n" +
/// Content-MD5 + "\n" +
/// Content-Type + "\n" +
/// Date + "\n" +
/// CanonicalizedHeaders +
/// CanonicalizedResource
/// ```
///
/// # Examples
///
/// ```
/// use rustobs_auth::{CanonicalHeaders, string_to_sign};
///
/// let headers = CanonicalHeaders::from_pairs([("x-obs-acl", "private")]);
/// let s = string_to_sign("PUT", "", "text/plain", "date", &headers, "/b/k");
/// assert_eq!(s, "PUT\n\ntext/plain\ndate\nx-obs-acl:private\n/b/k");
/// ```
#[must_use]
pub fn string_to_sign(
    method: &str,
    content_md5: &str,
    content_type: &str,
    date: &str,
    headers: &CanonicalHeaders,
    resource: &str,
) -> String {
    format!("{method}\n{content_md5}\n{content_type}\n{date}\n{headers}{resource}")
}

/// Computes `Base64(HMAC-SHA1(secret, string_to_sign))` for OBS requests.
#[derive(Debug, Clone)]
pub struct Signer {
    secret: SecretKey,
}

impl Signer {
    /// Create a signer bound to one secret key.
    pub fn new(secret: impl Into<SecretKey>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Sign a header-authenticated request.
    #[must_use]
    pub fn sign(
        &self,
        method: &str,
        content_md5: &str,
        content_type: &str,
        date: &str,
        headers: &CanonicalHeaders,
        resource: &str,
    ) -> String {
        let string_to_sign =
            string_to_sign(method, content_md5, content_type, date, headers, resource);
        trace!(string_to_sign = ?string_to_sign, "Built OBS string to sign");
        self.compute_signature(&string_to_sign)
    }

    /// Sign a query-authenticated (temporary) request.
    ///
    /// The expiry, in epoch seconds, takes the place of the date line.
    #[must_use]
    pub fn sign_temporary(
        &self,
        method: &str,
        content_md5: &str,
        content_type: &str,
        expires: u64,
        headers: &CanonicalHeaders,
        resource: &str,
    ) -> String {
        self.sign(
            method,
            content_md5,
            content_type,
            &expires.to_string(),
            headers,
            resource,
        )
    }

    /// HMAC-SHA1 over an arbitrary string, base64-encoded.
    #[must_use]
    pub fn compute_signature(&self, string_to_sign: &str) -> String {
        let mut mac = HmacSha1::new_from_slice(self.secret.as_bytes())
            .expect("HMAC can accept any key length");
        mac.update(string_to_sign.as_bytes());
        BASE64.encode(mac.finalize().into_bytes())
    }
}
