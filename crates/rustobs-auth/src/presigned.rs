//! Pre-signed (temporary) URL query construction.
//!
//! A temporary URL carries the authorization in its query string instead of
//! an `Authorization` header:
//!
//! - `AccessKeyId` - the access key
//! - `Expires` - absolute expiry in epoch seconds, signed in place of the date
//! - `Signature` - `Base64(HMAC-SHA1(secret, StringToSign))`
//!
//! The string to sign uses `GET`, an empty Content-MD5 and Content-Type, no
//! canonical headers and the resource `/{bucket}/{object}`.

use rustobs_core::Credentials;
use tracing::debug;

use crate::canonical::CanonicalHeaders;
use crate::signer::Signer;

/// Query-string authentication parameters of a temporary URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresignedQuery {
    /// The access key ID.
    pub access_key_id: String,
    /// Expiry in epoch seconds.
    pub expires: u64,
    /// The base64 signature.
    pub signature: String,
}

impl PresignedQuery {
    /// Form-urlencode the parameters in `AccessKeyId`, `Expires`, `Signature` order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rustobs_auth::PresignedQuery;
    ///
    /// let q = PresignedQuery {
    ///     access_key_id: "AK".to_owned(),
    ///     expires: 10,
    ///     signature: "a+b/c=".to_owned(),
    /// };
    /// assert_eq!(q.to_query_string(), "AccessKeyId=AK&Expires=10&Signature=a%2Bb%2Fc%3D");
    /// ```
    #[must_use]
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair("AccessKeyId", &self.access_key_id)
            .append_pair("Expires", &self.expires.to_string())
            .append_pair("Signature", &self.signature)
            .finish()
    }
}

/// The canonical resource of a temporary URL: `/{bucket}/{object}` with slashes collapsed.
#[must_use]
pub fn presigned_resource(bucket: &str, object: &str) -> String {
    let raw = format!("/{bucket}/{}", object.trim_start_matches('/'));
    let mut resource = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if ch == '/' && resource.ends_with('/') {
            continue;
        }
        resource.push(ch);
    }
    resource
}

/// Sign a temporary `GET` URL for one object.
#[must_use]
pub fn presign(credentials: &Credentials, bucket: &str, object: &str, expires: u64) -> PresignedQuery {
    let resource = presigned_resource(bucket, object);
    let signer = Signer::new(credentials.secret_key().clone());
    let signature =
        signer.sign_temporary("GET", "", "", expires, &CanonicalHeaders::default(), &resource);

    debug!(
        access_key_id = %credentials.access_key(),
        resource = %resource,
        expires,
        "Signed temporary URL"
    );

    PresignedQuery {
        access_key_id: credentials.access_key().to_owned(),
        expires,
        signature,
    }
}
