//! Error types for OBS authentication.
//!
//! Signing itself cannot fail. [`AuthError`] covers the verification side,
//! where an incoming `Authorization` header is checked against a credential store.

/// Errors that can occur while verifying an OBS-signed request.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The `Authorization` header is missing from the request.
    #[error("Missing Authorization header")]
    MissingAuthHeader,

    /// The `Authorization` header could not be parsed.
    #[error("Invalid Authorization header format")]
    InvalidAuthHeader,

    /// The access key ID was not found in the credential store.
    #[error("Access key not found: {0}")]
    AccessKeyNotFound(String),

    /// The computed signature does not match the provided signature.
    #[error("Signature does not match")]
    SignatureDoesNotMatch,

    /// A required temporary-URL query parameter is missing or malformed.
    #[error("Missing or invalid query parameter: {0}")]
    InvalidQueryParam(&'static str),

    /// The temporary URL is past its expiry.
    #[error("Request has expired")]
    RequestExpired,
}
