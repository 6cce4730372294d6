//! Verification of OBS-signed requests.
//!
//! This is the server half of the scheme. It recomputes the signature from the
//! request parts exactly as the signing side does and compares the result in
//! constant time. Mock services and test harnesses use it to check that a
//! client signed what it sent.

use std::collections::HashMap;

use subtle::ConstantTimeEq;
use tracing::debug;

use crate::canonical::{CanonicalHeaders, Canonicalizer};
use crate::credentials::CredentialProvider;
use crate::error::AuthError;
use crate::profile::SigningProfile;
use crate::signer::Signer;

/// Check whether an `Authorization` header uses the given scheme (`OBS AK:sig`).
///
/// # Examples
///
/// ```
/// use rustobs_auth::is_obs_authorization;
///
/// assert!(is_obs_authorization("OBS AK:sig", "OBS"));
/// assert!(!is_obs_authorization("AWS AK:sig", "OBS"));
/// ```
#[must_use]
pub fn is_obs_authorization(auth_header: &str, scheme: &str) -> bool {
    auth_header
        .strip_prefix(scheme)
        .is_some_and(|rest| rest.starts_with(' '))
}

/// Parse an `Authorization` header of the form `{scheme} AK:Signature`.
pub fn parse_obs_header(header: &str, scheme: &str) -> Result<(String, String), AuthError> {
    let rest = header
        .strip_prefix(scheme)
        .and_then(|rest| rest.strip_prefix(' '))
        .ok_or(AuthError::InvalidAuthHeader)?;

    let (access_key_id, signature) = rest.split_once(':').ok_or(AuthError::InvalidAuthHeader)?;

    if access_key_id.is_empty() || signature.is_empty() {
        return Err(AuthError::InvalidAuthHeader);
    }

    Ok((access_key_id.to_owned(), signature.to_owned()))
}

/// Verify a header-signed request and return the authenticated access key.
///
/// # Errors
///
/// Returns an [`AuthError`] if the header is missing or malformed, the access
/// key is unknown, or the signature does not match.
pub fn verify_authorization(
    parts: &http::request::Parts,
    credential_provider: &dyn CredentialProvider,
    profile: &SigningProfile,
) -> Result<String, AuthError> {
    let auth_header = parts
        .headers
        .get(http::header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuthHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidAuthHeader)?;

    let (access_key_id, provided_signature) = parse_obs_header(auth_header, &profile.scheme)?;

    debug!(access_key_id = %access_key_id, "Verifying OBS signature");

    let secret_key = credential_provider.get_secret_key(&access_key_id)?;

    let canonicalizer = Canonicalizer::new(profile.clone());
    let (resource, headers) = canonicalizer.canonicalize(&parts.uri, &parts.headers);

    let expected_signature = Signer::new(secret_key).sign(
        parts.method.as_str(),
        &header_value(parts, "content-md5"),
        &header_value(parts, "content-type"),
        &header_value(parts, "date"),
        &headers,
        &resource,
    );

    compare(&access_key_id, &provided_signature, &expected_signature)?;
    Ok(access_key_id)
}

/// Verify a temporary URL at time `now` (epoch seconds) and return the access key.
///
/// # Errors
///
/// Returns [`AuthError::InvalidQueryParam`] if a query parameter is missing,
/// [`AuthError::RequestExpired`] past the expiry, or the errors of
/// [`verify_authorization`] for key lookup and signature comparison.
pub fn verify_presigned(
    parts: &http::request::Parts,
    credential_provider: &dyn CredentialProvider,
    profile: &SigningProfile,
    now: u64,
) -> Result<String, AuthError> {
    let params: HashMap<String, String> =
        form_urlencoded::parse(parts.uri.query().unwrap_or("").as_bytes())
            .into_owned()
            .collect();

    let access_key_id = params
        .get("AccessKeyId")
        .cloned()
        .ok_or(AuthError::InvalidQueryParam("AccessKeyId"))?;
    let provided_signature = params
        .get("Signature")
        .cloned()
        .ok_or(AuthError::InvalidQueryParam("Signature"))?;
    let expires: u64 = params
        .get("Expires")
        .and_then(|v| v.parse().ok())
        .ok_or(AuthError::InvalidQueryParam("Expires"))?;

    if now > expires {
        debug!(expires, now, "Temporary URL expired");
        return Err(AuthError::RequestExpired);
    }

    let secret_key = credential_provider.get_secret_key(&access_key_id)?;

    let canonicalizer = Canonicalizer::new(profile.clone());
    let (resource, _) = canonicalizer.canonicalize(&parts.uri, &parts.headers);

    let expected_signature = Signer::new(secret_key).sign_temporary(
        parts.method.as_str(),
        "",
        "",
        expires,
        &CanonicalHeaders::default(),
        &resource,
    );

    compare(&access_key_id, &provided_signature, &expected_signature)?;
    Ok(access_key_id)
}

fn compare(access_key_id: &str, provided: &str, expected: &str) -> Result<(), AuthError> {
    if provided.as_bytes().ct_eq(expected.as_bytes()).into() {
        debug!(access_key_id = %access_key_id, "OBS verification succeeded");
        Ok(())
    } else {
        debug!(
            expected = %expected,
            provided = %provided,
            "OBS signature mismatch"
        );
        Err(AuthError::SignatureDoesNotMatch)
    }
}

fn header_value(parts: &http::request::Parts, name: &str) -> String {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_owned()
}
