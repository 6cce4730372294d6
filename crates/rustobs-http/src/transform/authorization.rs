//! The `Authorization` stage: `Date` plus the OBS signature header.

use chrono::{DateTime, Utc};
use http::header::{AUTHORIZATION, DATE, HeaderValue};
use rustobs_auth::{Canonicalizer, Signer, SigningProfile};
use rustobs_core::Credentials;
use tracing::debug;

use crate::error::ObsError;
use crate::pipeline::RequestTransform;
use crate::request::ObsRequest;

/// RFC 1123 date as used in the `Date` header, always in GMT.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
///
/// let now = Utc.with_ymd_and_hms(2024, 10, 15, 12, 0, 0).unwrap();
/// assert_eq!(rustobs_http::transform::format_date(now), "Tue, 15 Oct 2024 12:00:00 GMT");
/// ```
#[must_use]
pub fn format_date(now: DateTime<Utc>) -> String {
    now.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Sets `Date` and `Authorization: OBS {ak}:{signature}`.
///
/// Signs whatever `Content-MD5`, `Content-Type` and vendor headers the request
/// carries when this stage runs.
#[derive(Debug, Clone)]
pub struct Authorization {
    access_key: String,
    scheme: String,
    signer: Signer,
    canonicalizer: Canonicalizer,
}

impl Authorization {
    /// Create the stage for one credential pair and signing profile.
    #[must_use]
    pub fn new(credentials: &Credentials, profile: SigningProfile) -> Self {
        Self {
            access_key: credentials.access_key().to_owned(),
            scheme: profile.scheme.clone(),
            signer: Signer::new(credentials.secret_key().clone()),
            canonicalizer: Canonicalizer::new(profile),
        }
    }

    /// Sign `request` as of `now`.
    ///
    /// # Errors
    ///
    /// Returns [`ObsError::InvalidRequest`] if the access key cannot be carried in a header.
    pub fn sign_at(&self, mut request: ObsRequest, now: DateTime<Utc>) -> Result<ObsRequest, ObsError> {
        let date = format_date(now);
        let (resource, headers) = self
            .canonicalizer
            .canonicalize(&request.uri, &request.headers);

        let signature = self.signer.sign(
            request.method.as_str(),
            &request.header_line("content-md5"),
            &request.header_line("content-type"),
            &date,
            &headers,
            &resource,
        );

        debug!(
            method = %request.method,
            resource = %resource,
            canonical_headers = headers.len(),
            "Signed OBS request"
        );

        let authorization = format!("{} {}:{signature}", self.scheme, self.access_key);
        let invalid = |e: http::header::InvalidHeaderValue| ObsError::InvalidRequest(e.to_string());
        request
            .headers
            .insert(DATE, HeaderValue::from_str(&date).map_err(invalid)?);
        request
            .headers
            .insert(AUTHORIZATION, HeaderValue::from_str(&authorization).map_err(invalid)?);
        Ok(request)
    }
}

impl RequestTransform for Authorization {
    fn name(&self) -> &'static str {
        "authorization"
    }

    fn transform(&self, request: ObsRequest) -> Result<ObsRequest, ObsError> {
        self.sign_at(request, Utc::now())
    }
}
