//! The OBS client: configuration, the default pipeline and response decoding.
//!
//! [`ObsClient`] issues exactly one exchange per call: no retries, no
//! redirect following. Object keys are percent-encoded (keeping `/`) before
//! they are placed in a URI, and signing always sees that encoded path.

use std::sync::Arc;
use std::time::Duration;

use http::{HeaderMap, Method, Uri};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use rustobs_auth::{SigningProfile, presign};
use rustobs_core::uri::create_path_style_uri;
use rustobs_core::{Credentials, ObsConfig, Region, create_uri};
use tracing::{debug, info};

use crate::decode::DecodeStrategy;
use crate::error::ObsError;
use crate::pipeline::Pipeline;
use crate::request::{ObsRequest, RequestBody};
use crate::response::ObsResponse;
use crate::transform::{Authorization, ContentMd5, RejectErrorStatus, RejectRedirects};
use crate::transport::{ReqwestTransport, Transport};

/// Characters left as-is in object keys: unreserved characters and `/`.
const OBJECT_KEY: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

/// Percent-encode an object key for use as a URI path.
///
/// # Examples
///
/// ```
/// assert_eq!(rustobs_http::encode_object_key("dir/a b+c.txt"), "dir/a%20b%2Bc.txt");
/// ```
#[must_use]
pub fn encode_object_key(key: &str) -> String {
    utf8_percent_encode(key, OBJECT_KEY).to_string()
}

/// The standard pipeline: Content-MD5, Authorization, then status rejection.
#[must_use]
pub fn default_pipeline(
    credentials: &Credentials,
    profile: SigningProfile,
    transport: Arc<dyn Transport>,
) -> Pipeline {
    Pipeline::new(transport)
        .with_transform(ContentMd5)
        .with_transform(Authorization::new(credentials, profile))
        .with_layer(RejectRedirects)
        .with_layer(RejectErrorStatus)
}

/// A signing client bound to one credential pair, region and default bucket.
#[derive(Debug)]
pub struct ObsClient {
    config: ObsConfig,
    region: Region,
    credentials: Credentials,
    pipeline: Pipeline,
}

impl ObsClient {
    /// Create a client over a `reqwest` transport with redirects disabled.
    ///
    /// # Errors
    ///
    /// Returns [`ObsError::Config`] for an invalid region, access key or endpoint,
    /// or [`ObsError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: ObsConfig) -> Result<Self, ObsError> {
        config.validate()?;
        let transport = ReqwestTransport::new(config.timeout_secs.map(Duration::from_secs))?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client over any transport.
    ///
    /// # Errors
    ///
    /// Returns [`ObsError::Config`] for an invalid region, access key or endpoint.
    pub fn with_transport(config: ObsConfig, transport: Arc<dyn Transport>) -> Result<Self, ObsError> {
        let region = config.validate()?;
        let credentials = config.credentials();
        let profile = SigningProfile::obs().with_provider_domain(config.provider_domain.clone());
        let pipeline = default_pipeline(&credentials, profile, transport);

        info!(
            region = %region,
            bucket = %config.bucket,
            endpoint = ?config.endpoint,
            "Created OBS client"
        );

        Ok(Self {
            config,
            region,
            credentials,
            pipeline,
        })
    }

    /// The validated region.
    #[must_use]
    pub fn region(&self) -> &Region {
        &self.region
    }

    /// The configuration the client was built from.
    #[must_use]
    pub fn config(&self) -> &ObsConfig {
        &self.config
    }

    /// The request pipeline.
    #[must_use]
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Address `object` in `bucket` (the default bucket when `None`).
    ///
    /// Virtual-hosted style, or path style against the configured endpoint.
    /// `object` is used verbatim; see [`encode_object_key`].
    #[must_use]
    pub fn create_uri(&self, bucket: Option<&str>, object: &str, query: &str) -> String {
        let bucket = bucket.unwrap_or(&self.config.bucket);
        match &self.config.endpoint {
            Some(endpoint) => create_path_style_uri(endpoint, bucket, object, query),
            None => create_uri(
                bucket,
                self.region.as_str(),
                object,
                query,
                &self.config.provider_domain,
            ),
        }
    }

    /// Issue one request for `object` in the default bucket.
    ///
    /// Without a `decoder`, a 200 response decodes as
    /// [`DecodeStrategy::General`] and any other success as
    /// [`DecodeStrategy::Error`].
    ///
    /// # Errors
    ///
    /// Returns [`ObsError::Api`] for any 3xx, 4xx or 5xx response, or the
    /// transport, body or decoding failure.
    pub async fn request(
        &self,
        method: Method,
        object: &str,
        query: &str,
        headers: HeaderMap,
        body: impl Into<RequestBody>,
        decoder: Option<DecodeStrategy>,
    ) -> Result<ObsResponse, ObsError> {
        let uri = self.create_uri(None, &encode_object_key(object), query);
        let uri: Uri = uri
            .parse()
            .map_err(|e: http::uri::InvalidUri| ObsError::InvalidRequest(format!("{uri}: {e}")))?;

        let mut request = ObsRequest::new(method, uri);
        request.headers = headers;
        request.body = body.into();

        self.send(request, decoder).await
    }

    /// Issue a fully built request.
    ///
    /// # Errors
    ///
    /// See [`ObsClient::request`].
    pub async fn send(
        &self,
        request: ObsRequest,
        decoder: Option<DecodeStrategy>,
    ) -> Result<ObsResponse, ObsError> {
        debug!(method = %request.method, uri = %request.uri, "Dispatching OBS request");

        let exchange = self.pipeline.execute(request).await?;
        let strategy =
            decoder.unwrap_or_else(|| DecodeStrategy::for_status(exchange.response.status));
        let result = strategy.decode(&exchange.response)?;

        Ok(ObsResponse::new(exchange.response, result))
    }

    /// A pre-signed `GET` URL for `object` in the default bucket, valid until
    /// `expires` (epoch seconds).
    ///
    /// With a `domain`, the URL is `https://{domain}/{object}?...` instead of
    /// the bucket address.
    #[must_use]
    pub fn create_temporary_url(&self, object: &str, expires: u64, domain: Option<&str>) -> String {
        let object = encode_object_key(object.trim_matches('/'));
        let query = presign(&self.credentials, &self.config.bucket, &object, expires).to_query_string();

        match domain.filter(|d| !d.is_empty()) {
            Some(domain) => format!("https://{domain}/{object}?{query}"),
            None => self.create_uri(None, &object, &query),
        }
    }
}
