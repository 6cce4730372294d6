//! Client configuration.
//!
//! Provides [`ObsConfig`] for configuring a rustobs client. Values can be set
//! with the builder or loaded from environment variables.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::uri::DEFAULT_PROVIDER_DOMAIN;
use crate::{ConfigError, Credentials, Region, SecretKey};

/// Configuration for a single bucket-scoped client.
///
/// # Examples
///
/// ```
/// use rustobs_core::ObsConfig;
///
/// let config = ObsConfig::builder()
///     .access_key("AK".to_owned())
///     .secret_key("SK".into())
///     .region("eu-west-1".to_owned())
///     .bucket("photos".to_owned())
///     .build();
/// assert!(config.validate().is_ok());
/// assert_eq!(config.provider_domain, "myhuaweicloud.com");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct ObsConfig {
    /// Public access key identifier.
    pub access_key: String,

    /// Secret key used as the HMAC key. Read on deserialize, never written.
    #[serde(skip_serializing)]
    pub secret_key: SecretKey,

    /// Region identifier, e.g. `eu-west-1`.
    pub region: String,

    /// Default bucket for object operations. Empty for service-level calls.
    #[builder(default)]
    pub bucket: String,

    /// Provider domain used in virtual-hosted host names.
    #[builder(default = String::from(DEFAULT_PROVIDER_DOMAIN))]
    pub provider_domain: String,

    /// Optional endpoint override (`http(s)://host[:port]`), switching to path-style URIs.
    #[builder(default, setter(strip_option))]
    pub endpoint: Option<String>,

    /// Transport timeout in seconds. `None` leaves the transport default in place.
    #[builder(default, setter(strip_option))]
    pub timeout_secs: Option<u64>,

    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    pub log_level: String,
}

impl ObsConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Required |
    /// |----------|----------|
    /// | `OBS_ACCESS_KEY` | yes |
    /// | `OBS_SECRET_KEY` | yes |
    /// | `OBS_REGION` | yes |
    /// | `OBS_BUCKET` | no |
    /// | `OBS_PROVIDER_DOMAIN` | no (`myhuaweicloud.com`) |
    /// | `OBS_ENDPOINT` | no |
    /// | `OBS_TIMEOUT_SECS` | no |
    /// | `LOG_LEVEL` | no (`info`) |
    ///
    /// # Errors
    /// Returns [`ConfigError::Missing`] when a required variable is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let required = |name: &'static str| std::env::var(name).map_err(|_| ConfigError::Missing(name));

        let mut config = Self::builder()
            .access_key(required("OBS_ACCESS_KEY")?)
            .secret_key(SecretKey::new(required("OBS_SECRET_KEY")?))
            .region(required("OBS_REGION")?)
            .build();

        if let Ok(v) = std::env::var("OBS_BUCKET") {
            config.bucket = v;
        }
        if let Ok(v) = std::env::var("OBS_PROVIDER_DOMAIN") {
            config.provider_domain = v;
        }
        if let Ok(v) = std::env::var("OBS_ENDPOINT") {
            config.endpoint = Some(v);
        }
        if let Ok(v) = std::env::var("OBS_TIMEOUT_SECS") {
            match v.parse::<u64>() {
                Ok(n) => config.timeout_secs = Some(n),
                Err(_) => tracing::warn!(value = %v, "ignoring unparsable OBS_TIMEOUT_SECS"),
            }
        }
        if let Ok(v) = std::env::var("LOG_LEVEL") {
            config.log_level = v;
        }

        Ok(config)
    }

    /// Validate the configuration, returning the parsed region.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidRegion`] for a malformed region,
    /// [`ConfigError::Missing`] for an empty access key, or
    /// [`ConfigError::InvalidEndpoint`] for an endpoint without an `http(s)` scheme.
    pub fn validate(&self) -> Result<Region, ConfigError> {
        let region = Region::new(self.region.clone())?;
        if self.access_key.is_empty() {
            return Err(ConfigError::Missing("access_key"));
        }
        if let Some(endpoint) = &self.endpoint {
            if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                return Err(ConfigError::InvalidEndpoint(endpoint.clone()));
            }
        }
        Ok(region)
    }

    /// The credential pair held by the signer.
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.access_key.clone(), self.secret_key.expose())
    }
}
