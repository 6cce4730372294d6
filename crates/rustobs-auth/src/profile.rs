//! Declarative signing tables.
//!
//! Every constant the canonicalizer depends on lives in a [`SigningProfile`]:
//! the authorization scheme, the vendor header prefix, the host name labels
//! used to recover the bucket, and the allow-list of sub-resource query
//! parameters that participate in the signed resource.

use std::collections::BTreeSet;

use rustobs_core::{DEFAULT_PROVIDER_DOMAIN, DEFAULT_SERVICE};

/// Query parameters that take part in the canonical resource.
///
/// Everything else is still sent on the wire but excluded from the signature.
pub const OBS_ALLOWED_PARAMETERS: &[&str] = &[
    "CDNNotifyConfiguration",
    "acl",
    "append",
    "attname",
    "backtosource",
    "cors",
    "customdomain",
    "delete",
    "deletebucket",
    "directcoldaccess",
    "encryption",
    "inventory",
    "length",
    "lifecycle",
    "location",
    "logging",
    "metadata",
    "modify",
    "name",
    "notification",
    "partNumber",
    "policy",
    "position",
    "quota",
    "rename",
    "replication",
    "restore",
    "storageClass",
    "storagePolicy",
    "storageinfo",
    "tagging",
    "torrent",
    "truncate",
    "uploadId",
    "uploads",
    "versionId",
    "versioning",
    "versions",
    "website",
    "x-obs-security-token",
    "object-lock",
    "retention",
    "mirrorBackToSource",
    "disPolicy",
    "obscompresspolicy",
    "response-cache-control",
    "response-content-disposition",
    "response-content-encoding",
    "response-content-language",
    "response-content-type",
    "response-expires",
    "x-image-process",
    "x-image-save-bucket",
    "x-image-save-object",
];

/// Authorization scheme written before `AK:signature`.
pub const OBS_SCHEME: &str = "OBS";

/// Prefix of provider-specific headers.
pub const OBS_VENDOR_PREFIX: &str = "x-obs-";

/// Signing constants for one provider dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningProfile {
    /// Authorization scheme, e.g. `OBS`.
    pub scheme: String,
    /// Lower-case vendor header prefix, e.g. `x-obs-`.
    pub vendor_prefix: String,
    /// Service label in host names, e.g. `obs`.
    pub service: String,
    /// Provider domain in host names, e.g. `myhuaweicloud.com`.
    pub provider_domain: String,
    /// Sub-resource parameter names included in the canonical resource.
    pub allowed_parameters: BTreeSet<String>,
}

impl SigningProfile {
    /// The OBS dialect with the default provider domain.
    #[must_use]
    pub fn obs() -> Self {
        Self {
            scheme: OBS_SCHEME.to_owned(),
            vendor_prefix: OBS_VENDOR_PREFIX.to_owned(),
            service: DEFAULT_SERVICE.to_owned(),
            provider_domain: DEFAULT_PROVIDER_DOMAIN.to_owned(),
            allowed_parameters: OBS_ALLOWED_PARAMETERS
                .iter()
                .map(|name| (*name).to_owned())
                .collect(),
        }
    }

    /// Replace the provider domain, keeping every other table.
    #[must_use]
    pub fn with_provider_domain(mut self, domain: impl Into<String>) -> Self {
        self.provider_domain = domain.into();
        self
    }

    /// Whether a raw query parameter name is part of the signed resource.
    #[must_use]
    pub fn is_allowed_parameter(&self, name: &str) -> bool {
        self.allowed_parameters.contains(name)
    }
}

impl Default for SigningProfile {
    fn default() -> Self {
        Self::obs()
    }
}
