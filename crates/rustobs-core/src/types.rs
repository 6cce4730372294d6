//! Credential and region types shared across crates.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::ConfigError;

/// Pattern a region identifier must contain, e.g. `eu-west-1` or `cn-north-4`.
static REGION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[a-z]+-[a-z]+-\d+").expect("static regex is valid"));

/// OBS region identifier.
///
/// Construction validates the identifier, so a `Region` in hand is always
/// usable for building endpoint host names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Region(String);

impl Region {
    /// Create a region, validating it against the `letters-letters-digits` pattern.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidRegion`] if the pattern does not match.
    ///
    /// # Examples
    ///
    /// ```
    /// use rustobs_core::Region;
    ///
    /// assert!(Region::new("eu-west-1").is_ok());
    /// assert!(Region::new("nowhere").is_err());
    /// ```
    pub fn new(region: impl Into<String>) -> Result<Self, ConfigError> {
        let region = region.into();
        if !REGION_PATTERN.is_match(&region) {
            return Err(ConfigError::InvalidRegion(region));
        }
        Ok(Self(region))
    }

    /// Get the region as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Region {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Region> for String {
    fn from(region: Region) -> Self {
        region.0
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The HMAC key half of a credential pair. Never printed or serialized.
#[derive(Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(transparent)]
pub struct SecretKey(String);

impl SecretKey {
    /// Wrap a secret key string.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// The key as a string slice. Callers must not log the result.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Raw key bytes for HMAC computation.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Whether the secret is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for SecretKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SecretKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(****)")
    }
}

/// An immutable access key / secret key pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    access_key: String,
    secret_key: SecretKey,
}

impl Credentials {
    /// Create a credential pair.
    #[must_use]
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: SecretKey::new(secret_key),
        }
    }

    /// The public access key identifier.
    #[must_use]
    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    /// The secret HMAC key.
    #[must_use]
    pub fn secret_key(&self) -> &SecretKey {
        &self.secret_key
    }
}
