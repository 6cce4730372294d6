//! Error types for the rustobs core.

/// Configuration error raised before any network activity takes place.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The region does not match the `letters-letters-digits` pattern.
    #[error("invalid OBS region: {0}")]
    InvalidRegion(String),

    /// A required configuration value is absent.
    #[error("missing configuration value: {0}")]
    Missing(&'static str),

    /// The endpoint override is not an absolute `http(s)://` URL.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Convenience result type for configuration handling.
pub type ConfigResult<T> = Result<T, ConfigError>;
