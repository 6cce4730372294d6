//! Core types, configuration, and URI construction for rustobs.
//!
//! This crate provides the foundational building blocks shared by the signing,
//! XML, and HTTP crates: the validated [`Region`], the [`Credentials`] pair,
//! the [`ObsConfig`] configuration, and the mechanical URI template used to
//! address buckets and objects.

mod config;
mod error;
mod types;
pub mod uri;

pub use config::ObsConfig;
pub use error::{ConfigError, ConfigResult};
pub use types::{Credentials, Region, SecretKey};
pub use uri::{DEFAULT_PROVIDER_DOMAIN, DEFAULT_SERVICE, create_uri};
