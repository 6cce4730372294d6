//! OBS request canonicalization and signing for rustobs.
//!
//! This crate implements the signing side of the OBS authorization scheme, a
//! close relative of S3 SigV2. The `Authorization` header has the format:
//!
//! ```text
//! OBS <AccessKeyId>:<Signature>
//! ```
//!
//! Where `Signature = Base64(HMAC-SHA1(SecretKey, StringToSign))` and:
//!
//! ```text
//! StringToSign = HTTP-Verb + "\n" +
//!                Content-MD5 + "\n" +
//!                Content-Type + "\n" +
//!                Date + "\n" +
//!                CanonicalizedHeaders +
//!                CanonicalizedResource
//! ```
//!
//! # Usage
//!
//! ```rust
//! use rustobs_auth::{CanonicalHeaders, Signer};
//!
//! let signer = Signer::new("secret");
//! let signature = signer.sign(
//!     "GET",
//!     "",
//!     "",
//!     "Tue, 15 Oct 2024 12:00:00 GMT",
//!     &CanonicalHeaders::default(),
//!     "/mybucket/key",
//! );
//! assert_eq!(signature.len(), 28);
//! ```
//!
//! # Modules
//!
//! - [`canonical`] - Canonical resource and canonical header construction
//! - [`credentials`] - Credential provider trait and in-memory implementation
//! - [`error`] - Authentication error types
//! - [`presigned`] - Pre-signed (temporary) URL query construction
//! - [`profile`] - Declarative signing tables: vendor prefix, scheme, allow-list
//! - [`signer`] - String-to-sign layout and HMAC-SHA1 computation
//! - [`verify`] - Verification of an incoming `Authorization` header

pub mod canonical;
pub mod credentials;
pub mod error;
pub mod presigned;
pub mod profile;
pub mod signer;
pub mod verify;

pub use canonical::{CanonicalHeaders, Canonicalizer};
pub use credentials::{CredentialProvider, StaticCredentialProvider};
pub use error::AuthError;
pub use presigned::{PresignedQuery, presign, presigned_resource};
pub use profile::SigningProfile;
pub use signer::{Signer, string_to_sign};
pub use verify::{is_obs_authorization, verify_authorization, verify_presigned};
