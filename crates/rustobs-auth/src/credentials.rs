//! Credential provider trait and implementations.
//!
//! Verification needs to resolve a secret key from the access key named in the
//! `Authorization` header. [`CredentialProvider`] abstracts that lookup and
//! [`StaticCredentialProvider`] backs it with an in-memory map.

use std::collections::HashMap;

use rustobs_core::SecretKey;

use crate::error::AuthError;

/// Trait for looking up secret keys by access key ID.
pub trait CredentialProvider: Send + Sync {
    /// Retrieve the secret key for the given access key ID.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::AccessKeyNotFound`] if the access key ID is not recognized.
    fn get_secret_key(&self, access_key_id: &str) -> Result<SecretKey, AuthError>;
}

/// A simple in-memory credential provider backed by a `HashMap`.
///
/// # Examples
///
/// ```
/// use rustobs_auth::credentials::{CredentialProvider, StaticCredentialProvider};
///
/// let provider = StaticCredentialProvider::new(vec![
///     ("AK".to_owned(), "SK".to_owned()),
/// ]);
///
/// let secret = provider.get_secret_key("AK").unwrap();
/// assert_eq!(secret.as_bytes(), b"SK");
/// ```
#[derive(Debug, Clone)]
pub struct StaticCredentialProvider {
    credentials: HashMap<String, SecretKey>,
}

impl StaticCredentialProvider {
    /// Create a new provider from (access_key_id, secret_key) pairs.
    pub fn new(credentials: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            credentials: credentials
                .into_iter()
                .map(|(ak, sk)| (ak, SecretKey::new(sk)))
                .collect(),
        }
    }
}

impl CredentialProvider for StaticCredentialProvider {
    fn get_secret_key(&self, access_key_id: &str) -> Result<SecretKey, AuthError> {
        self.credentials
            .get(access_key_id)
            .cloned()
            .ok_or_else(|| AuthError::AccessKeyNotFound(access_key_id.to_owned()))
    }
}
