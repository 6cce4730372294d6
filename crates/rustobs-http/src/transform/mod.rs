//! Built-in pipeline stages.
//!
//! The default client pipeline runs them in this order:
//!
//! 1. [`ContentMd5`] hashes the body into `Content-MD5`.
//! 2. [`Authorization`] sets `Date` and signs the request as it now stands.
//! 3. [`RejectRedirects`] turns a 3xx response into a failure.
//! 4. [`RejectErrorStatus`] turns a 4xx or 5xx response into a failure.

mod authorization;
mod content_md5;
mod status;

pub use authorization::{Authorization, format_date};
pub use content_md5::{CONTENT_MD5, ContentMd5, content_md5};
pub use status::{RejectErrorStatus, RejectRedirects};
