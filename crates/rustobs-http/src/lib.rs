//! OBS request pipeline, transport, response decoding, and client.
//!
//! This crate is the client side of rustobs. It handles:
//!
//! - **Requests** ([`request`]): The [`ObsRequest`] moved through the pipeline
//!   and its [`RequestBody`], which may be a rewindable stream.
//!
//! - **Pipeline** ([`pipeline`]): Ordered [`RequestTransform`]s followed by
//!   [`AroundLayer`]s wrapping a single [`Transport`] call.
//!
//! - **Transforms** ([`transform`]): Content-MD5, Authorization, and the
//!   status guards that turn 3xx, 4xx and 5xx responses into failures.
//!
//! - **Decoding** ([`decode`]): [`DecodeStrategy`] turns a successful response
//!   into a [`ParsedResult`]; [`decode_error`] does the same for failures.
//!
//! - **Errors** ([`error`]): [`ObsError`] and the [`ApiError`] carrying the
//!   request, response and decoded error fields.
//!
//! - **Client** ([`client`]): [`ObsClient`] ties configuration, the default
//!   pipeline and decoding together.
//!
//! # Architecture
//!
//! ```text
//! ObsClient::request
//!   -> create_uri (virtual-hosted or path style)
//!   -> ContentMd5 -> Authorization
//!   -> RejectRedirects ( RejectErrorStatus ( Transport ) )
//!   -> DecodeStrategy / ApiError::from_exchange
//!   <- ObsResponse | ObsError
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use http::{HeaderMap, Method};
//! use rustobs_core::ObsConfig;
//! use rustobs_http::{DecodeStrategy, ObsClient, RequestBody, tables};
//!
//! # async fn run() -> Result<(), rustobs_http::ObsError> {
//! let config = ObsConfig::from_env()?;
//! let client = ObsClient::new(config)?;
//! let response = client
//!     .request(
//!         Method::HEAD,
//!         "photos/cat.png",
//!         "",
//!         HeaderMap::new(),
//!         RequestBody::Empty,
//!         Some(DecodeStrategy::header_only(tables::HEAD_OBJECT)),
//!     )
//!     .await?;
//! println!("{:?}", response.request_id());
//! # Ok(())
//! # }
//! ```

// `ObsError::Api` is boxed; `DispatchError::Status` still carries a full
// request and response by value.
#![allow(clippy::result_large_err)]

pub mod client;
pub mod decode;
pub mod error;
pub mod pipeline;
pub mod request;
pub mod response;
pub mod tables;
pub mod transform;
pub mod transport;

pub use client::{ObsClient, default_pipeline, encode_object_key};
pub use decode::{
    DecodeStrategy, ElementExtractor, HeaderTable, ParsedResult, ResponseDecoder, decode_error,
};
pub use error::{ApiError, DecodeError, DispatchError, ObsError, TransportError};
pub use pipeline::{AroundLayer, Exchange, Next, Pipeline, RequestTransform};
pub use request::{ObsRequest, RequestBody};
pub use response::{ObsResponse, RawResponse};
pub use transport::{ReqwestTransport, Transport};
