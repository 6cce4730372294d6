//! The request pipeline.
//!
//! A [`Pipeline`] has two kinds of stages:
//!
//! - [`RequestTransform`]s rewrite the request before it is sent, in order.
//! - [`AroundLayer`]s wrap the transport call. Each layer receives the
//!   request and a [`Next`] handle that runs the remaining layers and finally
//!   the transport, so it can inspect or reject the [`Exchange`].
//!
//! ```text
//! ObsRequest
//!   -> transforms[0] -> ... -> transforms[n]
//!   -> layers[0] ( layers[1] ( ... ( transport ) ) )
//! <- Exchange { request, response }
//! ```
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use async_trait::async_trait;
//! use http::{HeaderMap, Method, StatusCode, Uri};
//! use rustobs_http::transform::{ContentMd5, RejectErrorStatus};
//! use rustobs_http::{ObsRequest, Pipeline, RawResponse, Transport, TransportError};
//!
//! struct Teapot;
//!
//! #[async_trait]
//! impl Transport for Teapot {
//!     async fn send(&self, _request: &ObsRequest) -> Result<RawResponse, TransportError> {
//!         Ok(RawResponse::new(StatusCode::IM_A_TEAPOT, HeaderMap::new(), ""))
//!     }
//! }
//!
//! let pipeline = Pipeline::new(Arc::new(Teapot))
//!     .with_transform(ContentMd5)
//!     .with_layer(RejectErrorStatus);
//! let request = ObsRequest::new(Method::GET, Uri::from_static("http://127.0.0.1/b/k"));
//!
//! # tokio_test::block_on(async {
//! let err = pipeline.execute(request).await.unwrap_err();
//! assert_eq!(err.as_api().map(|api| api.status), Some(StatusCode::IM_A_TEAPOT));
//! # });
//! ```

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{DispatchError, ObsError};
use crate::request::ObsRequest;
use crate::response::RawResponse;
use crate::transport::Transport;

/// A request as sent together with the response it produced.
#[derive(Debug, Clone)]
pub struct Exchange {
    /// The request after every transform.
    pub request: ObsRequest,
    /// The response from the transport.
    pub response: RawResponse,
}

/// Rewrites a request before dispatch.
pub trait RequestTransform: Send + Sync {
    /// Stage name for logs and `Debug` output.
    fn name(&self) -> &'static str;

    /// Produce the updated request.
    ///
    /// # Errors
    ///
    /// Returns [`ObsError`] if the stage cannot process the request.
    fn transform(&self, request: ObsRequest) -> Result<ObsRequest, ObsError>;
}

/// Wraps the transport call.
#[async_trait]
pub trait AroundLayer: Send + Sync {
    /// Stage name for logs and `Debug` output.
    fn name(&self) -> &'static str;

    /// Run the rest of the pipeline through `next`, then inspect the result.
    async fn around(&self, request: ObsRequest, next: Next<'_>) -> Result<Exchange, DispatchError>;
}

/// The remaining around-layers and the transport.
pub struct Next<'a> {
    layers: &'a [Box<dyn AroundLayer>],
    transport: &'a dyn Transport,
}

impl<'a> Next<'a> {
    /// Start a chain over `layers` ending in `transport`.
    #[must_use]
    pub fn new(layers: &'a [Box<dyn AroundLayer>], transport: &'a dyn Transport) -> Self {
        Self { layers, transport }
    }

    /// Run the next layer, or the transport when no layer is left.
    ///
    /// # Errors
    ///
    /// Returns whatever the remaining layers or the transport report.
    pub async fn run(self, request: ObsRequest) -> Result<Exchange, DispatchError> {
        match self.layers.split_first() {
            Some((layer, rest)) => {
                layer
                    .around(request, Next::new(rest, self.transport))
                    .await
            }
            None => {
                let response = self.transport.send(&request).await?;
                Ok(Exchange { request, response })
            }
        }
    }
}

impl fmt::Debug for Next<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Next")
            .field("layers", &self.layers.iter().map(|l| l.name()).collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

/// An ordered set of transforms and around-layers over one transport.
pub struct Pipeline {
    transforms: Vec<Box<dyn RequestTransform>>,
    layers: Vec<Box<dyn AroundLayer>>,
    transport: Arc<dyn Transport>,
}

impl Pipeline {
    /// An empty pipeline: requests go to the transport unchanged.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transforms: Vec::new(),
            layers: Vec::new(),
            transport,
        }
    }

    /// Append a transform; transforms run in the order they are added.
    #[must_use]
    pub fn with_transform(mut self, transform: impl RequestTransform + 'static) -> Self {
        self.transforms.push(Box::new(transform));
        self
    }

    /// Append an around-layer; the first added is the outermost.
    #[must_use]
    pub fn with_layer(mut self, layer: impl AroundLayer + 'static) -> Self {
        self.layers.push(Box::new(layer));
        self
    }

    /// Apply every transform in order.
    ///
    /// # Errors
    ///
    /// Returns the first transform failure.
    pub fn prepare(&self, request: ObsRequest) -> Result<ObsRequest, ObsError> {
        self.transforms.iter().try_fold(request, |request, stage| {
            debug!(stage = stage.name(), "Applying request transform");
            stage.transform(request)
        })
    }

    /// Send an already prepared request through the around-layers.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError`] from any layer or the transport.
    pub async fn dispatch(&self, request: ObsRequest) -> Result<Exchange, DispatchError> {
        Next::new(&self.layers, self.transport.as_ref())
            .run(request)
            .await
    }

    /// Prepare and dispatch, translating a failed status into [`ObsError::Api`].
    ///
    /// # Errors
    ///
    /// Returns [`ObsError`] from any stage or the translated status failure.
    pub async fn execute(&self, request: ObsRequest) -> Result<Exchange, ObsError> {
        let request = self.prepare(request)?;
        Ok(self.dispatch(request).await?)
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field(
                "transforms",
                &self.transforms.iter().map(|t| t.name()).collect::<Vec<_>>(),
            )
            .field("layers", &self.layers.iter().map(|l| l.name()).collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
