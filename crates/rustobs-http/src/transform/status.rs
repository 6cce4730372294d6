//! Around-layers that turn 3xx, 4xx and 5xx responses into failures.

use async_trait::async_trait;
use http::StatusCode;
use tracing::debug;

use crate::error::DispatchError;
use crate::pipeline::{AroundLayer, Exchange, Next};
use crate::request::ObsRequest;

fn reject(exchange: Exchange, layer: &'static str) -> DispatchError {
    debug!(
        layer,
        status = exchange.response.status.as_u16(),
        uri = %exchange.request.uri,
        "Rejecting response status"
    );
    DispatchError::Status {
        request: Box::new(exchange.request),
        response: exchange.response,
    }
}

async fn guard(
    request: ObsRequest,
    next: Next<'_>,
    layer: &'static str,
    rejects: fn(StatusCode) -> bool,
) -> Result<Exchange, DispatchError> {
    let exchange = next.run(request).await?;
    if rejects(exchange.response.status) {
        Err(reject(exchange, layer))
    } else {
        Ok(exchange)
    }
}

/// Fails any 3xx response with the same error shape as a 4xx or 5xx.
#[derive(Debug, Clone, Copy, Default)]
pub struct RejectRedirects;

#[async_trait]
impl AroundLayer for RejectRedirects {
    fn name(&self) -> &'static str {
        "reject-redirects"
    }

    async fn around(&self, request: ObsRequest, next: Next<'_>) -> Result<Exchange, DispatchError> {
        guard(request, next, self.name(), |s| s.is_redirection()).await
    }
}

/// Fails any 4xx or 5xx response.
#[derive(Debug, Clone, Copy, Default)]
pub struct RejectErrorStatus;

#[async_trait]
impl AroundLayer for RejectErrorStatus {
    fn name(&self) -> &'static str {
        "reject-error-status"
    }

    async fn around(&self, request: ObsRequest, next: Next<'_>) -> Result<Exchange, DispatchError> {
        guard(request, next, self.name(), |s| {
            s.is_client_error() || s.is_server_error()
        })
        .await
    }
}
