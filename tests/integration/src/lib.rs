//! Integration tests for rustobs.
//!
//! Each test starts an in-process OBS mock on `127.0.0.1` that verifies the
//! `Authorization` header (or pre-signed query) and `Content-MD5` of every
//! request before handing it to a test-supplied responder. The client talks to
//! it over real HTTP through [`ReqwestTransport`](rustobs_http::ReqwestTransport)
//! with a path-style endpoint.
//!
//! The one live test needs real credentials and is `#[ignore]`d:
//! ```text
//! OBS_ACCESS_KEY=... OBS_SECRET_KEY=... OBS_REGION=... OBS_BUCKET=... \
//!     cargo test -p rustobs-integration -- --ignored
//! ```

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{Arc, Once};

use bytes::Bytes;
use chrono::Utc;
use http::header::{HeaderName, HeaderValue};
use http::{HeaderMap, Method, Request, Response, StatusCode, Uri};
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use parking_lot::Mutex;
use rustobs_auth::{AuthError, SigningProfile, StaticCredentialProvider, verify_authorization, verify_presigned};
use rustobs_core::{ObsConfig, SecretKey};
use rustobs_http::ObsClient;
use rustobs_http::transform::content_md5;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

static INIT: Once = Once::new();

/// Access key the mock accepts.
pub const ACCESS_KEY: &str = "AKIDINTEGRATION";
/// Secret key the mock accepts.
pub const SECRET_KEY: &str = "integration-secret";
/// Default bucket used by [`MockObs::client`].
pub const BUCKET: &str = "mybucket";

/// Initialize tracing (once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// A request as received and verified by the mock.
#[derive(Debug, Clone)]
pub struct Recorded {
    /// Request method.
    pub method: Method,
    /// Origin-form URI (path and query).
    pub uri: Uri,
    /// Request headers.
    pub headers: HeaderMap,
    /// Collected request body.
    pub body: Bytes,
    /// The access key the request was signed with.
    pub access_key: String,
}

type Responder = dyn Fn(&Recorded) -> Response<Full<Bytes>> + Send + Sync;

struct State {
    provider: StaticCredentialProvider,
    profile: SigningProfile,
    responder: Box<Responder>,
    seen: Mutex<Vec<Recorded>>,
}

/// An in-process OBS endpoint. The accept loop stops when this is dropped.
pub struct MockObs {
    addr: SocketAddr,
    state: Arc<State>,
    task: JoinHandle<()>,
}

impl std::fmt::Debug for MockObs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockObs").field("addr", &self.addr).finish_non_exhaustive()
    }
}

impl MockObs {
    /// Bind an ephemeral port and serve every verified request with `responder`.
    pub async fn start(
        responder: impl Fn(&Recorded) -> Response<Full<Bytes>> + Send + Sync + 'static,
    ) -> Self {
        init_tracing();

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock listener");
        let addr = listener.local_addr().expect("mock listener address");

        let state = Arc::new(State {
            provider: StaticCredentialProvider::new(vec![(
                ACCESS_KEY.to_owned(),
                SECRET_KEY.to_owned(),
            )]),
            profile: SigningProfile::obs(),
            responder: Box::new(responder),
            seen: Mutex::new(Vec::new()),
        });

        let task = tokio::spawn(serve(listener, state.clone()));
        debug!(addr = %addr, "started OBS mock");

        Self { addr, state, task }
    }

    /// `http://127.0.0.1:{port}`.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Configuration addressing this mock with the accepted credentials.
    #[must_use]
    pub fn config(&self) -> ObsConfig {
        ObsConfig::builder()
            .access_key(ACCESS_KEY.to_owned())
            .secret_key(SecretKey::new(SECRET_KEY))
            .region("cn-north-4".to_owned())
            .bucket(BUCKET.to_owned())
            .endpoint(self.endpoint())
            .timeout_secs(5)
            .build()
    }

    /// A client over the `reqwest` transport pointed at this mock.
    #[must_use]
    pub fn client(&self) -> ObsClient {
        ObsClient::new(self.config()).expect("client for mock")
    }

    /// Every request that passed verification, in arrival order.
    #[must_use]
    pub fn seen(&self) -> Vec<Recorded> {
        self.state.seen.lock().clone()
    }
}

impl Drop for MockObs {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Build a response with the given status, headers and body.
#[must_use]
pub fn respond(
    status: StatusCode,
    headers: &[(&'static str, &str)],
    body: impl Into<Bytes>,
) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(body.into()));
    *response.status_mut() = status;
    for (name, value) in headers {
        response.headers_mut().append(
            HeaderName::from_static(*name),
            HeaderValue::from_str(value).expect("valid header value"),
        );
    }
    response
}

/// An OBS XML error document.
#[must_use]
pub fn xml_error(code: &str, message: &str, request_id: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><Error><Code>{code}</Code><Message>{message}</Message><RequestId>{request_id}</RequestId></Error>"#
    )
}

async fn serve(listener: TcpListener, state: Arc<State>) {
    loop {
        let (stream, peer_addr) = match listener.accept().await {
            Ok(conn) => conn,
            Err(e) => {
                warn!(error = %e, "failed to accept connection");
                continue;
            }
        };

        let state = state.clone();
        tokio::spawn(async move {
            let svc = service_fn(move |req| handle(req, state.clone()));
            if let Err(e) = http1::Builder::new()
                .serve_connection(TokioIo::new(stream), svc)
                .await
            {
                warn!(peer_addr = %peer_addr, error = %e, "mock connection error");
            }
        });
    }
}

async fn handle(req: Request<Incoming>, state: Arc<State>) -> Result<Response<Full<Bytes>>, Infallible> {
    let (parts, body) = req.into_parts();
    let body = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            return Ok(reject(StatusCode::BAD_REQUEST, "IncompleteBody", &e.to_string()));
        }
    };

    let presigned = parts
        .uri
        .query()
        .is_some_and(|q| q.contains("Signature="));
    let verified = if presigned {
        let now = u64::try_from(Utc::now().timestamp()).unwrap_or_default();
        verify_presigned(&parts, &state.provider, &state.profile, now)
    } else {
        verify_authorization(&parts, &state.provider, &state.profile)
    };

    let access_key = match verified {
        Ok(access_key) => access_key,
        Err(e) => {
            debug!(error = %e, uri = %parts.uri, "mock rejected signature");
            return Ok(reject(StatusCode::FORBIDDEN, auth_code(&e), &e.to_string()));
        }
    };

    if let Some(digest) = parts.headers.get("content-md5") {
        if digest.as_bytes() != content_md5(&body).as_bytes() {
            return Ok(reject(StatusCode::BAD_REQUEST, "BadDigest", "Content-MD5 mismatch"));
        }
    }

    let recorded = Recorded {
        method: parts.method,
        uri: parts.uri,
        headers: parts.headers,
        body,
        access_key,
    };
    let response = (state.responder)(&recorded);
    state.seen.lock().push(recorded);
    Ok(response)
}

fn auth_code(err: &AuthError) -> &'static str {
    match err {
        AuthError::AccessKeyNotFound(_) => "InvalidAccessKeyId",
        AuthError::SignatureDoesNotMatch => "SignatureDoesNotMatch",
        AuthError::RequestExpired => "RequestExpired",
        _ => "AccessDenied",
    }
}

fn reject(status: StatusCode, code: &str, message: &str) -> Response<Full<Bytes>> {
    respond(
        status,
        &[
            ("content-type", "application/xml"),
            ("x-obs-request-id", "mock-reject"),
            ("x-obs-error-code", code),
        ],
        xml_error(code, message, "mock-reject"),
    )
}

mod test_errors;
mod test_live;
mod test_presigned;
mod test_signing;
