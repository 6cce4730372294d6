//! Outbound request types.
//!
//! An [`ObsRequest`] is the logical request as it moves through the pipeline:
//! transforms take it by value and hand back an updated copy, the transport
//! only borrows it.

use std::fmt;
use std::io::{self, Read, Seek, SeekFrom};
use std::sync::Arc;

use bytes::Bytes;
use http::header::{HeaderName, HeaderValue};
use http::{HeaderMap, Method, Uri};
use parking_lot::Mutex;
use rustobs_xml::XmlError;
use serde_json::Value;

/// A readable, seekable body source.
pub trait ReadSeek: Read + Seek + Send {}

impl<T: Read + Seek + Send> ReadSeek for T {}

/// Request payload.
///
/// Stream bodies are rewound to the start after every full read, so hashing
/// and dispatch both observe the whole payload.
#[derive(Clone, Default)]
pub enum RequestBody {
    /// No payload.
    #[default]
    Empty,
    /// A finite in-memory payload.
    Bytes(Bytes),
    /// A seekable source of unknown length.
    Stream(Arc<Mutex<Box<dyn ReadSeek>>>),
}

impl RequestBody {
    /// Wrap a seekable reader such as a `File` or `Cursor`.
    pub fn from_reader(reader: impl Read + Seek + Send + 'static) -> Self {
        Self::Stream(Arc::new(Mutex::new(Box::new(reader))))
    }

    /// Serialize `value` as an XML document under `root`.
    ///
    /// # Errors
    ///
    /// Returns [`XmlError`] if the value cannot be written as XML.
    ///
    /// # Examples
    ///
    /// ```
    /// use rustobs_http::RequestBody;
    /// use serde_json::json;
    ///
    /// let body = RequestBody::xml("Tagging", &json!({ "TagSet": { "Tag": { "Key": "a", "Value": "1" } } }))?;
    /// assert!(!body.is_empty());
    /// # Ok::<(), rustobs_xml::XmlError>(())
    /// ```
    pub fn xml(root: &str, value: &Value) -> Result<Self, XmlError> {
        Ok(Self::Bytes(Bytes::from(rustobs_xml::to_xml(root, value)?)))
    }

    /// Read the full payload, leaving a stream positioned at its start.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the stream cannot be sought or read.
    pub fn read_all(&self) -> io::Result<Bytes> {
        match self {
            Self::Empty => Ok(Bytes::new()),
            Self::Bytes(bytes) => Ok(bytes.clone()),
            Self::Stream(stream) => {
                let mut stream = stream.lock();
                stream.seek(SeekFrom::Start(0))?;
                let mut buf = Vec::new();
                stream.read_to_end(&mut buf)?;
                stream.seek(SeekFrom::Start(0))?;
                Ok(Bytes::from(buf))
            }
        }
    }

    /// Whether the body is known to be empty without reading it.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Bytes(bytes) => bytes.is_empty(),
            Self::Stream(_) => false,
        }
    }
}

impl fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Bytes(bytes) => f.debug_tuple("Bytes").field(&bytes.len()).finish(),
            Self::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

impl From<Bytes> for RequestBody {
    fn from(value: Bytes) -> Self {
        Self::Bytes(value)
    }
}

impl From<Vec<u8>> for RequestBody {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(Bytes::from(value))
    }
}

impl From<String> for RequestBody {
    fn from(value: String) -> Self {
        Self::Bytes(Bytes::from(value))
    }
}

impl From<&'static str> for RequestBody {
    fn from(value: &'static str) -> Self {
        Self::Bytes(Bytes::from_static(value.as_bytes()))
    }
}

/// A logical request: method, absolute URI, headers and body.
#[derive(Debug, Clone)]
pub struct ObsRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute request URI.
    pub uri: Uri,
    /// Request headers.
    pub headers: HeaderMap,
    /// Request payload.
    pub body: RequestBody,
}

impl ObsRequest {
    /// Create a request with no headers and an empty body.
    #[must_use]
    pub fn new(method: Method, uri: Uri) -> Self {
        Self {
            method,
            uri,
            headers: HeaderMap::new(),
            body: RequestBody::Empty,
        }
    }

    /// Append a header.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Replace the body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<RequestBody>) -> Self {
        self.body = body.into();
        self
    }

    /// A header joined across repeated values with `,`, or `""` when absent.
    #[must_use]
    pub fn header_line(&self, name: &str) -> String {
        header_line(&self.headers, name, ",")
    }
}

/// Join every value of `name` with `separator`; non-UTF-8 bytes are replaced.
pub(crate) fn header_line(headers: &HeaderMap, name: &str, separator: &str) -> String {
    headers
        .get_all(name)
        .iter()
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .collect::<Vec<_>>()
        .join(separator)
}
