//! Response decoding strategies.
//!
//! Every response is normalized into a [`ParsedResult`], a map from field
//! name to string, nested map or list. The strategy is chosen per call:
//!
//! | Strategy | Body | Headers |
//! |----------|------|---------|
//! | `General` | XML tree or JSON object | header table + request ID |
//! | `Error` | XML tree or JSON with folded keys | diagnostic headers when the body is empty |
//! | `Element` | one element captured by pattern | none |
//! | `HeaderOnly` | ignored | header table + request ID |
//! | `Custom` | caller-defined | caller-defined |
//!
//! Without an explicit strategy, status 200 decodes as `General` and any
//! other status as `Error`.

use std::fmt;
use std::sync::{Arc, LazyLock};

use http::{HeaderMap, StatusCode};
use regex::Regex;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::DecodeError;
use crate::request::header_line;
use crate::response::RawResponse;

static LOCATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)>([a-z0-9-]+?)</Location>").expect("static location pattern is valid")
});

static STORAGE_CLASS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)>(\w+?)</StorageClass>").expect("static storage class pattern is valid")
});

/// Decoded response fields.
pub type ParsedResult = Map<String, Value>;

/// Header carrying the service-assigned request ID.
pub const REQUEST_ID_HEADER: &str = "x-obs-request-id";

/// Result key the request ID is recorded under.
pub const REQUEST_ID_KEY: &str = "RequestId";

const ERROR_HEADERS: [&str; 3] = [
    REQUEST_ID_HEADER,
    "x-obs-error-code",
    "x-obs-error-message",
];

/// Declarative mapping from response header name to result key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderTable {
    entries: Vec<(String, String)>,
}

impl HeaderTable {
    /// An empty table. The request ID is still recorded when applied.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one `header → key` entry.
    #[must_use]
    pub fn with(mut self, header: &str, key: impl Into<String>) -> Self {
        self.entries.push((header.to_ascii_lowercase(), key.into()));
        self
    }

    /// Iterate over `(header, key)` entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(h, k)| (h.as_str(), k.as_str()))
    }

    /// Copy every present header into `result`, then the request ID.
    ///
    /// Header values overwrite body fields of the same key.
    pub fn apply(&self, headers: &HeaderMap, result: &mut ParsedResult) {
        let implicit = std::iter::once((REQUEST_ID_HEADER, REQUEST_ID_KEY));
        for (header, key) in self.iter().chain(implicit) {
            if headers.contains_key(header) {
                result.insert(key.to_owned(), Value::String(header_line(headers, header, ", ")));
            }
        }
    }
}

impl From<&[(&str, &str)]> for HeaderTable {
    fn from(entries: &[(&str, &str)]) -> Self {
        entries
            .iter()
            .fold(Self::new(), |table, (header, key)| table.with(header, *key))
    }
}

/// A caller-provided decoding strategy.
pub trait ResponseDecoder: Send + Sync + fmt::Debug {
    /// Decode a response into its result fields.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] if the response cannot be decoded.
    fn decode(&self, response: &RawResponse) -> Result<ParsedResult, DecodeError>;
}

/// Extracts one element's text from a body by pattern, without parsing the document.
#[derive(Debug, Clone)]
pub struct ElementExtractor {
    /// Element name, used in the missing-element error.
    pub element: String,
    /// Result key the captured text is stored under.
    pub key: String,
    pattern: Regex,
}

impl ElementExtractor {
    /// Build an extractor whose pattern's first capture group is the value.
    ///
    /// # Errors
    ///
    /// Returns the regex compile error for an invalid pattern.
    pub fn new(
        element: impl Into<String>,
        key: impl Into<String>,
        pattern: &str,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            element: element.into(),
            key: key.into(),
            pattern: Regex::new(pattern)?,
        })
    }

    /// The bucket location extractor.
    #[must_use]
    pub fn location() -> Self {
        Self::from_regex("Location", "Location", LOCATION_PATTERN.clone())
    }

    /// The bucket storage class extractor.
    #[must_use]
    pub fn storage_class() -> Self {
        Self::from_regex("StorageClass", "StorageClass", STORAGE_CLASS_PATTERN.clone())
    }

    fn from_regex(element: &str, key: &str, pattern: Regex) -> Self {
        Self {
            element: element.to_owned(),
            key: key.to_owned(),
            pattern,
        }
    }

    /// Capture the element from a body.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::MissingElement`] when the pattern does not match.
    pub fn extract(&self, body: &[u8]) -> Result<ParsedResult, DecodeError> {
        let text = String::from_utf8_lossy(body);
        let value = self
            .pattern
            .captures(&text)
            .and_then(|caps| caps.get(1))
            .ok_or_else(|| DecodeError::MissingElement(self.element.clone()))?;

        let mut result = ParsedResult::new();
        result.insert(self.key.clone(), Value::String(value.as_str().to_owned()));
        Ok(result)
    }
}

/// How a response is turned into a [`ParsedResult`].
#[derive(Debug, Clone)]
pub enum DecodeStrategy {
    /// Body as XML or JSON, supplemented by headers.
    General {
        /// Headers copied into the result.
        header_table: HeaderTable,
        /// XML element names always collected into lists.
        force_list: Vec<String>,
    },
    /// Error body, or the diagnostic headers when the body is empty.
    Error,
    /// A single element captured from the body.
    Element(ElementExtractor),
    /// Headers only; the body is left untouched.
    HeaderOnly {
        /// Headers copied into the result.
        header_table: HeaderTable,
    },
    /// A caller-provided decoder.
    Custom(Arc<dyn ResponseDecoder>),
}

impl DecodeStrategy {
    /// The default strategy for a status: 200 ⇒ `General`, otherwise `Error`.
    #[must_use]
    pub fn for_status(status: StatusCode) -> Self {
        if status == StatusCode::OK {
            Self::general()
        } else {
            Self::Error
        }
    }

    /// `General` with no header table and no forced lists.
    #[must_use]
    pub fn general() -> Self {
        Self::General {
            header_table: HeaderTable::new(),
            force_list: Vec::new(),
        }
    }

    /// `General` with a header table.
    #[must_use]
    pub fn with_headers(header_table: impl Into<HeaderTable>) -> Self {
        Self::General {
            header_table: header_table.into(),
            force_list: Vec::new(),
        }
    }

    /// `General` with forced list elements.
    #[must_use]
    pub fn with_force_list(names: &[&str]) -> Self {
        Self::General {
            header_table: HeaderTable::new(),
            force_list: names.iter().map(|n| (*n).to_owned()).collect(),
        }
    }

    /// `HeaderOnly` with a header table.
    #[must_use]
    pub fn header_only(header_table: impl Into<HeaderTable>) -> Self {
        Self::HeaderOnly {
            header_table: header_table.into(),
        }
    }

    /// `Element` for the bucket location.
    #[must_use]
    pub fn location() -> Self {
        Self::Element(ElementExtractor::location())
    }

    /// `Element` for the bucket storage class.
    #[must_use]
    pub fn storage_class() -> Self {
        Self::Element(ElementExtractor::storage_class())
    }

    /// Decode a response.
    ///
    /// # Errors
    ///
    /// Only `Element` and `Custom` can fail; malformed bodies decode leniently otherwise.
    pub fn decode(&self, response: &RawResponse) -> Result<ParsedResult, DecodeError> {
        match self {
            Self::General {
                header_table,
                force_list,
            } => {
                let names: Vec<&str> = force_list.iter().map(String::as_str).collect();
                let mut result = parse_body(&response.body, &names);
                header_table.apply(&response.headers, &mut result);
                Ok(result)
            }
            Self::Error => Ok(decode_error(response)),
            Self::Element(extractor) => extractor.extract(&response.body),
            Self::HeaderOnly { header_table } => {
                let mut result = ParsedResult::new();
                header_table.apply(&response.headers, &mut result);
                Ok(result)
            }
            Self::Custom(decoder) => decoder.decode(response),
        }
    }
}

impl Default for DecodeStrategy {
    fn default() -> Self {
        Self::general()
    }
}

/// Decode an error response. Never fails.
#[must_use]
pub fn decode_error(response: &RawResponse) -> ParsedResult {
    if response.body.is_empty() {
        let mut result = ParsedResult::new();
        for header in ERROR_HEADERS {
            if let Some(value) = response.header_line(header) {
                result.insert(error_header_key(header), Value::String(value));
            }
        }
        return result;
    }

    if rustobs_xml::is_xml(&response.body) {
        return parse_xml(&response.body, &[]);
    }

    parse_json(&response.body)
        .into_iter()
        .map(|(key, value)| (fold_key(&key), value))
        .collect()
}

/// `x-obs-error-code` → `Code`, `x-obs-request-id` → `RequestId`.
fn error_header_key(header: &str) -> String {
    let name = header.strip_prefix("x-obs-").unwrap_or(header);
    let name = name.strip_prefix("error-").unwrap_or(name);
    name.split('-').map(capitalize).collect()
}

/// `request_id` → `RequestId`; segments after the first keep their own case.
fn fold_key(key: &str) -> String {
    key.split(['_', '-']).map(capitalize).collect()
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn parse_body(body: &[u8], force_list: &[&str]) -> ParsedResult {
    if body.is_empty() {
        ParsedResult::new()
    } else if rustobs_xml::is_xml(body) {
        parse_xml(body, force_list)
    } else {
        parse_json(body)
    }
}

fn parse_xml(body: &[u8], force_list: &[&str]) -> ParsedResult {
    rustobs_xml::parse_document(body, force_list).unwrap_or_else(|e| {
        warn!(error = %e, body_len = body.len(), "Ignoring malformed XML response body");
        ParsedResult::new()
    })
}

fn parse_json(body: &[u8]) -> ParsedResult {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            debug!(kind = ?json_kind(&other), "Ignoring non-object JSON response body");
            ParsedResult::new()
        }
        Err(e) => {
            warn!(error = %e, body_len = body.len(), "Ignoring malformed JSON response body");
            ParsedResult::new()
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
