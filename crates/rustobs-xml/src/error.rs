//! Error types for XML parsing and writing.

use std::io;

/// Errors that can occur while parsing or writing XML documents.
#[derive(Debug, thiserror::Error)]
pub enum XmlError {
    /// An I/O error during XML writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An error from the underlying quick-xml library.
    #[error("XML processing error: {0}")]
    QuickXml(#[from] quick_xml::Error),

    /// A required XML element was missing.
    #[error("missing required XML element: {0}")]
    MissingElement(String),

    /// The document ended or nested in a way that cannot form a tree.
    #[error("unexpected XML element: {0}")]
    UnexpectedElement(String),

    /// Text content could not be decoded.
    #[error("failed to parse value: {0}")]
    ParseError(String),
}
