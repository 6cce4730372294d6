//! XML support for rustobs.
//!
//! Response bodies are turned into loosely typed value trees rather than
//! per-operation structs: every element with children becomes a JSON-style
//! object keyed by local name, every leaf becomes its trimmed text, and
//! elements that repeat (or that the caller names as list elements) become
//! arrays. Request bodies go the other way, from a value tree to a document.
//!
//! # Key components
//!
//! - [`parse_document`] for XML response bodies
//! - [`to_xml`] for XML request bodies
//! - [`is_xml`] to sniff a body for an XML declaration

pub mod deserialize;
pub mod error;
pub mod serialize;

pub use deserialize::{is_xml, parse_document};
pub use error::XmlError;
pub use serialize::to_xml;
