//! XML serialization: writing value trees as request documents.
//!
//! Objects become child elements, arrays repeat the element under the same
//! name, scalars become text and `null` becomes an empty element.

use std::io::{self, Write};

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesText, Event};
use serde_json::Value;

use crate::error::XmlError;

/// Serialize a value tree as an XML document under `root_element`.
///
/// # Errors
///
/// Returns [`XmlError::UnexpectedElement`] if the top-level value is an array,
/// or [`XmlError::Io`] if writing fails.
///
/// # Examples
///
/// ```
/// use serde_json::json;
///
/// let xml = rustobs_xml::to_xml(
///     "Tagging",
///     &json!({ "TagSet": { "Tag": [{ "Key": "a", "Value": "1" }] } }),
/// )
/// .unwrap();
/// assert!(xml.ends_with("<Tagging><TagSet><Tag><Key>a</Key><Value>1</Value></Tag></TagSet></Tagging>"));
/// ```
pub fn to_xml(root_element: &str, value: &Value) -> Result<String, XmlError> {
    if value.is_array() {
        return Err(XmlError::UnexpectedElement(format!(
            "root element {root_element} cannot be a list"
        )));
    }

    let mut buf = Vec::with_capacity(256);
    let mut writer = Writer::new(&mut buf);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    write_element(&mut writer, root_element, value)?;

    String::from_utf8(buf).map_err(|e| XmlError::ParseError(e.to_string()))
}

fn write_element<W: Write>(writer: &mut Writer<W>, tag: &str, value: &Value) -> io::Result<()> {
    match value {
        Value::Null => {
            writer.create_element(tag).write_empty()?;
        }
        Value::Bool(b) => {
            writer
                .create_element(tag)
                .write_text_content(BytesText::new(if *b { "true" } else { "false" }))?;
        }
        Value::Number(n) => {
            writer
                .create_element(tag)
                .write_text_content(BytesText::new(&n.to_string()))?;
        }
        Value::String(s) => {
            writer
                .create_element(tag)
                .write_text_content(BytesText::new(s))?;
        }
        Value::Array(items) => {
            for item in items {
                write_element(writer, tag, item)?;
            }
        }
        Value::Object(map) => {
            writer.create_element(tag).write_inner_content(|w| {
                for (name, child) in map {
                    write_element(w, name, child)?;
                }
                Ok(())
            })?;
        }
    }
    Ok(())
}
