//! XML deserialization: parsing response documents into value trees.
//!
//! The root element is unwrapped, so `<ListAllMyBucketsResult><Owner>..`
//! yields a map whose top-level key is `Owner`. Attributes and namespace
//! prefixes are ignored.

use std::collections::HashMap;

use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::Event;
use serde_json::{Map, Value};

use crate::error::XmlError;

const XML_DECLARATION: &[u8] = b"<?xml";

/// Whether a body starts with an XML declaration.
///
/// # Examples
///
/// ```
/// assert!(rustobs_xml::is_xml(b"<?xml version=\"1.0\"?><A/>"));
/// assert!(!rustobs_xml::is_xml(b"<A/>"));
/// assert!(!rustobs_xml::is_xml(b"{}"));
/// ```
#[must_use]
pub fn is_xml(body: &[u8]) -> bool {
    body.starts_with(XML_DECLARATION)
}

#[derive(Debug, Default)]
struct Node {
    name: String,
    text: String,
    children: Vec<Node>,
}

/// Parse an XML document into a map of the root element's children.
///
/// Children named in `force_list` are always collected into arrays, as are
/// siblings that share a name. A root without child elements yields
/// `{RootName: text}`.
///
/// # Errors
///
/// Returns [`XmlError`] if the document is not well formed or has no root element.
///
/// # Examples
///
/// ```
/// use serde_json::json;
///
/// let xml = br#"<?xml version="1.0"?><R><Part><N>1</N></Part><Id>x</Id></R>"#;
/// let doc = rustobs_xml::parse_document(xml, &["Part"]).unwrap();
/// assert_eq!(doc["Part"], json!([{ "N": "1" }]));
/// assert_eq!(doc["Id"], json!("x"));
/// ```
pub fn parse_document(xml: &[u8], force_list: &[&str]) -> Result<Map<String, Value>, XmlError> {
    let root = read_tree(xml)?;

    if root.children.is_empty() {
        let mut map = Map::new();
        map.insert(root.name, Value::String(root.text.trim().to_owned()));
        return Ok(map);
    }

    match node_to_value(root, force_list) {
        Value::Object(map) => Ok(map),
        _ => Ok(Map::new()),
    }
}

fn read_tree(xml: &[u8]) -> Result<Node, XmlError> {
    let mut reader = Reader::from_reader(xml);
    let mut stack: Vec<Node> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                stack.push(Node {
                    name: String::from_utf8_lossy(e.local_name().as_ref()).into_owned(),
                    ..Node::default()
                });
            }
            Event::Empty(e) => {
                let node = Node {
                    name: String::from_utf8_lossy(e.local_name().as_ref()).into_owned(),
                    ..Node::default()
                };
                match stack.last_mut() {
                    Some(parent) => parent.children.push(node),
                    None => return Ok(node),
                }
            }
            Event::End(_) => {
                let node = stack.pop().ok_or_else(|| {
                    XmlError::UnexpectedElement("end tag without start tag".to_owned())
                })?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(node),
                    None => return Ok(node),
                }
            }
            Event::Text(e) => {
                if let Some(current) = stack.last_mut() {
                    let decoded = e
                        .decode()
                        .map_err(|err| XmlError::ParseError(err.to_string()))?;
                    current.text.push_str(&decoded);
                }
            }
            Event::CData(e) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Event::GeneralRef(e) => {
                if let Some(current) = stack.last_mut() {
                    if let Some(ch) = e.resolve_char_ref()? {
                        current.text.push(ch);
                    } else {
                        let name = e
                            .decode()
                            .map_err(|err| XmlError::ParseError(err.to_string()))?;
                        match resolve_predefined_entity(&name) {
                            Some(resolved) => current.text.push_str(resolved),
                            None => {
                                return Err(XmlError::ParseError(format!(
                                    "unknown entity: &{name};"
                                )));
                            }
                        }
                    }
                }
            }
            Event::Eof => {
                return Err(if stack.is_empty() {
                    XmlError::MissingElement("root element".to_owned())
                } else {
                    XmlError::UnexpectedElement(
                        "unexpected EOF while reading element".to_owned(),
                    )
                });
            }
            // Declaration, comments, processing instructions, doctype.
            _ => {}
        }
    }
}

fn node_to_value(node: Node, force_list: &[&str]) -> Value {
    if node.children.is_empty() {
        return Value::String(node.text.trim().to_owned());
    }

    let mut counts: HashMap<String, usize> = HashMap::new();
    for child in &node.children {
        *counts.entry(child.name.clone()).or_default() += 1;
    }

    let mut map = Map::new();
    for child in node.children {
        let as_list = force_list.contains(&child.name.as_str())
            || counts.get(&child.name).copied().unwrap_or(0) > 1;
        let name = child.name.clone();
        let value = node_to_value(child, force_list);

        if as_list {
            match map
                .entry(name)
                .or_insert_with(|| Value::Array(Vec::new()))
            {
                Value::Array(items) => items.push(value),
                other => *other = Value::Array(vec![value]),
            }
        } else {
            map.insert(name, value);
        }
    }
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_should_unwrap_root_and_read_leaves() {
        let xml = br#"<?xml version="1.0" encoding="UTF-8"?>
<InitiateMultipartUploadResult xmlns="http://obs.myhuaweicloud.com/doc/2015-06-30/">
  <Bucket>photos</Bucket>
  <Key>a/b.png</Key>
  <UploadId> 0000017 </UploadId>
</InitiateMultipartUploadResult>"#;

        let doc = parse_document(xml, &[]).unwrap();
        assert_eq!(
            Value::Object(doc),
            json!({ "Bucket": "photos", "Key": "a/b.png", "UploadId": "0000017" })
        );
    }

    #[test]
    fn test_should_force_single_element_into_list() {
        let xml = br#"<?xml version="1.0"?>
<ListPartsResult><Part><PartNumber>1</PartNumber><ETag>"e1"</ETag></Part></ListPartsResult>"#;

        let doc = parse_document(xml, &["Part"]).unwrap();
        assert_eq!(doc["Part"], json!([{ "PartNumber": "1", "ETag": "\"e1\"" }]));

        let without = parse_document(xml, &[]).unwrap();
        assert_eq!(without["Part"], json!({ "PartNumber": "1", "ETag": "\"e1\"" }));
    }

    #[test]
    fn test_should_collect_repeated_siblings_into_list() {
        let xml = br#"<?xml version="1.0"?>
<Tagging><TagSet><Tag><Key>a</Key></Tag><Tag><Key>b</Key></Tag></TagSet></Tagging>"#;

        let doc = parse_document(xml, &[]).unwrap();
        assert_eq!(
            doc["TagSet"]["Tag"],
            json!([{ "Key": "a" }, { "Key": "b" }])
        );
    }

    #[test]
    fn test_should_resolve_entities_and_cdata() {
        let xml = br#"<?xml version="1.0"?><Error><Message>a &amp; b &#60;c&#x3E;</Message><Raw><![CDATA[<x>]]></Raw></Error>"#;

        let doc = parse_document(xml, &[]).unwrap();
        assert_eq!(doc["Message"], json!("a & b <c>"));
        assert_eq!(doc["Raw"], json!("<x>"));
    }

    #[test]
    fn test_should_map_empty_elements_to_empty_strings() {
        let xml = br#"<?xml version="1.0"?><R><Prefix/><Marker></Marker></R>"#;
        let doc = parse_document(xml, &[]).unwrap();
        assert_eq!(doc["Prefix"], json!(""));
        assert_eq!(doc["Marker"], json!(""));
    }

    #[test]
    fn test_should_return_root_text_for_leaf_root() {
        let xml = br#"<?xml version="1.0"?><Location>cn-north-4</Location>"#;
        let doc = parse_document(xml, &[]).unwrap();
        assert_eq!(Value::Object(doc), json!({ "Location": "cn-north-4" }));
    }

    #[test]
    fn test_should_reject_malformed_documents() {
        assert!(parse_document(b"<?xml version=\"1.0\"?><A><B></A>", &[]).is_err());
        assert!(parse_document(b"<?xml version=\"1.0\"?><A>", &[]).is_err());
        assert!(parse_document(b"<?xml version=\"1.0\"?>", &[]).is_err());
    }
}
