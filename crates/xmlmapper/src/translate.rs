//! Structural XML → JSON translation.
//!
//! Mapping rules:
//! - the root tag becomes the single top-level key
//! - a leaf element becomes its trimmed text as a string, or `{}` when empty
//! - an element with children or attributes becomes an object; attributes come
//!   first, then child tags in first-occurrence order
//! - a name seen more than once becomes an array in document order
//! - text mixed with children or attributes is kept under `content`
//!
//! Leaf text is never coerced to numbers or booleans.

use serde_json::{Map, Value, map::Entry};

use crate::parse::{Document, Element, Node, trim_xml};
use crate::{Error, Result};

pub const CONTENT_KEY: &str = "content";
pub const MAX_DEPTH: usize = 1024;

pub fn document_to_value(doc: &Document) -> Result<Value> {
    let mut top = Map::new();
    top.insert(doc.root.name.clone(), element_to_value(&doc.root, 0)?);
    Ok(Value::Object(top))
}

pub fn element_to_value(element: &Element, depth: usize) -> Result<Value> {
    if depth > MAX_DEPTH {
        return Err(Error::Translation {
            message: format!(
                "<{}> is nested deeper than {} levels",
                element.name, MAX_DEPTH
            ),
        });
    }

    if !element.has_child_elements() && element.attributes.is_empty() {
        let text = element.text();
        let text = trim_xml(&text);
        return Ok(if text.is_empty() {
            Value::Object(Map::new())
        } else {
            Value::String(text.to_string())
        });
    }

    let mut map = Map::new();
    for (name, value) in &element.attributes {
        accumulate(&mut map, name.clone(), Value::String(value.clone()));
    }
    for child in &element.children {
        match child {
            Node::Element(e) => {
                let value = element_to_value(e, depth + 1)?;
                accumulate(&mut map, e.name.clone(), value);
            }
            Node::Text(text) => {
                let text = trim_xml(text);
                if !text.is_empty() {
                    accumulate(&mut map, CONTENT_KEY.to_string(), Value::String(text.to_string()));
                }
            }
        }
    }
    Ok(Value::Object(map))
}

/// Insert `value` under `key`, promoting a repeated key to an array.
///
/// Translated elements and attributes are never arrays themselves, so an
/// existing array always means the key was already repeated.
fn accumulate(map: &mut Map<String, Value>, key: String, value: Value) {
    match map.entry(key) {
        Entry::Vacant(slot) => {
            slot.insert(value);
        }
        Entry::Occupied(mut slot) => match slot.get_mut() {
            Value::Array(items) => items.push(value),
            existing => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accumulate_promotes_then_appends() {
        let mut map = Map::new();
        accumulate(&mut map, "b".into(), json!("1"));
        assert_eq!(map["b"], json!("1"));
        accumulate(&mut map, "b".into(), json!("2"));
        accumulate(&mut map, "b".into(), json!({}));
        assert_eq!(map["b"], json!(["1", "2", {}]));
    }

    #[test]
    fn depth_guard_reports_the_element() {
        let mut el = Element {
            name: "leaf".into(),
            attributes: Vec::new(),
            children: Vec::new(),
        };
        for _ in 0..=MAX_DEPTH + 1 {
            el = Element {
                name: "d".into(),
                attributes: Vec::new(),
                children: vec![Node::Element(el)],
            };
        }
        match element_to_value(&el, 0) {
            Err(Error::Translation { message }) => assert!(message.contains("<d>")),
            other => panic!("unexpected {:?}", other),
        }
    }
}
