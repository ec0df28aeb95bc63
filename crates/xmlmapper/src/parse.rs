//! XML parsing into an owned element tree.
//!
//! Names are kept exactly as written (`prefix:local`) and prefixes are never
//! resolved, so undeclared prefixes are accepted. A DOCTYPE is skipped and
//! no entity beyond the five predefined ones and character references is
//! ever expanded, external or internal.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::{Error, Result};

/// Open elements allowed at once while parsing.
pub const MAX_NESTING: usize = 4096;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub root: Element,
}

impl Element {
    fn new(name: String) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|c| match c {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    pub fn has_child_elements(&self) -> bool {
        self.child_elements().next().is_some()
    }

    /// Direct text children, concatenated.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|c| match c {
                Node::Text(t) => Some(t.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }

    /// All descendant text in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        let mut stack: Vec<&Node> = self.children.iter().rev().collect();
        while let Some(node) = stack.pop() {
            match node {
                Node::Text(t) => out.push_str(t),
                Node::Element(e) => stack.extend(e.children.iter().rev()),
            }
        }
        out
    }

    /// This element and every element below it, in document order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    fn push_text(&mut self, text: &str) {
        if let Some(Node::Text(last)) = self.children.last_mut() {
            last.push_str(text);
        } else {
            self.children.push(Node::Text(text.to_string()));
        }
    }
}

pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<&'a Element> {
        let next = self.stack.pop()?;
        let before = self.stack.len();
        self.stack.extend(next.child_elements());
        self.stack[before..].reverse();
        Some(next)
    }
}

/// Trim ASCII control characters and spaces only (chars up to U+0020).
pub fn trim_xml(s: &str) -> &str {
    s.trim_matches(|c: char| c <= ' ')
}

fn syntax(reader: &Reader<&[u8]>, message: impl Into<String>) -> Error {
    Error::Parse {
        position: reader.buffer_position(),
        message: message.into(),
    }
}

fn utf8<'b>(reader: &Reader<&[u8]>, bytes: &'b [u8]) -> Result<&'b str> {
    std::str::from_utf8(bytes).map_err(|e| syntax(reader, e.to_string()))
}

fn start_element(reader: &Reader<&[u8]>, start: &BytesStart<'_>) -> Result<Element> {
    let qname = start.name();
    let name = utf8(reader, qname.as_ref())?;
    if name.is_empty() {
        return Err(syntax(reader, "empty element name"));
    }
    let mut element = Element::new(name.to_string());
    for attr in start.attributes() {
        let attr = attr.map_err(|e| syntax(reader, e.to_string()))?;
        let key = utf8(reader, attr.key.as_ref())?.to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| syntax(reader, e.to_string()))?;
        element.attributes.push((key, value.into_owned()));
    }
    Ok(element)
}

/// Parse `text` into a [`Document`], failing on anything not well-formed:
/// mismatched or unclosed tags, content outside the root, a missing or
/// second root element, or unknown entities.
pub fn parse_document(text: &str) -> Result<Document> {
    let mut reader = Reader::from_str(text);
    reader.trim_text(false);
    reader.check_end_names(true);

    let mut open: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| syntax(&reader, e.to_string()))?;
        let finished = match event {
            Event::Start(ref e) => {
                if root.is_some() && open.is_empty() {
                    return Err(syntax(&reader, "content after the root element"));
                }
                if open.len() >= MAX_NESTING {
                    return Err(syntax(
                        &reader,
                        format!("nesting exceeds {} levels", MAX_NESTING),
                    ));
                }
                open.push(start_element(&reader, e)?);
                None
            }
            Event::Empty(ref e) => {
                if root.is_some() && open.is_empty() {
                    return Err(syntax(&reader, "content after the root element"));
                }
                Some(start_element(&reader, e)?)
            }
            Event::End(ref e) => {
                let qname = e.name();
                let name = utf8(&reader, qname.as_ref())?;
                match open.pop() {
                    Some(el) if el.name == name => Some(el),
                    Some(el) => {
                        return Err(syntax(
                            &reader,
                            format!("expected </{}>, found </{}>", el.name, name),
                        ));
                    }
                    None => return Err(syntax(&reader, format!("unexpected </{}>", name))),
                }
            }
            Event::Text(ref e) => {
                let text = e.unescape().map_err(|err| syntax(&reader, err.to_string()))?;
                match open.last_mut() {
                    Some(parent) => parent.push_text(&text),
                    None if trim_xml(&text).is_empty() => {}
                    None => return Err(syntax(&reader, "text outside the root element")),
                }
                None
            }
            Event::CData(e) => {
                let bytes = e.into_inner();
                let text = utf8(&reader, &bytes)?;
                match open.last_mut() {
                    Some(parent) => parent.push_text(text),
                    None => return Err(syntax(&reader, "CDATA outside the root element")),
                }
                None
            }
            Event::Decl(_) | Event::PI(_) | Event::Comment(_) | Event::DocType(_) => None,
            Event::Eof => break,
        };

        if let Some(el) = finished {
            match open.last_mut() {
                Some(parent) => parent.children.push(Node::Element(el)),
                None => root = Some(el),
            }
        }
    }

    if let Some(el) = open.last() {
        return Err(syntax(&reader, format!("unclosed <{}>", el.name)));
    }
    root.map(|root| Document { root })
        .ok_or_else(|| syntax(&reader, "no root element"))
}
