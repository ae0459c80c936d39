//! Owned XML element tree with quick-xml backed text round-trip.
//!
//! The document model reads and writes through this small DOM rather than
//! raw events: nodes need get-tag-name, add-named-child and
//! iterate-children-by-name, which an event stream does not give them.

use std::io::Cursor;

use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised by the XML text layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum XmlError {
    /// quick-xml rejected the input text.
    #[error("XML parse error at byte {position}: {message}")]
    Parse { message: String, position: u64 },

    /// The input contained no root element.
    #[error("document has no root element")]
    NoRoot,

    /// The input contained more than one top-level element.
    #[error("document has more than one root element")]
    MultipleRoots,

    /// Writing the tree out failed.
    #[error("XML write error: {0}")]
    Write(String),
}

/// One element: tag name, attributes, child elements and optional text.
///
/// Mixed content is not modelled — an element carries either text or
/// children, which is all the audit file schema uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
    text: Option<String>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            text: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.push((key.into(), value.into()));
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Append a new empty child and return it for population.
    pub fn add_child(&mut self, name: impl Into<String>) -> &mut Element {
        self.children.push(Element::new(name));
        self.children.last_mut().expect("child just pushed")
    }

    /// Append a child holding only text content.
    pub fn add_text_child(&mut self, name: impl Into<String>, text: impl Into<String>) {
        let child = self.add_child(name);
        child.set_text(text);
    }

    pub fn children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter()
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    pub fn first_child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn count_children(&self, name: &str) -> usize {
        self.children.iter().filter(|c| c.name == name).count()
    }

    /// Text of the first child with the given tag, if any.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.first_child(name).and_then(Element::text)
    }

    /// Serialize the tree to text with an XML declaration and 2-space indent.
    pub fn to_xml_string(&self) -> Result<String, XmlError> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(write_error)?;
        self.write_into(&mut writer).map_err(write_error)?;
        let buf = writer.into_inner().into_inner();
        String::from_utf8(buf).map_err(|e| XmlError::Write(format!("UTF-8 error: {e}")))
    }

    fn write_into(&self, writer: &mut Writer<Cursor<Vec<u8>>>) -> std::io::Result<()> {
        let mut start = BytesStart::new(self.name.as_str());
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }
        if self.children.is_empty() && self.text.is_none() {
            return writer.write_event(Event::Empty(start));
        }
        writer.write_event(Event::Start(start))?;
        if let Some(text) = &self.text {
            writer.write_event(Event::Text(BytesText::new(text)))?;
        }
        for child in &self.children {
            child.write_into(writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new(self.name.as_str())))
    }

    /// Parse text into a tree.
    pub fn parse(xml: &str) -> Result<Element, XmlError> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    stack.push(element_from_start(e, &reader)?);
                }
                Ok(Event::Empty(ref e)) => {
                    let element = element_from_start(e, &reader)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Ok(Event::Text(ref e)) => {
                    let text = e
                        .unescape()
                        .map_err(|err| parse_error(err, &reader))?
                        .into_owned();
                    if let Some(top) = stack.last_mut() {
                        top.set_text(text);
                    }
                }
                Ok(Event::CData(ref e)) => {
                    let text = String::from_utf8_lossy(e).into_owned();
                    if let Some(top) = stack.last_mut() {
                        top.set_text(text);
                    }
                }
                Ok(Event::End(_)) => {
                    let element = stack.pop().ok_or(XmlError::NoRoot)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(err) => return Err(parse_error(err, &reader)),
            }
        }

        root.ok_or(XmlError::NoRoot)
    }
}

fn element_from_start(start: &BytesStart<'_>, reader: &Reader<&[u8]>) -> Result<Element, XmlError> {
    let name = std::str::from_utf8(start.name().as_ref())
        .map_err(|e| XmlError::Parse {
            message: format!("tag name is not UTF-8: {e}"),
            position: reader.buffer_position() as u64,
        })?
        .to_string();
    let mut element = Element::new(name);
    for attr in start.attributes() {
        let attr = attr.map_err(|e| XmlError::Parse {
            message: format!("bad attribute: {e}"),
            position: reader.buffer_position() as u64,
        })?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = String::from_utf8_lossy(&attr.value).into_owned();
        element.set_attribute(key, value);
    }
    Ok(element)
}

fn attach(
    stack: &mut Vec<Element>,
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), XmlError> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(element);
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(element);
            Ok(())
        }
        None => Err(XmlError::MultipleRoots),
    }
}

fn parse_error(err: quick_xml::Error, reader: &Reader<&[u8]>) -> XmlError {
    XmlError::Parse {
        message: err.to_string(),
        position: reader.buffer_position() as u64,
    }
}

fn write_error(e: std::io::Error) -> XmlError {
    XmlError::Write(e.to_string())
}

/// Format a Decimal for XML output — always include at least 2 decimal places,
/// strip trailing zeros beyond that.
pub fn format_decimal(d: Decimal) -> String {
    let s = d.normalize().to_string();
    if let Some(dot_pos) = s.find('.') {
        let decimals = s.len() - dot_pos - 1;
        if decimals < 2 {
            format!("{s}{}", "0".repeat(2 - decimals))
        } else {
            s
        }
    } else {
        format!("{s}.00")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn format_decimal_cases() {
        assert_eq!(format_decimal(dec!(100)), "100.00");
        assert_eq!(format_decimal(dec!(1500.0)), "1500.00");
        assert_eq!(format_decimal(dec!(49.90)), "49.90");
        assert_eq!(format_decimal(dec!(0.005)), "0.005");
        assert_eq!(format_decimal(dec!(-12.3)), "-12.30");
    }

    #[test]
    fn build_and_serialize() {
        let mut root = Element::new("AuditFile");
        root.set_attribute("xmlns", "urn:example");
        root.add_text_child("Version", "1.04_01");
        root.add_child("Empty");

        let xml = root.to_xml_string().unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<AuditFile xmlns=\"urn:example\">"));
        assert!(xml.contains("<Version>1.04_01</Version>"));
        assert!(xml.contains("<Empty/>"));
    }

    #[test]
    fn parse_and_navigate() {
        let xml = r#"<?xml version="1.0"?>
            <Doc>
              <Line><N>1</N></Line>
              <Line><N>2</N></Line>
              <Note>hi &amp; bye</Note>
            </Doc>"#;
        let root = Element::parse(xml).unwrap();
        assert_eq!(root.name(), "Doc");
        assert_eq!(root.count_children("Line"), 2);
        assert_eq!(root.child_text("Note"), Some("hi & bye"));
        let numbers: Vec<_> = root
            .children_named("Line")
            .filter_map(|l| l.child_text("N"))
            .collect();
        assert_eq!(numbers, ["1", "2"]);
    }

    #[test]
    fn roundtrip_is_stable() {
        let mut root = Element::new("Doc");
        root.add_text_child("A", "x < y");
        let line = root.add_child("Line");
        line.add_text_child("N", "1");

        let first = root.to_xml_string().unwrap();
        let reparsed = Element::parse(&first).unwrap();
        assert_eq!(reparsed, root);
        assert_eq!(reparsed.to_xml_string().unwrap(), first);
    }

    #[test]
    fn parse_error_reports_position() {
        let err = Element::parse("<Doc><Open></Doc>").unwrap_err();
        match err {
            XmlError::Parse { position, .. } => assert!(position > 0),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn no_root_rejected() {
        assert_eq!(Element::parse("   "), Err(XmlError::NoRoot));
    }
}
