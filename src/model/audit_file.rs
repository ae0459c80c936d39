//! The AuditFile root and the text entry points.

use crate::core::{ErrorRegister, ModelError, Required, XmlFault};
use crate::xml::Element;

use super::header::Header;
use super::source_documents::SourceDocuments;
use super::{expect_element, read_opt_node, read_req_node, write_opt_node, write_req_node};

/// Namespace of the schema this model round-trips against.
pub const NAMESPACE: &str = "urn:OECD:StandardAuditFile-Tax:PT_1.04_01";

const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// The document root. Holds the header and the source documents; the text
/// entry points [`AuditFile::to_xml_string`] and [`AuditFile::from_xml_str`]
/// wire the XML library's failures into the register's lib-xml bucket.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuditFile {
    header: Required<Header>,
    source_documents: Option<SourceDocuments>,
}

impl AuditFile {
    pub const ELEMENT: &'static str = "AuditFile";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_header(&mut self, header: Header) {
        self.header.set(header);
    }

    pub fn header(&self) -> Result<&Header, ModelError> {
        self.header.get("AuditFile.Header")
    }

    pub fn header_mut(&mut self) -> Option<&mut Header> {
        self.header.value_mut()
    }

    pub fn set_source_documents(&mut self, source: SourceDocuments) {
        self.source_documents = Some(source);
    }

    pub fn source_documents(&self) -> Option<&SourceDocuments> {
        self.source_documents.as_ref()
    }

    pub fn source_documents_mut(&mut self) -> Option<&mut SourceDocuments> {
        self.source_documents.as_mut()
    }

    pub fn clear_source_documents(&mut self) {
        self.source_documents = None;
    }

    /// Project the whole document into an element tree.
    pub fn to_element(&self, reg: &mut ErrorRegister) -> Result<Element, ModelError> {
        let mut root = Element::new(Self::ELEMENT);
        root.set_attribute("xmlns", NAMESPACE);
        root.set_attribute("xmlns:xsi", XSI_NAMESPACE);

        write_req_node(&mut root, "AuditFile.Header", self.header.value(), reg)?;
        write_opt_node(&mut root, self.source_documents.as_ref(), reg)?;

        Ok(root)
    }

    /// Serialize to text. Library-level write failures land in the lib-xml
    /// bucket and are also returned as the fatal error.
    pub fn to_xml_string(&self, reg: &mut ErrorRegister) -> Result<String, ModelError> {
        let root = self.to_element(reg)?;
        match root.to_xml_string() {
            Ok(text) => Ok(text),
            Err(err) => {
                reg.add_lib_xml(XmlFault::from(&err));
                Err(err.into())
            }
        }
    }

    /// Parse text and rebuild the document. Unparseable text is recorded in
    /// the lib-xml bucket before the fatal error is returned; everything
    /// else degrades to register entries while the walk continues.
    pub fn from_xml_str(xml: &str, reg: &mut ErrorRegister) -> Result<Self, ModelError> {
        let root = match Element::parse(xml) {
            Ok(root) => root,
            Err(err) => {
                reg.add_lib_xml(XmlFault::from(&err));
                return Err(err.into());
            }
        };
        Self::read_xml(&root, reg)
    }

    /// Rebuild from an already-parsed element tree.
    pub fn read_xml(node: &Element, reg: &mut ErrorRegister) -> Result<Self, ModelError> {
        expect_element(node, Self::ELEMENT)?;
        let mut audit_file = AuditFile::new();

        audit_file.header = read_req_node(node, reg)?;
        audit_file.source_documents = read_opt_node(node, reg)?;

        Ok(audit_file)
    }
}
