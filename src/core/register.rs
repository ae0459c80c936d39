use serde::Serialize;

use crate::xml::XmlError;

/// A single recorded validation failure: which field, and what went wrong.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fault {
    /// Dot-separated path to the field (e.g. "Invoice.GrossTotal").
    pub field: String,
    /// Human-readable description.
    pub message: String,
}

impl Fault {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Fault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// A failure reported by the XML library itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct XmlFault {
    pub message: String,
    /// Byte offset into the input, where the library reported one.
    pub position: Option<u64>,
}

impl From<&XmlError> for XmlFault {
    fn from(err: &XmlError) -> Self {
        match err {
            XmlError::Parse { message, position } => Self {
                message: message.clone(),
                position: Some(*position),
            },
            other => Self {
                message: other.to_string(),
                position: None,
            },
        }
    }
}

impl std::fmt::Display for XmlFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.position {
            Some(pos) => write!(f, "at byte {pos}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Accumulates every soft failure seen while one audit file is built or
/// parsed.
///
/// One instance is created per document session and passed `&mut` through
/// the whole call chain; at the end the caller inspects the buckets to
/// decide whether the document is acceptable. No operation here ever fails.
///
/// The four buckets are independent:
/// - on-set-value: a setter received a value violating its constraints;
/// - on-create-xml-node: a required field was still unset at write time;
/// - lib-xml: the XML library rejected input or output;
/// - validation: cross-document integrity problems (duplicate or missing
///   document numbers).
#[derive(Debug, Clone, Default, Serialize)]
pub struct ErrorRegister {
    on_set_value: Vec<Fault>,
    on_create_xml_node: Vec<Fault>,
    lib_xml: Vec<XmlFault>,
    validation: Vec<Fault>,
}

impl ErrorRegister {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_on_set_value(&mut self, fault: Fault) {
        self.on_set_value.push(fault);
    }

    pub fn add_on_create_xml_node(&mut self, fault: Fault) {
        self.on_create_xml_node.push(fault);
    }

    pub fn add_lib_xml(&mut self, fault: XmlFault) {
        self.lib_xml.push(fault);
    }

    pub fn add_validation(&mut self, fault: Fault) {
        self.validation.push(fault);
    }

    pub fn on_set_value(&self) -> &[Fault] {
        &self.on_set_value
    }

    pub fn on_create_xml_node(&self) -> &[Fault] {
        &self.on_create_xml_node
    }

    pub fn lib_xml(&self) -> &[XmlFault] {
        &self.lib_xml
    }

    pub fn validation(&self) -> &[Fault] {
        &self.validation
    }

    /// True when every bucket is empty — the caller's accept gate.
    pub fn is_clean(&self) -> bool {
        self.on_set_value.is_empty()
            && self.on_create_xml_node.is_empty()
            && self.lib_xml.is_empty()
            && self.validation.is_empty()
    }

    /// Total number of recorded faults across all buckets.
    pub fn len(&self) -> usize {
        self.on_set_value.len()
            + self.on_create_xml_node.len()
            + self.lib_xml.len()
            + self.validation.len()
    }

    pub fn is_empty(&self) -> bool {
        self.is_clean()
    }

    /// Drop everything. Only meaningful between independent runs.
    pub fn clear(&mut self) {
        self.on_set_value.clear();
        self.on_create_xml_node.clear();
        self.lib_xml.clear();
        self.validation.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_are_independent() {
        let mut reg = ErrorRegister::new();
        assert!(reg.is_clean());

        reg.add_on_set_value(Fault::new("Invoice.GrossTotal", "negative"));
        reg.add_validation(Fault::new("SalesInvoices", "duplicate"));

        assert_eq!(reg.on_set_value().len(), 1);
        assert_eq!(reg.validation().len(), 1);
        assert!(reg.on_create_xml_node().is_empty());
        assert!(reg.lib_xml().is_empty());
        assert_eq!(reg.len(), 2);
        assert!(!reg.is_clean());
    }

    #[test]
    fn clear_resets_all_buckets() {
        let mut reg = ErrorRegister::new();
        reg.add_on_create_xml_node(Fault::new("Header.CompanyName", "unset"));
        reg.add_lib_xml(XmlFault {
            message: "broken".into(),
            position: Some(10),
        });
        reg.clear();
        assert!(reg.is_clean());
        assert_eq!(reg.len(), 0);
    }

    #[test]
    fn fault_display() {
        let fault = Fault::new("Line.DebitAmount", "must not be negative");
        assert_eq!(fault.to_string(), "Line.DebitAmount: must not be negative");
    }
}
