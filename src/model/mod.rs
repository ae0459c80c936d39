//! The audit file document tree.
//!
//! One type per schema element. Every node validates on set, accumulates
//! soft failures in the session's [`ErrorRegister`], and round-trips
//! through [`Element`] containers with exact tag names.

mod audit_file;
mod header;
pub mod grouping;
pub mod movement;
pub mod payments;
pub mod sales;
mod source_documents;
mod tax;
mod totals;
pub mod work;

pub use audit_file::{AuditFile, NAMESPACE};
pub use header::{AUDIT_FILE_VERSION, CompanyAddress, Header};
pub use source_documents::SourceDocuments;
pub use tax::Tax;
pub use totals::{Currency, Settlement};

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::core::validate::{self, ValueFault};
use crate::core::{ErrorRegister, Fault, ModelError, Required, Slots, dates};
use crate::xml::{Element, format_decimal};

pub(crate) const MSG_UNSET: &str = "required field is not set";

/// Implemented by every element-backed node below the root.
///
/// `write_xml` appends this node's element under `parent` (whose tag must
/// be exactly [`XmlNode::PARENT`]) and returns the created container;
/// `read_xml` rebuilds the node from an element tagged
/// [`XmlNode::ELEMENT`]. Tag mismatches are fatal — they indicate misuse of
/// the API, not invalid data.
pub trait XmlNode: Sized {
    /// Tag of the element this node owns.
    const ELEMENT: &'static str;
    /// Tag the parent container must carry.
    const PARENT: &'static str;

    fn write_xml<'a>(
        &self,
        parent: &'a mut Element,
        reg: &mut ErrorRegister,
    ) -> Result<&'a mut Element, ModelError>;

    fn read_xml(node: &Element, reg: &mut ErrorRegister) -> Result<Self, ModelError>;
}

pub(crate) fn expect_parent(parent: &Element, expected: &'static str) -> Result<(), ModelError> {
    if parent.name() == expected {
        Ok(())
    } else {
        Err(ModelError::WrongParent {
            expected,
            actual: parent.name().to_string(),
        })
    }
}

pub(crate) fn expect_element(node: &Element, expected: &'static str) -> Result<(), ModelError> {
    if node.name() == expected {
        Ok(())
    } else {
        Err(ModelError::WrongElement {
            expected,
            actual: node.name().to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Setter plumbing — value is stored even when the fault is recorded, so the
// caller can report every problem at once instead of failing fast.
// ---------------------------------------------------------------------------

pub(crate) fn set_req_text(
    slot: &mut Required<String>,
    field: &str,
    raw: &str,
    min: usize,
    max: usize,
    reg: &mut ErrorRegister,
) -> bool {
    match validate::bounded_text(raw, min, max) {
        Ok(normalized) => {
            slot.set(normalized.into_owned());
            true
        }
        Err(fault) => {
            reg.add_on_set_value(Fault::new(field, fault.to_string()));
            slot.set(raw.to_string());
            false
        }
    }
}

pub(crate) fn set_opt_text(
    slot: &mut Option<String>,
    field: &str,
    raw: &str,
    min: usize,
    max: usize,
    reg: &mut ErrorRegister,
) -> bool {
    match validate::bounded_text(raw, min, max) {
        Ok(normalized) => {
            *slot = Some(normalized.into_owned());
            true
        }
        Err(fault) => {
            reg.add_on_set_value(Fault::new(field, fault.to_string()));
            *slot = Some(raw.to_string());
            false
        }
    }
}

/// Document references truncate to 60 characters first, then must match
/// the `Type Series/Number` pattern.
pub(crate) fn set_req_doc_ref(
    slot: &mut Required<String>,
    field: &str,
    raw: &str,
    reg: &mut ErrorRegister,
) -> bool {
    let stored = match validate::bounded_text(raw, 1, 60) {
        Ok(normalized) => normalized.into_owned(),
        Err(fault) => {
            reg.add_on_set_value(Fault::new(field, fault.to_string()));
            slot.set(raw.to_string());
            return false;
        }
    };
    let ok = match validate::doc_ref(&stored) {
        Ok(_) => true,
        Err(fault) => {
            reg.add_on_set_value(Fault::new(field, fault.to_string()));
            false
        }
    };
    slot.set(stored);
    ok
}

pub(crate) fn set_req_amount(
    slot: &mut Required<Decimal>,
    field: &str,
    value: Decimal,
    reg: &mut ErrorRegister,
) -> bool {
    let ok = record_amount_fault(field, value, reg);
    slot.set(value);
    ok
}

pub(crate) fn set_opt_amount(
    slot: &mut Option<Decimal>,
    field: &str,
    value: Decimal,
    reg: &mut ErrorRegister,
) -> bool {
    let ok = record_amount_fault(field, value, reg);
    *slot = Some(value);
    ok
}

/// One half of a DebitAmount/CreditAmount-style pair. Fatal while the
/// sibling holds a value; the sibling must be cleared first.
pub(crate) fn set_exclusive_amount(
    slot: &mut Option<Decimal>,
    other_is_set: bool,
    field: &'static str,
    other: &'static str,
    value: Decimal,
    reg: &mut ErrorRegister,
) -> Result<bool, ModelError> {
    if other_is_set {
        return Err(ModelError::ExclusiveFields { field, other });
    }
    let ok = record_amount_fault(field, value, reg);
    *slot = Some(value);
    Ok(ok)
}

fn record_amount_fault(field: &str, value: Decimal, reg: &mut ErrorRegister) -> bool {
    match validate::non_negative(value) {
        Ok(_) => true,
        Err(fault) => {
            reg.add_on_set_value(Fault::new(field, fault.to_string()));
            false
        }
    }
}

pub(crate) fn set_req_positive(
    slot: &mut Required<u64>,
    field: &str,
    value: u64,
    reg: &mut ErrorRegister,
) -> bool {
    let ok = value >= 1;
    if !ok {
        reg.add_on_set_value(Fault::new(field, "must be 1 or greater"));
    }
    slot.set(value);
    ok
}

// ---------------------------------------------------------------------------
// Write plumbing — a required field that is still unset emits an empty
// element (the document stays structurally well formed) and records exactly
// one on-create fault.
// ---------------------------------------------------------------------------

pub(crate) fn write_req_str(
    node: &mut Element,
    tag: &str,
    field: &str,
    value: Option<&str>,
    reg: &mut ErrorRegister,
) {
    match value {
        Some(text) => node.add_text_child(tag, text),
        None => {
            node.add_child(tag);
            reg.add_on_create_xml_node(Fault::new(field, MSG_UNSET));
        }
    }
}

pub(crate) fn write_opt_str(node: &mut Element, tag: &str, value: Option<&str>) {
    if let Some(text) = value {
        node.add_text_child(tag, text);
    }
}

pub(crate) fn write_req_amount(
    node: &mut Element,
    tag: &str,
    field: &str,
    value: Option<Decimal>,
    reg: &mut ErrorRegister,
) {
    write_req_str(node, tag, field, value.map(format_decimal).as_deref(), reg);
}

pub(crate) fn write_opt_amount(node: &mut Element, tag: &str, value: Option<Decimal>) {
    write_opt_str(node, tag, value.map(format_decimal).as_deref());
}

pub(crate) fn write_req_int<T: ToString>(
    node: &mut Element,
    tag: &str,
    field: &str,
    value: Option<T>,
    reg: &mut ErrorRegister,
) {
    write_req_str(node, tag, field, value.map(|v| v.to_string()).as_deref(), reg);
}

pub(crate) fn write_opt_int<T: ToString>(node: &mut Element, tag: &str, value: Option<T>) {
    write_opt_str(node, tag, value.map(|v| v.to_string()).as_deref());
}

pub(crate) fn write_req_date(
    node: &mut Element,
    tag: &str,
    field: &str,
    value: Option<NaiveDate>,
    reg: &mut ErrorRegister,
) {
    write_req_str(node, tag, field, value.map(dates::format_date).as_deref(), reg);
}

pub(crate) fn write_opt_date(node: &mut Element, tag: &str, value: Option<NaiveDate>) {
    write_opt_str(node, tag, value.map(dates::format_date).as_deref());
}

pub(crate) fn write_req_date_time(
    node: &mut Element,
    tag: &str,
    field: &str,
    value: Option<NaiveDateTime>,
    reg: &mut ErrorRegister,
) {
    write_req_str(
        node,
        tag,
        field,
        value.map(dates::format_date_time).as_deref(),
        reg,
    );
}

pub(crate) fn write_opt_date_time(node: &mut Element, tag: &str, value: Option<NaiveDateTime>) {
    write_opt_str(node, tag, value.map(dates::format_date_time).as_deref());
}

pub(crate) fn write_req_node<N: XmlNode>(
    node: &mut Element,
    field: &str,
    value: Option<&N>,
    reg: &mut ErrorRegister,
) -> Result<(), ModelError> {
    match value {
        Some(child) => {
            child.write_xml(node, reg)?;
        }
        None => {
            node.add_child(N::ELEMENT);
            reg.add_on_create_xml_node(Fault::new(field, MSG_UNSET));
        }
    }
    Ok(())
}

pub(crate) fn write_opt_node<N: XmlNode>(
    node: &mut Element,
    value: Option<&N>,
    reg: &mut ErrorRegister,
) -> Result<(), ModelError> {
    if let Some(child) = value {
        child.write_xml(node, reg)?;
    }
    Ok(())
}

/// Emit every live slot in insertion order; gaps are skipped.
pub(crate) fn write_nodes<N: XmlNode>(
    node: &mut Element,
    slots: &Slots<N>,
    reg: &mut ErrorRegister,
) -> Result<(), ModelError> {
    for child in slots.values() {
        child.write_xml(node, reg)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Read plumbing — scalar text that fails to parse records an on-set fault
// and leaves the field unset; the walk continues. A required child element
// that is absent stays Unset silently and is re-detected at the next write.
// ---------------------------------------------------------------------------

pub(crate) fn read_amount(
    node: &Element,
    tag: &str,
    field: &str,
    reg: &mut ErrorRegister,
) -> Option<Decimal> {
    let text = node.child_text(tag)?;
    match text.parse::<Decimal>() {
        Ok(value) => Some(value),
        Err(_) => {
            record_parse_fault(field, ValueFault::BadDecimal(text.to_string()), reg);
            None
        }
    }
}

pub(crate) fn read_int<T>(
    node: &Element,
    tag: &str,
    field: &str,
    reg: &mut ErrorRegister,
) -> Option<T>
where
    T: std::str::FromStr<Err = std::num::ParseIntError>,
{
    let text = node.child_text(tag)?;
    match text.parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            record_parse_fault(field, ValueFault::BadInteger(text.to_string()), reg);
            None
        }
    }
}

pub(crate) fn read_date(
    node: &Element,
    tag: &str,
    field: &str,
    reg: &mut ErrorRegister,
) -> Option<NaiveDate> {
    let text = node.child_text(tag)?;
    match dates::parse_date(text) {
        Ok(date) => Some(date),
        Err(fault) => {
            record_parse_fault(field, fault, reg);
            None
        }
    }
}

pub(crate) fn read_date_time(
    node: &Element,
    tag: &str,
    field: &str,
    reg: &mut ErrorRegister,
) -> Option<NaiveDateTime> {
    let text = node.child_text(tag)?;
    match dates::parse_date_time(text) {
        Ok(date_time) => Some(date_time),
        Err(fault) => {
            record_parse_fault(field, fault, reg);
            None
        }
    }
}

fn record_parse_fault(field: &str, fault: ValueFault, reg: &mut ErrorRegister) {
    reg.add_on_set_value(Fault::new(field, fault.to_string()));
}

pub(crate) fn read_req_node<N: XmlNode>(
    node: &Element,
    reg: &mut ErrorRegister,
) -> Result<Required<N>, ModelError> {
    match node.first_child(N::ELEMENT) {
        Some(child) => Ok(Required::Value(N::read_xml(child, reg)?)),
        None => Ok(Required::Unset),
    }
}

pub(crate) fn read_opt_node<N: XmlNode>(
    node: &Element,
    reg: &mut ErrorRegister,
) -> Result<Option<N>, ModelError> {
    match node.first_child(N::ELEMENT) {
        Some(child) => Ok(Some(N::read_xml(child, reg)?)),
        None => Ok(None),
    }
}

/// Read every child element tagged `N::ELEMENT` in document order.
pub(crate) fn read_nodes<N: XmlNode>(
    node: &Element,
    reg: &mut ErrorRegister,
) -> Result<Slots<N>, ModelError> {
    let mut slots = Slots::new();
    for child in node.children_named(N::ELEMENT) {
        slots.push(N::read_xml(child, reg)?);
    }
    Ok(slots)
}
