//! Grouping of document references into type → series → number indexes.
//!
//! Integrity problems (duplicate numbers, references never set, references
//! that do not follow the document-number shape) are recorded as validation
//! faults; the best-effort index is always returned.

use std::collections::BTreeMap;

use crate::core::validate::doc_ref;
use crate::core::{ErrorRegister, Fault, SlotId};

use super::movement::MovementOfGoods;
use super::payments::Payments;
use super::sales::SalesInvoices;
use super::work::WorkingDocuments;

/// Sequence numbers of one series, ascending, each pointing at its slot.
pub type SeriesIndex = BTreeMap<u64, SlotId>;

/// Document type → series → sequence number → slot.
pub type DocumentIndex = BTreeMap<String, BTreeMap<String, SeriesIndex>>;

pub fn group_invoices(sales: &SalesInvoices, reg: &mut ErrorRegister) -> DocumentIndex {
    group_refs(
        "SalesInvoices.Invoice",
        sales.invoices().map(|(id, inv)| (id, inv.invoice_no().ok())),
        reg,
    )
}

pub fn group_payments(payments: &Payments, reg: &mut ErrorRegister) -> DocumentIndex {
    group_refs(
        "Payments.Payment",
        payments
            .payments()
            .map(|(id, payment)| (id, payment.payment_ref_no().ok())),
        reg,
    )
}

pub fn group_work_documents(working: &WorkingDocuments, reg: &mut ErrorRegister) -> DocumentIndex {
    group_refs(
        "WorkingDocuments.WorkDocument",
        working
            .work_documents()
            .map(|(id, doc)| (id, doc.document_number().ok())),
        reg,
    )
}

pub fn group_stock_movements(
    movement_of_goods: &MovementOfGoods,
    reg: &mut ErrorRegister,
) -> DocumentIndex {
    group_refs(
        "MovementOfGoods.StockMovement",
        movement_of_goods
            .stock_movements()
            .map(|(id, movement)| (id, movement.document_number().ok())),
        reg,
    )
}

fn group_refs<'a>(
    label: &str,
    documents: impl Iterator<Item = (SlotId, Option<&'a str>)>,
    reg: &mut ErrorRegister,
) -> DocumentIndex {
    let mut index = DocumentIndex::new();

    for (slot, reference) in documents {
        let Some(reference) = reference else {
            reg.add_validation(Fault::new(
                format!("{label}[{slot}]"),
                "document number was never set",
            ));
            continue;
        };
        let parsed = match doc_ref(reference) {
            Ok(parsed) => parsed,
            Err(fault) => {
                reg.add_validation(Fault::new(format!("{label}[{slot}]"), fault.to_string()));
                continue;
            }
        };

        let numbers = index
            .entry(parsed.doc_type)
            .or_default()
            .entry(parsed.series)
            .or_default();
        if let Some(first) = numbers.get(&parsed.number) {
            // First occurrence wins; the duplicate is only recorded.
            reg.add_validation(Fault::new(
                format!("{label}[{slot}]"),
                format!("duplicate document number '{reference}' (first at slot {first})"),
            ));
        } else {
            numbers.insert(parsed.number, slot);
        }
    }

    index
}
