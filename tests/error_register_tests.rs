//! The soft/fatal contract, law by law.

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use saft_pt::model::{payments, sales};
use saft_pt::xml::Element;
use saft_pt::{ErrorRegister, ModelError, Tax, XmlNode};

#[test]
fn truncation_is_silent_and_exact() {
    let mut reg = ErrorRegister::new();
    let mut invoice = sales::Invoice::new();

    let long = "operator-".repeat(12);
    assert!(long.chars().count() > 30);
    assert!(invoice.set_source_id(&long, &mut reg));

    assert_eq!(invoice.source_id().unwrap().chars().count(), 30);
    assert!(reg.is_clean(), "over-length alone must not record a fault");
}

#[test]
fn pattern_failure_records_exactly_one_fault_and_keeps_the_value() {
    let mut reg = ErrorRegister::new();
    let mut invoice = sales::Invoice::new();

    assert!(!invoice.set_invoice_no("FTFT/1", &mut reg));

    assert_eq!(invoice.invoice_no().unwrap(), "FTFT/1");
    assert_eq!(reg.on_set_value().len(), 1);
    assert_eq!(reg.on_set_value()[0].field, "Invoice.InvoiceNo");
    assert!(reg.on_create_xml_node().is_empty());
    assert!(reg.validation().is_empty());
}

#[test]
fn mutual_exclusion_is_fatal_until_the_sibling_is_cleared() {
    let mut reg = ErrorRegister::new();
    let mut line = sales::Line::new();

    line.set_debit_amount(dec!(10), &mut reg).unwrap();
    let err = line.set_credit_amount(dec!(20), &mut reg).unwrap_err();
    assert!(matches!(
        err,
        ModelError::ExclusiveFields {
            field: "Line.CreditAmount",
            other: "Line.DebitAmount",
        }
    ));
    // Nothing was stored and nothing was recorded.
    assert_eq!(line.credit_amount(), None);
    assert!(reg.is_clean());

    line.clear_debit_amount();
    assert!(line.set_credit_amount(dec!(20), &mut reg).unwrap());
    assert_eq!(line.credit_amount(), Some(dec!(20)));
}

#[test]
fn negative_monetary_fields_store_record_and_never_throw() {
    let mut reg = ErrorRegister::new();

    let mut totals = sales::DocumentTotals::new();
    assert!(!totals.set_gross_total(dec!(-1), &mut reg));
    assert!(!totals.set_net_total(dec!(-2), &mut reg));
    assert!(!totals.set_tax_payable(dec!(-3), &mut reg));
    assert_eq!(totals.gross_total().unwrap(), dec!(-1));
    assert_eq!(totals.net_total().unwrap(), dec!(-2));
    assert_eq!(totals.tax_payable().unwrap(), dec!(-3));

    let mut line = sales::Line::new();
    assert!(!line.set_settlement_amount(dec!(-4), &mut reg));
    assert_eq!(line.settlement_amount(), Some(dec!(-4)));

    let mut withholding = sales::WithholdingTax::new();
    assert!(!withholding.set_withholding_tax_amount(dec!(-5), &mut reg));
    assert_eq!(withholding.withholding_tax_amount().unwrap(), dec!(-5));

    assert_eq!(reg.on_set_value().len(), 5);
}

#[test]
fn negative_values_still_serialize() {
    let mut reg = ErrorRegister::new();
    let mut totals = sales::DocumentTotals::new();
    totals.set_tax_payable(dec!(0), &mut reg);
    totals.set_net_total(dec!(10), &mut reg);
    totals.set_gross_total(dec!(-12.30), &mut reg);

    let mut parent = Element::new("Invoice");
    totals.write_xml(&mut parent, &mut reg).unwrap();

    let node = parent.first_child("DocumentTotals").unwrap();
    assert_eq!(node.child_text("GrossTotal"), Some("-12.30"));
}

#[test]
fn missing_required_fields_emit_empty_elements_one_fault_each() {
    let mut reg = ErrorRegister::new();
    let mut parent = Element::new("Invoice");
    sales::DocumentStatus::new()
        .write_xml(&mut parent, &mut reg)
        .unwrap();

    let node = parent.first_child("DocumentStatus").unwrap();
    for tag in ["InvoiceStatus", "InvoiceStatusDate", "SourceID", "SourceBilling"] {
        let child = node.first_child(tag).unwrap_or_else(|| panic!("no <{tag}>"));
        assert_eq!(child.text(), None);
    }
    assert_eq!(reg.on_create_xml_node().len(), 4);
    assert!(reg.on_set_value().is_empty());
}

#[test]
fn read_before_write_is_fatal() {
    let invoice = sales::Invoice::new();
    let err = invoice.invoice_no().unwrap_err();
    assert!(matches!(err, ModelError::UnsetField("Invoice.InvoiceNo")));
}

#[test]
fn unknown_code_aborts_a_parse() {
    let mut reg = ErrorRegister::new();
    let node = Element::parse(
        "<Tax><TaxType>XYZ</TaxType><TaxCountryRegion>PT</TaxCountryRegion></Tax>",
    )
    .unwrap();
    let err = Tax::read_xml(&node, &mut reg).unwrap_err();
    assert!(matches!(err, ModelError::UnknownCode { kind: "TaxType", .. }));
}

#[test]
fn malformed_scalars_degrade_to_recorded_faults() {
    let mut reg = ErrorRegister::new();
    let node = Element::parse(
        "<PaymentMethod>\
           <PaymentAmount>twelve</PaymentAmount>\
           <PaymentDate>02-07-2024</PaymentDate>\
         </PaymentMethod>",
    )
    .unwrap();

    let method = payments::PaymentMethod::read_xml(&node, &mut reg).unwrap();
    assert!(method.payment_amount().is_err());
    assert!(method.payment_date().is_err());
    assert_eq!(reg.on_set_value().len(), 2);
}

#[test]
fn period_is_fatal_on_parse_too() {
    let mut reg = ErrorRegister::new();
    let node = Element::parse("<Invoice><Period>13</Period></Invoice>").unwrap();
    let err = sales::Invoice::read_xml(&node, &mut reg).unwrap_err();
    assert!(matches!(err, ModelError::OutOfRange { .. }));
}

#[test]
fn parse_applies_the_same_validators_as_setters() {
    let mut reg = ErrorRegister::new();
    let node = Element::parse(
        "<Invoice><InvoiceNo>FTFT/1</InvoiceNo></Invoice>",
    )
    .unwrap();

    let invoice = sales::Invoice::read_xml(&node, &mut reg).unwrap();
    assert_eq!(invoice.invoice_no().unwrap(), "FTFT/1");
    assert_eq!(
        reg.on_set_value()
            .iter()
            .filter(|f| f.field == "Invoice.InvoiceNo")
            .count(),
        1
    );
}

#[test]
fn register_survives_until_explicitly_cleared() {
    let mut reg = ErrorRegister::new();
    let mut invoice = sales::Invoice::new();
    invoice.set_invoice_no("bad", &mut reg);
    assert!(!reg.is_clean());

    // A new build against the same register accumulates, not replaces.
    let mut other = sales::Invoice::new();
    other.set_invoice_no("also bad", &mut reg);
    assert_eq!(reg.on_set_value().len(), 2);

    reg.clear();
    assert!(reg.is_clean());
}

#[test]
fn error_report_serializes_to_json() {
    let mut reg = ErrorRegister::new();
    let mut line = sales::Line::new();
    line.set_settlement_amount(dec!(-1), &mut reg);

    let report = serde_json::to_value(&reg).unwrap();
    assert_eq!(report["on_set_value"][0]["field"], "Line.SettlementAmount");
    assert!(report["validation"].as_array().unwrap().is_empty());
}

#[test]
fn short_exemption_reason_is_soft_but_kept() {
    let mut reg = ErrorRegister::new();
    let mut line = sales::Line::new();

    assert!(!line.set_tax_exemption_reason("IVA", &mut reg));
    assert_eq!(line.tax_exemption_reason(), Some("IVA"));
    assert_eq!(reg.on_set_value().len(), 1);
    assert!(reg.on_set_value()[0].message.contains("minimum length 6"));
}

#[test]
fn one_invoice_date_set_to_empty_string_reads_back_unset() {
    // An empty element written for an unset scalar parses back to unset,
    // keeping unpopulated nodes stable across a round trip.
    let mut reg = ErrorRegister::new();
    let mut parent = Element::new("SalesInvoices");
    sales::Invoice::new().write_xml(&mut parent, &mut reg).unwrap();

    let node = parent.first_child("Invoice").unwrap();
    let back = sales::Invoice::read_xml(node, &mut reg).unwrap();
    assert!(back.invoice_date().is_err());
    assert!(back.invoice_no().is_err());
}
