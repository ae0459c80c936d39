//! Full-document round trips: build → serialize → parse → compare, and
//! serialize again for byte equality.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal_macros::dec;
use saft_pt::model::{movement, payments, sales, work};
use saft_pt::{
    AuditFile, CompanyAddress, ErrorRegister, Header, InvoiceStatus, InvoiceType, MovementStatus,
    MovementType, PaymentMechanism, PaymentStatus, PaymentType, SourceBilling, SourceDocuments,
    SourcePayment, Tax, TaxAccountingBasis, TaxCode, TaxType, WithholdingTaxType, WorkStatus,
    WorkType,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn date_time(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(h, min, s).unwrap()
}

fn build_header(reg: &mut ErrorRegister) -> Header {
    let mut address = CompanyAddress::new();
    address.set_street_name("Rua das Flores", reg);
    address.set_building_number("10", reg);
    address.set_address_detail("Rua das Flores 10, 2.º Esq.", reg);
    address.set_city("Lisboa", reg);
    address.set_postal_code("1000-205", reg);
    address.set_country("PT", reg);

    let mut header = Header::new();
    header.set_audit_file_version("1.04_01", reg);
    header.set_company_id("Conservatória do Registo Comercial 509876543", reg);
    header.set_tax_registration_number(509_876_543, reg);
    header.set_tax_accounting_basis(TaxAccountingBasis::Invoicing);
    header.set_company_name("Empresa Exemplo Lda", reg);
    header.set_company_address(address);
    header.set_fiscal_year(2024).unwrap();
    header.set_start_date(date(2024, 1, 1));
    header.set_end_date(date(2024, 12, 31));
    header.set_currency_code("EUR", reg);
    header.set_date_created(date(2025, 1, 10));
    header.set_tax_entity("Global", reg);
    header.set_product_company_tax_id("598765432", reg);
    header.set_software_certificate_number(9999);
    header.set_product_id("Faturador/Empresa Software", reg);
    header.set_product_version("2.4.1", reg);
    header.set_telephone("211234567", reg);
    header
}

fn standard_tax(reg: &mut ErrorRegister) -> Tax {
    let mut tax = Tax::new();
    tax.set_tax_type(TaxType::Vat);
    tax.set_tax_country_region("PT", reg);
    tax.set_tax_code(TaxCode::Normal);
    tax.set_tax_percentage(dec!(23), reg).unwrap();
    tax
}

fn build_sales(reg: &mut ErrorRegister) -> sales::SalesInvoices {
    let mut status = sales::DocumentStatus::new();
    status.set_invoice_status(InvoiceStatus::Normal);
    status.set_invoice_status_date(date_time(2024, 6, 15, 10, 30, 0));
    status.set_source_id("operator-1", reg);
    status.set_source_billing(SourceBilling::Produced);

    let mut first = sales::Line::new();
    first.set_line_number(1, reg);
    first.set_product_code("SRV-CONS", reg);
    first.set_product_description("Consultoria", reg);
    first.set_quantity(dec!(10), reg);
    first.set_unit_of_measure("Hour", reg);
    first.set_unit_price(dec!(75), reg);
    first.set_tax_point_date(date(2024, 6, 15));
    first.set_description("Consultoria de junho", reg);
    first.set_credit_amount(dec!(750), reg).unwrap();
    first.set_tax(standard_tax(reg));

    let mut exempt_tax = Tax::new();
    exempt_tax.set_tax_type(TaxType::Vat);
    exempt_tax.set_tax_country_region("PT", reg);
    exempt_tax.set_tax_code(TaxCode::Exempt);
    exempt_tax.set_tax_percentage(dec!(0), reg).unwrap();

    let mut second = sales::Line::new();
    second.set_line_number(2, reg);
    second.set_product_code("SRV-FORM", reg);
    second.set_product_description("Formação", reg);
    second.set_quantity(dec!(1), reg);
    second.set_unit_of_measure("Unit", reg);
    second.set_unit_price(dec!(250), reg);
    second.set_tax_point_date(date(2024, 6, 15));
    second.set_description("Formação certificada", reg);
    second.set_credit_amount(dec!(250), reg).unwrap();
    second.set_tax(exempt_tax);
    second.set_tax_exemption_reason("Artigo 9.º do CIVA", reg);
    second.set_tax_exemption_code("M07", reg);
    second.set_settlement_amount(dec!(12.50), reg);

    let mut settlement = saft_pt::Settlement::new();
    settlement.set_settlement_discount("2%", reg);
    settlement.set_settlement_amount(dec!(12.50), reg);
    settlement.set_settlement_date(date(2024, 7, 15));
    settlement.set_payment_terms("30 dias", reg);

    let mut totals = sales::DocumentTotals::new();
    totals.set_tax_payable(dec!(172.50), reg);
    totals.set_net_total(dec!(1000), reg);
    totals.set_gross_total(dec!(1172.50), reg);
    totals.set_settlement(settlement);

    let mut withholding = sales::WithholdingTax::new();
    withholding.set_withholding_tax_type(WithholdingTaxType::PersonalIncome);
    withholding.set_withholding_tax_description("Retenção IRS", reg);
    withholding.set_withholding_tax_amount(dec!(75), reg);

    let mut invoice = sales::Invoice::new();
    invoice.set_invoice_no("FT FT2024/35", reg);
    invoice.set_atcud("CSDF7T5H-35", reg);
    invoice.set_document_status(status);
    invoice.set_hash("vCm1", reg);
    invoice.set_hash_control("1", reg);
    invoice.set_period(6).unwrap();
    invoice.set_invoice_date(date(2024, 6, 15));
    invoice.set_invoice_type(InvoiceType::Invoice);
    invoice.set_source_id("operator-1", reg);
    invoice.set_system_entry_date(date_time(2024, 6, 15, 10, 30, 0));
    invoice.set_customer_id("C0001", reg);
    invoice.add_line(first);
    invoice.add_line(second);
    invoice.set_document_totals(totals);
    invoice.add_withholding_tax(withholding);

    let mut sales_invoices = sales::SalesInvoices::new();
    sales_invoices.set_number_of_entries(1);
    sales_invoices.set_total_debit(dec!(0), reg);
    sales_invoices.set_total_credit(dec!(1000), reg);
    sales_invoices.add_invoice(invoice);
    sales_invoices
}

fn build_payments(reg: &mut ErrorRegister) -> payments::Payments {
    let mut status = payments::DocumentStatus::new();
    status.set_payment_status(PaymentStatus::Normal);
    status.set_payment_status_date(date_time(2024, 7, 2, 9, 15, 0));
    status.set_source_id("operator-2", reg);
    status.set_source_payment(SourcePayment::Produced);

    let mut method = payments::PaymentMethod::new();
    method.set_payment_mechanism(PaymentMechanism::BankTransfer);
    method.set_payment_amount(dec!(1172.50), reg);
    method.set_payment_date(date(2024, 7, 2));

    let mut source = payments::SourceDocumentID::new();
    source.set_originating_on("FT FT2024/35", reg);
    source.set_invoice_date(date(2024, 6, 15));
    source.set_description("Fatura de junho", reg);

    let mut line = payments::Line::new();
    line.set_line_number(1, reg);
    line.add_source_document_id(source);
    line.set_credit_amount(dec!(1000), reg).unwrap();

    let mut totals = payments::DocumentTotals::new();
    totals.set_tax_payable(dec!(172.50), reg);
    totals.set_net_total(dec!(1000), reg);
    totals.set_gross_total(dec!(1172.50), reg);

    let mut payment = payments::Payment::new();
    payment.set_payment_ref_no("RC RC2024/7", reg);
    payment.set_period(7).unwrap();
    payment.set_transaction_date(date(2024, 7, 2));
    payment.set_payment_type(PaymentType::OtherReceipt);
    payment.set_description("Recebimento por transferência", reg);
    payment.set_document_status(status);
    payment.add_payment_method(method);
    payment.set_source_id("operator-2", reg);
    payment.set_system_entry_date(date_time(2024, 7, 2, 9, 15, 0));
    payment.set_customer_id("C0001", reg);
    payment.add_line(line);
    payment.set_document_totals(totals);

    let mut payments_block = payments::Payments::new();
    payments_block.set_number_of_entries(1);
    payments_block.set_total_debit(dec!(0), reg);
    payments_block.set_total_credit(dec!(1000), reg);
    payments_block.add_payment(payment);
    payments_block
}

fn build_working_documents(reg: &mut ErrorRegister) -> work::WorkingDocuments {
    let mut status = work::DocumentStatus::new();
    status.set_work_status(WorkStatus::Normal);
    status.set_work_status_date(date_time(2024, 5, 20, 14, 0, 0));
    status.set_source_id("operator-1", reg);
    status.set_source_billing(SourceBilling::Produced);

    let mut line = work::Line::new();
    line.set_line_number(1, reg);
    line.set_product_code("SRV-CONS", reg);
    line.set_product_description("Consultoria", reg);
    line.set_quantity(dec!(10), reg);
    line.set_unit_of_measure("Hour", reg);
    line.set_unit_price(dec!(75), reg);
    line.set_tax_point_date(date(2024, 5, 20));
    line.set_description("Proposta de consultoria", reg);
    line.set_credit_amount(dec!(750), reg).unwrap();
    line.set_tax(standard_tax(reg));

    let mut totals = work::DocumentTotals::new();
    totals.set_tax_payable(dec!(172.50), reg);
    totals.set_net_total(dec!(750), reg);
    totals.set_gross_total(dec!(922.50), reg);

    let mut document = work::WorkDocument::new();
    document.set_document_number("PF PF2024/2", reg);
    document.set_document_status(status);
    document.set_hash("vCm1", reg);
    document.set_work_date(date(2024, 5, 20));
    document.set_work_type(WorkType::ProForma);
    document.set_source_id("operator-1", reg);
    document.set_system_entry_date(date_time(2024, 5, 20, 14, 0, 0));
    document.set_customer_id("C0001", reg);
    document.add_line(line);
    document.set_document_totals(totals);

    let mut working = work::WorkingDocuments::new();
    working.set_number_of_entries(1);
    working.set_total_debit(dec!(0), reg);
    working.set_total_credit(dec!(750), reg);
    working.add_work_document(document);
    working
}

fn build_movement_of_goods(reg: &mut ErrorRegister) -> movement::MovementOfGoods {
    let mut status = movement::DocumentStatus::new();
    status.set_movement_status(MovementStatus::Normal);
    status.set_movement_status_date(date_time(2024, 3, 4, 8, 0, 0));
    status.set_source_id("operator-4", reg);
    status.set_source_billing(SourceBilling::Produced);

    let mut line = movement::Line::new();
    line.set_line_number(1, reg);
    line.set_product_code("GOODS-9", reg);
    line.set_product_description("Peças em caixa", reg);
    line.set_quantity(dec!(12), reg);
    line.set_unit_of_measure("Box", reg);
    line.set_unit_price(dec!(7.25), reg);

    let mut stock_movement = movement::StockMovement::new();
    stock_movement.set_document_number("GT GT2024/3", reg);
    stock_movement.set_document_status(status);
    stock_movement.set_hash("vCm1", reg);
    stock_movement.set_movement_date(date(2024, 3, 4));
    stock_movement.set_movement_type(MovementType::TransportGuide);
    stock_movement.set_system_entry_date(date_time(2024, 3, 4, 7, 45, 0));
    stock_movement.set_customer_id("C0001", reg).unwrap();
    stock_movement.set_source_id("operator-4", reg);
    stock_movement.set_movement_start_time(date_time(2024, 3, 4, 8, 0, 0));
    stock_movement.set_movement_end_time(date_time(2024, 3, 4, 17, 0, 0));
    stock_movement.add_line(line);

    let mut movement_of_goods = movement::MovementOfGoods::new();
    movement_of_goods.set_number_of_movement_lines(1);
    movement_of_goods.set_total_quantity_issued(dec!(12), reg);
    movement_of_goods.add_stock_movement(stock_movement);
    movement_of_goods
}

fn build_audit_file(reg: &mut ErrorRegister) -> AuditFile {
    let mut source = SourceDocuments::new();
    source.set_sales_invoices(build_sales(reg));
    source.set_movement_of_goods(build_movement_of_goods(reg));
    source.set_working_documents(build_working_documents(reg));
    source.set_payments(build_payments(reg));

    let mut audit_file = AuditFile::new();
    audit_file.set_header(build_header(reg));
    audit_file.set_source_documents(source);
    audit_file
}

#[test]
fn full_document_roundtrip_is_field_equal_and_byte_stable() {
    let mut reg = ErrorRegister::new();
    let audit_file = build_audit_file(&mut reg);
    assert!(reg.is_clean(), "build left faults: {reg:?}");

    let first = audit_file.to_xml_string(&mut reg).unwrap();
    assert!(reg.is_clean(), "serialize left faults: {reg:?}");

    let reparsed = AuditFile::from_xml_str(&first, &mut reg).unwrap();
    assert!(reg.is_clean(), "parse left faults: {reg:?}");
    assert_eq!(reparsed, audit_file);

    let second = reparsed.to_xml_string(&mut reg).unwrap();
    assert_eq!(second, first);
}

#[test]
fn serialized_document_declares_the_namespace() {
    let mut reg = ErrorRegister::new();
    let audit_file = build_audit_file(&mut reg);
    let xml = audit_file.to_xml_string(&mut reg).unwrap();

    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(xml.contains("urn:OECD:StandardAuditFile-Tax:PT_1.04_01"));
    assert!(xml.contains("<SourceDocuments>"));
    assert!(xml.contains("<SettlementAmount>12.50</SettlementAmount>"));
    assert!(xml.contains("<WithholdingTaxAmount>75.00</WithholdingTaxAmount>"));
}

#[test]
fn amounts_serialize_in_fixed_notation() {
    let mut reg = ErrorRegister::new();
    let audit_file = build_audit_file(&mut reg);
    let xml = audit_file.to_xml_string(&mut reg).unwrap();

    // Whole numbers always carry two decimal places.
    assert!(xml.contains("<GrossTotal>1172.50</GrossTotal>"));
    assert!(xml.contains("<NetTotal>1000.00</NetTotal>"));
    assert!(xml.contains("<UnitPrice>75.00</UnitPrice>"));
}

#[test]
fn unset_slots_do_not_resurrect_after_roundtrip() {
    let mut reg = ErrorRegister::new();
    let mut audit_file = build_audit_file(&mut reg);

    // Remove the invoice's second line; the gap must not reappear.
    let sales_invoices = audit_file
        .source_documents_mut()
        .unwrap()
        .sales_invoices_mut()
        .unwrap();
    let invoice_id = sales_invoices.invoices().next().unwrap().0;
    let invoice = sales_invoices.invoice_mut(invoice_id).unwrap();
    let second_line = invoice.lines().nth(1).unwrap().0;
    invoice.remove_line(second_line);
    assert_eq!(invoice.lines().count(), 1);

    let xml = audit_file.to_xml_string(&mut reg).unwrap();
    let reparsed = AuditFile::from_xml_str(&xml, &mut reg).unwrap();
    assert_eq!(reparsed, audit_file);

    let reparsed_lines = reparsed
        .source_documents()
        .unwrap()
        .sales_invoices()
        .unwrap()
        .invoices()
        .next()
        .unwrap()
        .1
        .lines()
        .count();
    assert_eq!(reparsed_lines, 1);
    assert!(reg.is_clean());
}
