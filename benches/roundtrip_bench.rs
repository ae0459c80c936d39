use chrono::NaiveDate;
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rust_decimal_macros::dec;
use saft_pt::model::sales;
use saft_pt::{
    AuditFile, CompanyAddress, ErrorRegister, Header, InvoiceStatus, InvoiceType, SourceBilling,
    SourceDocuments, Tax, TaxAccountingBasis, TaxCode, TaxType,
};

fn build_audit_file(invoice_count: usize) -> AuditFile {
    let mut reg = ErrorRegister::new();
    let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
    let entry = date.and_hms_opt(10, 30, 0).unwrap();

    let mut address = CompanyAddress::new();
    address.set_address_detail("Rua das Flores 10", &mut reg);
    address.set_city("Lisboa", &mut reg);
    address.set_postal_code("1000-205", &mut reg);
    address.set_country("PT", &mut reg);

    let mut header = Header::new();
    header.set_audit_file_version("1.04_01", &mut reg);
    header.set_company_id("509876543", &mut reg);
    header.set_tax_registration_number(509_876_543, &mut reg);
    header.set_tax_accounting_basis(TaxAccountingBasis::Invoicing);
    header.set_company_name("Empresa Exemplo Lda", &mut reg);
    header.set_company_address(address);
    header.set_fiscal_year(2024).unwrap();
    header.set_start_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    header.set_end_date(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
    header.set_currency_code("EUR", &mut reg);
    header.set_date_created(date);
    header.set_tax_entity("Global", &mut reg);
    header.set_product_company_tax_id("598765432", &mut reg);
    header.set_software_certificate_number(9999);
    header.set_product_id("Faturador/Empresa Software", &mut reg);
    header.set_product_version("2.4.1", &mut reg);

    let mut sales_invoices = sales::SalesInvoices::new();
    sales_invoices.set_number_of_entries(invoice_count as u64);
    sales_invoices.set_total_debit(dec!(0), &mut reg);
    sales_invoices
        .set_total_credit(dec!(100) * rust_decimal::Decimal::from(invoice_count as u64), &mut reg);

    for n in 1..=invoice_count {
        let mut tax = Tax::new();
        tax.set_tax_type(TaxType::Vat);
        tax.set_tax_country_region("PT", &mut reg);
        tax.set_tax_code(TaxCode::Normal);
        tax.set_tax_percentage(dec!(23), &mut reg).unwrap();

        let mut line = sales::Line::new();
        line.set_line_number(1, &mut reg);
        line.set_product_code("SRV-CONS", &mut reg);
        line.set_product_description("Consultoria", &mut reg);
        line.set_quantity(dec!(1), &mut reg);
        line.set_unit_of_measure("Unit", &mut reg);
        line.set_unit_price(dec!(100), &mut reg);
        line.set_tax_point_date(date);
        line.set_description("Consultoria", &mut reg);
        line.set_credit_amount(dec!(100), &mut reg).unwrap();
        line.set_tax(tax);

        let mut status = sales::DocumentStatus::new();
        status.set_invoice_status(InvoiceStatus::Normal);
        status.set_invoice_status_date(entry);
        status.set_source_id("operator-1", &mut reg);
        status.set_source_billing(SourceBilling::Produced);

        let mut totals = sales::DocumentTotals::new();
        totals.set_tax_payable(dec!(23), &mut reg);
        totals.set_net_total(dec!(100), &mut reg);
        totals.set_gross_total(dec!(123), &mut reg);

        let mut invoice = sales::Invoice::new();
        invoice.set_invoice_no(&format!("FT FT2024/{n}"), &mut reg);
        invoice.set_document_status(status);
        invoice.set_hash("vCm1", &mut reg);
        invoice.set_invoice_date(date);
        invoice.set_invoice_type(InvoiceType::Invoice);
        invoice.set_source_id("operator-1", &mut reg);
        invoice.set_system_entry_date(entry);
        invoice.set_customer_id("C0001", &mut reg);
        invoice.add_line(line);
        invoice.set_document_totals(totals);
        sales_invoices.add_invoice(invoice);
    }

    let mut source = SourceDocuments::new();
    source.set_sales_invoices(sales_invoices);

    let mut audit_file = AuditFile::new();
    audit_file.set_header(header);
    audit_file.set_source_documents(source);

    assert!(reg.is_clean());
    audit_file
}

fn bench_roundtrip(c: &mut Criterion) {
    let audit_file = build_audit_file(100);
    let mut reg = ErrorRegister::new();
    let xml = audit_file.to_xml_string(&mut reg).unwrap();

    c.bench_function("serialize_100_invoices", |b| {
        b.iter(|| {
            let mut reg = ErrorRegister::new();
            black_box(audit_file.to_xml_string(&mut reg).unwrap())
        })
    });

    c.bench_function("parse_100_invoices", |b| {
        b.iter(|| {
            let mut reg = ErrorRegister::new();
            black_box(AuditFile::from_xml_str(&xml, &mut reg).unwrap())
        })
    });
}

criterion_group!(benches, bench_roundtrip);
criterion_main!(benches);
