//! SalesInvoices: commercial documents issued to customers.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::core::{
    ErrorRegister, Fault, InvoiceStatus, InvoiceType, ModelError, Required, SlotId, Slots,
    SourceBilling, WithholdingTaxType, check_range,
};
use crate::xml::Element;

use super::totals::{Currency, Settlement};
use super::{
    MSG_UNSET, Tax, XmlNode, expect_element, expect_parent, read_amount, read_date,
    read_date_time, read_int, read_nodes, read_opt_node, read_req_node, set_exclusive_amount,
    set_opt_amount, set_opt_text, set_req_amount, set_req_doc_ref, set_req_positive,
    set_req_text, write_nodes, write_opt_amount, write_opt_int, write_opt_node, write_opt_str,
    write_req_amount, write_req_date, write_req_date_time, write_req_int, write_req_node,
    write_req_str,
};

/// 4.1: SalesInvoices — entry counts, control totals and the documents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalesInvoices {
    number_of_entries: Required<u64>,
    total_debit: Required<Decimal>,
    total_credit: Required<Decimal>,
    invoices: Slots<Invoice>,
}

impl SalesInvoices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_number_of_entries(&mut self, value: u64) {
        self.number_of_entries.set(value);
    }

    pub fn number_of_entries(&self) -> Result<u64, ModelError> {
        self.number_of_entries
            .get("SalesInvoices.NumberOfEntries")
            .copied()
    }

    pub fn set_total_debit(&mut self, value: Decimal, reg: &mut ErrorRegister) -> bool {
        set_req_amount(&mut self.total_debit, "SalesInvoices.TotalDebit", value, reg)
    }

    pub fn total_debit(&self) -> Result<Decimal, ModelError> {
        self.total_debit.get("SalesInvoices.TotalDebit").copied()
    }

    pub fn set_total_credit(&mut self, value: Decimal, reg: &mut ErrorRegister) -> bool {
        set_req_amount(
            &mut self.total_credit,
            "SalesInvoices.TotalCredit",
            value,
            reg,
        )
    }

    pub fn total_credit(&self) -> Result<Decimal, ModelError> {
        self.total_credit.get("SalesInvoices.TotalCredit").copied()
    }

    pub fn add_invoice(&mut self, invoice: Invoice) -> SlotId {
        self.invoices.push(invoice)
    }

    pub fn invoice(&self, id: SlotId) -> Option<&Invoice> {
        self.invoices.get(id)
    }

    pub fn invoice_mut(&mut self, id: SlotId) -> Option<&mut Invoice> {
        self.invoices.get_mut(id)
    }

    /// Remove an invoice; its slot id stays vacant forever.
    pub fn remove_invoice(&mut self, id: SlotId) -> Option<Invoice> {
        self.invoices.remove(id)
    }

    pub fn invoices(&self) -> impl Iterator<Item = (SlotId, &Invoice)> {
        self.invoices.iter()
    }
}

impl XmlNode for SalesInvoices {
    const ELEMENT: &'static str = "SalesInvoices";
    const PARENT: &'static str = "SourceDocuments";

    fn write_xml<'a>(
        &self,
        parent: &'a mut Element,
        reg: &mut ErrorRegister,
    ) -> Result<&'a mut Element, ModelError> {
        expect_parent(parent, Self::PARENT)?;
        let node = parent.add_child(Self::ELEMENT);

        write_req_int(
            node,
            "NumberOfEntries",
            "SalesInvoices.NumberOfEntries",
            self.number_of_entries.value().copied(),
            reg,
        );
        write_req_amount(
            node,
            "TotalDebit",
            "SalesInvoices.TotalDebit",
            self.total_debit.value().copied(),
            reg,
        );
        write_req_amount(
            node,
            "TotalCredit",
            "SalesInvoices.TotalCredit",
            self.total_credit.value().copied(),
            reg,
        );
        write_nodes(node, &self.invoices, reg)?;

        Ok(node)
    }

    fn read_xml(node: &Element, reg: &mut ErrorRegister) -> Result<Self, ModelError> {
        expect_element(node, Self::ELEMENT)?;
        let mut sales = SalesInvoices::new();

        if let Some(value) = read_int(node, "NumberOfEntries", "SalesInvoices.NumberOfEntries", reg)
        {
            sales.set_number_of_entries(value);
        }
        if let Some(value) = read_amount(node, "TotalDebit", "SalesInvoices.TotalDebit", reg) {
            sales.set_total_debit(value, reg);
        }
        if let Some(value) = read_amount(node, "TotalCredit", "SalesInvoices.TotalCredit", reg) {
            sales.set_total_credit(value, reg);
        }
        sales.invoices = read_nodes(node, reg)?;

        Ok(sales)
    }
}

/// 4.1.4: one commercial document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Invoice {
    invoice_no: Required<String>,
    atcud: Option<String>,
    document_status: Required<DocumentStatus>,
    hash: Required<String>,
    hash_control: Option<String>,
    period: Option<u32>,
    invoice_date: Required<NaiveDate>,
    invoice_type: Required<InvoiceType>,
    source_id: Required<String>,
    system_entry_date: Required<NaiveDateTime>,
    customer_id: Required<String>,
    lines: Slots<Line>,
    document_totals: Required<DocumentTotals>,
    withholding_taxes: Slots<WithholdingTax>,
}

impl Invoice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unique identifier, `Type Series/Number` (e.g. `FT FT2024/35`).
    pub fn set_invoice_no(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        set_req_doc_ref(&mut self.invoice_no, "Invoice.InvoiceNo", raw, reg)
    }

    pub fn invoice_no(&self) -> Result<&str, ModelError> {
        self.invoice_no.get("Invoice.InvoiceNo").map(String::as_str)
    }

    pub fn set_atcud(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        set_opt_text(&mut self.atcud, "Invoice.ATCUD", raw, 1, 100, reg)
    }

    pub fn atcud(&self) -> Option<&str> {
        self.atcud.as_deref()
    }

    pub fn set_document_status(&mut self, status: DocumentStatus) {
        self.document_status.set(status);
    }

    pub fn document_status(&self) -> Result<&DocumentStatus, ModelError> {
        self.document_status.get("Invoice.DocumentStatus")
    }

    pub fn set_hash(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        set_req_text(&mut self.hash, "Invoice.Hash", raw, 1, 172, reg)
    }

    pub fn hash(&self) -> Result<&str, ModelError> {
        self.hash.get("Invoice.Hash").map(String::as_str)
    }

    pub fn set_hash_control(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        set_opt_text(&mut self.hash_control, "Invoice.HashControl", raw, 1, 70, reg)
    }

    pub fn hash_control(&self) -> Option<&str> {
        self.hash_control.as_deref()
    }

    /// Accounting period, month 1–12. Out of range is fatal: the period is
    /// structural, not user data.
    pub fn set_period(&mut self, period: u32) -> Result<(), ModelError> {
        check_range("Invoice.Period", i64::from(period), 1, 12)?;
        self.period = Some(period);
        Ok(())
    }

    pub fn period(&self) -> Option<u32> {
        self.period
    }

    pub fn set_invoice_date(&mut self, date: NaiveDate) {
        self.invoice_date.set(date);
    }

    pub fn invoice_date(&self) -> Result<NaiveDate, ModelError> {
        self.invoice_date.get("Invoice.InvoiceDate").copied()
    }

    pub fn set_invoice_type(&mut self, invoice_type: InvoiceType) {
        self.invoice_type.set(invoice_type);
    }

    pub fn invoice_type(&self) -> Result<InvoiceType, ModelError> {
        self.invoice_type.get("Invoice.InvoiceType").copied()
    }

    pub fn set_source_id(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        set_req_text(&mut self.source_id, "Invoice.SourceID", raw, 1, 30, reg)
    }

    pub fn source_id(&self) -> Result<&str, ModelError> {
        self.source_id.get("Invoice.SourceID").map(String::as_str)
    }

    pub fn set_system_entry_date(&mut self, date_time: NaiveDateTime) {
        self.system_entry_date.set(date_time);
    }

    pub fn system_entry_date(&self) -> Result<NaiveDateTime, ModelError> {
        self.system_entry_date
            .get("Invoice.SystemEntryDate")
            .copied()
    }

    pub fn set_customer_id(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        set_req_text(&mut self.customer_id, "Invoice.CustomerID", raw, 1, 30, reg)
    }

    pub fn customer_id(&self) -> Result<&str, ModelError> {
        self.customer_id.get("Invoice.CustomerID").map(String::as_str)
    }

    pub fn add_line(&mut self, line: Line) -> SlotId {
        self.lines.push(line)
    }

    pub fn line(&self, id: SlotId) -> Option<&Line> {
        self.lines.get(id)
    }

    pub fn remove_line(&mut self, id: SlotId) -> Option<Line> {
        self.lines.remove(id)
    }

    pub fn lines(&self) -> impl Iterator<Item = (SlotId, &Line)> {
        self.lines.iter()
    }

    pub fn set_document_totals(&mut self, totals: DocumentTotals) {
        self.document_totals.set(totals);
    }

    pub fn document_totals(&self) -> Result<&DocumentTotals, ModelError> {
        self.document_totals.get("Invoice.DocumentTotals")
    }

    pub fn add_withholding_tax(&mut self, withholding: WithholdingTax) -> SlotId {
        self.withholding_taxes.push(withholding)
    }

    pub fn withholding_taxes(&self) -> impl Iterator<Item = (SlotId, &WithholdingTax)> {
        self.withholding_taxes.iter()
    }
}

impl XmlNode for Invoice {
    const ELEMENT: &'static str = "Invoice";
    const PARENT: &'static str = "SalesInvoices";

    fn write_xml<'a>(
        &self,
        parent: &'a mut Element,
        reg: &mut ErrorRegister,
    ) -> Result<&'a mut Element, ModelError> {
        expect_parent(parent, Self::PARENT)?;
        let node = parent.add_child(Self::ELEMENT);

        write_req_str(
            node,
            "InvoiceNo",
            "Invoice.InvoiceNo",
            self.invoice_no.value().map(String::as_str),
            reg,
        );
        write_opt_str(node, "ATCUD", self.atcud.as_deref());
        write_req_node(node, "Invoice.DocumentStatus", self.document_status.value(), reg)?;
        write_req_str(
            node,
            "Hash",
            "Invoice.Hash",
            self.hash.value().map(String::as_str),
            reg,
        );
        write_opt_str(node, "HashControl", self.hash_control.as_deref());
        write_opt_int(node, "Period", self.period);
        write_req_date(
            node,
            "InvoiceDate",
            "Invoice.InvoiceDate",
            self.invoice_date.value().copied(),
            reg,
        );
        write_req_str(
            node,
            "InvoiceType",
            "Invoice.InvoiceType",
            self.invoice_type.value().map(|t| t.code()),
            reg,
        );
        write_req_str(
            node,
            "SourceID",
            "Invoice.SourceID",
            self.source_id.value().map(String::as_str),
            reg,
        );
        write_req_date_time(
            node,
            "SystemEntryDate",
            "Invoice.SystemEntryDate",
            self.system_entry_date.value().copied(),
            reg,
        );
        write_req_str(
            node,
            "CustomerID",
            "Invoice.CustomerID",
            self.customer_id.value().map(String::as_str),
            reg,
        );
        if self.lines.is_empty() {
            reg.add_on_create_xml_node(Fault::new("Invoice.Line", "document has no lines"));
        }
        write_nodes(node, &self.lines, reg)?;
        write_req_node(node, "Invoice.DocumentTotals", self.document_totals.value(), reg)?;
        write_nodes(node, &self.withholding_taxes, reg)?;

        Ok(node)
    }

    fn read_xml(node: &Element, reg: &mut ErrorRegister) -> Result<Self, ModelError> {
        expect_element(node, Self::ELEMENT)?;
        let mut invoice = Invoice::new();

        if let Some(text) = node.child_text("InvoiceNo") {
            invoice.set_invoice_no(text, reg);
        }
        if let Some(text) = node.child_text("ATCUD") {
            invoice.set_atcud(text, reg);
        }
        invoice.document_status = read_req_node(node, reg)?;
        if let Some(text) = node.child_text("Hash") {
            invoice.set_hash(text, reg);
        }
        if let Some(text) = node.child_text("HashControl") {
            invoice.set_hash_control(text, reg);
        }
        if let Some(period) = read_int(node, "Period", "Invoice.Period", reg) {
            invoice.set_period(period)?;
        }
        if let Some(date) = read_date(node, "InvoiceDate", "Invoice.InvoiceDate", reg) {
            invoice.set_invoice_date(date);
        }
        if let Some(text) = node.child_text("InvoiceType") {
            invoice.set_invoice_type(InvoiceType::from_code(text)?);
        }
        if let Some(text) = node.child_text("SourceID") {
            invoice.set_source_id(text, reg);
        }
        if let Some(date_time) =
            read_date_time(node, "SystemEntryDate", "Invoice.SystemEntryDate", reg)
        {
            invoice.set_system_entry_date(date_time);
        }
        if let Some(text) = node.child_text("CustomerID") {
            invoice.set_customer_id(text, reg);
        }
        invoice.lines = read_nodes(node, reg)?;
        invoice.document_totals = read_req_node(node, reg)?;
        invoice.withholding_taxes = read_nodes(node, reg)?;

        Ok(invoice)
    }
}

/// 4.1.4.2: commercial state of the document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentStatus {
    invoice_status: Required<InvoiceStatus>,
    invoice_status_date: Required<NaiveDateTime>,
    reason: Option<String>,
    source_id: Required<String>,
    source_billing: Required<SourceBilling>,
}

impl DocumentStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_invoice_status(&mut self, status: InvoiceStatus) {
        self.invoice_status.set(status);
    }

    pub fn invoice_status(&self) -> Result<InvoiceStatus, ModelError> {
        self.invoice_status
            .get("DocumentStatus.InvoiceStatus")
            .copied()
    }

    pub fn set_invoice_status_date(&mut self, date_time: NaiveDateTime) {
        self.invoice_status_date.set(date_time);
    }

    pub fn invoice_status_date(&self) -> Result<NaiveDateTime, ModelError> {
        self.invoice_status_date
            .get("DocumentStatus.InvoiceStatusDate")
            .copied()
    }

    pub fn set_reason(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        set_opt_text(&mut self.reason, "DocumentStatus.Reason", raw, 1, 50, reg)
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    pub fn set_source_id(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        set_req_text(&mut self.source_id, "DocumentStatus.SourceID", raw, 1, 30, reg)
    }

    pub fn source_id(&self) -> Result<&str, ModelError> {
        self.source_id
            .get("DocumentStatus.SourceID")
            .map(String::as_str)
    }

    pub fn set_source_billing(&mut self, source: SourceBilling) {
        self.source_billing.set(source);
    }

    pub fn source_billing(&self) -> Result<SourceBilling, ModelError> {
        self.source_billing
            .get("DocumentStatus.SourceBilling")
            .copied()
    }
}

impl XmlNode for DocumentStatus {
    const ELEMENT: &'static str = "DocumentStatus";
    const PARENT: &'static str = "Invoice";

    fn write_xml<'a>(
        &self,
        parent: &'a mut Element,
        reg: &mut ErrorRegister,
    ) -> Result<&'a mut Element, ModelError> {
        expect_parent(parent, Self::PARENT)?;
        let node = parent.add_child(Self::ELEMENT);

        write_req_str(
            node,
            "InvoiceStatus",
            "DocumentStatus.InvoiceStatus",
            self.invoice_status.value().map(|s| s.code()),
            reg,
        );
        write_req_date_time(
            node,
            "InvoiceStatusDate",
            "DocumentStatus.InvoiceStatusDate",
            self.invoice_status_date.value().copied(),
            reg,
        );
        write_opt_str(node, "Reason", self.reason.as_deref());
        write_req_str(
            node,
            "SourceID",
            "DocumentStatus.SourceID",
            self.source_id.value().map(String::as_str),
            reg,
        );
        write_req_str(
            node,
            "SourceBilling",
            "DocumentStatus.SourceBilling",
            self.source_billing.value().map(|s| s.code()),
            reg,
        );

        Ok(node)
    }

    fn read_xml(node: &Element, reg: &mut ErrorRegister) -> Result<Self, ModelError> {
        expect_element(node, Self::ELEMENT)?;
        let mut status = DocumentStatus::new();

        if let Some(text) = node.child_text("InvoiceStatus") {
            status.set_invoice_status(InvoiceStatus::from_code(text)?);
        }
        if let Some(date_time) = read_date_time(
            node,
            "InvoiceStatusDate",
            "DocumentStatus.InvoiceStatusDate",
            reg,
        ) {
            status.set_invoice_status_date(date_time);
        }
        if let Some(text) = node.child_text("Reason") {
            status.set_reason(text, reg);
        }
        if let Some(text) = node.child_text("SourceID") {
            status.set_source_id(text, reg);
        }
        if let Some(text) = node.child_text("SourceBilling") {
            status.set_source_billing(SourceBilling::from_code(text)?);
        }

        Ok(status)
    }
}

/// 4.1.4.18: one product or service line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Line {
    line_number: Required<u64>,
    product_code: Required<String>,
    product_description: Required<String>,
    quantity: Required<Decimal>,
    unit_of_measure: Required<String>,
    unit_price: Required<Decimal>,
    tax_point_date: Required<NaiveDate>,
    description: Required<String>,
    debit_amount: Option<Decimal>,
    credit_amount: Option<Decimal>,
    tax: Required<Tax>,
    tax_exemption_reason: Option<String>,
    tax_exemption_code: Option<String>,
    settlement_amount: Option<Decimal>,
}

impl Line {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_line_number(&mut self, value: u64, reg: &mut ErrorRegister) -> bool {
        set_req_positive(&mut self.line_number, "Line.LineNumber", value, reg)
    }

    pub fn line_number(&self) -> Result<u64, ModelError> {
        self.line_number.get("Line.LineNumber").copied()
    }

    pub fn set_product_code(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        set_req_text(&mut self.product_code, "Line.ProductCode", raw, 1, 60, reg)
    }

    pub fn product_code(&self) -> Result<&str, ModelError> {
        self.product_code.get("Line.ProductCode").map(String::as_str)
    }

    pub fn set_product_description(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        set_req_text(
            &mut self.product_description,
            "Line.ProductDescription",
            raw,
            1,
            200,
            reg,
        )
    }

    pub fn product_description(&self) -> Result<&str, ModelError> {
        self.product_description
            .get("Line.ProductDescription")
            .map(String::as_str)
    }

    pub fn set_quantity(&mut self, value: Decimal, reg: &mut ErrorRegister) -> bool {
        set_req_amount(&mut self.quantity, "Line.Quantity", value, reg)
    }

    pub fn quantity(&self) -> Result<Decimal, ModelError> {
        self.quantity.get("Line.Quantity").copied()
    }

    pub fn set_unit_of_measure(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        set_req_text(&mut self.unit_of_measure, "Line.UnitOfMeasure", raw, 1, 20, reg)
    }

    pub fn unit_of_measure(&self) -> Result<&str, ModelError> {
        self.unit_of_measure
            .get("Line.UnitOfMeasure")
            .map(String::as_str)
    }

    pub fn set_unit_price(&mut self, value: Decimal, reg: &mut ErrorRegister) -> bool {
        set_req_amount(&mut self.unit_price, "Line.UnitPrice", value, reg)
    }

    pub fn unit_price(&self) -> Result<Decimal, ModelError> {
        self.unit_price.get("Line.UnitPrice").copied()
    }

    pub fn set_tax_point_date(&mut self, date: NaiveDate) {
        self.tax_point_date.set(date);
    }

    pub fn tax_point_date(&self) -> Result<NaiveDate, ModelError> {
        self.tax_point_date.get("Line.TaxPointDate").copied()
    }

    pub fn set_description(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        set_req_text(&mut self.description, "Line.Description", raw, 1, 200, reg)
    }

    pub fn description(&self) -> Result<&str, ModelError> {
        self.description.get("Line.Description").map(String::as_str)
    }

    /// Fatal while CreditAmount is set.
    pub fn set_debit_amount(
        &mut self,
        value: Decimal,
        reg: &mut ErrorRegister,
    ) -> Result<bool, ModelError> {
        set_exclusive_amount(
            &mut self.debit_amount,
            self.credit_amount.is_some(),
            "Line.DebitAmount",
            "Line.CreditAmount",
            value,
            reg,
        )
    }

    pub fn debit_amount(&self) -> Option<Decimal> {
        self.debit_amount
    }

    pub fn clear_debit_amount(&mut self) {
        self.debit_amount = None;
    }

    /// Fatal while DebitAmount is set.
    pub fn set_credit_amount(
        &mut self,
        value: Decimal,
        reg: &mut ErrorRegister,
    ) -> Result<bool, ModelError> {
        set_exclusive_amount(
            &mut self.credit_amount,
            self.debit_amount.is_some(),
            "Line.CreditAmount",
            "Line.DebitAmount",
            value,
            reg,
        )
    }

    pub fn credit_amount(&self) -> Option<Decimal> {
        self.credit_amount
    }

    pub fn clear_credit_amount(&mut self) {
        self.credit_amount = None;
    }

    pub fn set_tax(&mut self, tax: Tax) {
        self.tax.set(tax);
    }

    pub fn tax(&self) -> Result<&Tax, ModelError> {
        self.tax.get("Line.Tax")
    }

    /// Mandatory wording when the line is exempt; at least 6 characters.
    pub fn set_tax_exemption_reason(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        set_opt_text(
            &mut self.tax_exemption_reason,
            "Line.TaxExemptionReason",
            raw,
            6,
            60,
            reg,
        )
    }

    pub fn tax_exemption_reason(&self) -> Option<&str> {
        self.tax_exemption_reason.as_deref()
    }

    pub fn set_tax_exemption_code(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        set_opt_text(
            &mut self.tax_exemption_code,
            "Line.TaxExemptionCode",
            raw,
            1,
            3,
            reg,
        )
    }

    pub fn tax_exemption_code(&self) -> Option<&str> {
        self.tax_exemption_code.as_deref()
    }

    pub fn set_settlement_amount(&mut self, value: Decimal, reg: &mut ErrorRegister) -> bool {
        set_opt_amount(
            &mut self.settlement_amount,
            "Line.SettlementAmount",
            value,
            reg,
        )
    }

    pub fn settlement_amount(&self) -> Option<Decimal> {
        self.settlement_amount
    }
}

impl XmlNode for Line {
    const ELEMENT: &'static str = "Line";
    const PARENT: &'static str = "Invoice";

    fn write_xml<'a>(
        &self,
        parent: &'a mut Element,
        reg: &mut ErrorRegister,
    ) -> Result<&'a mut Element, ModelError> {
        expect_parent(parent, Self::PARENT)?;
        let node = parent.add_child(Self::ELEMENT);

        write_req_int(
            node,
            "LineNumber",
            "Line.LineNumber",
            self.line_number.value().copied(),
            reg,
        );
        write_req_str(
            node,
            "ProductCode",
            "Line.ProductCode",
            self.product_code.value().map(String::as_str),
            reg,
        );
        write_req_str(
            node,
            "ProductDescription",
            "Line.ProductDescription",
            self.product_description.value().map(String::as_str),
            reg,
        );
        write_req_amount(
            node,
            "Quantity",
            "Line.Quantity",
            self.quantity.value().copied(),
            reg,
        );
        write_req_str(
            node,
            "UnitOfMeasure",
            "Line.UnitOfMeasure",
            self.unit_of_measure.value().map(String::as_str),
            reg,
        );
        write_req_amount(
            node,
            "UnitPrice",
            "Line.UnitPrice",
            self.unit_price.value().copied(),
            reg,
        );
        write_req_date(
            node,
            "TaxPointDate",
            "Line.TaxPointDate",
            self.tax_point_date.value().copied(),
            reg,
        );
        write_req_str(
            node,
            "Description",
            "Line.Description",
            self.description.value().map(String::as_str),
            reg,
        );
        if self.debit_amount.is_none() && self.credit_amount.is_none() {
            reg.add_on_create_xml_node(Fault::new("Line.DebitAmount/CreditAmount", MSG_UNSET));
        }
        write_opt_amount(node, "DebitAmount", self.debit_amount);
        write_opt_amount(node, "CreditAmount", self.credit_amount);
        write_req_node(node, "Line.Tax", self.tax.value(), reg)?;
        write_opt_str(node, "TaxExemptionReason", self.tax_exemption_reason.as_deref());
        write_opt_str(node, "TaxExemptionCode", self.tax_exemption_code.as_deref());
        write_opt_amount(node, "SettlementAmount", self.settlement_amount);

        Ok(node)
    }

    fn read_xml(node: &Element, reg: &mut ErrorRegister) -> Result<Self, ModelError> {
        expect_element(node, Self::ELEMENT)?;
        let mut line = Line::new();

        if let Some(value) = read_int(node, "LineNumber", "Line.LineNumber", reg) {
            line.set_line_number(value, reg);
        }
        if let Some(text) = node.child_text("ProductCode") {
            line.set_product_code(text, reg);
        }
        if let Some(text) = node.child_text("ProductDescription") {
            line.set_product_description(text, reg);
        }
        if let Some(value) = read_amount(node, "Quantity", "Line.Quantity", reg) {
            line.set_quantity(value, reg);
        }
        if let Some(text) = node.child_text("UnitOfMeasure") {
            line.set_unit_of_measure(text, reg);
        }
        if let Some(value) = read_amount(node, "UnitPrice", "Line.UnitPrice", reg) {
            line.set_unit_price(value, reg);
        }
        if let Some(date) = read_date(node, "TaxPointDate", "Line.TaxPointDate", reg) {
            line.set_tax_point_date(date);
        }
        if let Some(text) = node.child_text("Description") {
            line.set_description(text, reg);
        }
        if let Some(value) = read_amount(node, "DebitAmount", "Line.DebitAmount", reg) {
            line.set_debit_amount(value, reg)?;
        }
        if let Some(value) = read_amount(node, "CreditAmount", "Line.CreditAmount", reg) {
            line.set_credit_amount(value, reg)?;
        }
        line.tax = read_req_node(node, reg)?;
        if let Some(text) = node.child_text("TaxExemptionReason") {
            line.set_tax_exemption_reason(text, reg);
        }
        if let Some(text) = node.child_text("TaxExemptionCode") {
            line.set_tax_exemption_code(text, reg);
        }
        if let Some(value) = read_amount(node, "SettlementAmount", "Line.SettlementAmount", reg) {
            line.set_settlement_amount(value, reg);
        }

        Ok(line)
    }
}

/// 4.1.4.19: control totals of one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentTotals {
    tax_payable: Required<Decimal>,
    net_total: Required<Decimal>,
    gross_total: Required<Decimal>,
    currency: Option<Currency>,
    settlement: Option<Settlement>,
}

impl DocumentTotals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_tax_payable(&mut self, value: Decimal, reg: &mut ErrorRegister) -> bool {
        set_req_amount(&mut self.tax_payable, "DocumentTotals.TaxPayable", value, reg)
    }

    pub fn tax_payable(&self) -> Result<Decimal, ModelError> {
        self.tax_payable.get("DocumentTotals.TaxPayable").copied()
    }

    pub fn set_net_total(&mut self, value: Decimal, reg: &mut ErrorRegister) -> bool {
        set_req_amount(&mut self.net_total, "DocumentTotals.NetTotal", value, reg)
    }

    pub fn net_total(&self) -> Result<Decimal, ModelError> {
        self.net_total.get("DocumentTotals.NetTotal").copied()
    }

    pub fn set_gross_total(&mut self, value: Decimal, reg: &mut ErrorRegister) -> bool {
        set_req_amount(&mut self.gross_total, "DocumentTotals.GrossTotal", value, reg)
    }

    pub fn gross_total(&self) -> Result<Decimal, ModelError> {
        self.gross_total.get("DocumentTotals.GrossTotal").copied()
    }

    pub fn set_currency(&mut self, currency: Currency) {
        self.currency = Some(currency);
    }

    pub fn currency(&self) -> Option<&Currency> {
        self.currency.as_ref()
    }

    pub fn clear_currency(&mut self) {
        self.currency = None;
    }

    pub fn set_settlement(&mut self, settlement: Settlement) {
        self.settlement = Some(settlement);
    }

    pub fn settlement(&self) -> Option<&Settlement> {
        self.settlement.as_ref()
    }

    pub fn clear_settlement(&mut self) {
        self.settlement = None;
    }
}

impl XmlNode for DocumentTotals {
    const ELEMENT: &'static str = "DocumentTotals";
    const PARENT: &'static str = "Invoice";

    fn write_xml<'a>(
        &self,
        parent: &'a mut Element,
        reg: &mut ErrorRegister,
    ) -> Result<&'a mut Element, ModelError> {
        expect_parent(parent, Self::PARENT)?;
        let node = parent.add_child(Self::ELEMENT);

        write_req_amount(
            node,
            "TaxPayable",
            "DocumentTotals.TaxPayable",
            self.tax_payable.value().copied(),
            reg,
        );
        write_req_amount(
            node,
            "NetTotal",
            "DocumentTotals.NetTotal",
            self.net_total.value().copied(),
            reg,
        );
        write_req_amount(
            node,
            "GrossTotal",
            "DocumentTotals.GrossTotal",
            self.gross_total.value().copied(),
            reg,
        );
        write_opt_node(node, self.currency.as_ref(), reg)?;
        write_opt_node(node, self.settlement.as_ref(), reg)?;

        Ok(node)
    }

    fn read_xml(node: &Element, reg: &mut ErrorRegister) -> Result<Self, ModelError> {
        expect_element(node, Self::ELEMENT)?;
        let mut totals = DocumentTotals::new();

        if let Some(value) = read_amount(node, "TaxPayable", "DocumentTotals.TaxPayable", reg) {
            totals.set_tax_payable(value, reg);
        }
        if let Some(value) = read_amount(node, "NetTotal", "DocumentTotals.NetTotal", reg) {
            totals.set_net_total(value, reg);
        }
        if let Some(value) = read_amount(node, "GrossTotal", "DocumentTotals.GrossTotal", reg) {
            totals.set_gross_total(value, reg);
        }
        totals.currency = read_opt_node(node, reg)?;
        totals.settlement = read_opt_node(node, reg)?;

        Ok(totals)
    }
}

/// 4.1.4.20: tax withheld at source on the document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WithholdingTax {
    withholding_tax_type: Option<WithholdingTaxType>,
    withholding_tax_description: Option<String>,
    withholding_tax_amount: Required<Decimal>,
}

impl WithholdingTax {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_withholding_tax_type(&mut self, tax_type: WithholdingTaxType) {
        self.withholding_tax_type = Some(tax_type);
    }

    pub fn withholding_tax_type(&self) -> Option<WithholdingTaxType> {
        self.withholding_tax_type
    }

    pub fn set_withholding_tax_description(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        set_opt_text(
            &mut self.withholding_tax_description,
            "WithholdingTax.WithholdingTaxDescription",
            raw,
            1,
            60,
            reg,
        )
    }

    pub fn withholding_tax_description(&self) -> Option<&str> {
        self.withholding_tax_description.as_deref()
    }

    pub fn set_withholding_tax_amount(&mut self, value: Decimal, reg: &mut ErrorRegister) -> bool {
        set_req_amount(
            &mut self.withholding_tax_amount,
            "WithholdingTax.WithholdingTaxAmount",
            value,
            reg,
        )
    }

    pub fn withholding_tax_amount(&self) -> Result<Decimal, ModelError> {
        self.withholding_tax_amount
            .get("WithholdingTax.WithholdingTaxAmount")
            .copied()
    }
}

impl XmlNode for WithholdingTax {
    const ELEMENT: &'static str = "WithholdingTax";
    const PARENT: &'static str = "Invoice";

    fn write_xml<'a>(
        &self,
        parent: &'a mut Element,
        reg: &mut ErrorRegister,
    ) -> Result<&'a mut Element, ModelError> {
        expect_parent(parent, Self::PARENT)?;
        let node = parent.add_child(Self::ELEMENT);

        write_opt_str(
            node,
            "WithholdingTaxType",
            self.withholding_tax_type.map(|t| t.code()),
        );
        write_opt_str(
            node,
            "WithholdingTaxDescription",
            self.withholding_tax_description.as_deref(),
        );
        write_req_amount(
            node,
            "WithholdingTaxAmount",
            "WithholdingTax.WithholdingTaxAmount",
            self.withholding_tax_amount.value().copied(),
            reg,
        );

        Ok(node)
    }

    fn read_xml(node: &Element, reg: &mut ErrorRegister) -> Result<Self, ModelError> {
        expect_element(node, Self::ELEMENT)?;
        let mut withholding = WithholdingTax::new();

        if let Some(text) = node.child_text("WithholdingTaxType") {
            withholding.set_withholding_tax_type(WithholdingTaxType::from_code(text)?);
        }
        if let Some(text) = node.child_text("WithholdingTaxDescription") {
            withholding.set_withholding_tax_description(text, reg);
        }
        if let Some(value) = read_amount(
            node,
            "WithholdingTaxAmount",
            "WithholdingTax.WithholdingTaxAmount",
            reg,
        ) {
            withholding.set_withholding_tax_amount(value, reg);
        }

        Ok(withholding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TaxType;
    use crate::core::TaxCode;
    use rust_decimal_macros::dec;

    fn entry_date() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap()
    }

    fn sample_line(reg: &mut ErrorRegister) -> Line {
        let mut tax = Tax::new();
        tax.set_tax_type(TaxType::Vat);
        tax.set_tax_country_region("PT", reg);
        tax.set_tax_code(TaxCode::Normal);
        tax.set_tax_percentage(dec!(23), reg).unwrap();

        let mut line = Line::new();
        line.set_line_number(1, reg);
        line.set_product_code("P0001", reg);
        line.set_product_description("Consulting services", reg);
        line.set_quantity(dec!(2), reg);
        line.set_unit_of_measure("Unit", reg);
        line.set_unit_price(dec!(50), reg);
        line.set_tax_point_date(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        line.set_description("Consulting", reg);
        line.set_credit_amount(dec!(100), reg).unwrap();
        line.set_tax(tax);
        line
    }

    #[test]
    fn debit_and_credit_are_exclusive() {
        let mut reg = ErrorRegister::new();
        let mut line = Line::new();
        line.set_debit_amount(dec!(10), &mut reg).unwrap();
        let err = line.set_credit_amount(dec!(10), &mut reg).unwrap_err();
        assert!(matches!(err, ModelError::ExclusiveFields { .. }));

        line.clear_debit_amount();
        assert!(line.set_credit_amount(dec!(10), &mut reg).unwrap());
        assert!(reg.is_clean());
    }

    #[test]
    fn negative_total_is_stored_and_recorded() {
        let mut reg = ErrorRegister::new();
        let mut totals = DocumentTotals::new();
        assert!(!totals.set_gross_total(dec!(-12.30), &mut reg));
        assert_eq!(totals.gross_total().unwrap(), dec!(-12.30));
        assert_eq!(reg.on_set_value().len(), 1);
    }

    #[test]
    fn invoice_no_pattern_is_soft() {
        let mut reg = ErrorRegister::new();
        let mut invoice = Invoice::new();
        assert!(!invoice.set_invoice_no("FTFT/1", &mut reg));
        assert_eq!(invoice.invoice_no().unwrap(), "FTFT/1");
        assert_eq!(reg.on_set_value().len(), 1);
    }

    #[test]
    fn period_out_of_range_is_fatal() {
        let mut invoice = Invoice::new();
        assert!(invoice.set_period(12).is_ok());
        let err = invoice.set_period(13).unwrap_err();
        assert!(matches!(err, ModelError::OutOfRange { .. }));
        // The previous legal value survives the failed set.
        assert_eq!(invoice.period(), Some(12));
    }

    #[test]
    fn invoice_roundtrip() {
        let mut reg = ErrorRegister::new();
        let mut status = DocumentStatus::new();
        status.set_invoice_status(InvoiceStatus::Normal);
        status.set_invoice_status_date(entry_date());
        status.set_source_id("operator-1", &mut reg);
        status.set_source_billing(SourceBilling::Produced);

        let mut totals = DocumentTotals::new();
        totals.set_tax_payable(dec!(23), &mut reg);
        totals.set_net_total(dec!(100), &mut reg);
        totals.set_gross_total(dec!(123), &mut reg);

        let mut invoice = Invoice::new();
        invoice.set_invoice_no("FT FT2024/35", &mut reg);
        invoice.set_document_status(status);
        invoice.set_hash("fake-hash", &mut reg);
        invoice.set_invoice_date(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        invoice.set_invoice_type(InvoiceType::Invoice);
        invoice.set_source_id("operator-1", &mut reg);
        invoice.set_system_entry_date(entry_date());
        invoice.set_customer_id("C0001", &mut reg);
        let line = sample_line(&mut reg);
        invoice.add_line(line);
        invoice.set_document_totals(totals);

        let mut parent = Element::new("SalesInvoices");
        invoice.write_xml(&mut parent, &mut reg).unwrap();
        let back = Invoice::read_xml(parent.first_child("Invoice").unwrap(), &mut reg).unwrap();

        assert_eq!(back, invoice);
        assert!(reg.is_clean(), "unexpected faults: {reg:?}");
    }

    #[test]
    fn empty_invoice_writes_skeleton_and_records_every_missing_field() {
        let mut reg = ErrorRegister::new();
        let mut parent = Element::new("SalesInvoices");
        Invoice::new().write_xml(&mut parent, &mut reg).unwrap();

        let node = parent.first_child("Invoice").unwrap();
        for tag in [
            "InvoiceNo",
            "DocumentStatus",
            "Hash",
            "InvoiceDate",
            "InvoiceType",
            "SourceID",
            "SystemEntryDate",
            "CustomerID",
            "DocumentTotals",
        ] {
            assert!(node.first_child(tag).is_some(), "missing empty <{tag}>");
        }
        // 9 scalar/child fields plus the empty line collection.
        assert_eq!(reg.on_create_xml_node().len(), 10);
        assert!(reg.on_set_value().is_empty());
    }
}
