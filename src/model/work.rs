//! WorkingDocuments: conference documents that may precede invoicing.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::core::{
    ErrorRegister, Fault, ModelError, Required, SlotId, Slots, SourceBilling, WorkStatus,
    WorkType, check_range,
};
use crate::xml::Element;

use super::totals::Currency;
use super::{
    MSG_UNSET, Tax, XmlNode, expect_element, expect_parent, read_amount, read_date,
    read_date_time, read_int, read_nodes, read_opt_node, read_req_node, set_exclusive_amount,
    set_opt_text, set_req_amount, set_req_doc_ref, set_req_positive, set_req_text, write_nodes,
    write_opt_amount, write_opt_int, write_opt_node, write_opt_str, write_req_amount,
    write_req_date, write_req_date_time, write_req_int, write_req_node, write_req_str,
};

/// 4.3: WorkingDocuments — entry counts, control totals and the documents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkingDocuments {
    number_of_entries: Required<u64>,
    total_debit: Required<Decimal>,
    total_credit: Required<Decimal>,
    work_documents: Slots<WorkDocument>,
}

impl WorkingDocuments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_number_of_entries(&mut self, value: u64) {
        self.number_of_entries.set(value);
    }

    pub fn number_of_entries(&self) -> Result<u64, ModelError> {
        self.number_of_entries
            .get("WorkingDocuments.NumberOfEntries")
            .copied()
    }

    pub fn set_total_debit(&mut self, value: Decimal, reg: &mut ErrorRegister) -> bool {
        set_req_amount(
            &mut self.total_debit,
            "WorkingDocuments.TotalDebit",
            value,
            reg,
        )
    }

    pub fn total_debit(&self) -> Result<Decimal, ModelError> {
        self.total_debit.get("WorkingDocuments.TotalDebit").copied()
    }

    pub fn set_total_credit(&mut self, value: Decimal, reg: &mut ErrorRegister) -> bool {
        set_req_amount(
            &mut self.total_credit,
            "WorkingDocuments.TotalCredit",
            value,
            reg,
        )
    }

    pub fn total_credit(&self) -> Result<Decimal, ModelError> {
        self.total_credit
            .get("WorkingDocuments.TotalCredit")
            .copied()
    }

    pub fn add_work_document(&mut self, document: WorkDocument) -> SlotId {
        self.work_documents.push(document)
    }

    pub fn work_document(&self, id: SlotId) -> Option<&WorkDocument> {
        self.work_documents.get(id)
    }

    pub fn remove_work_document(&mut self, id: SlotId) -> Option<WorkDocument> {
        self.work_documents.remove(id)
    }

    pub fn work_documents(&self) -> impl Iterator<Item = (SlotId, &WorkDocument)> {
        self.work_documents.iter()
    }
}

impl XmlNode for WorkingDocuments {
    const ELEMENT: &'static str = "WorkingDocuments";
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
            "WorkingDocuments.NumberOfEntries",
            self.number_of_entries.value().copied(),
            reg,
        );
        write_req_amount(
            node,
            "TotalDebit",
            "WorkingDocuments.TotalDebit",
            self.total_debit.value().copied(),
            reg,
        );
        write_req_amount(
            node,
            "TotalCredit",
            "WorkingDocuments.TotalCredit",
            self.total_credit.value().copied(),
            reg,
        );
        write_nodes(node, &self.work_documents, reg)?;

        Ok(node)
    }

    fn read_xml(node: &Element, reg: &mut ErrorRegister) -> Result<Self, ModelError> {
        expect_element(node, Self::ELEMENT)?;
        let mut working = WorkingDocuments::new();

        if let Some(value) = read_int(
            node,
            "NumberOfEntries",
            "WorkingDocuments.NumberOfEntries",
            reg,
        ) {
            working.set_number_of_entries(value);
        }
        if let Some(value) = read_amount(node, "TotalDebit", "WorkingDocuments.TotalDebit", reg) {
            working.set_total_debit(value, reg);
        }
        if let Some(value) = read_amount(node, "TotalCredit", "WorkingDocuments.TotalCredit", reg)
        {
            working.set_total_credit(value, reg);
        }
        working.work_documents = read_nodes(node, reg)?;

        Ok(working)
    }
}

/// 4.3.4: one working document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkDocument {
    document_number: Required<String>,
    atcud: Option<String>,
    document_status: Required<DocumentStatus>,
    hash: Required<String>,
    hash_control: Option<String>,
    period: Option<u32>,
    work_date: Required<NaiveDate>,
    work_type: Required<WorkType>,
    source_id: Required<String>,
    system_entry_date: Required<NaiveDateTime>,
    customer_id: Required<String>,
    lines: Slots<Line>,
    document_totals: Required<DocumentTotals>,
}

impl WorkDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_document_number(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        set_req_doc_ref(
            &mut self.document_number,
            "WorkDocument.DocumentNumber",
            raw,
            reg,
        )
    }

    pub fn document_number(&self) -> Result<&str, ModelError> {
        self.document_number
            .get("WorkDocument.DocumentNumber")
            .map(String::as_str)
    }

    pub fn set_atcud(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        set_opt_text(&mut self.atcud, "WorkDocument.ATCUD", raw, 1, 100, reg)
    }

    pub fn atcud(&self) -> Option<&str> {
        self.atcud.as_deref()
    }

    pub fn set_document_status(&mut self, status: DocumentStatus) {
        self.document_status.set(status);
    }

    pub fn document_status(&self) -> Result<&DocumentStatus, ModelError> {
        self.document_status.get("WorkDocument.DocumentStatus")
    }

    pub fn set_hash(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        set_req_text(&mut self.hash, "WorkDocument.Hash", raw, 1, 172, reg)
    }

    pub fn hash(&self) -> Result<&str, ModelError> {
        self.hash.get("WorkDocument.Hash").map(String::as_str)
    }

    pub fn set_hash_control(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        set_opt_text(
            &mut self.hash_control,
            "WorkDocument.HashControl",
            raw,
            1,
            70,
            reg,
        )
    }

    pub fn hash_control(&self) -> Option<&str> {
        self.hash_control.as_deref()
    }

    /// Accounting period, month 1–12; out of range is fatal.
    pub fn set_period(&mut self, period: u32) -> Result<(), ModelError> {
        check_range("WorkDocument.Period", i64::from(period), 1, 12)?;
        self.period = Some(period);
        Ok(())
    }

    pub fn period(&self) -> Option<u32> {
        self.period
    }

    pub fn set_work_date(&mut self, date: NaiveDate) {
        self.work_date.set(date);
    }

    pub fn work_date(&self) -> Result<NaiveDate, ModelError> {
        self.work_date.get("WorkDocument.WorkDate").copied()
    }

    pub fn set_work_type(&mut self, work_type: WorkType) {
        self.work_type.set(work_type);
    }

    pub fn work_type(&self) -> Result<WorkType, ModelError> {
        self.work_type.get("WorkDocument.WorkType").copied()
    }

    pub fn set_source_id(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        set_req_text(&mut self.source_id, "WorkDocument.SourceID", raw, 1, 30, reg)
    }

    pub fn source_id(&self) -> Result<&str, ModelError> {
        self.source_id
            .get("WorkDocument.SourceID")
            .map(String::as_str)
    }

    pub fn set_system_entry_date(&mut self, date_time: NaiveDateTime) {
        self.system_entry_date.set(date_time);
    }

    pub fn system_entry_date(&self) -> Result<NaiveDateTime, ModelError> {
        self.system_entry_date
            .get("WorkDocument.SystemEntryDate")
            .copied()
    }

    pub fn set_customer_id(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        set_req_text(
            &mut self.customer_id,
            "WorkDocument.CustomerID",
            raw,
            1,
            30,
            reg,
        )
    }

    pub fn customer_id(&self) -> Result<&str, ModelError> {
        self.customer_id
            .get("WorkDocument.CustomerID")
            .map(String::as_str)
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
        self.document_totals.get("WorkDocument.DocumentTotals")
    }
}

impl XmlNode for WorkDocument {
    const ELEMENT: &'static str = "WorkDocument";
    const PARENT: &'static str = "WorkingDocuments";

    fn write_xml<'a>(
        &self,
        parent: &'a mut Element,
        reg: &mut ErrorRegister,
    ) -> Result<&'a mut Element, ModelError> {
        expect_parent(parent, Self::PARENT)?;
        let node = parent.add_child(Self::ELEMENT);

        write_req_str(
            node,
            "DocumentNumber",
            "WorkDocument.DocumentNumber",
            self.document_number.value().map(String::as_str),
            reg,
        );
        write_opt_str(node, "ATCUD", self.atcud.as_deref());
        write_req_node(
            node,
            "WorkDocument.DocumentStatus",
            self.document_status.value(),
            reg,
        )?;
        write_req_str(
            node,
            "Hash",
            "WorkDocument.Hash",
            self.hash.value().map(String::as_str),
            reg,
        );
        write_opt_str(node, "HashControl", self.hash_control.as_deref());
        write_opt_int(node, "Period", self.period);
        write_req_date(
            node,
            "WorkDate",
            "WorkDocument.WorkDate",
            self.work_date.value().copied(),
            reg,
        );
        write_req_str(
            node,
            "WorkType",
            "WorkDocument.WorkType",
            self.work_type.value().map(|t| t.code()),
            reg,
        );
        write_req_str(
            node,
            "SourceID",
            "WorkDocument.SourceID",
            self.source_id.value().map(String::as_str),
            reg,
        );
        write_req_date_time(
            node,
            "SystemEntryDate",
            "WorkDocument.SystemEntryDate",
            self.system_entry_date.value().copied(),
            reg,
        );
        write_req_str(
            node,
            "CustomerID",
            "WorkDocument.CustomerID",
            self.customer_id.value().map(String::as_str),
            reg,
        );
        if self.lines.is_empty() {
            reg.add_on_create_xml_node(Fault::new("WorkDocument.Line", "document has no lines"));
        }
        write_nodes(node, &self.lines, reg)?;
        write_req_node(
            node,
            "WorkDocument.DocumentTotals",
            self.document_totals.value(),
            reg,
        )?;

        Ok(node)
    }

    fn read_xml(node: &Element, reg: &mut ErrorRegister) -> Result<Self, ModelError> {
        expect_element(node, Self::ELEMENT)?;
        let mut document = WorkDocument::new();

        if let Some(text) = node.child_text("DocumentNumber") {
            document.set_document_number(text, reg);
        }
        if let Some(text) = node.child_text("ATCUD") {
            document.set_atcud(text, reg);
        }
        document.document_status = read_req_node(node, reg)?;
        if let Some(text) = node.child_text("Hash") {
            document.set_hash(text, reg);
        }
        if let Some(text) = node.child_text("HashControl") {
            document.set_hash_control(text, reg);
        }
        if let Some(period) = read_int(node, "Period", "WorkDocument.Period", reg) {
            document.set_period(period)?;
        }
        if let Some(date) = read_date(node, "WorkDate", "WorkDocument.WorkDate", reg) {
            document.set_work_date(date);
        }
        if let Some(text) = node.child_text("WorkType") {
            document.set_work_type(WorkType::from_code(text)?);
        }
        if let Some(text) = node.child_text("SourceID") {
            document.set_source_id(text, reg);
        }
        if let Some(date_time) =
            read_date_time(node, "SystemEntryDate", "WorkDocument.SystemEntryDate", reg)
        {
            document.set_system_entry_date(date_time);
        }
        if let Some(text) = node.child_text("CustomerID") {
            document.set_customer_id(text, reg);
        }
        document.lines = read_nodes(node, reg)?;
        document.document_totals = read_req_node(node, reg)?;

        Ok(document)
    }
}

/// 4.3.4.3: state of the working document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentStatus {
    work_status: Required<WorkStatus>,
    work_status_date: Required<NaiveDateTime>,
    reason: Option<String>,
    source_id: Required<String>,
    source_billing: Required<SourceBilling>,
}

impl DocumentStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_work_status(&mut self, status: WorkStatus) {
        self.work_status.set(status);
    }

    pub fn work_status(&self) -> Result<WorkStatus, ModelError> {
        self.work_status.get("DocumentStatus.WorkStatus").copied()
    }

    pub fn set_work_status_date(&mut self, date_time: NaiveDateTime) {
        self.work_status_date.set(date_time);
    }

    pub fn work_status_date(&self) -> Result<NaiveDateTime, ModelError> {
        self.work_status_date
            .get("DocumentStatus.WorkStatusDate")
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
    const PARENT: &'static str = "WorkDocument";

    fn write_xml<'a>(
        &self,
        parent: &'a mut Element,
        reg: &mut ErrorRegister,
    ) -> Result<&'a mut Element, ModelError> {
        expect_parent(parent, Self::PARENT)?;
        let node = parent.add_child(Self::ELEMENT);

        write_req_str(
            node,
            "WorkStatus",
            "DocumentStatus.WorkStatus",
            self.work_status.value().map(|s| s.code()),
            reg,
        );
        write_req_date_time(
            node,
            "WorkStatusDate",
            "DocumentStatus.WorkStatusDate",
            self.work_status_date.value().copied(),
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

        if let Some(text) = node.child_text("WorkStatus") {
            status.set_work_status(WorkStatus::from_code(text)?);
        }
        if let Some(date_time) =
            read_date_time(node, "WorkStatusDate", "DocumentStatus.WorkStatusDate", reg)
        {
            status.set_work_status_date(date_time);
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

/// 4.3.4.14: one line of a working document.
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
}

impl XmlNode for Line {
    const ELEMENT: &'static str = "Line";
    const PARENT: &'static str = "WorkDocument";

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

        Ok(line)
    }
}

/// 4.3.4.15: control totals of one working document. Working documents
/// carry no settlement block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentTotals {
    tax_payable: Required<Decimal>,
    net_total: Required<Decimal>,
    gross_total: Required<Decimal>,
    currency: Option<Currency>,
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
}

impl XmlNode for DocumentTotals {
    const ELEMENT: &'static str = "DocumentTotals";
    const PARENT: &'static str = "WorkDocument";

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

        Ok(totals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{TaxCode, TaxType};
    use rust_decimal_macros::dec;

    #[test]
    fn work_document_roundtrip() {
        let mut reg = ErrorRegister::new();
        let entry = NaiveDate::from_ymd_opt(2024, 5, 2)
            .unwrap()
            .and_hms_opt(16, 45, 30)
            .unwrap();

        let mut status = DocumentStatus::new();
        status.set_work_status(WorkStatus::Normal);
        status.set_work_status_date(entry);
        status.set_source_id("operator-3", &mut reg);
        status.set_source_billing(SourceBilling::Integrated);

        let mut tax = Tax::new();
        tax.set_tax_type(TaxType::Vat);
        tax.set_tax_country_region("PT-AC", &mut reg);
        tax.set_tax_code(TaxCode::Reduced);
        tax.set_tax_percentage(dec!(4), &mut reg).unwrap();

        let mut line = Line::new();
        line.set_line_number(1, &mut reg);
        line.set_product_code("SRV-01", &mut reg);
        line.set_product_description("On-site support", &mut reg);
        line.set_quantity(dec!(3), &mut reg);
        line.set_unit_of_measure("Hour", &mut reg);
        line.set_unit_price(dec!(40), &mut reg);
        line.set_tax_point_date(NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
        line.set_description("Support visit", &mut reg);
        line.set_credit_amount(dec!(120), &mut reg).unwrap();
        line.set_tax(tax);

        let mut totals = DocumentTotals::new();
        totals.set_tax_payable(dec!(4.80), &mut reg);
        totals.set_net_total(dec!(120), &mut reg);
        totals.set_gross_total(dec!(124.80), &mut reg);

        let mut document = WorkDocument::new();
        document.set_document_number("FO FO2024/12", &mut reg);
        document.set_document_status(status);
        document.set_hash("fake-hash", &mut reg);
        document.set_work_date(NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
        document.set_work_type(WorkType::Worksheet);
        document.set_source_id("operator-3", &mut reg);
        document.set_system_entry_date(entry);
        document.set_customer_id("C0002", &mut reg);
        document.add_line(line);
        document.set_document_totals(totals);

        let mut parent = Element::new("WorkingDocuments");
        document.write_xml(&mut parent, &mut reg).unwrap();
        let back =
            WorkDocument::read_xml(parent.first_child("WorkDocument").unwrap(), &mut reg).unwrap();

        assert_eq!(back, document);
        assert!(reg.is_clean(), "unexpected faults: {reg:?}");
    }
}
