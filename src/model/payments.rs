//! Payments: receipts issued against sales documents.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::core::{
    ErrorRegister, Fault, ModelError, PaymentMechanism, PaymentStatus, PaymentType, Required,
    SlotId, Slots, SourcePayment, check_range,
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

/// 4.4: Payments — entry counts, control totals and the receipts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payments {
    number_of_entries: Required<u64>,
    total_debit: Required<Decimal>,
    total_credit: Required<Decimal>,
    payments: Slots<Payment>,
}

impl Payments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_number_of_entries(&mut self, value: u64) {
        self.number_of_entries.set(value);
    }

    pub fn number_of_entries(&self) -> Result<u64, ModelError> {
        self.number_of_entries
            .get("Payments.NumberOfEntries")
            .copied()
    }

    pub fn set_total_debit(&mut self, value: Decimal, reg: &mut ErrorRegister) -> bool {
        set_req_amount(&mut self.total_debit, "Payments.TotalDebit", value, reg)
    }

    pub fn total_debit(&self) -> Result<Decimal, ModelError> {
        self.total_debit.get("Payments.TotalDebit").copied()
    }

    pub fn set_total_credit(&mut self, value: Decimal, reg: &mut ErrorRegister) -> bool {
        set_req_amount(&mut self.total_credit, "Payments.TotalCredit", value, reg)
    }

    pub fn total_credit(&self) -> Result<Decimal, ModelError> {
        self.total_credit.get("Payments.TotalCredit").copied()
    }

    pub fn add_payment(&mut self, payment: Payment) -> SlotId {
        self.payments.push(payment)
    }

    pub fn payment(&self, id: SlotId) -> Option<&Payment> {
        self.payments.get(id)
    }

    pub fn payment_mut(&mut self, id: SlotId) -> Option<&mut Payment> {
        self.payments.get_mut(id)
    }

    pub fn remove_payment(&mut self, id: SlotId) -> Option<Payment> {
        self.payments.remove(id)
    }

    pub fn payments(&self) -> impl Iterator<Item = (SlotId, &Payment)> {
        self.payments.iter()
    }
}

impl XmlNode for Payments {
    const ELEMENT: &'static str = "Payments";
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
            "Payments.NumberOfEntries",
            self.number_of_entries.value().copied(),
            reg,
        );
        write_req_amount(
            node,
            "TotalDebit",
            "Payments.TotalDebit",
            self.total_debit.value().copied(),
            reg,
        );
        write_req_amount(
            node,
            "TotalCredit",
            "Payments.TotalCredit",
            self.total_credit.value().copied(),
            reg,
        );
        write_nodes(node, &self.payments, reg)?;

        Ok(node)
    }

    fn read_xml(node: &Element, reg: &mut ErrorRegister) -> Result<Self, ModelError> {
        expect_element(node, Self::ELEMENT)?;
        let mut payments = Payments::new();

        if let Some(value) = read_int(node, "NumberOfEntries", "Payments.NumberOfEntries", reg) {
            payments.set_number_of_entries(value);
        }
        if let Some(value) = read_amount(node, "TotalDebit", "Payments.TotalDebit", reg) {
            payments.set_total_debit(value, reg);
        }
        if let Some(value) = read_amount(node, "TotalCredit", "Payments.TotalCredit", reg) {
            payments.set_total_credit(value, reg);
        }
        payments.payments = read_nodes(node, reg)?;

        Ok(payments)
    }
}

/// 4.4.4: one receipt.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payment {
    payment_ref_no: Required<String>,
    atcud: Option<String>,
    period: Option<u32>,
    transaction_date: Required<NaiveDate>,
    payment_type: Required<PaymentType>,
    description: Option<String>,
    system_id: Option<String>,
    document_status: Required<DocumentStatus>,
    payment_methods: Slots<PaymentMethod>,
    source_id: Required<String>,
    system_entry_date: Required<NaiveDateTime>,
    customer_id: Required<String>,
    lines: Slots<Line>,
    document_totals: Required<DocumentTotals>,
}

impl Payment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unique identifier, `Type Series/Number` (e.g. `RC RC2024/7`).
    pub fn set_payment_ref_no(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        set_req_doc_ref(&mut self.payment_ref_no, "Payment.PaymentRefNo", raw, reg)
    }

    pub fn payment_ref_no(&self) -> Result<&str, ModelError> {
        self.payment_ref_no
            .get("Payment.PaymentRefNo")
            .map(String::as_str)
    }

    pub fn set_atcud(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        set_opt_text(&mut self.atcud, "Payment.ATCUD", raw, 1, 100, reg)
    }

    pub fn atcud(&self) -> Option<&str> {
        self.atcud.as_deref()
    }

    /// Accounting period, month 1–12; out of range is fatal.
    pub fn set_period(&mut self, period: u32) -> Result<(), ModelError> {
        check_range("Payment.Period", i64::from(period), 1, 12)?;
        self.period = Some(period);
        Ok(())
    }

    pub fn period(&self) -> Option<u32> {
        self.period
    }

    pub fn set_transaction_date(&mut self, date: NaiveDate) {
        self.transaction_date.set(date);
    }

    pub fn transaction_date(&self) -> Result<NaiveDate, ModelError> {
        self.transaction_date.get("Payment.TransactionDate").copied()
    }

    pub fn set_payment_type(&mut self, payment_type: PaymentType) {
        self.payment_type.set(payment_type);
    }

    pub fn payment_type(&self) -> Result<PaymentType, ModelError> {
        self.payment_type.get("Payment.PaymentType").copied()
    }

    pub fn set_description(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        set_opt_text(&mut self.description, "Payment.Description", raw, 1, 200, reg)
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_system_id(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        set_opt_text(&mut self.system_id, "Payment.SystemID", raw, 1, 60, reg)
    }

    pub fn system_id(&self) -> Option<&str> {
        self.system_id.as_deref()
    }

    pub fn set_document_status(&mut self, status: DocumentStatus) {
        self.document_status.set(status);
    }

    pub fn document_status(&self) -> Result<&DocumentStatus, ModelError> {
        self.document_status.get("Payment.DocumentStatus")
    }

    pub fn add_payment_method(&mut self, method: PaymentMethod) -> SlotId {
        self.payment_methods.push(method)
    }

    pub fn payment_methods(&self) -> impl Iterator<Item = (SlotId, &PaymentMethod)> {
        self.payment_methods.iter()
    }

    pub fn set_source_id(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        set_req_text(&mut self.source_id, "Payment.SourceID", raw, 1, 30, reg)
    }

    pub fn source_id(&self) -> Result<&str, ModelError> {
        self.source_id.get("Payment.SourceID").map(String::as_str)
    }

    pub fn set_system_entry_date(&mut self, date_time: NaiveDateTime) {
        self.system_entry_date.set(date_time);
    }

    pub fn system_entry_date(&self) -> Result<NaiveDateTime, ModelError> {
        self.system_entry_date
            .get("Payment.SystemEntryDate")
            .copied()
    }

    pub fn set_customer_id(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        set_req_text(&mut self.customer_id, "Payment.CustomerID", raw, 1, 30, reg)
    }

    pub fn customer_id(&self) -> Result<&str, ModelError> {
        self.customer_id.get("Payment.CustomerID").map(String::as_str)
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
        self.document_totals.get("Payment.DocumentTotals")
    }
}

impl XmlNode for Payment {
    const ELEMENT: &'static str = "Payment";
    const PARENT: &'static str = "Payments";

    fn write_xml<'a>(
        &self,
        parent: &'a mut Element,
        reg: &mut ErrorRegister,
    ) -> Result<&'a mut Element, ModelError> {
        expect_parent(parent, Self::PARENT)?;
        let node = parent.add_child(Self::ELEMENT);

        write_req_str(
            node,
            "PaymentRefNo",
            "Payment.PaymentRefNo",
            self.payment_ref_no.value().map(String::as_str),
            reg,
        );
        write_opt_str(node, "ATCUD", self.atcud.as_deref());
        write_opt_int(node, "Period", self.period);
        write_req_date(
            node,
            "TransactionDate",
            "Payment.TransactionDate",
            self.transaction_date.value().copied(),
            reg,
        );
        write_req_str(
            node,
            "PaymentType",
            "Payment.PaymentType",
            self.payment_type.value().map(|t| t.code()),
            reg,
        );
        write_opt_str(node, "Description", self.description.as_deref());
        write_opt_str(node, "SystemID", self.system_id.as_deref());
        write_req_node(node, "Payment.DocumentStatus", self.document_status.value(), reg)?;
        if self.payment_methods.is_empty() {
            reg.add_on_create_xml_node(Fault::new(
                "Payment.PaymentMethod",
                "receipt has no payment method",
            ));
        }
        write_nodes(node, &self.payment_methods, reg)?;
        write_req_str(
            node,
            "SourceID",
            "Payment.SourceID",
            self.source_id.value().map(String::as_str),
            reg,
        );
        write_req_date_time(
            node,
            "SystemEntryDate",
            "Payment.SystemEntryDate",
            self.system_entry_date.value().copied(),
            reg,
        );
        write_req_str(
            node,
            "CustomerID",
            "Payment.CustomerID",
            self.customer_id.value().map(String::as_str),
            reg,
        );
        if self.lines.is_empty() {
            reg.add_on_create_xml_node(Fault::new("Payment.Line", "receipt has no lines"));
        }
        write_nodes(node, &self.lines, reg)?;
        write_req_node(node, "Payment.DocumentTotals", self.document_totals.value(), reg)?;

        Ok(node)
    }

    fn read_xml(node: &Element, reg: &mut ErrorRegister) -> Result<Self, ModelError> {
        expect_element(node, Self::ELEMENT)?;
        let mut payment = Payment::new();

        if let Some(text) = node.child_text("PaymentRefNo") {
            payment.set_payment_ref_no(text, reg);
        }
        if let Some(text) = node.child_text("ATCUD") {
            payment.set_atcud(text, reg);
        }
        if let Some(period) = read_int(node, "Period", "Payment.Period", reg) {
            payment.set_period(period)?;
        }
        if let Some(date) = read_date(node, "TransactionDate", "Payment.TransactionDate", reg) {
            payment.set_transaction_date(date);
        }
        if let Some(text) = node.child_text("PaymentType") {
            payment.set_payment_type(PaymentType::from_code(text)?);
        }
        if let Some(text) = node.child_text("Description") {
            payment.set_description(text, reg);
        }
        if let Some(text) = node.child_text("SystemID") {
            payment.set_system_id(text, reg);
        }
        payment.document_status = read_req_node(node, reg)?;
        payment.payment_methods = read_nodes(node, reg)?;
        if let Some(text) = node.child_text("SourceID") {
            payment.set_source_id(text, reg);
        }
        if let Some(date_time) =
            read_date_time(node, "SystemEntryDate", "Payment.SystemEntryDate", reg)
        {
            payment.set_system_entry_date(date_time);
        }
        if let Some(text) = node.child_text("CustomerID") {
            payment.set_customer_id(text, reg);
        }
        payment.lines = read_nodes(node, reg)?;
        payment.document_totals = read_req_node(node, reg)?;

        Ok(payment)
    }
}

/// 4.4.4.7: state of the receipt. Same element tag as the invoice variant,
/// different inner vocabulary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentStatus {
    payment_status: Required<PaymentStatus>,
    payment_status_date: Required<NaiveDateTime>,
    reason: Option<String>,
    source_id: Required<String>,
    source_payment: Required<SourcePayment>,
}

impl DocumentStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_payment_status(&mut self, status: PaymentStatus) {
        self.payment_status.set(status);
    }

    pub fn payment_status(&self) -> Result<PaymentStatus, ModelError> {
        self.payment_status
            .get("DocumentStatus.PaymentStatus")
            .copied()
    }

    pub fn set_payment_status_date(&mut self, date_time: NaiveDateTime) {
        self.payment_status_date.set(date_time);
    }

    pub fn payment_status_date(&self) -> Result<NaiveDateTime, ModelError> {
        self.payment_status_date
            .get("DocumentStatus.PaymentStatusDate")
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

    pub fn set_source_payment(&mut self, source: SourcePayment) {
        self.source_payment.set(source);
    }

    pub fn source_payment(&self) -> Result<SourcePayment, ModelError> {
        self.source_payment
            .get("DocumentStatus.SourcePayment")
            .copied()
    }
}

impl XmlNode for DocumentStatus {
    const ELEMENT: &'static str = "DocumentStatus";
    const PARENT: &'static str = "Payment";

    fn write_xml<'a>(
        &self,
        parent: &'a mut Element,
        reg: &mut ErrorRegister,
    ) -> Result<&'a mut Element, ModelError> {
        expect_parent(parent, Self::PARENT)?;
        let node = parent.add_child(Self::ELEMENT);

        write_req_str(
            node,
            "PaymentStatus",
            "DocumentStatus.PaymentStatus",
            self.payment_status.value().map(|s| s.code()),
            reg,
        );
        write_req_date_time(
            node,
            "PaymentStatusDate",
            "DocumentStatus.PaymentStatusDate",
            self.payment_status_date.value().copied(),
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
            "SourcePayment",
            "DocumentStatus.SourcePayment",
            self.source_payment.value().map(|s| s.code()),
            reg,
        );

        Ok(node)
    }

    fn read_xml(node: &Element, reg: &mut ErrorRegister) -> Result<Self, ModelError> {
        expect_element(node, Self::ELEMENT)?;
        let mut status = DocumentStatus::new();

        if let Some(text) = node.child_text("PaymentStatus") {
            status.set_payment_status(PaymentStatus::from_code(text)?);
        }
        if let Some(date_time) = read_date_time(
            node,
            "PaymentStatusDate",
            "DocumentStatus.PaymentStatusDate",
            reg,
        ) {
            status.set_payment_status_date(date_time);
        }
        if let Some(text) = node.child_text("Reason") {
            status.set_reason(text, reg);
        }
        if let Some(text) = node.child_text("SourceID") {
            status.set_source_id(text, reg);
        }
        if let Some(text) = node.child_text("SourcePayment") {
            status.set_source_payment(SourcePayment::from_code(text)?);
        }

        Ok(status)
    }
}

/// 4.4.4.8: how the amount was received.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentMethod {
    payment_mechanism: Option<PaymentMechanism>,
    payment_amount: Required<Decimal>,
    payment_date: Required<NaiveDate>,
}

impl PaymentMethod {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_payment_mechanism(&mut self, mechanism: PaymentMechanism) {
        self.payment_mechanism = Some(mechanism);
    }

    pub fn payment_mechanism(&self) -> Option<PaymentMechanism> {
        self.payment_mechanism
    }

    pub fn set_payment_amount(&mut self, value: Decimal, reg: &mut ErrorRegister) -> bool {
        set_req_amount(
            &mut self.payment_amount,
            "PaymentMethod.PaymentAmount",
            value,
            reg,
        )
    }

    pub fn payment_amount(&self) -> Result<Decimal, ModelError> {
        self.payment_amount
            .get("PaymentMethod.PaymentAmount")
            .copied()
    }

    pub fn set_payment_date(&mut self, date: NaiveDate) {
        self.payment_date.set(date);
    }

    pub fn payment_date(&self) -> Result<NaiveDate, ModelError> {
        self.payment_date.get("PaymentMethod.PaymentDate").copied()
    }
}

impl XmlNode for PaymentMethod {
    const ELEMENT: &'static str = "PaymentMethod";
    const PARENT: &'static str = "Payment";

    fn write_xml<'a>(
        &self,
        parent: &'a mut Element,
        reg: &mut ErrorRegister,
    ) -> Result<&'a mut Element, ModelError> {
        expect_parent(parent, Self::PARENT)?;
        let node = parent.add_child(Self::ELEMENT);

        write_opt_str(
            node,
            "PaymentMechanism",
            self.payment_mechanism.map(|m| m.code()),
        );
        write_req_amount(
            node,
            "PaymentAmount",
            "PaymentMethod.PaymentAmount",
            self.payment_amount.value().copied(),
            reg,
        );
        write_req_date(
            node,
            "PaymentDate",
            "PaymentMethod.PaymentDate",
            self.payment_date.value().copied(),
            reg,
        );

        Ok(node)
    }

    fn read_xml(node: &Element, reg: &mut ErrorRegister) -> Result<Self, ModelError> {
        expect_element(node, Self::ELEMENT)?;
        let mut method = PaymentMethod::new();

        if let Some(text) = node.child_text("PaymentMechanism") {
            method.set_payment_mechanism(PaymentMechanism::from_code(text)?);
        }
        if let Some(value) = read_amount(node, "PaymentAmount", "PaymentMethod.PaymentAmount", reg)
        {
            method.set_payment_amount(value, reg);
        }
        if let Some(date) = read_date(node, "PaymentDate", "PaymentMethod.PaymentDate", reg) {
            method.set_payment_date(date);
        }

        Ok(method)
    }
}

/// 4.4.4.14: one settled amount, pointing back at the source documents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Line {
    line_number: Required<u64>,
    source_document_ids: Slots<SourceDocumentID>,
    settlement_amount: Option<Decimal>,
    debit_amount: Option<Decimal>,
    credit_amount: Option<Decimal>,
    tax: Option<Tax>,
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

    pub fn add_source_document_id(&mut self, source: SourceDocumentID) -> SlotId {
        self.source_document_ids.push(source)
    }

    pub fn source_document_ids(&self) -> impl Iterator<Item = (SlotId, &SourceDocumentID)> {
        self.source_document_ids.iter()
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
        self.tax = Some(tax);
    }

    pub fn tax(&self) -> Option<&Tax> {
        self.tax.as_ref()
    }

    pub fn clear_tax(&mut self) {
        self.tax = None;
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
    const PARENT: &'static str = "Payment";

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
        if self.source_document_ids.is_empty() {
            reg.add_on_create_xml_node(Fault::new(
                "Line.SourceDocumentID",
                "line references no source document",
            ));
        }
        write_nodes(node, &self.source_document_ids, reg)?;
        write_opt_amount(node, "SettlementAmount", self.settlement_amount);
        if self.debit_amount.is_none() && self.credit_amount.is_none() {
            reg.add_on_create_xml_node(Fault::new("Line.DebitAmount/CreditAmount", MSG_UNSET));
        }
        write_opt_amount(node, "DebitAmount", self.debit_amount);
        write_opt_amount(node, "CreditAmount", self.credit_amount);
        write_opt_node(node, self.tax.as_ref(), reg)?;
        write_opt_str(node, "TaxExemptionReason", self.tax_exemption_reason.as_deref());

        Ok(node)
    }

    fn read_xml(node: &Element, reg: &mut ErrorRegister) -> Result<Self, ModelError> {
        expect_element(node, Self::ELEMENT)?;
        let mut line = Line::new();

        if let Some(value) = read_int(node, "LineNumber", "Line.LineNumber", reg) {
            line.set_line_number(value, reg);
        }
        line.source_document_ids = read_nodes(node, reg)?;
        if let Some(value) = read_amount(node, "SettlementAmount", "Line.SettlementAmount", reg) {
            line.set_settlement_amount(value, reg);
        }
        if let Some(value) = read_amount(node, "DebitAmount", "Line.DebitAmount", reg) {
            line.set_debit_amount(value, reg)?;
        }
        if let Some(value) = read_amount(node, "CreditAmount", "Line.CreditAmount", reg) {
            line.set_credit_amount(value, reg)?;
        }
        line.tax = read_opt_node(node, reg)?;
        if let Some(text) = node.child_text("TaxExemptionReason") {
            line.set_tax_exemption_reason(text, reg);
        }

        Ok(line)
    }
}

/// 4.4.4.14.2: reference to one settled sales document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceDocumentID {
    originating_on: Required<String>,
    invoice_date: Required<NaiveDate>,
    description: Option<String>,
}

impl SourceDocumentID {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of the document being settled, `Type Series/Number`.
    pub fn set_originating_on(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        set_req_doc_ref(
            &mut self.originating_on,
            "SourceDocumentID.OriginatingON",
            raw,
            reg,
        )
    }

    pub fn originating_on(&self) -> Result<&str, ModelError> {
        self.originating_on
            .get("SourceDocumentID.OriginatingON")
            .map(String::as_str)
    }

    pub fn set_invoice_date(&mut self, date: NaiveDate) {
        self.invoice_date.set(date);
    }

    pub fn invoice_date(&self) -> Result<NaiveDate, ModelError> {
        self.invoice_date
            .get("SourceDocumentID.InvoiceDate")
            .copied()
    }

    pub fn set_description(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        set_opt_text(
            &mut self.description,
            "SourceDocumentID.Description",
            raw,
            1,
            100,
            reg,
        )
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl XmlNode for SourceDocumentID {
    const ELEMENT: &'static str = "SourceDocumentID";
    const PARENT: &'static str = "Line";

    fn write_xml<'a>(
        &self,
        parent: &'a mut Element,
        reg: &mut ErrorRegister,
    ) -> Result<&'a mut Element, ModelError> {
        expect_parent(parent, Self::PARENT)?;
        let node = parent.add_child(Self::ELEMENT);

        write_req_str(
            node,
            "OriginatingON",
            "SourceDocumentID.OriginatingON",
            self.originating_on.value().map(String::as_str),
            reg,
        );
        write_req_date(
            node,
            "InvoiceDate",
            "SourceDocumentID.InvoiceDate",
            self.invoice_date.value().copied(),
            reg,
        );
        write_opt_str(node, "Description", self.description.as_deref());

        Ok(node)
    }

    fn read_xml(node: &Element, reg: &mut ErrorRegister) -> Result<Self, ModelError> {
        expect_element(node, Self::ELEMENT)?;
        let mut source = SourceDocumentID::new();

        if let Some(text) = node.child_text("OriginatingON") {
            source.set_originating_on(text, reg);
        }
        if let Some(date) = read_date(node, "InvoiceDate", "SourceDocumentID.InvoiceDate", reg) {
            source.set_invoice_date(date);
        }
        if let Some(text) = node.child_text("Description") {
            source.set_description(text, reg);
        }

        Ok(source)
    }
}

/// 4.4.4.15: control totals of one receipt.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentTotals {
    tax_payable: Required<Decimal>,
    net_total: Required<Decimal>,
    gross_total: Required<Decimal>,
    settlement: Option<Settlement>,
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

    pub fn set_settlement(&mut self, settlement: Settlement) {
        self.settlement = Some(settlement);
    }

    pub fn settlement(&self) -> Option<&Settlement> {
        self.settlement.as_ref()
    }

    pub fn clear_settlement(&mut self) {
        self.settlement = None;
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
    const PARENT: &'static str = "Payment";

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
        write_opt_node(node, self.settlement.as_ref(), reg)?;
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
        totals.settlement = read_opt_node(node, reg)?;
        totals.currency = read_opt_node(node, reg)?;

        Ok(totals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn entry_date() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 20)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn sample_payment(reg: &mut ErrorRegister) -> Payment {
        let mut status = DocumentStatus::new();
        status.set_payment_status(PaymentStatus::Normal);
        status.set_payment_status_date(entry_date());
        status.set_source_id("operator-2", reg);
        status.set_source_payment(SourcePayment::Produced);

        let mut method = PaymentMethod::new();
        method.set_payment_mechanism(PaymentMechanism::BankTransfer);
        method.set_payment_amount(dec!(123), reg);
        method.set_payment_date(NaiveDate::from_ymd_opt(2024, 6, 20).unwrap());

        let mut source = SourceDocumentID::new();
        source.set_originating_on("FT FT2024/35", reg);
        source.set_invoice_date(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());

        let mut line = Line::new();
        line.set_line_number(1, reg);
        line.add_source_document_id(source);
        line.set_credit_amount(dec!(100), reg).unwrap();

        let mut totals = DocumentTotals::new();
        totals.set_tax_payable(dec!(23), reg);
        totals.set_net_total(dec!(100), reg);
        totals.set_gross_total(dec!(123), reg);

        let mut payment = Payment::new();
        payment.set_payment_ref_no("RC RC2024/7", reg);
        payment.set_transaction_date(NaiveDate::from_ymd_opt(2024, 6, 20).unwrap());
        payment.set_payment_type(PaymentType::OtherReceipt);
        payment.set_document_status(status);
        payment.add_payment_method(method);
        payment.set_source_id("operator-2", reg);
        payment.set_system_entry_date(entry_date());
        payment.set_customer_id("C0001", reg);
        payment.add_line(line);
        payment.set_document_totals(totals);
        payment
    }

    #[test]
    fn payment_roundtrip() {
        let mut reg = ErrorRegister::new();
        let payment = sample_payment(&mut reg);

        let mut parent = Element::new("Payments");
        payment.write_xml(&mut parent, &mut reg).unwrap();
        let back = Payment::read_xml(parent.first_child("Payment").unwrap(), &mut reg).unwrap();

        assert_eq!(back, payment);
        assert!(reg.is_clean(), "unexpected faults: {reg:?}");
    }

    #[test]
    fn missing_payment_method_and_lines_are_recorded() {
        let mut reg = ErrorRegister::new();
        let mut parent = Element::new("Payments");
        Payment::new().write_xml(&mut parent, &mut reg).unwrap();

        let faults: Vec<_> = reg
            .on_create_xml_node()
            .iter()
            .map(|f| f.field.as_str())
            .collect();
        assert!(faults.contains(&"Payment.PaymentMethod"));
        assert!(faults.contains(&"Payment.Line"));
    }

    #[test]
    fn payment_line_requires_one_of_debit_or_credit() {
        let mut reg = ErrorRegister::new();
        let mut parent = Element::new("Payment");
        Line::new().write_xml(&mut parent, &mut reg).unwrap();
        assert!(
            reg.on_create_xml_node()
                .iter()
                .any(|f| f.field == "Line.DebitAmount/CreditAmount")
        );
    }
}
