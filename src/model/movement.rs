//! MovementOfGoods: transport documents for goods in circulation.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::core::{
    ErrorRegister, Fault, ModelError, MovementStatus, MovementType, Required, SlotId, Slots,
    SourceBilling, check_range,
};
use crate::xml::Element;

use super::{
    MSG_UNSET, XmlNode, expect_element, expect_parent, read_amount, read_date, read_date_time,
    read_int, read_nodes, read_req_node, set_opt_text, set_req_amount, set_req_doc_ref,
    set_req_positive, set_req_text, write_nodes, write_opt_date_time, write_opt_int,
    write_opt_str, write_req_amount, write_req_date, write_req_date_time, write_req_int,
    write_req_node, write_req_str,
};

/// 4.2: MovementOfGoods — line counts, issued quantity and the documents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovementOfGoods {
    number_of_movement_lines: Required<u64>,
    total_quantity_issued: Required<Decimal>,
    stock_movements: Slots<StockMovement>,
}

impl MovementOfGoods {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_number_of_movement_lines(&mut self, value: u64) {
        self.number_of_movement_lines.set(value);
    }

    pub fn number_of_movement_lines(&self) -> Result<u64, ModelError> {
        self.number_of_movement_lines
            .get("MovementOfGoods.NumberOfMovementLines")
            .copied()
    }

    pub fn set_total_quantity_issued(&mut self, value: Decimal, reg: &mut ErrorRegister) -> bool {
        set_req_amount(
            &mut self.total_quantity_issued,
            "MovementOfGoods.TotalQuantityIssued",
            value,
            reg,
        )
    }

    pub fn total_quantity_issued(&self) -> Result<Decimal, ModelError> {
        self.total_quantity_issued
            .get("MovementOfGoods.TotalQuantityIssued")
            .copied()
    }

    pub fn add_stock_movement(&mut self, movement: StockMovement) -> SlotId {
        self.stock_movements.push(movement)
    }

    pub fn stock_movement(&self, id: SlotId) -> Option<&StockMovement> {
        self.stock_movements.get(id)
    }

    pub fn remove_stock_movement(&mut self, id: SlotId) -> Option<StockMovement> {
        self.stock_movements.remove(id)
    }

    pub fn stock_movements(&self) -> impl Iterator<Item = (SlotId, &StockMovement)> {
        self.stock_movements.iter()
    }
}

impl XmlNode for MovementOfGoods {
    const ELEMENT: &'static str = "MovementOfGoods";
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
            "NumberOfMovementLines",
            "MovementOfGoods.NumberOfMovementLines",
            self.number_of_movement_lines.value().copied(),
            reg,
        );
        write_req_amount(
            node,
            "TotalQuantityIssued",
            "MovementOfGoods.TotalQuantityIssued",
            self.total_quantity_issued.value().copied(),
            reg,
        );
        write_nodes(node, &self.stock_movements, reg)?;

        Ok(node)
    }

    fn read_xml(node: &Element, reg: &mut ErrorRegister) -> Result<Self, ModelError> {
        expect_element(node, Self::ELEMENT)?;
        let mut movement_of_goods = MovementOfGoods::new();

        if let Some(value) = read_int(
            node,
            "NumberOfMovementLines",
            "MovementOfGoods.NumberOfMovementLines",
            reg,
        ) {
            movement_of_goods.set_number_of_movement_lines(value);
        }
        if let Some(value) = read_amount(
            node,
            "TotalQuantityIssued",
            "MovementOfGoods.TotalQuantityIssued",
            reg,
        ) {
            movement_of_goods.set_total_quantity_issued(value, reg);
        }
        movement_of_goods.stock_movements = read_nodes(node, reg)?;

        Ok(movement_of_goods)
    }
}

/// 4.2.3: one transport document.
///
/// Exactly one of CustomerID or SupplierID identifies the counterparty;
/// setting one while the other is set is fatal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StockMovement {
    document_number: Required<String>,
    atcud: Option<String>,
    document_status: Required<DocumentStatus>,
    hash: Required<String>,
    hash_control: Option<String>,
    period: Option<u32>,
    movement_date: Required<NaiveDate>,
    movement_type: Required<MovementType>,
    system_entry_date: Required<NaiveDateTime>,
    customer_id: Option<String>,
    supplier_id: Option<String>,
    source_id: Required<String>,
    movement_comments: Option<String>,
    movement_start_time: Required<NaiveDateTime>,
    movement_end_time: Option<NaiveDateTime>,
    lines: Slots<Line>,
}

impl StockMovement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_document_number(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        set_req_doc_ref(
            &mut self.document_number,
            "StockMovement.DocumentNumber",
            raw,
            reg,
        )
    }

    pub fn document_number(&self) -> Result<&str, ModelError> {
        self.document_number
            .get("StockMovement.DocumentNumber")
            .map(String::as_str)
    }

    pub fn set_atcud(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        set_opt_text(&mut self.atcud, "StockMovement.ATCUD", raw, 1, 100, reg)
    }

    pub fn atcud(&self) -> Option<&str> {
        self.atcud.as_deref()
    }

    pub fn set_document_status(&mut self, status: DocumentStatus) {
        self.document_status.set(status);
    }

    pub fn document_status(&self) -> Result<&DocumentStatus, ModelError> {
        self.document_status.get("StockMovement.DocumentStatus")
    }

    pub fn set_hash(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        set_req_text(&mut self.hash, "StockMovement.Hash", raw, 1, 172, reg)
    }

    pub fn hash(&self) -> Result<&str, ModelError> {
        self.hash.get("StockMovement.Hash").map(String::as_str)
    }

    pub fn set_hash_control(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        set_opt_text(
            &mut self.hash_control,
            "StockMovement.HashControl",
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
        check_range("StockMovement.Period", i64::from(period), 1, 12)?;
        self.period = Some(period);
        Ok(())
    }

    pub fn period(&self) -> Option<u32> {
        self.period
    }

    pub fn set_movement_date(&mut self, date: NaiveDate) {
        self.movement_date.set(date);
    }

    pub fn movement_date(&self) -> Result<NaiveDate, ModelError> {
        self.movement_date.get("StockMovement.MovementDate").copied()
    }

    pub fn set_movement_type(&mut self, movement_type: MovementType) {
        self.movement_type.set(movement_type);
    }

    pub fn movement_type(&self) -> Result<MovementType, ModelError> {
        self.movement_type.get("StockMovement.MovementType").copied()
    }

    pub fn set_system_entry_date(&mut self, date_time: NaiveDateTime) {
        self.system_entry_date.set(date_time);
    }

    pub fn system_entry_date(&self) -> Result<NaiveDateTime, ModelError> {
        self.system_entry_date
            .get("StockMovement.SystemEntryDate")
            .copied()
    }

    /// Fatal while SupplierID is set.
    pub fn set_customer_id(
        &mut self,
        raw: &str,
        reg: &mut ErrorRegister,
    ) -> Result<bool, ModelError> {
        if self.supplier_id.is_some() {
            return Err(ModelError::ExclusiveFields {
                field: "StockMovement.CustomerID",
                other: "StockMovement.SupplierID",
            });
        }
        Ok(set_opt_text(
            &mut self.customer_id,
            "StockMovement.CustomerID",
            raw,
            1,
            30,
            reg,
        ))
    }

    pub fn customer_id(&self) -> Option<&str> {
        self.customer_id.as_deref()
    }

    pub fn clear_customer_id(&mut self) {
        self.customer_id = None;
    }

    /// Fatal while CustomerID is set.
    pub fn set_supplier_id(
        &mut self,
        raw: &str,
        reg: &mut ErrorRegister,
    ) -> Result<bool, ModelError> {
        if self.customer_id.is_some() {
            return Err(ModelError::ExclusiveFields {
                field: "StockMovement.SupplierID",
                other: "StockMovement.CustomerID",
            });
        }
        Ok(set_opt_text(
            &mut self.supplier_id,
            "StockMovement.SupplierID",
            raw,
            1,
            30,
            reg,
        ))
    }

    pub fn supplier_id(&self) -> Option<&str> {
        self.supplier_id.as_deref()
    }

    pub fn clear_supplier_id(&mut self) {
        self.supplier_id = None;
    }

    pub fn set_source_id(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        set_req_text(&mut self.source_id, "StockMovement.SourceID", raw, 1, 30, reg)
    }

    pub fn source_id(&self) -> Result<&str, ModelError> {
        self.source_id
            .get("StockMovement.SourceID")
            .map(String::as_str)
    }

    pub fn set_movement_comments(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        set_opt_text(
            &mut self.movement_comments,
            "StockMovement.MovementComments",
            raw,
            1,
            60,
            reg,
        )
    }

    pub fn movement_comments(&self) -> Option<&str> {
        self.movement_comments.as_deref()
    }

    pub fn set_movement_start_time(&mut self, date_time: NaiveDateTime) {
        self.movement_start_time.set(date_time);
    }

    pub fn movement_start_time(&self) -> Result<NaiveDateTime, ModelError> {
        self.movement_start_time
            .get("StockMovement.MovementStartTime")
            .copied()
    }

    pub fn set_movement_end_time(&mut self, date_time: NaiveDateTime) {
        self.movement_end_time = Some(date_time);
    }

    pub fn movement_end_time(&self) -> Option<NaiveDateTime> {
        self.movement_end_time
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
}

impl XmlNode for StockMovement {
    const ELEMENT: &'static str = "StockMovement";
    const PARENT: &'static str = "MovementOfGoods";

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
            "StockMovement.DocumentNumber",
            self.document_number.value().map(String::as_str),
            reg,
        );
        write_opt_str(node, "ATCUD", self.atcud.as_deref());
        write_req_node(
            node,
            "StockMovement.DocumentStatus",
            self.document_status.value(),
            reg,
        )?;
        write_req_str(
            node,
            "Hash",
            "StockMovement.Hash",
            self.hash.value().map(String::as_str),
            reg,
        );
        write_opt_str(node, "HashControl", self.hash_control.as_deref());
        write_opt_int(node, "Period", self.period);
        write_req_date(
            node,
            "MovementDate",
            "StockMovement.MovementDate",
            self.movement_date.value().copied(),
            reg,
        );
        write_req_str(
            node,
            "MovementType",
            "StockMovement.MovementType",
            self.movement_type.value().map(|t| t.code()),
            reg,
        );
        write_req_date_time(
            node,
            "SystemEntryDate",
            "StockMovement.SystemEntryDate",
            self.system_entry_date.value().copied(),
            reg,
        );
        if self.customer_id.is_none() && self.supplier_id.is_none() {
            reg.add_on_create_xml_node(Fault::new(
                "StockMovement.CustomerID/SupplierID",
                MSG_UNSET,
            ));
        }
        write_opt_str(node, "CustomerID", self.customer_id.as_deref());
        write_opt_str(node, "SupplierID", self.supplier_id.as_deref());
        write_req_str(
            node,
            "SourceID",
            "StockMovement.SourceID",
            self.source_id.value().map(String::as_str),
            reg,
        );
        write_opt_str(node, "MovementComments", self.movement_comments.as_deref());
        write_req_date_time(
            node,
            "MovementStartTime",
            "StockMovement.MovementStartTime",
            self.movement_start_time.value().copied(),
            reg,
        );
        write_opt_date_time(node, "MovementEndTime", self.movement_end_time);
        if self.lines.is_empty() {
            reg.add_on_create_xml_node(Fault::new("StockMovement.Line", "document has no lines"));
        }
        write_nodes(node, &self.lines, reg)?;

        Ok(node)
    }

    fn read_xml(node: &Element, reg: &mut ErrorRegister) -> Result<Self, ModelError> {
        expect_element(node, Self::ELEMENT)?;
        let mut movement = StockMovement::new();

        if let Some(text) = node.child_text("DocumentNumber") {
            movement.set_document_number(text, reg);
        }
        if let Some(text) = node.child_text("ATCUD") {
            movement.set_atcud(text, reg);
        }
        movement.document_status = read_req_node(node, reg)?;
        if let Some(text) = node.child_text("Hash") {
            movement.set_hash(text, reg);
        }
        if let Some(text) = node.child_text("HashControl") {
            movement.set_hash_control(text, reg);
        }
        if let Some(period) = read_int(node, "Period", "StockMovement.Period", reg) {
            movement.set_period(period)?;
        }
        if let Some(date) = read_date(node, "MovementDate", "StockMovement.MovementDate", reg) {
            movement.set_movement_date(date);
        }
        if let Some(text) = node.child_text("MovementType") {
            movement.set_movement_type(MovementType::from_code(text)?);
        }
        if let Some(date_time) =
            read_date_time(node, "SystemEntryDate", "StockMovement.SystemEntryDate", reg)
        {
            movement.set_system_entry_date(date_time);
        }
        if let Some(text) = node.child_text("CustomerID") {
            movement.set_customer_id(text, reg)?;
        }
        if let Some(text) = node.child_text("SupplierID") {
            movement.set_supplier_id(text, reg)?;
        }
        if let Some(text) = node.child_text("SourceID") {
            movement.set_source_id(text, reg);
        }
        if let Some(text) = node.child_text("MovementComments") {
            movement.set_movement_comments(text, reg);
        }
        if let Some(date_time) = read_date_time(
            node,
            "MovementStartTime",
            "StockMovement.MovementStartTime",
            reg,
        ) {
            movement.set_movement_start_time(date_time);
        }
        if let Some(date_time) = read_date_time(
            node,
            "MovementEndTime",
            "StockMovement.MovementEndTime",
            reg,
        ) {
            movement.set_movement_end_time(date_time);
        }
        movement.lines = read_nodes(node, reg)?;

        Ok(movement)
    }
}

/// 4.2.3.7: state of the transport document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentStatus {
    movement_status: Required<MovementStatus>,
    movement_status_date: Required<NaiveDateTime>,
    reason: Option<String>,
    source_id: Required<String>,
    source_billing: Required<SourceBilling>,
}

impl DocumentStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_movement_status(&mut self, status: MovementStatus) {
        self.movement_status.set(status);
    }

    pub fn movement_status(&self) -> Result<MovementStatus, ModelError> {
        self.movement_status
            .get("DocumentStatus.MovementStatus")
            .copied()
    }

    pub fn set_movement_status_date(&mut self, date_time: NaiveDateTime) {
        self.movement_status_date.set(date_time);
    }

    pub fn movement_status_date(&self) -> Result<NaiveDateTime, ModelError> {
        self.movement_status_date
            .get("DocumentStatus.MovementStatusDate")
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
    const PARENT: &'static str = "StockMovement";

    fn write_xml<'a>(
        &self,
        parent: &'a mut Element,
        reg: &mut ErrorRegister,
    ) -> Result<&'a mut Element, ModelError> {
        expect_parent(parent, Self::PARENT)?;
        let node = parent.add_child(Self::ELEMENT);

        write_req_str(
            node,
            "MovementStatus",
            "DocumentStatus.MovementStatus",
            self.movement_status.value().map(|s| s.code()),
            reg,
        );
        write_req_date_time(
            node,
            "MovementStatusDate",
            "DocumentStatus.MovementStatusDate",
            self.movement_status_date.value().copied(),
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

        if let Some(text) = node.child_text("MovementStatus") {
            status.set_movement_status(MovementStatus::from_code(text)?);
        }
        if let Some(date_time) = read_date_time(
            node,
            "MovementStatusDate",
            "DocumentStatus.MovementStatusDate",
            reg,
        ) {
            status.set_movement_status_date(date_time);
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

/// 4.2.3.20: one line of goods in circulation. Transport lines carry
/// quantities and prices, never debit/credit amounts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Line {
    line_number: Required<u64>,
    product_code: Required<String>,
    product_description: Required<String>,
    quantity: Required<Decimal>,
    unit_of_measure: Required<String>,
    unit_price: Required<Decimal>,
    description: Option<String>,
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

    pub fn set_description(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        set_opt_text(&mut self.description, "Line.Description", raw, 1, 200, reg)
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl XmlNode for Line {
    const ELEMENT: &'static str = "Line";
    const PARENT: &'static str = "StockMovement";

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
        write_opt_str(node, "Description", self.description.as_deref());

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
        if let Some(text) = node.child_text("Description") {
            line.set_description(text, reg);
        }

        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn customer_and_supplier_are_exclusive() {
        let mut reg = ErrorRegister::new();
        let mut movement = StockMovement::new();
        movement.set_customer_id("C0001", &mut reg).unwrap();
        let err = movement.set_supplier_id("S0001", &mut reg).unwrap_err();
        assert!(matches!(err, ModelError::ExclusiveFields { .. }));

        movement.clear_customer_id();
        assert!(movement.set_supplier_id("S0001", &mut reg).unwrap());
        assert_eq!(movement.supplier_id(), Some("S0001"));
    }

    #[test]
    fn stock_movement_roundtrip() {
        let mut reg = ErrorRegister::new();
        let start = NaiveDate::from_ymd_opt(2024, 3, 4)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();

        let mut status = DocumentStatus::new();
        status.set_movement_status(MovementStatus::Normal);
        status.set_movement_status_date(start);
        status.set_source_id("operator-4", &mut reg);
        status.set_source_billing(SourceBilling::Produced);

        let mut line = Line::new();
        line.set_line_number(1, &mut reg);
        line.set_product_code("GOODS-9", &mut reg);
        line.set_product_description("Crated parts", &mut reg);
        line.set_quantity(dec!(12), &mut reg);
        line.set_unit_of_measure("Box", &mut reg);
        line.set_unit_price(dec!(7.25), &mut reg);

        let mut movement = StockMovement::new();
        movement.set_document_number("GT GT2024/3", &mut reg);
        movement.set_document_status(status);
        movement.set_hash("fake-hash", &mut reg);
        movement.set_movement_date(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        movement.set_movement_type(MovementType::TransportGuide);
        movement.set_system_entry_date(start);
        movement.set_customer_id("C0001", &mut reg).unwrap();
        movement.set_source_id("operator-4", &mut reg);
        movement.set_movement_start_time(start);
        movement.add_line(line);

        let mut parent = Element::new("MovementOfGoods");
        movement.write_xml(&mut parent, &mut reg).unwrap();
        let back = StockMovement::read_xml(parent.first_child("StockMovement").unwrap(), &mut reg)
            .unwrap();

        assert_eq!(back, movement);
        assert!(reg.is_clean(), "unexpected faults: {reg:?}");
    }
}
