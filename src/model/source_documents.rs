//! The SourceDocuments container: one optional block per document family.

use crate::core::{ErrorRegister, ModelError};
use crate::xml::Element;

use super::movement::MovementOfGoods;
use super::payments::Payments;
use super::sales::SalesInvoices;
use super::work::WorkingDocuments;
use super::{XmlNode, expect_element, expect_parent, read_opt_node, write_opt_node};

/// 4: SourceDocuments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceDocuments {
    sales_invoices: Option<SalesInvoices>,
    movement_of_goods: Option<MovementOfGoods>,
    working_documents: Option<WorkingDocuments>,
    payments: Option<Payments>,
}

impl SourceDocuments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_sales_invoices(&mut self, sales: SalesInvoices) {
        self.sales_invoices = Some(sales);
    }

    pub fn sales_invoices(&self) -> Option<&SalesInvoices> {
        self.sales_invoices.as_ref()
    }

    pub fn sales_invoices_mut(&mut self) -> Option<&mut SalesInvoices> {
        self.sales_invoices.as_mut()
    }

    pub fn clear_sales_invoices(&mut self) {
        self.sales_invoices = None;
    }

    pub fn set_movement_of_goods(&mut self, movement: MovementOfGoods) {
        self.movement_of_goods = Some(movement);
    }

    pub fn movement_of_goods(&self) -> Option<&MovementOfGoods> {
        self.movement_of_goods.as_ref()
    }

    pub fn movement_of_goods_mut(&mut self) -> Option<&mut MovementOfGoods> {
        self.movement_of_goods.as_mut()
    }

    pub fn clear_movement_of_goods(&mut self) {
        self.movement_of_goods = None;
    }

    pub fn set_working_documents(&mut self, working: WorkingDocuments) {
        self.working_documents = Some(working);
    }

    pub fn working_documents(&self) -> Option<&WorkingDocuments> {
        self.working_documents.as_ref()
    }

    pub fn working_documents_mut(&mut self) -> Option<&mut WorkingDocuments> {
        self.working_documents.as_mut()
    }

    pub fn clear_working_documents(&mut self) {
        self.working_documents = None;
    }

    pub fn set_payments(&mut self, payments: Payments) {
        self.payments = Some(payments);
    }

    pub fn payments(&self) -> Option<&Payments> {
        self.payments.as_ref()
    }

    pub fn payments_mut(&mut self) -> Option<&mut Payments> {
        self.payments.as_mut()
    }

    pub fn clear_payments(&mut self) {
        self.payments = None;
    }
}

impl XmlNode for SourceDocuments {
    const ELEMENT: &'static str = "SourceDocuments";
    const PARENT: &'static str = "AuditFile";

    fn write_xml<'a>(
        &self,
        parent: &'a mut Element,
        reg: &mut ErrorRegister,
    ) -> Result<&'a mut Element, ModelError> {
        expect_parent(parent, Self::PARENT)?;
        let node = parent.add_child(Self::ELEMENT);

        write_opt_node(node, self.sales_invoices.as_ref(), reg)?;
        write_opt_node(node, self.movement_of_goods.as_ref(), reg)?;
        write_opt_node(node, self.working_documents.as_ref(), reg)?;
        write_opt_node(node, self.payments.as_ref(), reg)?;

        Ok(node)
    }

    fn read_xml(node: &Element, reg: &mut ErrorRegister) -> Result<Self, ModelError> {
        expect_element(node, Self::ELEMENT)?;
        let mut source = SourceDocuments::new();

        source.sales_invoices = read_opt_node(node, reg)?;
        source.movement_of_goods = read_opt_node(node, reg)?;
        source.working_documents = read_opt_node(node, reg)?;
        source.payments = read_opt_node(node, reg)?;

        Ok(source)
    }
}
