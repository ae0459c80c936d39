//! The Tax element carried by document lines.

use rust_decimal::Decimal;

use crate::core::validate::{self};
use crate::core::{ErrorRegister, Fault, ModelError, Required, TaxCode, TaxType};
use crate::xml::Element;

use super::{
    MSG_UNSET, XmlNode, expect_element, expect_parent, read_amount, set_exclusive_amount,
    write_opt_amount, write_req_str,
};

/// Tax charged on one line: type, country/region, rate band, and exactly
/// one of a percentage or a fixed amount.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tax {
    tax_type: Required<TaxType>,
    tax_country_region: Required<String>,
    tax_code: Required<TaxCode>,
    tax_percentage: Option<Decimal>,
    tax_amount: Option<Decimal>,
}

impl Tax {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_tax_type(&mut self, tax_type: TaxType) {
        self.tax_type.set(tax_type);
    }

    pub fn tax_type(&self) -> Result<TaxType, ModelError> {
        self.tax_type.get("Tax.TaxType").copied()
    }

    /// `PT`, `PT-AC`, `PT-MA` or a 2-letter country code; anything else is
    /// recorded and stored as given.
    pub fn set_tax_country_region(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        let ok = match validate::tax_country_region(raw) {
            Ok(_) => true,
            Err(fault) => {
                reg.add_on_set_value(Fault::new("Tax.TaxCountryRegion", fault.to_string()));
                false
            }
        };
        self.tax_country_region.set(raw.to_string());
        ok
    }

    pub fn tax_country_region(&self) -> Result<&str, ModelError> {
        self.tax_country_region
            .get("Tax.TaxCountryRegion")
            .map(String::as_str)
    }

    pub fn set_tax_code(&mut self, tax_code: TaxCode) {
        self.tax_code.set(tax_code);
    }

    pub fn tax_code(&self) -> Result<TaxCode, ModelError> {
        self.tax_code.get("Tax.TaxCode").copied()
    }

    /// Fatal while TaxAmount is set.
    pub fn set_tax_percentage(
        &mut self,
        value: Decimal,
        reg: &mut ErrorRegister,
    ) -> Result<bool, ModelError> {
        set_exclusive_amount(
            &mut self.tax_percentage,
            self.tax_amount.is_some(),
            "Tax.TaxPercentage",
            "Tax.TaxAmount",
            value,
            reg,
        )
    }

    pub fn tax_percentage(&self) -> Option<Decimal> {
        self.tax_percentage
    }

    pub fn clear_tax_percentage(&mut self) {
        self.tax_percentage = None;
    }

    /// Fatal while TaxPercentage is set.
    pub fn set_tax_amount(
        &mut self,
        value: Decimal,
        reg: &mut ErrorRegister,
    ) -> Result<bool, ModelError> {
        set_exclusive_amount(
            &mut self.tax_amount,
            self.tax_percentage.is_some(),
            "Tax.TaxAmount",
            "Tax.TaxPercentage",
            value,
            reg,
        )
    }

    pub fn tax_amount(&self) -> Option<Decimal> {
        self.tax_amount
    }

    pub fn clear_tax_amount(&mut self) {
        self.tax_amount = None;
    }
}

impl XmlNode for Tax {
    const ELEMENT: &'static str = "Tax";
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
            "TaxType",
            "Tax.TaxType",
            self.tax_type.value().map(|t| t.code()),
            reg,
        );
        write_req_str(
            node,
            "TaxCountryRegion",
            "Tax.TaxCountryRegion",
            self.tax_country_region.value().map(String::as_str),
            reg,
        );
        write_req_str(
            node,
            "TaxCode",
            "Tax.TaxCode",
            self.tax_code.value().map(|c| c.code()),
            reg,
        );
        if self.tax_percentage.is_none() && self.tax_amount.is_none() {
            reg.add_on_create_xml_node(Fault::new("Tax.TaxPercentage/TaxAmount", MSG_UNSET));
        }
        write_opt_amount(node, "TaxPercentage", self.tax_percentage);
        write_opt_amount(node, "TaxAmount", self.tax_amount);

        Ok(node)
    }

    fn read_xml(node: &Element, reg: &mut ErrorRegister) -> Result<Self, ModelError> {
        expect_element(node, Self::ELEMENT)?;
        let mut tax = Tax::new();

        if let Some(text) = node.child_text("TaxType") {
            tax.set_tax_type(TaxType::from_code(text)?);
        }
        if let Some(text) = node.child_text("TaxCountryRegion") {
            tax.set_tax_country_region(text, reg);
        }
        if let Some(text) = node.child_text("TaxCode") {
            tax.set_tax_code(TaxCode::from_code(text)?);
        }
        if let Some(value) = read_amount(node, "TaxPercentage", "Tax.TaxPercentage", reg) {
            tax.set_tax_percentage(value, reg)?;
        }
        if let Some(value) = read_amount(node, "TaxAmount", "Tax.TaxAmount", reg) {
            tax.set_tax_amount(value, reg)?;
        }

        Ok(tax)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample() -> (Tax, ErrorRegister) {
        let mut reg = ErrorRegister::new();
        let mut tax = Tax::new();
        tax.set_tax_type(TaxType::Vat);
        tax.set_tax_country_region("PT", &mut reg);
        tax.set_tax_code(TaxCode::Normal);
        tax.set_tax_percentage(dec!(23), &mut reg).unwrap();
        (tax, reg)
    }

    #[test]
    fn percentage_and_amount_are_exclusive() {
        let (mut tax, mut reg) = sample();
        let err = tax.set_tax_amount(dec!(5), &mut reg).unwrap_err();
        assert!(matches!(err, ModelError::ExclusiveFields { .. }));

        // Clearing the sibling makes the set legal.
        tax.clear_tax_percentage();
        assert!(tax.set_tax_amount(dec!(5), &mut reg).unwrap());
        assert_eq!(tax.tax_amount(), Some(dec!(5)));
    }

    #[test]
    fn wrong_parent_is_fatal() {
        let (tax, mut reg) = sample();
        let mut parent = Element::new("Invoice");
        let err = tax.write_xml(&mut parent, &mut reg).unwrap_err();
        assert!(matches!(err, ModelError::WrongParent { .. }));
    }

    #[test]
    fn unpopulated_tax_still_writes_a_full_skeleton() {
        let mut reg = ErrorRegister::new();
        let mut parent = Element::new("Line");
        Tax::new().write_xml(&mut parent, &mut reg).unwrap();

        let node = parent.first_child("Tax").unwrap();
        assert!(node.first_child("TaxType").is_some());
        assert!(node.first_child("TaxCountryRegion").is_some());
        assert!(node.first_child("TaxCode").is_some());
        // TaxType, TaxCountryRegion, TaxCode, and the percentage/amount choice.
        assert_eq!(reg.on_create_xml_node().len(), 4);
    }

    #[test]
    fn roundtrip() {
        let (tax, mut reg) = sample();
        let mut parent = Element::new("Line");
        tax.write_xml(&mut parent, &mut reg).unwrap();

        let node = parent.first_child("Tax").unwrap();
        let back = Tax::read_xml(node, &mut reg).unwrap();
        assert_eq!(back, tax);
        assert!(reg.is_clean());
    }
}
