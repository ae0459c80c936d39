//! Nodes shared by the per-document DocumentTotals containers.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::core::{ErrorRegister, ModelError, Required};
use crate::xml::Element;

use super::{
    XmlNode, expect_element, expect_parent, read_amount, read_date, set_opt_amount, set_opt_text,
    set_req_amount, set_req_text, write_opt_amount, write_opt_date, write_opt_str,
    write_req_amount, write_req_str,
};

/// Settlement terms granted on a document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settlement {
    settlement_discount: Option<String>,
    settlement_amount: Option<Decimal>,
    settlement_date: Option<NaiveDate>,
    payment_terms: Option<String>,
}

impl Settlement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_settlement_discount(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        set_opt_text(
            &mut self.settlement_discount,
            "Settlement.SettlementDiscount",
            raw,
            1,
            30,
            reg,
        )
    }

    pub fn settlement_discount(&self) -> Option<&str> {
        self.settlement_discount.as_deref()
    }

    pub fn set_settlement_amount(&mut self, value: Decimal, reg: &mut ErrorRegister) -> bool {
        set_opt_amount(
            &mut self.settlement_amount,
            "Settlement.SettlementAmount",
            value,
            reg,
        )
    }

    pub fn settlement_amount(&self) -> Option<Decimal> {
        self.settlement_amount
    }

    pub fn set_settlement_date(&mut self, date: NaiveDate) {
        self.settlement_date = Some(date);
    }

    pub fn settlement_date(&self) -> Option<NaiveDate> {
        self.settlement_date
    }

    pub fn set_payment_terms(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        set_opt_text(
            &mut self.payment_terms,
            "Settlement.PaymentTerms",
            raw,
            1,
            100,
            reg,
        )
    }

    pub fn payment_terms(&self) -> Option<&str> {
        self.payment_terms.as_deref()
    }
}

impl XmlNode for Settlement {
    const ELEMENT: &'static str = "Settlement";
    const PARENT: &'static str = "DocumentTotals";

    fn write_xml<'a>(
        &self,
        parent: &'a mut Element,
        _reg: &mut ErrorRegister,
    ) -> Result<&'a mut Element, ModelError> {
        expect_parent(parent, Self::PARENT)?;
        let node = parent.add_child(Self::ELEMENT);

        write_opt_str(node, "SettlementDiscount", self.settlement_discount.as_deref());
        write_opt_amount(node, "SettlementAmount", self.settlement_amount);
        write_opt_date(node, "SettlementDate", self.settlement_date);
        write_opt_str(node, "PaymentTerms", self.payment_terms.as_deref());

        Ok(node)
    }

    fn read_xml(node: &Element, reg: &mut ErrorRegister) -> Result<Self, ModelError> {
        expect_element(node, Self::ELEMENT)?;
        let mut settlement = Settlement::new();

        if let Some(text) = node.child_text("SettlementDiscount") {
            settlement.set_settlement_discount(text, reg);
        }
        if let Some(value) =
            read_amount(node, "SettlementAmount", "Settlement.SettlementAmount", reg)
        {
            settlement.set_settlement_amount(value, reg);
        }
        if let Some(date) = read_date(node, "SettlementDate", "Settlement.SettlementDate", reg) {
            settlement.set_settlement_date(date);
        }
        if let Some(text) = node.child_text("PaymentTerms") {
            settlement.set_payment_terms(text, reg);
        }

        Ok(settlement)
    }
}

/// Foreign-currency restatement of a document's gross total.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Currency {
    currency_code: Required<String>,
    currency_amount: Required<Decimal>,
    exchange_rate: Option<Decimal>,
}

impl Currency {
    pub fn new() -> Self {
        Self::default()
    }

    /// ISO 4217, exactly 3 characters.
    pub fn set_currency_code(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        set_req_text(
            &mut self.currency_code,
            "Currency.CurrencyCode",
            raw,
            3,
            3,
            reg,
        )
    }

    pub fn currency_code(&self) -> Result<&str, ModelError> {
        self.currency_code
            .get("Currency.CurrencyCode")
            .map(String::as_str)
    }

    pub fn set_currency_amount(&mut self, value: Decimal, reg: &mut ErrorRegister) -> bool {
        set_req_amount(
            &mut self.currency_amount,
            "Currency.CurrencyAmount",
            value,
            reg,
        )
    }

    pub fn currency_amount(&self) -> Result<Decimal, ModelError> {
        self.currency_amount.get("Currency.CurrencyAmount").copied()
    }

    pub fn set_exchange_rate(&mut self, value: Decimal, reg: &mut ErrorRegister) -> bool {
        set_opt_amount(&mut self.exchange_rate, "Currency.ExchangeRate", value, reg)
    }

    pub fn exchange_rate(&self) -> Option<Decimal> {
        self.exchange_rate
    }
}

impl XmlNode for Currency {
    const ELEMENT: &'static str = "Currency";
    const PARENT: &'static str = "DocumentTotals";

    fn write_xml<'a>(
        &self,
        parent: &'a mut Element,
        reg: &mut ErrorRegister,
    ) -> Result<&'a mut Element, ModelError> {
        expect_parent(parent, Self::PARENT)?;
        let node = parent.add_child(Self::ELEMENT);

        write_req_str(
            node,
            "CurrencyCode",
            "Currency.CurrencyCode",
            self.currency_code.value().map(String::as_str),
            reg,
        );
        write_req_amount(
            node,
            "CurrencyAmount",
            "Currency.CurrencyAmount",
            self.currency_amount.value().copied(),
            reg,
        );
        write_opt_amount(node, "ExchangeRate", self.exchange_rate);

        Ok(node)
    }

    fn read_xml(node: &Element, reg: &mut ErrorRegister) -> Result<Self, ModelError> {
        expect_element(node, Self::ELEMENT)?;
        let mut currency = Currency::new();

        if let Some(text) = node.child_text("CurrencyCode") {
            currency.set_currency_code(text, reg);
        }
        if let Some(value) = read_amount(node, "CurrencyAmount", "Currency.CurrencyAmount", reg) {
            currency.set_currency_amount(value, reg);
        }
        if let Some(value) = read_amount(node, "ExchangeRate", "Currency.ExchangeRate", reg) {
            currency.set_exchange_rate(value, reg);
        }

        Ok(currency)
    }
}
