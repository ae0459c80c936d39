//! Closed-vocabulary codes from the SAF-T (PT) data dictionary.
//!
//! Unlike ordinary field setters, constructing a code from a value outside
//! its vocabulary is fatal ([`ModelError::UnknownCode`]): an unknown code is
//! a schema-contract violation, not merely suspicious data. Once built, a
//! code is immutable — replace the whole value to change it.

use serde::{Deserialize, Serialize};

use super::error::ModelError;

/// Commercial document kinds accepted under SalesInvoices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvoiceType {
    /// FT — invoice.
    Invoice,
    /// FS — simplified invoice (art. 40 CIVA).
    Simplified,
    /// FR — invoice-receipt.
    InvoiceReceipt,
    /// ND — debit note.
    DebitNote,
    /// NC — credit note.
    CreditNote,
}

impl InvoiceType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Invoice => "FT",
            Self::Simplified => "FS",
            Self::InvoiceReceipt => "FR",
            Self::DebitNote => "ND",
            Self::CreditNote => "NC",
        }
    }

    pub fn from_code(code: &str) -> Result<Self, ModelError> {
        match code {
            "FT" => Ok(Self::Invoice),
            "FS" => Ok(Self::Simplified),
            "FR" => Ok(Self::InvoiceReceipt),
            "ND" => Ok(Self::DebitNote),
            "NC" => Ok(Self::CreditNote),
            _ => Err(unknown("InvoiceType", code)),
        }
    }
}

/// Commercial state of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvoiceStatus {
    /// N — normal.
    Normal,
    /// S — self-billing.
    SelfBilling,
    /// A — cancelled.
    Cancelled,
    /// R — summary document for other documents.
    Summary,
    /// F — invoiced document.
    Invoiced,
}

impl InvoiceStatus {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Normal => "N",
            Self::SelfBilling => "S",
            Self::Cancelled => "A",
            Self::Summary => "R",
            Self::Invoiced => "F",
        }
    }

    pub fn from_code(code: &str) -> Result<Self, ModelError> {
        match code {
            "N" => Ok(Self::Normal),
            "S" => Ok(Self::SelfBilling),
            "A" => Ok(Self::Cancelled),
            "R" => Ok(Self::Summary),
            "F" => Ok(Self::Invoiced),
            _ => Err(unknown("InvoiceStatus", code)),
        }
    }
}

/// Receipt kinds accepted under Payments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentType {
    /// RC — receipt issued under the cash VAT regime.
    CashVatReceipt,
    /// RG — any other receipt.
    OtherReceipt,
}

impl PaymentType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::CashVatReceipt => "RC",
            Self::OtherReceipt => "RG",
        }
    }

    pub fn from_code(code: &str) -> Result<Self, ModelError> {
        match code {
            "RC" => Ok(Self::CashVatReceipt),
            "RG" => Ok(Self::OtherReceipt),
            _ => Err(unknown("PaymentType", code)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// N — normal.
    Normal,
    /// A — cancelled.
    Cancelled,
}

impl PaymentStatus {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Normal => "N",
            Self::Cancelled => "A",
        }
    }

    pub fn from_code(code: &str) -> Result<Self, ModelError> {
        match code {
            "N" => Ok(Self::Normal),
            "A" => Ok(Self::Cancelled),
            _ => Err(unknown("PaymentStatus", code)),
        }
    }
}

/// Working document kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkType {
    /// CM — table check.
    TableCheck,
    /// CC — consignment credit note.
    ConsignmentCreditNote,
    /// FC — consignment invoice.
    ConsignmentInvoice,
    /// FO — worksheet.
    Worksheet,
    /// NE — order note.
    OrderNote,
    /// OU — other.
    Other,
    /// OR — budget.
    Budget,
    /// PF — pro forma invoice.
    ProForma,
}

impl WorkType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::TableCheck => "CM",
            Self::ConsignmentCreditNote => "CC",
            Self::ConsignmentInvoice => "FC",
            Self::Worksheet => "FO",
            Self::OrderNote => "NE",
            Self::Other => "OU",
            Self::Budget => "OR",
            Self::ProForma => "PF",
        }
    }

    pub fn from_code(code: &str) -> Result<Self, ModelError> {
        match code {
            "CM" => Ok(Self::TableCheck),
            "CC" => Ok(Self::ConsignmentCreditNote),
            "FC" => Ok(Self::ConsignmentInvoice),
            "FO" => Ok(Self::Worksheet),
            "NE" => Ok(Self::OrderNote),
            "OU" => Ok(Self::Other),
            "OR" => Ok(Self::Budget),
            "PF" => Ok(Self::ProForma),
            _ => Err(unknown("WorkType", code)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkStatus {
    /// N — normal.
    Normal,
    /// A — cancelled.
    Cancelled,
    /// F — invoiced.
    Invoiced,
}

impl WorkStatus {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Normal => "N",
            Self::Cancelled => "A",
            Self::Invoiced => "F",
        }
    }

    pub fn from_code(code: &str) -> Result<Self, ModelError> {
        match code {
            "N" => Ok(Self::Normal),
            "A" => Ok(Self::Cancelled),
            "F" => Ok(Self::Invoiced),
            _ => Err(unknown("WorkStatus", code)),
        }
    }
}

/// Goods movement document kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementType {
    /// GR — delivery note.
    DeliveryNote,
    /// GT — transport guide.
    TransportGuide,
    /// GA — guide for own fixed assets.
    FixedAssetsGuide,
    /// GC — consignment guide.
    ConsignmentGuide,
    /// GD — return guide.
    ReturnGuide,
}

impl MovementType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::DeliveryNote => "GR",
            Self::TransportGuide => "GT",
            Self::FixedAssetsGuide => "GA",
            Self::ConsignmentGuide => "GC",
            Self::ReturnGuide => "GD",
        }
    }

    pub fn from_code(code: &str) -> Result<Self, ModelError> {
        match code {
            "GR" => Ok(Self::DeliveryNote),
            "GT" => Ok(Self::TransportGuide),
            "GA" => Ok(Self::FixedAssetsGuide),
            "GC" => Ok(Self::ConsignmentGuide),
            "GD" => Ok(Self::ReturnGuide),
            _ => Err(unknown("MovementType", code)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementStatus {
    /// N — normal.
    Normal,
    /// T — issued on behalf of third parties.
    ThirdParty,
    /// A — cancelled.
    Cancelled,
    /// F — invoiced.
    Invoiced,
    /// R — summary document.
    Summary,
}

impl MovementStatus {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Normal => "N",
            Self::ThirdParty => "T",
            Self::Cancelled => "A",
            Self::Invoiced => "F",
            Self::Summary => "R",
        }
    }

    pub fn from_code(code: &str) -> Result<Self, ModelError> {
        match code {
            "N" => Ok(Self::Normal),
            "T" => Ok(Self::ThirdParty),
            "A" => Ok(Self::Cancelled),
            "F" => Ok(Self::Invoiced),
            "R" => Ok(Self::Summary),
            _ => Err(unknown("MovementStatus", code)),
        }
    }
}

/// How a billing document entered the issuing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceBilling {
    /// P — produced in this program.
    Produced,
    /// I — integrated from another program.
    Integrated,
    /// M — recovered from manual issue.
    Manual,
}

impl SourceBilling {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Produced => "P",
            Self::Integrated => "I",
            Self::Manual => "M",
        }
    }

    pub fn from_code(code: &str) -> Result<Self, ModelError> {
        match code {
            "P" => Ok(Self::Produced),
            "I" => Ok(Self::Integrated),
            "M" => Ok(Self::Manual),
            _ => Err(unknown("SourceBilling", code)),
        }
    }
}

/// How a payment entered the issuing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourcePayment {
    /// P — produced in this program.
    Produced,
    /// I — integrated from another program.
    Integrated,
    /// M — recovered from manual issue.
    Manual,
}

impl SourcePayment {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Produced => "P",
            Self::Integrated => "I",
            Self::Manual => "M",
        }
    }

    pub fn from_code(code: &str) -> Result<Self, ModelError> {
        match code {
            "P" => Ok(Self::Produced),
            "I" => Ok(Self::Integrated),
            "M" => Ok(Self::Manual),
            _ => Err(unknown("SourcePayment", code)),
        }
    }
}

/// Tax family of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaxType {
    /// IVA — value added tax.
    Vat,
    /// IS — stamp duty.
    StampDuty,
    /// NS — not subject to VAT or stamp duty.
    NotSubject,
}

impl TaxType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Vat => "IVA",
            Self::StampDuty => "IS",
            Self::NotSubject => "NS",
        }
    }

    pub fn from_code(code: &str) -> Result<Self, ModelError> {
        match code {
            "IVA" => Ok(Self::Vat),
            "IS" => Ok(Self::StampDuty),
            "NS" => Ok(Self::NotSubject),
            _ => Err(unknown("TaxType", code)),
        }
    }
}

/// Rate band within a tax type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaxCode {
    /// NOR — standard rate.
    Normal,
    /// INT — intermediate rate.
    Intermediate,
    /// RED — reduced rate.
    Reduced,
    /// ISE — exempt.
    Exempt,
    /// OUT — other.
    Other,
}

impl TaxCode {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Normal => "NOR",
            Self::Intermediate => "INT",
            Self::Reduced => "RED",
            Self::Exempt => "ISE",
            Self::Other => "OUT",
        }
    }

    pub fn from_code(code: &str) -> Result<Self, ModelError> {
        match code {
            "NOR" => Ok(Self::Normal),
            "INT" => Ok(Self::Intermediate),
            "RED" => Ok(Self::Reduced),
            "ISE" => Ok(Self::Exempt),
            "OUT" => Ok(Self::Other),
            _ => Err(unknown("TaxCode", code)),
        }
    }
}

/// Accounting system the file was extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaxAccountingBasis {
    /// C — accounting.
    Accounting,
    /// E — invoices issued by third parties.
    IssuedByThirdParties,
    /// F — invoicing.
    Invoicing,
    /// I — invoicing and accounting integrated.
    Integrated,
    /// P — invoicing partial data.
    PartialInvoicing,
    /// R — receipts.
    Receipts,
    /// S — self-billing.
    SelfBilling,
    /// T — transport documents.
    Transport,
}

impl TaxAccountingBasis {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Accounting => "C",
            Self::IssuedByThirdParties => "E",
            Self::Invoicing => "F",
            Self::Integrated => "I",
            Self::PartialInvoicing => "P",
            Self::Receipts => "R",
            Self::SelfBilling => "S",
            Self::Transport => "T",
        }
    }

    pub fn from_code(code: &str) -> Result<Self, ModelError> {
        match code {
            "C" => Ok(Self::Accounting),
            "E" => Ok(Self::IssuedByThirdParties),
            "F" => Ok(Self::Invoicing),
            "I" => Ok(Self::Integrated),
            "P" => Ok(Self::PartialInvoicing),
            "R" => Ok(Self::Receipts),
            "S" => Ok(Self::SelfBilling),
            "T" => Ok(Self::Transport),
            _ => Err(unknown("TaxAccountingBasis", code)),
        }
    }
}

/// Means of payment on a receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMechanism {
    /// CC — credit card.
    CreditCard,
    /// CD — debit card.
    DebitCard,
    /// CH — bank cheque.
    Cheque,
    /// CI — documentary credit.
    DocumentaryCredit,
    /// CO — gift cheque or card.
    GiftCheque,
    /// CS — balance compensation.
    Compensation,
    /// DE — electronic money.
    ElectronicMoney,
    /// LC — commercial bill.
    CommercialBill,
    /// MB — ATM reference.
    AtmReference,
    /// NU — cash.
    Cash,
    /// OU — other.
    Other,
    /// PR — exchange of goods.
    Barter,
    /// TB — bank transfer.
    BankTransfer,
    /// TR — meal or education voucher.
    Voucher,
}

impl PaymentMechanism {
    pub fn code(&self) -> &'static str {
        match self {
            Self::CreditCard => "CC",
            Self::DebitCard => "CD",
            Self::Cheque => "CH",
            Self::DocumentaryCredit => "CI",
            Self::GiftCheque => "CO",
            Self::Compensation => "CS",
            Self::ElectronicMoney => "DE",
            Self::CommercialBill => "LC",
            Self::AtmReference => "MB",
            Self::Cash => "NU",
            Self::Other => "OU",
            Self::Barter => "PR",
            Self::BankTransfer => "TB",
            Self::Voucher => "TR",
        }
    }

    pub fn from_code(code: &str) -> Result<Self, ModelError> {
        match code {
            "CC" => Ok(Self::CreditCard),
            "CD" => Ok(Self::DebitCard),
            "CH" => Ok(Self::Cheque),
            "CI" => Ok(Self::DocumentaryCredit),
            "CO" => Ok(Self::GiftCheque),
            "CS" => Ok(Self::Compensation),
            "DE" => Ok(Self::ElectronicMoney),
            "LC" => Ok(Self::CommercialBill),
            "MB" => Ok(Self::AtmReference),
            "NU" => Ok(Self::Cash),
            "OU" => Ok(Self::Other),
            "PR" => Ok(Self::Barter),
            "TB" => Ok(Self::BankTransfer),
            "TR" => Ok(Self::Voucher),
            _ => Err(unknown("PaymentMechanism", code)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WithholdingTaxType {
    /// IRS — personal income tax.
    PersonalIncome,
    /// IRC — corporate income tax.
    CorporateIncome,
    /// IS — stamp duty.
    StampDuty,
}

impl WithholdingTaxType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::PersonalIncome => "IRS",
            Self::CorporateIncome => "IRC",
            Self::StampDuty => "IS",
        }
    }

    pub fn from_code(code: &str) -> Result<Self, ModelError> {
        match code {
            "IRS" => Ok(Self::PersonalIncome),
            "IRC" => Ok(Self::CorporateIncome),
            "IS" => Ok(Self::StampDuty),
            _ => Err(unknown("WithholdingTaxType", code)),
        }
    }
}

fn unknown(kind: &'static str, value: &str) -> ModelError {
    ModelError::UnknownCode {
        kind,
        value: value.to_string(),
    }
}

macro_rules! display_as_code {
    ($($ty:ty),+ $(,)?) => {
        $(impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.code())
            }
        })+
    };
}

display_as_code!(
    InvoiceType,
    InvoiceStatus,
    PaymentType,
    PaymentStatus,
    WorkType,
    WorkStatus,
    MovementType,
    MovementStatus,
    SourceBilling,
    SourcePayment,
    TaxType,
    TaxCode,
    TaxAccountingBasis,
    PaymentMechanism,
    WithholdingTaxType,
);
