//! The file header: who is reporting, for which period, from which system.

use chrono::NaiveDate;

use crate::core::validate::{self};
use crate::core::{ErrorRegister, Fault, ModelError, Required, TaxAccountingBasis, check_range};
use crate::xml::Element;

use super::{
    XmlNode, expect_element, expect_parent, read_date, read_int, read_req_node, set_opt_text,
    set_req_text, write_opt_str, write_req_date, write_req_int, write_req_node, write_req_str,
};

/// The only schema version this model speaks.
pub const AUDIT_FILE_VERSION: &str = "1.04_01";

/// 1: Header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Header {
    audit_file_version: Required<String>,
    company_id: Required<String>,
    tax_registration_number: Required<u32>,
    tax_accounting_basis: Required<TaxAccountingBasis>,
    company_name: Required<String>,
    company_address: Required<CompanyAddress>,
    fiscal_year: Required<i32>,
    start_date: Required<NaiveDate>,
    end_date: Required<NaiveDate>,
    currency_code: Required<String>,
    date_created: Required<NaiveDate>,
    tax_entity: Required<String>,
    product_company_tax_id: Required<String>,
    software_certificate_number: Required<u64>,
    product_id: Required<String>,
    product_version: Required<String>,
    header_comment: Option<String>,
    telephone: Option<String>,
    email: Option<String>,
}

impl Header {
    pub fn new() -> Self {
        Self::default()
    }

    /// Anything other than [`AUDIT_FILE_VERSION`] is recorded and stored.
    pub fn set_audit_file_version(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        let ok = raw == AUDIT_FILE_VERSION;
        if !ok {
            reg.add_on_set_value(Fault::new(
                "Header.AuditFileVersion",
                format!("expected {AUDIT_FILE_VERSION}, got '{raw}'"),
            ));
        }
        self.audit_file_version.set(raw.to_string());
        ok
    }

    pub fn audit_file_version(&self) -> Result<&str, ModelError> {
        self.audit_file_version
            .get("Header.AuditFileVersion")
            .map(String::as_str)
    }

    /// Commercial registry number plus registry office, or the NIF.
    pub fn set_company_id(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        set_req_text(&mut self.company_id, "Header.CompanyID", raw, 1, 50, reg)
    }

    pub fn company_id(&self) -> Result<&str, ModelError> {
        self.company_id.get("Header.CompanyID").map(String::as_str)
    }

    /// 9-digit NIF; out-of-shape numbers are recorded and stored.
    pub fn set_tax_registration_number(&mut self, value: u32, reg: &mut ErrorRegister) -> bool {
        let ok = match validate::nif(value) {
            Ok(_) => true,
            Err(fault) => {
                reg.add_on_set_value(Fault::new(
                    "Header.TaxRegistrationNumber",
                    fault.to_string(),
                ));
                false
            }
        };
        self.tax_registration_number.set(value);
        ok
    }

    pub fn tax_registration_number(&self) -> Result<u32, ModelError> {
        self.tax_registration_number
            .get("Header.TaxRegistrationNumber")
            .copied()
    }

    pub fn set_tax_accounting_basis(&mut self, basis: TaxAccountingBasis) {
        self.tax_accounting_basis.set(basis);
    }

    pub fn tax_accounting_basis(&self) -> Result<TaxAccountingBasis, ModelError> {
        self.tax_accounting_basis
            .get("Header.TaxAccountingBasis")
            .copied()
    }

    pub fn set_company_name(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        set_req_text(&mut self.company_name, "Header.CompanyName", raw, 1, 100, reg)
    }

    pub fn company_name(&self) -> Result<&str, ModelError> {
        self.company_name.get("Header.CompanyName").map(String::as_str)
    }

    pub fn set_company_address(&mut self, address: CompanyAddress) {
        self.company_address.set(address);
    }

    pub fn company_address(&self) -> Result<&CompanyAddress, ModelError> {
        self.company_address.get("Header.CompanyAddress")
    }

    /// Fiscal year; outside 1900–9999 is fatal.
    pub fn set_fiscal_year(&mut self, year: i32) -> Result<(), ModelError> {
        check_range("Header.FiscalYear", i64::from(year), 1900, 9999)?;
        self.fiscal_year.set(year);
        Ok(())
    }

    pub fn fiscal_year(&self) -> Result<i32, ModelError> {
        self.fiscal_year.get("Header.FiscalYear").copied()
    }

    pub fn set_start_date(&mut self, date: NaiveDate) {
        self.start_date.set(date);
    }

    pub fn start_date(&self) -> Result<NaiveDate, ModelError> {
        self.start_date.get("Header.StartDate").copied()
    }

    pub fn set_end_date(&mut self, date: NaiveDate) {
        self.end_date.set(date);
    }

    pub fn end_date(&self) -> Result<NaiveDate, ModelError> {
        self.end_date.get("Header.EndDate").copied()
    }

    /// The header currency is always EUR; anything else is recorded.
    pub fn set_currency_code(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        let ok = raw == "EUR";
        if !ok {
            reg.add_on_set_value(Fault::new(
                "Header.CurrencyCode",
                format!("must be EUR, got '{raw}'"),
            ));
        }
        self.currency_code.set(raw.to_string());
        ok
    }

    pub fn currency_code(&self) -> Result<&str, ModelError> {
        self.currency_code
            .get("Header.CurrencyCode")
            .map(String::as_str)
    }

    pub fn set_date_created(&mut self, date: NaiveDate) {
        self.date_created.set(date);
    }

    pub fn date_created(&self) -> Result<NaiveDate, ModelError> {
        self.date_created.get("Header.DateCreated").copied()
    }

    /// `Global` for the whole activity, `Sede` or an establishment name.
    pub fn set_tax_entity(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        set_req_text(&mut self.tax_entity, "Header.TaxEntity", raw, 1, 20, reg)
    }

    pub fn tax_entity(&self) -> Result<&str, ModelError> {
        self.tax_entity.get("Header.TaxEntity").map(String::as_str)
    }

    pub fn set_product_company_tax_id(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        set_req_text(
            &mut self.product_company_tax_id,
            "Header.ProductCompanyTaxID",
            raw,
            1,
            30,
            reg,
        )
    }

    pub fn product_company_tax_id(&self) -> Result<&str, ModelError> {
        self.product_company_tax_id
            .get("Header.ProductCompanyTaxID")
            .map(String::as_str)
    }

    /// Certificate number assigned to the issuing software; 0 when not
    /// certified.
    pub fn set_software_certificate_number(&mut self, value: u64) {
        self.software_certificate_number.set(value);
    }

    pub fn software_certificate_number(&self) -> Result<u64, ModelError> {
        self.software_certificate_number
            .get("Header.SoftwareCertificateNumber")
            .copied()
    }

    /// `ProductName/CompanyName`; a missing slash is recorded.
    pub fn set_product_id(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        let mut ok = set_req_text(&mut self.product_id, "Header.ProductID", raw, 1, 255, reg);
        if ok && !raw.contains('/') {
            reg.add_on_set_value(Fault::new(
                "Header.ProductID",
                "must be 'ProductName/CompanyName'",
            ));
            ok = false;
        }
        ok
    }

    pub fn product_id(&self) -> Result<&str, ModelError> {
        self.product_id.get("Header.ProductID").map(String::as_str)
    }

    pub fn set_product_version(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        set_req_text(
            &mut self.product_version,
            "Header.ProductVersion",
            raw,
            1,
            30,
            reg,
        )
    }

    pub fn product_version(&self) -> Result<&str, ModelError> {
        self.product_version
            .get("Header.ProductVersion")
            .map(String::as_str)
    }

    pub fn set_header_comment(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        set_opt_text(&mut self.header_comment, "Header.HeaderComment", raw, 1, 255, reg)
    }

    pub fn header_comment(&self) -> Option<&str> {
        self.header_comment.as_deref()
    }

    pub fn set_telephone(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        set_opt_text(&mut self.telephone, "Header.Telephone", raw, 1, 20, reg)
    }

    pub fn telephone(&self) -> Option<&str> {
        self.telephone.as_deref()
    }

    pub fn set_email(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        set_opt_text(&mut self.email, "Header.Email", raw, 1, 254, reg)
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}

impl XmlNode for Header {
    const ELEMENT: &'static str = "Header";
    const PARENT: &'static str = "AuditFile";

    fn write_xml<'a>(
        &self,
        parent: &'a mut Element,
        reg: &mut ErrorRegister,
    ) -> Result<&'a mut Element, ModelError> {
        expect_parent(parent, Self::PARENT)?;
        let node = parent.add_child(Self::ELEMENT);

        write_req_str(
            node,
            "AuditFileVersion",
            "Header.AuditFileVersion",
            self.audit_file_version.value().map(String::as_str),
            reg,
        );
        write_req_str(
            node,
            "CompanyID",
            "Header.CompanyID",
            self.company_id.value().map(String::as_str),
            reg,
        );
        write_req_int(
            node,
            "TaxRegistrationNumber",
            "Header.TaxRegistrationNumber",
            self.tax_registration_number.value().copied(),
            reg,
        );
        write_req_str(
            node,
            "TaxAccountingBasis",
            "Header.TaxAccountingBasis",
            self.tax_accounting_basis.value().map(|b| b.code()),
            reg,
        );
        write_req_str(
            node,
            "CompanyName",
            "Header.CompanyName",
            self.company_name.value().map(String::as_str),
            reg,
        );
        write_req_node(node, "Header.CompanyAddress", self.company_address.value(), reg)?;
        write_req_int(
            node,
            "FiscalYear",
            "Header.FiscalYear",
            self.fiscal_year.value().copied(),
            reg,
        );
        write_req_date(
            node,
            "StartDate",
            "Header.StartDate",
            self.start_date.value().copied(),
            reg,
        );
        write_req_date(
            node,
            "EndDate",
            "Header.EndDate",
            self.end_date.value().copied(),
            reg,
        );
        write_req_str(
            node,
            "CurrencyCode",
            "Header.CurrencyCode",
            self.currency_code.value().map(String::as_str),
            reg,
        );
        write_req_date(
            node,
            "DateCreated",
            "Header.DateCreated",
            self.date_created.value().copied(),
            reg,
        );
        write_req_str(
            node,
            "TaxEntity",
            "Header.TaxEntity",
            self.tax_entity.value().map(String::as_str),
            reg,
        );
        write_req_str(
            node,
            "ProductCompanyTaxID",
            "Header.ProductCompanyTaxID",
            self.product_company_tax_id.value().map(String::as_str),
            reg,
        );
        write_req_int(
            node,
            "SoftwareCertificateNumber",
            "Header.SoftwareCertificateNumber",
            self.software_certificate_number.value().copied(),
            reg,
        );
        write_req_str(
            node,
            "ProductID",
            "Header.ProductID",
            self.product_id.value().map(String::as_str),
            reg,
        );
        write_req_str(
            node,
            "ProductVersion",
            "Header.ProductVersion",
            self.product_version.value().map(String::as_str),
            reg,
        );
        write_opt_str(node, "HeaderComment", self.header_comment.as_deref());
        write_opt_str(node, "Telephone", self.telephone.as_deref());
        write_opt_str(node, "Email", self.email.as_deref());

        Ok(node)
    }

    fn read_xml(node: &Element, reg: &mut ErrorRegister) -> Result<Self, ModelError> {
        expect_element(node, Self::ELEMENT)?;
        let mut header = Header::new();

        if let Some(text) = node.child_text("AuditFileVersion") {
            header.set_audit_file_version(text, reg);
        }
        if let Some(text) = node.child_text("CompanyID") {
            header.set_company_id(text, reg);
        }
        if let Some(value) = read_int(
            node,
            "TaxRegistrationNumber",
            "Header.TaxRegistrationNumber",
            reg,
        ) {
            header.set_tax_registration_number(value, reg);
        }
        if let Some(text) = node.child_text("TaxAccountingBasis") {
            header.set_tax_accounting_basis(TaxAccountingBasis::from_code(text)?);
        }
        if let Some(text) = node.child_text("CompanyName") {
            header.set_company_name(text, reg);
        }
        header.company_address = read_req_node(node, reg)?;
        if let Some(year) = read_int(node, "FiscalYear", "Header.FiscalYear", reg) {
            header.set_fiscal_year(year)?;
        }
        if let Some(date) = read_date(node, "StartDate", "Header.StartDate", reg) {
            header.set_start_date(date);
        }
        if let Some(date) = read_date(node, "EndDate", "Header.EndDate", reg) {
            header.set_end_date(date);
        }
        if let Some(text) = node.child_text("CurrencyCode") {
            header.set_currency_code(text, reg);
        }
        if let Some(date) = read_date(node, "DateCreated", "Header.DateCreated", reg) {
            header.set_date_created(date);
        }
        if let Some(text) = node.child_text("TaxEntity") {
            header.set_tax_entity(text, reg);
        }
        if let Some(text) = node.child_text("ProductCompanyTaxID") {
            header.set_product_company_tax_id(text, reg);
        }
        if let Some(value) = read_int(
            node,
            "SoftwareCertificateNumber",
            "Header.SoftwareCertificateNumber",
            reg,
        ) {
            header.set_software_certificate_number(value);
        }
        if let Some(text) = node.child_text("ProductID") {
            header.set_product_id(text, reg);
        }
        if let Some(text) = node.child_text("ProductVersion") {
            header.set_product_version(text, reg);
        }
        if let Some(text) = node.child_text("HeaderComment") {
            header.set_header_comment(text, reg);
        }
        if let Some(text) = node.child_text("Telephone") {
            header.set_telephone(text, reg);
        }
        if let Some(text) = node.child_text("Email") {
            header.set_email(text, reg);
        }

        Ok(header)
    }
}

/// 1.7: the company's registered address.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyAddress {
    building_number: Option<String>,
    street_name: Option<String>,
    address_detail: Required<String>,
    city: Required<String>,
    postal_code: Required<String>,
    region: Option<String>,
    country: Required<String>,
}

impl CompanyAddress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_building_number(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        set_opt_text(
            &mut self.building_number,
            "CompanyAddress.BuildingNumber",
            raw,
            1,
            10,
            reg,
        )
    }

    pub fn building_number(&self) -> Option<&str> {
        self.building_number.as_deref()
    }

    pub fn set_street_name(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        set_opt_text(
            &mut self.street_name,
            "CompanyAddress.StreetName",
            raw,
            1,
            200,
            reg,
        )
    }

    pub fn street_name(&self) -> Option<&str> {
        self.street_name.as_deref()
    }

    pub fn set_address_detail(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        set_req_text(
            &mut self.address_detail,
            "CompanyAddress.AddressDetail",
            raw,
            1,
            210,
            reg,
        )
    }

    pub fn address_detail(&self) -> Result<&str, ModelError> {
        self.address_detail
            .get("CompanyAddress.AddressDetail")
            .map(String::as_str)
    }

    pub fn set_city(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        set_req_text(&mut self.city, "CompanyAddress.City", raw, 1, 50, reg)
    }

    pub fn city(&self) -> Result<&str, ModelError> {
        self.city.get("CompanyAddress.City").map(String::as_str)
    }

    /// `1234-567`; other shapes are recorded and stored.
    pub fn set_postal_code(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        let ok = match validate::postal_code(raw) {
            Ok(_) => true,
            Err(fault) => {
                reg.add_on_set_value(Fault::new("CompanyAddress.PostalCode", fault.to_string()));
                false
            }
        };
        self.postal_code.set(raw.to_string());
        ok
    }

    pub fn postal_code(&self) -> Result<&str, ModelError> {
        self.postal_code
            .get("CompanyAddress.PostalCode")
            .map(String::as_str)
    }

    pub fn set_region(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        set_opt_text(&mut self.region, "CompanyAddress.Region", raw, 1, 50, reg)
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// The company address is always in Portugal.
    pub fn set_country(&mut self, raw: &str, reg: &mut ErrorRegister) -> bool {
        let ok = raw == "PT";
        if !ok {
            reg.add_on_set_value(Fault::new(
                "CompanyAddress.Country",
                format!("must be PT, got '{raw}'"),
            ));
        }
        self.country.set(raw.to_string());
        ok
    }

    pub fn country(&self) -> Result<&str, ModelError> {
        self.country.get("CompanyAddress.Country").map(String::as_str)
    }
}

impl XmlNode for CompanyAddress {
    const ELEMENT: &'static str = "CompanyAddress";
    const PARENT: &'static str = "Header";

    fn write_xml<'a>(
        &self,
        parent: &'a mut Element,
        reg: &mut ErrorRegister,
    ) -> Result<&'a mut Element, ModelError> {
        expect_parent(parent, Self::PARENT)?;
        let node = parent.add_child(Self::ELEMENT);

        write_opt_str(node, "BuildingNumber", self.building_number.as_deref());
        write_opt_str(node, "StreetName", self.street_name.as_deref());
        write_req_str(
            node,
            "AddressDetail",
            "CompanyAddress.AddressDetail",
            self.address_detail.value().map(String::as_str),
            reg,
        );
        write_req_str(
            node,
            "City",
            "CompanyAddress.City",
            self.city.value().map(String::as_str),
            reg,
        );
        write_req_str(
            node,
            "PostalCode",
            "CompanyAddress.PostalCode",
            self.postal_code.value().map(String::as_str),
            reg,
        );
        write_opt_str(node, "Region", self.region.as_deref());
        write_req_str(
            node,
            "Country",
            "CompanyAddress.Country",
            self.country.value().map(String::as_str),
            reg,
        );

        Ok(node)
    }

    fn read_xml(node: &Element, reg: &mut ErrorRegister) -> Result<Self, ModelError> {
        expect_element(node, Self::ELEMENT)?;
        let mut address = CompanyAddress::new();

        if let Some(text) = node.child_text("BuildingNumber") {
            address.set_building_number(text, reg);
        }
        if let Some(text) = node.child_text("StreetName") {
            address.set_street_name(text, reg);
        }
        if let Some(text) = node.child_text("AddressDetail") {
            address.set_address_detail(text, reg);
        }
        if let Some(text) = node.child_text("City") {
            address.set_city(text, reg);
        }
        if let Some(text) = node.child_text("PostalCode") {
            address.set_postal_code(text, reg);
        }
        if let Some(text) = node.child_text("Region") {
            address.set_region(text, reg);
        }
        if let Some(text) = node.child_text("Country") {
            address.set_country(text, reg);
        }

        Ok(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_header(reg: &mut ErrorRegister) -> Header {
        let mut address = CompanyAddress::new();
        address.set_address_detail("Rua das Flores 10", reg);
        address.set_city("Lisboa", reg);
        address.set_postal_code("1000-205", reg);
        address.set_country("PT", reg);

        let mut header = Header::new();
        header.set_audit_file_version(AUDIT_FILE_VERSION, reg);
        header.set_company_id("Conservatória 509876543", reg);
        header.set_tax_registration_number(509_876_543, reg);
        header.set_tax_accounting_basis(TaxAccountingBasis::Invoicing);
        header.set_company_name("Empresa Exemplo Lda", reg);
        header.set_company_address(address);
        header.set_fiscal_year(2024).unwrap();
        header.set_start_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        header.set_end_date(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
        header.set_currency_code("EUR", reg);
        header.set_date_created(NaiveDate::from_ymd_opt(2025, 1, 10).unwrap());
        header.set_tax_entity("Global", reg);
        header.set_product_company_tax_id("598765432", reg);
        header.set_software_certificate_number(9999);
        header.set_product_id("Faturador/Empresa Software", reg);
        header.set_product_version("2.4.1", reg);
        header
    }

    #[test]
    fn header_roundtrip() {
        let mut reg = ErrorRegister::new();
        let header = sample_header(&mut reg);

        let mut parent = Element::new("AuditFile");
        header.write_xml(&mut parent, &mut reg).unwrap();
        let back = Header::read_xml(parent.first_child("Header").unwrap(), &mut reg).unwrap();

        assert_eq!(back, header);
        assert!(reg.is_clean(), "unexpected faults: {reg:?}");
    }

    #[test]
    fn company_name_truncates_at_100_characters() {
        let mut reg = ErrorRegister::new();
        let mut header = Header::new();
        let long = "x".repeat(130);
        assert!(header.set_company_name(&long, &mut reg));
        assert_eq!(header.company_name().unwrap().chars().count(), 100);
        assert!(reg.is_clean());
    }

    #[test]
    fn fiscal_year_range_is_fatal() {
        let mut header = Header::new();
        assert!(header.set_fiscal_year(2024).is_ok());
        assert!(matches!(
            header.set_fiscal_year(188),
            Err(ModelError::OutOfRange { .. })
        ));
    }

    #[test]
    fn nif_and_postal_code_are_soft() {
        let mut reg = ErrorRegister::new();
        let mut header = Header::new();
        assert!(!header.set_tax_registration_number(1234, &mut reg));
        assert_eq!(header.tax_registration_number().unwrap(), 1234);

        let mut address = CompanyAddress::new();
        assert!(!address.set_postal_code("1000", &mut reg));
        assert_eq!(address.postal_code().unwrap(), "1000");

        assert_eq!(reg.on_set_value().len(), 2);
    }

    #[test]
    fn product_id_needs_a_slash() {
        let mut reg = ErrorRegister::new();
        let mut header = Header::new();
        assert!(!header.set_product_id("Faturador", &mut reg));
        assert_eq!(header.product_id().unwrap(), "Faturador");
        assert_eq!(reg.on_set_value().len(), 1);
    }
}
