//! Pure field validators.
//!
//! Each validator takes a raw value plus its constraints and returns either
//! the normalized value or a [`ValueFault`]. Callers decide what a fault
//! means: fatal in construction contexts, recorded-and-continue in setter
//! contexts.

use std::borrow::Cow;

use rust_decimal::Decimal;
use thiserror::Error;

/// Why a raw value failed its constraint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ValueFault {
    #[error("must not be empty")]
    Empty,

    #[error("shorter than minimum length {min} (got {len})")]
    TooShort { min: usize, len: usize },

    #[error("does not match pattern {pattern}")]
    Pattern { pattern: &'static str },

    #[error("must not be negative, got {0}")]
    Negative(Decimal),

    #[error("not a valid decimal: '{0}'")]
    BadDecimal(String),

    #[error("not a valid integer: '{0}'")]
    BadInteger(String),

    #[error("not a valid date: '{0}'")]
    BadDate(String),

    #[error("not a valid date-time: '{0}'")]
    BadDateTime(String),

    #[error("{0}")]
    Other(&'static str),
}

/// Length-bounded text. Over `max` characters truncates silently — that is
/// a success, never a fault. Under `min` (or empty when `min >= 1`) fails.
pub fn bounded_text(raw: &str, min: usize, max: usize) -> Result<Cow<'_, str>, ValueFault> {
    let len = raw.chars().count();
    if len < min {
        return if raw.is_empty() {
            Err(ValueFault::Empty)
        } else {
            Err(ValueFault::TooShort { min, len })
        };
    }
    if len > max {
        Ok(Cow::Owned(raw.chars().take(max).collect()))
    } else {
        Ok(Cow::Borrowed(raw))
    }
}

/// Non-negative monetary amount.
pub fn non_negative(value: Decimal) -> Result<Decimal, ValueFault> {
    if value < Decimal::ZERO {
        Err(ValueFault::Negative(value))
    } else {
        Ok(value)
    }
}

/// Shape of every document identifier: type, space, series, slash, number.
pub const DOC_REF_PATTERN: &str = "[^ ]+ [^/ ]+/[0-9]+";

/// A document reference decomposed into its three parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocRef {
    pub doc_type: String,
    pub series: String,
    pub number: u64,
}

/// Parse a document reference like `"FT FT2024/35"`.
pub fn doc_ref(raw: &str) -> Result<DocRef, ValueFault> {
    let fault = ValueFault::Pattern {
        pattern: DOC_REF_PATTERN,
    };

    let (doc_type, rest) = raw.split_once(' ').ok_or(fault.clone())?;
    if doc_type.is_empty() || rest.contains(' ') {
        return Err(fault);
    }
    let (series, number) = rest.split_once('/').ok_or(fault.clone())?;
    if series.is_empty()
        || number.is_empty()
        || !number.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(fault);
    }
    let number: u64 = number.parse().map_err(|_| fault)?;

    Ok(DocRef {
        doc_type: doc_type.to_string(),
        series: series.to_string(),
        number,
    })
}

/// Portuguese postal code shape, `1234-567`.
pub const POSTAL_CODE_PATTERN: &str = "[0-9]{4}-[0-9]{3}";

pub fn postal_code(raw: &str) -> Result<&str, ValueFault> {
    let bytes = raw.as_bytes();
    let ok = bytes.len() == 8
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes[4] == b'-'
        && bytes[5..].iter().all(u8::is_ascii_digit);
    if ok {
        Ok(raw)
    } else {
        Err(ValueFault::Pattern {
            pattern: POSTAL_CODE_PATTERN,
        })
    }
}

/// Tax country/region: `PT`, the autonomous regions, or a 2-letter ISO code.
pub fn tax_country_region(raw: &str) -> Result<&str, ValueFault> {
    let ok = matches!(raw, "PT" | "PT-AC" | "PT-MA")
        || (raw.len() == 2 && raw.bytes().all(|b| b.is_ascii_uppercase()));
    if ok {
        Ok(raw)
    } else {
        Err(ValueFault::Other(
            "must be PT, PT-AC, PT-MA or a 2-letter country code",
        ))
    }
}

/// Portuguese NIF: nine digits, checked softly at the setter.
pub fn nif(value: u32) -> Result<u32, ValueFault> {
    if (100_000_000..=999_999_999).contains(&value) {
        Ok(value)
    } else {
        Err(ValueFault::Other("must be a 9-digit tax number"))
    }
}
