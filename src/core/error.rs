use thiserror::Error;

use crate::xml::XmlError;

/// Fatal errors — contract violations that abort the current operation.
///
/// Everything that is merely *invalid data* goes through the
/// [`ErrorRegister`](super::ErrorRegister) instead and never interrupts a
/// build or parse.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ModelError {
    /// A node was asked to serialize into a container with the wrong tag.
    #[error("expected parent element <{expected}>, got <{actual}>")]
    WrongParent {
        expected: &'static str,
        actual: String,
    },

    /// A node was asked to deserialize from an element with the wrong tag.
    #[error("expected element <{expected}>, got <{actual}>")]
    WrongElement {
        expected: &'static str,
        actual: String,
    },

    /// A required field was read before anything was stored in it.
    #[error("required field {0} was read before being set")]
    UnsetField(&'static str),

    /// One of a mutually exclusive pair was set while the other holds a
    /// value. Clear the sibling first.
    #[error("{field} cannot be set while {other} is set; clear {other} first")]
    ExclusiveFields {
        field: &'static str,
        other: &'static str,
    },

    /// A closed-vocabulary code was constructed from a value outside the set.
    #[error("unknown {kind} code '{value}'")]
    UnknownCode { kind: &'static str, value: String },

    /// A structural numeric field was set outside its legal range.
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// The underlying XML library failed.
    #[error(transparent)]
    Xml(#[from] XmlError),
}

pub(crate) fn check_range(
    field: &'static str,
    value: i64,
    min: i64,
    max: i64,
) -> Result<(), ModelError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ModelError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_check() {
        assert!(check_range("Invoice.Period", 12, 1, 12).is_ok());
        let err = check_range("Invoice.Period", 13, 1, 12).unwrap_err();
        assert!(err.to_string().contains("Invoice.Period"));
        assert!(err.to_string().contains("13"));
    }
}
