//! Property-based checks of the validator laws.

use proptest::prelude::*;
use rust_decimal::Decimal;
use saft_pt::model::sales;
use saft_pt::validate::{bounded_text, doc_ref};
use saft_pt::ErrorRegister;

proptest! {
    // Over-length input always truncates to the bound, never faults.
    #[test]
    fn truncation_law(s in ".{1,120}") {
        let mut reg = ErrorRegister::new();
        let mut invoice = sales::Invoice::new();

        let accepted = invoice.set_source_id(&s, &mut reg);
        prop_assert!(accepted);
        prop_assert!(reg.is_clean());

        let expected = s.chars().count().min(30);
        prop_assert_eq!(invoice.source_id().unwrap().chars().count(), expected);
    }

    #[test]
    fn bounded_text_never_exceeds_max(s in ".{0,200}", max in 1usize..80) {
        if let Ok(out) = bounded_text(&s, 0, max) {
            prop_assert!(out.chars().count() <= max);
            // The kept prefix is unchanged.
            prop_assert!(s.starts_with(out.as_ref()));
        }
    }

    // Negative amounts are stored, reported through the return value, and
    // recorded exactly once; non-negative amounts are clean.
    #[test]
    fn non_negative_law(units in any::<i64>()) {
        let value = Decimal::new(units, 2);
        let mut reg = ErrorRegister::new();
        let mut totals = sales::DocumentTotals::new();

        let accepted = totals.set_gross_total(value, &mut reg);
        prop_assert_eq!(totals.gross_total().unwrap(), value);
        if units < 0 {
            prop_assert!(!accepted);
            prop_assert_eq!(reg.on_set_value().len(), 1);
        } else {
            prop_assert!(accepted);
            prop_assert!(reg.is_clean());
        }
    }

    // Well-shaped references always decompose into their three parts.
    #[test]
    fn doc_ref_decomposition(
        doc_type in "[A-Z]{1,4}",
        series in "[A-Za-z0-9]{1,8}",
        number in 1u64..10_000_000,
    ) {
        let reference = format!("{doc_type} {series}/{number}");
        let parsed = doc_ref(&reference).unwrap();
        prop_assert_eq!(parsed.doc_type, doc_type);
        prop_assert_eq!(parsed.series, series);
        prop_assert_eq!(parsed.number, number);
    }

    // A reference without the mandatory space never parses.
    #[test]
    fn doc_ref_requires_the_space(tail in "[A-Za-z0-9/]{1,20}") {
        prop_assert!(doc_ref(&tail).is_err());
    }
}
