//! # saft-pt
//!
//! Typed object model for the Portuguese SAF-T (PT) audit file: one type
//! per schema element, validated setters, soft-failure accumulation, and
//! exact XML round-tripping against schema version 1.04_01.
//!
//! All monetary values use [`rust_decimal::Decimal`] — never floating point.
//! Element names follow the data dictionary of Portaria 302/2016 exactly.
//!
//! ## Error model
//!
//! Two tiers, kept strictly apart:
//!
//! - **Fatal** ([`ModelError`]): wrong parent/element tag on a round-trip,
//!   reading a required field before it was set, setting one of a mutually
//!   exclusive pair while the sibling is set, constructing a code outside
//!   its vocabulary, structural numbers out of range. These abort the
//!   current operation — they mean the API was misused, not that the data
//!   is bad.
//! - **Recorded** ([`ErrorRegister`]): everything else. Length, pattern and
//!   sign violations store the offending value anyway and append a fault;
//!   required fields still unset at write time emit an empty element and
//!   append a fault; the XML library's own failures land in their own
//!   bucket. A document is acceptable only when every bucket is empty.
//!
//! ## Quick start
//!
//! ```rust
//! use rust_decimal_macros::dec;
//! use saft_pt::ErrorRegister;
//! use saft_pt::model::sales::{DocumentTotals, Invoice};
//!
//! let mut reg = ErrorRegister::new();
//!
//! let mut invoice = Invoice::new();
//! assert!(invoice.set_invoice_no("FT FT2024/35", &mut reg));
//!
//! // Invalid values are stored and recorded, never thrown.
//! let mut totals = DocumentTotals::new();
//! assert!(!totals.set_gross_total(dec!(-12.30), &mut reg));
//! assert_eq!(totals.gross_total().unwrap(), dec!(-12.30));
//! assert_eq!(reg.on_set_value().len(), 1);
//! ```

pub mod core;
pub mod model;
pub mod xml;

// Re-export the core and model surfaces at the crate root for convenience.
pub use crate::core::*;
pub use crate::model::*;
