//! # sepa-pain
//!
//! ISO 20022 payment initiation messages for SEPA: credit transfers
//! (pain.001.001.02/03/08/09) and direct debits (pain.008.001.02/08).
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//! Dates are [`chrono`] calendar values written without time zone.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//! use sepa_pain::core::*;
//!
//! let mut doc = Document::new(PainFormat::Pain008_001_02);
//! doc.group_header.id = "MSG-2024-001".into();
//! doc.group_header.initiator_name = "Example GmbH".into();
//!
//! let mut info = doc.create_payment_info();
//! info.collection_date = NaiveDate::from_ymd_opt(2024, 6, 15);
//! info.creditor = Party {
//!     id: Some("DE98ZZZ09999999999".into()),
//!     name: "Example GmbH".into(),
//!     iban: "DE43500105178994141576".into(),
//!     ..Party::default()
//! };
//! let info = doc.add_payment_info(info);
//!
//! let mut tx = info.create_transaction();
//! tx.end_to_end_id = "INV-0815".into();
//! tx.amount = dec!(49.90);
//! tx.mandate_id = "MANDATE-1".into();
//! tx.mandate_signature_date = NaiveDate::from_ymd_opt(2024, 1, 2);
//! tx.debtor.name = "Max Mustermann".into();
//! tx.debtor.iban = "DE87123456781234567890".into();
//! info.add_transaction(tx);
//!
//! let xml = doc.to_xml_string().unwrap();
//! assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?><Document"#));
//! assert!(xml.contains("<CtrlSum>49.90</CtrlSum>"));
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`core`] | Payment graph, formats, validation, IBAN / creditor id checksums |
//! | [`pain`] | Constrained XML tree and document serialization |

pub mod core;
pub mod pain;

// Re-export core types at crate root for convenience
pub use crate::core::*;
