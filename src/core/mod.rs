//! Core payment types, validation, and checksums.
//!
//! This module holds the typed payment graph (document, payment info
//! blocks, transactions), the pain format registry, and the SEPA field
//! rules applied before serialization.

mod amendment;
pub mod checksum;
pub mod codes;
mod config;
mod error;
mod format;
mod types;
mod validation;

pub use amendment::*;
pub use checksum::{checksum_creditor_id, checksum_iban, validate_creditor_id, validate_iban};
pub use config::*;
pub use error::*;
pub use format::*;
pub use types::*;
pub use validation::*;
