use thiserror::Error;

/// Result alias used throughout the crate.
pub type SepaResult<T> = Result<T, SepaError>;

/// Errors raised while building, validating or serializing a SEPA document.
///
/// Validation is fail-fast: the first violated rule is returned and
/// serialization is aborted. Field-carrying variants name the offending
/// member with a dotted path (e.g. `"creditor.iban"`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SepaError {
    /// The pain format identifier is not one of the supported formats.
    #[error("pain format \"{0}\" is not supported")]
    UnsupportedFormat(String),

    /// An element or attribute name is not a valid XML name.
    #[error("not a valid xml name: '{0}'")]
    InvalidXmlName(String),

    /// Text or attribute value contains characters outside the XML 1.0 set.
    #[error("not a valid xml text for {context}: {value:?}")]
    InvalidXmlText { context: String, value: String },

    /// A node carries both child elements and text.
    #[error("node {0} has children and text, which is not supported")]
    MixedContent(String),

    /// String length outside the permitted bounds.
    #[error("{field} has invalid string length {len} (expected {min}..={max}): {value:?}")]
    FieldLength {
        field: String,
        value: String,
        len: usize,
        min: usize,
        max: usize,
    },

    /// Numeric value outside the permitted range or precision.
    #[error("{field} is out of range ({reason}): {value}")]
    FieldRange {
        field: String,
        value: String,
        reason: String,
    },

    /// Value is not one of the allowed choices.
    #[error("{field} must have any value of: {} (found: {value})", allowed.join(" "))]
    InvalidEnumValue {
        field: String,
        value: String,
        allowed: Vec<String>,
    },

    /// A required date is missing.
    #[error("{0} has no valid date")]
    InvalidDate(String),

    /// IBAN fails structural or MOD-97 validation.
    #[error("{field} has invalid IBAN \"{value}\"")]
    InvalidIban { field: String, value: String },

    /// Creditor Scheme ID fails MOD-97 validation.
    #[error("{field} is not a valid creditor scheme id \"{value}\"")]
    InvalidCreditorId { field: String, value: String },

    /// The BIC country does not belong to the IBAN country.
    #[error("{field}: country mismatch in BIC/IBAN ({bic} / {iban})")]
    CountryMismatch {
        field: String,
        bic: String,
        iban: String,
    },

    /// An identifier violates the SEPA identifier rules.
    #[error("{field} {reason} (found \"{value}\")")]
    InvalidIdentifier {
        field: String,
        value: String,
        reason: String,
    },

    /// A payment info block has no transactions.
    #[error("payment info \"{0}\" must contain at least one transaction")]
    MissingTransactions(String),
}
