use serde::{Deserialize, Serialize};

/// Per-document serialization settings.
///
/// There is no global state: every [`Document`](super::Document) carries its
/// own config, and [`Document::to_xml_string_with`](super::Document::to_xml_string_with)
/// accepts an override for a single call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SepaConfig {
    /// Joins parent and child ids (`MSG-1.0.3`). Read when a block or
    /// transaction is added; ids already assigned keep their separator.
    pub id_separator: char,
    /// Run field validation before serialization.
    pub validate: bool,
    /// Restrict identifiers to the SEPA character set. Only consulted when
    /// `validate` is set. Greek and Finnish domestic schemes allow more
    /// characters and need this switched off.
    pub validate_charset: bool,
    /// Indent with four spaces per level and break lines.
    pub pretty_print: bool,
}

impl Default for SepaConfig {
    fn default() -> Self {
        Self {
            id_separator: '.',
            validate: true,
            validate_charset: true,
            pretty_print: false,
        }
    }
}

impl SepaConfig {
    /// Config with all validation switched off.
    pub fn no_validation() -> Self {
        Self {
            validate: false,
            ..Self::default()
        }
    }

    pub fn with_id_separator(mut self, separator: char) -> Self {
        self.id_separator = separator;
        self
    }

    /// Enable or disable validation; `charset` only matters when `enabled`.
    pub fn with_validation(mut self, enabled: bool, charset: bool) -> Self {
        self.validate = enabled;
        self.validate_charset = charset;
        self
    }

    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    /// Whether the SEPA character-set check applies.
    pub fn charset_checks(&self) -> bool {
        self.validate && self.validate_charset
    }
}
