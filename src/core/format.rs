use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::SepaError;
use super::types::{PaymentMethod, Role};

/// ISO 20022 namespace prefix; the format identifier is appended.
pub const ISO20022_NS_PREFIX: &str = "urn:iso:std:iso:20022:tech:xsd:";

/// XML Schema instance namespace.
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Supported pain message formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PainFormat {
    /// pain.001.001.02: credit transfer, pre-SEPA rulebook layout.
    #[serde(rename = "pain.001.001.02")]
    Pain001_001_02,
    /// pain.001.001.03: credit transfer.
    #[serde(rename = "pain.001.001.03")]
    Pain001_001_03,
    /// pain.001.001.08: credit transfer.
    #[serde(rename = "pain.001.001.08")]
    Pain001_001_08,
    /// pain.001.001.09: credit transfer (SEPA 2019 rulebook).
    #[serde(rename = "pain.001.001.09")]
    Pain001_001_09,
    /// pain.008.001.02: direct debit.
    #[serde(rename = "pain.008.001.02")]
    Pain008_001_02,
    /// pain.008.001.08: direct debit (SEPA 2019 rulebook).
    #[serde(rename = "pain.008.001.08")]
    Pain008_001_08,
}

impl PainFormat {
    pub const ALL: [PainFormat; 6] = [
        Self::Pain001_001_02,
        Self::Pain001_001_03,
        Self::Pain001_001_08,
        Self::Pain001_001_09,
        Self::Pain008_001_02,
        Self::Pain008_001_08,
    ];

    /// The format identifier, e.g. `"pain.008.001.02"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pain001_001_02 => "pain.001.001.02",
            Self::Pain001_001_03 => "pain.001.001.03",
            Self::Pain001_001_08 => "pain.001.001.08",
            Self::Pain001_001_09 => "pain.001.001.09",
            Self::Pain008_001_02 => "pain.008.001.02",
            Self::Pain008_001_08 => "pain.008.001.08",
        }
    }

    /// Local name of the message element below `Document`.
    ///
    /// pain.001.001.02 predates the `CstmrCdtTrfInitn` naming and uses the
    /// format identifier itself.
    pub fn root_element(&self) -> &'static str {
        match self {
            Self::Pain001_001_02 => "pain.001.001.02",
            Self::Pain001_001_03 | Self::Pain001_001_08 | Self::Pain001_001_09 => {
                "CstmrCdtTrfInitn"
            }
            Self::Pain008_001_02 | Self::Pain008_001_08 => "CstmrDrctDbtInitn",
        }
    }

    /// Numeric layout version that gates structural branches.
    ///
    /// The last two digits of the identifier, plus one for the direct debit
    /// family: pain.008.001.02 shares the pain.001.001.03 layout and
    /// pain.008.001.08 the pain.001.001.09 layout.
    pub fn xml_version(&self) -> u32 {
        let id = self.as_str();
        let minor: u32 = id[id.len() - 2..].parse().unwrap_or_default();
        match self.method() {
            PaymentMethod::DirectDebit => minor + 1,
            PaymentMethod::Transfer => minor,
        }
    }

    pub fn method(&self) -> PaymentMethod {
        if self.as_str().starts_with("pain.001") {
            PaymentMethod::Transfer
        } else {
            PaymentMethod::DirectDebit
        }
    }

    /// Default namespace of the `Document` element.
    pub fn namespace(&self) -> String {
        format!("{ISO20022_NS_PREFIX}{}", self.as_str())
    }

    /// Value of `xsi:schemaLocation`.
    pub fn schema_location(&self) -> String {
        format!("{} {}.xsd", self.namespace(), self.as_str())
    }

    // -- structural branches -------------------------------------------

    /// `BtchBookg` and `Grpg` live in the group header.
    pub fn grouping_in_header(&self) -> bool {
        self.xml_version() == 2
    }

    /// `BtchBookg`, `NbOfTxs` and `CtrlSum` are repeated per payment info.
    pub fn totals_in_payment_info(&self) -> bool {
        self.xml_version() >= 3
    }

    /// `ReqdExctnDt` wraps the date in a `Dt` child.
    pub fn nested_execution_date(&self) -> bool {
        self.xml_version() >= 8
    }

    /// Element name carrying an agent's BIC.
    pub fn bic_element(&self) -> &'static str {
        if self.xml_version() >= 8 { "BICFI" } else { "BIC" }
    }

    /// Party whose account the payment info block describes.
    pub fn principal_role(&self) -> Role {
        self.method().principal_role()
    }
}

impl fmt::Display for PainFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PainFormat {
    type Err = SepaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| SepaError::UnsupportedFormat(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trip() {
        for f in PainFormat::ALL {
            assert_eq!(f.as_str().parse::<PainFormat>().unwrap(), f);
            assert_eq!(f.to_string(), f.as_str());
        }
    }

    #[test]
    fn unknown_format_rejected() {
        let err = "pain.001.001.01".parse::<PainFormat>().unwrap_err();
        assert_eq!(err, SepaError::UnsupportedFormat("pain.001.001.01".into()));
        assert!("".parse::<PainFormat>().is_err());
        assert!("PAIN.008.001.02".parse::<PainFormat>().is_err());
    }

    #[test]
    fn xml_versions() {
        assert_eq!(PainFormat::Pain001_001_02.xml_version(), 2);
        assert_eq!(PainFormat::Pain001_001_03.xml_version(), 3);
        assert_eq!(PainFormat::Pain001_001_08.xml_version(), 8);
        assert_eq!(PainFormat::Pain001_001_09.xml_version(), 9);
        assert_eq!(PainFormat::Pain008_001_02.xml_version(), 3);
        assert_eq!(PainFormat::Pain008_001_08.xml_version(), 9);
    }

    #[test]
    fn root_elements() {
        assert_eq!(PainFormat::Pain001_001_02.root_element(), "pain.001.001.02");
        assert_eq!(PainFormat::Pain001_001_09.root_element(), "CstmrCdtTrfInitn");
        assert_eq!(PainFormat::Pain008_001_02.root_element(), "CstmrDrctDbtInitn");
    }

    #[test]
    fn methods() {
        assert_eq!(PainFormat::Pain001_001_03.method(), PaymentMethod::Transfer);
        assert_eq!(PainFormat::Pain008_001_08.method(), PaymentMethod::DirectDebit);
        assert_eq!(PainFormat::Pain008_001_08.principal_role(), Role::Creditor);
        assert_eq!(PainFormat::Pain001_001_09.principal_role(), Role::Debtor);
    }

    #[test]
    fn structural_branches() {
        let v2 = PainFormat::Pain001_001_02;
        assert!(v2.grouping_in_header());
        assert!(!v2.totals_in_payment_info());
        assert_eq!(v2.bic_element(), "BIC");

        let dd2 = PainFormat::Pain008_001_02;
        assert!(!dd2.grouping_in_header());
        assert!(dd2.totals_in_payment_info());
        assert!(!dd2.nested_execution_date());

        let ct9 = PainFormat::Pain001_001_09;
        assert!(ct9.nested_execution_date());
        assert_eq!(ct9.bic_element(), "BICFI");
        assert_eq!(PainFormat::Pain001_001_08.bic_element(), "BICFI");
        assert_eq!(PainFormat::Pain001_001_03.bic_element(), "BIC");
    }

    #[test]
    fn namespace_and_schema_location() {
        let f = PainFormat::Pain001_001_09;
        assert_eq!(f.namespace(), "urn:iso:std:iso:20022:tech:xsd:pain.001.001.09");
        assert_eq!(
            f.schema_location(),
            "urn:iso:std:iso:20022:tech:xsd:pain.001.001.09 pain.001.001.09.xsd"
        );
    }

    #[test]
    fn serde_uses_identifier() {
        let json = serde_json::to_string(&PainFormat::Pain008_001_02).unwrap();
        assert_eq!(json, "\"pain.008.001.02\"");
        let back: PainFormat = serde_json::from_str(&json).unwrap();
        assert_eq!(back, PainFormat::Pain008_001_02);
    }
}
