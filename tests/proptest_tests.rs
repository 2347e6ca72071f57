//! Property-based tests for checksums, identifiers and XML text handling.
//!
//! Run with: `cargo test --test proptest_tests`

mod common;

use common::*;
use proptest::prelude::*;
use rust_decimal::Decimal;
use sepa_pain::core::*;
use sepa_pain::pain::XmlNode;

/// Swap the check digits of `code` for a different pair.
fn bump_check_digits(code: &str) -> String {
    let check: u32 = code[2..4].parse().unwrap();
    format!("{}{:02}{}", &code[..2], check + 1, &code[4..])
}

proptest! {
    /// Computed IBAN check digits always validate.
    #[test]
    fn computed_iban_is_valid(country in "[A-Z]{2}", bban in "[0-9A-Z]{10,30}") {
        let iban = checksum_iban(&format!("{country}00{bban}"));
        prop_assert!(validate_iban(&iban), "{}", iban);
        prop_assert_eq!(&iban[..2], country.as_str());
        prop_assert_eq!(&iban[4..], bban.as_str());
    }

    /// Any other pair of check digits fails.
    #[test]
    fn changed_iban_check_digits_fail(country in "[A-Z]{2}", bban in "[0-9]{10,30}") {
        let iban = checksum_iban(&format!("{country}00{bban}"));
        prop_assert!(!validate_iban(&bump_check_digits(&iban)));
    }

    /// Computed creditor id check digits always validate, whatever the
    /// business code.
    #[test]
    fn computed_creditor_id_is_valid(
        country in "[A-Z]{2}",
        code in "[A-Z0-9]{3}",
        other_code in "[A-Z0-9]{3}",
        national in "[0-9A-Z]{1,28}",
    ) {
        let cid = checksum_creditor_id(&format!("{country}00{code}{national}"));
        prop_assert!(validate_creditor_id(&cid), "{}", cid);
        let swapped = format!("{}{other_code}{}", &cid[..4], &cid[7..]);
        prop_assert!(validate_creditor_id(&swapped));
        prop_assert!(!validate_creditor_id(&bump_check_digits(&cid)));
    }

    /// Identifiers from the SEPA character set without slashes are accepted.
    #[test]
    fn sepa_identifiers_are_accepted(id in "[A-Za-z0-9+?:().,' -]{0,35}") {
        prop_assert!(assert_sepa_identifier(&id, 35, true, "id").is_ok());
    }

    /// A leading slash is rejected regardless of the rest.
    #[test]
    fn leading_slash_is_rejected(rest in "[A-Za-z0-9]{0,34}", charset: bool) {
        let id = format!("/{rest}");
        prop_assert!(assert_sepa_identifier(&id, 35, charset, "id").is_err());
    }

    /// Printable text survives escaping and parsing unchanged.
    #[test]
    fn xml_text_round_trip(text in "\\PC{0,60}") {
        let node = XmlNode::with_text("Ustrd", &text).unwrap();
        let xml = node.render(0, false).unwrap();
        let parsed = parse(&xml);
        prop_assert_eq!(parsed.len(), 1);
        prop_assert_eq!(&parsed[0].text, &text);
    }

    /// Attribute values survive escaping and parsing unchanged.
    #[test]
    fn xml_attribute_round_trip(value in "\\PC{0,30}") {
        let mut node = XmlNode::new("InstdAmt").unwrap();
        node.set_attribute("Ccy", &value).unwrap();
        let xml = node.render(0, false).unwrap();
        let parsed = parse(&xml);
        prop_assert_eq!(&parsed[0].attributes, &vec![("Ccy".to_string(), value)]);
    }

    /// C0 control characters other than tab, LF and CR are never accepted.
    #[test]
    fn control_characters_are_rejected(
        prefix in "[a-z]{0,5}",
        c in prop::sample::select((0u8..0x20).filter(|b| !matches!(*b, 0x09 | 0x0A | 0x0D)).collect::<Vec<_>>()),
    ) {
        let text = format!("{prefix}{}", c as char);
        prop_assert!(XmlNode::with_text("Nm", &text).is_err());
    }

    /// Every valid amount renders with exactly two fraction digits.
    #[test]
    fn amounts_render_with_two_digits(cents in 1i64..=99_999_999_999) {
        let mut doc = transfer_document(PainFormat::Pain001_001_09);
        doc.payment_infos_mut()[0].transactions_mut()[0].amount = Decimal::new(cents, 2);
        let xml = doc.to_xml_string().unwrap();
        let expected = format!("{}.{:02}", cents / 100, cents % 100);
        prop_assert_eq!(text(&xml, "CdtTrfTxInf/Amt/InstdAmt"), expected.clone());
        prop_assert_eq!(text(&xml, "GrpHdr/CtrlSum"), expected);
    }

    /// The control sum is the total of all transaction amounts.
    #[test]
    fn control_sum_is_total(amounts in prop::collection::vec(1i64..1_000_000, 1..20)) {
        let mut doc = transfer_document(PainFormat::Pain001_001_03);
        doc.payment_infos_mut()[0].transactions_mut()[0].amount = Decimal::new(amounts[0], 2);
        for cents in &amounts[1..] {
            let mut tx = transfer_transaction("e2e");
            tx.amount = Decimal::new(*cents, 2);
            doc.payment_infos_mut()[0].add_transaction(tx);
        }
        let total: i64 = amounts.iter().sum();
        prop_assert_eq!(doc.control_sum().unwrap(), Decimal::new(total, 2));
        prop_assert_eq!(doc.transaction_count(), amounts.len());
    }
}
