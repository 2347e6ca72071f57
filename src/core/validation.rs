use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::checksum::{validate_creditor_id, validate_iban};
use super::codes::{bic_country_accepted, is_known_country_code, is_known_currency_code};
use super::config::SepaConfig;
use super::error::{SepaError, SepaResult};
use super::types::*;

/// Smallest amount a transaction may carry.
pub const MIN_AMOUNT: Decimal = dec!(0.01);

/// Largest amount a transaction may carry.
pub const MAX_AMOUNT: Decimal = dec!(999999999.99);

const LOCAL_INSTRUMENTS: &[&str] = &["CORE", "COR1", "B2B"];
const SEQUENCE_TYPES: &[&str] = &["FRST", "RCUR", "OOFF", "FNAL"];
const GROUPINGS: &[&str] = &["MIXD", "GRPD", "SNGL"];
const BIC_LENGTHS: &[&str] = &["0", "8", "11"];

/// Validate the whole document top-down, stopping at the first violation.
///
/// Group header rules only apply to formats that carry grouping in the
/// header. Every payment info block is checked before its transactions.
pub fn validate_document(doc: &Document, config: &SepaConfig) -> SepaResult<()> {
    if doc.format().grouping_in_header() {
        validate_group_header(&doc.group_header)?;
    }
    for (i, info) in doc.payment_infos().iter().enumerate() {
        let prefix = format!("payment_infos[{i}]");
        validate_payment_info(info, &prefix)?;
        for (j, tx) in info.transactions().iter().enumerate() {
            let tx_prefix = format!("{prefix}.transactions[{j}]");
            validate_transaction(tx, info.method(), &tx_prefix, config.charset_checks())?;
        }
    }
    Ok(())
}

pub fn validate_group_header(header: &GroupHeader) -> SepaResult<()> {
    assert_one_of(&header.grouping, GROUPINGS, "group_header.grouping")
}

/// Validate a payment info block, excluding its transactions.
pub fn validate_payment_info(info: &PaymentInfo, prefix: &str) -> SepaResult<()> {
    assert_one_of(
        &info.local_instrument,
        LOCAL_INSTRUMENTS,
        &format!("{prefix}.local_instrument"),
    )?;
    assert_one_of(
        &info.sequence_type,
        SEQUENCE_TYPES,
        &format!("{prefix}.sequence_type"),
    )?;

    match info.method() {
        PaymentMethod::DirectDebit => {
            assert_date(info.collection_date, &format!("{prefix}.collection_date"))?;
        }
        PaymentMethod::Transfer => {
            assert_date(
                info.requested_execution_date,
                &format!("{prefix}.requested_execution_date"),
            )?;
        }
    }

    let (role, party) = info.principal();
    let party_prefix = format!("{prefix}.{}", role.field_name());

    if let Some(id) = party.id() {
        assert_creditor_id(id, &format!("{party_prefix}.id"))?;
    }
    if let Some(id) = info.legacy_original_creditor_id() {
        assert_creditor_id(id, &format!("{prefix}.original_creditor_scheme_id"))?;
    }

    validate_party(party, &party_prefix)?;

    if info.transactions().is_empty() {
        return Err(SepaError::MissingTransactions(info.id.clone()));
    }
    Ok(())
}

/// Validate a single transaction of a block paid with `method`.
pub fn validate_transaction(
    tx: &Transaction,
    method: PaymentMethod,
    prefix: &str,
    charset: bool,
) -> SepaResult<()> {
    assert_sepa_identifier(
        &tx.end_to_end_id,
        35,
        charset,
        &format!("{prefix}.end_to_end_id"),
    )?;
    assert_amount(tx.amount, &format!("{prefix}.amount"))?;

    if !is_known_currency_code(&tx.currency) {
        return Err(SepaError::InvalidIdentifier {
            field: format!("{prefix}.currency"),
            value: tx.currency.clone(),
            reason: "is not a known ISO 4217 currency code".into(),
        });
    }

    if let Some(code) = &tx.purpose_code {
        assert_length(code, 1, 4, &format!("{prefix}.purpose_code"))?;
    }

    if method == PaymentMethod::DirectDebit {
        assert_sepa_identifier(&tx.mandate_id, 35, charset, &format!("{prefix}.mandate_id"))?;
        assert_date(
            tx.mandate_signature_date,
            &format!("{prefix}.mandate_signature_date"),
        )?;
    }

    let (role, party) = tx.counterparty(method);
    validate_party(party, &format!("{prefix}.{}", role.field_name()))?;

    match &tx.remittance {
        Remittance::Unstructured(text) => {
            assert_length(text, 0, 140, &format!("{prefix}.remittance"))?;
        }
        Remittance::Structured(info) => {
            assert_length(&info.type_code, 0, 35, &format!("{prefix}.remittance.type_code"))?;
            assert_length(&info.issuer, 0, 35, &format!("{prefix}.remittance.issuer"))?;
            assert_length(&info.reference, 1, 35, &format!("{prefix}.remittance.reference"))?;
        }
    }

    if let Some(amendment) = &tx.amendment {
        if !amendment.original_creditor_scheme_id.is_empty() {
            assert_creditor_id(
                &amendment.original_creditor_scheme_id,
                &format!("{prefix}.amendment.original_creditor_scheme_id"),
            )?;
        }
    }
    Ok(())
}

fn validate_party(party: &Party, prefix: &str) -> SepaResult<()> {
    assert_length(&party.name, 0, 70, &format!("{prefix}.name"))?;
    if let Some(street) = &party.street {
        assert_length(street, 0, 70, &format!("{prefix}.street"))?;
    }
    if let Some(city) = &party.city {
        assert_length(city, 0, 70, &format!("{prefix}.city"))?;
    }
    if let Some(country) = party.country.as_deref().filter(|c| !c.is_empty()) {
        let field = format!("{prefix}.country");
        assert_length(country, 0, 2, &field)?;
        if !is_known_country_code(country) {
            return Err(SepaError::InvalidIdentifier {
                field,
                value: country.to_string(),
                reason: "is not a known ISO 3166-1 country code".into(),
            });
        }
    }

    assert_iban(&party.iban, &format!("{prefix}.iban"))?;

    let bic = party.bic().unwrap_or_default();
    assert_one_of(
        &bic.chars().count().to_string(),
        BIC_LENGTHS,
        &format!("{prefix}.bic.len"),
    )?;
    assert_country_match(party.bic(), &party.iban, &format!("{prefix}.bic"))
}

// ---------------------------------------------------------------------------
// Field assertions
// ---------------------------------------------------------------------------

/// Length of `value` in characters must be within `min..=max`.
pub fn assert_length(value: &str, min: usize, max: usize, field: &str) -> SepaResult<()> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(SepaError::FieldLength {
            field: field.to_string(),
            value: value.to_string(),
            len,
            min,
            max,
        });
    }
    Ok(())
}

pub fn assert_range(value: Decimal, min: Decimal, max: Decimal, field: &str) -> SepaResult<()> {
    if value < min || value > max {
        return Err(SepaError::FieldRange {
            field: field.to_string(),
            value: value.to_string(),
            reason: format!("expected {min}..={max}"),
        });
    }
    Ok(())
}

/// Transaction amount: within [`MIN_AMOUNT`]..=[`MAX_AMOUNT`] and no more
/// than two significant fraction digits (`1.500` is fine, `1.505` is not).
pub fn assert_amount(amount: Decimal, field: &str) -> SepaResult<()> {
    assert_range(amount, MIN_AMOUNT, MAX_AMOUNT, field)?;
    if amount.normalize().scale() > 2 {
        return Err(SepaError::FieldRange {
            field: field.to_string(),
            value: amount.to_string(),
            reason: "too many fractional digits".into(),
        });
    }
    Ok(())
}

pub fn assert_one_of(value: &str, choices: &[&str], field: &str) -> SepaResult<()> {
    if choices.contains(&value) {
        return Ok(());
    }
    Err(SepaError::InvalidEnumValue {
        field: field.to_string(),
        value: value.to_string(),
        allowed: choices.iter().map(|c| c.to_string()).collect(),
    })
}

/// Unwrap a required date.
pub fn assert_date<T>(value: Option<T>, field: &str) -> SepaResult<T> {
    value.ok_or_else(|| SepaError::InvalidDate(field.to_string()))
}

pub fn assert_iban(value: &str, field: &str) -> SepaResult<()> {
    if validate_iban(value) {
        return Ok(());
    }
    Err(SepaError::InvalidIban {
        field: field.to_string(),
        value: value.to_string(),
    })
}

pub fn assert_creditor_id(value: &str, field: &str) -> SepaResult<()> {
    if validate_creditor_id(value) {
        return Ok(());
    }
    Err(SepaError::InvalidCreditorId {
        field: field.to_string(),
        value: value.to_string(),
    })
}

/// Rules for identifiers such as `EndToEndId` and `MndtId`: at most
/// `max_len` characters, optionally limited to the SEPA character set, and
/// never starting with `/` or containing `//`.
pub fn assert_sepa_identifier(
    value: &str,
    max_len: usize,
    charset: bool,
    field: &str,
) -> SepaResult<()> {
    assert_length(value, 0, max_len, field)?;

    let invalid = |reason: &str| SepaError::InvalidIdentifier {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    };
    if charset && !is_sepa_charset(value) {
        return Err(invalid(
            "contains characters which are not in the SEPA character set",
        ));
    }
    if value.starts_with('/') {
        return Err(invalid("is an id and must not start with \"/\""));
    }
    if value.contains("//") {
        return Err(invalid("is an id and must not contain \"//\""));
    }
    Ok(())
}

/// The country code of `bic` (characters 5 and 6) must be the country of
/// `iban` or one of its included territories. Passes when no BIC is given.
pub fn assert_country_match(bic: Option<&str>, iban: &str, field: &str) -> SepaResult<()> {
    let Some(bic) = bic.filter(|b| !b.is_empty()) else {
        return Ok(());
    };
    let matches = match (bic.get(4..6), iban.get(..2)) {
        (Some(bic_country), Some(iban_country)) => {
            bic_country_accepted(iban_country, bic_country)
        }
        _ => false,
    };
    if matches {
        return Ok(());
    }
    Err(SepaError::CountryMismatch {
        field: field.to_string(),
        bic: bic.to_string(),
        iban: iban.to_string(),
    })
}

/// Latin letters, digits, space and `+ ? / - : ( ) . , '`.
pub fn is_sepa_charset(value: &str) -> bool {
    value.chars().all(|c| {
        c.is_ascii_alphanumeric()
            || matches!(c, ' ' | '+' | '?' | '/' | '-' | ':' | '(' | ')' | '.' | ',' | '\'')
    })
}
