//! ISO 7064 MOD 97-10 check digits for IBANs and SEPA Creditor Scheme IDs.
//!
//! Both identifiers share the same scheme: letters become two-digit numbers
//! (`A` = 10 … `Z` = 35), the leading country code and check digits move to
//! the end, and the resulting numeral must leave a remainder of 1 modulo 97.
//!
//! A Creditor Scheme ID additionally carries a three-character creditor
//! business code after the check digits (`DE98ZZZ09999999999`). That code is
//! excluded from the checksum.

/// Length of `CC` + check digits.
const IBAN_PREFIX_LEN: usize = 4;

/// Length of `CC` + check digits + creditor business code.
const CREDITOR_ID_PREFIX_LEN: usize = 7;

/// Checks an IBAN (no country-specific length rules are applied).
///
/// The first two characters must be uppercase ASCII letters and the next two
/// ASCII digits.
///
/// ```
/// assert!(sepa_pain::validate_iban("DE87123456781234567890"));
/// assert!(!sepa_pain::validate_iban("DE88123456781234567890"));
/// ```
pub fn validate_iban(iban: &str) -> bool {
    let bytes = iban.as_bytes();
    if bytes.len() < IBAN_PREFIX_LEN {
        return false;
    }
    if !bytes[0].is_ascii_uppercase() || !bytes[1].is_ascii_uppercase() {
        return false;
    }
    if !bytes[2].is_ascii_digit() || !bytes[3].is_ascii_digit() {
        return false;
    }
    mod97(&iban[IBAN_PREFIX_LEN..], &iban[..IBAN_PREFIX_LEN]) == 1
}

/// Computes the check digits of an IBAN given with `00` placeholders.
///
/// `DE00123456781234567890` becomes `DE87123456781234567890`. Inputs shorter
/// than four characters are returned unchanged.
pub fn checksum_iban(iban: &str) -> String {
    with_check_digits(iban, IBAN_PREFIX_LEN)
}

/// Checks a SEPA Creditor Scheme ID (no country-specific rules are applied).
///
/// ```
/// assert!(sepa_pain::validate_creditor_id("DE98ZZZ09999999999"));
/// ```
pub fn validate_creditor_id(cid: &str) -> bool {
    let Some(head) = cid.get(..IBAN_PREFIX_LEN) else {
        return false;
    };
    let tail = if cid.len() < CREDITOR_ID_PREFIX_LEN {
        Some("")
    } else {
        cid.get(CREDITOR_ID_PREFIX_LEN..)
    };
    match tail {
        Some(tail) => mod97(tail, head) == 1,
        None => false,
    }
}

/// Computes the check digits of a Creditor Scheme ID given with `00`
/// placeholders, e.g. `DE00ZZZ09999999999` becomes `DE98ZZZ09999999999`.
pub fn checksum_creditor_id(cid: &str) -> String {
    with_check_digits(cid, CREDITOR_ID_PREFIX_LEN)
}

fn with_check_digits(code: &str, skip: usize) -> String {
    let (Some(country), Some(rest), Some(tail)) =
        (code.get(..2), code.get(IBAN_PREFIX_LEN..), code.get(skip.min(code.len())..))
    else {
        return code.to_string();
    };
    let mut placeholder = String::with_capacity(IBAN_PREFIX_LEN);
    placeholder.push_str(country);
    placeholder.push_str("00");
    let check = 98 - mod97(tail, &placeholder);
    format!("{country}{check:02}{rest}")
}

/// Remainder of `body ++ head` modulo 97 after letter substitution.
///
/// Characters that are neither ASCII letters nor digits are skipped. The
/// remainder is accumulated digit by digit, so arbitrarily long inputs never
/// need big-integer arithmetic.
fn mod97(body: &str, head: &str) -> u32 {
    let mut acc = 0u32;
    for c in body.chars().chain(head.chars()) {
        let value = match c {
            'A'..='Z' => c as u32 - 'A' as u32 + 10,
            'a'..='z' => c as u32 - 'a' as u32 + 10,
            '0'..='9' => c as u32 - '0' as u32,
            _ => continue,
        };
        if value >= 10 {
            acc = (acc * 10 + value / 10) % 97;
            acc = (acc * 10 + value % 10) % 97;
        } else {
            acc = (acc * 10 + value) % 97;
        }
    }
    acc
}
