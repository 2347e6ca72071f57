#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = sepa_pain::validate_iban(s);
        let _ = sepa_pain::validate_creditor_id(s);
        let _ = sepa_pain::checksum_iban(s);
        let _ = sepa_pain::checksum_creditor_id(s);
    }
});
