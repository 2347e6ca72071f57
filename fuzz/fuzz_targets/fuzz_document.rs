#![no_main]

use libfuzzer_sys::fuzz_target;
use sepa_pain::{Document, PainFormat, SepaConfig};

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let mut fields = s.split('\u{0}');
    let mut next = || fields.next().unwrap_or_default().to_string();

    for format in PainFormat::ALL {
        let mut doc = Document::new(format);
        doc.group_header.id = next();
        let mut info = doc.create_payment_info();
        info.creditor.iban = next();
        info.debtor.iban = next();
        info.creditor.bic = Some(next());
        let info = doc.add_payment_info(info);
        let mut tx = info.create_transaction();
        tx.end_to_end_id = next();
        tx.debtor.name = next();
        tx.creditor.name = next();
        info.add_transaction(tx);

        let _ = doc.to_xml_string();
        let _ = doc.to_xml_string_with(&SepaConfig::no_validation());
    }
});
