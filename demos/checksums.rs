use sepa_pain::{checksum_creditor_id, checksum_iban, validate_creditor_id, validate_iban};

fn main() {
    for iban in [
        "DE89370400440532013000",
        "DE89370400440532013001",
        "FR3930003000306936293381A23",
        "GB29NWBK60161331926819",
    ] {
        let status = if validate_iban(iban) { "valid" } else { "INVALID" };
        println!("IBAN {iban}: {status}");
    }

    // Check digits are computed from a `00` placeholder.
    println!("{}", checksum_iban("DE00123456781234567890"));
    println!("{}", checksum_creditor_id("DE00ZZZ09999999999"));

    for cid in ["DE98ZZZ09999999999", "DE98ZZZ09999999998"] {
        let status = if validate_creditor_id(cid) { "valid" } else { "INVALID" };
        println!("Creditor ID {cid}: {status}");
    }
}
