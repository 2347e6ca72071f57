use chrono::NaiveDate;
use rust_decimal_macros::dec;
use sepa_pain::core::*;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sepa_pain=debug".into()),
        )
        .init();

    let mut doc = Document::new(PainFormat::Pain001_001_09);
    doc.group_header.id = "ACME.2024.06.CT1".into();
    doc.group_header.initiator_name = "ACME GmbH".into();

    let mut info = doc.create_payment_info();
    info.requested_execution_date = NaiveDate::from_ymd_opt(2024, 6, 28);
    info.debtor = Party {
        name: "ACME GmbH".into(),
        iban: "DE89370400440532013000".into(),
        bic: Some("COBADEFFXXX".into()),
        street: Some("Friedrichstrasse 123".into()),
        city: Some("10115 Berlin".into()),
        country: Some("DE".into()),
        ..Party::default()
    };
    let info = doc.add_payment_info(info);

    let mut rent = info.create_transaction();
    rent.end_to_end_id = "RENT-2024-06".into();
    rent.amount = dec!(1250.00);
    rent.creditor = Party {
        name: "Hausverwaltung Berlin".into(),
        iban: "DE43500105178994141576".into(),
        ..Party::default()
    };
    rent.remittance = Remittance::Unstructured("Miete Juni 2024".into());
    info.add_transaction(rent);

    let mut supplier = info.create_transaction();
    supplier.end_to_end_id = "INV-4711".into();
    supplier.amount = dec!(830.25);
    supplier.purpose_code = Some("SUPP".into());
    supplier.creditor = Party {
        name: "Leverancier B.V.".into(),
        iban: "NL30ABNA8727958558".into(),
        bic: Some("ABNANL2A".into()),
        ..Party::default()
    };
    supplier.remittance = Remittance::Structured(StructuredRemittanceInfo {
        type_code: "SCOR".into(),
        issuer: "ISO".into(),
        reference: "RF18539007547034".into(),
    });
    info.add_transaction(supplier);

    // Greek and Finnish domestic ids may use characters outside the SEPA set.
    let mut local = info.create_transaction();
    local.end_to_end_id = "ΤΙΜΟΛΟΓΙΟ-12".into();
    local.amount = dec!(15);
    local.creditor = Party {
        name: "Example Customer".into(),
        iban: "DE87123456781234567890".into(),
        ..Party::default()
    };
    info.add_transaction(local);

    if let Err(e) = doc.to_xml_string() {
        eprintln!("strict validation: {e}");
    }

    doc.config = doc.config.with_validation(true, false).with_pretty_print(true);
    match doc.to_xml_string() {
        Ok(xml) => println!("{xml}"),
        Err(e) => eprintln!("document rejected: {e}"),
    }
}
