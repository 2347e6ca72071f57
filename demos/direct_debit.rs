use chrono::NaiveDate;
use rust_decimal_macros::dec;
use sepa_pain::core::*;

fn main() {
    // RUST_LOG=sepa_pain=debug shows assembly progress.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sepa_pain=warn".into()),
        )
        .init();

    let mut doc = Document::new(PainFormat::Pain008_001_08);
    doc.group_header.id = "ACME.2024.06.DD1".into();
    doc.group_header.initiator_name = "ACME GmbH".into();

    let mut info = doc.create_payment_info();
    info.collection_date = NaiveDate::from_ymd_opt(2024, 7, 1);
    info.sequence_type = "RCUR".into();
    info.creditor = Party {
        id: Some("DE98ZZZ09999999999".into()),
        name: "ACME GmbH".into(),
        iban: "DE89370400440532013000".into(),
        bic: Some("COBADEFFXXX".into()),
        ..Party::default()
    };
    let info = doc.add_payment_info(info);

    let customers = [
        ("Max Mustermann", "DE87123456781234567890", dec!(49.90)),
        ("Erika Musterfrau", "DE43500105178994141576", dec!(119.00)),
    ];
    for (n, (name, iban, amount)) in customers.into_iter().enumerate() {
        let mut tx = info.create_transaction();
        tx.end_to_end_id = format!("RE-2024-{:03}", n + 1);
        tx.amount = amount;
        tx.mandate_id = format!("MANDATE-{:04}", n + 1);
        tx.mandate_signature_date = NaiveDate::from_ymd_opt(2023, 1, 15);
        tx.debtor = Party {
            name: name.into(),
            iban: iban.into(),
            ..Party::default()
        };
        tx.remittance = Remittance::Unstructured(format!("Rechnung RE-2024-{:03}", n + 1));
        info.add_transaction(tx);
    }

    // The first mandate was signed under an earlier creditor id.
    info.transactions_mut()[0].amendment = Some(Amendment::new("IT66ZZZA1B2C3D4E5F6G7H8"));

    if let Err(e) = doc.normalize() {
        eprintln!("cannot total the collection: {e}");
        return;
    }
    println!(
        "{} transactions, control sum {} EUR",
        doc.group_header.transaction_count(),
        doc.group_header.control_sum()
    );

    let config = doc.config.with_pretty_print(true);
    match doc.to_xml_string_with(&config) {
        Ok(xml) => println!("{xml}"),
        Err(e) => eprintln!("document rejected: {e}"),
    }
}
