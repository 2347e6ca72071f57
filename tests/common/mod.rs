//! Shared fixtures and a small path query over rendered XML.

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use quick_xml::Reader;
use quick_xml::events::Event;
use rust_decimal_macros::dec;
use sepa_pain::core::*;

/// Test creditor id published by the Deutsche Bundesbank.
pub const CREDITOR_ID: &str = "DE98ZZZ09999999999";
pub const OTHER_CREDITOR_ID: &str = "IT66ZZZA1B2C3D4E5F6G7H8";
pub const IBAN: &str = "DE43500105178994141576";

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn created() -> NaiveDateTime {
    date(2023, 7, 29).and_hms_opt(1, 2, 3).unwrap()
}

/// A direct debit document with one block and one transaction.
pub fn direct_debit_document(format: PainFormat) -> Document {
    let mut doc = Document::new(format);
    doc.group_header.id = "XMPL.20140201.TR0".into();
    doc.group_header.created = created();
    doc.group_header.initiator_name = "Example LLC".into();

    let mut info = doc.create_payment_info();
    info.collection_date = Some(date(2025, 7, 29));
    info.creditor = Party {
        id: Some(CREDITOR_ID.into()),
        name: "Example LLC".into(),
        iban: IBAN.into(),
        ..Party::default()
    };
    let info = doc.add_payment_info(info);
    let tx = direct_debit_transaction(info);
    info.add_transaction(tx);
    doc
}

pub fn direct_debit_transaction(info: &PaymentInfo) -> Transaction {
    let mut tx = info.create_transaction();
    tx.end_to_end_id = "XMPL.CUST487.INVOICE.54".into();
    tx.amount = dec!(50.23);
    tx.mandate_id = "XMPL.CUST487.2014".into();
    tx.mandate_signature_date = Some(date(2024, 7, 29));
    tx.debtor = Party {
        name: "Example Customer".into(),
        iban: IBAN.into(),
        ..Party::default()
    };
    tx.remittance = Remittance::Unstructured("INVOICE 54".into());
    tx
}

/// A credit transfer document with one block and one transaction.
pub fn transfer_document(format: PainFormat) -> Document {
    let mut doc = Document::new(format);
    doc.group_header.id = "XMPL.20140201.TR0".into();
    doc.group_header.created = created();
    doc.group_header.initiator_name = "Example LLC".into();

    let mut info = doc.create_payment_info();
    info.requested_execution_date = Some(date(2025, 7, 29));
    info.debtor = Party {
        id: Some(CREDITOR_ID.into()),
        name: "default-debtor-name".into(),
        iban: IBAN.into(),
        ..Party::default()
    };
    let info = doc.add_payment_info(info);
    info.add_transaction(transfer_transaction("end-to-end-id"));
    doc
}

pub fn transfer_transaction(end_to_end_id: &str) -> Transaction {
    Transaction {
        end_to_end_id: end_to_end_id.into(),
        amount: dec!(1.00),
        creditor: Party {
            name: "creditor-name".into(),
            iban: IBAN.into(),
            ..Party::default()
        },
        ..Transaction::new()
    }
}

/// One element of a parsed document: slash-joined path from the root,
/// its text, and its attributes.
#[derive(Debug, Clone)]
pub struct Element {
    pub path: String,
    pub text: String,
    pub attributes: Vec<(String, String)>,
}

/// Every element of `xml` in document order.
pub fn parse(xml: &str) -> Vec<Element> {
    let mut reader = Reader::from_str(xml);
    let mut elements: Vec<Element> = Vec::new();
    let mut stack: Vec<(String, usize)> = Vec::new();

    loop {
        match reader.read_event().expect("well-formed xml") {
            Event::Start(e) => {
                let element = open(&stack, &e);
                stack.push((element.path.clone(), elements.len()));
                elements.push(element);
            }
            Event::Empty(e) => {
                let element = open(&stack, &e);
                elements.push(element);
            }
            Event::Text(t) => {
                if let Some((_, idx)) = stack.last() {
                    elements[*idx].text.push_str(&t.unescape().expect("valid escapes"));
                }
            }
            Event::End(_) => {
                stack.pop();
            }
            Event::Eof => break,
            _ => {}
        }
    }
    elements
}

fn open(stack: &[(String, usize)], e: &quick_xml::events::BytesStart<'_>) -> Element {
    let name = String::from_utf8(e.name().as_ref().to_vec()).expect("utf-8 name");
    let path = match stack.last() {
        Some((parent, _)) => format!("{parent}/{name}"),
        None => name,
    };
    let attributes = e
        .attributes()
        .map(|a| {
            let a = a.expect("valid attribute");
            (
                String::from_utf8(a.key.as_ref().to_vec()).expect("utf-8 key"),
                a.unescape_value().expect("valid escapes").into_owned(),
            )
        })
        .collect();
    Element {
        path,
        text: String::new(),
        attributes,
    }
}

/// Elements whose path ends with `suffix` (e.g. `"PmtInf/PmtInfId"`).
pub fn select<'a>(elements: &'a [Element], suffix: &str) -> Vec<&'a Element> {
    elements
        .iter()
        .filter(|e| e.path == suffix || e.path.ends_with(&format!("/{suffix}")))
        .collect()
}

/// Texts of all elements matching `suffix`.
pub fn texts(xml: &str, suffix: &str) -> Vec<String> {
    select(&parse(xml), suffix)
        .into_iter()
        .map(|e| e.text.clone())
        .collect()
}

/// Text of the single element matching `suffix`.
pub fn text(xml: &str, suffix: &str) -> String {
    let found = texts(xml, suffix);
    assert_eq!(found.len(), 1, "expected exactly one {suffix}, found {found:?}");
    found.into_iter().next().unwrap_or_default()
}

pub fn count(xml: &str, suffix: &str) -> usize {
    select(&parse(xml), suffix).len()
}

/// Attributes of the first element matching `suffix`.
pub fn attributes(xml: &str, suffix: &str) -> Vec<(String, String)> {
    select(&parse(xml), suffix)
        .first()
        .map(|e| e.attributes.clone())
        .unwrap_or_default()
}
