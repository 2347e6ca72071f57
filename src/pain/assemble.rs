use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{debug, warn};

use super::node::XmlNode;
use crate::core::*;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Serialize `doc` with its own [`SepaConfig`].
pub fn to_xml(doc: &Document) -> SepaResult<String> {
    to_xml_with(doc, &doc.config)
}

/// Serialize `doc` with `config` instead of the document's own settings.
///
/// The output starts with the XML declaration. Validation (when enabled)
/// runs before any element is built, so a failure never yields partial
/// output.
///
/// `config.id_separator` has no effect here: payment info and transaction
/// ids were joined when they were added to the document.
pub fn to_xml_with(doc: &Document, config: &SepaConfig) -> SepaResult<String> {
    let tree = to_xml_tree(doc, config)?;
    let body = tree.render(0, config.pretty_print)?;
    let mut out = String::with_capacity(XML_DECLARATION.len() + 1 + body.len());
    out.push_str(XML_DECLARATION);
    if config.pretty_print {
        out.push('\n');
    }
    out.push_str(&body);
    Ok(out)
}

/// Build the `Document` element tree without rendering it.
pub fn to_xml_tree(doc: &Document, config: &SepaConfig) -> SepaResult<XmlNode> {
    let format = doc.format();
    debug!(
        format = %format,
        xml_version = format.xml_version(),
        payment_infos = doc.payment_infos().len(),
        "assembling pain document"
    );

    if config.validate {
        validate_document(doc, config)?;
    }

    let mut document = XmlNode::new("Document")?;
    document.set_attribute("xmlns", format.namespace())?;
    document.set_attribute("xmlns:xsi", XSI_NAMESPACE)?;
    document.set_attribute("xsi:schemaLocation", format.schema_location())?;

    let root = document.append_child(XmlNode::new(format.root_element())?);
    root.append_child(group_header_xml(doc)?);
    for info in doc.payment_infos() {
        root.append_child(payment_info_xml(info)?);
    }
    Ok(document)
}

impl Document {
    /// Serialize with this document's config; see [`to_xml`].
    pub fn to_xml_string(&self) -> SepaResult<String> {
        to_xml(self)
    }

    /// Serialize with an explicit config; see [`to_xml_with`].
    pub fn to_xml_string_with(&self, config: &SepaConfig) -> SepaResult<String> {
        to_xml_with(self, config)
    }
}

fn group_header_xml(doc: &Document) -> SepaResult<XmlNode> {
    let header = &doc.group_header;
    let format = doc.format();
    let mut grp = XmlNode::new("GrpHdr")?;
    grp.add_child("MsgId", &header.id)?;
    grp.add_child("CreDtTm", &format_date_time(header.created))?;
    if format.grouping_in_header() {
        grp.add_child("BtchBookg", bool_text(header.batch_booking))?;
    }
    grp.add_child("NbOfTxs", &doc.transaction_count().to_string())?;
    grp.add_child("CtrlSum", &format_amount(doc.control_sum()?))?;
    if format.grouping_in_header() {
        grp.add_child("Grpg", &header.grouping)?;
    }
    grp.add_path(&["InitgPty", "Nm"], &header.initiator_name)?;
    Ok(grp)
}

fn payment_info_xml(info: &PaymentInfo) -> SepaResult<XmlNode> {
    let format = info.format();
    let method = info.method();

    if info.legacy_original_creditor_id().is_some() {
        warn!(
            payment_info = %info.id,
            "original_creditor_scheme_id on a payment info is deprecated, set \
             Transaction::amendment instead; it is applied to the first transaction only"
        );
    }

    let mut pmt = XmlNode::new("PmtInf")?;
    pmt.add_child("PmtInfId", &info.id)?;
    pmt.add_child("PmtMtd", method.code())?;
    if format.totals_in_payment_info() {
        pmt.add_child("BtchBookg", bool_text(info.batch_booking))?;
        pmt.add_child("NbOfTxs", &info.transaction_count().to_string())?;
        pmt.add_child("CtrlSum", &format_amount(info.control_sum()?))?;
    }

    let tp = pmt.add_child("PmtTpInf", "")?;
    tp.add_path(&["SvcLvl", "Cd"], "SEPA")?;
    match method {
        PaymentMethod::DirectDebit => {
            tp.add_path(&["LclInstrm", "Cd"], &info.local_instrument)?;
            tp.add_child("SeqTp", &info.sequence_type)?;
            pmt.add_child("ReqdColltnDt", &format_date(info.collection_date))?;
        }
        PaymentMethod::Transfer => {
            let date = format_date(info.requested_execution_date);
            if format.nested_execution_date() {
                pmt.add_path(&["ReqdExctnDt", "Dt"], &date)?;
            } else {
                pmt.add_child("ReqdExctnDt", &date)?;
            }
        }
    }

    let (role, party) = info.principal();
    pmt.append_child(party_xml(role, party)?);
    account_xml(&mut pmt, role, party)?;
    match party.bic() {
        Some(bic) => agent_xml(&mut pmt, role, format, bic)?,
        None => not_provided_agent_xml(&mut pmt, role)?,
    }

    pmt.add_child("ChrgBr", "SLEV")?;

    if method == PaymentMethod::DirectDebit {
        scheme_id_xml(
            &mut pmt,
            &["CdtrSchmeId", "Id", "PrvtId", "Othr"],
            info.creditor.id().unwrap_or_default(),
        )?;
    }

    for (index, tx) in info.transactions().iter().enumerate() {
        pmt.append_child(transaction_xml(info, index, tx)?);
    }
    Ok(pmt)
}

fn transaction_xml(info: &PaymentInfo, index: usize, tx: &Transaction) -> SepaResult<XmlNode> {
    let format = info.format();
    let method = info.method();
    let mut node = XmlNode::new(method.transaction_element())?;

    let pmt_id = node.add_child("PmtId", "")?;
    pmt_id.add_child("InstrId", &tx.id)?;
    pmt_id.add_child("EndToEndId", &tx.end_to_end_id)?;

    let amount = format_amount(tx.amount);
    match method {
        PaymentMethod::DirectDebit => {
            node.add_child("InstdAmt", &amount)?
                .set_attribute("Ccy", &tx.currency)?;

            let mandate = node.add_path(&["DrctDbtTx", "MndtRltdInf"], "")?;
            mandate.add_child("MndtId", &tx.mandate_id)?;
            mandate.add_child("DtOfSgntr", &format_date(tx.mandate_signature_date))?;
            match resolve_original_creditor_id(info, index, tx) {
                Some(original) => {
                    mandate.add_child("AmdmntInd", "true")?;
                    scheme_id_xml(
                        mandate,
                        &["AmdmntInfDtls", "OrgnlCdtrSchmeId", "Id", "PrvtId", "Othr"],
                        original,
                    )?;
                }
                None => {
                    mandate.add_child("AmdmntInd", "false")?;
                }
            }
        }
        PaymentMethod::Transfer => {
            node.add_path(&["Amt", "InstdAmt"], &amount)?
                .set_attribute("Ccy", &tx.currency)?;
        }
    }

    let (role, party) = tx.counterparty(method);
    match (party.bic(), method) {
        (Some(bic), _) => agent_xml(&mut node, role, format, bic)?,
        (None, PaymentMethod::DirectDebit) => not_provided_agent_xml(&mut node, role)?,
        // Transfers without a BIC carry no creditor agent at all.
        (None, PaymentMethod::Transfer) => {}
    }
    node.append_child(party_xml(role, party)?);
    account_xml(&mut node, role, party)?;

    let rmt = node.add_child("RmtInf", "")?;
    match &tx.remittance {
        Remittance::Structured(strd) => {
            let cdtr_ref = rmt.add_path(&["Strd", "CdtrRefInf"], "")?;
            let tp = cdtr_ref.add_child("Tp", "")?;
            tp.add_path(&["CdOrPrtry", "Cd"], &strd.type_code)?;
            tp.add_child("Issr", &strd.issuer)?;
            cdtr_ref.add_child("Ref", &strd.reference)?;
        }
        Remittance::Unstructured(text) => {
            rmt.add_child("Ustrd", text)?;
        }
    }

    if let Some(code) = tx.purpose_code.as_deref().filter(|c| !c.is_empty()) {
        node.add_path(&["Purp", "Cd"], code)?;
    }
    Ok(node)
}

/// `Cdtr`/`Dbtr` with name and, when complete, postal address.
fn party_xml(role: Role, party: &Party) -> SepaResult<XmlNode> {
    let mut node = XmlNode::new(role.tag())?;
    node.add_child("Nm", &party.name)?;
    if let Some((country, street, city)) = party.postal_address() {
        let adr = node.add_child("PstlAdr", "")?;
        adr.add_child("Ctry", country)?;
        adr.add_child("AdrLine", street)?;
        adr.add_child("AdrLine", city)?;
    }
    Ok(node)
}

fn account_xml(parent: &mut XmlNode, role: Role, party: &Party) -> SepaResult<()> {
    let acct = format!("{}Acct", role.tag());
    parent.add_path(&[acct.as_str(), "Id", "IBAN"], &party.iban)?;
    Ok(())
}

fn agent_xml(parent: &mut XmlNode, role: Role, format: PainFormat, bic: &str) -> SepaResult<()> {
    let agt = format!("{}Agt", role.tag());
    parent.add_path(&[agt.as_str(), "FinInstnId", format.bic_element()], bic)?;
    Ok(())
}

fn not_provided_agent_xml(parent: &mut XmlNode, role: Role) -> SepaResult<()> {
    let agt = format!("{}Agt", role.tag());
    parent.add_path(&[agt.as_str(), "FinInstnId", "Othr", "Id"], "NOTPROVIDED")?;
    Ok(())
}

/// `<path>/{Id, SchmeNm/Prtry=SEPA}` for a Creditor Scheme ID.
fn scheme_id_xml(parent: &mut XmlNode, path: &[&str], id: &str) -> SepaResult<()> {
    let mut othr = parent;
    for name in path {
        othr = othr.append_child(XmlNode::new(name)?);
    }
    othr.add_child("Id", id)?;
    othr.add_path(&["SchmeNm", "Prtry"], "SEPA")?;
    Ok(())
}

fn bool_text(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Two fraction digits, half away from zero.
pub(crate) fn format_amount(value: Decimal) -> String {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded.to_string()
}

/// `YYYY-MM-DD`; a missing date (only possible without validation) renders
/// as an empty element.
fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn format_date_time(value: NaiveDateTime) -> String {
    value.format("%Y-%m-%dT%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn amounts_have_two_fraction_digits() {
        assert_eq!(format_amount(dec!(100)), "100.00");
        assert_eq!(format_amount(dec!(1.5)), "1.50");
        assert_eq!(format_amount(dec!(1.500)), "1.50");
        assert_eq!(format_amount(dec!(0.005)), "0.01");
        assert_eq!(format_amount(dec!(999999999.99)), "999999999.99");
    }

    #[test]
    fn dates_have_no_zone() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(format_date(Some(date)), "2024-01-05");
        assert_eq!(format_date(None), "");
        let ts = date.and_hms_opt(7, 8, 9).unwrap();
        assert_eq!(format_date_time(ts), "2024-01-05T07:08:09");
    }

    #[test]
    fn scheme_id_block() {
        let mut root = XmlNode::new("MndtRltdInf").unwrap();
        scheme_id_xml(&mut root, &["A", "Othr"], "DE98ZZZ09999999999").unwrap();
        assert_eq!(
            root.render(0, false).unwrap(),
            "<MndtRltdInf><A><Othr><Id>DE98ZZZ09999999999</Id>\
             <SchmeNm><Prtry>SEPA</Prtry></SchmeNm></Othr></A></MndtRltdInf>"
        );
    }

    #[test]
    fn party_without_full_address() {
        let party = Party {
            name: "Name".into(),
            street: Some("Street 1".into()),
            ..Party::default()
        };
        assert_eq!(
            party_xml(Role::Debtor, &party).unwrap().render(0, false).unwrap(),
            "<Dbtr><Nm>Name</Nm></Dbtr>"
        );
    }

    #[test]
    fn party_with_address() {
        let party = Party {
            name: "Name".into(),
            street: Some("Street 1".into()),
            city: Some("12345 Town".into()),
            country: Some("DE".into()),
            ..Party::default()
        };
        assert_eq!(
            party_xml(Role::Creditor, &party).unwrap().render(0, false).unwrap(),
            "<Cdtr><Nm>Name</Nm><PstlAdr><Ctry>DE</Ctry><AdrLine>Street 1</AdrLine>\
             <AdrLine>12345 Town</AdrLine></PstlAdr></Cdtr>"
        );
    }
}
