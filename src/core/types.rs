use chrono::{Local, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::config::SepaConfig;
use super::error::{SepaError, SepaResult};
use super::format::PainFormat;

/// `PmtMtd`: how the payment info block moves money.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// DD: creditor pulls from the debtors' accounts.
    DirectDebit,
    /// TRF: debtor pushes to the creditors' accounts.
    Transfer,
}

impl PaymentMethod {
    /// `PmtMtd` code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DirectDebit => "DD",
            Self::Transfer => "TRF",
        }
    }

    /// Element name of a single transaction.
    pub fn transaction_element(&self) -> &'static str {
        match self {
            Self::DirectDebit => "DrctDbtTxInf",
            Self::Transfer => "CdtTrfTxInf",
        }
    }

    /// Role described at payment info level.
    pub fn principal_role(&self) -> Role {
        match self {
            Self::DirectDebit => Role::Creditor,
            Self::Transfer => Role::Debtor,
        }
    }

    /// Role described at transaction level.
    pub fn counterparty_role(&self) -> Role {
        match self {
            Self::DirectDebit => Role::Debtor,
            Self::Transfer => Role::Creditor,
        }
    }
}

/// Side of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Creditor,
    Debtor,
}

impl Role {
    /// Element stem: `Cdtr`, `CdtrAcct`, `CdtrAgt`, …
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Creditor => "Cdtr",
            Self::Debtor => "Dbtr",
        }
    }

    /// Field name used in validation error paths.
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Creditor => "creditor",
            Self::Debtor => "debtor",
        }
    }
}

/// Identity, postal address and account of one side of a payment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Party {
    /// Creditor Scheme ID (direct debit creditor) or debtor id (transfer).
    pub id: Option<String>,
    /// Name, at most 70 characters.
    pub name: String,
    /// First address line.
    pub street: Option<String>,
    /// Second address line (postcode and town).
    pub city: Option<String>,
    /// ISO 3166-1 alpha-2 country code.
    pub country: Option<String>,
    pub iban: String,
    /// 8 or 11 character BIC.
    pub bic: Option<String>,
}

impl Party {
    /// The id, treating an empty string as absent.
    pub fn id(&self) -> Option<&str> {
        non_empty(&self.id)
    }

    /// The BIC, treating an empty string as absent.
    pub fn bic(&self) -> Option<&str> {
        non_empty(&self.bic)
    }

    /// `(country, street, city)` when all three are set; a partial address
    /// is not emitted.
    pub fn postal_address(&self) -> Option<(&str, &str, &str)> {
        Some((
            non_empty(&self.country)?,
            non_empty(&self.street)?,
            non_empty(&self.city)?,
        ))
    }
}

/// Creditor reference (`RmtInf/Strd/CdtrRefInf`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredRemittanceInfo {
    /// Document type code, typically `SCOR`.
    pub type_code: String,
    /// Issuer of the reference, e.g. `ISO`.
    pub issuer: String,
    /// The creditor reference itself (e.g. an RF reference).
    pub reference: String,
}

/// Remittance information; a transaction carries either free text or a
/// structured creditor reference, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Remittance {
    /// `Ustrd`, at most 140 characters.
    Unstructured(String),
    /// `Strd`.
    Structured(StructuredRemittanceInfo),
}

impl Default for Remittance {
    fn default() -> Self {
        Self::Unstructured(String::new())
    }
}

/// Mandate amendment details of a direct debit transaction.
///
/// Its presence with a non-empty id marks the mandate as amended
/// (`AmdmntInd` = `true`), e.g. after a creditor scheme ID migration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amendment {
    /// Creditor Scheme ID under which the mandate was originally signed.
    pub original_creditor_scheme_id: String,
}

impl Amendment {
    pub fn new(original_creditor_scheme_id: impl Into<String>) -> Self {
        Self {
            original_creditor_scheme_id: original_creditor_scheme_id.into(),
        }
    }
}

/// `GrpHdr`: message-level header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupHeader {
    /// `MsgId`; also the prefix of all payment info ids.
    pub id: String,
    /// `CreDtTm`, written without time zone.
    pub created: NaiveDateTime,
    /// `InitgPty/Nm`.
    pub initiator_name: String,
    /// `BtchBookg` (pain.001.001.02 only).
    pub batch_booking: bool,
    /// `Grpg` (pain.001.001.02 only): MIXD, GRPD or SNGL.
    pub grouping: String,
    control_sum: Decimal,
    transaction_count: usize,
}

impl GroupHeader {
    fn new() -> Self {
        Self {
            id: String::new(),
            created: Local::now().naive_local(),
            initiator_name: String::new(),
            batch_booking: false,
            grouping: "MIXD".to_string(),
            control_sum: Decimal::ZERO,
            transaction_count: 0,
        }
    }

    /// Sum of all transaction amounts as of the last [`Document::normalize`].
    pub fn control_sum(&self) -> Decimal {
        self.control_sum
    }

    /// Number of transactions as of the last [`Document::normalize`].
    pub fn transaction_count(&self) -> usize {
        self.transaction_count
    }
}

/// A pain message: one group header and any number of payment info blocks.
///
/// Deserializing re-stamps every payment info with the document's format,
/// so a block can never carry a layout other than its message's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "DocumentData")]
pub struct Document {
    format: PainFormat,
    pub group_header: GroupHeader,
    payment_infos: Vec<PaymentInfo>,
    /// Settings used for id assignment and serialization.
    pub config: SepaConfig,
}

impl Document {
    /// New document with the default [`SepaConfig`].
    pub fn new(format: PainFormat) -> Self {
        Self::with_config(format, SepaConfig::default())
    }

    pub fn with_config(format: PainFormat, config: SepaConfig) -> Self {
        Self {
            format,
            group_header: GroupHeader::new(),
            payment_infos: Vec::new(),
            config,
        }
    }

    /// New document from a format identifier such as `"pain.008.001.02"`.
    pub fn from_format(format: &str) -> SepaResult<Self> {
        Ok(Self::new(format.parse()?))
    }

    pub fn format(&self) -> PainFormat {
        self.format
    }

    /// Factory for a payment info block of this document's format.
    pub fn create_payment_info(&self) -> PaymentInfo {
        PaymentInfo::new(self.format, self.config.id_separator)
    }

    /// Append a payment info block.
    ///
    /// Its id becomes `<MsgId><sep><id>`, or `<MsgId><sep><index>` when no
    /// id was set. The separator of this document's config is used for the
    /// block's transactions as well.
    pub fn add_payment_info(&mut self, mut info: PaymentInfo) -> &mut PaymentInfo {
        let sep = self.config.id_separator;
        let suffix = if info.id.is_empty() {
            self.payment_infos.len().to_string()
        } else {
            std::mem::take(&mut info.id)
        };
        info.id = format!("{}{sep}{suffix}", self.group_header.id);
        info.format = self.format;
        info.id_separator = sep;
        let idx = self.payment_infos.len();
        self.payment_infos.push(info);
        &mut self.payment_infos[idx]
    }

    pub fn payment_infos(&self) -> &[PaymentInfo] {
        &self.payment_infos
    }

    pub fn payment_infos_mut(&mut self) -> &mut [PaymentInfo] {
        &mut self.payment_infos
    }

    /// Sum of all transaction amounts, or `FieldRange` on `control_sum`
    /// when the total leaves the decimal range.
    pub fn control_sum(&self) -> SepaResult<Decimal> {
        checked_total(
            self.payment_infos
                .iter()
                .flat_map(|info| info.transactions.iter().map(|tx| tx.amount)),
        )
    }

    /// Number of transactions across all payment info blocks.
    pub fn transaction_count(&self) -> usize {
        self.payment_infos
            .iter()
            .map(PaymentInfo::transaction_count)
            .sum()
    }

    /// Store the derived control sum and transaction count in the group
    /// header. Serialization computes both on its own; this is for callers
    /// that want to inspect them. The header is left untouched when the
    /// control sum overflows.
    pub fn normalize(&mut self) -> SepaResult<()> {
        self.group_header.control_sum = self.control_sum()?;
        self.group_header.transaction_count = self.transaction_count();
        Ok(())
    }
}

#[derive(Deserialize)]
struct DocumentData {
    format: PainFormat,
    group_header: GroupHeader,
    payment_infos: Vec<PaymentInfo>,
    config: SepaConfig,
}

impl From<DocumentData> for Document {
    fn from(data: DocumentData) -> Self {
        let mut payment_infos = data.payment_infos;
        for info in &mut payment_infos {
            info.format = data.format;
        }
        Self {
            format: data.format,
            group_header: data.group_header,
            payment_infos,
            config: data.config,
        }
    }
}

fn checked_total(mut amounts: impl Iterator<Item = Decimal>) -> SepaResult<Decimal> {
    amounts.try_fold(Decimal::ZERO, |total, amount| {
        total
            .checked_add(amount)
            .ok_or_else(|| SepaError::FieldRange {
                field: "control_sum".to_string(),
                value: format!("{total} + {amount}"),
                reason: "exceeds the decimal range".to_string(),
            })
    })
}

/// `PmtInf`: a batch of transactions sharing one principal account and
/// one collection or execution date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentInfo {
    format: PainFormat,
    id_separator: char,
    /// `PmtInfId`; prefixed with the message id on insertion.
    pub id: String,
    /// `BtchBookg`: book the whole block as one entry.
    pub batch_booking: bool,
    /// `LclInstrm/Cd` (direct debit): CORE, COR1 or B2B.
    pub local_instrument: String,
    /// `SeqTp` (direct debit): FRST, RCUR, OOFF or FNAL.
    pub sequence_type: String,
    /// `ReqdColltnDt` (direct debit).
    pub collection_date: Option<NaiveDate>,
    /// `ReqdExctnDt` (transfer).
    pub requested_execution_date: Option<NaiveDate>,
    pub creditor: Party,
    pub debtor: Party,
    /// Deprecated: set [`Transaction::amendment`] instead.
    ///
    /// Kept for callers of the old API. It only applies to the first
    /// transaction of this block, and only if that transaction has no
    /// amendment of its own.
    pub original_creditor_scheme_id: Option<String>,
    transactions: Vec<Transaction>,
}

impl PaymentInfo {
    fn new(format: PainFormat, id_separator: char) -> Self {
        Self {
            format,
            id_separator,
            id: String::new(),
            batch_booking: false,
            local_instrument: "CORE".to_string(),
            sequence_type: "FRST".to_string(),
            collection_date: None,
            requested_execution_date: None,
            creditor: Party::default(),
            debtor: Party::default(),
            original_creditor_scheme_id: None,
            transactions: Vec::new(),
        }
    }

    pub fn format(&self) -> PainFormat {
        self.format
    }

    /// Payment method implied by the document format.
    pub fn method(&self) -> PaymentMethod {
        self.format.method()
    }

    /// The party this block describes: the creditor for direct debits, the
    /// debtor for transfers.
    pub fn principal(&self) -> (Role, &Party) {
        match self.method().principal_role() {
            Role::Creditor => (Role::Creditor, &self.creditor),
            Role::Debtor => (Role::Debtor, &self.debtor),
        }
    }

    /// Factory for a transaction of this block.
    pub fn create_transaction(&self) -> Transaction {
        Transaction::new()
    }

    /// Append a transaction; its id becomes `<PmtInfId><sep><id or index>`.
    pub fn add_transaction(&mut self, mut tx: Transaction) -> &mut Transaction {
        let suffix = if tx.id.is_empty() {
            self.transactions.len().to_string()
        } else {
            std::mem::take(&mut tx.id)
        };
        tx.id = format!("{}{}{suffix}", self.id, self.id_separator);
        let idx = self.transactions.len();
        self.transactions.push(tx);
        &mut self.transactions[idx]
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn transactions_mut(&mut self) -> &mut [Transaction] {
        &mut self.transactions
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    /// Sum of this block's amounts; see [`Document::control_sum`].
    pub fn control_sum(&self) -> SepaResult<Decimal> {
        checked_total(self.transactions.iter().map(|t| t.amount))
    }

    /// The deprecated block-level original creditor id, if set and non-empty.
    pub fn legacy_original_creditor_id(&self) -> Option<&str> {
        non_empty(&self.original_creditor_scheme_id)
    }
}

/// A single credit transfer or direct debit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transaction {
    /// `InstrId`; prefixed with the payment info id on insertion.
    pub id: String,
    /// `EndToEndId`, at most 35 SEPA characters.
    pub end_to_end_id: String,
    /// ISO 4217 code of `InstdAmt/@Ccy`.
    pub currency: String,
    /// 0.01 to 999 999 999.99, at most two fraction digits.
    pub amount: Decimal,
    /// `Purp/Cd`, 1 to 4 characters.
    pub purpose_code: Option<String>,
    /// `MndtId` (direct debit).
    pub mandate_id: String,
    /// `DtOfSgntr` (direct debit).
    pub mandate_signature_date: Option<NaiveDate>,
    pub creditor: Party,
    pub debtor: Party,
    pub remittance: Remittance,
    pub amendment: Option<Amendment>,
}

impl Default for Transaction {
    fn default() -> Self {
        Self::new()
    }
}

impl Transaction {
    pub fn new() -> Self {
        Self {
            id: String::new(),
            end_to_end_id: String::new(),
            currency: "EUR".to_string(),
            amount: Decimal::ZERO,
            purpose_code: None,
            mandate_id: String::new(),
            mandate_signature_date: None,
            creditor: Party::default(),
            debtor: Party::default(),
            remittance: Remittance::default(),
            amendment: None,
        }
    }

    /// The party this transaction describes under `method`: the debtor for
    /// direct debits, the creditor for transfers.
    pub fn counterparty(&self, method: PaymentMethod) -> (Role, &Party) {
        match method.counterparty_role() {
            Role::Creditor => (Role::Creditor, &self.creditor),
            Role::Debtor => (Role::Debtor, &self.debtor),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
