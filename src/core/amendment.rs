use super::types::{PaymentInfo, Transaction};

/// Effective original Creditor Scheme ID of the transaction at `index` in
/// `info`.
///
/// An explicit [`Transaction::amendment`] always wins; an amendment with an
/// empty id means "not amended". Without one, the deprecated
/// [`PaymentInfo::original_creditor_scheme_id`] applies to the first
/// transaction of the block only.
pub fn resolve_original_creditor_id<'a>(
    info: &'a PaymentInfo,
    index: usize,
    tx: &'a Transaction,
) -> Option<&'a str> {
    match &tx.amendment {
        Some(amendment) => Some(amendment.original_creditor_scheme_id.as_str())
            .filter(|id| !id.is_empty()),
        None if index == 0 => info.legacy_original_creditor_id(),
        None => None,
    }
}
