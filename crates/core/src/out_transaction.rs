//! Outbound transactions: crypto leaving a holder's balance.

use crate::entry_types::TransactionType;
use crate::transaction::{record_variant, BalanceSign, DirectionTable, TransactionRecord};

const LEGAL_KINDS: &[TransactionType] = &[
    TransactionType::Donate,
    TransactionType::Fee,
    TransactionType::Gift,
    TransactionType::Sell,
];

/// A validated, immutable outbound transaction.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct OutTransaction {
    record: TransactionRecord,
}

impl OutTransaction {
    /// Rules for outbound records. Every outbound kind is a taxable event.
    pub const TABLE: DirectionTable = DirectionTable {
        record_name: "OutTransaction",
        legal_kinds: LEGAL_KINDS,
        taxable_kinds: LEGAL_KINDS,
        sign: BalanceSign::Negative,
        crypto_field: "crypto_out",
        usd_no_fee_field: "usd_out_no_fee",
        usd_with_fee_field: "usd_out_with_fee",
    };
}

record_variant!(
    OutTransaction,
    Out,
    crypto = crypto_out,
    no_fee = usd_out_no_fee,
    with_fee = usd_out_with_fee
);
