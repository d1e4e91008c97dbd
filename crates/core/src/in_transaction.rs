//! Inbound transactions: crypto acquired by a holder.

use crate::entry_types::TransactionType;
use crate::transaction::{record_variant, BalanceSign, DirectionTable, TransactionRecord};

const LEGAL_KINDS: &[TransactionType] = &[
    TransactionType::Airdrop,
    TransactionType::Buy,
    TransactionType::Donate,
    TransactionType::Earn,
    TransactionType::Gift,
    TransactionType::Hardfork,
    TransactionType::Interest,
    TransactionType::Mining,
    TransactionType::Staking,
];

// Income received in crypto is taxed on receipt. Purchases, gifts and
// donations received are only taxed when later disposed of.
const TAXABLE_KINDS: &[TransactionType] = &[
    TransactionType::Airdrop,
    TransactionType::Earn,
    TransactionType::Hardfork,
    TransactionType::Interest,
    TransactionType::Mining,
    TransactionType::Staking,
];

/// A validated, immutable inbound transaction.
///
/// Build one with [`InTransaction::new`]; there is no way to change it
/// afterwards.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct InTransaction {
    record: TransactionRecord,
}

impl InTransaction {
    /// Rules for inbound records.
    pub const TABLE: DirectionTable = DirectionTable {
        record_name: "InTransaction",
        legal_kinds: LEGAL_KINDS,
        taxable_kinds: TAXABLE_KINDS,
        sign: BalanceSign::Positive,
        crypto_field: "crypto_in",
        usd_no_fee_field: "usd_in_no_fee",
        usd_with_fee_field: "usd_in_with_fee",
    };
}

record_variant!(
    InTransaction,
    In,
    crypto = crypto_in,
    no_fee = usd_in_no_fee,
    with_fee = usd_in_with_fee
);
