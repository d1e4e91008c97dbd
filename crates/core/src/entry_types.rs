//! Transaction type registry.
//!
//! A closed set of transaction kinds with case-insensitive lookup.

use std::fmt;
use std::str::FromStr;

use taxledger_shared::{EntryError, EntryResult, FieldValue};

use crate::validation::type_check_string;

/// Kind of a transaction.
///
/// Each member has an upper-case member name (`EARN`) used by the canonical
/// rendering and a lower-case internal value (`earn`) used by the compact
/// rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TransactionType {
    /// Tokens distributed for free.
    Airdrop,
    /// Purchase with fiat.
    Buy,
    /// Donation to a charity.
    Donate,
    /// Generic earned income (rewards, payments in crypto).
    Earn,
    /// Crypto spent on a fee.
    Fee,
    /// Gift given or received.
    Gift,
    /// Coins created by a chain split.
    Hardfork,
    /// Interest paid by a lender.
    Interest,
    /// Mining reward.
    Mining,
    /// Transfer between accounts of the same holder.
    Move,
    /// Sale for fiat.
    Sell,
    /// Staking reward.
    Staking,
}

impl TransactionType {
    /// Every member, in declaration order.
    pub const ALL: [Self; 12] = [
        Self::Airdrop,
        Self::Buy,
        Self::Donate,
        Self::Earn,
        Self::Fee,
        Self::Gift,
        Self::Hardfork,
        Self::Interest,
        Self::Mining,
        Self::Move,
        Self::Sell,
        Self::Staking,
    ];

    /// Upper-case member name, e.g. `EARN`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Airdrop => "AIRDROP",
            Self::Buy => "BUY",
            Self::Donate => "DONATE",
            Self::Earn => "EARN",
            Self::Fee => "FEE",
            Self::Gift => "GIFT",
            Self::Hardfork => "HARDFORK",
            Self::Interest => "INTEREST",
            Self::Mining => "MINING",
            Self::Move => "MOVE",
            Self::Sell => "SELL",
            Self::Staking => "STAKING",
        }
    }

    /// Lower-case internal value, e.g. `earn`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Airdrop => "airdrop",
            Self::Buy => "buy",
            Self::Donate => "donate",
            Self::Earn => "earn",
            Self::Fee => "fee",
            Self::Gift => "gift",
            Self::Hardfork => "hardfork",
            Self::Interest => "interest",
            Self::Mining => "mining",
            Self::Move => "move",
            Self::Sell => "sell",
            Self::Staking => "staking",
        }
    }

    /// Looks up a member by name, ignoring ASCII case.
    #[must_use]
    pub fn lookup(candidate: &str) -> Option<Self> {
        let canonical = candidate.to_ascii_uppercase();
        Self::ALL.into_iter().find(|kind| kind.name() == canonical)
    }

    /// Validates a raw input value and resolves it to a member.
    ///
    /// Non-string input is a type error; a string naming no member
    /// (including the empty string) is a value error.
    pub fn type_check_from_string(parameter_name: &str, candidate: &FieldValue) -> EntryResult<Self> {
        let text = type_check_string(parameter_name, candidate)?;
        Self::lookup(text).ok_or_else(|| {
            EntryError::value_error(format!(
                "Parameter '{parameter_name}' has invalid transaction type value: {text:?}"
            ))
        })
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TransactionType {
    type Err = EntryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::type_check_from_string("transaction_type", &FieldValue::from(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("buy", TransactionType::Buy)]
    #[case("dOnAtE", TransactionType::Donate)]
    #[case("Earn", TransactionType::Earn)]
    #[case("GIFT", TransactionType::Gift)]
    #[case("MoVe", TransactionType::Move)]
    #[case("sell", TransactionType::Sell)]
    #[case("sTaKiNg", TransactionType::Staking)]
    #[case("HardFork", TransactionType::Hardfork)]
    fn test_case_insensitive_lookup(#[case] candidate: &str, #[case] expected: TransactionType) {
        assert_eq!(
            TransactionType::type_check_from_string("transaction_type", &candidate.into()).unwrap(),
            expected
        );
    }

    #[rstest]
    #[case("Cook")]
    #[case("")]
    #[case("bu")]
    #[case("buy ")]
    #[case("sells")]
    fn test_unknown_kind_is_value_error(#[case] candidate: &str) {
        let err = TransactionType::type_check_from_string("transaction_type", &candidate.into())
            .unwrap_err();
        assert!(err.is_value_error());
        assert!(
            err.message()
                .starts_with("Parameter 'transaction_type' has invalid transaction type value: ")
        );
    }

    #[test]
    fn test_non_string_is_type_error() {
        for candidate in [FieldValue::from(34.6), FieldValue::Null, FieldValue::from(1111)] {
            let err = TransactionType::type_check_from_string("transaction_type", &candidate)
                .unwrap_err();
            assert!(err.is_type_error());
            assert!(err.message().starts_with("Parameter 'transaction_type' has non-string value"));
        }
    }

    #[test]
    fn test_every_member_round_trips_through_its_names() {
        for kind in TransactionType::ALL {
            assert_eq!(TransactionType::lookup(kind.name()), Some(kind));
            assert_eq!(TransactionType::lookup(kind.as_str()), Some(kind));
            assert_eq!(kind.as_str(), kind.name().to_ascii_lowercase());
        }
    }

    #[test]
    fn test_from_str_and_display() {
        assert_eq!("eaRn".parse::<TransactionType>().unwrap(), TransactionType::Earn);
        assert!("cook".parse::<TransactionType>().is_err());
        assert_eq!(TransactionType::Earn.to_string(), "EARN");
    }
}
