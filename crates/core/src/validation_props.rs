//! Property-based tests for parameter validation and kind lookup.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::entry_types::TransactionType;
use super::validation::{type_check_positive_decimal, type_check_positive_int};

/// Strategy to generate a positive decimal with up to 8 fractional digits.
fn positive_decimal() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_000_000i64, 0u32..=8).prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

/// Strategy to pick a transaction kind.
fn kind_strategy() -> impl Strategy<Value = TransactionType> {
    proptest::sample::select(TransactionType::ALL.to_vec())
}

/// Strategy to scramble the case of a string, one flag per character.
fn scrambled(name: &'static str) -> impl Strategy<Value = String> {
    proptest::collection::vec(any::<bool>(), name.len()).prop_map(move |flags| {
        name.chars()
            .zip(flags)
            .map(|(c, upper)| if upper { c.to_ascii_uppercase() } else { c.to_ascii_lowercase() })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Positive decimals pass both the strict and the non-strict check.
    #[test]
    fn prop_positive_decimal_accepted(amount in positive_decimal()) {
        prop_assert_eq!(type_check_positive_decimal("x", &amount.into(), true).unwrap(), amount);
        prop_assert_eq!(type_check_positive_decimal("x", &amount.into(), false).unwrap(), amount);
    }

    /// Negative decimals are rejected with the non-positive message.
    #[test]
    fn prop_negative_decimal_rejected(amount in positive_decimal()) {
        let err = type_check_positive_decimal("x", &(-amount).into(), false).unwrap_err();
        prop_assert!(err.is_value_error());
        prop_assert!(err.message().starts_with("Parameter 'x' has non-positive value"));
    }

    /// Negative integers are rejected whatever `non_zero` says.
    #[test]
    fn prop_negative_int_rejected(n in 1i64..i64::MAX, non_zero in any::<bool>()) {
        let err = type_check_positive_int("unique_id", &(-n).into(), non_zero).unwrap_err();
        prop_assert!(err.is_value_error());
    }

    /// Lookup ignores case for every member.
    #[test]
    fn prop_lookup_ignores_case(
        (kind, candidate) in kind_strategy().prop_flat_map(|kind| (Just(kind), scrambled(kind.name())))
    ) {
        let resolved = TransactionType::type_check_from_string("transaction_type", &candidate.clone().into());
        prop_assert_eq!(resolved.unwrap(), kind, "candidate {}", candidate);
    }

    /// Strings that are not a member name are rejected.
    #[test]
    fn prop_unknown_strings_rejected(candidate in "[a-zA-Z ]{0,12}") {
        let is_member = TransactionType::ALL
            .iter()
            .any(|kind| kind.name().eq_ignore_ascii_case(&candidate));
        let result = TransactionType::type_check_from_string("transaction_type", &candidate.clone().into());
        prop_assert_eq!(result.is_ok(), is_member);
        if let Err(err) = result {
            prop_assert!(err.is_value_error());
        }
    }
}
