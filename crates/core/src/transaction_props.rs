//! Property-based tests for record construction, equality and rendering.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use proptest::prelude::*;
use rust_decimal::Decimal;
use taxledger_shared::Configuration;

use super::in_transaction::InTransaction;
use super::transaction::{format_decimal, TransactionInput};

fn configuration() -> Configuration {
    Configuration::new(["B1"], ["BlockFi"], ["Bob"])
}

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Strategy to generate a positive amount with up to `max_scale` fractional digits.
fn amount(max_scale: u32) -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000_000i64, 0u32..=max_scale).prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

fn input(id: i64, spot_price: Decimal, crypto_in: Decimal, usd_fee: Decimal) -> TransactionInput {
    TransactionInput {
        timestamp: "2021-01-02T08:42:43.882Z".into(),
        asset: "B1".into(),
        exchange: "BlockFi".into(),
        holder: "Bob".into(),
        transaction_type: "buy".into(),
        spot_price: spot_price.into(),
        crypto_amount: crypto_in.into(),
        usd_fee: usd_fee.into(),
        unique_id: id.into(),
        ..TransactionInput::default()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Identical arguments build equal, equal-hashing records; a different
    /// id builds an unequal one.
    #[test]
    fn prop_equality_follows_inputs(
        id in 1i64..1_000_000,
        spot_price in amount(4),
        crypto_in in amount(8),
        usd_fee in amount(2),
    ) {
        let config = configuration();
        let first = InTransaction::new(&config, &input(id, spot_price, crypto_in, usd_fee)).unwrap();
        let second = InTransaction::new(&config, &input(id, spot_price, crypto_in, usd_fee)).unwrap();
        let other = InTransaction::new(&config, &input(id + 1, spot_price, crypto_in, usd_fee)).unwrap();

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(hash_of(&first), hash_of(&second));
        prop_assert_ne!(&first, &other);
    }

    /// Canonical rendering shows currency fields with 4 and crypto fields
    /// with 8 fractional digits.
    #[test]
    fn prop_rendering_precision(
        spot_price in amount(6),
        crypto_in in amount(10),
        usd_fee in amount(6),
    ) {
        let tx = InTransaction::new(&configuration(), &input(1, spot_price, crypto_in, usd_fee)).unwrap();
        let rendered = tx.to_string();

        let line = |name: &str| {
            rendered
                .lines()
                .find_map(|l| l.trim_start().strip_prefix(&format!("{name}=")).map(str::to_string))
                .unwrap()
        };
        let fraction_len = |value: String| value.split('.').nth(1).map_or(0, str::len);

        prop_assert_eq!(fraction_len(line("spot_price")), 4);
        prop_assert_eq!(fraction_len(line("crypto_in")), 8);
        prop_assert_eq!(fraction_len(line("usd_fee")), 4);
        prop_assert_eq!(line("spot_price"), format_decimal(spot_price, 4));
        prop_assert_eq!(line("crypto_in"), format_decimal(crypto_in, 8));
    }

    /// Positive prices that vanish at the configured precision are rejected
    /// like an exact zero.
    #[test]
    fn prop_tiny_spot_price_rejected(precision in 0u32..=10, mantissa in 1i64..5) {
        let config = configuration().with_currency_precision(precision);
        // mantissa < 5 at one digit past the precision rounds to zero.
        let spot_price = Decimal::new(mantissa, precision + 1);
        let err = InTransaction::new(&config, &input(19, spot_price, Decimal::ONE, Decimal::ZERO)).unwrap_err();

        prop_assert!(err.is_value_error());
        prop_assert!(err.message().ends_with("parameter 'spot_price' cannot be 0"));
    }
}
