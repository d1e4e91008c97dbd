//! Shared validation, derivation and rendering for transaction records.
//!
//! Inbound and outbound records have the same shape. What differs between
//! them (legal kinds, taxable kinds, the sign of balance changes, field
//! names) is described by a [`DirectionTable`] that is passed explicitly to
//! every helper in this module.

use std::fmt::Write as _;

use rust_decimal::{Decimal, RoundingStrategy};
use taxledger_shared::{Configuration, EntryError, EntryResult, FieldValue};

use crate::entry_types::TransactionType;
use crate::in_transaction::InTransaction;
use crate::out_transaction::OutTransaction;
use crate::timestamp::Timestamp;
use crate::validation::{
    type_check_known, type_check_list, type_check_optional_string, type_check_positive_decimal,
    type_check_positive_int, type_check_string,
};
use crate::warnings::{ConsistencyCheck, ConsistencyWarning, WarningSink};

/// Fractional digits shown for fiat amounts.
pub const CURRENCY_DISPLAY_PLACES: u32 = 4;
/// Fractional digits shown for crypto amounts.
pub const CRYPTO_DISPLAY_PLACES: u32 = 8;

const INDENT_UNIT: &str = "  ";

/// Sign applied to amounts when computing balance changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceSign {
    /// The record adds to the holder's balance.
    Positive,
    /// The record removes from the holder's balance.
    Negative,
}

impl BalanceSign {
    /// Applies the sign to a non-negative amount.
    #[must_use]
    pub fn apply(self, amount: Decimal) -> Decimal {
        match self {
            Self::Positive => amount,
            Self::Negative => -amount,
        }
    }
}

/// Direction-specific rules for a record variant.
#[derive(Debug, Clone, Copy)]
pub struct DirectionTable {
    /// Variant name used in messages and renderings.
    pub record_name: &'static str,
    /// Kinds this variant may carry.
    pub legal_kinds: &'static [TransactionType],
    /// Kinds that create taxable income at transaction time.
    pub taxable_kinds: &'static [TransactionType],
    /// Sign of `crypto_balance_change` and `usd_balance_change`.
    pub sign: BalanceSign,
    /// Parameter name of the crypto amount.
    pub crypto_field: &'static str,
    /// Parameter name of the usd total without fee.
    pub usd_no_fee_field: &'static str,
    /// Parameter name of the usd total with fee.
    pub usd_with_fee_field: &'static str,
}

impl DirectionTable {
    /// Returns true if `kind` may appear on this variant.
    #[must_use]
    pub fn is_legal(&self, kind: TransactionType) -> bool {
        self.legal_kinds.contains(&kind)
    }

    /// Returns true if `kind` is taxable on this variant.
    #[must_use]
    pub fn is_taxable(&self, kind: TransactionType) -> bool {
        self.taxable_kinds.contains(&kind)
    }
}

/// Raw, unvalidated input for one transaction.
///
/// `usd_no_fee` and `usd_with_fee` may be omitted; they are then computed as
/// `crypto_amount * spot_price` and `usd_no_fee + usd_fee`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionInput {
    /// Date-time with offset.
    pub timestamp: FieldValue,
    /// Asset code.
    pub asset: FieldValue,
    /// Exchange name.
    pub exchange: FieldValue,
    /// Holder name.
    pub holder: FieldValue,
    /// Transaction kind, any case.
    pub transaction_type: FieldValue,
    /// Price of one unit of the asset in usd.
    pub spot_price: FieldValue,
    /// Amount of crypto moved.
    pub crypto_amount: FieldValue,
    /// Fee paid in usd.
    pub usd_fee: FieldValue,
    /// Usd total without fee.
    pub usd_no_fee: Option<FieldValue>,
    /// Usd total with fee.
    pub usd_with_fee: Option<FieldValue>,
    /// Positive integer id.
    pub unique_id: FieldValue,
    /// Free text.
    pub notes: Option<FieldValue>,
}

/// The validated fields common to both record variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransactionRecord {
    unique_id: u64,
    timestamp: Timestamp,
    asset: String,
    exchange: String,
    holder: String,
    transaction_type: TransactionType,
    spot_price: Decimal,
    crypto_amount: Decimal,
    usd_fee: Decimal,
    usd_no_fee: Decimal,
    usd_with_fee: Decimal,
    notes: Option<String>,
    is_taxable: bool,
    usd_taxable_amount: Decimal,
    crypto_balance_change: Decimal,
    usd_balance_change: Decimal,
}

impl TransactionRecord {
    /// Validates `input` against `configuration` and the rules in `table`.
    ///
    /// Checks run in a fixed order and the first failure is returned.
    pub fn validate(
        configuration: &Configuration,
        input: &TransactionInput,
        table: &DirectionTable,
    ) -> EntryResult<Self> {
        let unique_id = type_check_positive_int("unique_id", &input.unique_id, true)?.unsigned_abs();
        let timestamp = Timestamp::parse("timestamp", &input.timestamp)?;
        let asset = type_check_known("asset", &input.asset, |a| configuration.is_known_asset(a))?;
        let exchange = type_check_known("exchange", &input.exchange, |e| {
            configuration.is_known_exchange(e)
        })?;
        let holder = type_check_known("holder", &input.holder, |h| configuration.is_known_holder(h))?;

        let identity = record_identity(asset, table.record_name, &timestamp, unique_id);

        let transaction_type =
            TransactionType::type_check_from_string("transaction_type", &input.transaction_type)?;
        if !table.is_legal(transaction_type) {
            return Err(EntryError::value_error(format!(
                "{identity}: invalid transaction type {transaction_type}"
            )));
        }

        let spot_price = type_check_positive_decimal("spot_price", &input.spot_price, false)?;
        let rounded_price = spot_price.round_dp_with_strategy(
            configuration.currency_precision(),
            RoundingStrategy::MidpointNearestEven,
        );
        if rounded_price.is_zero() {
            return Err(EntryError::value_error(format!(
                "{identity}: parameter 'spot_price' cannot be 0"
            )));
        }

        let crypto_amount = type_check_positive_decimal(table.crypto_field, &input.crypto_amount, true)?;
        let usd_fee = type_check_positive_decimal("usd_fee", &input.usd_fee, false)?;
        let usd_no_fee = match present(input.usd_no_fee.as_ref()) {
            Some(value) => type_check_positive_decimal(table.usd_no_fee_field, value, false)?,
            None => crypto_amount.checked_mul(spot_price).ok_or_else(|| {
                out_of_range(table.usd_no_fee_field, format!("{crypto_amount} * {spot_price}"))
            })?,
        };
        let usd_with_fee = match present(input.usd_with_fee.as_ref()) {
            Some(value) => type_check_positive_decimal(table.usd_with_fee_field, value, false)?,
            None => usd_no_fee.checked_add(usd_fee).ok_or_else(|| {
                out_of_range(table.usd_with_fee_field, format!("{usd_no_fee} + {usd_fee}"))
            })?,
        };
        let notes = type_check_optional_string("notes", input.notes.as_ref())?.map(str::to_string);

        let is_taxable = table.is_taxable(transaction_type);
        let usd_taxable_amount = if is_taxable { usd_with_fee } else { Decimal::ZERO };

        Ok(Self {
            unique_id,
            timestamp,
            asset: asset.to_string(),
            exchange: exchange.to_string(),
            holder: holder.to_string(),
            transaction_type,
            spot_price,
            crypto_amount,
            usd_fee,
            usd_no_fee,
            usd_with_fee,
            notes,
            is_taxable,
            usd_taxable_amount,
            crypto_balance_change: table.sign.apply(crypto_amount),
            usd_balance_change: table.sign.apply(usd_with_fee),
        })
    }

    /// Reports cross-field mismatches larger than the configured tolerance.
    ///
    /// Never fails; each mismatch becomes one warning in `sink`.
    pub fn check_consistency(
        &self,
        table: &DirectionTable,
        configuration: &Configuration,
        sink: &dyn WarningSink,
    ) {
        let tolerance = configuration.consistency_tolerance();
        let identity = self.identity(table);

        // A total too large to compute cannot match and counts as a mismatch.
        if exceeds(
            self.crypto_amount.checked_mul(self.spot_price),
            self.usd_no_fee,
            tolerance,
        ) {
            sink.warn(ConsistencyWarning {
                record: table.record_name,
                unique_id: self.unique_id.to_string(),
                check: ConsistencyCheck::SpotPriceTotal,
                message: format!(
                    "{identity}: {crypto} * spot_price != {no_fee}: {} * {} != {}",
                    self.crypto_amount,
                    self.spot_price,
                    self.usd_no_fee,
                    crypto = table.crypto_field,
                    no_fee = table.usd_no_fee_field,
                ),
            });
        }

        if exceeds(self.usd_no_fee.checked_add(self.usd_fee), self.usd_with_fee, tolerance) {
            sink.warn(ConsistencyWarning {
                record: table.record_name,
                unique_id: self.unique_id.to_string(),
                check: ConsistencyCheck::FeeTotal,
                message: format!(
                    "{identity}: {with_fee} != {no_fee} + usd_fee: {} != {} + {}",
                    self.usd_with_fee,
                    self.usd_no_fee,
                    self.usd_fee,
                    with_fee = table.usd_with_fee_field,
                    no_fee = table.usd_no_fee_field,
                ),
            });
        }
    }

    /// `<asset> <Record> (<timestamp>, id <id>)`, used to prefix messages.
    #[must_use]
    pub fn identity(&self, table: &DirectionTable) -> String {
        record_identity(&self.asset, table.record_name, &self.timestamp, self.unique_id)
    }

    /// Renders the record after validating the loosely-typed arguments.
    pub fn render(
        &self,
        table: &DirectionTable,
        indent: &FieldValue,
        format: RenderFormat,
        extra_data: &FieldValue,
    ) -> EntryResult<String> {
        let indent = type_check_positive_int("indent", indent, false)?;
        let indent = usize::try_from(indent).map_err(|_| {
            EntryError::value_error(format!("Parameter 'indent' has out-of-range value {indent}"))
        })?;
        let extra_data = type_check_list("extra_data", extra_data)?
            .iter()
            .map(|item| type_check_string("extra_data", item))
            .collect::<EntryResult<Vec<_>>>()?;

        Ok(self.render_unchecked(table, indent, format, &extra_data))
    }

    /// Renders the record with already validated arguments.
    #[must_use]
    pub fn render_unchecked(
        &self,
        table: &DirectionTable,
        indent: usize,
        format: RenderFormat,
        extra_data: &[&str],
    ) -> String {
        let fields = self.fields(table);
        match format {
            RenderFormat::Canonical => render_canonical(table.record_name, &fields, indent, extra_data),
            RenderFormat::Compact => render_compact(table.record_name, &fields, indent, extra_data),
        }
    }

    fn fields(&self, table: &DirectionTable) -> [(&'static str, FieldRendering); 13] {
        [
            ("id", FieldRendering::Text(self.unique_id.to_string())),
            ("timestamp", FieldRendering::Text(self.timestamp.to_string())),
            ("asset", FieldRendering::Text(self.asset.clone())),
            ("exchange", FieldRendering::Text(self.exchange.clone())),
            ("holder", FieldRendering::Text(self.holder.clone())),
            ("transaction_type", FieldRendering::Kind(self.transaction_type)),
            ("spot_price", FieldRendering::Currency(self.spot_price)),
            (table.crypto_field, FieldRendering::Crypto(self.crypto_amount)),
            ("usd_fee", FieldRendering::Currency(self.usd_fee)),
            (table.usd_no_fee_field, FieldRendering::Currency(self.usd_no_fee)),
            (table.usd_with_fee_field, FieldRendering::Currency(self.usd_with_fee)),
            ("is_taxable", FieldRendering::Flag(self.is_taxable)),
            ("usd_taxable_amount", FieldRendering::Currency(self.usd_taxable_amount)),
        ]
    }

    /// Numeric unique id.
    #[must_use]
    pub const fn unique_id(&self) -> u64 {
        self.unique_id
    }

    /// Timestamp with the offset it was recorded in.
    #[must_use]
    pub const fn timestamp(&self) -> &Timestamp {
        &self.timestamp
    }

    /// Asset code.
    #[must_use]
    pub fn asset(&self) -> &str {
        &self.asset
    }

    /// Exchange name.
    #[must_use]
    pub fn exchange(&self) -> &str {
        &self.exchange
    }

    /// Holder name.
    #[must_use]
    pub fn holder(&self) -> &str {
        &self.holder
    }

    /// Transaction kind.
    #[must_use]
    pub const fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    /// Spot price in usd.
    #[must_use]
    pub const fn spot_price(&self) -> Decimal {
        self.spot_price
    }

    /// Crypto amount moved (always positive).
    #[must_use]
    pub const fn crypto_amount(&self) -> Decimal {
        self.crypto_amount
    }

    /// Fee in usd.
    #[must_use]
    pub const fn usd_fee(&self) -> Decimal {
        self.usd_fee
    }

    /// Usd total without fee.
    #[must_use]
    pub const fn usd_no_fee(&self) -> Decimal {
        self.usd_no_fee
    }

    /// Usd total with fee.
    #[must_use]
    pub const fn usd_with_fee(&self) -> Decimal {
        self.usd_with_fee
    }

    /// Free-text notes.
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// True if the kind creates taxable income at transaction time.
    #[must_use]
    pub const fn is_taxable(&self) -> bool {
        self.is_taxable
    }

    /// Usd with-fee total when taxable, zero otherwise.
    #[must_use]
    pub const fn usd_taxable_amount(&self) -> Decimal {
        self.usd_taxable_amount
    }

    /// Signed change to the holder's crypto balance.
    #[must_use]
    pub const fn crypto_balance_change(&self) -> Decimal {
        self.crypto_balance_change
    }

    /// Signed change to the holder's usd balance.
    #[must_use]
    pub const fn usd_balance_change(&self) -> Decimal {
        self.usd_balance_change
    }
}

fn present(value: Option<&FieldValue>) -> Option<&FieldValue> {
    value.filter(|v| !v.is_null())
}

fn out_of_range(name: &str, expression: String) -> EntryError {
    EntryError::value_error(format!(
        "Parameter '{name}' has out-of-range value {expression}"
    ))
}

fn exceeds(computed: Option<Decimal>, recorded: Decimal, tolerance: Decimal) -> bool {
    computed
        .and_then(|computed| computed.checked_sub(recorded))
        .is_none_or(|difference| difference.abs() > tolerance)
}

fn record_identity(asset: &str, record_name: &str, timestamp: &Timestamp, unique_id: u64) -> String {
    format!("{asset} {record_name} ({timestamp}, id {unique_id})")
}

/// Output style of a rendered record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderFormat {
    /// Multi-line `Name:\n  field=value`.
    #[default]
    Canonical,
    /// Single-line `Name(field='value', ...)`.
    Compact,
}

enum FieldRendering {
    Text(String),
    Kind(TransactionType),
    Currency(Decimal),
    Crypto(Decimal),
    Flag(bool),
}

impl FieldRendering {
    fn canonical(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Kind(kind) => format!("TransactionType.{}", kind.name()),
            Self::Currency(amount) => format_decimal(*amount, CURRENCY_DISPLAY_PLACES),
            Self::Crypto(amount) => format_decimal(*amount, CRYPTO_DISPLAY_PLACES),
            Self::Flag(true) => "True".to_string(),
            Self::Flag(false) => "False".to_string(),
        }
    }

    fn compact(&self) -> String {
        match self {
            Self::Text(text) => format!("'{text}'"),
            Self::Kind(kind) => format!("<TransactionType.{}: '{}'>", kind.name(), kind.as_str()),
            Self::Currency(_) | Self::Crypto(_) | Self::Flag(_) => self.canonical(),
        }
    }
}

/// Formats `amount` with exactly `places` fractional digits.
#[must_use]
pub fn format_decimal(amount: Decimal, places: u32) -> String {
    let rounded = amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven);
    format!("{rounded:.prec$}", prec = places as usize)
}

fn render_canonical(
    record_name: &str,
    fields: &[(&str, FieldRendering)],
    indent: usize,
    extra_data: &[&str],
) -> String {
    let header_indent = INDENT_UNIT.repeat(indent);
    let field_indent = INDENT_UNIT.repeat(indent + 1);

    let mut out = format!("{header_indent}{record_name}:");
    for (name, value) in fields {
        let _ = write!(out, "\n{field_indent}{name}={}", value.canonical());
    }
    for line in extra_data {
        let _ = write!(out, "\n{field_indent}{line}");
    }
    out
}

fn render_compact(
    record_name: &str,
    fields: &[(&str, FieldRendering)],
    indent: usize,
    extra_data: &[&str],
) -> String {
    let parts: Vec<String> = fields
        .iter()
        .map(|(name, value)| format!("{name}={}", value.compact()))
        .chain(extra_data.iter().map(|line| (*line).to_string()))
        .collect();
    format!("{}{record_name}({})", INDENT_UNIT.repeat(indent), parts.join(", "))
}

/// Either record variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AnyTransaction {
    /// Inbound record.
    In(InTransaction),
    /// Outbound record.
    Out(OutTransaction),
}

impl AnyTransaction {
    /// Name of the concrete variant, e.g. `OutTransaction`.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::In(_) => InTransaction::TABLE.record_name,
            Self::Out(_) => OutTransaction::TABLE.record_name,
        }
    }

    /// The shared fields of the wrapped record.
    #[must_use]
    pub const fn record(&self) -> &TransactionRecord {
        match self {
            Self::In(transaction) => transaction.record(),
            Self::Out(transaction) => transaction.record(),
        }
    }
}

impl From<InTransaction> for AnyTransaction {
    fn from(transaction: InTransaction) -> Self {
        Self::In(transaction)
    }
}

impl From<OutTransaction> for AnyTransaction {
    fn from(transaction: OutTransaction) -> Self {
        Self::Out(transaction)
    }
}

/// Implements the public surface shared by both record variants.
///
/// `$name` must be a struct with a `record: TransactionRecord` field and an
/// associated `TABLE: DirectionTable`.
macro_rules! record_variant {
    ($name:ident, $variant:ident, crypto = $crypto:ident, no_fee = $no_fee:ident, with_fee = $with_fee:ident) => {
        impl $name {
            /// Validates `input` and builds the record, sending soft
            /// consistency warnings to `tracing`.
            pub fn new(
                configuration: &::taxledger_shared::Configuration,
                input: &$crate::transaction::TransactionInput,
            ) -> ::taxledger_shared::EntryResult<Self> {
                Self::new_with_sink(configuration, input, &$crate::warnings::TracingSink)
            }

            /// Validates `input` and builds the record, sending soft
            /// consistency warnings to `sink`.
            pub fn new_with_sink(
                configuration: &::taxledger_shared::Configuration,
                input: &$crate::transaction::TransactionInput,
                sink: &dyn $crate::warnings::WarningSink,
            ) -> ::taxledger_shared::EntryResult<Self> {
                let record = $crate::transaction::TransactionRecord::validate(
                    configuration,
                    input,
                    &Self::TABLE,
                )?;
                record.check_consistency(&Self::TABLE, configuration, sink);
                ::tracing::debug!(
                    record = Self::TABLE.record_name,
                    unique_id = record.unique_id(),
                    asset = record.asset(),
                    transaction_type = record.transaction_type().as_str(),
                    "transaction validated"
                );
                Ok(Self { record })
            }

            /// Checks that `candidate` is this variant.
            pub fn type_check<'a>(
                name: &str,
                candidate: &'a $crate::transaction::AnyTransaction,
            ) -> ::taxledger_shared::EntryResult<&'a Self> {
                match candidate {
                    $crate::transaction::AnyTransaction::$variant(transaction) => Ok(transaction),
                    other => Err(::taxledger_shared::EntryError::type_error(format!(
                        "Parameter '{name}' is not of type {}: {}",
                        Self::TABLE.record_name,
                        other.type_name()
                    ))),
                }
            }

            /// The shared validated fields.
            #[must_use]
            pub const fn record(&self) -> &$crate::transaction::TransactionRecord {
                &self.record
            }

            /// Unique id in string form.
            #[must_use]
            pub fn unique_id(&self) -> String {
                self.record.unique_id().to_string()
            }

            /// Timestamp with the offset it was recorded in.
            #[must_use]
            pub const fn timestamp(&self) -> &$crate::timestamp::Timestamp {
                self.record.timestamp()
            }

            /// Asset code.
            #[must_use]
            pub fn asset(&self) -> &str {
                self.record.asset()
            }

            /// Exchange name.
            #[must_use]
            pub fn exchange(&self) -> &str {
                self.record.exchange()
            }

            /// Holder name.
            #[must_use]
            pub fn holder(&self) -> &str {
                self.record.holder()
            }

            /// Transaction kind.
            #[must_use]
            pub const fn transaction_type(&self) -> $crate::entry_types::TransactionType {
                self.record.transaction_type()
            }

            /// Spot price in usd.
            #[must_use]
            pub const fn spot_price(&self) -> ::rust_decimal::Decimal {
                self.record.spot_price()
            }

            /// Crypto amount moved.
            #[must_use]
            pub const fn $crypto(&self) -> ::rust_decimal::Decimal {
                self.record.crypto_amount()
            }

            /// Fee in usd.
            #[must_use]
            pub const fn usd_fee(&self) -> ::rust_decimal::Decimal {
                self.record.usd_fee()
            }

            /// Usd total without fee.
            #[must_use]
            pub const fn $no_fee(&self) -> ::rust_decimal::Decimal {
                self.record.usd_no_fee()
            }

            /// Usd total with fee.
            #[must_use]
            pub const fn $with_fee(&self) -> ::rust_decimal::Decimal {
                self.record.usd_with_fee()
            }

            /// Free-text notes.
            #[must_use]
            pub fn notes(&self) -> Option<&str> {
                self.record.notes()
            }

            /// True if the kind creates taxable income at transaction time.
            #[must_use]
            pub const fn is_taxable(&self) -> bool {
                self.record.is_taxable()
            }

            /// Usd with-fee total when taxable, zero otherwise.
            #[must_use]
            pub const fn usd_taxable_amount(&self) -> ::rust_decimal::Decimal {
                self.record.usd_taxable_amount()
            }

            /// Signed change to the holder's crypto balance.
            #[must_use]
            pub const fn crypto_balance_change(&self) -> ::rust_decimal::Decimal {
                self.record.crypto_balance_change()
            }

            /// Signed change to the holder's usd balance.
            #[must_use]
            pub const fn usd_balance_change(&self) -> ::rust_decimal::Decimal {
                self.record.usd_balance_change()
            }

            /// Renders the record at `indent` (two spaces per level) with
            /// `extra_data` lines appended verbatim.
            pub fn to_string_with(
                &self,
                indent: impl Into<::taxledger_shared::FieldValue>,
                format: $crate::transaction::RenderFormat,
                extra_data: impl Into<::taxledger_shared::FieldValue>,
            ) -> ::taxledger_shared::EntryResult<String> {
                self.record.render(&Self::TABLE, &indent.into(), format, &extra_data.into())
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(&self.record.render_unchecked(
                    &Self::TABLE,
                    0,
                    $crate::transaction::RenderFormat::Canonical,
                    &[],
                ))
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(&self.record.render_unchecked(
                    &Self::TABLE,
                    0,
                    $crate::transaction::RenderFormat::Compact,
                    &[],
                ))
            }
        }
    };
}

pub(crate) use record_variant;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_decimal_pads_and_rounds() {
        assert_eq!(format_decimal(dec!(1000.0), 4), "1000.0000");
        assert_eq!(format_decimal(dec!(2.0002), 8), "2.00020000");
        assert_eq!(format_decimal(dec!(0), 4), "0.0000");
        assert_eq!(format_decimal(dec!(0.123456789), 8), "0.12345679");
        assert_eq!(format_decimal(dec!(1.00005), 4), "1.0000");
        assert_eq!(format_decimal(dec!(1.00015), 4), "1.0002");
    }

    #[test]
    fn test_balance_sign() {
        assert_eq!(BalanceSign::Positive.apply(dec!(2.5)), dec!(2.5));
        assert_eq!(BalanceSign::Negative.apply(dec!(2.5)), dec!(-2.5));
    }

    #[test]
    fn test_direction_tables_are_disjoint_on_move() {
        for table in [&InTransaction::TABLE, &OutTransaction::TABLE] {
            assert!(!table.is_legal(TransactionType::Move));
            for kind in table.taxable_kinds {
                assert!(table.is_legal(*kind), "{kind} taxable but illegal");
            }
        }
    }

    #[test]
    fn test_render_compact_text_quoting() {
        let fields = [
            ("id", FieldRendering::Text("7".to_string())),
            ("transaction_type", FieldRendering::Kind(TransactionType::Buy)),
            ("spot_price", FieldRendering::Currency(dec!(3))),
            ("is_taxable", FieldRendering::Flag(false)),
        ];
        assert_eq!(
            render_compact("InTransaction", &fields, 1, &["x"]),
            "  InTransaction(id='7', transaction_type=<TransactionType.BUY: 'buy'>, \
             spot_price=3.0000, is_taxable=False, x)"
        );
    }

    #[test]
    fn test_render_canonical_layout() {
        let fields = [
            ("id", FieldRendering::Text("7".to_string())),
            ("crypto_in", FieldRendering::Crypto(dec!(1))),
        ];
        assert_eq!(
            render_canonical("InTransaction", &fields, 0, &[]),
            "InTransaction:\n  id=7\n  crypto_in=1.00000000"
        );
        assert_eq!(
            render_canonical("InTransaction", &fields, 1, &["tail"]),
            "  InTransaction:\n    id=7\n    crypto_in=1.00000000\n    tail"
        );
    }
}
