//! Validated transaction records for taxledger.
//!
//! This crate turns loosely-typed transaction input into immutable,
//! internally consistent records that downstream tax logic can trust.
//!
//! # Modules
//!
//! - `validation` - Type and value assertion primitives
//! - `timestamp` - Timezone-aware timestamp parsing
//! - `entry_types` - The closed set of transaction kinds
//! - `transaction` - Validation, derivation and rendering shared by all records
//! - `in_transaction` / `out_transaction` - The two record variants
//! - `warnings` - Sinks for soft consistency warnings

pub mod entry_types;
pub mod in_transaction;
pub mod out_transaction;
pub mod timestamp;
pub mod transaction;
pub mod validation;
pub mod warnings;

#[cfg(test)]
mod transaction_props;
#[cfg(test)]
mod validation_props;

pub use entry_types::TransactionType;
pub use in_transaction::InTransaction;
pub use out_transaction::OutTransaction;
pub use timestamp::Timestamp;
pub use transaction::{
    AnyTransaction, BalanceSign, DirectionTable, RenderFormat, TransactionInput, TransactionRecord,
};
pub use warnings::{CollectingSink, ConsistencyCheck, ConsistencyWarning, TracingSink, WarningSink};
