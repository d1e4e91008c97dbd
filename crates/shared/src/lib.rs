//! Shared types, errors, and configuration for taxledger.
//!
//! This crate provides the pieces every other crate depends on:
//! - The two validation error kinds (`EntryError`)
//! - Loosely-typed input values (`FieldValue`)
//! - The configuration collaborator (`Configuration`)

pub mod config;
pub mod error;
pub mod types;

pub use config::{ConfigError, Configuration};
pub use error::{EntryError, EntryResult, ErrorKind};
pub use types::FieldValue;
