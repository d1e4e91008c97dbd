//! Common types used across the workspace.

pub mod field;

pub use field::FieldValue;
