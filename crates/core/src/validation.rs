//! Parameter validation primitives.
//!
//! Every constructor in this crate is built from two kinds of checks:
//! shape checks (`type_check_*`) that fail with [`EntryError::Type`], and
//! constraint checks ([`value_check`]) that fail with [`EntryError::Value`].

use std::fmt::Display;

use rust_decimal::Decimal;
use taxledger_shared::{EntryError, EntryResult, FieldValue};

fn shape_error(name: &str, expected: &str, value: &FieldValue) -> EntryError {
    EntryError::type_error(format!("Parameter '{name}' has non-{expected} value {value}"))
}

/// Checks that `value` is a string.
pub fn type_check_string<'a>(name: &str, value: &'a FieldValue) -> EntryResult<&'a str> {
    value.as_str().ok_or_else(|| shape_error(name, "string", value))
}

/// Checks that `value` is absent (`None` or null) or a string.
pub fn type_check_optional_string<'a>(
    name: &str,
    value: Option<&'a FieldValue>,
) -> EntryResult<Option<&'a str>> {
    match value {
        None | Some(FieldValue::Null) => Ok(None),
        Some(value) => type_check_string(name, value).map(Some),
    }
}

/// Checks that `value` is an integer. Booleans are not integers.
pub fn type_check_int(name: &str, value: &FieldValue) -> EntryResult<i64> {
    value.as_int().ok_or_else(|| shape_error(name, "integer", value))
}

/// Checks that `value` is a decimal. Floats and integers are rejected.
pub fn type_check_decimal(name: &str, value: &FieldValue) -> EntryResult<Decimal> {
    value.as_decimal().ok_or_else(|| shape_error(name, "decimal", value))
}

/// Checks that `value` is a list.
pub fn type_check_list<'a>(name: &str, value: &'a FieldValue) -> EntryResult<&'a [FieldValue]> {
    value.as_list().ok_or_else(|| {
        EntryError::type_error(format!("Parameter '{name}' is not of type List: {value}"))
    })
}

/// Checks a type-correct value against a constraint.
///
/// On failure the message reads `Parameter '<name>' <message> <value>`.
pub fn value_check<T, P>(name: &str, value: T, predicate: P, message: &str) -> EntryResult<T>
where
    T: Display,
    P: FnOnce(&T) -> bool,
{
    if predicate(&value) {
        Ok(value)
    } else {
        Err(EntryError::value_error(format!("Parameter '{name}' {message} {value}")))
    }
}

/// Checks that `value` is an integer that is positive (or non-negative
/// when `non_zero` is false).
pub fn type_check_positive_int(name: &str, value: &FieldValue, non_zero: bool) -> EntryResult<i64> {
    let value = type_check_int(name, value)?;
    value_check(
        name,
        value,
        |v| if non_zero { *v > 0 } else { *v >= 0 },
        "has non-positive value",
    )
}

/// Checks that `value` is a decimal that is positive (or non-negative when
/// `non_zero` is false).
///
/// Zero and negative inputs are reported with distinct messages.
pub fn type_check_positive_decimal(
    name: &str,
    value: &FieldValue,
    non_zero: bool,
) -> EntryResult<Decimal> {
    let value = type_check_decimal(name, value)?;
    let value = value_check(name, value, |v| !(non_zero && v.is_zero()), "has zero value")?;
    let value = value_check(name, value, |v| *v >= Decimal::ZERO, "has non-positive value")?;
    // Negative zero is stored and rendered unsigned.
    Ok(if value.is_zero() { Decimal::ZERO } else { value })
}

/// Checks that `value` is a string accepted by `is_known`.
pub fn type_check_known<'a, F>(name: &str, value: &'a FieldValue, is_known: F) -> EntryResult<&'a str>
where
    F: FnOnce(&str) -> bool,
{
    let value = type_check_string(name, value)?;
    if is_known(value) {
        Ok(value)
    } else {
        Err(EntryError::value_error(format!(
            "Parameter '{name}' value is not known: {value}"
        )))
    }
}
