//! Sinks for soft consistency warnings.
//!
//! Cross-field mismatches never reject a record. They are reported to a
//! [`WarningSink`] supplied by the caller, so tests and batch importers can
//! collect them instead of scraping logs.

use std::sync::{Mutex, PoisonError};

/// Which soft consistency check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsistencyCheck {
    /// crypto amount x spot price differs from the no-fee usd total.
    SpotPriceTotal,
    /// with-fee usd total differs from no-fee usd total + usd fee.
    FeeTotal,
}

/// A soft consistency warning raised while building a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsistencyWarning {
    /// Record variant name, e.g. `InTransaction`.
    pub record: &'static str,
    /// Unique id of the offending record.
    pub unique_id: String,
    /// The check that failed.
    pub check: ConsistencyCheck,
    /// Human-readable message naming the record and both field values.
    pub message: String,
}

/// Receives soft consistency warnings.
pub trait WarningSink: Send + Sync {
    /// Handles one warning.
    fn warn(&self, warning: ConsistencyWarning);
}

/// Forwards warnings to `tracing` at WARN level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl WarningSink for TracingSink {
    fn warn(&self, warning: ConsistencyWarning) {
        tracing::warn!(
            record = warning.record,
            unique_id = %warning.unique_id,
            check = ?warning.check,
            "{}",
            warning.message
        );
    }
}

/// Stores warnings in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    warnings: Mutex<Vec<ConsistencyWarning>>,
}

impl CollectingSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the collected warnings, oldest first.
    pub fn warnings(&self) -> Vec<ConsistencyWarning> {
        self.lock().clone()
    }

    /// Removes and returns the collected warnings.
    pub fn take(&self) -> Vec<ConsistencyWarning> {
        std::mem::take(&mut *self.lock())
    }

    /// Number of collected warnings.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if nothing has been collected.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<ConsistencyWarning>> {
        // A panic while pushing cannot leave the vector half-written.
        self.warnings.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl WarningSink for CollectingSink {
    fn warn(&self, warning: ConsistencyWarning) {
        self.lock().push(warning);
    }
}
