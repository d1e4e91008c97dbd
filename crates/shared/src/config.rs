//! Configuration collaborator.
//!
//! Supplies the authoritative sets of known assets, exchanges and holders,
//! plus the numeric precision used by transaction validation. A loaded
//! `Configuration` is immutable and can be shared across threads.

use std::collections::BTreeSet;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// Largest scale supported by `rust_decimal`.
const MAX_DECIMAL_SCALE: u32 = 28;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The underlying source could not be read or deserialized.
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// A setting was read but is out of range.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Validation settings and known-entity sets.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Configuration {
    /// Known asset codes (e.g. "BTC").
    #[serde(default)]
    assets: BTreeSet<String>,
    /// Known exchange names.
    #[serde(default)]
    exchanges: BTreeSet<String>,
    /// Known holder names.
    #[serde(default)]
    holders: BTreeSet<String>,
    /// Decimal places kept for fiat amounts when checking prices for zero.
    #[serde(default = "default_currency_precision")]
    currency_precision: u32,
    /// Largest difference tolerated by soft consistency checks.
    #[serde(
        default = "default_consistency_tolerance",
        with = "rust_decimal::serde::str"
    )]
    consistency_tolerance: Decimal,
}

fn default_currency_precision() -> u32 {
    13
}

fn default_consistency_tolerance() -> Decimal {
    Decimal::new(1, 2) // 0.01
}

impl Configuration {
    /// Creates a configuration from in-memory sets with default precision.
    pub fn new<A, E, H>(assets: A, exchanges: E, holders: H) -> Self
    where
        A: IntoIterator,
        A::Item: Into<String>,
        E: IntoIterator,
        E::Item: Into<String>,
        H: IntoIterator,
        H::Item: Into<String>,
    {
        Self {
            assets: assets.into_iter().map(Into::into).collect(),
            exchanges: exchanges.into_iter().map(Into::into).collect(),
            holders: holders.into_iter().map(Into::into).collect(),
            currency_precision: default_currency_precision(),
            consistency_tolerance: default_consistency_tolerance(),
        }
    }

    /// Sets the currency precision.
    #[must_use]
    pub fn with_currency_precision(mut self, currency_precision: u32) -> Self {
        self.currency_precision = currency_precision;
        self
    }

    /// Sets the soft consistency tolerance.
    #[must_use]
    pub fn with_consistency_tolerance(mut self, consistency_tolerance: Decimal) -> Self {
        self.consistency_tolerance = consistency_tolerance;
        self
    }

    /// Loads configuration from a TOML file and the environment.
    ///
    /// Environment variables prefixed with `TAXLEDGER__` override scalar
    /// settings, e.g. `TAXLEDGER__CURRENCY_PRECISION=4`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, cannot be deserialized,
    /// or contains out-of-range settings.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).format(config::FileFormat::Toml))
            .add_source(config::Environment::with_prefix("TAXLEDGER").prefix_separator("__").separator("__"))
            .build()?;

        let configuration: Self = settings.try_deserialize()?;
        configuration.validate()?;
        Ok(configuration)
    }

    /// Checks that numeric settings are in range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the offending setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.currency_precision > MAX_DECIMAL_SCALE {
            return Err(ConfigError::Invalid(format!(
                "currency_precision must be at most {MAX_DECIMAL_SCALE}, got {}",
                self.currency_precision
            )));
        }
        if self.consistency_tolerance.is_sign_negative() {
            return Err(ConfigError::Invalid(format!(
                "consistency_tolerance must not be negative, got {}",
                self.consistency_tolerance
            )));
        }
        Ok(())
    }

    /// Returns true if `asset` is a known asset code.
    #[must_use]
    pub fn is_known_asset(&self, asset: &str) -> bool {
        self.assets.contains(asset)
    }

    /// Returns true if `exchange` is a known exchange.
    #[must_use]
    pub fn is_known_exchange(&self, exchange: &str) -> bool {
        self.exchanges.contains(exchange)
    }

    /// Returns true if `holder` is a known holder.
    #[must_use]
    pub fn is_known_holder(&self, holder: &str) -> bool {
        self.holders.contains(holder)
    }

    /// Returns the currency precision (decimal places).
    #[must_use]
    pub const fn currency_precision(&self) -> u32 {
        self.currency_precision
    }

    /// Returns the soft consistency tolerance.
    #[must_use]
    pub const fn consistency_tolerance(&self) -> Decimal {
        self.consistency_tolerance
    }
}
