//! Monetary amounts in integer minor units
//!
//! All money in the gateway is an integer count of the smallest currency
//! denomination (paise for INR, cents for USD). There is no fractional
//! arithmetic anywhere in the system, so a plain `i64` wrapper is enough
//! and floating-point rounding can never occur.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when constructing or combining amounts
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("amount must not be negative, got {0}")]
    Negative(i64),

    #[error("overflow during amount calculation")]
    Overflow,

    #[error("unsupported currency code: {0}")]
    UnknownCurrency(String),
}

/// Currency codes accepted by the gateway, ISO 4217
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Inr,
    Usd,
    Eur,
    Gbp,
    Sgd,
    Aed,
}

impl Currency {
    /// Returns the ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Inr => "INR",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Sgd => "SGD",
            Currency::Aed => "AED",
        }
    }

    /// Returns the number of minor-unit digits for this currency
    pub fn decimal_places(&self) -> u32 {
        2
    }

    /// Returns the currency symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Inr => "₹",
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
            Currency::Sgd => "S$",
            Currency::Aed => "د.إ",
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::Inr
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "INR" => Ok(Currency::Inr),
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "GBP" => Ok(Currency::Gbp),
            "SGD" => Ok(Currency::Sgd),
            "AED" => Ok(Currency::Aed),
            other => Err(AmountError::UnknownCurrency(other.to_string())),
        }
    }
}

/// A non-negative monetary amount in minor units
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    /// Creates an amount from minor units, rejecting negative values
    pub fn from_minor(minor_units: i64) -> Result<Self, AmountError> {
        if minor_units < 0 {
            return Err(AmountError::Negative(minor_units));
        }
        Ok(Self(minor_units))
    }

    /// Zero amount
    pub fn zero() -> Self {
        Self(0)
    }

    /// Returns the raw minor-unit count
    pub fn minor_units(&self) -> i64 {
        self.0
    }

    /// Checked addition
    pub fn checked_add(&self, other: Amount) -> Result<Amount, AmountError> {
        self.0
            .checked_add(other.0)
            .map(Amount)
            .ok_or(AmountError::Overflow)
    }

    /// Formats the amount in major units for a currency, e.g. `₹5.00`
    pub fn display_in(&self, currency: Currency) -> String {
        let divisor = 10_i64.pow(currency.decimal_places());
        format!(
            "{}{}.{:02}",
            currency.symbol(),
            self.0 / divisor,
            self.0 % divisor
        )
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
