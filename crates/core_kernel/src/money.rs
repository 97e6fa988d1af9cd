//! Money types with precise decimal arithmetic
//!
//! This module provides a type-safe representation of monetary values
//! using rust_decimal for precise calculations without floating-point errors.
//! Product costs and refund amounts are both carried as `Money`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Currency codes following ISO 4217
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
    JPY,
    CHF,
    INR,
    AUD,
    CAD,
    SGD,
    HKD,
}

impl Currency {
    /// Returns the number of decimal places for this currency
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Returns the currency symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::GBP => "£",
            Currency::JPY => "¥",
            Currency::CHF => "CHF",
            Currency::INR => "₹",
            Currency::AUD => "A$",
            Currency::CAD => "C$",
            Currency::SGD => "S$",
            Currency::HKD => "HK$",
        }
    }

    /// Returns the ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
            Currency::CHF => "CHF",
            Currency::INR => "INR",
            Currency::AUD => "AUD",
            Currency::CAD => "CAD",
            Currency::SGD => "SGD",
            Currency::HKD => "HKD",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Negative amount not allowed: {0}")]
    NegativeAmount(Decimal),
}

/// A monetary amount with associated currency
///
/// Amounts are stored with 4 decimal places internally; display rounds to
/// the currency's minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    /// Creates a new Money value
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self {
            amount: amount.round_dp(4),
            currency,
        }
    }

    /// Creates a Money value, rejecting negative amounts
    pub fn non_negative(amount: Decimal, currency: Currency) -> Result<Self, MoneyError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(MoneyError::NegativeAmount(amount));
        }
        Ok(Self::new(amount, currency))
    }

    /// Parses a textual amount such as `"25.00"` or `"$25"`
    ///
    /// A leading currency symbol and surrounding whitespace are tolerated.
    /// Negative amounts are rejected.
    pub fn parse_amount(text: &str, currency: Currency) -> Result<Self, MoneyError> {
        let trimmed = text.trim();
        let digits = trimmed
            .strip_prefix(currency.symbol())
            .unwrap_or(trimmed)
            .trim()
            .replace(',', "");

        let amount = Decimal::from_str(&digits)
            .map_err(|_| MoneyError::InvalidAmount(text.to_string()))?;
        Self::non_negative(amount, currency)
    }

    /// Creates a zero amount in the specified currency
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: dec!(0),
            currency,
        }
    }

    /// Returns the amount
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the currency
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dp = self.currency.decimal_places();
        write!(
            f,
            "{}{:.dp$}",
            self.currency.symbol(),
            self.amount,
            dp = dp as usize
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_creation() {
        let m = Money::new(dec!(100.50), Currency::USD);
        assert_eq!(m.amount(), dec!(100.50));
        assert_eq!(m.currency(), Currency::USD);
    }

    #[test]
    fn test_non_negative_rejects_negative() {
        let result = Money::non_negative(dec!(-0.01), Currency::USD);
        assert_eq!(result, Err(MoneyError::NegativeAmount(dec!(-0.01))));
        assert!(Money::non_negative(dec!(0), Currency::USD).is_ok());
    }

    #[test]
    fn test_parse_amount_with_symbol() {
        let m = Money::parse_amount(" $25.00 ", Currency::USD).unwrap();
        assert_eq!(m.amount(), dec!(25));
    }

    #[test]
    fn test_parse_amount_rejects_text() {
        let result = Money::parse_amount("twenty five", Currency::USD);
        assert!(matches!(result, Err(MoneyError::InvalidAmount(_))));
    }

    #[test]
    fn test_display_uses_symbol_and_minor_units() {
        let m = Money::new(dec!(49.5), Currency::USD);
        assert_eq!(m.to_string(), "$49.50");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn parse_amount_roundtrips_minor_units(cents in 0i64..10_000_000i64) {
            let amount = Decimal::new(cents, 2);
            let parsed = Money::parse_amount(&amount.to_string(), Currency::USD).unwrap();
            prop_assert_eq!(parsed.amount(), amount);
        }
    }
}
