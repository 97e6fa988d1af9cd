//! Unit tests for the Money module
//!
//! Tests cover money creation, parsing of textual amounts,
//! currency handling, and serialization.

use core_kernel::{Money, Currency, MoneyError};
use rust_decimal_macros::dec;

mod creation {
    use super::*;

    #[test]
    fn test_new_rounds_to_four_decimal_places() {
        let m = Money::new(dec!(100.123456789), Currency::USD);
        assert_eq!(m.amount(), dec!(100.1235));
    }

    #[test]
    fn test_zero_creates_zero_amount() {
        let m = Money::zero(Currency::EUR);
        assert!(m.is_zero());
        assert_eq!(m.currency(), Currency::EUR);
    }

    #[test]
    fn test_default_currency_is_usd() {
        assert_eq!(Currency::default(), Currency::USD);
    }
}

mod parsing {
    use super::*;

    #[test]
    fn test_parse_plain_decimal() {
        let m = Money::parse_amount("25.0", Currency::USD).unwrap();
        assert_eq!(m.amount(), dec!(25.0));
    }

    #[test]
    fn test_parse_with_thousands_separator() {
        let m = Money::parse_amount("1,250.50", Currency::USD).unwrap();
        assert_eq!(m.amount(), dec!(1250.50));
    }

    #[test]
    fn test_parse_foreign_symbol() {
        let m = Money::parse_amount("€12", Currency::EUR).unwrap();
        assert_eq!(m.amount(), dec!(12));
    }

    #[test]
    fn test_parse_negative_is_rejected() {
        let result = Money::parse_amount("-5", Currency::USD);
        assert_eq!(result, Err(MoneyError::NegativeAmount(dec!(-5))));
    }

    #[test]
    fn test_parse_empty_is_rejected() {
        assert!(matches!(
            Money::parse_amount("  ", Currency::USD),
            Err(MoneyError::InvalidAmount(_))
        ));
    }
}

mod serialization {
    use super::*;

    #[test]
    fn test_currency_serializes_uppercase() {
        let json = serde_json::to_string(&Currency::GBP).unwrap();
        assert_eq!(json, "\"GBP\"");
    }

    #[test]
    fn test_money_json_roundtrip() {
        let m = Money::new(dec!(50.00), Currency::USD);
        let json = serde_json::to_string(&m).unwrap();
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, back);
    }
}
