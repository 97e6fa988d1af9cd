//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use chrono::{Days, NaiveDate};
use core_kernel::Currency;
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for generating valid Currency values
pub fn currency_strategy() -> impl Strategy<Value = Currency> {
    prop_oneof![
        Just(Currency::USD),
        Just(Currency::EUR),
        Just(Currency::GBP),
        Just(Currency::JPY),
        Just(Currency::CHF),
        Just(Currency::INR),
        Just(Currency::AUD),
        Just(Currency::CAD),
        Just(Currency::SGD),
        Just(Currency::HKD),
    ]
}

/// Strategy for order dates between 2000 and roughly 2040
pub fn order_date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0u64..15_000u64).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2000, 1, 1).unwrap() + Days::new(offset)
    })
}

/// Strategy for filing offsets straddling the 90-day window
pub fn filing_offset_strategy() -> impl Strategy<Value = u64> {
    prop_oneof![0u64..=90u64, 91u64..=1_000u64]
}

/// Strategy for an (order date, claim date, offset in days) triple
pub fn filing_strategy() -> impl Strategy<Value = (NaiveDate, NaiveDate, u64)> {
    (order_date_strategy(), filing_offset_strategy())
        .prop_map(|(order, offset)| (order, order + Days::new(offset), offset))
}

/// Strategy for non-negative product costs with two decimal places
pub fn product_cost_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for arbitrary non-empty review text
pub fn review_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z ,.!]{0,120}"
}

/// Strategy for text that is not an ISO calendar date
pub fn malformed_date_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("2022-13-01".to_string()),
        Just("2022-02-30".to_string()),
        Just("01/02/2022".to_string()),
        Just("yesterday".to_string()),
        "[a-z]{1,10}",
    ]
}
