//! Unit tests for the Temporal module
//!
//! Tests cover ISO date parsing and warranty window membership,
//! including the inclusive boundary.

use chrono::NaiveDate;
use core_kernel::{parse_iso_date, TemporalError, WarrantyWindow};
use proptest::prelude::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

mod parsing {
    use super::*;

    #[test]
    fn test_accepts_surrounding_whitespace() {
        assert_eq!(parse_iso_date("order_date", " 2022-01-01 ").unwrap(), date(2022, 1, 1));
    }

    #[test]
    fn test_rejects_other_formats() {
        for value in ["01/01/2022", "2022-1-1x", "", "2022-13-01", "yesterday"] {
            let result = parse_iso_date("order_date", value);
            assert!(
                matches!(result, Err(TemporalError::InvalidDate { .. })),
                "expected {value:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_error_names_field() {
        let err = parse_iso_date("claim_date", "soon").unwrap_err();
        assert!(err.to_string().contains("claim_date"));
        assert!(err.to_string().contains("soon"));
    }
}

mod window {
    use super::*;

    #[test]
    fn test_eighty_nine_days_is_inside() {
        assert!(WarrantyWindow::STANDARD.contains(date(2022, 1, 1), date(2022, 3, 31)));
    }

    #[test]
    fn test_one_hundred_twenty_days_is_outside() {
        assert!(!WarrantyWindow::STANDARD.contains(date(2022, 1, 1), date(2022, 5, 1)));
    }

    #[test]
    fn test_custom_window() {
        let window = WarrantyWindow::new(30);
        assert_eq!(window.days(), 30);
        assert!(window.contains(date(2024, 2, 1), date(2024, 3, 2)));
        assert!(!window.contains(date(2024, 2, 1), date(2024, 3, 3)));
    }

    #[test]
    fn test_default_is_standard() {
        assert_eq!(WarrantyWindow::default(), WarrantyWindow::STANDARD);
        assert_eq!(WarrantyWindow::STANDARD.days(), 90);
    }
}

proptest! {
    #[test]
    fn window_membership_matches_day_offset(
        base in 0i64..20_000,
        offset in -400i64..400,
    ) {
        let order = date(1990, 1, 1) + chrono::Duration::days(base);
        let claim = order + chrono::Duration::days(offset);
        prop_assert_eq!(WarrantyWindow::STANDARD.contains(order, claim), offset <= 90);
    }
}
