//! Calendar-date handling for claim eligibility
//!
//! Claims carry calendar dates without time-of-day. This module parses them
//! from their ISO form and answers the one temporal question the claims
//! domain asks: was the claim filed inside the warranty window?

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid date for {field}: '{value}' is not a YYYY-MM-DD calendar date")]
    InvalidDate {
        field: String,
        value: String,
    },
}

/// Parses an ISO `YYYY-MM-DD` calendar date
///
/// `field` names the input being parsed and is carried into the error.
pub fn parse_iso_date(field: &str, value: &str) -> Result<NaiveDate, TemporalError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| TemporalError::InvalidDate {
        field: field.to_string(),
        value: value.to_string(),
    })
}

/// A warranty window measured in whole days from the order date
///
/// The window is inclusive: a claim filed exactly `days` after the order is
/// still inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarrantyWindow {
    days: u32,
}

impl WarrantyWindow {
    /// The standard 90-day return window
    pub const STANDARD: WarrantyWindow = WarrantyWindow { days: 90 };

    /// Creates a window of the given length in days
    pub fn new(days: u32) -> Self {
        Self { days }
    }

    /// Returns the window length in days
    pub fn days(&self) -> u32 {
        self.days
    }

    /// Returns the last date on which a claim is still accepted
    ///
    /// `None` when the deadline falls outside the representable date range.
    pub fn deadline(&self, order_date: NaiveDate) -> Option<NaiveDate> {
        order_date.checked_add_days(Days::new(u64::from(self.days)))
    }

    /// Returns true if a claim filed on `claim_date` is inside the window
    pub fn contains(&self, order_date: NaiveDate, claim_date: NaiveDate) -> bool {
        match self.deadline(order_date) {
            Some(deadline) => claim_date <= deadline,
            None => true,
        }
    }
}

impl Default for WarrantyWindow {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(parse_iso_date("order_date", "2022-01-01").unwrap(), date(2022, 1, 1));
    }

    #[test]
    fn test_parse_rejects_impossible_date() {
        let err = parse_iso_date("claim_date", "2022-02-30").unwrap_err();
        assert_eq!(
            err,
            TemporalError::InvalidDate {
                field: "claim_date".to_string(),
                value: "2022-02-30".to_string(),
            }
        );
    }

    #[test]
    fn test_window_is_inclusive_at_boundary() {
        let window = WarrantyWindow::STANDARD;
        let order = date(2022, 1, 1);

        assert_eq!(window.deadline(order), Some(date(2022, 4, 1)));
        assert!(window.contains(order, date(2022, 4, 1)));
        assert!(!window.contains(order, date(2022, 4, 2)));
    }

    #[test]
    fn test_claim_before_order_is_inside_window() {
        let window = WarrantyWindow::STANDARD;
        assert!(window.contains(date(2022, 3, 1), date(2022, 1, 1)));
    }
}
