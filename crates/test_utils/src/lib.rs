//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! refund claims test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built test data for claims and dates
//! - `builders`: Builder patterns for claim submissions
//! - `doubles`: Recording in-memory extractors and estimators
//! - `assertions`: Custom assertion helpers for claim outcomes
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod doubles;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use doubles::*;
pub use assertions::*;
pub use generators::*;
