//! Core Kernel - Foundational types and utilities for the refund claims system
//!
//! This crate provides the fundamental building blocks used across the workspace:
//! - Money types with precise decimal arithmetic
//! - Warranty windows and calendar-date parsing
//! - Strongly-typed claim identifiers
//! - Port abstractions shared by adapters to external services

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod ports;

pub use money::{Money, Currency, MoneyError};
pub use temporal::{WarrantyWindow, TemporalError, parse_iso_date};
pub use identifiers::ClaimId;
pub use ports::{PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth};
