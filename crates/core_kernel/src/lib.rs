//! Core Kernel - Foundational types for the money calculator
//!
//! This crate provides the building blocks shared by every other crate:
//! - Currency, Money and ExchangeRate value types with decimal arithmetic
//! - The session's read-only currency catalog
//! - Port infrastructure (errors, health checks) for adapters

pub mod money;
pub mod catalog;
pub mod error;
pub mod ports;

pub use money::{Money, Currency, ExchangeRate, MoneyError, DISPLAY_DECIMAL_PLACES};
pub use catalog::CurrencyCatalog;
pub use ports::{PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth};
pub use error::CoreError;
