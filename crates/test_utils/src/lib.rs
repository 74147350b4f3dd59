//! Test Utilities Crate
//!
//! Provides shared test infrastructure for the money calculator test
//! suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built currencies, money, rates and catalogs
//! - `doubles`: Recording displays and scripted rate loaders
//! - `assertions`: Custom assertion helpers for money values
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod doubles;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use doubles::*;
pub use assertions::*;
pub use generators::*;
