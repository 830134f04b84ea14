//! # fixturebook-core
//!
//! Core data structures for the fixturebook test-fixture generator.
//!
//! This crate provides the fundamental types used throughout fixturebook:
//! - [`TestCaseRecord`] - One planned test scenario (identifier, credentials,
//!   target module, expected outcome, scheduling flags)
//! - [`FixtureTable`] - An ordered, rectangular set of records
//! - [`TableBuilder`] - Column-wise construction with fail-fast shape checks
//!
//! ## Example
//!
//! ```rust
//! use fixturebook_core::TableBuilder;
//!
//! let table = TableBuilder::new()
//!     .column("testCase", ["TC1-1"])
//!     .column("testType", ["login"])
//!     .column("username", ["Admin"])
//!     .column("password", ["admin123"])
//!     .column("module", [""])
//!     .column("expectedResult", ["Login successful"])
//!     .column("executeFlag", ["Y"])
//!     .column("environment", ["QA"])
//!     .column("priority", ["high"])
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(table.len(), 1);
//! assert_eq!(table.records()[0].test_case, "TC1-1");
//! ```

pub mod dataset;
pub mod error;
pub mod record;
pub mod table;

// Re-exports for convenience
pub use error::{Error, Result};
pub use record::{TestCaseRecord, FIELD_NAMES};
pub use table::{FixtureTable, TableBuilder};

/// Number of fields in a test-case record
pub const FIELD_COUNT: usize = 9;
