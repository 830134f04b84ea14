//! # fixturebook-xlsx
//!
//! XLSX serialization for fixturebook tables.
//!
//! [`XlsxWriter`] exports a [`FixtureTable`](fixturebook_core::FixtureTable)
//! as a single-worksheet workbook: a header row with the nine fixed field
//! names followed by one row per record, every cell an inline string. Output
//! is deterministic, so the same table always produces byte-identical files.
//!
//! [`XlsxReader`] is the inverse, used to verify written workbooks and to
//! inspect existing ones.

pub mod error;
pub mod reader;
pub mod writer;

pub use error::{XlsxError, XlsxResult};
pub use reader::XlsxReader;
pub use writer::XlsxWriter;

/// Name of the single worksheet in exported workbooks
pub const SHEET_NAME: &str = "Sheet1";
