//! Fixture table - an ordered, rectangular set of test-case records

use crate::error::{Error, Result};
use crate::record::{TestCaseRecord, FIELD_NAMES};

/// An ordered sequence of [`TestCaseRecord`]s.
///
/// Row order is meaningful: it is the declaration order and becomes the
/// row order of the exported workbook.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FixtureTable {
    records: Vec<TestCaseRecord>,
}

impl FixtureTable {
    /// Build a table directly from rows
    pub fn from_records(records: Vec<TestCaseRecord>) -> Self {
        Self { records }
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the table has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in declaration order
    pub fn records(&self) -> &[TestCaseRecord] {
        &self.records
    }

    /// Iterate over records in declaration order
    pub fn iter(&self) -> std::slice::Iter<'_, TestCaseRecord> {
        self.records.iter()
    }

    /// `testCase` labels that appear more than once, in first-occurrence order.
    ///
    /// Uniqueness is expected but not enforced; callers may warn.
    pub fn duplicate_ids(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::with_capacity(self.records.len());
        let mut dups: Vec<&str> = Vec::new();
        for rec in &self.records {
            let id = rec.test_case.as_str();
            if seen.contains(&id) {
                if !dups.contains(&id) {
                    dups.push(id);
                }
            } else {
                seen.push(id);
            }
        }
        dups
    }
}

impl<'a> IntoIterator for &'a FixtureTable {
    type Item = &'a TestCaseRecord;
    type IntoIter = std::slice::Iter<'a, TestCaseRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Column-wise builder for [`FixtureTable`].
///
/// Columns are declared by header name with their full value sequence, and
/// [`build`](TableBuilder::build) validates the shape before producing any
/// records: every column must be one of the nine known field names, declared
/// exactly once, and all sequences must share one length. Violations abort
/// construction; no partially built table is observable.
#[derive(Debug, Default)]
pub struct TableBuilder {
    columns: Vec<(String, Vec<String>)>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a column by header name with its full value sequence
    pub fn column<N, I, V>(mut self, name: N, values: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.columns
            .push((name.into(), values.into_iter().map(Into::into).collect()));
        self
    }

    /// Validate the declared columns and assemble the table.
    ///
    /// Fails fast on the first structural problem; the shape check runs
    /// before any row is materialized.
    pub fn build(self) -> Result<FixtureTable> {
        for (name, _) in &self.columns {
            if !FIELD_NAMES.contains(&name.as_str()) {
                return Err(Error::UnknownColumn(name.clone()));
            }
            if self.columns.iter().filter(|(n, _)| n == name).count() > 1 {
                return Err(Error::DuplicateColumn(name.clone()));
            }
        }

        let mut ordered: Vec<&Vec<String>> = Vec::with_capacity(FIELD_NAMES.len());
        for field in FIELD_NAMES {
            let values = self
                .columns
                .iter()
                .find(|(name, _)| name == field)
                .map(|(_, values)| values)
                .ok_or_else(|| Error::MissingColumn(field.to_string()))?;
            ordered.push(values);
        }

        let expected = ordered[0].len();
        for (field, values) in FIELD_NAMES.iter().zip(&ordered) {
            if values.len() != expected {
                return Err(Error::SchemaMismatch {
                    column: field.to_string(),
                    expected,
                    actual: values.len(),
                });
            }
        }

        let records = (0..expected)
            .map(|row| {
                let fields: [String; 9] =
                    std::array::from_fn(|col| ordered[col][row].clone());
                TestCaseRecord::from_fields(fields)
            })
            .collect();

        Ok(FixtureTable::from_records(records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn two_row_builder() -> TableBuilder {
        TableBuilder::new()
            .column("testCase", ["TC1-1", "TC1-2"])
            .column("testType", ["login", "navigation"])
            .column("username", ["Admin", ""])
            .column("password", ["admin123", ""])
            .column("module", ["", "PIM"])
            .column("expectedResult", ["Login successful", "PIM page"])
            .column("executeFlag", ["Y", "N"])
            .column("environment", ["QA", "QA"])
            .column("priority", ["high", "low"])
    }

    #[test]
    fn build_preserves_declaration_order() {
        let table = two_row_builder().build().unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0].test_case, "TC1-1");
        assert_eq!(table.records()[0].username, "Admin");
        assert_eq!(table.records()[0].module, "");
        assert_eq!(table.records()[1].test_case, "TC1-2");
        assert_eq!(table.records()[1].module, "PIM");
        assert_eq!(table.records()[1].execute_flag, "N");
    }

    #[test]
    fn short_column_is_rejected() {
        let err = TableBuilder::new()
            .column("testCase", ["TC1-1", "TC1-2"])
            .column("testType", ["login", "navigation"])
            .column("username", ["Admin"])
            .column("password", ["admin123", ""])
            .column("module", ["", "PIM"])
            .column("expectedResult", ["Login successful", "PIM page"])
            .column("executeFlag", ["Y", "N"])
            .column("environment", ["QA", "QA"])
            .column("priority", ["high", "low"])
            .build()
            .unwrap_err();

        match err {
            Error::SchemaMismatch {
                column,
                expected,
                actual,
            } => {
                assert_eq!(column, "username");
                assert_eq!(expected, 2);
                assert_eq!(actual, 1);
            }
            other => panic!("expected SchemaMismatch, got {other:?}"),
        }
    }

    #[test]
    fn unknown_column_is_rejected() {
        let err = two_row_builder()
            .column("browser", ["chrome", "firefox"])
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::UnknownColumn(name) if name == "browser"));
    }

    #[test]
    fn duplicate_column_is_rejected() {
        let err = two_row_builder()
            .column("priority", ["high", "low"])
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateColumn(name) if name == "priority"));
    }

    #[test]
    fn missing_column_is_rejected() {
        let err = TableBuilder::new()
            .column("testCase", ["TC1-1"])
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::MissingColumn(name) if name == "testType"));
    }

    #[test]
    fn duplicate_ids_are_reported_not_rejected() {
        let table = FixtureTable::from_records(vec![
            sample("TC1-1"),
            sample("TC1-2"),
            sample("TC1-1"),
            sample("TC1-1"),
        ]);
        assert_eq!(table.duplicate_ids(), vec!["TC1-1"]);
    }

    fn sample(id: &str) -> TestCaseRecord {
        TestCaseRecord::from_fields([
            id.to_string(),
            "login".into(),
            "Admin".into(),
            "admin123".into(),
            "".into(),
            "Login successful".into(),
            "Y".into(),
            "QA".into(),
            "high".into(),
        ])
    }
}
