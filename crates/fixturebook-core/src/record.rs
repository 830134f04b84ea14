//! Test-case record type - one row of the fixture table

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The fixed column order of the fixture table.
///
/// The workbook header row, JSON fixture files, and [`TestCaseRecord::fields`]
/// all use this order.
pub const FIELD_NAMES: [&str; 9] = [
    "testCase",
    "testType",
    "username",
    "password",
    "module",
    "expectedResult",
    "executeFlag",
    "environment",
    "priority",
];

/// One planned test scenario.
///
/// All fields are plain text. `username`/`password` are populated only for
/// login-type cases, `module` only for the rest. `execute_flag` and
/// `priority` are open strings, not closed enumerations.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TestCaseRecord {
    /// Unique label, e.g. "TC501-1"
    pub test_case: String,
    /// Scenario kind, e.g. "login", "navigation", "menu-verify"
    pub test_type: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub username: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub password: String,
    /// Target application module, e.g. "PIM"
    #[cfg_attr(feature = "serde", serde(default))]
    pub module: String,
    /// Human-readable expected outcome
    pub expected_result: String,
    /// "Y"/"N"-style run toggle
    pub execute_flag: String,
    /// Target environment label, e.g. "QA"
    pub environment: String,
    pub priority: String,
}

impl TestCaseRecord {
    /// Field values in [`FIELD_NAMES`] order
    pub fn fields(&self) -> [&str; 9] {
        [
            &self.test_case,
            &self.test_type,
            &self.username,
            &self.password,
            &self.module,
            &self.expected_result,
            &self.execute_flag,
            &self.environment,
            &self.priority,
        ]
    }

    /// Build a record from field values in [`FIELD_NAMES`] order
    pub fn from_fields(fields: [String; 9]) -> Self {
        let [test_case, test_type, username, password, module, expected_result, execute_flag, environment, priority] =
            fields;
        Self {
            test_case,
            test_type,
            username,
            password,
            module,
            expected_result,
            execute_flag,
            environment,
            priority,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_match_header_order() {
        let rec = TestCaseRecord::from_fields([
            "TC501-1".into(),
            "login".into(),
            "Admin".into(),
            "admin123".into(),
            "".into(),
            "Login successful".into(),
            "Y".into(),
            "QA".into(),
            "high".into(),
        ]);
        assert_eq!(
            rec.fields(),
            [
                "TC501-1",
                "login",
                "Admin",
                "admin123",
                "",
                "Login successful",
                "Y",
                "QA",
                "high"
            ]
        );
    }

    #[test]
    fn from_fields_roundtrips() {
        let fields = [
            "TC502-1".to_string(),
            "menu-verify".to_string(),
            String::new(),
            String::new(),
            "Admin".to_string(),
            "Admin menu visible".to_string(),
            "Y".to_string(),
            "QA".to_string(),
            "medium".to_string(),
        ];
        let rec = TestCaseRecord::from_fields(fields.clone());
        let back: [String; 9] = rec.fields().map(str::to_string);
        assert_eq!(back, fields);
    }
}
