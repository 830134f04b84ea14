//! Embedded reference dataset
//!
//! The combined test-data sheet for the akhan end-to-end suite against the
//! HR web application: three login cases, eleven navigation cases, three
//! menu-verification cases.

use crate::table::{FixtureTable, TableBuilder};

/// The 17-row reference dataset, in intended execution order.
pub fn reference() -> FixtureTable {
    TableBuilder::new()
        .column(
            "testCase",
            [
                "TC501-1", "TC501-2", "TC501-3", "TC503-1", "TC503-2", "TC503-3", "TC503-4",
                "TC503-5", "TC503-6", "TC503-7", "TC503-8", "TC503-9", "TC503-10", "TC503-11",
                "TC502-1", "TC502-2", "TC502-3",
            ],
        )
        .column(
            "testType",
            [
                "login",
                "login",
                "login",
                "navigation",
                "navigation",
                "navigation",
                "navigation",
                "navigation",
                "navigation",
                "navigation",
                "navigation",
                "navigation",
                "navigation",
                "navigation",
                "menu-verify",
                "menu-verify",
                "menu-verify",
            ],
        )
        .column(
            "username",
            [
                "Admin", "testuser", "manager", "", "", "", "", "", "", "", "", "", "", "", "",
                "", "",
            ],
        )
        .column(
            "password",
            [
                "admin123", "test123", "manager123", "", "", "", "", "", "", "", "", "", "", "",
                "", "", "",
            ],
        )
        .column(
            "module",
            [
                "",
                "",
                "",
                "Admin",
                "PIM",
                "Leave",
                "Time",
                "Recruitment",
                "My Info",
                "Performance",
                "Dashboard",
                "Directory",
                "Maintenance",
                "Buzz",
                "Admin",
                "PIM",
                "Leave",
            ],
        )
        .column(
            "expectedResult",
            [
                "Login successful",
                "Login successful",
                "Login successful",
                "Admin page",
                "PIM page",
                "Leave page",
                "Time page",
                "Recruitment page",
                "My Info page",
                "Performance page",
                "Dashboard page",
                "Directory page",
                "Maintenance page",
                "Buzz page",
                "Admin menu visible",
                "PIM menu visible",
                "Leave menu visible",
            ],
        )
        .column("executeFlag", ["Y"; 17])
        .column("environment", ["QA"; 17])
        .column(
            "priority",
            [
                "high", "high", "medium", "high", "high", "medium", "medium", "medium", "low",
                "low", "high", "low", "low", "low", "medium", "medium", "medium",
            ],
        )
        .build()
        .expect("reference dataset is rectangular")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn has_seventeen_rows() {
        assert_eq!(reference().len(), 17);
    }

    #[test]
    fn first_row_is_admin_login() {
        let table = reference();
        assert_eq!(
            table.records()[0].fields(),
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
    fn menu_verify_block_follows_navigation() {
        let table = reference();
        // Record 14 (workbook row 16) starts the menu-verify block
        assert_eq!(
            table.records()[14].fields(),
            [
                "TC502-1",
                "menu-verify",
                "",
                "",
                "Admin",
                "Admin menu visible",
                "Y",
                "QA",
                "medium"
            ]
        );
    }

    #[test]
    fn ids_are_unique() {
        assert!(reference().duplicate_ids().is_empty());
    }
}
