//! Branch report generation collaborator interface.
//!
//! # Responsibility
//! - Define the contract an external report generator fulfills: branch name
//!   plus employee snapshot in, formatted text out.
//! - Provide an offline plain-text implementation.
//!
//! # Invariants
//! - The store has no dependency on this module; callers fetch the snapshot
//!   themselves and hand it over.

use crate::model::employee::EmployeeRecord;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fmt::Write as _;

/// Report generation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    /// The generator cannot produce output (missing credentials, transport
    /// failure in a remote implementation, and so on).
    Unavailable(String),
}

impl Display for ReportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(reason) => write!(f, "report generator unavailable: {reason}"),
        }
    }
}

impl Error for ReportError {}

/// Produces an executive summary for one branch.
pub trait ReportGenerator {
    fn branch_report(
        &self,
        branch: &str,
        employees: &[EmployeeRecord],
    ) -> Result<String, ReportError>;
}

/// Offline generator producing a Markdown summary: headcount, department
/// distribution and the most recent registration date.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextReport;

impl ReportGenerator for PlainTextReport {
    fn branch_report(
        &self,
        branch: &str,
        employees: &[EmployeeRecord],
    ) -> Result<String, ReportError> {
        let mut out = String::new();
        let _ = writeln!(out, "# Branch report: {branch}");
        let _ = writeln!(out);
        let _ = writeln!(out, "Registered employees: {}", employees.len());

        if employees.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "No registrations for this branch.");
            return Ok(out);
        }

        let mut by_department: BTreeMap<&str, usize> = BTreeMap::new();
        for employee in employees {
            *by_department.entry(employee.department.as_str()).or_insert(0) += 1;
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "## Department distribution");
        for (department, count) in &by_department {
            let _ = writeln!(out, "- {department}: {count}");
        }

        if let Some(latest) = employees.iter().max_by_key(|employee| employee.registered_at) {
            let _ = writeln!(out);
            let _ = writeln!(
                out,
                "Most recent registration: {} ({})",
                latest.full_name,
                latest.registered_at.format("%Y-%m-%d")
            );
        }

        Ok(out)
    }
}
