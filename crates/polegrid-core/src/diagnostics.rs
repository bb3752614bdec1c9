//! Non-fatal issues collected while a request is processed.
//!
//! A plan can succeed while still having something worth telling the caller:
//! a second point that also looked like a power source, or CSV rows skipped
//! for missing coordinates. Those end up in `debug.warnings` of the plan
//! instead of failing the request. Anything that does fail the request is a
//! [`crate::PlanError`], never a diagnostic.
//!
//! ```
//! use polegrid_core::diagnostics::Diagnostics;
//!
//! let mut diag = Diagnostics::new();
//! diag.add_warning_with_entity("source", "second source candidate ignored", "Substation B");
//! diag.add_warning_at_line("csv", "missing Longitude", 7);
//!
//! assert_eq!(diag.warning_count(), 2);
//! assert_eq!(diag.messages()[1], "csv, line 7: missing Longitude");
//! ```

use serde::Serialize;
use std::fmt;

/// Where in the caller's input a warning points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "at")]
pub enum IssueLocation {
    /// A named input point
    Point(String),
    /// A 1-based line of an input file
    Line(usize),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticIssue {
    /// Pipeline stage that raised it, e.g. "source", "csv"
    pub category: String,
    pub message: String,
    pub location: IssueLocation,
}

impl fmt::Display for DiagnosticIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            IssueLocation::Point(name) => {
                write!(f, "{}: {} [{}]", self.category, self.message, name)
            }
            IssueLocation::Line(line) => {
                write!(f, "{}, line {}: {}", self.category, line, self.message)
            }
        }
    }
}

/// Warnings for one request, in the order they were raised.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    issues: Vec<DiagnosticIssue>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_warning_with_entity(&mut self, category: &str, message: &str, entity: &str) {
        self.push(category, message, IssueLocation::Point(entity.to_string()));
    }

    pub fn add_warning_at_line(&mut self, category: &str, message: &str, line: usize) {
        self.push(category, message, IssueLocation::Line(line));
    }

    fn push(&mut self, category: &str, message: &str, location: IssueLocation) {
        self.issues.push(DiagnosticIssue {
            category: category.to_string(),
            message: message.to_string(),
            location,
        });
    }

    pub fn issues(&self) -> &[DiagnosticIssue] {
        &self.issues
    }

    pub fn warning_count(&self) -> usize {
        self.issues.len()
    }

    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    /// One rendered line per issue; this is what lands in `debug.warnings`.
    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(ToString::to_string).collect()
    }
}
