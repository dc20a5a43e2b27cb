//! Core types for authoring findings and check results.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Severity level for findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message, does not fail a check.
    Info,
    /// Warning that should be addressed.
    Warning,
    /// Error that must be fixed.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

impl From<Severity> for miette::Severity {
    fn from(s: Severity) -> Self {
        match s {
            Severity::Info => Self::Advice,
            Severity::Warning => Self::Warning,
            Severity::Error => Self::Error,
        }
    }
}

/// Where a finding points: a form file and a path inside it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    /// File path relative to the checked root.
    pub file: PathBuf,
    /// Path inside the form (e.g., `sections[0].questions[1].dependencies[0]`).
    /// Empty for the form as a whole.
    pub pointer: String,
}

impl Location {
    /// Creates a location.
    #[must_use]
    pub fn new(file: impl Into<PathBuf>, pointer: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            pointer: pointer.into(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.pointer.is_empty() {
            write!(f, "{}", self.file.display())
        } else {
            write!(f, "{}#{}", self.file.display(), self.pointer)
        }
    }
}

/// A suggested fix for a violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Human-readable description of the fix.
    pub message: String,
}

impl Suggestion {
    /// Creates a new suggestion.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// An authoring finding in a form definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Rule code (e.g., "FD001").
    pub code: String,
    /// Rule name (e.g., "unknown-reference").
    pub rule: String,
    /// Severity of this violation.
    pub severity: Severity,
    /// Location of the violation.
    pub location: Location,
    /// Human-readable message.
    pub message: String,
    /// Optional suggestion for fixing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<Suggestion>,
}

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        rule: impl Into<String>,
        severity: Severity,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            rule: rule.into(),
            severity,
            location,
            message: message.into(),
            suggestion: None,
        }
    }

    /// Adds a suggestion to this violation.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: Suggestion) -> Self {
        self.suggestion = Some(suggestion);
        self
    }

    /// Formats the violation for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = format!("{} {} at {}\n", self.code, self.rule, self.location);
        let _ = writeln!(output, "  {}: {}", self.severity, self.message);
        if let Some(suggestion) = &self.suggestion {
            let _ = writeln!(output, "  = help: {}", suggestion.message);
        }
        output
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} [{}] {}",
            self.location, self.severity, self.code, self.message
        )
    }
}

/// A [`Violation`] rendered through miette.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ViolationDiagnostic {
    code: String,
    severity: Severity,
    message: String,
    help: Option<String>,
}

impl Diagnostic for ViolationDiagnostic {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(&self.code))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(self.severity.into())
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn fmt::Display + 'a>)
    }
}

impl From<&Violation> for ViolationDiagnostic {
    fn from(v: &Violation) -> Self {
        Self {
            code: format!("{}::{}", v.code, v.rule),
            severity: v.severity,
            message: format!("{}: {}", v.location, v.message),
            help: v.suggestion.as_ref().map(|s| s.message.clone()),
        }
    }
}

/// Result of checking a set of form files.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CheckReport {
    /// All violations found.
    pub violations: Vec<Violation>,
    /// Number of form files checked.
    pub files_checked: usize,
}

impl CheckReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.has_violations_at(Severity::Error)
    }

    /// Checks if any violations meet or exceed the given severity threshold.
    #[must_use]
    pub fn has_violations_at(&self, severity: Severity) -> bool {
        self.violations.iter().any(|v| v.severity >= severity)
    }

    /// Counts violations by severity as `(errors, warnings, infos)`.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        let count = |s: Severity| self.violations.iter().filter(|v| v.severity == s).count();
        (
            count(Severity::Error),
            count(Severity::Warning),
            count(Severity::Info),
        )
    }

    /// Returns the one-line summary printed after a report.
    #[must_use]
    pub fn summary(&self) -> String {
        let (errors, warnings, infos) = self.count_by_severity();
        format!(
            "Found {errors} error(s), {warnings} warning(s), {infos} info(s) in {} form(s)",
            self.files_checked
        )
    }

    /// Sorts violations by file, pointer, then code.
    pub fn sort(&mut self) {
        self.violations.sort_by(|a, b| {
            a.location
                .cmp(&b.location)
                .then_with(|| a.code.cmp(&b.code))
        });
    }

    /// Adds violations from another report.
    pub fn extend(&mut self, other: Self) {
        self.violations.extend(other.violations);
        self.files_checked += other.files_checked;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_violation(severity: Severity) -> Violation {
        Violation::new(
            "FD001",
            "unknown-reference",
            severity,
            Location::new("forms/address.form.toml", "sections[0].questions[1].dependencies[0]"),
            "source `contry` does not exist",
        )
    }

    #[test]
    fn violation_display() {
        let v = make_violation(Severity::Error);
        insta::assert_snapshot!(
            v.to_string(),
            @"forms/address.form.toml#sections[0].questions[1].dependencies[0]: error [FD001] source `contry` does not exist"
        );
    }

    #[test]
    fn violation_format_includes_suggestion() {
        let v = make_violation(Severity::Error)
            .with_suggestion(Suggestion::new("did you mean `country`?"));
        let formatted = v.format();
        assert!(formatted.starts_with("FD001 unknown-reference at forms/address.form.toml#"));
        assert!(formatted.contains("= help: did you mean `country`?"));
    }

    #[test]
    fn location_without_pointer() {
        let loc = Location::new("a.form.json", "");
        assert_eq!(loc.to_string(), "a.form.json");
    }

    #[test]
    fn has_violations_at_threshold() {
        let mut report = CheckReport::new();
        report.violations.push(make_violation(Severity::Warning));
        assert!(!report.has_errors());
        assert!(report.has_violations_at(Severity::Warning));
        assert!(report.has_violations_at(Severity::Info));
    }

    #[test]
    fn summary_counts() {
        let mut report = CheckReport::new();
        report.files_checked = 2;
        report.violations.push(make_violation(Severity::Warning));
        report.violations.push(make_violation(Severity::Error));
        assert_eq!(
            report.summary(),
            "Found 1 error(s), 1 warning(s), 0 info(s) in 2 form(s)"
        );
    }

    #[test]
    fn diagnostic_carries_code_and_help() {
        let v = make_violation(Severity::Warning).with_suggestion(Suggestion::new("fix it"));
        let d = ViolationDiagnostic::from(&v);
        assert_eq!(d.code().map(|c| c.to_string()).as_deref(), Some("FD001::unknown-reference"));
        assert_eq!(d.help().map(|h| h.to_string()).as_deref(), Some("fix it"));
        assert_eq!(d.severity(), Some(miette::Severity::Warning));
    }
}
