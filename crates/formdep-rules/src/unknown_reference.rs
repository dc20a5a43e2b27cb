//! Rule to catch dependencies referring to questions that do not exist.
//!
//! # Rationale
//!
//! The runtime skips a dependency whose source is missing from the page and
//! logs a warning; the validator silently treats it as an empty value. Both
//! hide a typo until a user notices the field never reacts.

use formdep_core::{FormContext, FormRule, Severity, Suggestion, Violation};

/// Rule code for unknown-reference.
pub const CODE: &str = "FD001";

/// Rule name for unknown-reference.
pub const NAME: &str = "unknown-reference";

/// Requires dependency sources and targets to be questions of the same form.
#[derive(Debug, Clone)]
pub struct UnknownReference {
    severity: Severity,
}

impl Default for UnknownReference {
    fn default() -> Self {
        Self::new()
    }
}

impl UnknownReference {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Error,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    fn violation(&self, ctx: &FormContext, pointer: String, role: &str, id: &str) -> Violation {
        let mut v = Violation::new(
            CODE,
            NAME,
            self.severity,
            ctx.location(pointer),
            format!("{role} `{id}` is not a question of form `{}`", ctx.form.id()),
        );
        if let Some(near) = ctx
            .form
            .questions()
            .find(|q| q.id().as_str().eq_ignore_ascii_case(id))
        {
            v = v.with_suggestion(Suggestion::new(format!("did you mean `{}`?", near.id())));
        }
        v
    }
}

impl FormRule for UnknownReference {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Dependency sources and targets must exist in the form"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FormContext) -> Vec<Violation> {
        let mut violations = Vec::new();
        for site in ctx.form.dependency_sites() {
            let dep = site.dependency;
            if !ctx.form.contains(dep.source().as_str()) {
                violations.push(self.violation(
                    ctx,
                    format!("{}.source", site.path()),
                    "source",
                    dep.source().as_str(),
                ));
            }
            if !ctx.form.contains(dep.target().as_str()) {
                violations.push(self.violation(
                    ctx,
                    format!("{}.target", site.path()),
                    "target",
                    dep.target().as_str(),
                ));
            }
        }
        violations
    }
}
