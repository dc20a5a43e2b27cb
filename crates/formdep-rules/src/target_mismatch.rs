//! Rule to flag dependencies whose declared target is not the field carrying
//! them.
//!
//! # Rationale
//!
//! A dependency acts on the element it is rendered on. The declared
//! `target` is informational; when it names a different question the
//! author most likely attached the dependency to the wrong field.

use formdep_core::{FormContext, FormRule, Severity, Suggestion, Violation};

/// Rule code for target-mismatch.
pub const CODE: &str = "FD004";

/// Rule name for target-mismatch.
pub const NAME: &str = "target-mismatch";

/// Requires the declared target to match the carrying question.
#[derive(Debug, Clone)]
pub struct TargetMismatch {
    severity: Severity,
}

impl Default for TargetMismatch {
    fn default() -> Self {
        Self::new()
    }
}

impl TargetMismatch {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Warning,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl FormRule for TargetMismatch {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "A dependency's target should be the question that carries it"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FormContext) -> Vec<Violation> {
        ctx.form
            .dependency_sites()
            .into_iter()
            .filter(|site| site.dependency.target() != site.question.id())
            .map(|site| {
                Violation::new(
                    CODE,
                    NAME,
                    self.severity,
                    ctx.location(format!("{}.target", site.path())),
                    format!(
                        "dependency targets `{}` but is attached to `{}`, where it takes effect",
                        site.dependency.target(),
                        site.element_id()
                    ),
                )
                .with_suggestion(Suggestion::new(format!(
                    "move the dependency to question `{}`",
                    site.dependency.target()
                )))
            })
            .collect()
    }
}
