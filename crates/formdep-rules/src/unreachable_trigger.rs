//! Rule to flag trigger values a choice question can never produce.
//!
//! # Rationale
//!
//! When the source is a single-choice, multi-choice, or dropdown question,
//! its value is one of its option values (multi-choice joins several with
//! `,`). A trigger outside that set never matches, so the dependency is dead.
//!
//! An empty trigger is always reachable: it matches "nothing selected".

use formdep_core::condition::equals_ignore_case;
use formdep_core::{
    FormContext, FormQuestion, FormRule, QuestionType, Severity, Suggestion, Violation,
};

/// Rule code for unreachable-trigger.
pub const CODE: &str = "FD005";

/// Rule name for unreachable-trigger.
pub const NAME: &str = "unreachable-trigger";

/// Requires triggers on choice sources to name existing option values.
#[derive(Debug, Clone)]
pub struct UnreachableTrigger {
    severity: Severity,
}

impl Default for UnreachableTrigger {
    fn default() -> Self {
        Self::new()
    }
}

impl UnreachableTrigger {
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

fn reachable(source: &FormQuestion, trigger: &str) -> bool {
    if trigger.is_empty() || source.options().is_empty() {
        return true;
    }
    let known = |part: &str| {
        source
            .options()
            .iter()
            .any(|o| equals_ignore_case(o.value(), part))
    };
    match source.question_type() {
        QuestionType::MultiChoice => trigger.split(',').all(known),
        _ => known(trigger),
    }
}

impl FormRule for UnreachableTrigger {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Triggers on choice questions must match an option value"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FormContext) -> Vec<Violation> {
        let mut violations = Vec::new();
        for site in ctx.form.dependency_sites() {
            let dep = site.dependency;
            let Some(source) = ctx.form.question(dep.source().as_str()) else {
                continue;
            };
            if !source.question_type().is_choice() || reachable(source, dep.trigger_value()) {
                continue;
            }
            let values: Vec<&str> = source.options().iter().map(|o| o.value()).collect();
            violations.push(
                Violation::new(
                    CODE,
                    NAME,
                    self.severity,
                    ctx.location(format!("{}.when", site.path())),
                    format!(
                        "trigger `{}` is not an option of `{}`; the dependency never fires",
                        dep.trigger_value(),
                        source.id()
                    ),
                )
                .with_suggestion(Suggestion::new(format!(
                    "use one of: {}",
                    values.join(", ")
                ))),
            );
        }
        violations
    }
}
