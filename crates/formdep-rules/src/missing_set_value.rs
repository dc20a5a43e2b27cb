//! Rule to catch `set-value` dependencies without a value, and values on
//! other actions where they are ignored.

use formdep_core::{DependencyAction, FormContext, FormRule, Severity, Suggestion, Violation};

/// Rule code for missing-set-value.
pub const CODE: &str = "FD003";

/// Rule name for missing-set-value.
pub const NAME: &str = "missing-set-value";

/// Requires `set-value` exactly on `set-value` dependencies.
#[derive(Debug, Clone)]
pub struct MissingSetValue {
    severity: Severity,
}

impl Default for MissingSetValue {
    fn default() -> Self {
        Self::new()
    }
}

impl MissingSetValue {
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
}

impl FormRule for MissingSetValue {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "set-value dependencies must carry a value; other actions must not"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FormContext) -> Vec<Violation> {
        let mut violations = Vec::new();
        for site in ctx.form.dependency_sites() {
            let dep = site.dependency;
            match (dep.action(), dep.set_value()) {
                (DependencyAction::SetValue, None) => violations.push(
                    Violation::new(
                        CODE,
                        NAME,
                        self.severity,
                        ctx.location(site.path()),
                        format!("set-value dependency on `{}` has no value to set", dep.target()),
                    )
                    .with_suggestion(Suggestion::new("add `set-value = \"...\"`")),
                ),
                (action, Some(value)) if action != DependencyAction::SetValue => violations.push(
                    Violation::new(
                        CODE,
                        NAME,
                        Severity::Warning.min(self.severity),
                        ctx.location(format!("{}.set-value", site.path())),
                        format!("set-value `{value}` is ignored by action `{action}`"),
                    ),
                ),
                _ => {}
            }
        }
        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::check;

    #[test]
    fn missing_and_ignored_values() {
        let violations = check(
            &MissingSetValue::new(),
            r#"
id = "f"
title = "F"
[[sections]]
title = "S"
[[sections.questions]]
id = "a"
label = "A"
[[sections.questions]]
id = "b"
label = "B"
dependencies = [
  { source = "a", when = "x", action = "set-value" },
  { source = "a", when = "y", action = "set-value", set-value = "ok" },
  { source = "a", when = "z", action = "hide", set-value = "unused" },
]
"#,
        );
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].severity, Severity::Error);
        assert_eq!(
            violations[0].location.pointer,
            "sections[0].questions[1].dependencies[0]"
        );
        assert_eq!(violations[1].severity, Severity::Warning);
        assert_eq!(
            violations[1].message,
            "set-value `unused` is ignored by action `hide`"
        );
    }
}
