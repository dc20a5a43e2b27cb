//! Rule to flag opposite actions on the same field.
//!
//! # Rationale
//!
//! All dependencies on a field are applied independently and the last one
//! applied wins. `show` and `hide` (or `enable` and `disable`) on one field
//! therefore make its state depend on which source changed last, which is
//! rarely what the author meant. Pairs with the same source and trigger
//! always contradict each other and are reported as errors.

use formdep_core::condition::equals_ignore_case;
use formdep_core::{FormContext, FormRule, Severity, Suggestion, Violation};

/// Rule code for conflicting-actions.
pub const CODE: &str = "FD007";

/// Rule name for conflicting-actions.
pub const NAME: &str = "conflicting-actions";

/// Flags opposite actions targeting the same element.
#[derive(Debug, Clone)]
pub struct ConflictingActions {
    severity: Severity,
}

impl Default for ConflictingActions {
    fn default() -> Self {
        Self::new()
    }
}

impl ConflictingActions {
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

impl FormRule for ConflictingActions {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Opposite actions on one field depend on evaluation order"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FormContext) -> Vec<Violation> {
        let sites = ctx.form.dependency_sites();
        let mut violations = Vec::new();

        for (i, later) in sites.iter().enumerate() {
            let Some(opposite) = later.dependency.action().opposite() else {
                continue;
            };
            let element = later.element_id();
            let Some(earlier) = sites[..i].iter().find(|s| {
                s.dependency.action() == opposite && s.element_id() == element
            }) else {
                continue;
            };

            let same_trigger = earlier.dependency.source() == later.dependency.source()
                && equals_ignore_case(
                    earlier.dependency.trigger_value(),
                    later.dependency.trigger_value(),
                );
            let severity = if same_trigger {
                Severity::Error
            } else {
                self.severity
            };
            violations.push(
                Violation::new(
                    CODE,
                    NAME,
                    severity,
                    ctx.location(later.path()),
                    format!(
                        "`{}` conflicts with `{}` at {} on `{element}`",
                        later.dependency,
                        earlier.dependency.action(),
                        earlier.path()
                    ),
                )
                .with_suggestion(Suggestion::new(format!(
                    "use a single `{}` dependency; it already reverts when its condition stops holding",
                    earlier.dependency.action()
                ))),
            );
        }
        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::check;

    #[test]
    fn different_sources_warn() {
        let violations = check(
            &ConflictingActions::new(),
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
[[sections.questions]]
id = "c"
label = "C"
dependencies = [
  { source = "a", when = "1", action = "show" },
  { source = "b", when = "1", action = "hide" },
  { source = "a", when = "1", action = "require" },
]
"#,
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].severity, Severity::Warning);
        assert_eq!(
            violations[0].location.pointer,
            "sections[0].questions[2].dependencies[1]"
        );
    }

    #[test]
    fn same_trigger_is_an_error() {
        let violations = check(
            &ConflictingActions::new(),
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
  { source = "a", when = "x", action = "enable" },
  { source = "a", when = "X", action = "disable" },
]
"#,
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].severity, Severity::Error);
    }

    #[test]
    fn different_fields_do_not_conflict() {
        let violations = check(
            &ConflictingActions::new(),
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
dependencies = [{ source = "a", when = "1", action = "show" }]
[[sections.questions]]
id = "c"
label = "C"
dependencies = [{ source = "a", when = "1", action = "hide" }]
"#,
        );
        assert!(violations.is_empty());
    }
}
