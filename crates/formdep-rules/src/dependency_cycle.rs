//! Rule to reject cyclic dependencies.
//!
//! # Rationale
//!
//! A cycle such as `A → B → A` makes cascades ping-pong between fields. The
//! runtime refuses to mount such a form by default, so the form is broken
//! in the browser until the cycle is removed.

use formdep_core::{FormContext, FormRule, Severity, Suggestion, Violation};

/// Rule code for dependency-cycle.
pub const CODE: &str = "FD002";

/// Rule name for dependency-cycle.
pub const NAME: &str = "dependency-cycle";

/// Forbids cycles in the dependency graph.
#[derive(Debug, Clone)]
pub struct DependencyCycle {
    severity: Severity,
}

impl Default for DependencyCycle {
    fn default() -> Self {
        Self::new()
    }
}

impl DependencyCycle {
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

impl FormRule for DependencyCycle {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Dependencies must not form a cycle"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FormContext) -> Vec<Violation> {
        let Some(cycle) = ctx.graph().find_cycle() else {
            return Vec::new();
        };

        // Point at the first dependency closing the cycle.
        let pointer = cycle
            .windows(2)
            .find_map(|edge| {
                ctx.form.dependency_sites().into_iter().find(|site| {
                    site.dependency.source() == edge[0].as_str()
                        && site.question.id() == edge[1].as_str()
                })
            })
            .map(|site| site.path())
            .unwrap_or_default();

        vec![Violation::new(
            CODE,
            NAME,
            self.severity,
            ctx.location(pointer),
            format!("dependency cycle: {}", cycle.join(" -> ")),
        )
        .with_suggestion(Suggestion::new(
            "remove one of the dependencies in the cycle",
        ))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::check;

    #[test]
    fn acyclic_chain_passes() {
        let violations = check(
            &DependencyCycle::new(),
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
dependencies = [{ source = "a", when = "x", action = "set-value", set-value = "y" }]
[[sections.questions]]
id = "c"
label = "C"
dependencies = [{ source = "b", when = "y", action = "require" }]
"#,
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn two_field_cycle_reported() {
        let violations = check(
            &DependencyCycle::new(),
            r#"
id = "f"
title = "F"
[[sections]]
title = "S"
[[sections.questions]]
id = "a"
label = "A"
dependencies = [{ source = "b", when = "", action = "clear-value" }]
[[sections.questions]]
id = "b"
label = "B"
dependencies = [{ source = "a", when = "", action = "clear-value" }]
"#,
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, "dependency cycle: a -> b -> a");
        assert_eq!(
            violations[0].location.pointer,
            "sections[0].questions[1].dependencies[0]"
        );
    }
}
