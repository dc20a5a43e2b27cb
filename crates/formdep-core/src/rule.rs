//! Rule trait for defining authoring checks on form definitions.

use crate::context::FormContext;
use crate::types::{Severity, Violation};

/// An authoring rule run against one loaded form.
///
/// Rules see the validated domain model, so they only deal with problems
/// the loader cannot reject on its own: dangling references, cycles,
/// conflicting actions, and the like.
///
/// # Example
///
/// ```ignore
/// use formdep_core::{FormContext, FormRule, Severity, Violation};
///
/// pub struct NoEmptySections;
///
/// impl FormRule for NoEmptySections {
///     fn name(&self) -> &'static str { "no-empty-sections" }
///     fn code(&self) -> &'static str { "FD100" }
///
///     fn check(&self, ctx: &FormContext) -> Vec<Violation> {
///         ctx.form
///             .sections()
///             .iter()
///             .enumerate()
///             .filter(|(_, s)| s.questions().is_empty())
///             .map(|(i, _)| Violation::new(
///                 self.code(),
///                 self.name(),
///                 self.default_severity(),
///                 ctx.location(format!("sections[{i}]")),
///                 "section has no questions",
///             ))
///             .collect()
///     }
/// }
/// ```
pub trait FormRule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "unknown-reference").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "FD001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Checks one form and returns any violations found.
    fn check(&self, ctx: &FormContext) -> Vec<Violation>;
}

/// Type alias for boxed `FormRule` trait objects.
pub type RuleBox = Box<dyn FormRule>;
