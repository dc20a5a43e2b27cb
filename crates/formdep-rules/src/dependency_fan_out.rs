//! Rule to limit how many dependencies hang off a single source question.
//!
//! # Configuration
//!
//! - `max_dependents`: Maximum dependencies per source (default: 20)

use std::collections::BTreeMap;

use formdep_core::{FormContext, FormRule, Severity, Suggestion, Violation};

/// Rule code for dependency-fan-out.
pub const CODE: &str = "FD006";

/// Rule name for dependency-fan-out.
pub const NAME: &str = "dependency-fan-out";

const DEFAULT_MAX_DEPENDENTS: usize = 20;

/// Limits the number of dependencies rooted at one source.
#[derive(Debug, Clone)]
pub struct DependencyFanOut {
    max_dependents: usize,
    severity: Severity,
}

impl Default for DependencyFanOut {
    fn default() -> Self {
        Self::new()
    }
}

impl DependencyFanOut {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_dependents: DEFAULT_MAX_DEPENDENTS,
            severity: Severity::Info,
        }
    }

    /// Sets the maximum number of dependencies per source.
    #[must_use]
    pub fn max_dependents(mut self, max: usize) -> Self {
        self.max_dependents = max;
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Configured limit wins over the builder value.
    fn limit(&self, ctx: &FormContext) -> usize {
        match ctx
            .rule_config(NAME)
            .map(|c| c.get_int("max_dependents", -1))
            .and_then(|n| usize::try_from(n).ok())
        {
            Some(configured) => {
                tracing::debug!(rule = NAME, max_dependents = configured, "using configured limit");
                configured
            }
            None => self.max_dependents,
        }
    }
}

impl FormRule for DependencyFanOut {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Limits the number of dependencies driven by one question"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FormContext) -> Vec<Violation> {
        let limit = self.limit(ctx);
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for site in ctx.form.dependency_sites() {
            *counts.entry(site.dependency.source().as_str()).or_default() += 1;
        }

        counts
            .into_iter()
            .filter(|(_, n)| *n > limit)
            .map(|(source, n)| {
                let pointer = ctx
                    .form
                    .dependency_sites()
                    .into_iter()
                    .find(|s| s.dependency.source() == source)
                    .map(|s| s.path())
                    .unwrap_or_default();
                Violation::new(
                    CODE,
                    NAME,
                    self.severity,
                    ctx.location(pointer),
                    format!("`{source}` drives {n} dependencies (max {limit})"),
                )
                .with_suggestion(Suggestion::new(
                    "split the form into sections or use fewer, broader dependencies",
                ))
            })
            .collect()
    }
}
