//! Server-side dependency validator.
//!
//! Replays the condition logic of every dependency against a submitted data
//! snapshot. The outcome must agree with what the runtime enforced in the
//! browser, so a client that skipped or tampered with the runtime is caught
//! here.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::condition;
use crate::model::{DependencyAction, FormDefinition, FormQuestion, QuestionDependency};
use crate::submission::SubmittedData;

/// Kind of dependency violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationErrorKind {
    /// A field made required by a dependency was left empty.
    RequiredMissing,
    /// A field forced to a value by a dependency holds something else.
    ValueMismatch,
}

impl ValidationErrorKind {
    /// Returns the stable code.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::RequiredMissing => "FDV001",
            Self::ValueMismatch => "FDV002",
        }
    }
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RequiredMissing => write!(f, "required-missing"),
            Self::ValueMismatch => write!(f, "value-mismatch"),
        }
    }
}

/// One failed dependency check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// Stable code.
    pub code: &'static str,
    /// Violation kind.
    pub kind: ValidationErrorKind,
    /// Offending field ids.
    pub fields: Vec<String>,
    /// Source question of the dependency that failed.
    pub source: String,
    /// Human-readable message.
    pub message: String,
}

impl ValidationResult {
    fn new(
        kind: ValidationErrorKind,
        target: &FormQuestion,
        dependency: &QuestionDependency,
        message: String,
    ) -> Self {
        Self {
            code: kind.code(),
            kind,
            fields: vec![target.id().to_string()],
            source: dependency.source().to_string(),
            message,
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.fields.join(", "), self.message)
    }
}

/// Validates submitted data against every question-level dependency.
///
/// Never fails: absent or malformed values are treated as empty. Option-level
/// dependencies drive presentation only and are not checked.
#[must_use]
pub fn validate(form: &FormDefinition, data: &SubmittedData) -> Vec<ValidationResult> {
    let mut results = Vec::new();
    for question in form.questions() {
        for dependency in question.dependencies() {
            if let Some(result) = check(question, dependency, data) {
                results.push(result);
            }
        }
    }
    debug!(
        "Validated form `{}`: {} dependency errors",
        form.id(),
        results.len()
    );
    results
}

fn check(
    target: &FormQuestion,
    dependency: &QuestionDependency,
    data: &SubmittedData,
) -> Option<ValidationResult> {
    let source_value = data.text(dependency.source().as_str());
    if !condition::evaluate(dependency, source_value.as_deref()) {
        return None;
    }

    let id = target.id().as_str();
    match dependency.action() {
        DependencyAction::Require if data.is_blank(id) => Some(ValidationResult::new(
            ValidationErrorKind::RequiredMissing,
            target,
            dependency,
            format!(
                "{} is required when {} is `{}`",
                target.label(),
                dependency.source(),
                dependency.trigger_value()
            ),
        )),
        DependencyAction::Show if target.is_required() && data.is_blank(id) => {
            Some(ValidationResult::new(
                ValidationErrorKind::RequiredMissing,
                target,
                dependency,
                format!(
                    "{} is shown and required when {} is `{}`",
                    target.label(),
                    dependency.source(),
                    dependency.trigger_value()
                ),
            ))
        }
        DependencyAction::SetValue => {
            let expected = dependency.set_value()?;
            let actual = data.text(id).unwrap_or_default();
            if condition::equals_ignore_case(&actual, expected) {
                return None;
            }
            Some(ValidationResult::new(
                ValidationErrorKind::ValueMismatch,
                target,
                dependency,
                format!(
                    "{} must be `{expected}` when {} is `{}`, got `{actual}`",
                    target.label(),
                    dependency.source(),
                    dependency.trigger_value()
                ),
            ))
        }
        _ => None,
    }
}

/// Aggregated validation outcome for one submission.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    /// All failed checks, in form order.
    pub results: Vec<ValidationResult>,
    /// Number of questions inspected.
    pub questions_checked: usize,
}

impl ValidationReport {
    /// Validates and wraps the results.
    #[must_use]
    pub fn run(form: &FormDefinition, data: &SubmittedData) -> Self {
        Self {
            results: validate(form, data),
            questions_checked: form.questions().count(),
        }
    }

    /// Returns true if nothing failed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.results.is_empty()
    }

    /// Returns the results naming a field.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a ValidationResult> {
        self.results
            .iter()
            .filter(move |r| r.fields.iter().any(|f| f == field))
    }

    /// Groups messages by field id, sorted by id.
    #[must_use]
    pub fn errors_by_field(&self) -> BTreeMap<&str, Vec<&str>> {
        let mut map: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for result in &self.results {
            for field in &result.fields {
                map.entry(field.as_str())
                    .or_default()
                    .push(result.message.as_str());
            }
        }
        map
    }
}
