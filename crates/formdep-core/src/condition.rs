//! Condition evaluation shared by the runtime and the server validator.
//!
//! Both sides reduce the source value to a string first, so a form behaves
//! identically in the browser and on submission.

use crate::model::QuestionDependency;

/// Decides whether a dependency's condition holds for the current source value.
///
/// An absent source value is treated as the empty string. Never panics.
#[must_use]
pub fn evaluate(dependency: &QuestionDependency, current_source_value: Option<&str>) -> bool {
    dependency
        .condition()
        .is_satisfied_by(current_source_value.unwrap_or(""))
}

/// Case-insensitive ordinal comparison.
///
/// Characters are compared after simple uppercase mapping, so `é` matches `É`.
#[must_use]
pub fn equals_ignore_case(a: &str, b: &str) -> bool {
    if a.is_ascii() && b.is_ascii() {
        return a.eq_ignore_ascii_case(b);
    }
    a.chars()
        .flat_map(char::to_uppercase)
        .eq(b.chars().flat_map(char::to_uppercase))
}
