//! Pure domain model for forms and their conditional dependencies.
//!
//! This module contains no serde, no I/O dependencies.
//! Structural invariants (identifier shape, unique question ids) are enforced
//! at construction time. Cross references between questions are *not*
//! enforced here; they are authoring errors reported by the checker.

mod dependency;
mod form;

pub use dependency::{Condition, DependencyAction, QuestionDependency};
pub use form::{
    DependencySite, FormDefinition, FormQuestion, FormSection, HttpMethod, QuestionOption,
    QuestionType,
};

use std::borrow::Borrow;
use std::fmt;

// ────────────────────────────────────────────
// Newtypes with validation
// ────────────────────────────────────────────

/// A validated question identifier (non-empty, no whitespace).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QuestionId(String);

impl QuestionId {
    /// Creates a new question identifier.
    ///
    /// # Errors
    ///
    /// Returns error if the id is empty or contains whitespace.
    pub fn new(id: &str) -> Result<Self, ModelError> {
        if id.is_empty() {
            return Err(ModelError::EmptyQuestionId);
        }
        if id.chars().any(char::is_whitespace) {
            return Err(ModelError::InvalidQuestionId { id: id.to_string() });
        }
        Ok(Self(id.to_string()))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Borrow<str> for QuestionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for QuestionId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for QuestionId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

// ────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────

/// Errors in domain model construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// Question id is empty.
    #[error("question id must not be empty")]
    EmptyQuestionId,

    /// Question id contains whitespace.
    #[error("invalid question id `{id}`: must not contain whitespace")]
    InvalidQuestionId {
        /// The invalid id.
        id: String,
    },

    /// Option id is empty.
    #[error("option id must not be empty")]
    EmptyOptionId,

    /// Two questions in one form share an id.
    #[error("duplicate question id `{id}`")]
    DuplicateQuestionId {
        /// The repeated id.
        id: QuestionId,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_id_valid() {
        assert!(QuestionId::new("country").is_ok());
        assert!(QuestionId::new("mailing_address.line-1").is_ok());
    }

    #[test]
    fn question_id_empty_rejected() {
        assert_eq!(QuestionId::new(""), Err(ModelError::EmptyQuestionId));
    }

    #[test]
    fn question_id_whitespace_rejected() {
        assert!(matches!(
            QuestionId::new("first name"),
            Err(ModelError::InvalidQuestionId { .. })
        ));
    }

    #[test]
    fn question_id_compares_with_str() {
        let id = QuestionId::new("province").unwrap();
        assert_eq!(id, "province");
        assert_eq!(id.to_string(), "province");
    }
}
