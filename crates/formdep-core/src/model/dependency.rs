//! Conditional dependency between two questions.

use std::fmt;

use super::QuestionId;

/// What a dependency does to its target when the condition changes.
///
/// The numeric ordinals are part of the wire contract between the rendered
/// payload and the server. They are fixed by [`DependencyAction::ordinal`],
/// never by declaration order:
///
/// | Action | Ordinal |
/// |--------|---------|
/// | `Require` | 0 |
/// | `Show` | 1 |
/// | `Hide` | 2 |
/// | `Enable` | 3 |
/// | `Disable` | 4 |
/// | `ClearValue` | 5 |
/// | `SetValue` | 6 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DependencyAction {
    /// Mark the target as required while the condition holds.
    Require,
    /// Show the target while the condition holds.
    Show,
    /// Hide the target while the condition holds.
    Hide,
    /// Enable the target while the condition holds.
    Enable,
    /// Disable the target while the condition holds.
    Disable,
    /// Reset the target's value when the condition is met.
    ClearValue,
    /// Write the dependency's set-value into the target when the condition is met.
    SetValue,
}

impl DependencyAction {
    /// All actions, in ordinal order.
    pub const ALL: [Self; 7] = [
        Self::Require,
        Self::Show,
        Self::Hide,
        Self::Enable,
        Self::Disable,
        Self::ClearValue,
        Self::SetValue,
    ];

    /// Returns the wire ordinal of this action.
    #[must_use]
    pub fn ordinal(self) -> u8 {
        match self {
            Self::Require => 0,
            Self::Show => 1,
            Self::Hide => 2,
            Self::Enable => 3,
            Self::Disable => 4,
            Self::ClearValue => 5,
            Self::SetValue => 6,
        }
    }

    /// Resolves a wire ordinal. Returns `None` for unsupported values.
    #[must_use]
    pub fn from_ordinal(ordinal: i64) -> Option<Self> {
        match ordinal {
            0 => Some(Self::Require),
            1 => Some(Self::Show),
            2 => Some(Self::Hide),
            3 => Some(Self::Enable),
            4 => Some(Self::Disable),
            5 => Some(Self::ClearValue),
            6 => Some(Self::SetValue),
            _ => None,
        }
    }

    /// Returns the kebab-case name used in form definition files.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Require => "require",
            Self::Show => "show",
            Self::Hide => "hide",
            Self::Enable => "enable",
            Self::Disable => "disable",
            Self::ClearValue => "clear-value",
            Self::SetValue => "set-value",
        }
    }

    /// Resolves a kebab-case name (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(name))
    }

    /// Returns the action with the opposite effect, if any.
    ///
    /// Used to detect ordering-dependent conflicts on a single target.
    #[must_use]
    pub fn opposite(self) -> Option<Self> {
        match self {
            Self::Show => Some(Self::Hide),
            Self::Hide => Some(Self::Show),
            Self::Enable => Some(Self::Disable),
            Self::Disable => Some(Self::Enable),
            Self::Require | Self::ClearValue | Self::SetValue => None,
        }
    }
}

impl fmt::Display for DependencyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The condition under which a dependency's action applies.
///
/// Exact case-insensitive equality is the only operator. Richer operators
/// would be added as new variants, never by overloading the trigger string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Condition {
    /// Source value equals the trigger, ignoring case.
    Equals(String),
}

impl Condition {
    /// Returns the trigger value compared against the source.
    #[must_use]
    pub fn trigger_value(&self) -> &str {
        match self {
            Self::Equals(trigger) => trigger,
        }
    }

    /// Tests the condition against a source value's string form.
    #[must_use]
    pub fn is_satisfied_by(&self, value: &str) -> bool {
        match self {
            Self::Equals(trigger) => crate::condition::equals_ignore_case(value, trigger),
        }
    }
}

/// A rule linking one source question's value to an action on a target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuestionDependency {
    source: QuestionId,
    target: QuestionId,
    condition: Condition,
    action: DependencyAction,
    set_value: Option<String>,
}

impl QuestionDependency {
    /// Creates a new dependency with an equality condition.
    #[must_use]
    pub fn new(
        source: QuestionId,
        target: QuestionId,
        trigger_value: impl Into<String>,
        action: DependencyAction,
    ) -> Self {
        Self {
            source,
            target,
            condition: Condition::Equals(trigger_value.into()),
            action,
            set_value: None,
        }
    }

    /// Sets the value written by [`DependencyAction::SetValue`].
    #[must_use]
    pub fn with_set_value(mut self, value: impl Into<String>) -> Self {
        self.set_value = Some(value.into());
        self
    }

    /// Returns the observed source question.
    #[must_use]
    pub fn source(&self) -> &QuestionId {
        &self.source
    }

    /// Returns the affected target question.
    #[must_use]
    pub fn target(&self) -> &QuestionId {
        &self.target
    }

    /// Returns the condition.
    #[must_use]
    pub fn condition(&self) -> &Condition {
        &self.condition
    }

    /// Returns the trigger value.
    #[must_use]
    pub fn trigger_value(&self) -> &str {
        self.condition.trigger_value()
    }

    /// Returns the action.
    #[must_use]
    pub fn action(&self) -> DependencyAction {
        self.action
    }

    /// Returns the value written by `SetValue`, if any.
    #[must_use]
    pub fn set_value(&self) -> Option<&str> {
        self.set_value.as_deref()
    }
}

impl fmt::Display for QuestionDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} when `{}` ({})",
            self.source,
            self.target,
            self.trigger_value(),
            self.action
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> QuestionId {
        QuestionId::new(s).unwrap()
    }

    #[test]
    fn ordinals_follow_fixed_table() {
        let table: Vec<(DependencyAction, u8)> = DependencyAction::ALL
            .into_iter()
            .map(|a| (a, a.ordinal()))
            .collect();
        assert_eq!(
            table,
            vec![
                (DependencyAction::Require, 0),
                (DependencyAction::Show, 1),
                (DependencyAction::Hide, 2),
                (DependencyAction::Enable, 3),
                (DependencyAction::Disable, 4),
                (DependencyAction::ClearValue, 5),
                (DependencyAction::SetValue, 6),
            ]
        );
    }

    #[test]
    fn from_ordinal_rejects_unknown() {
        assert_eq!(DependencyAction::from_ordinal(7), None);
        assert_eq!(DependencyAction::from_ordinal(-1), None);
        for action in DependencyAction::ALL {
            assert_eq!(
                DependencyAction::from_ordinal(i64::from(action.ordinal())),
                Some(action)
            );
        }
    }

    #[test]
    fn from_name_is_case_insensitive() {
        assert_eq!(
            DependencyAction::from_name("Clear-Value"),
            Some(DependencyAction::ClearValue)
        );
        assert_eq!(DependencyAction::from_name("toggle"), None);
    }

    #[test]
    fn opposite_pairs() {
        assert_eq!(
            DependencyAction::Show.opposite(),
            Some(DependencyAction::Hide)
        );
        assert_eq!(
            DependencyAction::Disable.opposite(),
            Some(DependencyAction::Enable)
        );
        assert_eq!(DependencyAction::Require.opposite(), None);
    }

    #[test]
    fn dependency_display() {
        let dep = QuestionDependency::new(
            id("country"),
            id("province"),
            "CA",
            DependencyAction::Require,
        );
        assert_eq!(dep.to_string(), "country -> province when `CA` (require)");
    }

    #[test]
    fn set_value_is_optional() {
        let dep = QuestionDependency::new(
            id("serviceType"),
            id("discountCode"),
            "BASIC",
            DependencyAction::SetValue,
        );
        assert_eq!(dep.set_value(), None);
        let dep = dep.with_set_value("NONE");
        assert_eq!(dep.set_value(), Some("NONE"));
    }
}
