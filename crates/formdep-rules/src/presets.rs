//! Rule presets for common configurations.

use crate::{
    ConflictingActions, DependencyCycle, DependencyFanOut, MissingSetValue, TargetMismatch,
    UnknownReference, UnreachableTrigger,
};
use formdep_core::{RuleBox, Severity};

/// Preset configurations for formdep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Recommended rules with sensible defaults.
    Recommended,
    /// Every rule, warnings promoted where it matters.
    Strict,
    /// Minimal rules for gradual adoption.
    Minimal,
}

impl Preset {
    /// Returns the rules for this preset.
    #[must_use]
    pub fn rules(self) -> Vec<RuleBox> {
        match self {
            Self::Recommended => recommended_rules(),
            Self::Strict => strict_rules(),
            Self::Minimal => minimal_rules(),
        }
    }

    /// Name as written in `formdep.toml`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Recommended => "recommended",
            Self::Strict => "strict",
            Self::Minimal => "minimal",
        }
    }

    /// Parses a preset name as written in `formdep.toml`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "recommended" => Some(Self::Recommended),
            "strict" => Some(Self::Strict),
            "minimal" => Some(Self::Minimal),
            _ => None,
        }
    }
}

/// Returns the recommended set of rules.
///
/// Includes:
/// - `unknown-reference` (FD001)
/// - `dependency-cycle` (FD002)
/// - `missing-set-value` (FD003)
/// - `target-mismatch` (FD004)
/// - `conflicting-actions` (FD007)
#[must_use]
pub fn recommended_rules() -> Vec<RuleBox> {
    vec![
        Box::new(UnknownReference::new()),
        Box::new(DependencyCycle::new()),
        Box::new(MissingSetValue::new()),
        Box::new(TargetMismatch::new()),
        Box::new(ConflictingActions::new()),
    ]
}

/// Returns the strict set of rules.
///
/// All rules; target mismatches and unreachable triggers become errors.
#[must_use]
pub fn strict_rules() -> Vec<RuleBox> {
    vec![
        Box::new(UnknownReference::new()),
        Box::new(DependencyCycle::new()),
        Box::new(MissingSetValue::new()),
        Box::new(TargetMismatch::new().severity(Severity::Error)),
        Box::new(UnreachableTrigger::new().severity(Severity::Error)),
        Box::new(DependencyFanOut::new().severity(Severity::Warning)),
        Box::new(ConflictingActions::new()),
    ]
}

/// Returns the minimal set of rules.
///
/// Only what breaks a form at runtime: dangling references and cycles.
#[must_use]
pub fn minimal_rules() -> Vec<RuleBox> {
    vec![
        Box::new(UnknownReference::new()),
        Box::new(DependencyCycle::new()),
    ]
}

/// Returns all available rules.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(UnknownReference::new()),
        Box::new(DependencyCycle::new()),
        Box::new(MissingSetValue::new()),
        Box::new(TargetMismatch::new()),
        Box::new(UnreachableTrigger::new()),
        Box::new(DependencyFanOut::new()),
        Box::new(ConflictingActions::new()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_rules() {
        assert_eq!(Preset::Recommended.rules().len(), 5);
        assert_eq!(Preset::Strict.rules().len(), all_rules().len());
        assert_eq!(Preset::Minimal.rules().len(), 2);
    }

    #[test]
    fn codes_are_unique() {
        let mut codes: Vec<_> = all_rules().iter().map(|r| r.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), all_rules().len());
    }

    #[test]
    fn from_name() {
        assert_eq!(Preset::from_name("Strict"), Some(Preset::Strict));
        assert_eq!(Preset::from_name("lenient"), None);
        for preset in [Preset::Recommended, Preset::Strict, Preset::Minimal] {
            assert_eq!(Preset::from_name(preset.name()), Some(preset));
        }
    }
}
