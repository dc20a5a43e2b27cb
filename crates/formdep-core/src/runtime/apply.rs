//! Action applicator: turns an evaluated dependency into document state.

use tracing::{debug, warn};

use super::document::Document;
use crate::model::{DependencyAction, QuestionDependency};

/// Outcome of applying one dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The target element does not exist; nothing happened.
    MissingTarget,
    /// The action ran. `notify` asks the caller to fire a synthetic change
    /// event on the target so cascading dependents re-evaluate.
    Done {
        /// Whether any state actually changed.
        changed: bool,
        /// Whether a change notification must follow.
        notify: bool,
    },
}

/// Applies `action` to `target` given whether the condition is met.
///
/// Idempotent: repeating a call with the same `condition_met` writes nothing
/// new. A missing target is logged and reported, never an error, so one bad
/// reference cannot stop the rest of a pass.
pub fn apply(
    document: &mut Document,
    target: &str,
    action: DependencyAction,
    condition_met: bool,
    dependency: &QuestionDependency,
) -> Applied {
    let result = match action {
        DependencyAction::Require => document.set_required(target, condition_met),
        DependencyAction::Show => document.set_hidden(target, !condition_met),
        DependencyAction::Hide => document.set_hidden(target, condition_met),
        DependencyAction::Enable => document.set_disabled(target, !condition_met),
        DependencyAction::Disable => document.set_disabled(target, condition_met),
        DependencyAction::ClearValue => {
            if condition_met {
                document.clear_value(target)
            } else {
                document.contains(target).then_some(false)
            }
        }
        DependencyAction::SetValue => match (condition_met, dependency.set_value()) {
            (true, Some(value)) => document.assign_value(target, value),
            _ => document.contains(target).then_some(false),
        },
    };

    match result {
        None => {
            warn!("Dependency target `{target}` not found, skipping ({dependency})");
            Applied::MissingTarget
        }
        Some(changed) => {
            debug!(
                "Applied {action} to `{target}` (met: {condition_met}, changed: {changed})"
            );
            Applied::Done {
                changed,
                notify: condition_met,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuestionId;
    use crate::runtime::document::{Element, FieldKind};

    fn dep(action: DependencyAction) -> QuestionDependency {
        QuestionDependency::new(
            QuestionId::new("country").unwrap(),
            QuestionId::new("province").unwrap(),
            "CA",
            action,
        )
    }

    fn doc() -> Document {
        let mut doc = Document::new();
        doc.push(
            Element::new("province", FieldKind::Text)
                .with_wrapper("province-group")
                .with_value("ON"),
        );
        doc
    }

    #[test]
    fn require_sets_flag_and_indicator() {
        let mut d = doc();
        let dependency = dep(DependencyAction::Require);
        apply(&mut d, "province", DependencyAction::Require, true, &dependency);
        let el = d.get("province").unwrap();
        assert!(el.is_required());
        assert!(el.has_required_indicator());

        apply(&mut d, "province", DependencyAction::Require, false, &dependency);
        let el = d.get("province").unwrap();
        assert!(!el.is_required());
        assert!(!el.has_required_indicator());
    }

    #[test]
    fn apply_twice_is_idempotent_for_every_action() {
        for action in DependencyAction::ALL {
            for met in [true, false] {
                let mut d = doc();
                let dependency = dep(action).with_set_value("QC");
                apply(&mut d, "province", action, met, &dependency);
                let after_once = d.mutation_count();
                let state_once = d.get("province").cloned();
                let visible_once = d.is_visible("province");

                let second = apply(&mut d, "province", action, met, &dependency);
                assert_eq!(d.mutation_count(), after_once, "{action} met={met}");
                assert_eq!(d.get("province").cloned(), state_once);
                assert_eq!(d.is_visible("province"), visible_once);
                assert!(matches!(second, Applied::Done { changed: false, .. }));
            }
        }
    }

    #[test]
    fn show_and_hide_are_complementary() {
        for met in [true, false] {
            let mut shown = doc();
            let mut hidden = doc();
            let show = dep(DependencyAction::Show);
            let hide = dep(DependencyAction::Hide);
            apply(&mut shown, "province", DependencyAction::Show, met, &show);
            apply(&mut hidden, "province", DependencyAction::Hide, met, &hide);
            assert_eq!(shown.is_visible("province"), met);
            assert_eq!(hidden.is_visible("province"), !met);
        }
    }

    #[test]
    fn enable_and_disable_mirror_aria() {
        let mut d = doc();
        apply(&mut d, "province", DependencyAction::Disable, true, &dep(DependencyAction::Disable));
        assert!(d.get("province").unwrap().is_aria_disabled());
        apply(&mut d, "province", DependencyAction::Enable, true, &dep(DependencyAction::Enable));
        let el = d.get("province").unwrap();
        assert!(!el.is_disabled());
        assert!(!el.is_aria_disabled());
    }

    #[test]
    fn clear_value_only_when_met() {
        let mut d = doc();
        let dependency = dep(DependencyAction::ClearValue);
        let outcome = apply(&mut d, "province", DependencyAction::ClearValue, false, &dependency);
        assert_eq!(outcome, Applied::Done { changed: false, notify: false });
        assert_eq!(d.field_value("province").as_deref(), Some("ON"));

        let outcome = apply(&mut d, "province", DependencyAction::ClearValue, true, &dependency);
        assert_eq!(outcome, Applied::Done { changed: true, notify: true });
        assert_eq!(d.field_value("province").as_deref(), Some(""));
    }

    #[test]
    fn set_value_requires_a_value() {
        let mut d = doc();
        let without = dep(DependencyAction::SetValue);
        apply(&mut d, "province", DependencyAction::SetValue, true, &without);
        assert_eq!(d.field_value("province").as_deref(), Some("ON"));

        let with = dep(DependencyAction::SetValue).with_set_value("QC");
        apply(&mut d, "province", DependencyAction::SetValue, true, &with);
        assert_eq!(d.field_value("province").as_deref(), Some("QC"));
    }

    #[test]
    fn set_value_checks_boolean_inputs() {
        let mut d = Document::new();
        d.push(Element::new("newsletter", FieldKind::Checkbox));
        let dependency = dep(DependencyAction::SetValue).with_set_value("true");
        apply(&mut d, "newsletter", DependencyAction::SetValue, true, &dependency);
        assert!(d.get("newsletter").unwrap().is_checked());
    }

    #[test]
    fn missing_target_is_reported_not_fatal() {
        let mut d = doc();
        let require = dep(DependencyAction::Require);
        let outcome = apply(&mut d, "ghost", DependencyAction::Require, true, &require);
        assert_eq!(outcome, Applied::MissingTarget);
        assert_eq!(d.mutation_count(), 0);
    }
}
