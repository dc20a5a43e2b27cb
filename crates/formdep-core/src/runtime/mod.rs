//! Dependency graph runtime: keeps dependent fields consistent with sources.
//!
//! # Lifecycle
//!
//! ```text
//! Document (rendered, payloads attached)
//!   ↓ FormRuntime::mount()
//! scan payloads → source index → cycle check → initial pass
//!   ↓ set_value() / set_checked() / dispatch()
//! change event → dependents of that one source → synthetic change events
//!   ↓ FormRuntime::unmount()
//! Document
//! ```
//!
//! Events are processed from a FIFO queue, one at a time, each to
//! completion, which mirrors a single-threaded browser event loop.
//! Cascades need no recursion: applying a met dependency enqueues a change
//! event for its target, and the target's own dependents react to it.

pub mod apply;
pub mod document;

use std::collections::{HashMap, VecDeque};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::condition;
use crate::graph::DependencyGraph;
use crate::model::QuestionDependency;
use crate::payload;

pub use apply::{apply, Applied};
pub use document::{Document, Element, FieldKind};

/// What to do when the dependencies form a cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CyclePolicy {
    /// Refuse to mount.
    #[default]
    Reject,
    /// Log the cycle and mount anyway; cascades are bounded by the event budget.
    Warn,
}

/// Runtime tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeOptions {
    /// Behavior for cyclic dependency graphs.
    #[serde(default)]
    pub cycle_policy: CyclePolicy,

    /// Maximum change events processed for a single input when the
    /// dependencies form a cycle.
    #[serde(default = "default_max_cascade_events")]
    pub max_cascade_events: usize,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            cycle_policy: CyclePolicy::default(),
            max_cascade_events: default_max_cascade_events(),
        }
    }
}

fn default_max_cascade_events() -> usize {
    1024
}

/// Errors from mounting or driving the runtime.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// The dependency graph contains a cycle and the policy rejects it.
    #[error("dependency cycle: {}", .path.join(" -> "))]
    Cycle {
        /// Closed path, first and last element equal.
        path: Vec<String>,
    },

    /// Input was addressed to a field that does not exist.
    #[error("unknown field `{0}`")]
    UnknownField(String),

    /// A checked-state input was addressed to a field without one.
    #[error("field `{0}` is not a checkbox or option")]
    NotCheckable(String),
}

/// How a change was signalled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeKind {
    /// The custom value-changed event, carrying the new value.
    ValueChanged(String),
    /// The native change event fallback, without a value.
    Native,
}

/// A change notification for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// Field whose value changed.
    pub field: String,
    /// Signal variant.
    pub kind: ChangeKind,
    /// True when raised by the applicator rather than by input.
    pub synthetic: bool,
}

impl ChangeEvent {
    /// A value-changed event raised by user input.
    #[must_use]
    pub fn value_changed(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind: ChangeKind::ValueChanged(value.into()),
            synthetic: false,
        }
    }

    /// A native change event raised by user input.
    #[must_use]
    pub fn native(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind: ChangeKind::Native,
            synthetic: false,
        }
    }

    fn synthetic(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind: ChangeKind::Native,
            synthetic: true,
        }
    }
}

/// One `(target, dependency)` pair re-evaluated when its source changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    /// Element carrying the dependency payload.
    pub target: String,
    /// The dependency.
    pub dependency: QuestionDependency,
}

/// Source id → subscriptions, in document order.
#[derive(Debug, Clone, Default)]
pub struct DependencyIndex {
    by_source: HashMap<String, Vec<Subscription>>,
    sources: Vec<String>,
}

impl DependencyIndex {
    /// Scans every element carrying a payload.
    ///
    /// Malformed payloads and unsupported entries are logged and skipped.
    #[must_use]
    pub fn scan(document: &Document) -> Self {
        let mut index = Self::default();
        for element in document.elements() {
            let Some(raw) = element.payload() else {
                continue;
            };
            for dependency in payload::decode_lenient(element.id(), raw) {
                index.insert(element.id(), dependency);
            }
        }
        index
    }

    fn insert(&mut self, target: &str, dependency: QuestionDependency) {
        let source = dependency.source().to_string();
        let subs = self.by_source.entry(source.clone()).or_insert_with(|| {
            self.sources.push(source);
            Vec::new()
        });
        subs.push(Subscription {
            target: target.to_string(),
            dependency,
        });
    }

    fn remove(&mut self, source: &str) -> usize {
        self.sources.retain(|s| s != source);
        self.by_source.remove(source).map_or(0, |s| s.len())
    }

    /// Returns the subscriptions rooted at a source.
    #[must_use]
    pub fn subscriptions(&self, source: &str) -> &[Subscription] {
        self.by_source.get(source).map_or(&[], Vec::as_slice)
    }

    /// Returns the distinct sources in first-seen order.
    #[must_use]
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Returns true if nothing is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    fn graph(&self, document: &Document) -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        for (source, subs) in &self.by_source {
            for sub in subs {
                // A changed option changes its group's value.
                let node = document
                    .get(&sub.target)
                    .and_then(Element::parent)
                    .unwrap_or(&sub.target);
                graph.add_edge(source, node);
            }
        }
        graph
    }
}

/// The runtime context of one mounted form.
///
/// Owns the document and the listener index; dropping or unmounting it
/// discards every listener.
#[derive(Debug)]
pub struct FormRuntime {
    document: Document,
    index: DependencyIndex,
    queue: VecDeque<ChangeEvent>,
    options: RuntimeOptions,
    cyclic: bool,
    dropped_events: usize,
}

impl FormRuntime {
    /// Mounts a rendered form with default options.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::Cycle`] if the dependencies are cyclic.
    pub fn mount(document: Document) -> Result<Self, RuntimeError> {
        Self::mount_with(document, RuntimeOptions::default())
    }

    /// Mounts a rendered form.
    ///
    /// Builds the source index, drops sources that do not exist in the
    /// document, checks for cycles, then runs the initial evaluation pass
    /// so that initial visibility and required state are correct.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::Cycle`] if the dependencies are cyclic and
    /// the policy is [`CyclePolicy::Reject`].
    pub fn mount_with(document: Document, options: RuntimeOptions) -> Result<Self, RuntimeError> {
        let mut index = DependencyIndex::scan(&document);

        let missing: Vec<String> = index
            .sources()
            .iter()
            .filter(|s| !document.contains(s))
            .cloned()
            .collect();
        for source in missing {
            let skipped = index.remove(&source);
            warn!("Dependency source `{source}` not found, skipping {skipped} dependencies");
        }

        let cycle = index.graph(&document).find_cycle();
        let cyclic = cycle.is_some();
        if let Some(path) = cycle {
            match options.cycle_policy {
                CyclePolicy::Reject => return Err(RuntimeError::Cycle { path }),
                CyclePolicy::Warn => warn!(
                    "Dependency cycle {}; cascades limited to {} events",
                    path.join(" -> "),
                    options.max_cascade_events
                ),
            }
        }

        info!(
            "Mounted form runtime: {} sources, {} subscriptions",
            index.sources().len(),
            index.by_source.values().map(Vec::len).sum::<usize>()
        );

        let mut runtime = Self {
            document,
            index,
            queue: VecDeque::new(),
            options,
            cyclic,
            dropped_events: 0,
        };

        let sources = runtime.index.sources().to_vec();
        for source in &sources {
            runtime.evaluate_source(source);
        }
        runtime.drain();

        Ok(runtime)
    }

    /// Discards all listeners and returns the document.
    #[must_use]
    pub fn unmount(self) -> Document {
        debug!("Unmounting form runtime");
        self.document
    }

    /// Returns the current document.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Returns the listener index.
    #[must_use]
    pub fn index(&self) -> &DependencyIndex {
        &self.index
    }

    /// Returns how many queued events were dropped by the cascade budget.
    #[must_use]
    pub fn dropped_events(&self) -> usize {
        self.dropped_events
    }

    /// Types a value into a field and fires the value-changed event.
    ///
    /// Writing to an option input also notifies its group.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::UnknownField`] if the field does not exist.
    pub fn set_value(&mut self, field: &str, value: &str) -> Result<(), RuntimeError> {
        self.document
            .assign_value(field, value)
            .ok_or_else(|| RuntimeError::UnknownField(field.to_string()))?;
        self.notify_input(field);
        Ok(())
    }

    /// Checks or unchecks a checkbox or option and fires the change.
    ///
    /// Toggling an option notifies its group, whose value it is part of.
    /// Checking a radio option unchecks the other options of its group.
    ///
    /// # Errors
    ///
    /// Returns an error if the field does not exist or is not checkable.
    pub fn set_checked(&mut self, field: &str, checked: bool) -> Result<(), RuntimeError> {
        let element = self
            .document
            .get(field)
            .ok_or_else(|| RuntimeError::UnknownField(field.to_string()))?;
        if !element.kind().is_checkable() {
            return Err(RuntimeError::NotCheckable(field.to_string()));
        }
        self.document.set_checked(field, checked);
        self.notify_input(field);
        Ok(())
    }

    /// Flips the checked state of a checkbox or option.
    ///
    /// # Errors
    ///
    /// Returns an error if the field does not exist or is not checkable.
    pub fn toggle_option(&mut self, field: &str) -> Result<(), RuntimeError> {
        let checked = self
            .document
            .get(field)
            .ok_or_else(|| RuntimeError::UnknownField(field.to_string()))?
            .is_checked();
        self.set_checked(field, !checked)
    }

    /// Delivers a change event and processes everything it cascades into.
    pub fn dispatch(&mut self, event: ChangeEvent) {
        self.queue.push_back(event);
        self.drain();
    }

    /// Queues the value-changed events for an input and drains them.
    fn notify_input(&mut self, field: &str) {
        let current = self.document.field_value(field).unwrap_or_default();
        self.queue.push_back(ChangeEvent::value_changed(field, current));
        if let Some(parent) = self.document.get(field).and_then(Element::parent) {
            let group = self.document.field_value(parent).unwrap_or_default();
            self.queue.push_back(ChangeEvent::value_changed(parent, group));
        }
        self.drain();
    }

    /// Processes queued events to completion.
    ///
    /// An acyclic graph always settles. Only a form mounted with a cycle
    /// under [`CyclePolicy::Warn`] is held to `max_cascade_events`.
    fn drain(&mut self) {
        let mut processed = 0usize;
        while let Some(event) = self.queue.pop_front() {
            processed += 1;
            if self.cyclic && processed > self.options.max_cascade_events {
                let dropped = self.queue.len() + 1;
                error!(
                    "Cascade exceeded {} events at `{}`, dropping {dropped} pending events",
                    self.options.max_cascade_events, event.field
                );
                self.dropped_events += dropped;
                self.queue.clear();
                break;
            }
            debug!(
                "Change on `{}` (synthetic: {}, {:?})",
                event.field, event.synthetic, event.kind
            );
            self.evaluate_source(&event.field);
        }
    }

    /// Re-evaluates every dependency rooted at one source.
    fn evaluate_source(&mut self, source: &str) {
        let Self {
            document,
            index,
            queue,
            ..
        } = self;

        let subscriptions = index.subscriptions(source);
        if subscriptions.is_empty() {
            return;
        }
        let value = document.field_value(source);

        for sub in subscriptions {
            let met = condition::evaluate(&sub.dependency, value.as_deref());
            let outcome = apply(
                document,
                &sub.target,
                sub.dependency.action(),
                met,
                &sub.dependency,
            );
            if !matches!(outcome, Applied::Done { notify: true, .. }) {
                continue;
            }
            // Notify on every met condition, changed or not; fields nobody
            // listens to get no event.
            let parent = document.get(&sub.target).and_then(Element::parent);
            for field in std::iter::once(sub.target.as_str()).chain(parent) {
                if !index.subscriptions(field).is_empty() {
                    queue.push_back(ChangeEvent::synthetic(field));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DependencyAction, QuestionId};

    fn dep(
        source: &str,
        target: &str,
        trigger: &str,
        action: DependencyAction,
    ) -> QuestionDependency {
        QuestionDependency::new(
            QuestionId::new(source).unwrap(),
            QuestionId::new(target).unwrap(),
            trigger,
            action,
        )
    }

    fn payload_of(deps: &[QuestionDependency]) -> String {
        payload::encode(deps).unwrap()
    }

    fn text(id: &str) -> Element {
        Element::new(id, FieldKind::Text).with_wrapper(format!("{id}-group"))
    }

    #[test]
    fn initial_pass_applies_current_values() {
        let mut doc = Document::new();
        doc.push(text("country").with_value("CA"));
        doc.push(text("province").with_payload(payload_of(&[dep(
            "country",
            "province",
            "CA",
            DependencyAction::Require,
        )])));
        doc.push(text("state").with_payload(payload_of(&[dep(
            "country",
            "state",
            "US",
            DependencyAction::Show,
        )])));

        let runtime = FormRuntime::mount(doc).unwrap();
        assert!(runtime.document().get("province").unwrap().is_required());
        assert!(!runtime.document().is_visible("state"));
    }

    #[test]
    fn change_re_evaluates_only_that_source() {
        let mut doc = Document::new();
        doc.push(text("country"));
        doc.push(text("plan"));
        doc.push(text("province").with_payload(payload_of(&[dep(
            "country",
            "province",
            "CA",
            DependencyAction::Require,
        )])));
        doc.push(text("discount").with_payload(payload_of(&[dep(
            "plan",
            "discount",
            "BASIC",
            DependencyAction::Disable,
        )])));

        let mut runtime = FormRuntime::mount(doc).unwrap();
        runtime.set_value("country", "ca").unwrap();
        assert!(runtime.document().get("province").unwrap().is_required());
        assert!(!runtime.document().get("discount").unwrap().is_disabled());

        runtime.set_value("country", "US").unwrap();
        assert!(!runtime.document().get("province").unwrap().is_required());
    }

    #[test]
    fn fan_out_and_fan_in() {
        let mut doc = Document::new();
        doc.push(text("a"));
        doc.push(text("b"));
        doc.push(text("x").with_payload(payload_of(&[
            dep("a", "x", "1", DependencyAction::Require),
            dep("b", "x", "1", DependencyAction::Disable),
        ])));
        doc.push(text("y").with_payload(payload_of(&[dep(
            "a",
            "y",
            "1",
            DependencyAction::Hide,
        )])));

        let mut runtime = FormRuntime::mount(doc).unwrap();
        assert_eq!(runtime.index().subscriptions("a").len(), 2);
        assert_eq!(runtime.index().subscriptions("b").len(), 1);

        runtime.set_value("a", "1").unwrap();
        assert!(runtime.document().get("x").unwrap().is_required());
        assert!(!runtime.document().is_visible("y"));
        assert!(!runtime.document().get("x").unwrap().is_disabled());

        runtime.set_value("b", "1").unwrap();
        assert!(runtime.document().get("x").unwrap().is_disabled());
    }

    #[test]
    fn set_value_cascades_without_manual_event() {
        let mut doc = Document::new();
        doc.push(text("a"));
        doc.push(text("b").with_payload(payload_of(&[dep(
            "a",
            "b",
            "yes",
            DependencyAction::SetValue,
        )
        .with_set_value("X")])));
        doc.push(text("c").with_payload(payload_of(&[dep(
            "b",
            "c",
            "x",
            DependencyAction::Require,
        )])));

        let mut runtime = FormRuntime::mount(doc).unwrap();
        assert!(!runtime.document().get("c").unwrap().is_required());

        runtime.set_value("a", "YES").unwrap();
        assert_eq!(runtime.document().field_value("b").as_deref(), Some("X"));
        assert!(runtime.document().get("c").unwrap().is_required());
    }

    #[test]
    fn show_step_then_require_downstream() {
        let mut doc = Document::new();
        doc.push(text("a"));
        doc.push(text("b").with_payload(payload_of(&[
            dep("a", "b", "yes", DependencyAction::Show),
            dep("a", "b", "no", DependencyAction::ClearValue),
        ])));
        doc.push(text("c").with_payload(payload_of(&[dep(
            "b",
            "c",
            "x",
            DependencyAction::Require,
        )])));

        let mut runtime = FormRuntime::mount(doc).unwrap();
        assert!(!runtime.document().is_visible("b"));

        runtime.set_value("a", "yes").unwrap();
        assert!(runtime.document().is_visible("b"));
        runtime.set_value("b", "x").unwrap();
        assert!(runtime.document().get("c").unwrap().is_required());

        // Hiding and clearing b must release c without any input on b.
        runtime.set_value("a", "no").unwrap();
        assert!(!runtime.document().is_visible("b"));
        assert_eq!(runtime.document().field_value("b").as_deref(), Some(""));
        assert!(!runtime.document().get("c").unwrap().is_required());

        // Showing b again re-evaluates c against b's current, empty value.
        runtime.set_value("a", "yes").unwrap();
        assert!(runtime.document().is_visible("b"));
        assert!(!runtime.document().get("c").unwrap().is_required());
    }

    #[test]
    fn wide_fan_out_does_not_cut_acyclic_cascade() {
        let mut doc = Document::new();
        doc.push(text("s"));
        for i in 0..1100 {
            let id = format!("f{i}");
            doc.push(text(&id).with_payload(payload_of(&[dep(
                "s",
                &id,
                "go",
                DependencyAction::Show,
            )])));
        }
        doc.push(text("b").with_payload(payload_of(&[dep(
            "s",
            "b",
            "go",
            DependencyAction::SetValue,
        )
        .with_set_value("X")])));
        doc.push(text("c").with_payload(payload_of(&[dep(
            "b",
            "c",
            "x",
            DependencyAction::Require,
        )])));

        let mut runtime = FormRuntime::mount(doc).unwrap();
        runtime.set_value("s", "go").unwrap();

        assert_eq!(runtime.document().field_value("b").as_deref(), Some("X"));
        assert!(runtime.document().get("c").unwrap().is_required());
        assert!(runtime.document().is_visible("f1099"));
        assert_eq!(runtime.dropped_events(), 0);
    }

    #[test]
    fn switching_radio_option_moves_group_value() {
        let mut doc = Document::new();
        doc.push(Element::new("plan", FieldKind::RadioGroup).with_wrapper("plan-group"));
        doc.push(Element::option_of("plan", "plan-basic", "BASIC"));
        doc.push(Element::option_of("plan", "plan-pro", "PRO"));
        doc.push(text("code").with_payload(payload_of(&[dep(
            "plan",
            "code",
            "PRO",
            DependencyAction::Require,
        )])));

        let mut runtime = FormRuntime::mount(doc).unwrap();
        runtime.set_checked("plan-basic", true).unwrap();
        runtime.set_checked("plan-pro", true).unwrap();

        assert_eq!(runtime.document().field_value("plan").as_deref(), Some("PRO"));
        assert!(!runtime.document().get("plan-basic").unwrap().is_checked());
        assert!(runtime.document().get("code").unwrap().is_required());

        // Writing to an option input notifies the group as well.
        runtime.set_value("plan-basic", "true").unwrap();
        assert_eq!(runtime.document().field_value("plan").as_deref(), Some("BASIC"));
        assert!(!runtime.document().get("code").unwrap().is_required());
    }

    #[test]
    fn toggle_flips_checkbox() {
        let mut doc = Document::new();
        doc.push(Element::new("terms", FieldKind::Checkbox));
        doc.push(text("signature").with_payload(payload_of(&[dep(
            "terms",
            "signature",
            "true",
            DependencyAction::Enable,
        )])));

        let mut runtime = FormRuntime::mount(doc).unwrap();
        assert!(runtime.document().get("signature").unwrap().is_disabled());
        runtime.toggle_option("terms").unwrap();
        assert!(!runtime.document().get("signature").unwrap().is_disabled());
        runtime.toggle_option("terms").unwrap();
        assert!(runtime.document().get("signature").unwrap().is_disabled());
    }

    #[test]
    fn missing_source_skips_only_its_dependencies() {
        let mut doc = Document::new();
        doc.push(text("country").with_value("CA"));
        doc.push(text("province").with_payload(payload_of(&[
            dep("ghost", "province", "x", DependencyAction::Hide),
            dep("country", "province", "CA", DependencyAction::Require),
        ])));

        let runtime = FormRuntime::mount(doc).unwrap();
        assert!(runtime.index().subscriptions("ghost").is_empty());
        assert!(runtime.document().get("province").unwrap().is_required());
        assert!(runtime.document().is_visible("province"));
    }

    #[test]
    fn malformed_payload_behaves_as_none() {
        let mut doc = Document::new();
        doc.push(text("country").with_value("CA"));
        doc.push(text("province").with_payload("[{oops"));

        let runtime = FormRuntime::mount(doc).unwrap();
        assert!(runtime.index().is_empty());
        assert_eq!(runtime.document().mutation_count(), 0);
    }

    #[test]
    fn cycle_rejected_by_default() {
        let mut doc = Document::new();
        doc.push(text("a").with_payload(payload_of(&[dep(
            "b",
            "a",
            "x",
            DependencyAction::ClearValue,
        )])));
        doc.push(text("b").with_payload(payload_of(&[dep(
            "a",
            "b",
            "",
            DependencyAction::SetValue,
        )])));

        let err = FormRuntime::mount(doc).unwrap_err();
        match err {
            RuntimeError::Cycle { path } => {
                assert_eq!(path.first(), path.last());
                assert!(path.contains(&"a".to_string()));
                assert!(path.contains(&"b".to_string()));
            }
            other => panic!("expected cycle, got {other}"),
        }
    }

    #[test]
    fn cycle_with_warn_policy_is_bounded() {
        // a and b set each other whenever they are empty: an endless storm.
        let mut doc = Document::new();
        doc.push(text("a").with_payload(payload_of(&[dep(
            "b",
            "a",
            "",
            DependencyAction::ClearValue,
        )])));
        doc.push(text("b").with_payload(payload_of(&[dep(
            "a",
            "b",
            "",
            DependencyAction::ClearValue,
        )])));

        let options = RuntimeOptions {
            cycle_policy: CyclePolicy::Warn,
            max_cascade_events: 16,
        };
        let runtime = FormRuntime::mount_with(doc, options).unwrap();
        assert!(runtime.dropped_events() > 0);
    }

    #[test]
    fn option_toggle_notifies_group() {
        let mut doc = Document::new();
        doc.push(
            Element::new("contact", FieldKind::CheckboxGroup).with_wrapper("contact-group"),
        );
        doc.push(Element::option_of("contact", "contact-sms", "sms"));
        doc.push(Element::option_of("contact", "contact-phone", "phone"));
        doc.push(text("mobile").with_payload(payload_of(&[dep(
            "contact",
            "mobile",
            "sms",
            DependencyAction::Show,
        )])));

        let mut runtime = FormRuntime::mount(doc).unwrap();
        assert!(!runtime.document().is_visible("mobile"));
        runtime.set_checked("contact-sms", true).unwrap();
        assert!(runtime.document().is_visible("mobile"));
        runtime.set_checked("contact-phone", true).unwrap();
        // "sms,phone" no longer equals the trigger.
        assert!(!runtime.document().is_visible("mobile"));
    }

    #[test]
    fn set_checked_rejects_text_fields() {
        let mut doc = Document::new();
        doc.push(text("name"));
        let mut runtime = FormRuntime::mount(doc).unwrap();
        assert!(matches!(
            runtime.set_checked("name", true),
            Err(RuntimeError::NotCheckable(_))
        ));
        assert!(matches!(
            runtime.set_value("nope", "x"),
            Err(RuntimeError::UnknownField(_))
        ));
    }

    #[test]
    fn unmount_returns_document() {
        let mut doc = Document::new();
        doc.push(text("country"));
        let mut runtime = FormRuntime::mount(doc).unwrap();
        runtime.set_value("country", "CA").unwrap();
        let doc = runtime.unmount();
        assert_eq!(doc.field_value("country").as_deref(), Some("CA"));
    }
}
