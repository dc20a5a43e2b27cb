//! In-memory rendered form: the elements the runtime reads and mutates.
//!
//! The document is the single source of truth for field values and for the
//! derived required, visibility, and enabled state. Every setter compares
//! current and desired state first, and only real changes count towards
//! [`Document::mutation_count`].

use std::collections::HashMap;

use crate::condition::equals_ignore_case;
use crate::model::{FormDefinition, FormQuestion, QuestionType};
use crate::payload::{self, PayloadError};

/// The closed set of field kinds, each with its own value extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text input (text, email, number, date, textarea, ...).
    Text,
    /// A single boolean checkbox; its value is `true` or `false`.
    Checkbox,
    /// A group of checkboxes; its value is the checked option values joined by `,`.
    CheckboxGroup,
    /// A group of radio buttons; its value is the checked option's value.
    RadioGroup,
    /// A select list.
    Select,
    /// One option input inside a group; its value is its own value when checked.
    Choice,
    /// A file input; its value is the selected file name.
    File,
}

impl FieldKind {
    /// Returns the field kind rendered for a question type.
    #[must_use]
    pub fn for_question(question_type: QuestionType) -> Self {
        match question_type {
            QuestionType::Text
            | QuestionType::Email
            | QuestionType::Password
            | QuestionType::Url
            | QuestionType::MultilineText
            | QuestionType::Number
            | QuestionType::Date => Self::Text,
            QuestionType::SingleChoice => Self::RadioGroup,
            QuestionType::MultiChoice => Self::CheckboxGroup,
            QuestionType::Dropdown => Self::Select,
            QuestionType::File => Self::File,
        }
    }

    /// Returns true for kinds whose state is a checked flag.
    #[must_use]
    pub fn is_checkable(self) -> bool {
        matches!(self, Self::Checkbox | Self::Choice)
    }

    /// Returns true for option groups.
    #[must_use]
    pub fn is_group(self) -> bool {
        matches!(self, Self::CheckboxGroup | Self::RadioGroup)
    }
}

/// One rendered field or option input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    id: String,
    kind: FieldKind,
    value: String,
    checked: bool,
    parent: Option<String>,
    options: Vec<String>,
    wrapper: Option<String>,
    required: bool,
    required_indicator: bool,
    hidden: bool,
    disabled: bool,
    aria_disabled: bool,
    payload: Option<String>,
}

impl Element {
    /// Creates an empty, visible, enabled, optional element.
    #[must_use]
    pub fn new(id: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            id: id.into(),
            kind,
            value: String::new(),
            checked: false,
            parent: None,
            options: Vec::new(),
            wrapper: None,
            required: false,
            required_indicator: false,
            hidden: false,
            disabled: false,
            aria_disabled: false,
            payload: None,
        }
    }

    /// Creates an option input belonging to a group or select.
    #[must_use]
    pub fn option_of(
        parent: impl Into<String>,
        id: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        let mut element = Self::new(id, FieldKind::Choice);
        element.parent = Some(parent.into());
        element.value = value.into();
        element
    }

    /// Sets the initial value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Sets the initial checked state.
    #[must_use]
    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    /// Places the element inside a form-group wrapper.
    #[must_use]
    pub fn with_wrapper(mut self, wrapper: impl Into<String>) -> Self {
        self.wrapper = Some(wrapper.into());
        self
    }

    /// Sets the initial required state (flag and indicator).
    #[must_use]
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self.required_indicator = required;
        self
    }

    /// Sets the initial disabled state (flag and `aria-disabled`).
    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self.aria_disabled = disabled;
        self
    }

    /// Sets the initial hidden state of the element itself.
    #[must_use]
    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Attaches a serialized dependency payload.
    #[must_use]
    pub fn with_payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    /// Returns the element id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the field kind.
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Returns the raw value attribute.
    #[must_use]
    pub fn raw_value(&self) -> &str {
        &self.value
    }

    /// Returns the checked state.
    #[must_use]
    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Returns the owning group for option inputs.
    #[must_use]
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// Returns the option input ids for groups and selects.
    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Returns the wrapper id.
    #[must_use]
    pub fn wrapper(&self) -> Option<&str> {
        self.wrapper.as_deref()
    }

    /// Returns the semantic required flag.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Returns the visible required indicator state.
    #[must_use]
    pub fn has_required_indicator(&self) -> bool {
        self.required_indicator
    }

    /// Returns the disabled flag.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Returns the `aria-disabled` attribute state.
    #[must_use]
    pub fn is_aria_disabled(&self) -> bool {
        self.aria_disabled
    }

    /// Returns the serialized dependency payload.
    #[must_use]
    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }
}

/// A rendered form.
#[derive(Debug, Clone, Default)]
pub struct Document {
    elements: Vec<Element>,
    positions: HashMap<String, usize>,
    hidden_wrappers: HashMap<String, bool>,
    mutations: u64,
}

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders a form definition into a document.
    ///
    /// Every question gets a wrapper `{id}-group`; options of choice
    /// questions become option inputs `{id}-{optionId}`. Dependencies are
    /// attached as serialized payloads, exactly as the markup carries them.
    ///
    /// # Errors
    ///
    /// Returns an error if a payload cannot be serialized.
    pub fn from_form(form: &FormDefinition) -> Result<Self, PayloadError> {
        let mut document = Self::new();
        for question in form.questions() {
            document.render_question(question)?;
        }
        Ok(document)
    }

    fn render_question(&mut self, question: &FormQuestion) -> Result<(), PayloadError> {
        let id = question.id().as_str();
        let wrapper = format!("{id}-group");
        let mut element = Element::new(id, FieldKind::for_question(question.question_type()))
            .with_wrapper(wrapper.clone())
            .with_required(question.is_required())
            .with_disabled(question.is_disabled());
        if !question.dependencies().is_empty() {
            element = element.with_payload(payload::encode(question.dependencies())?);
        }
        self.push(element);
        self.hidden_wrappers.entry(wrapper).or_insert(false);

        for option in question.options() {
            let mut input =
                Element::option_of(id, question.option_element_id(option), option.value())
                    .with_disabled(option.is_disabled());
            if !option.dependencies().is_empty() {
                input = input.with_payload(payload::encode(option.dependencies())?);
            }
            self.push(input);
        }
        Ok(())
    }

    /// Adds an element. Option inputs are linked to an existing parent.
    ///
    /// A later element with the same id replaces the earlier one.
    pub fn push(&mut self, element: Element) -> &mut Self {
        if let Some(wrapper) = &element.wrapper {
            self.hidden_wrappers.entry(wrapper.clone()).or_insert(false);
        }
        if let Some(parent) = element.parent.clone() {
            if let Some(&p) = self.positions.get(&parent) {
                if !self.elements[p].options.contains(&element.id) {
                    self.elements[p].options.push(element.id.clone());
                }
            }
        }
        match self.positions.get(&element.id) {
            Some(&i) => self.elements[i] = element,
            None => {
                self.positions.insert(element.id.clone(), self.elements.len());
                self.elements.push(element);
            }
        }
        self
    }

    /// Registers a wrapper with its initial visibility.
    pub fn set_wrapper_initially_hidden(&mut self, wrapper: impl Into<String>, hidden: bool) {
        self.hidden_wrappers.insert(wrapper.into(), hidden);
    }

    /// Returns an element by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Element> {
        self.positions.get(id).map(|&i| &self.elements[i])
    }

    /// Returns true if an element with this id exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    /// Iterates elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    /// Returns how many state changes have been written since creation.
    #[must_use]
    pub fn mutation_count(&self) -> u64 {
        self.mutations
    }

    /// Reads a field's current value according to its kind.
    #[must_use]
    pub fn field_value(&self, id: &str) -> Option<String> {
        let element = self.get(id)?;
        Some(match element.kind {
            FieldKind::Text | FieldKind::Select | FieldKind::File => element.value.clone(),
            FieldKind::Checkbox => element.checked.to_string(),
            FieldKind::Choice => {
                if element.checked {
                    element.value.clone()
                } else {
                    String::new()
                }
            }
            FieldKind::CheckboxGroup => self
                .checked_options(element)
                .collect::<Vec<_>>()
                .join(","),
            FieldKind::RadioGroup => self
                .checked_options(element)
                .next()
                .unwrap_or_default()
                .to_string(),
        })
    }

    fn checked_options<'a>(&'a self, group: &'a Element) -> impl Iterator<Item = &'a str> + 'a {
        group
            .options
            .iter()
            .filter_map(|id| self.get(id))
            .filter(|o| o.checked)
            .map(|o| o.value.as_str())
    }

    /// Returns true unless the element or its wrapper is hidden.
    #[must_use]
    pub fn is_visible(&self, id: &str) -> bool {
        let Some(element) = self.get(id) else {
            return false;
        };
        let wrapper_hidden = element
            .wrapper
            .as_ref()
            .and_then(|w| self.hidden_wrappers.get(w))
            .copied()
            .unwrap_or(false);
        !element.hidden && !wrapper_hidden
    }

    // ── Guarded setters. Each returns `None` if the element is missing,
    // ── otherwise whether anything changed.

    fn update(&mut self, id: &str, f: impl FnOnce(&mut Element) -> bool) -> Option<bool> {
        let &i = self.positions.get(id)?;
        let changed = f(&mut self.elements[i]);
        if changed {
            self.mutations += 1;
        }
        Some(changed)
    }

    /// Sets the required flag and indicator.
    pub fn set_required(&mut self, id: &str, required: bool) -> Option<bool> {
        self.update(id, |e| {
            if e.required == required && e.required_indicator == required {
                return false;
            }
            e.required = required;
            e.required_indicator = required;
            true
        })
    }

    /// Sets the disabled flag and mirrors it into `aria-disabled`.
    pub fn set_disabled(&mut self, id: &str, disabled: bool) -> Option<bool> {
        self.update(id, |e| {
            if e.disabled == disabled && e.aria_disabled == disabled {
                return false;
            }
            e.disabled = disabled;
            e.aria_disabled = disabled;
            true
        })
    }

    /// Hides or shows the element's wrapper, or the element itself without one.
    pub fn set_hidden(&mut self, id: &str, hidden: bool) -> Option<bool> {
        let wrapper = self
            .get(id)?
            .wrapper
            .clone()
            .filter(|w| self.hidden_wrappers.contains_key(w));
        match wrapper {
            Some(w) => {
                let current = self.hidden_wrappers.get(&w).copied().unwrap_or(false);
                if current == hidden {
                    return Some(false);
                }
                self.hidden_wrappers.insert(w, hidden);
                self.mutations += 1;
                Some(true)
            }
            None => self.update(id, |e| {
                if e.hidden == hidden {
                    return false;
                }
                e.hidden = hidden;
                true
            }),
        }
    }

    /// Resets a field to empty, or unchecked for checkable inputs and groups.
    pub fn clear_value(&mut self, id: &str) -> Option<bool> {
        let element = self.get(id)?;
        if element.kind.is_group() {
            let options = element.options.clone();
            let mut changed = false;
            for option in options {
                changed |= self.set_checked(&option, false).unwrap_or(false);
            }
            return Some(changed);
        }
        if element.kind.is_checkable() {
            return self.set_checked(id, false);
        }
        self.update(id, |e| {
            if e.value.is_empty() {
                return false;
            }
            e.value.clear();
            true
        })
    }

    /// Sets the checked state of a checkbox or option input.
    ///
    /// Checking a radio option unchecks its siblings.
    pub fn set_checked(&mut self, id: &str, checked: bool) -> Option<bool> {
        let mut changed = self.update(id, |e| {
            if e.checked == checked {
                return false;
            }
            e.checked = checked;
            true
        })?;
        if checked {
            for sibling in self.radio_siblings(id) {
                changed |= self
                    .update(&sibling, |e| std::mem::take(&mut e.checked))
                    .unwrap_or(false);
            }
        }
        Some(changed)
    }

    fn radio_siblings(&self, id: &str) -> Vec<String> {
        self.get(id)
            .and_then(|e| e.parent.as_deref())
            .and_then(|p| self.get(p))
            .filter(|group| group.kind == FieldKind::RadioGroup)
            .map(|group| group.options.iter().filter(|o| *o != id).cloned().collect())
            .unwrap_or_default()
    }

    /// Writes a value into a field according to its kind.
    ///
    /// Checkboxes become checked for `true`; option inputs for `true` or
    /// their own value; groups check exactly the options whose values are
    /// listed (comma separated for checkbox groups).
    pub fn assign_value(&mut self, id: &str, value: &str) -> Option<bool> {
        let element = self.get(id)?;
        let kind = element.kind;
        match kind {
            FieldKind::Text | FieldKind::Select | FieldKind::File => self.update(id, |e| {
                if e.value == value {
                    return false;
                }
                e.value = value.to_string();
                true
            }),
            FieldKind::Checkbox => self.set_checked(id, equals_ignore_case(value, "true")),
            FieldKind::Choice => {
                let checked =
                    equals_ignore_case(value, "true") || equals_ignore_case(value, &element.value);
                self.set_checked(id, checked)
            }
            FieldKind::RadioGroup | FieldKind::CheckboxGroup => {
                let wanted: Vec<&str> = if kind == FieldKind::RadioGroup {
                    vec![value]
                } else {
                    value.split(',').map(str::trim).collect()
                };
                let targets: Vec<(String, bool)> = element
                    .options
                    .iter()
                    .filter_map(|o| self.get(o))
                    .map(|o| {
                        let on = wanted.iter().any(|w| equals_ignore_case(w, &o.value));
                        (o.id.clone(), on)
                    })
                    .collect();
                let mut changed = false;
                for (option, on) in targets {
                    changed |= self.set_checked(&option, on).unwrap_or(false);
                }
                Some(changed)
            }
        }
    }
}
