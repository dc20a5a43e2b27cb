//! Forms, sections, questions, and options.

use std::collections::HashSet;
use std::fmt;

use super::{ModelError, QuestionDependency, QuestionId};

/// The input kind of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionType {
    /// Single-line text.
    Text,
    /// Email address.
    Email,
    /// Password.
    Password,
    /// URL.
    Url,
    /// Multi-line text area.
    MultilineText,
    /// Numeric input.
    Number,
    /// Date input.
    Date,
    /// Radio group: exactly one option.
    SingleChoice,
    /// Checkbox group: any number of options.
    MultiChoice,
    /// Select list.
    Dropdown,
    /// File upload.
    File,
}

impl QuestionType {
    const NAMES: [(Self, &'static str); 11] = [
        (Self::Text, "text"),
        (Self::Email, "email"),
        (Self::Password, "password"),
        (Self::Url, "url"),
        (Self::MultilineText, "multiline-text"),
        (Self::Number, "number"),
        (Self::Date, "date"),
        (Self::SingleChoice, "single-choice"),
        (Self::MultiChoice, "multi-choice"),
        (Self::Dropdown, "dropdown"),
        (Self::File, "file"),
    ];

    /// Returns the kebab-case name used in form definition files.
    #[must_use]
    pub fn name(self) -> &'static str {
        Self::NAMES
            .iter()
            .find(|(t, _)| *t == self)
            .map_or("text", |(_, n)| n)
    }

    /// Resolves a kebab-case name (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::NAMES
            .iter()
            .find(|(_, n)| n.eq_ignore_ascii_case(name))
            .map(|(t, _)| *t)
    }

    /// Iterates all kebab-case names.
    pub fn names() -> impl Iterator<Item = &'static str> {
        Self::NAMES.iter().map(|(_, n)| *n)
    }

    /// Returns true for question types whose value is picked from options.
    #[must_use]
    pub fn is_choice(self) -> bool {
        matches!(self, Self::SingleChoice | Self::MultiChoice | Self::Dropdown)
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// HTTP method used to submit a form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    #[default]
    Post,
}

impl HttpMethod {
    /// Resolves a method name (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("get") {
            Some(Self::Get)
        } else if name.eq_ignore_ascii_case("post") {
            Some(Self::Post)
        } else {
            None
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

/// One selectable option of a choice question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionOption {
    id: String,
    value: String,
    label: String,
    hint: Option<String>,
    disabled: bool,
    dependencies: Vec<QuestionDependency>,
}

impl QuestionOption {
    /// Creates a new option.
    ///
    /// # Errors
    ///
    /// Returns error if the option id is empty.
    pub fn new(
        id: &str,
        value: impl Into<String>,
        label: impl Into<String>,
    ) -> Result<Self, ModelError> {
        if id.is_empty() {
            return Err(ModelError::EmptyOptionId);
        }
        Ok(Self {
            id: id.to_string(),
            value: value.into(),
            label: label.into(),
            hint: None,
            disabled: false,
            dependencies: Vec::new(),
        })
    }

    /// Sets the hint text.
    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Sets the initial disabled state.
    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Adds a dependency that acts on this option.
    #[must_use]
    pub fn with_dependency(mut self, dependency: QuestionDependency) -> Self {
        self.dependencies.push(dependency);
        self
    }

    /// Returns the option id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the submitted value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the display label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the hint text.
    #[must_use]
    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    /// Returns the initial disabled state.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Returns dependencies acting on this option.
    #[must_use]
    pub fn dependencies(&self) -> &[QuestionDependency] {
        &self.dependencies
    }
}

/// A single form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormQuestion {
    id: QuestionId,
    label: String,
    hint: Option<String>,
    question_type: QuestionType,
    required: bool,
    disabled: bool,
    max_length: Option<usize>,
    options: Vec<QuestionOption>,
    dependencies: Vec<QuestionDependency>,
    format: Option<String>,
}

impl FormQuestion {
    /// Creates a new optional, enabled question.
    #[must_use]
    pub fn new(id: QuestionId, label: impl Into<String>, question_type: QuestionType) -> Self {
        Self {
            id,
            label: label.into(),
            hint: None,
            question_type,
            required: false,
            disabled: false,
            max_length: None,
            options: Vec::new(),
            dependencies: Vec::new(),
            format: None,
        }
    }

    /// Sets the hint text.
    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Sets the static required flag.
    #[must_use]
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Sets the initial disabled state.
    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Sets the size or length constraint.
    #[must_use]
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Appends an option.
    #[must_use]
    pub fn with_option(mut self, option: QuestionOption) -> Self {
        self.options.push(option);
        self
    }

    /// Adds a dependency targeting this question.
    #[must_use]
    pub fn with_dependency(mut self, dependency: QuestionDependency) -> Self {
        self.dependencies.push(dependency);
        self
    }

    /// Sets the input format string (e.g., a date pattern).
    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Returns the question id.
    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    /// Returns the label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the hint text.
    #[must_use]
    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    /// Returns the question type.
    #[must_use]
    pub fn question_type(&self) -> QuestionType {
        self.question_type
    }

    /// Returns the static required flag.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Returns the initial disabled state.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Returns the size or length constraint.
    #[must_use]
    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    /// Returns the options in display order.
    #[must_use]
    pub fn options(&self) -> &[QuestionOption] {
        &self.options
    }

    /// Returns dependencies targeting this question.
    #[must_use]
    pub fn dependencies(&self) -> &[QuestionDependency] {
        &self.dependencies
    }

    /// Returns the input format string.
    #[must_use]
    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    /// Returns the document element id of one of this question's options.
    #[must_use]
    pub fn option_element_id(&self, option: &QuestionOption) -> String {
        format!("{}-{}", self.id, option.id())
    }
}

/// A titled group of questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSection {
    title: String,
    hint: Option<String>,
    questions: Vec<FormQuestion>,
}

impl FormSection {
    /// Creates an empty section.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            hint: None,
            questions: Vec::new(),
        }
    }

    /// Sets the hint text.
    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Appends a question.
    #[must_use]
    pub fn with_question(mut self, question: FormQuestion) -> Self {
        self.questions.push(question);
        self
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the hint text.
    #[must_use]
    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    /// Returns the questions in display order.
    #[must_use]
    pub fn questions(&self) -> &[FormQuestion] {
        &self.questions
    }
}

/// Where a dependency is declared inside a form.
#[derive(Debug, Clone, Copy)]
pub struct DependencySite<'a> {
    /// Index of the enclosing section.
    pub section_index: usize,
    /// Index of the question within its section.
    pub question_index: usize,
    /// Index of the option within its question, for per-option dependencies.
    pub option_index: Option<usize>,
    /// Index of the dependency within its list.
    pub dependency_index: usize,
    /// The question carrying the dependency (or owning the option).
    pub question: &'a FormQuestion,
    /// The option carrying the dependency, if any.
    pub option: Option<&'a QuestionOption>,
    /// The dependency itself.
    pub dependency: &'a QuestionDependency,
}

impl DependencySite<'_> {
    /// Returns a path such as `sections[0].questions[1].dependencies[0]`.
    #[must_use]
    pub fn path(&self) -> String {
        match self.option_index {
            Some(o) => format!(
                "sections[{}].questions[{}].options[{o}].dependencies[{}]",
                self.section_index, self.question_index, self.dependency_index
            ),
            None => format!(
                "sections[{}].questions[{}].dependencies[{}]",
                self.section_index, self.question_index, self.dependency_index
            ),
        }
    }

    /// Returns the document element the dependency acts on.
    #[must_use]
    pub fn element_id(&self) -> String {
        match self.option {
            Some(option) => self.question.option_element_id(option),
            None => self.question.id().to_string(),
        }
    }
}

/// A complete form: the aggregate root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormDefinition {
    id: String,
    title: String,
    action: String,
    method: HttpMethod,
    submit_text: String,
    sections: Vec<FormSection>,
}

impl FormDefinition {
    /// Creates a form, enforcing unique question ids across all sections.
    ///
    /// # Errors
    ///
    /// Returns every duplicated id.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        sections: Vec<FormSection>,
    ) -> Result<Self, Vec<ModelError>> {
        let mut seen = HashSet::new();
        let mut errors = Vec::new();
        for question in sections.iter().flat_map(FormSection::questions) {
            if !seen.insert(question.id().as_str()) {
                errors.push(ModelError::DuplicateQuestionId {
                    id: question.id().clone(),
                });
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Self {
            id: id.into(),
            title: title.into(),
            action: String::new(),
            method: HttpMethod::default(),
            submit_text: "Submit".to_string(),
            sections,
        })
    }

    /// Sets the submit action target.
    #[must_use]
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = action.into();
        self
    }

    /// Sets the HTTP method.
    #[must_use]
    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    /// Sets the submit button text.
    #[must_use]
    pub fn with_submit_text(mut self, text: impl Into<String>) -> Self {
        self.submit_text = text.into();
        self
    }

    /// Returns the form id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the submit action target.
    #[must_use]
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Returns the HTTP method.
    #[must_use]
    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// Returns the submit button text.
    #[must_use]
    pub fn submit_text(&self) -> &str {
        &self.submit_text
    }

    /// Returns the sections in display order.
    #[must_use]
    pub fn sections(&self) -> &[FormSection] {
        &self.sections
    }

    /// Iterates all questions in document order.
    pub fn questions(&self) -> impl Iterator<Item = &FormQuestion> {
        self.sections.iter().flat_map(FormSection::questions)
    }

    /// Finds a question by id.
    #[must_use]
    pub fn question(&self, id: &str) -> Option<&FormQuestion> {
        self.questions().find(|q| q.id() == id)
    }

    /// Returns true if the form has a question with this id.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.question(id).is_some()
    }

    /// Lists every dependency with its declaration site, in document order.
    ///
    /// Question-level dependencies come before the dependencies of that
    /// question's options.
    #[must_use]
    pub fn dependency_sites(&self) -> Vec<DependencySite<'_>> {
        let mut sites = Vec::new();
        for (section_index, section) in self.sections.iter().enumerate() {
            for (question_index, question) in section.questions().iter().enumerate() {
                for (dependency_index, dependency) in question.dependencies().iter().enumerate() {
                    sites.push(DependencySite {
                        section_index,
                        question_index,
                        option_index: None,
                        dependency_index,
                        question,
                        option: None,
                        dependency,
                    });
                }
                for (option_index, option) in question.options().iter().enumerate() {
                    for (dependency_index, dependency) in
                        option.dependencies().iter().enumerate()
                    {
                        sites.push(DependencySite {
                            section_index,
                            question_index,
                            option_index: Some(option_index),
                            dependency_index,
                            question,
                            option: Some(option),
                            dependency,
                        });
                    }
                }
            }
        }
        sites
    }
}
