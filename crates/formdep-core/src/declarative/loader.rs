//! DTO → Domain model conversion with validation.

use crate::model::{
    DependencyAction, FormDefinition, FormQuestion, FormSection, HttpMethod, ModelError,
    QuestionDependency, QuestionId, QuestionOption, QuestionType,
};

use super::form_dto::{DependencyDto, FormDto, OptionDto, QuestionDto, SectionDto};

/// Errors during DTO → Domain conversion.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// A field-level validation error.
    #[error("{context}: {source}")]
    Validation {
        /// Where the error occurred (e.g., "sections[0].questions[1].id").
        context: String,
        /// The underlying model error.
        source: ModelError,
    },

    /// Unknown question type name.
    #[error(
        "{context}: unknown question type `{value}`, expected one of: {}",
        QuestionType::names().collect::<Vec<_>>().join(", ")
    )]
    UnknownQuestionType {
        /// Where the error occurred.
        context: String,
        /// The invalid value.
        value: String,
    },

    /// Unknown dependency action name.
    #[error("{context}: unknown action `{value}`, expected one of: {}", action_names())]
    UnknownAction {
        /// Where the error occurred.
        context: String,
        /// The invalid value.
        value: String,
    },

    /// Unknown HTTP method name.
    #[error("{context}: unknown method `{value}`, expected: get, post")]
    UnknownMethod {
        /// Where the error occurred.
        context: String,
        /// The invalid value.
        value: String,
    },

    /// Errors from aggregate root construction.
    #[error("form validation errors:\n{}", format_errors(.0))]
    Form(Vec<ModelError>),
}

fn format_errors(errors: &[ModelError]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn action_names() -> String {
    DependencyAction::ALL
        .iter()
        .map(|a| a.name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Converts a `FormDto` to a validated `FormDefinition`.
///
/// # Errors
///
/// Returns the first error encountered during conversion.
pub fn load(dto: FormDto) -> Result<FormDefinition, LoadError> {
    let method = match &dto.method {
        Some(name) => HttpMethod::from_name(name).ok_or_else(|| LoadError::UnknownMethod {
            context: "method".to_string(),
            value: name.clone(),
        })?,
        None => HttpMethod::default(),
    };

    let sections = dto
        .sections
        .into_iter()
        .enumerate()
        .map(|(i, s)| convert_section(s, i))
        .collect::<Result<Vec<_>, _>>()?;

    let mut form = FormDefinition::new(dto.id, dto.title, sections)
        .map_err(LoadError::Form)?
        .with_method(method);
    if let Some(action) = dto.action {
        form = form.with_action(action);
    }
    if let Some(text) = dto.submit_text {
        form = form.with_submit_text(text);
    }
    Ok(form)
}

fn convert_section(dto: SectionDto, index: usize) -> Result<FormSection, LoadError> {
    let ctx = format!("sections[{index}]");
    let mut section = FormSection::new(dto.title);
    if let Some(hint) = dto.hint {
        section = section.with_hint(hint);
    }
    for (j, q) in dto.questions.into_iter().enumerate() {
        section = section.with_question(convert_question(q, &format!("{ctx}.questions[{j}]"))?);
    }
    Ok(section)
}

fn convert_question(dto: QuestionDto, ctx: &str) -> Result<FormQuestion, LoadError> {
    let id = question_id(&dto.id, &format!("{ctx}.id"))?;
    let question_type =
        QuestionType::from_name(&dto.question_type).ok_or_else(|| LoadError::UnknownQuestionType {
            context: format!("{ctx}.type"),
            value: dto.question_type.clone(),
        })?;

    let mut question = FormQuestion::new(id.clone(), dto.label, question_type)
        .with_required(dto.required)
        .with_disabled(dto.disabled);
    if let Some(hint) = dto.hint {
        question = question.with_hint(hint);
    }
    if let Some(max) = dto.max_length {
        question = question.with_max_length(max);
    }
    if let Some(format) = dto.format {
        question = question.with_format(format);
    }

    for (k, o) in dto.options.into_iter().enumerate() {
        question = question.with_option(convert_option(o, &id, &format!("{ctx}.options[{k}]"))?);
    }
    for (k, d) in dto.dependencies.into_iter().enumerate() {
        let dependency = convert_dependency(d, &id, &format!("{ctx}.dependencies[{k}]"))?;
        question = question.with_dependency(dependency);
    }
    Ok(question)
}

fn convert_option(dto: OptionDto, owner: &QuestionId, ctx: &str) -> Result<QuestionOption, LoadError> {
    let label = dto.label.unwrap_or_else(|| dto.value.clone());
    let mut option = QuestionOption::new(&dto.id, dto.value, label).map_err(|e| {
        LoadError::Validation {
            context: format!("{ctx}.id"),
            source: e,
        }
    })?;
    if let Some(hint) = dto.hint {
        option = option.with_hint(hint);
    }
    option = option.with_disabled(dto.disabled);
    for (k, d) in dto.dependencies.into_iter().enumerate() {
        let dependency = convert_dependency(d, owner, &format!("{ctx}.dependencies[{k}]"))?;
        option = option.with_dependency(dependency);
    }
    Ok(option)
}

fn convert_dependency(
    dto: DependencyDto,
    carrier: &QuestionId,
    ctx: &str,
) -> Result<QuestionDependency, LoadError> {
    let source = question_id(&dto.source, &format!("{ctx}.source"))?;
    let target = match &dto.target {
        Some(t) => question_id(t, &format!("{ctx}.target"))?,
        None => carrier.clone(),
    };
    let action = DependencyAction::from_name(&dto.action).ok_or_else(|| LoadError::UnknownAction {
        context: format!("{ctx}.action"),
        value: dto.action.clone(),
    })?;

    let dependency = QuestionDependency::new(source, target, dto.when, action);
    Ok(match dto.set_value {
        Some(value) => dependency.with_set_value(value),
        None => dependency,
    })
}

fn question_id(raw: &str, context: &str) -> Result<QuestionId, LoadError> {
    QuestionId::new(raw).map_err(|e| LoadError::Validation {
        context: context.to_string(),
        source: e,
    })
}
