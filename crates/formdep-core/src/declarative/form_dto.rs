//! Form file deserialization types (DTO layer).
//!
//! These types exist solely for serde deserialization of `*.form.toml` and
//! `*.form.json` files. They are converted to domain model types via the
//! loader.

use serde::Deserialize;

/// Raw representation of a form file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FormDto {
    /// Form identifier.
    pub id: String,
    /// Form title.
    pub title: String,
    /// Submit action target.
    #[serde(default)]
    pub action: Option<String>,
    /// HTTP method name (default: "post").
    #[serde(default)]
    pub method: Option<String>,
    /// Submit button text.
    #[serde(default)]
    pub submit_text: Option<String>,
    /// Ordered sections.
    #[serde(default)]
    pub sections: Vec<SectionDto>,
}

/// Raw representation of a form section.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SectionDto {
    /// Section title.
    pub title: String,
    /// Optional hint.
    #[serde(default)]
    pub hint: Option<String>,
    /// Ordered questions.
    #[serde(default)]
    pub questions: Vec<QuestionDto>,
}

/// Raw representation of a question.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct QuestionDto {
    /// Question id, unique within the form.
    pub id: String,
    /// Label text.
    pub label: String,
    /// Question type name (e.g., "text", "single-choice").
    #[serde(rename = "type", default = "default_question_type")]
    pub question_type: String,
    /// Optional hint.
    #[serde(default)]
    pub hint: Option<String>,
    /// Statically required.
    #[serde(default)]
    pub required: bool,
    /// Statically disabled.
    #[serde(default)]
    pub disabled: bool,
    /// Maximum input length.
    #[serde(default)]
    pub max_length: Option<usize>,
    /// Input format hint.
    #[serde(default)]
    pub format: Option<String>,
    /// Options for choice questions.
    #[serde(default)]
    pub options: Vec<OptionDto>,
    /// Dependencies carried by this question.
    #[serde(default)]
    pub dependencies: Vec<DependencyDto>,
}

/// Raw representation of a question option.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OptionDto {
    /// Option id.
    pub id: String,
    /// Submitted value.
    pub value: String,
    /// Label text (defaults to the value).
    #[serde(default)]
    pub label: Option<String>,
    /// Optional hint.
    #[serde(default)]
    pub hint: Option<String>,
    /// Statically disabled.
    #[serde(default)]
    pub disabled: bool,
    /// Dependencies carried by this option.
    #[serde(default)]
    pub dependencies: Vec<DependencyDto>,
}

/// Raw representation of a dependency.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DependencyDto {
    /// Source question id.
    pub source: String,
    /// Target question id (defaults to the carrying question).
    #[serde(default)]
    pub target: Option<String>,
    /// Trigger value compared with the source value.
    #[serde(default)]
    pub when: String,
    /// Action name (e.g., "require", "clear-value").
    pub action: String,
    /// Value written by `set-value`.
    #[serde(default)]
    pub set_value: Option<String>,
}

fn default_question_type() -> String {
    "text".to_string()
}
