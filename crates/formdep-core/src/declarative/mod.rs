//! Declarative form definitions loaded from TOML or JSON files.
//!
//! # Architecture
//!
//! ```text
//! *.form.toml / *.form.json
//!   ↓ serde (DTO layer)
//! form_dto types
//!   ↓ validate + convert
//! FormDefinition (pure domain model)
//! ```

use std::path::Path;

pub mod form_dto;
pub mod loader;

/// Errors from parsing and loading a form definition.
#[derive(Debug, thiserror::Error)]
pub enum LoadFormError {
    /// Reading the file failed.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The file being read.
        path: String,
        /// The underlying error.
        source: std::io::Error,
    },

    /// TOML deserialization failed.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON deserialization failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The file extension is neither `.toml` nor `.json`.
    #[error("unsupported form file `{0}`, expected .toml or .json")]
    UnsupportedFormat(String),

    /// Domain model validation failed.
    #[error("{0}")]
    Load(#[from] loader::LoadError),
}

/// Parses a form definition from TOML.
///
/// # Errors
///
/// Returns an error if parsing or model validation fails.
pub fn load_form_from_toml(content: &str) -> Result<crate::model::FormDefinition, LoadFormError> {
    let dto: form_dto::FormDto = toml::from_str(content)?;
    Ok(loader::load(dto)?)
}

/// Parses a form definition from JSON.
///
/// # Errors
///
/// Returns an error if parsing or model validation fails.
pub fn load_form_from_json(content: &str) -> Result<crate::model::FormDefinition, LoadFormError> {
    let dto: form_dto::FormDto = serde_json::from_str(content)?;
    Ok(loader::load(dto)?)
}

/// Reads a form definition file, choosing the format by extension.
///
/// # Errors
///
/// Returns an error if the file cannot be read, has an unknown extension,
/// or fails to load.
pub fn load_form_file(path: &Path) -> Result<crate::model::FormDefinition, LoadFormError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadFormError::Io {
        path: path.display().to_string(),
        source,
    })?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => load_form_from_toml(&content),
        Some("json") => load_form_from_json(&content),
        _ => Err(LoadFormError::UnsupportedFormat(path.display().to_string())),
    }
}

/// Returns true for file names matching `*.form.toml` or `*.form.json`.
#[must_use]
pub fn is_form_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(".form.toml") || n.ends_with(".form.json"))
}
