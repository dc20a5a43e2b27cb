//! Serialized dependency payload carried by rendered fields.
//!
//! Each rendered field that is the target of dependencies carries a JSON
//! array such as:
//!
//! ```json
//! [{"sourceQuestionId":"country","targetQuestionId":"province",
//!   "triggerValue":"CA","action":0,"setValue":null}]
//! ```
//!
//! `action` uses the ordinals of [`DependencyAction::ordinal`].

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::model::{DependencyAction, ModelError, QuestionDependency, QuestionId};

/// Wire representation of one dependency.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireDependency {
    source_question_id: String,
    target_question_id: String,
    #[serde(default)]
    trigger_value: Option<String>,
    action: i64,
    #[serde(default)]
    set_value: Option<String>,
}

impl From<&QuestionDependency> for WireDependency {
    fn from(d: &QuestionDependency) -> Self {
        Self {
            source_question_id: d.source().to_string(),
            target_question_id: d.target().to_string(),
            trigger_value: Some(d.trigger_value().to_string()),
            action: i64::from(d.action().ordinal()),
            set_value: d.set_value().map(String::from),
        }
    }
}

impl TryFrom<WireDependency> for QuestionDependency {
    type Error = PayloadError;

    fn try_from(w: WireDependency) -> Result<Self, Self::Error> {
        let action = DependencyAction::from_ordinal(w.action)
            .ok_or(PayloadError::UnsupportedAction { ordinal: w.action })?;
        let source = QuestionId::new(&w.source_question_id)?;
        let target = QuestionId::new(&w.target_question_id)?;
        let dependency =
            QuestionDependency::new(source, target, w.trigger_value.unwrap_or_default(), action);
        Ok(match w.set_value {
            Some(v) => dependency.with_set_value(v),
            None => dependency,
        })
    }
}

/// Errors decoding a dependency payload.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    /// The payload is not valid JSON of the expected shape.
    #[error("malformed dependency payload: {0}")]
    Json(#[from] serde_json::Error),

    /// The action ordinal is not in the fixed table.
    #[error("unsupported action ordinal {ordinal}")]
    UnsupportedAction {
        /// The unknown ordinal.
        ordinal: i64,
    },

    /// A question id in the payload is invalid.
    #[error("invalid question id in payload: {0}")]
    InvalidId(#[from] ModelError),
}

/// Serializes dependencies into the payload attribute value.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn encode(dependencies: &[QuestionDependency]) -> Result<String, PayloadError> {
    let wire: Vec<WireDependency> = dependencies.iter().map(WireDependency::from).collect();
    Ok(serde_json::to_string(&wire)?)
}

/// Strictly decodes a payload. The first bad entry fails the whole payload.
///
/// # Errors
///
/// Returns an error for malformed JSON, unsupported actions, or invalid ids.
pub fn decode(payload: &str) -> Result<Vec<QuestionDependency>, PayloadError> {
    let wire: Vec<WireDependency> = serde_json::from_str(payload)?;
    wire.into_iter().map(QuestionDependency::try_from).collect()
}

/// Decodes a payload the way the runtime does: never fails.
///
/// A malformed payload yields no dependencies. Individual entries with an
/// unsupported action or a bad shape are logged and dropped; the remaining
/// entries survive.
#[must_use]
pub fn decode_lenient(field_id: &str, payload: &str) -> Vec<QuestionDependency> {
    let entries: Vec<serde_json::Value> = match serde_json::from_str(payload) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Ignoring malformed dependency payload on `{field_id}`: {e}");
            return Vec::new();
        }
    };

    entries
        .into_iter()
        .enumerate()
        .filter_map(|(i, entry)| {
            let decoded = serde_json::from_value::<WireDependency>(entry)
                .map_err(PayloadError::from)
                .and_then(QuestionDependency::try_from);
            match decoded {
                Ok(dependency) => Some(dependency),
                Err(PayloadError::UnsupportedAction { ordinal }) => {
                    warn!("Unsupported dependency action {ordinal} on `{field_id}`[{i}], ignoring");
                    None
                }
                Err(e) => {
                    warn!("Ignoring dependency `{field_id}`[{i}]: {e}");
                    None
                }
            }
        })
        .collect()
}
