//! Submitted form data as seen by the server.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Field values posted with a form, keyed by question id.
///
/// Values keep whatever shape the request pipeline produced: strings,
/// lists for multi-choice fields, booleans for single checkboxes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmittedData {
    values: HashMap<String, Value>,
}

impl SubmittedData {
    /// Creates an empty submission.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a submission from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a JSON object.
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Sets a field value.
    pub fn insert(&mut self, id: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(id.into(), value.into());
    }

    /// Sets a field value, builder style.
    #[must_use]
    pub fn with(mut self, id: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(id, value);
        self
    }

    /// Returns the raw value of a field. JSON `null` counts as absent.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Value> {
        self.values.get(id).filter(|v| !v.is_null())
    }

    /// Returns the string form of a field, or `None` if absent.
    #[must_use]
    pub fn text(&self, id: &str) -> Option<String> {
        self.get(id).map(display_value)
    }

    /// Returns true if the field is absent, blank, or an empty list.
    #[must_use]
    pub fn is_blank(&self, id: &str) -> bool {
        match self.get(id) {
            None => true,
            Some(Value::String(s)) => s.trim().is_empty(),
            Some(Value::Array(items)) => items.iter().all(|v| display_value(v).trim().is_empty()),
            Some(_) => false,
        }
    }

    /// Returns the number of submitted fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if nothing was submitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for SubmittedData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Reduces a submitted value to the string compared against triggers.
///
/// Lists join their elements with `,` in submission order; `null` is empty.
#[must_use]
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_mixed_shapes() {
        let data = SubmittedData::from_json(
            r#"{"country": "CA", "contact": ["sms", "email"], "consent": true, "age": 42, "note": null}"#,
        )
        .unwrap();
        assert_eq!(data.text("country").as_deref(), Some("CA"));
        assert_eq!(data.text("contact").as_deref(), Some("sms,email"));
        assert_eq!(data.text("consent").as_deref(), Some("true"));
        assert_eq!(data.text("age").as_deref(), Some("42"));
        assert_eq!(data.text("note"), None);
        assert_eq!(data.text("missing"), None);
    }

    #[test]
    fn rejects_non_object() {
        assert!(SubmittedData::from_json("[1, 2]").is_err());
    }

    #[test]
    fn blank_detection() {
        let data = SubmittedData::new()
            .with("empty", "")
            .with("spaces", "   ")
            .with("list", json!([]))
            .with("blank_list", json!(["", " "]))
            .with("filled", "x")
            .with("flag", false)
            .with("null", Value::Null);
        assert!(data.is_blank("empty"));
        assert!(data.is_blank("spaces"));
        assert!(data.is_blank("list"));
        assert!(data.is_blank("blank_list"));
        assert!(data.is_blank("null"));
        assert!(data.is_blank("absent"));
        assert!(!data.is_blank("filled"));
        assert!(!data.is_blank("flag"));
    }

    #[test]
    fn collects_from_pairs() {
        let data: SubmittedData = [("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(data.len(), 2);
        assert!(!data.is_empty());
    }
}
