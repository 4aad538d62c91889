//! Decoded questionnaire answers.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// Errors raised while decoding a submission payload.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("submission is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("submission must be a JSON object keyed by field name")]
    NotAnObject,
    #[error("field '{0}' holds a nested value; answers must be scalars")]
    NestedValue(String),
}

/// Immutable mapping from field name to answer text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Submission {
    answers: BTreeMap<String, String>,
}

impl Submission {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a JSON object of scalar answers.
    ///
    /// Numbers and booleans keep their JSON spelling and `null` becomes an empty answer.
    pub fn from_json(raw: &str) -> Result<Self, SubmissionError> {
        let value: Value = serde_json::from_str(raw)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, SubmissionError> {
        let Value::Object(map) = value else {
            return Err(SubmissionError::NotAnObject);
        };

        let mut answers = BTreeMap::new();
        for (field, value) in map {
            let answer = match value {
                Value::String(text) => text,
                Value::Null => String::new(),
                Value::Bool(flag) => flag.to_string(),
                Value::Number(number) => number.to_string(),
                Value::Array(_) | Value::Object(_) => {
                    return Err(SubmissionError::NestedValue(field))
                }
            };
            answers.insert(field, answer);
        }

        Ok(Self { answers })
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.answers.get(field).map(String::as_str)
    }

    /// Answer for `field` when it carries more than whitespace.
    pub fn answer(&self, field: &str) -> Option<&str> {
        self.get(field).filter(|value| !value.trim().is_empty())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.answers.contains_key(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.answers.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.answers
            .iter()
            .map(|(field, value)| (field.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Submission
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            answers: iter
                .into_iter()
                .map(|(field, value)| (field.into(), value.into()))
                .collect(),
        }
    }
}
