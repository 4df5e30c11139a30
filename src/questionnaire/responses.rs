use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::questionnaire::QuestionnaireSchema;

/// Answers keyed by question id. Unanswered questions hold an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseSet {
    answers: BTreeMap<String, String>,
}

impl ResponseSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            answers: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Captures one answer per schema question; blanks and unknowns become warnings.
    pub fn capture(
        schema: &QuestionnaireSchema,
        raw: &BTreeMap<String, String>,
    ) -> (Self, Vec<String>) {
        let mut answers = BTreeMap::new();
        let mut warnings = Vec::new();

        for q in schema.questions() {
            let value = raw
                .get(&q.id)
                .map(|v| v.trim().to_string())
                .unwrap_or_default();
            if value.is_empty() {
                if q.required {
                    warnings.push(format!("required question '{}' left unanswered", q.id));
                }
            } else if !q.options.iter().any(|o| o == &value) {
                warnings.push(format!(
                    "answer '{}' for '{}' is not one of the listed options",
                    value, q.id
                ));
            }
            answers.insert(q.id.clone(), value);
        }

        for key in raw.keys() {
            if schema.question(key).is_none() {
                warnings.push(format!(
                    "answer '{}' ignored: not part of the {} questionnaire",
                    key, schema.label
                ));
            }
        }

        (Self { answers }, warnings)
    }

    pub fn get(&self, id: &str) -> &str {
        self.answers.get(id).map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.answers.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.answers.clone()
    }
}
