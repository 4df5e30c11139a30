mod loader;
mod responses;

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::schema::v1::Label;

pub use loader::{load_builtin_v1, load_questionnaire_json, merge_schemas, validate_schema};
pub use responses::ResponseSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Select,
    MultiChoice,
    Boolean,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub kind: QuestionKind,
    pub options: Vec<String>,
    #[serde(default)]
    pub required: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionnaireSchema {
    pub label: Label,
    pub title: String,
    pub sections: Vec<Section>,
}

impl QuestionnaireSchema {
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.sections.iter().flat_map(|s| s.questions.iter())
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions().find(|q| q.id == id)
    }
}

#[derive(Debug, Clone)]
pub struct QuestionnaireSet {
    pub version: String,
    pub schemas: Vec<QuestionnaireSchema>,
}

impl QuestionnaireSet {
    pub fn select(&self, label: Label) -> Result<&QuestionnaireSchema> {
        self.schemas
            .iter()
            .find(|s| s.label == label)
            .ok_or_else(|| anyhow::anyhow!("no questionnaire defined for label '{}'", label))
    }
}

pub fn load_builtin() -> Result<QuestionnaireSet> {
    let (version, schemas) = load_builtin_v1()?;
    Ok(QuestionnaireSet { version, schemas })
}

pub fn load_user(path: &Path) -> Result<Vec<QuestionnaireSchema>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read questionnaire file {}", path.display()))?;
    let (_, schemas) = load_questionnaire_json(&content, &path.display().to_string())?;
    Ok(schemas)
}

/// Built-in catalog, optionally overlaid with a user file, checked so both labels resolve.
pub fn load_catalog(user: Option<&Path>) -> Result<QuestionnaireSet> {
    let mut set = load_builtin()?;
    if let Some(path) = user {
        let user_schemas = load_user(path)?;
        set.schemas = merge_schemas(set.schemas, user_schemas);
        set.version = format!("{}+user", set.version);
    }
    for label in [Label::Benign, Label::Malignant] {
        set.select(label)?;
    }
    Ok(set)
}
