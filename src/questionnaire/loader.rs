use std::collections::{HashMap, HashSet};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::questionnaire::{QuestionKind, QuestionnaireSchema};
use crate::schema::v1::Label;

#[derive(Debug, Deserialize)]
struct QuestionnaireFile {
    version: String,
    questionnaires: Vec<QuestionnaireSchema>,
}

pub fn load_builtin_v1() -> Result<(String, Vec<QuestionnaireSchema>)> {
    let content = include_str!("../../assets/questionnaires/v1.json");
    load_questionnaire_json(content, "built-in v1")
}

pub fn load_questionnaire_json(
    content: &str,
    source: &str,
) -> Result<(String, Vec<QuestionnaireSchema>)> {
    let file: QuestionnaireFile = serde_json::from_str(content)
        .with_context(|| format!("{}: malformed questionnaire JSON", source))?;
    if file.version.trim().is_empty() {
        bail!("{}: empty questionnaire version", source);
    }

    let mut labels = HashSet::new();
    for schema in &file.questionnaires {
        if !labels.insert(schema.label) {
            bail!("{}: duplicate questionnaire for label '{}'", source, schema.label);
        }
        validate_schema(schema, source)?;
    }
    Ok((file.version, file.questionnaires))
}

pub fn validate_schema(schema: &QuestionnaireSchema, source: &str) -> Result<()> {
    let label = schema.label;
    if schema.title.trim().is_empty() {
        bail!("{}: questionnaire '{}' has an empty title", source, label);
    }
    if schema.sections.is_empty() {
        bail!("{}: questionnaire '{}' has no sections", source, label);
    }

    let mut section_ids = HashSet::new();
    let mut question_ids = HashSet::new();
    for section in &schema.sections {
        if section.id.trim().is_empty() {
            bail!("{}: questionnaire '{}' has a section without id", source, label);
        }
        if !section_ids.insert(section.id.as_str()) {
            bail!("{}: '{}' duplicate section '{}'", source, label, section.id);
        }
        if section.questions.is_empty() {
            bail!("{}: '{}' section '{}' has no questions", source, label, section.id);
        }
        for q in &section.questions {
            if q.id.trim().is_empty() {
                bail!("{}: '{}' section '{}' has a question without id", source, label, section.id);
            }
            if !question_ids.insert(q.id.as_str()) {
                bail!("{}: '{}' duplicate question '{}'", source, label, q.id);
            }
            if q.prompt.trim().is_empty() {
                bail!("{}: '{}' question '{}' has an empty prompt", source, label, q.id);
            }
            if q.options.len() < 2 {
                bail!("{}: '{}' question '{}' needs at least 2 options", source, label, q.id);
            }
            let mut opts = HashSet::new();
            for opt in &q.options {
                if opt.trim().is_empty() {
                    bail!("{}: '{}' question '{}' has an empty option", source, label, q.id);
                }
                if !opts.insert(opt.as_str()) {
                    bail!(
                        "{}: '{}' question '{}' repeats option '{}'",
                        source,
                        label,
                        q.id,
                        opt
                    );
                }
            }
            if q.kind == QuestionKind::Boolean
                && !(q.options.len() == 2 && opts.contains("Yes") && opts.contains("No"))
            {
                bail!(
                    "{}: '{}' boolean question '{}' must offer exactly Yes and No",
                    source,
                    label,
                    q.id
                );
            }
        }
    }
    Ok(())
}

pub fn merge_schemas(
    mut builtin: Vec<QuestionnaireSchema>,
    user: Vec<QuestionnaireSchema>,
) -> Vec<QuestionnaireSchema> {
    if user.is_empty() {
        return builtin;
    }
    let mut user_map: HashMap<Label, QuestionnaireSchema> = HashMap::new();
    for schema in user {
        user_map.insert(schema.label, schema);
    }

    let mut merged = Vec::with_capacity(builtin.len() + user_map.len());
    for schema in builtin.drain(..) {
        if let Some(user_schema) = user_map.remove(&schema.label) {
            merged.push(user_schema);
        } else {
            merged.push(schema);
        }
    }
    let mut rest: Vec<_> = user_map.into_values().collect();
    rest.sort_by_key(|s| s.label);
    merged.extend(rest);
    merged
}
