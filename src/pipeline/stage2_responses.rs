use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::ctx::Ctx;
use crate::io;
use crate::pipeline::Stage;
use crate::questionnaire::ResponseSet;
use crate::schema::v1::QuestionnaireRef;
use crate::services::Services;

pub struct Stage2Responses {
    services: Arc<Services>,
}

impl Stage2Responses {
    pub fn new(services: Arc<Services>) -> Self {
        Self { services }
    }
}

impl Stage for Stage2Responses {
    fn name(&self) -> &'static str {
        "stage2_responses"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let label = ctx
            .classification
            .as_ref()
            .map(|c| c.label)
            .context("classification missing")?;
        let catalog = &self.services.questionnaires;
        let schema = catalog.select(label)?;

        let mut raw = match &ctx.answers_path {
            Some(path) => io::read_answers(path)?,
            None => Default::default(),
        };
        for (key, value) in &ctx.answer_overrides {
            raw.insert(key.clone(), value.clone());
        }

        let (responses, warnings) = ResponseSet::capture(schema, &raw);
        for w in &warnings {
            warn!(warning = %w, "questionnaire_response");
        }
        info!(
            label = %label,
            questions = responses.len(),
            answered = responses.iter().filter(|(_, v)| !v.is_empty()).count(),
            "responses_captured"
        );

        ctx.warnings.extend(warnings);
        ctx.questionnaire = Some(QuestionnaireRef {
            label,
            title: schema.title.clone(),
            version: catalog.version.clone(),
        });
        ctx.responses = Some(responses);
        Ok(())
    }
}
