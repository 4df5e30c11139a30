use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::ctx::Ctx;
use crate::pipeline::Stage;
use crate::schema::v1::InsightReport;
use crate::services::Services;

pub struct Stage3Insight {
    services: Arc<Services>,
}

impl Stage3Insight {
    pub fn new(services: Arc<Services>) -> Self {
        Self { services }
    }
}

impl Stage for Stage3Insight {
    fn name(&self) -> &'static str {
        "stage3_insight"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let classification = ctx
            .classification
            .as_ref()
            .context("classification missing")?;
        let responses = ctx.responses.as_ref().context("responses missing")?;

        let report = self.services.insight.generate(
            classification.label,
            responses,
            classification.confidence,
        );
        if report.is_fallback() {
            ctx.warnings
                .push(format!("{} insights replaced by fallback report", report.label()));
        }
        if let InsightReport::Malignant(m) = &report {
            if m.survival_prediction.as_ref().is_some_and(|s| s.is_mock) {
                ctx.warnings
                    .push("survival prediction is a mock estimate".to_string());
            }
        }
        info!(
            label = %report.label(),
            is_fallback = report.is_fallback(),
            "insights_ready"
        );
        ctx.insights = Some(report);
        Ok(())
    }
}
