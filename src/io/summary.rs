use anyhow::{Context, Result};

use crate::ctx::Ctx;
use crate::schema::v1::InsightReport;

pub fn format_summary(ctx: &Ctx) -> Result<String> {
    let version = env!("CARGO_PKG_VERSION");
    let classification = ctx
        .classification
        .as_ref()
        .context("classification missing")?;
    let insights = ctx.insights.as_ref().context("insights missing")?;

    let mut out = String::new();
    out.push_str(&format!("oncoinsight v{}\n", version));
    out.push_str(&format!("Image: {}\n", ctx.image.display()));
    out.push_str(&classification.message);
    if classification.is_mock {
        out.push_str(" (mock)");
    }
    out.push('\n');

    match insights {
        InsightReport::Benign(b) => {
            let risk = &b.risk_assessment;
            out.push_str(&format!(
                "Risk: {} (score {:.1})\n",
                risk.risk_level, risk.risk_score
            ));
            out.push_str(&format!("Follow-up: {}\n", b.follow_up_plan.timeline));
        }
        InsightReport::Malignant(m) => {
            out.push_str(&format!(
                "Stage: {}\n",
                m.clinical_insights.stage_estimate
            ));
            let p = &m.prognosis_indicators;
            let mock = match &m.survival_prediction {
                Some(s) if s.is_mock => " (mock)",
                _ => "",
            };
            out.push_str(&format!(
                "Survival: {:.1}% ({}){}\n",
                p.survival_percentage,
                p.survival_confidence.as_str(),
                mock
            ));
        }
    }
    if insights.is_fallback() {
        out.push_str("Insights: fallback\n");
    }

    Ok(out)
}
