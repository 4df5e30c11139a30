use std::path::Path;

use anyhow::{Context, Result};

use crate::ctx::Ctx;
use crate::schema::v1::AnalysisReportV1;

pub fn build_report(ctx: &Ctx) -> AnalysisReportV1 {
    let mut report = AnalysisReportV1::empty(
        env!("CARGO_PKG_VERSION"),
        &ctx.image.display().to_string(),
    );
    report.report_path = ctx.report.report_path.clone();
    report.classification = ctx.classification.clone();
    report.questionnaire = ctx.questionnaire.clone();
    report.responses = ctx
        .responses
        .as_ref()
        .map(|r| r.to_map())
        .unwrap_or_default();
    report.insights = ctx.insights.clone();
    report.warnings = ctx.warnings.clone();
    report
}

pub fn write_json(path: &Path, report: &AnalysisReportV1) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(writer, report)?;
    Ok(())
}
