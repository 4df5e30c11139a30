use oncoinsight::ctx::Ctx;
use oncoinsight::insight::InsightEngine;
use oncoinsight::io::summary::format_summary;
use oncoinsight::questionnaire::ResponseSet;
use oncoinsight::schema::v1::{ClassificationResult, Label};
use oncoinsight::survival::{FeatureMapper, SurvivalPredictor};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn engine() -> InsightEngine {
    InsightEngine::new(FeatureMapper::builtin().unwrap(), SurvivalPredictor::mock_only())
}

fn ctx() -> Ctx {
    Ctx::new(
        std::path::PathBuf::from("scan.png"),
        std::path::PathBuf::from("out"),
        false,
        "0.0.0-test",
    )
}

#[test]
fn benign_summary_format() {
    let mut ctx = ctx();
    ctx.classification = Some(ClassificationResult::from_score(0.1));
    let responses = ResponseSet::from_pairs([("family_history", "Yes")]);
    ctx.insights = Some(engine().generate(Label::Benign, &responses, 0.9));

    let s = format_summary(&ctx).unwrap();
    assert!(s.contains("oncoinsight v"));
    assert!(s.contains("Image: scan.png"));
    assert!(s.contains("Prediction: BENIGN with 90.0% confidence"));
    assert!(s.contains("Risk: Moderate (score 2.0)"));
    assert!(s.contains("Follow-up: Annual screening recommended"));
    assert!(!s.contains("fallback"));
}

#[test]
fn malignant_summary_marks_mock_survival() {
    let mut ctx = ctx();
    ctx.classification = Some(ClassificationResult::from_score(0.95));
    let responses = ResponseSet::from_pairs([("lymph_node_status", "Positive")]);
    let mut rng = StdRng::seed_from_u64(5);
    ctx.insights = Some(engine().generate_with_rng(Label::Malignant, &responses, 0.95, &mut rng));

    let s = format_summary(&ctx).unwrap();
    assert!(s.contains("Stage: Likely Stage II-III"));
    assert!(s.contains("Survival: "));
    assert!(s.contains("(medium) (mock)"));
}

#[test]
fn summary_requires_classification() {
    assert!(format_summary(&ctx()).is_err());
}
