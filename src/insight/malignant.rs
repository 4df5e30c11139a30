use crate::insight::benign::to_strings;
use crate::questionnaire::ResponseSet;
use crate::schema::v1::{
    ClinicalInsights, MalignantInsights, PrognosisIndicators, StageEstimate, SurvivalPrediction,
};

const NEXT_DIAGNOSTICS: [&str; 3] = ["Confirmatory biopsy", "Breast MRI", "Complete staging workup"];

const EARLY_TREATMENTS: [&str; 4] = [
    "Surgery (Lumpectomy or Mastectomy)",
    "Radiation therapy typically after lumpectomy",
    "Possible chemotherapy based on tumor characteristics",
    "Hormone therapy if hormone receptor positive",
];

const ADVANCED_TREATMENTS: [&str; 5] = [
    "Neoadjuvant chemotherapy to shrink tumor before surgery",
    "Surgery (Mastectomy typically recommended)",
    "Radiation therapy after surgery",
    "Adjuvant systemic therapy",
    "Targeted therapies based on biomarker testing",
];

const FIXED_NEXT_STEPS: [&str; 4] = [
    "Consult with breast surgeon and oncologist",
    "Complete diagnostic imaging (MRI, ultrasound)",
    "Schedule biopsy for confirmation",
    "Multidisciplinary team evaluation",
];

const PROGNOSIS_RECOMMENDATION: &str =
    "Early detection and comprehensive treatment significantly improve outcomes";

pub fn build(
    responses: &ResponseSet,
    confidence_pct: String,
    survival: SurvivalPrediction,
) -> MalignantInsights {
    let clinical_insights = assess_clinical(responses, confidence_pct);
    let treatment_recommendations = treatments(clinical_insights.stage_estimate);
    let prognosis_indicators = prognosis(responses, &survival);
    let mut next_steps = to_strings(&FIXED_NEXT_STEPS);
    next_steps.push(format!(
        "Predicted 5-year survival: {:.1}%",
        survival.survival_percentage
    ));
    MalignantInsights {
        clinical_insights,
        treatment_recommendations,
        prognosis_indicators,
        survival_prediction: Some(survival),
        next_steps,
        is_fallback: false,
    }
}

pub fn estimate_stage(tumor_size: &str, lymph_nodes: &str) -> StageEstimate {
    match (tumor_size, lymph_nodes) {
        ("Less than 2 cm", "Negative") => StageEstimate::StageI,
        ("2-5 cm", "Negative") => StageEstimate::StageII,
        (_, "Positive") => StageEstimate::StageIIToIII,
        _ => StageEstimate::AssessmentNeeded,
    }
}

pub fn assess_clinical(responses: &ResponseSet, image_confidence: String) -> ClinicalInsights {
    let stage = estimate_stage(
        responses.get("tumor_size"),
        responses.get("lymph_node_status"),
    );
    ClinicalInsights {
        stage_estimate: stage,
        stage_color: stage.color().to_string(),
        image_confidence,
        next_diagnostics: to_strings(&NEXT_DIAGNOSTICS),
    }
}

/// Every "Likely Stage ..." estimate shares the early list; only an unstaged case escalates.
pub fn treatments(stage: StageEstimate) -> Vec<String> {
    match stage {
        StageEstimate::StageI | StageEstimate::StageII | StageEstimate::StageIIToIII => {
            to_strings(&EARLY_TREATMENTS)
        }
        StageEstimate::AssessmentNeeded => to_strings(&ADVANCED_TREATMENTS),
    }
}

pub fn positive_factors(responses: &ResponseSet) -> Vec<String> {
    let mut factors = Vec::new();

    if responses.get("family_history") == "No" {
        factors.push("No family history of breast cancer");
    }
    let age_group = responses.get("age_group");
    if ["30-39", "40-49"].iter().any(|g| age_group.contains(g)) {
        factors.push("Younger age group (better treatment tolerance)");
    }
    // Not asked by the built-in questionnaire; honored when a custom one supplies it.
    if responses.get("symptoms_duration") == "Less than 1 month" {
        factors.push("Early symptom recognition");
    }
    if responses.get("tumor_size").contains("Less than 2 cm") {
        factors.push("Small tumor size");
    }
    if responses.get("lymph_node_status") == "Negative" {
        factors.push("No lymph node involvement indicated");
    }

    to_strings(&factors)
}

pub fn prognosis(responses: &ResponseSet, survival: &SurvivalPrediction) -> PrognosisIndicators {
    PrognosisIndicators {
        positive_factors: positive_factors(responses),
        survival_percentage: survival.survival_percentage,
        survival_confidence: survival.confidence,
        survival_message: survival.message.clone(),
        recommendation: PROGNOSIS_RECOMMENDATION.to_string(),
    }
}
