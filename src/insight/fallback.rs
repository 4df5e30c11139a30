use crate::insight::benign::to_strings;
use crate::schema::v1::{
    BenignInsights, ClinicalInsights, ConfidenceBand, FollowUpPlan, InsightReport,
    MalignantInsights, PrognosisIndicators, RiskAssessment, RiskLevel, StageEstimate,
};

pub fn benign() -> InsightReport {
    InsightReport::Benign(BenignInsights {
        risk_assessment: RiskAssessment {
            risk_level: RiskLevel::Moderate,
            risk_color: RiskLevel::Moderate.color().to_string(),
            risk_score: 2.0,
            risk_factors: to_strings(&["Standard risk assessment"]),
            image_confidence: "85.0%".to_string(),
        },
        lifestyle_recommendations: to_strings(&[
            "Maintain healthy lifestyle with balanced diet",
            "Regular exercise (150 minutes/week)",
            "Limit alcohol consumption",
            "Avoid tobacco products",
            "Monthly self-breast exams",
        ]),
        follow_up_plan: FollowUpPlan {
            timeline: "Annual screening recommended".to_string(),
            recommendations: to_strings(&["Clinical breast exam", "Screening mammogram"]),
        },
        general_advice: to_strings(&[
            "Consult with healthcare provider for personalized medical advice",
            "Maintain regular screening schedule",
            "Report any changes in breast tissue promptly",
        ]),
        is_fallback: true,
    })
}

pub fn malignant() -> InsightReport {
    let stage = StageEstimate::AssessmentNeeded;
    InsightReport::Malignant(MalignantInsights {
        clinical_insights: ClinicalInsights {
            stage_estimate: stage,
            stage_color: stage.color().to_string(),
            image_confidence: "90.0%".to_string(),
            next_diagnostics: to_strings(&["Consult with specialist for complete evaluation"]),
        },
        treatment_recommendations: to_strings(&[
            "Specialist consultation required for treatment planning",
        ]),
        prognosis_indicators: PrognosisIndicators {
            positive_factors: to_strings(&["Early detection improves outcomes"]),
            survival_percentage: 75.0,
            survival_confidence: ConfidenceBand::Medium,
            survival_message: "Comprehensive evaluation needed for accurate prognosis".to_string(),
            recommendation: "Comprehensive medical evaluation needed".to_string(),
        },
        survival_prediction: None,
        next_steps: to_strings(&[
            "Consult with oncologist",
            "Complete diagnostic workup",
            "Multidisciplinary team evaluation",
        ]),
        is_fallback: true,
    })
}
