use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    Benign,
    Malignant,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Benign => "benign",
            Label::Malignant => "malignant",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub label: Label,
    pub confidence: f64,
    pub raw_score: f64,
    pub message: String,
    pub is_mock: bool,
}

impl ClassificationResult {
    /// Interprets a scalar P(malignant) from the image model.
    pub fn from_score(p: f64) -> Self {
        let label = if p > 0.5 {
            Label::Malignant
        } else {
            Label::Benign
        };
        let confidence = ((p - 0.5).abs() + 0.5).clamp(0.0, 1.0);
        Self {
            label,
            confidence,
            raw_score: p,
            message: prediction_message(label, confidence),
            is_mock: false,
        }
    }
}

pub fn prediction_message(label: Label, confidence: f64) -> String {
    format!(
        "Prediction: {} with {:.1}% confidence",
        label.as_str().to_ascii_uppercase(),
        confidence * 100.0
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceBand {
    Low,
    Medium,
    High,
}

impl ConfidenceBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceBand::Low => "low",
            ConfidenceBand::Medium => "medium",
            ConfidenceBand::High => "high",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurvivalPrediction {
    pub survival_percentage: f64,
    pub confidence: ConfidenceBand,
    pub message: String,
    pub is_mock: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn color(&self) -> &'static str {
        match self {
            RiskLevel::Low => "green",
            RiskLevel::Moderate => "orange",
            RiskLevel::High => "red",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => f.write_str("Low"),
            RiskLevel::Moderate => f.write_str("Moderate"),
            RiskLevel::High => f.write_str("High"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_level: RiskLevel,
    pub risk_color: String,
    pub risk_score: f64,
    pub risk_factors: Vec<String>,
    pub image_confidence: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowUpPlan {
    pub timeline: String,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenignInsights {
    pub risk_assessment: RiskAssessment,
    pub lifestyle_recommendations: Vec<String>,
    pub follow_up_plan: FollowUpPlan,
    pub general_advice: Vec<String>,
    pub is_fallback: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StageEstimate {
    #[serde(rename = "Likely Stage I")]
    StageI,
    #[serde(rename = "Likely Stage II")]
    StageII,
    #[serde(rename = "Likely Stage II-III")]
    StageIIToIII,
    #[serde(rename = "Clinical assessment needed")]
    AssessmentNeeded,
}

impl StageEstimate {
    pub fn as_str(&self) -> &'static str {
        match self {
            StageEstimate::StageI => "Likely Stage I",
            StageEstimate::StageII => "Likely Stage II",
            StageEstimate::StageIIToIII => "Likely Stage II-III",
            StageEstimate::AssessmentNeeded => "Clinical assessment needed",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            StageEstimate::StageI => "green",
            StageEstimate::StageII => "yellow",
            StageEstimate::StageIIToIII => "orange",
            StageEstimate::AssessmentNeeded => "gray",
        }
    }
}

impl fmt::Display for StageEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicalInsights {
    pub stage_estimate: StageEstimate,
    pub stage_color: String,
    pub image_confidence: String,
    pub next_diagnostics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrognosisIndicators {
    pub positive_factors: Vec<String>,
    pub survival_percentage: f64,
    pub survival_confidence: ConfidenceBand,
    pub survival_message: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MalignantInsights {
    pub clinical_insights: ClinicalInsights,
    pub treatment_recommendations: Vec<String>,
    pub prognosis_indicators: PrognosisIndicators,
    pub survival_prediction: Option<SurvivalPrediction>,
    pub next_steps: Vec<String>,
    pub is_fallback: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InsightReport {
    Benign(BenignInsights),
    Malignant(MalignantInsights),
}

impl InsightReport {
    pub fn label(&self) -> Label {
        match self {
            InsightReport::Benign(_) => Label::Benign,
            InsightReport::Malignant(_) => Label::Malignant,
        }
    }

    pub fn is_fallback(&self) -> bool {
        match self {
            InsightReport::Benign(b) => b.is_fallback,
            InsightReport::Malignant(m) => m.is_fallback,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionnaireRef {
    pub label: Label,
    pub title: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReportV1 {
    pub tool: String,
    pub version: String,
    pub schema_version: String,
    pub image: String,
    #[serde(default)]
    pub report_path: Option<String>,
    pub classification: Option<ClassificationResult>,
    pub questionnaire: Option<QuestionnaireRef>,
    pub responses: BTreeMap<String, String>,
    pub insights: Option<InsightReport>,
    pub warnings: Vec<String>,
}

impl AnalysisReportV1 {
    pub fn empty(tool_version: &str, image: &str) -> Self {
        Self {
            tool: "oncoinsight".to_string(),
            version: tool_version.to_string(),
            schema_version: "v1".to_string(),
            image: image.to_string(),
            report_path: None,
            classification: None,
            questionnaire: None,
            responses: BTreeMap::new(),
            insights: None,
            warnings: Vec::new(),
        }
    }
}
