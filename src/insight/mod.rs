pub mod benign;
pub mod fallback;
pub mod malignant;

use anyhow::{Result, bail};
use rand::Rng;
use tracing::{debug, error};

use crate::questionnaire::ResponseSet;
use crate::schema::v1::{BenignInsights, InsightReport, Label, MalignantInsights};
use crate::survival::{FeatureMapper, SurvivalPredictor};

/// Rule-based report builder; owns the survival mapper and predictor used on the malignant path.
#[derive(Debug, Clone)]
pub struct InsightEngine {
    mapper: FeatureMapper,
    survival: SurvivalPredictor,
}

impl InsightEngine {
    pub fn new(mapper: FeatureMapper, survival: SurvivalPredictor) -> Self {
        Self { mapper, survival }
    }

    pub fn mapper(&self) -> &FeatureMapper {
        &self.mapper
    }

    pub fn survival(&self) -> &SurvivalPredictor {
        &self.survival
    }

    pub fn generate(
        &self,
        label: Label,
        responses: &ResponseSet,
        image_confidence: f64,
    ) -> InsightReport {
        self.generate_with_rng(label, responses, image_confidence, &mut rand::thread_rng())
    }

    /// Never fails: a branch that cannot be assembled is replaced by its fixed fallback.
    pub fn generate_with_rng<R: Rng>(
        &self,
        label: Label,
        responses: &ResponseSet,
        image_confidence: f64,
        rng: &mut R,
    ) -> InsightReport {
        match label {
            Label::Benign => match self.try_benign(responses, image_confidence) {
                Ok(insights) => InsightReport::Benign(insights),
                Err(err) => {
                    error!(label = "benign", error = %err, "insight generation failed; using fallback");
                    fallback::benign()
                }
            },
            Label::Malignant => match self.try_malignant(responses, image_confidence, rng) {
                Ok(insights) => InsightReport::Malignant(insights),
                Err(err) => {
                    error!(label = "malignant", error = %err, "insight generation failed; using fallback");
                    fallback::malignant()
                }
            },
        }
    }

    pub fn try_benign(
        &self,
        responses: &ResponseSet,
        image_confidence: f64,
    ) -> Result<BenignInsights> {
        let pct = format_confidence(image_confidence)?;
        let insights = benign::build(responses, pct);
        debug!(
            risk_level = %insights.risk_assessment.risk_level,
            risk_score = insights.risk_assessment.risk_score,
            "benign insights assembled"
        );
        Ok(insights)
    }

    pub fn try_malignant<R: Rng>(
        &self,
        responses: &ResponseSet,
        image_confidence: f64,
        rng: &mut R,
    ) -> Result<MalignantInsights> {
        let pct = format_confidence(image_confidence)?;
        let features = self.mapper.map(responses);
        let survival = self.survival.predict_with_rng(&features, rng);
        let insights = malignant::build(responses, pct, survival);
        debug!(
            stage = %insights.clinical_insights.stage_estimate,
            survival_pct = insights.prognosis_indicators.survival_percentage,
            "malignant insights assembled"
        );
        Ok(insights)
    }
}

/// `0.873` -> `"87.3%"`. Rejects values outside [0, 1].
pub fn format_confidence(confidence: f64) -> Result<String> {
    if !confidence.is_finite() || !(0.0..=1.0).contains(&confidence) {
        bail!("image confidence {} outside [0, 1]", confidence);
    }
    Ok(format!("{:.1}%", confidence * 100.0))
}
