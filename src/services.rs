use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use crate::classifier::{DEFAULT_INPUT_SIZE, ImageClassifier};
use crate::insight::InsightEngine;
use crate::questionnaire::{self, QuestionnaireSet};
use crate::survival::{FeatureMapper, SurvivalPredictor};

pub const DEFAULT_CLASSIFIER_PATH: &str = "models/classifier.onnx";
pub const DEFAULT_SURVIVAL_PATH: &str = "models/survival_model.json";

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub classifier_model: PathBuf,
    pub survival_model: PathBuf,
    pub input_size: u32,
    pub questionnaires: Option<PathBuf>,
    pub feature_map: Option<PathBuf>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            classifier_model: PathBuf::from(DEFAULT_CLASSIFIER_PATH),
            survival_model: PathBuf::from(DEFAULT_SURVIVAL_PATH),
            input_size: DEFAULT_INPUT_SIZE,
            questionnaires: None,
            feature_map: None,
        }
    }
}

/// Long-lived handles shared read-only by every stage of a run.
#[derive(Debug)]
pub struct Services {
    pub classifier: ImageClassifier,
    pub questionnaires: QuestionnaireSet,
    pub insight: InsightEngine,
}

impl Services {
    /// Asset errors fail here; model artifacts only degrade to mock mode.
    pub fn load(cfg: &ServiceConfig) -> Result<Self> {
        let questionnaires = questionnaire::load_catalog(cfg.questionnaires.as_deref())?;
        let mapper = FeatureMapper::load(cfg.feature_map.as_deref())?;
        let classifier = ImageClassifier::load(&cfg.classifier_model, cfg.input_size);
        let survival = SurvivalPredictor::load(&cfg.survival_model);
        info!(
            questionnaires = %questionnaires.version,
            feature_map = %mapper.version(),
            classifier_mock = classifier.is_mock(),
            survival_mock = survival.is_mock(),
            "services ready"
        );
        Ok(Self {
            classifier,
            questionnaires,
            insight: InsightEngine::new(mapper, survival),
        })
    }

    /// Built-in assets with both models in mock mode.
    pub fn mock() -> Result<Self> {
        Ok(Self {
            classifier: ImageClassifier::mock_only(DEFAULT_INPUT_SIZE),
            questionnaires: questionnaire::load_builtin()?,
            insight: InsightEngine::new(FeatureMapper::builtin()?, SurvivalPredictor::mock_only()),
        })
    }
}
