pub mod artifact;
pub mod mapper;
pub mod predictor;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use artifact::{LabelEncoder, Regressor, RegressionTree, SurvivalArtifact, load_artifact};
pub use mapper::{FeatureMapper, FeatureRule};
pub use predictor::{
    SurvivalPredictor, confidence_band, mock_survival, stage_adjustment, survival_message,
};

pub const STAGE_FEATURE: &str = "Stage of Breast Cancer at Diagnosis (if applicable): ";
pub const TUMOR_STAGE_FEATURE: &str = "Tumor Stage: ";

/// Regressor input keyed by the exact column names the model was trained on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurvivalFeatureVector {
    values: BTreeMap<String, String>,
}

impl SurvivalFeatureVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, feature: impl Into<String>, value: impl Into<String>) {
        self.values.insert(feature.into(), value.into());
    }

    pub fn get(&self, feature: &str) -> Option<&str> {
        self.values.get(feature).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
