use std::path::{Path, PathBuf};

use rand::Rng;
use tracing::{debug, error, info, warn};

use crate::error::ModelError;
use crate::schema::v1::{ConfidenceBand, SurvivalPrediction};
use crate::survival::artifact::{SurvivalArtifact, load_artifact};
use crate::survival::{STAGE_FEATURE, SurvivalFeatureVector};

const MOCK_BASE: f64 = 75.0;
const MOCK_NOISE: f64 = 5.0;
const MOCK_MIN: f64 = 10.0;
const MOCK_MAX: f64 = 95.0;

#[derive(Debug, Clone)]
pub struct SurvivalPredictor {
    artifact: Option<SurvivalArtifact>,
    source: Option<PathBuf>,
}

impl SurvivalPredictor {
    /// Loads the regressor artifact; any failure leaves the predictor in mock mode.
    pub fn load(path: &Path) -> Self {
        match load_artifact(path) {
            Ok(artifact) => {
                info!(
                    path = %path.display(),
                    columns = artifact.feature_columns.len(),
                    "survival model loaded"
                );
                Self {
                    artifact: Some(artifact),
                    source: Some(path.to_path_buf()),
                }
            }
            Err(ModelError::Missing(p)) => {
                warn!(path = %p.display(), "survival model not found; using mock predictions");
                Self {
                    artifact: None,
                    source: Some(p),
                }
            }
            Err(err) => {
                error!(path = %path.display(), error = %err, "failed to load survival model; using mock predictions");
                Self {
                    artifact: None,
                    source: Some(path.to_path_buf()),
                }
            }
        }
    }

    pub fn from_artifact(artifact: SurvivalArtifact) -> Result<Self, ModelError> {
        artifact.validate()?;
        Ok(Self {
            artifact: Some(artifact),
            source: None,
        })
    }

    pub fn mock_only() -> Self {
        Self {
            artifact: None,
            source: None,
        }
    }

    pub fn is_mock(&self) -> bool {
        self.artifact.is_none()
    }

    pub fn predict(&self, features: &SurvivalFeatureVector) -> SurvivalPrediction {
        self.predict_with_rng(features, &mut rand::thread_rng())
    }

    pub fn predict_with_rng<R: Rng>(
        &self,
        features: &SurvivalFeatureVector,
        rng: &mut R,
    ) -> SurvivalPrediction {
        match self.try_predict(features) {
            Ok(prediction) => prediction,
            Err(ModelError::Missing(_)) => {
                debug!("survival model absent; mock prediction");
                mock_survival(features, rng)
            }
            Err(err) => {
                warn!(error = %err, "survival prediction failed; using mock prediction");
                mock_survival(features, rng)
            }
        }
    }

    pub fn try_predict(
        &self,
        features: &SurvivalFeatureVector,
    ) -> Result<SurvivalPrediction, ModelError> {
        let artifact = self
            .artifact
            .as_ref()
            .ok_or_else(|| ModelError::Missing(self.source.clone().unwrap_or_default()))?;
        let clamped = artifact.predict_raw(features)?.clamp(0.0, 100.0);
        // Band and message follow the unrounded value.
        Ok(SurvivalPrediction {
            survival_percentage: round1(clamped),
            confidence: confidence_band(clamped),
            message: survival_message(clamped).to_string(),
            is_mock: false,
        })
    }
}

pub fn mock_survival<R: Rng>(
    features: &SurvivalFeatureVector,
    rng: &mut R,
) -> SurvivalPrediction {
    let adjustment = stage_adjustment(features.get(STAGE_FEATURE));
    let noise = rng.gen_range(-MOCK_NOISE..=MOCK_NOISE);
    let clamped = (MOCK_BASE + adjustment + noise).clamp(MOCK_MIN, MOCK_MAX);
    SurvivalPrediction {
        survival_percentage: round1(clamped),
        confidence: ConfidenceBand::Medium,
        message: survival_message(clamped).to_string(),
        is_mock: true,
    }
}

pub fn stage_adjustment(stage: Option<&str>) -> f64 {
    match stage {
        Some("Stage I") => 15.0,
        Some("Stage II") => 0.0,
        Some("Stage III") => -20.0,
        Some("Stage IV") => -40.0,
        _ => 0.0,
    }
}

pub fn confidence_band(pct: f64) -> ConfidenceBand {
    if pct > 70.0 {
        ConfidenceBand::High
    } else if pct > 50.0 {
        ConfidenceBand::Medium
    } else {
        ConfidenceBand::Low
    }
}

pub fn survival_message(pct: f64) -> &'static str {
    if pct >= 80.0 {
        "Excellent prognosis with current treatment approaches"
    } else if pct >= 60.0 {
        "Good prognosis with comprehensive treatment plan"
    } else if pct >= 40.0 {
        "Moderate prognosis - aggressive treatment recommended"
    } else {
        "Requires intensive treatment and close monitoring"
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
