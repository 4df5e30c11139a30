use std::collections::BTreeMap;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ModelError;
use crate::io::open_maybe_gz;
use crate::survival::SurvivalFeatureVector;

pub const ARTIFACT_FORMAT: &str = "survival-regressor/v1";
const UNKNOWN_CLASS: &str = "Unknown";

/// Exported survival regressor: column order, per-column categorical encoders, model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurvivalArtifact {
    pub format: String,
    pub feature_columns: Vec<String>,
    #[serde(default)]
    pub label_encoders: BTreeMap<String, LabelEncoder>,
    pub model: Regressor,
}

/// Category to integer code, in the order the classes were fitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn transform(&self, value: &str) -> Option<usize> {
        self.classes.iter().position(|c| c == value)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Regressor {
    Linear {
        coefficients: Vec<f64>,
        intercept: f64,
    },
    Forest {
        trees: Vec<RegressionTree>,
    },
}

impl Regressor {
    pub fn predict(&self, row: &[f64]) -> f64 {
        match self {
            Regressor::Linear {
                coefficients,
                intercept,
            } => {
                coefficients
                    .iter()
                    .zip(row)
                    .map(|(w, x)| w * x)
                    .sum::<f64>()
                    + intercept
            }
            Regressor::Forest { trees } => {
                let sum: f64 = trees.iter().map(|t| t.predict(row)).sum();
                sum / trees.len() as f64
            }
        }
    }

    fn validate(&self, n_columns: usize) -> Result<(), String> {
        match self {
            Regressor::Linear {
                coefficients,
                intercept,
            } => {
                if coefficients.len() != n_columns {
                    return Err(format!(
                        "linear model has {} coefficients for {} columns",
                        coefficients.len(),
                        n_columns
                    ));
                }
                if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
                    return Err("linear model has non-finite parameters".to_string());
                }
                Ok(())
            }
            Regressor::Forest { trees } => {
                if trees.is_empty() {
                    return Err("forest has no trees".to_string());
                }
                for (idx, tree) in trees.iter().enumerate() {
                    tree.validate(n_columns)
                        .map_err(|e| format!("tree #{}: {}", idx, e))?;
                }
                Ok(())
            }
        }
    }
}

/// Flat node arrays of a fitted regression tree; `-1` in `children_left` marks a leaf.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<f64>,
}

impl RegressionTree {
    pub fn predict(&self, row: &[f64]) -> f64 {
        let mut node = 0usize;
        while self.children_left[node] >= 0 {
            let x = row.get(self.feature[node] as usize).copied().unwrap_or(0.0);
            node = if x <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        self.value[node]
    }

    fn validate(&self, n_columns: usize) -> Result<(), String> {
        let n = self.children_left.len();
        if n == 0 {
            return Err("empty tree".to_string());
        }
        if self.children_right.len() != n
            || self.feature.len() != n
            || self.threshold.len() != n
            || self.value.len() != n
        {
            return Err("node arrays have different lengths".to_string());
        }
        for node in 0..n {
            let left = self.children_left[node];
            let right = self.children_right[node];
            if left < 0 {
                if right >= 0 {
                    return Err(format!("node {} has only a right child", node));
                }
                if !self.value[node].is_finite() {
                    return Err(format!("leaf {} has a non-finite value", node));
                }
                continue;
            }
            // Children always come after their parent, so traversal terminates.
            for child in [left, right] {
                if child <= node as i64 || child >= n as i64 {
                    return Err(format!("node {} has out-of-order child {}", node, child));
                }
            }
            let feature = self.feature[node];
            if feature < 0 || feature >= n_columns as i64 {
                return Err(format!("node {} splits on missing column {}", node, feature));
            }
        }
        Ok(())
    }
}

impl SurvivalArtifact {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.format != ARTIFACT_FORMAT {
            return Err(ModelError::Incompatible(format!(
                "unsupported artifact format '{}' (expected {})",
                self.format, ARTIFACT_FORMAT
            )));
        }
        if self.feature_columns.is_empty() {
            return Err(ModelError::Incompatible(
                "artifact lists no feature columns".to_string(),
            ));
        }
        self.model
            .validate(self.feature_columns.len())
            .map_err(ModelError::Incompatible)
    }

    /// Encodes categories, zero-fills absent columns and orders by `feature_columns`.
    pub fn encode(&self, features: &SurvivalFeatureVector) -> Result<Vec<f64>, ModelError> {
        let mut row = Vec::with_capacity(self.feature_columns.len());
        for column in &self.feature_columns {
            let Some(value) = features.get(column) else {
                row.push(0.0);
                continue;
            };
            let encoded = match self.label_encoders.get(column) {
                Some(encoder) => encode_category(column, encoder, value)? as f64,
                None => value.trim().parse::<f64>().map_err(|_| {
                    ModelError::Inference(format!(
                        "column '{}' has no encoder and value '{}' is not numeric",
                        column, value
                    ))
                })?,
            };
            row.push(encoded);
        }
        Ok(row)
    }

    pub fn predict_raw(&self, features: &SurvivalFeatureVector) -> Result<f64, ModelError> {
        let row = self.encode(features)?;
        let y = self.model.predict(&row);
        if !y.is_finite() {
            return Err(ModelError::Inference(format!(
                "regressor produced non-finite output {}",
                y
            )));
        }
        Ok(y)
    }
}

fn encode_category(column: &str, encoder: &LabelEncoder, value: &str) -> Result<usize, ModelError> {
    if let Some(code) = encoder.transform(value) {
        return Ok(code);
    }
    debug!(column, value, "unseen category; substituting Unknown");
    encoder
        .transform(UNKNOWN_CLASS)
        .ok_or_else(|| ModelError::UnseenCategory {
            column: column.to_string(),
            value: value.to_string(),
        })
}

pub fn load_artifact(path: &Path) -> Result<SurvivalArtifact, ModelError> {
    if !path.exists() {
        return Err(ModelError::Missing(path.to_path_buf()));
    }
    let reader = open_maybe_gz(path)
        .map_err(|e| ModelError::Incompatible(format!("{}: {}", path.display(), e)))?;
    let artifact: SurvivalArtifact = serde_json::from_reader(BufReader::new(reader))
        .map_err(|e| ModelError::Incompatible(format!("{}: {}", path.display(), e)))?;
    artifact.validate()?;
    Ok(artifact)
}
