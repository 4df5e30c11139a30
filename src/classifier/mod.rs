use std::fmt;
use std::path::{Path, PathBuf};

use rand::Rng;
use tracing::{debug, error, info, warn};

use crate::error::ModelError;
use crate::schema::v1::{ClassificationResult, Label, prediction_message};

pub use preprocess::{DEFAULT_INPUT_SIZE, ImageTensor, preprocess};

pub mod preprocess;

#[cfg(feature = "onnx")]
pub mod onnx;
#[cfg(not(feature = "onnx"))]
pub mod onnx {
    use std::path::Path;

    use crate::classifier::ImageModel;
    use crate::classifier::preprocess::ImageTensor;
    use crate::error::ModelError;

    pub struct OnnxImageModel;

    impl OnnxImageModel {
        pub fn load(path: &Path, _size: u32) -> Result<Self, ModelError> {
            if !path.exists() {
                return Err(ModelError::Missing(path.to_path_buf()));
            }
            Err(ModelError::Incompatible(
                "ONNX support not enabled. Rebuild with --features onnx".to_string(),
            ))
        }
    }

    impl ImageModel for OnnxImageModel {
        fn name(&self) -> &str {
            "onnx"
        }

        fn predict(&self, _input: &ImageTensor) -> Result<f32, ModelError> {
            Err(ModelError::Inference("ONNX support not enabled".to_string()))
        }
    }
}

const MOCK_CONFIDENCE_MIN: f64 = 0.7;
const MOCK_CONFIDENCE_MAX: f64 = 0.95;

/// A loaded binary classifier returning P(malignant) for one preprocessed image.
pub trait ImageModel: Send + Sync {
    fn name(&self) -> &str;
    fn predict(&self, input: &ImageTensor) -> Result<f32, ModelError>;
}

pub struct ImageClassifier {
    model: Option<Box<dyn ImageModel>>,
    input_size: u32,
    source: Option<PathBuf>,
}

impl fmt::Debug for ImageClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageClassifier")
            .field("backend", &self.backend_name())
            .field("input_size", &self.input_size)
            .field("source", &self.source)
            .finish()
    }
}

impl ImageClassifier {
    /// Loads the ONNX classifier; a missing or unusable artifact leaves the adapter in mock mode.
    pub fn load(path: &Path, input_size: u32) -> Self {
        let model: Option<Box<dyn ImageModel>> = match onnx::OnnxImageModel::load(path, input_size)
        {
            Ok(model) => {
                info!(path = %path.display(), input_size, "image classifier loaded");
                Some(Box::new(model))
            }
            Err(ModelError::Missing(p)) => {
                warn!(path = %p.display(), "image classifier not found; using mock predictions");
                None
            }
            Err(err) => {
                error!(path = %path.display(), error = %err, "failed to load image classifier; using mock predictions");
                None
            }
        };
        Self {
            model,
            input_size,
            source: Some(path.to_path_buf()),
        }
    }

    pub fn with_model(model: Box<dyn ImageModel>, input_size: u32) -> Self {
        Self {
            model: Some(model),
            input_size,
            source: None,
        }
    }

    pub fn mock_only(input_size: u32) -> Self {
        Self {
            model: None,
            input_size,
            source: None,
        }
    }

    pub fn is_mock(&self) -> bool {
        self.model.is_none()
    }

    pub fn backend_name(&self) -> &str {
        self.model.as_deref().map(|m| m.name()).unwrap_or("mock")
    }

    pub fn classify(&self, image_bytes: &[u8]) -> ClassificationResult {
        self.classify_with_rng(image_bytes, &mut rand::thread_rng())
    }

    pub fn classify_with_rng<R: Rng>(&self, image_bytes: &[u8], rng: &mut R) -> ClassificationResult {
        match self.try_classify(image_bytes) {
            Ok(result) => result,
            Err(ModelError::Missing(_)) => {
                debug!("image classifier absent; mock prediction");
                mock_classification(rng)
            }
            Err(err) => {
                warn!(error = %err, "image classification failed; using mock prediction");
                mock_classification(rng)
            }
        }
    }

    pub fn try_classify(&self, image_bytes: &[u8]) -> Result<ClassificationResult, ModelError> {
        let model = self
            .model
            .as_deref()
            .ok_or_else(|| ModelError::Missing(self.source.clone().unwrap_or_default()))?;
        let input = preprocess(image_bytes, self.input_size)?;
        let p = model.predict(&input)?;
        if !p.is_finite() {
            return Err(ModelError::Inference(format!(
                "classifier produced non-finite score {}",
                p
            )));
        }
        Ok(ClassificationResult::from_score(p as f64))
    }
}

pub fn mock_classification<R: Rng>(rng: &mut R) -> ClassificationResult {
    let label = if rng.gen_bool(0.5) {
        Label::Malignant
    } else {
        Label::Benign
    };
    let confidence = rng.gen_range(MOCK_CONFIDENCE_MIN..=MOCK_CONFIDENCE_MAX);
    let raw_score = match label {
        Label::Malignant => confidence,
        Label::Benign => 1.0 - confidence,
    };
    ClassificationResult {
        label,
        confidence,
        raw_score,
        message: prediction_message(label, confidence),
        is_mock: true,
    }
}
