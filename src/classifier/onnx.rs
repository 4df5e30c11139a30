use std::path::Path;

use tract_onnx::prelude::*;

use crate::classifier::ImageModel;
use crate::classifier::preprocess::ImageTensor;
use crate::error::ModelError;

/// Binary image classifier exported to ONNX, fed an NHWC grayscale batch.
pub struct OnnxImageModel {
    plan: TypedRunnableModel<TypedModel>,
}

impl OnnxImageModel {
    pub fn load(path: &Path, size: u32) -> Result<Self, ModelError> {
        if !path.exists() {
            return Err(ModelError::Missing(path.to_path_buf()));
        }
        let side = size as usize;
        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .and_then(|m| m.with_input_fact(0, f32::fact([1, side, side, 1]).into()))
            .and_then(|m| m.into_optimized())
            .and_then(|m| m.into_runnable())
            .map_err(|e| ModelError::Incompatible(format!("{}: {}", path.display(), e)))?;
        Ok(Self { plan })
    }
}

impl ImageModel for OnnxImageModel {
    fn name(&self) -> &str {
        "onnx"
    }

    fn predict(&self, input: &ImageTensor) -> Result<f32, ModelError> {
        let tensor = Tensor::from_shape(&input.shape, &input.data)
            .map_err(|e| ModelError::Inference(e.to_string()))?;
        let outputs = self
            .plan
            .run(tvec!(tensor.into()))
            .map_err(|e| ModelError::Inference(e.to_string()))?;
        let first = outputs
            .first()
            .ok_or_else(|| ModelError::Inference("model produced no outputs".to_string()))?;
        let view = first
            .to_array_view::<f32>()
            .map_err(|e| ModelError::Inference(e.to_string()))?;
        view.iter()
            .next()
            .copied()
            .ok_or_else(|| ModelError::Inference("model produced an empty output".to_string()))
    }
}
