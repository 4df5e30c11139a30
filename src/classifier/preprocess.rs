use image::imageops::FilterType;

use crate::error::ModelError;

pub const DEFAULT_INPUT_SIZE: u32 = 224;

/// Single-sample NHWC batch: `[1, size, size, 1]`, intensities in [0, 1].
#[derive(Debug, Clone)]
pub struct ImageTensor {
    pub shape: [usize; 4],
    pub data: Vec<f32>,
}

impl ImageTensor {
    pub fn side(&self) -> usize {
        self.shape[1]
    }
}

pub fn preprocess(image_bytes: &[u8], size: u32) -> Result<ImageTensor, ModelError> {
    if size == 0 {
        return Err(ModelError::Preprocess("input size must be positive".to_string()));
    }
    let decoded = image::load_from_memory(image_bytes)
        .map_err(|e| ModelError::Preprocess(format!("failed to decode image: {}", e)))?;
    let gray = decoded.to_luma8();
    let resized = image::imageops::resize(&gray, size, size, FilterType::CatmullRom);
    let data: Vec<f32> = resized
        .into_raw()
        .into_iter()
        .map(|px| px as f32 / 255.0)
        .collect();
    let side = size as usize;
    Ok(ImageTensor {
        shape: [1, side, side, 1],
        data,
    })
}
