use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use tracing::info;

use crate::ctx::Ctx;
use crate::pipeline::Stage;
use crate::services::Services;

pub const ALLOWED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];
pub const MAX_IMAGE_BYTES: u64 = 16 * 1024 * 1024;

pub struct Stage1Classify {
    services: Arc<Services>,
}

impl Stage1Classify {
    pub fn new(services: Arc<Services>) -> Self {
        Self { services }
    }
}

impl Stage for Stage1Classify {
    fn name(&self) -> &'static str {
        "stage1_classify"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        check_upload(&ctx.image)?;
        ctx.image_bytes = fs::read(&ctx.image)
            .with_context(|| format!("failed to read image {}", ctx.image.display()))?;

        let result = self.services.classifier.classify(&ctx.image_bytes);
        if result.is_mock {
            ctx.warnings
                .push("image classification is a mock prediction".to_string());
        }
        info!(
            label = %result.label,
            confidence = result.confidence,
            is_mock = result.is_mock,
            "image_classified"
        );
        ctx.classification = Some(result);
        Ok(())
    }
}

/// Rejects files the upload form would not accept: unknown extension or over 16 MiB.
pub fn check_upload(path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
        .unwrap_or_default();
    if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        bail!(
            "{}: unsupported image type (expected one of {})",
            path.display(),
            ALLOWED_EXTENSIONS.join(", ")
        );
    }
    let meta = fs::metadata(path)
        .with_context(|| format!("failed to stat image {}", path.display()))?;
    if meta.len() > MAX_IMAGE_BYTES {
        bail!(
            "{}: image is {} bytes, limit is {}",
            path.display(),
            meta.len(),
            MAX_IMAGE_BYTES
        );
    }
    Ok(())
}
