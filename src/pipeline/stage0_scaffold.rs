use anyhow::{Context, Result, bail};
use std::fs;
use tracing::info;

use crate::ctx::Ctx;
use crate::pipeline::Stage;

/// Prepares the output directory and records where the report will land.
pub struct Stage0Scaffold;

impl Stage0Scaffold {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage0Scaffold {
    fn name(&self) -> &'static str {
        "stage0_scaffold"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let out_dir = &ctx.output.out_dir;
        if out_dir.is_file() {
            bail!("output path {} is an existing file", out_dir.display());
        }
        fs::create_dir_all(out_dir)
            .with_context(|| format!("failed to create output dir {}", out_dir.display()))?;

        ctx.report.report_path = if ctx.write_json {
            ctx.output
                .json_path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
        } else {
            None
        };
        info!(
            out_dir = %out_dir.display(),
            report = ctx.report.report_path.as_deref().unwrap_or("-"),
            "output_dir_ready"
        );
        Ok(())
    }
}
