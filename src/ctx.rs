use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::questionnaire::ResponseSet;
use crate::schema::v1::{AnalysisReportV1, ClassificationResult, InsightReport, QuestionnaireRef};

#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub out_dir: PathBuf,
    pub json_path: PathBuf,
}

/// Per-run state threaded through the pipeline stages.
#[derive(Debug)]
pub struct Ctx {
    pub image: PathBuf,
    pub answers_path: Option<PathBuf>,
    pub answer_overrides: BTreeMap<String, String>,
    pub write_json: bool,
    pub image_bytes: Vec<u8>,
    pub classification: Option<ClassificationResult>,
    pub questionnaire: Option<QuestionnaireRef>,
    pub responses: Option<ResponseSet>,
    pub insights: Option<InsightReport>,
    pub warnings: Vec<String>,
    pub output: OutputPaths,
    pub report: AnalysisReportV1,
}

impl Ctx {
    pub fn new(image: PathBuf, out_dir: PathBuf, write_json: bool, tool_version: &str) -> Self {
        let json_path = out_dir.join("insight.json");
        let report = AnalysisReportV1::empty(tool_version, &image.display().to_string());
        Self {
            image,
            answers_path: None,
            answer_overrides: BTreeMap::new(),
            write_json,
            image_bytes: Vec::new(),
            classification: None,
            questionnaire: None,
            responses: None,
            insights: None,
            warnings: Vec::new(),
            output: OutputPaths { out_dir, json_path },
            report,
        }
    }
}
