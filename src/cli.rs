use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::classifier::DEFAULT_INPUT_SIZE;
use crate::schema::v1::Label;
use crate::services::{DEFAULT_CLASSIFIER_PATH, DEFAULT_SURVIVAL_PATH, ServiceConfig};

#[derive(Debug, Parser)]
#[command(
    name = "oncoinsight",
    version,
    about = "Breast-tissue image triage with questionnaire-driven insights"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Classify an image and build the insight report
    Analyze(AnalyzeArgs),
    /// Print the questionnaire for a label as JSON
    Questionnaire(QuestionnaireArgs),
    /// Map malignant-questionnaire answers to survival features and predict
    Survival(SurvivalArgs),
    /// Load assets and model artifacts and report their status
    Validate(ValidateArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ModelArgs {
    #[arg(
        long,
        env = "MODEL_PATH",
        default_value = DEFAULT_CLASSIFIER_PATH,
        help = "Image classifier artifact (.onnx)"
    )]
    pub model: PathBuf,

    #[arg(
        long,
        env = "SURVIVAL_MODEL_PATH",
        default_value = DEFAULT_SURVIVAL_PATH,
        help = "Survival regressor artifact (.json or .json.gz)"
    )]
    pub survival_model: PathBuf,

    #[arg(long, default_value_t = DEFAULT_INPUT_SIZE, help = "Square input side for the classifier")]
    pub input_size: u32,

    #[arg(long, help = "Optional questionnaire JSON to overlay on the built-in set")]
    pub questionnaires: Option<PathBuf>,

    #[arg(long, help = "Optional survival feature map JSON to overlay on the built-in tables")]
    pub feature_map: Option<PathBuf>,
}

impl ModelArgs {
    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            classifier_model: self.model.clone(),
            survival_model: self.survival_model.clone(),
            input_size: self.input_size,
            questionnaires: self.questionnaires.clone(),
            feature_map: self.feature_map.clone(),
        }
    }
}

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    #[arg(long, help = "Image to classify (png, jpg, jpeg, bmp)")]
    pub image: PathBuf,

    #[arg(long, help = "JSON object of question id to answer")]
    pub answers: Option<PathBuf>,

    #[arg(
        long = "answer",
        value_name = "KEY=VALUE",
        value_parser = parse_answer,
        help = "Single answer, overrides --answers (repeatable)"
    )]
    pub answer: Vec<(String, String)>,

    #[arg(long)]
    pub out: PathBuf,

    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[command(flatten)]
    pub models: ModelArgs,
}

#[derive(Debug, Args)]
pub struct QuestionnaireArgs {
    #[arg(long, value_enum)]
    pub label: LabelArg,

    #[arg(long, help = "Optional questionnaire JSON to overlay on the built-in set")]
    pub questionnaires: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct SurvivalArgs {
    #[arg(long, help = "JSON object of question id to answer")]
    pub answers: Option<PathBuf>,

    #[arg(
        long = "answer",
        value_name = "KEY=VALUE",
        value_parser = parse_answer,
        help = "Single answer, overrides --answers (repeatable)"
    )]
    pub answer: Vec<(String, String)>,

    #[arg(long, default_value_t = false, help = "Print the mapped feature vector as well")]
    pub features: bool,

    #[command(flatten)]
    pub models: ModelArgs,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub models: ModelArgs,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LabelArg {
    Benign,
    Malignant,
}

impl From<LabelArg> for Label {
    fn from(value: LabelArg) -> Self {
        match value {
            LabelArg::Benign => Label::Benign,
            LabelArg::Malignant => Label::Malignant,
        }
    }
}

pub fn parse_answer(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty question id in '{}'", raw));
    }
    Ok((key.to_string(), value.trim().to_string()))
}
