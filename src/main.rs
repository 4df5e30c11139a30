use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use oncoinsight::cli::{Cli, Commands};
use oncoinsight::ctx::Ctx;
use oncoinsight::io;
use oncoinsight::pipeline::Pipeline;
use oncoinsight::questionnaire::{self, ResponseSet};
use oncoinsight::schema::v1::Label;
use oncoinsight::services::Services;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze(args) => {
            let services = Arc::new(Services::load(&args.models.service_config())?);
            let mut ctx = Ctx::new(args.image, args.out, args.json, env!("CARGO_PKG_VERSION"));
            ctx.answers_path = args.answers;
            ctx.answer_overrides = args.answer.into_iter().collect();

            let pipeline = Pipeline::analyze(services);
            pipeline.run(&mut ctx)?;

            print_summary(&ctx)?;
        }
        Commands::Questionnaire(args) => {
            let catalog = questionnaire::load_catalog(args.questionnaires.as_deref())?;
            let schema = catalog.select(args.label.into())?;
            println!("{}", serde_json::to_string_pretty(schema)?);
        }
        Commands::Survival(args) => {
            let services = Services::load(&args.models.service_config())?;
            let raw = collect_answers(args.answers.as_deref(), args.answer)?;
            let schema = services.questionnaires.select(Label::Malignant)?;
            let (responses, warnings) = ResponseSet::capture(schema, &raw);
            for w in &warnings {
                tracing::warn!(warning = %w, "questionnaire_response");
            }
            let features = services.insight.mapper().map(&responses);
            let prediction = services.insight.survival().predict(&features);
            let out = if args.features {
                json!({ "features": features, "prediction": prediction })
            } else {
                json!(prediction)
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Commands::Validate(args) => {
            let services = Services::load(&args.models.service_config())?;
            print_validate_summary(&services);
        }
    }

    Ok(())
}

fn collect_answers(
    path: Option<&Path>,
    overrides: Vec<(String, String)>,
) -> Result<BTreeMap<String, String>> {
    let mut raw = match path {
        Some(p) => io::read_answers(p)?,
        None => BTreeMap::new(),
    };
    raw.extend(overrides);
    Ok(raw)
}

fn print_summary(ctx: &Ctx) -> Result<()> {
    let summary = io::summary::format_summary(ctx)?;
    print!("{}", summary);
    if !ctx.warnings.is_empty() {
        println!("warnings:");
        for warning in &ctx.warnings {
            println!("- {}", warning);
        }
    }
    Ok(())
}

fn print_validate_summary(services: &Services) {
    let status = |mock: bool| if mock { "mock" } else { "loaded" };
    println!("oncoinsight validate ok");
    println!(
        "classifier: {} ({})",
        status(services.classifier.is_mock()),
        services.classifier.backend_name()
    );
    println!(
        "survival: {}",
        status(services.insight.survival().is_mock())
    );
    println!("questionnaires: {}", services.questionnaires.version);
    for schema in &services.questionnaires.schemas {
        println!(
            "{}\t{}\t{}",
            schema.label,
            schema.questions().count(),
            schema.title
        );
    }
    println!(
        "feature map: {} ({} features)",
        services.insight.mapper().version(),
        services.insight.mapper().rules().len()
    );
}
