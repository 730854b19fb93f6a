//! `ahp` - command-line front end for the AHP decision engine.

use std::fmt::Write as _;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use thiserror::Error;
use tracing_subscriber::fmt;

use ahp_engine::adapters::{DecisionFile, DecisionFileError, DecisionFileFormat};
use ahp_engine::application::{
    ConsistencyPolicy, DecisionReport, EvaluateDecisionCommand, EvaluateDecisionHandler,
};
use ahp_engine::config::{AhpConfig, ConfigError, LoggingConfig};
use ahp_engine::domain::decision::DecisionModel;
use ahp_engine::domain::foundation::DomainError;

#[derive(Parser)]
#[command(name = "ahp", version, about = "Rank alternatives with the Analytic Hierarchy Process")]
struct Cli {
    /// Configuration file (TOML, YAML or JSON); AHP__* environment variables override it
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a decision file and print the ranking
    Evaluate {
        /// Decision file (.yaml, .yml or .json)
        file: PathBuf,
        /// Override the consistency threshold (0 < X <= 1)
        #[arg(long)]
        threshold: Option<f64>,
        /// Show the ranking even when comparisons are inconsistent
        #[arg(long)]
        allow_inconsistent: bool,
        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a decision file seeded with the default criteria and alternatives
    Template {
        #[arg(long, value_enum, default_value_t = TemplateFormat::Yaml)]
        format: TemplateFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum TemplateFormat {
    Yaml,
    Json,
}

impl From<TemplateFormat> for DecisionFileFormat {
    fn from(format: TemplateFormat) -> Self {
        match format {
            TemplateFormat::Yaml => DecisionFileFormat::Yaml,
            TemplateFormat::Json => DecisionFileFormat::Json,
        }
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    DecisionFile(#[from] DecisionFileError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Failed to render report: {0}")]
    Render(#[from] serde_json::Error),
}

/// Exit status when the ranking is withheld because of inconsistent comparisons.
const EXIT_INCONSISTENT: u8 = 2;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode, CliError> {
    let cli = Cli::parse();

    let mut config = AhpConfig::load_from(cli.config.as_deref())?;
    apply_overrides(&mut config, &cli.command);
    config.validate().map_err(ConfigError::from)?;
    init_tracing(&config.logging)?;

    match cli.command {
        Commands::Evaluate {
            file,
            allow_inconsistent,
            json,
            ..
        } => {
            let mut policy = ConsistencyPolicy::from(&config.consistency);
            if allow_inconsistent {
                policy.block_on_violation = false;
            }

            let model = DecisionFile::load(&file)?.into_model().map_err(DecisionFileError::from)?;
            let report = EvaluateDecisionHandler::new(policy).handle(EvaluateDecisionCommand { model })?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render_report(&report));
            }

            if report.is_blocked() {
                Ok(ExitCode::from(EXIT_INCONSISTENT))
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
        Commands::Template { format } => {
            let template = DecisionFile::from_model(&DecisionModel::with_defaults())
                .map_err(DecisionFileError::from)?;
            print!("{}", template.render(format.into())?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Folds command-line overrides into the loaded configuration before it is validated.
fn apply_overrides(config: &mut AhpConfig, command: &Commands) {
    if let Commands::Evaluate {
        threshold: Some(threshold),
        ..
    } = command
    {
        config.consistency.threshold = *threshold;
    }
}

fn init_tracing(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let filter = logging.env_filter()?;
    let builder = fmt().with_env_filter(filter).with_writer(std::io::stderr);
    if logging.json {
        builder.json().init();
    } else {
        builder.with_target(false).init();
    }
    Ok(())
}

fn render_report(report: &DecisionReport) -> String {
    let analysis = &report.analysis;
    let mut out = String::new();

    let _ = writeln!(out, "Criteria weights");
    for (name, weight) in analysis.criterion_weights() {
        let _ = writeln!(out, "  {:<28} {:>7.2}%", name, weight * 100.0);
    }
    let _ = writeln!(
        out,
        "  consistency ratio: {:.1}%",
        analysis.criteria.consistency.cr_percentage()
    );

    let _ = writeln!(out, "\nAlternative consistency by criterion");
    for criterion in &analysis.per_criterion {
        let _ = writeln!(
            out,
            "  {:<28} {:>7.1}%",
            criterion.criterion_name,
            criterion.alternatives.consistency.cr_percentage()
        );
    }

    if let Some(violation) = &report.violation {
        let _ = writeln!(out, "\nwarning: {}", violation);
    }

    match &report.ranking {
        Some(ranking) => {
            let _ = writeln!(out, "\nFinal ranking");
            for (position, score) in ranking.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "  {:>2}. {:<24} {:>7.2}%",
                    position + 1,
                    score.name,
                    score.percentage()
                );
            }
        }
        None => {
            let _ = writeln!(out, "\nFinal ranking withheld until the comparisons are consistent");
        }
    }

    out
}
