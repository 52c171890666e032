//! Driver synthesis CLI
//!
//! # Usage
//!
//! ```bash
//! # Handlers listed one descriptor per line, class models under ./model
//! synth-driver --handlers routes.txt --classpath model
//!
//! # JSON output with the reserved _dummy source/sink
//! synth-driver --handlers routes.txt --classpath model --format json --synthetic-endpoints
//! ```

use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use entrypoint_synth::config::EndpointMode;
use entrypoint_synth::{
    HandlerEntryPointCreator, Scene, SynthesisConfig, SynthesisOutcome, YamlClassSource,
};

#[derive(Parser)]
#[command(name = "synth-driver")]
#[command(about = "Synthesize an analysis entry point for request handler methods", long_about = None)]
struct Cli {
    /// File with one handler descriptor per line ('#' starts a comment)
    #[arg(long)]
    handlers: PathBuf,

    /// Directory of YAML class models
    #[arg(long)]
    classpath: Option<PathBuf>,

    /// Synthesis configuration (YAML schema v1)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Use the reserved _dummy source and sink
    #[arg(long)]
    synthetic_endpoints: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(outcome) => {
            if !outcome.is_complete() {
                warn!("Driver is incomplete: {} warnings", outcome.warnings.len());
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<SynthesisOutcome, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => SynthesisConfig::from_yaml(path)?,
        None => SynthesisConfig::default(),
    };
    if cli.synthetic_endpoints {
        config.endpoints = EndpointMode::Synthetic;
    }

    let descriptors = read_descriptors(&cli.handlers)?;
    info!(
        "Read {} handler descriptors from {}",
        descriptors.len(),
        cli.handlers.display()
    );

    let mut scene = Scene::with_jdk_stubs();
    if let Some(classpath) = &cli.classpath {
        scene.set_source(Box::new(YamlClassSource::new(classpath)));
        let loaded = scene.load_all_available()?;
        info!("Loaded {} classes from {}", loaded, classpath.display());
    }

    let creator = HandlerEntryPointCreator::with_config(&descriptors, config)?;
    let outcome = creator.synthesize(&mut scene)?;

    match cli.format {
        OutputFormat::Text => print!("{}", outcome.procedure),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
    }
    Ok(outcome)
}

fn read_descriptors(path: &Path) -> std::io::Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}
