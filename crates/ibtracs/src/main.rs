use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use ibtracs_core::{run_pipeline, PipelineConfig};
use ibtracs_parser::default_formats;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "IBTrACS best-track cleaning tool", long_about = None)]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Filter a regional track file to 6-hourly fixes and write the processed CSV
    Process(ProcessArgs),
    /// List the accepted ISO_TIME formats in the order they are tried
    Formats,
}

#[derive(Args, Debug, Default)]
struct ProcessArgs {
    /// TOML file with pipeline settings; flags below take precedence
    #[arg(long)]
    config: Option<PathBuf>,
    /// Basin code used in the file names, e.g. NA, EP, WP
    #[arg(long)]
    region: Option<String>,
    /// Dataset version suffix, e.g. 4r01
    #[arg(long)]
    dataset_version: Option<String>,
    /// Directory holding the source CSV
    #[arg(long)]
    input_dir: Option<PathBuf>,
    /// Directory for the processed output
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Also write a parquet copy of the output
    #[arg(long)]
    parquet: bool,
    /// Print the run summary as JSON on stdout
    #[arg(long)]
    summary_json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    match cli.command {
        Command::Process(args) => handle_process(args),
        Command::Formats => {
            for format in default_formats() {
                println!("{:<12} {}", format.name(), format.pattern());
            }
            Ok(())
        }
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn handle_process(args: ProcessArgs) -> Result<()> {
    let config = resolve_config(&args)?;
    let summary = run_pipeline(&config)
        .with_context(|| format!("failed to process {}", config.input_path().display()))?;

    if args.summary_json {
        println!("{}", summary.to_json()?);
    } else {
        info!(output = %summary.output_path.display(), "done");
    }
    Ok(())
}

fn resolve_config(args: &ProcessArgs) -> Result<PipelineConfig> {
    let mut config = match &args.config {
        Some(path) => PipelineConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => PipelineConfig::default(),
    };

    if let Some(region) = &args.region {
        config.region = region.clone();
    }
    if let Some(version) = &args.dataset_version {
        config.version = version.clone();
    }
    if let Some(dir) = &args.input_dir {
        config.input_dir = dir.clone();
    }
    if let Some(dir) = &args.output_dir {
        config.output_dir = dir.clone();
    }
    if args.parquet {
        config.write_parquet = true;
    }

    config.validate().context("invalid pipeline configuration")?;
    Ok(config)
}
