//! scaffolds — Searching for same scaffolds in Homo sapiens enzyme inhibitors.
//! Entry point for the CLI binary.

mod config;

use clap::builder::{PossibleValuesParser, TypedValueParser};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use scaffolds_molecules::chembl::ChemblClient;
use scaffolds_molecules::pipeline::ScaffoldPipeline;
use scaffolds_molecules::report::{render, write_report, LEGEND};
use scaffolds_molecules::stripit::StripItRunner;
use scaffolds_molecules::ScaffoldMode;

#[derive(Debug, Parser)]
#[command(name = "scaffolds", version, about = "Searching for same scaffolds in Homo sapiens enzymes inhibitors")]
struct Cli {
    /// Enzyme target, matched against ChEMBL target synonyms
    target: String,

    /// Inhibitors comparing method
    #[arg(value_parser = PossibleValuesParser::new(ScaffoldMode::names())
        .try_map(|s| s.parse::<ScaffoldMode>()))]
    mode: ScaffoldMode,

    /// Output file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Config file (default: $SCAFFOLDS_CONFIG or ./scaffolds.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for the per-target cache, quarantine and scaffold files
    #[arg(long)]
    workdir: Option<PathBuf>,
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    if cli.target.trim().is_empty() || cli.target.contains(std::path::is_separator) {
        anyhow::bail!("target '{}' cannot be used as a file name", cli.target);
    }

    let config = config::Config::load(cli.config.as_deref())?;
    let workdir = cli.workdir.unwrap_or(config.workspace.path);
    info!("Target: {}, mode: {}, workspace: {:?}", cli.target, cli.mode, workdir);

    let source = ChemblClient::new(config.chembl.settings())?;
    let decomposer = StripItRunner::new(&config.strip_it.executable)
        .with_input_format(&config.strip_it.input_format);
    let pipeline = ScaffoldPipeline::new(Box::new(source), Box::new(decomposer), &workdir);

    let result = pipeline.run(&cli.target, cli.mode).await?;
    if let Some(repair) = &result.repair {
        if !repair.quarantined.is_empty() {
            warn!(
                "{} ligand(s) rejected by strip-it, see {:?}",
                repair.quarantined.len(),
                result.files.wrong_ligands
            );
        }
    }
    if result.is_exhausted() {
        warn!("strip-it could not be repaired further; reporting the partial scaffold table");
    }

    let report = render(&result.groups);
    if let Some(path) = &cli.output {
        write_report(path, &report).await?;
    }

    println!("{}", LEGEND);
    println!("{}", report);
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Logs go to stderr so stdout carries only the report
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("scaffolds=info,warn")),
        )
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::from(1)
        }
    }
}
