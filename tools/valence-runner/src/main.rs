use anyhow::Context;
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use valence_frame::{FrameScope, RefinementConfig, ValencyAnalysis};
use valence_kmeans::RngSource;
use valence_protocol::SentenceRecord;

#[derive(Parser)]
#[command(author, version, about = "Derives the valency frame of a verb from parsed sentences")]
struct Cli {
    /// JSON array of sentence records
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    #[arg(long, default_value = "kämpfen")]
    verb: String,

    /// JSON refinement config; missing fields use the defaults
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Only count main clauses
    #[arg(long)]
    main_clause: bool,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RefinementConfig::default(),
    };
    if cli.main_clause {
        config.scope = FrameScope::MainClause;
    }

    info!(input = ?cli.input, "reading sentences");
    let input = fs::read_to_string(&cli.input).with_context(|| format!("reading {}", cli.input.display()))?;
    let records: Vec<SentenceRecord> = serde_json::from_str(&input).context("parsing sentence records")?;

    let mut analysis = ValencyAnalysis::new(records, cli.verb.as_str());
    let raw = analysis.initialize_frame(config.scope);
    println!("Valency frame of \"{}\" ({} sentences):", cli.verb, raw.sentence_count());
    print!("{}", raw);

    let mut source = RngSource::from_seed_option(config.seed);
    match analysis.refine(&config, &mut source) {
        Ok(refined) => {
            println!();
            println!("Refined frame:");
            print!("{}", refined);
            println!("Consensus count: {}", refined.consensus_count());
        }
        Err(err) => warn!(error = %err, "refinement stopped"),
    }
    Ok(())
}

fn load_config(path: &Path) -> anyhow::Result<RefinementConfig> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}
