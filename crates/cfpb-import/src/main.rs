use std::path::PathBuf;

use anyhow::{Context, Result};
use cfpb_import::{convert_complaints, preview, write_facts, ImportError, DEFAULT_LIMIT};
use clap::Parser;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Convert CFPB complaints CSV to facts JSON", long_about = None)]
struct Cli {
    /// Input CSV file path
    #[arg(long, env = "CFPB_INPUT", default_value = "data/complaints.csv")]
    input: PathBuf,
    /// Output JSON file path
    #[arg(long, env = "CFPB_OUTPUT", default_value = "data/facts_seed.json")]
    output: PathBuf,
    /// Maximum number of facts to emit
    #[arg(long, env = "CFPB_LIMIT", default_value_t = DEFAULT_LIMIT)]
    limit: usize,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();

    let import = convert_complaints(&cli.input, cli.limit);
    if let Some(failure) = &import.failure {
        error!(path = %cli.input.display(), "{failure}");
        if matches!(failure, ImportError::NotFound { .. }) {
            println!("To get CFPB data:");
            println!("1. Visit https://www.consumerfinance.gov/data-research/consumer-complaints/");
            println!("2. Click 'Export data' and download CSV with complaint narratives");
            println!("3. Save as data/complaints.csv");
        }
    }

    let Some(first) = import.facts.first() else {
        warn!(path = %cli.input.display(), "no facts generated; output not written");
        println!("No facts generated. Please check your input file.");
        return Ok(());
    };

    write_facts(&cli.output, &import.facts)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;

    println!("Wrote {} facts to {}", import.facts.len(), cli.output.display());
    println!("First fact preview:");
    println!("{}", preview(first)?);

    Ok(())
}
