use std::path::PathBuf;

use anyhow::{Context, Result};
use chat_metrics_core::{analyze_file, keyword_tables, render_report, write_outputs};
use chat_metrics_parser::TranscriptFormat;
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Quantify how much of a chat went to debugging versus feature work",
    long_about = None
)]
struct Cli {
    /// Path to a JSON or CSV chat export
    #[arg(long, env = "CHAT_METRICS_CHAT", required_unless_present = "keyword_dump")]
    chat: Option<PathBuf>,
    /// Input format; `auto` picks by file extension
    #[arg(long, value_enum, env = "CHAT_METRICS_FORMAT", default_value_t = FormatArg::Auto)]
    format: FormatArg,
    /// Minutes credited to a single turn at most
    #[arg(long, env = "CHAT_METRICS_CAP_MINS", default_value_t = chat_metrics_core::DEFAULT_CAP_MINUTES)]
    cap_mins: u32,
    /// Output directory for by_turn.csv and summary.json
    #[arg(long, env = "CHAT_METRICS_OUT", required_unless_present = "keyword_dump")]
    out: Option<PathBuf>,
    /// Print the classifier keyword tables and exit
    #[arg(long)]
    keyword_dump: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Auto,
    Json,
    Csv,
}

impl From<FormatArg> for TranscriptFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Auto => TranscriptFormat::Auto,
            FormatArg::Json => TranscriptFormat::Json,
            FormatArg::Csv => TranscriptFormat::Csv,
        }
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();

    if cli.keyword_dump {
        print_keyword_tables();
        return Ok(());
    }

    let (Some(chat), Some(out)) = (cli.chat, cli.out) else {
        anyhow::bail!("--chat and --out are required");
    };

    let analysis = analyze_file(&chat, cli.format.into(), cli.cap_mins)
        .with_context(|| format!("failed to analyze {}", chat.display()))?;
    info!(turns = analysis.turns.len(), cap_mins = cli.cap_mins, "grouped turns");

    let paths = write_outputs(&out, &analysis.turns, &analysis.summary)
        .with_context(|| format!("failed to write outputs to {}", out.display()))?;

    println!();
    println!("{}", render_report(&analysis.summary, cli.cap_mins, &paths.turns_csv));
    println!("Notes: Token est. is crude; for exact numbers, join with provider usage logs by timestamp.");
    println!("      Run with --keyword-dump to review the classifier patterns.");

    Ok(())
}

fn print_keyword_tables() {
    for (name, patterns) in keyword_tables() {
        println!("{name}:");
        for pattern in patterns {
            println!("  {pattern}");
        }
    }
}
