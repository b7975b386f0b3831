use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Table};
use csv::WriterBuilder;
use tracing::info;

use crate::classifier::Category;
use crate::error::Result;
use crate::summary::Summary;
use crate::turns::Turn;

pub const TURNS_FILE_NAME: &str = "by_turn.csv";
pub const SUMMARY_FILE_NAME: &str = "summary.json";

pub const TURN_COLUMNS: [&str; 7] = [
    "user_time",
    "duration_minutes",
    "category",
    "user_chars",
    "assistant_chars",
    "tokens_est",
    "user_excerpt",
];

#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub turns_csv: PathBuf,
    pub summary_json: PathBuf,
}

/// Writes `by_turn.csv` and `summary.json` into `out_dir`, creating it if needed.
pub fn write_outputs(out_dir: &Path, turns: &[Turn], summary: &Summary) -> Result<OutputPaths> {
    fs::create_dir_all(out_dir)?;
    let paths = OutputPaths {
        turns_csv: out_dir.join(TURNS_FILE_NAME),
        summary_json: out_dir.join(SUMMARY_FILE_NAME),
    };

    write_turns_csv(&paths.turns_csv, turns)?;
    write_summary_json(&paths.summary_json, summary)?;
    info!(
        turns = turns.len(),
        out_dir = %out_dir.display(),
        "wrote chat metrics outputs"
    );
    Ok(paths)
}

/// The header row is written even when there are no turns.
pub fn write_turns_csv(path: &Path, turns: &[Turn]) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_path(path)?;
    writer.write_record(TURN_COLUMNS)?;
    for turn in turns {
        writer.serialize(turn.to_row())?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_summary_json(path: &Path, summary: &Summary) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, summary)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Human-readable summary printed after a run.
pub fn render_report(summary: &Summary, cap_minutes: u32, turns_csv: &Path) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "category",
        "mins",
        "mins %",
        "tokens",
        "tokens %",
    ]);

    for category in Category::REPORT_ORDER {
        let totals = summary.totals.get(category);
        table.add_row(vec![
            Cell::new(category.as_str()),
            Cell::new(format!("{:.2}", totals.mins)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.1}", totals.mins_share)).set_alignment(CellAlignment::Right),
            Cell::new(totals.tokens).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.1}", totals.tokens_share)).set_alignment(CellAlignment::Right),
        ]);
    }

    format!(
        "=== Chat Metrics Summary ===\n\
         Total credited minutes: {:.2} (cap {cap_minutes}m/turn)\n\
         Total estimated tokens: {} (~chars/4)\n\
         {table}\n\n\
         Per-turn details -> {}",
        summary.grand.mins,
        summary.grand.tokens,
        turns_csv.display()
    )
}
