//! Converts CFPB consumer-complaint exports into `facts_seed.json` records.

use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

pub const DEFAULT_LIMIT: usize = 1000;
pub const MIN_NARRATIVE_CHARS: usize = 50;
pub const PLAINTIFF: &str = "Consumer";
pub const UNKNOWN_COMPANY: &str = "Unknown Company";
const PREVIEW_CHARS: usize = 500;

const COMPANY: [&str; 2] = ["Company", "company"];
const NARRATIVE: [&str; 2] = ["Consumer complaint narrative", "consumer_complaint_narrative"];
const STATE: [&str; 2] = ["State", "state"];
const PRODUCT: [&str; 2] = ["Product", "product"];
const DATE_RECEIVED: [&str; 2] = ["Date received", "date_received"];

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("CSV file not found at {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error reading CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to write facts: {0}")]
    Write(#[from] io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ImportError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fact {
    pub parties: Parties,
    pub incident: String,
    pub damages: Damages,
    pub venue: String,
    pub category: String,
    pub incident_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parties {
    pub plaintiff: String,
    pub defendant: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Damages {
    pub amount_claimed: Option<f64>,
}

/// Outcome of an import. A failed read leaves `facts` empty and explains why in `failure`.
#[derive(Debug, Default)]
pub struct FactImport {
    pub facts: Vec<Fact>,
    pub failure: Option<ImportError>,
}

struct ColumnMap {
    company: Vec<usize>,
    narrative: Vec<usize>,
    state: Vec<usize>,
    product: Vec<usize>,
    date_received: Vec<usize>,
}

impl ColumnMap {
    fn from_header(header: &StringRecord) -> Self {
        let positions = |names: [&str; 2]| -> Vec<usize> {
            names
                .iter()
                .filter_map(|name| header.iter().position(|column| column == *name))
                .collect()
        };
        Self {
            company: positions(COMPANY),
            narrative: positions(NARRATIVE),
            state: positions(STATE),
            product: positions(PRODUCT),
            date_received: positions(DATE_RECEIVED),
        }
    }
}

/// First non-empty cell among the candidate columns, untrimmed.
fn field<'a>(record: &'a StringRecord, positions: &[usize]) -> Option<&'a str> {
    positions
        .iter()
        .filter_map(|&index| record.get(index))
        .find(|value| !value.is_empty())
}

fn trimmed(record: &StringRecord, positions: &[usize]) -> String {
    field(record, positions).unwrap_or_default().trim().to_string()
}

fn fact_from(columns: &ColumnMap, record: &StringRecord) -> Option<Fact> {
    let narrative = trimmed(record, &columns.narrative);
    if narrative.chars().count() < MIN_NARRATIVE_CHARS {
        return None;
    }

    let company = field(record, &columns.company)
        .unwrap_or(UNKNOWN_COMPANY)
        .trim()
        .to_string();

    Some(Fact {
        parties: Parties {
            plaintiff: PLAINTIFF.to_string(),
            defendant: company,
        },
        incident: narrative,
        damages: Damages::default(),
        venue: trimmed(record, &columns.state),
        category: trimmed(record, &columns.product),
        incident_date: trimmed(record, &columns.date_received),
    })
}

/// Converts complaint rows in input order, stopping once `limit` facts have been produced.
pub fn convert_records<R: Read>(reader: R, limit: usize) -> Result<Vec<Fact>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let columns = ColumnMap::from_header(reader.headers()?);

    let mut facts = Vec::new();
    for record in reader.records() {
        if facts.len() >= limit {
            break;
        }
        if let Some(fact) = fact_from(&columns, &record?) {
            facts.push(fact);
        }
    }
    Ok(facts)
}

/// Reads a complaint export from disk. Read and parse failures are reported, never raised.
pub fn convert_complaints(path: &Path, limit: usize) -> FactImport {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(source) if source.kind() == io::ErrorKind::NotFound => {
            return FactImport {
                facts: Vec::new(),
                failure: Some(ImportError::NotFound {
                    path: path.to_path_buf(),
                }),
            }
        }
        Err(source) => {
            return FactImport {
                facts: Vec::new(),
                failure: Some(ImportError::Io {
                    path: path.to_path_buf(),
                    source,
                }),
            }
        }
    };

    match convert_records(file, limit) {
        Ok(facts) => {
            info!(count = facts.len(), path = %path.display(), "converted complaints to facts");
            FactImport {
                facts,
                failure: None,
            }
        }
        Err(err) => FactImport {
            facts: Vec::new(),
            failure: Some(err),
        },
    }
}

/// Writes facts as a pretty-printed JSON array, creating the parent directory if needed.
pub fn write_facts(path: &Path, facts: &[Fact]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, facts)?;
    writer.flush()?;
    Ok(())
}

/// Pretty JSON of one fact, cut to a console-friendly length.
pub fn preview(fact: &Fact) -> Result<String> {
    let pretty = serde_json::to_string_pretty(fact)?;
    let mut cut: String = pretty.chars().take(PREVIEW_CHARS).collect();
    cut.push_str("...");
    Ok(cut)
}
