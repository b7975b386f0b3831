use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::errors::ParserError;
use crate::formats::{CsvTranscriptParser, JsonTranscriptParser};
use crate::model::{Transcript, TranscriptFormat};

pub trait TranscriptParser {
    fn name(&self) -> &'static str;
    fn parse(&self, content: &str) -> Result<Transcript, ParserError>;
}

pub fn parser_for(format: TranscriptFormat) -> &'static dyn TranscriptParser {
    static JSON: JsonTranscriptParser = JsonTranscriptParser;
    static CSV: CsvTranscriptParser = CsvTranscriptParser;
    match format {
        TranscriptFormat::Csv => &CSV,
        TranscriptFormat::Json | TranscriptFormat::Auto => &JSON,
    }
}

/// Parses in-memory content and returns the messages in chronological order.
pub fn parse_transcript(content: &str, format: TranscriptFormat) -> Result<Transcript, ParserError> {
    let parser = parser_for(format);
    let mut transcript = parser.parse(content)?;
    transcript.sort_chronologically();
    Ok(transcript)
}

/// Reads a chat export from disk. `Auto` picks the parser from the file extension.
pub fn load_transcript(path: &Path, format: TranscriptFormat) -> Result<Transcript, ParserError> {
    let resolved = format.resolve(path);
    let content = fs::read_to_string(path).map_err(|source| ParserError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let parser = parser_for(resolved);
    let mut transcript = parser.parse(&content)?;
    transcript.sort_chronologically();

    for skipped in &transcript.skipped {
        debug!(record = skipped.index, reason = %skipped.reason, "skipped transcript record");
    }
    info!(
        path = %path.display(),
        format = %resolved,
        parser = parser.name(),
        messages = transcript.messages.len(),
        skipped = transcript.skipped.len(),
        "loaded transcript"
    );

    Ok(transcript)
}
