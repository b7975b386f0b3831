use csv::{ReaderBuilder, StringRecord};

use crate::errors::{ParserError, SkipReason};
use crate::model::{Message, Role, Transcript};
use crate::registry::TranscriptParser;

use super::{
    header_positions, lookup_csv, parse_timestamp, CONTENT_FIELDS, ROLE_FIELDS, TIMESTAMP_FIELDS,
};

/// Header row plus one message per data row. Cells are trimmed.
pub struct CsvTranscriptParser;

struct ColumnMap {
    timestamp: Vec<usize>,
    role: Vec<usize>,
    content: Vec<usize>,
}

impl ColumnMap {
    fn from_header(header: &StringRecord) -> Self {
        Self {
            timestamp: header_positions(header, TIMESTAMP_FIELDS),
            role: header_positions(header, ROLE_FIELDS),
            content: header_positions(header, CONTENT_FIELDS),
        }
    }
}

impl CsvTranscriptParser {
    const NAME: &'static str = "CSV";

    fn message_from(columns: &ColumnMap, record: &StringRecord) -> Result<Message, SkipReason> {
        let timestamp = lookup_csv(record, &columns.timestamp).ok_or(SkipReason::MissingTimestamp)?;
        let role = lookup_csv(record, &columns.role).ok_or(SkipReason::MissingRole)?;
        let timestamp = parse_timestamp(timestamp)?;
        let content = lookup_csv(record, &columns.content).unwrap_or_default();

        Ok(Message {
            timestamp,
            role: Role::from(role),
            content: content.to_string(),
        })
    }
}

impl TranscriptParser for CsvTranscriptParser {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn parse(&self, content: &str) -> Result<Transcript, ParserError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(content.as_bytes());

        let header = reader
            .headers()
            .map_err(|source| ParserError::Csv {
                parser: Self::NAME,
                source,
            })?
            .clone();
        let columns = ColumnMap::from_header(&header);

        let mut transcript = Transcript::default();
        for (index, record) in reader.records().enumerate() {
            let record = record.map_err(|source| ParserError::Csv {
                parser: Self::NAME,
                source,
            })?;
            match Self::message_from(&columns, &record) {
                Ok(message) => transcript.push_message(message),
                Err(reason) => transcript.push_skipped(index, reason),
            }
        }
        Ok(transcript)
    }
}
