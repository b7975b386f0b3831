mod common;
mod csv_table;
mod json_document;

pub use common::{parse_timestamp, TIMESTAMP_FORMATS};
pub use csv_table::CsvTranscriptParser;
pub use json_document::JsonTranscriptParser;

pub(crate) use common::{
    header_positions, lookup_csv, lookup_json, CONTENT_FIELDS, ROLE_FIELDS, TIMESTAMP_FIELDS,
};
