use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("failed to read transcript {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{parser} JSON error: {source}")]
    Json {
        parser: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{parser} CSV error: {source}")]
    Csv {
        parser: &'static str,
        #[source]
        source: csv::Error,
    },

    #[error("{parser} document shape not recognized: {reason}")]
    UnrecognizedShape {
        parser: &'static str,
        reason: String,
    },
}

/// Why a single record was dropped while loading a transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NotAnObject,
    MissingTimestamp,
    MissingRole,
    InvalidTimestamp(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NotAnObject => f.write_str("record is not an object"),
            SkipReason::MissingTimestamp => f.write_str("missing timestamp"),
            SkipReason::MissingRole => f.write_str("missing role"),
            SkipReason::InvalidTimestamp(value) => {
                write!(f, "unrecognized timestamp format '{value}'")
            }
        }
    }
}
