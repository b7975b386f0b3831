pub mod errors;
pub mod formats;
pub mod model;
mod registry;

pub use errors::{ParserError, SkipReason};
pub use formats::{parse_timestamp, TIMESTAMP_FORMATS};
pub use model::{Message, Role, SkippedRecord, Transcript, TranscriptFormat};
pub use registry::{load_transcript, parse_transcript, parser_for, TranscriptParser};

#[cfg(test)]
mod tests;
