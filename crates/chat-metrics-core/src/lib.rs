pub mod classifier;
pub mod error;
pub mod outputs;
pub mod summary;
pub mod turns;

use std::path::Path;

use chat_metrics_parser::{load_transcript, Message, TranscriptFormat};
use chrono::Duration;

pub use classifier::{classify_turn, keyword_tables, Category};
pub use error::{CoreError, Result};
pub use outputs::{render_report, write_outputs, OutputPaths};
pub use summary::{summarize, CategoryTotals, GrandTotals, Summary};
pub use turns::{group_turns, token_estimate, Turn, TurnRow, DEFAULT_CAP_MINUTES};

/// Turns and their aggregate for one transcript.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub turns: Vec<Turn>,
    pub summary: Summary,
}

pub fn analyze_messages(messages: &[Message], cap_minutes: u32) -> Analysis {
    let turns = group_turns(messages, Duration::minutes(i64::from(cap_minutes)));
    let summary = summarize(&turns);
    Analysis { turns, summary }
}

/// Loads a transcript and analyzes it. An export with no usable messages is an error.
pub fn analyze_file(path: &Path, format: TranscriptFormat, cap_minutes: u32) -> Result<Analysis> {
    let transcript = load_transcript(path, format)?;
    if transcript.is_empty() {
        return Err(CoreError::NoMessages);
    }
    Ok(analyze_messages(&transcript.messages, cap_minutes))
}
