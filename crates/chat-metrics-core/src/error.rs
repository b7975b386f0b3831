// crates/chat-metrics-core/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Transcript loading failed: {0}")]
    Parser(#[from] chat_metrics_parser::ParserError),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV writing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No messages parsed. Check --format and input structure.")]
    NoMessages,
}

pub type Result<T> = std::result::Result<T, CoreError>;
