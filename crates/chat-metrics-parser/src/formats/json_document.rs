use serde_json::Value;

use crate::errors::{ParserError, SkipReason};
use crate::model::{Message, Role, Transcript};
use crate::registry::TranscriptParser;

use super::{lookup_json, parse_timestamp, CONTENT_FIELDS, ROLE_FIELDS, TIMESTAMP_FIELDS};

/// Accepts either `{"messages": [...]}` or a bare array of message objects.
pub struct JsonTranscriptParser;

impl JsonTranscriptParser {
    const NAME: &'static str = "JSON";

    fn items(root: Value) -> Result<Vec<Value>, ParserError> {
        match root {
            Value::Array(items) => Ok(items),
            Value::Object(mut object) => match object.remove("messages") {
                Some(Value::Array(items)) => Ok(items),
                Some(other) => Err(ParserError::UnrecognizedShape {
                    parser: Self::NAME,
                    reason: format!("'messages' must be a list, found {}", value_kind(&other)),
                }),
                None => Err(ParserError::UnrecognizedShape {
                    parser: Self::NAME,
                    reason: "expected a list or an object with a 'messages' field".to_string(),
                }),
            },
            other => Err(ParserError::UnrecognizedShape {
                parser: Self::NAME,
                reason: format!("expected a list or an object, found {}", value_kind(&other)),
            }),
        }
    }

    fn message_from(item: &Value) -> Result<Message, SkipReason> {
        let object = item.as_object().ok_or(SkipReason::NotAnObject)?;

        let timestamp = lookup_json(object, TIMESTAMP_FIELDS).ok_or(SkipReason::MissingTimestamp)?;
        let role = lookup_json(object, ROLE_FIELDS)
            .and_then(Value::as_str)
            .ok_or(SkipReason::MissingRole)?;
        let timestamp = match timestamp {
            Value::String(text) => parse_timestamp(text)?,
            other => return Err(SkipReason::InvalidTimestamp(other.to_string())),
        };
        let content = match lookup_json(object, CONTENT_FIELDS) {
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        };

        Ok(Message {
            timestamp,
            role: Role::from(role),
            content,
        })
    }
}

impl TranscriptParser for JsonTranscriptParser {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn parse(&self, content: &str) -> Result<Transcript, ParserError> {
        let root: Value = serde_json::from_str(content).map_err(|source| ParserError::Json {
            parser: Self::NAME,
            source,
        })?;

        let mut transcript = Transcript::default();
        for (index, item) in Self::items(root)?.iter().enumerate() {
            match Self::message_from(item) {
                Ok(message) => transcript.push_message(message),
                Err(reason) => transcript.push_skipped(index, reason),
            }
        }
        Ok(transcript)
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
