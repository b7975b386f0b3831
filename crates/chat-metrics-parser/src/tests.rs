use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::errors::{ParserError, SkipReason};
use crate::model::{Role, TranscriptFormat};
use crate::{load_transcript, parse_transcript, parser_for};

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name)
}

fn fixture(name: &str) -> String {
    let full_path = fixture_path(name);
    fs::read_to_string(&full_path)
        .unwrap_or_else(|err| panic!("failed to read fixture {}: {}", full_path.display(), err))
}

#[test]
fn parses_wrapped_json_and_sorts_by_time() {
    let transcript = parse_transcript(&fixture("transcript_wrapped.json"), TranscriptFormat::Json)
        .expect("wrapped JSON parse failed");

    let roles: Vec<&str> = transcript.messages.iter().map(|m| m.role.as_str()).collect();
    assert_eq!(roles, ["user", "assistant", "user", "assistant"]);
    assert!(transcript
        .messages
        .windows(2)
        .all(|pair| pair[0].timestamp <= pair[1].timestamp));

    assert_eq!(transcript.messages[2].content, "MODE: test add coverage");
    assert_eq!(transcript.messages[3].content, r#"["structured","content"]"#);
    assert_eq!(transcript.skipped.len(), 3);
    assert!(transcript.skipped.iter().any(|skip| skip.reason
        == SkipReason::InvalidTimestamp("not a date".to_string())));
    assert!(transcript
        .skipped
        .iter()
        .any(|skip| skip.reason == SkipReason::MissingRole));
    assert!(transcript
        .skipped
        .iter()
        .any(|skip| skip.reason == SkipReason::MissingTimestamp));
}

#[test]
fn parses_bare_json_array() {
    let transcript = parse_transcript(&fixture("transcript_bare.json"), TranscriptFormat::Json)
        .expect("bare JSON parse failed");

    assert_eq!(transcript.messages.len(), 2);
    assert_eq!(transcript.messages[0].role, Role::User);
    assert_eq!(
        transcript.messages[0].timestamp,
        NaiveDate::from_ymd_opt(2025, 11, 10)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    );
    assert_eq!(transcript.messages[1].content, "found it, rolling back");
}

#[test]
fn parses_csv_with_capitalised_headers() {
    let transcript = parse_transcript(&fixture("transcript.csv"), TranscriptFormat::Csv)
        .expect("CSV parse failed");

    assert_eq!(transcript.messages.len(), 3);
    assert_eq!(transcript.messages[0].role, Role::User);
    assert_eq!(transcript.messages[0].content, "How do I rotate logs?");
    assert_eq!(transcript.messages[1].content, "Sure thing.");
    assert_eq!(transcript.messages[2].role, Role::Other("system".to_string()));
    assert_eq!(transcript.skipped.len(), 2);
}

#[test]
fn ties_keep_source_order() {
    let content = r#"[
        {"timestamp": "2025-01-01 00:00:00", "role": "user", "content": "first"},
        {"timestamp": "2025-01-01 00:00:00", "role": "user", "content": "second"}
    ]"#;
    let transcript = parse_transcript(content, TranscriptFormat::Json).expect("parse failed");
    assert_eq!(transcript.messages[0].content, "first");
    assert_eq!(transcript.messages[1].content, "second");
}

#[test]
fn rejects_unrecognized_json_root() {
    let err = parse_transcript(r#"{"items": []}"#, TranscriptFormat::Json).unwrap_err();
    assert!(matches!(err, ParserError::UnrecognizedShape { .. }));

    let err = parse_transcript("42", TranscriptFormat::Json).unwrap_err();
    assert!(matches!(err, ParserError::UnrecognizedShape { .. }));

    let err = parse_transcript("{not json", TranscriptFormat::Json).unwrap_err();
    assert!(matches!(err, ParserError::Json { .. }));
}

#[test]
fn load_detects_format_from_extension() {
    let transcript = load_transcript(&fixture_path("transcript.csv"), TranscriptFormat::Auto)
        .expect("CSV load failed");
    assert_eq!(transcript.messages.len(), 3);

    let transcript = load_transcript(&fixture_path("transcript_bare.json"), TranscriptFormat::Auto)
        .expect("JSON load failed");
    assert_eq!(transcript.messages.len(), 2);
}

#[test]
fn format_resolution_defaults_to_json() {
    let resolve = |name: &str| TranscriptFormat::Auto.resolve(&PathBuf::from(name));
    assert_eq!(resolve("chat.CSV"), TranscriptFormat::Csv);
    assert_eq!(resolve("chat.json"), TranscriptFormat::Json);
    assert_eq!(resolve("chat.txt"), TranscriptFormat::Json);
    assert_eq!(
        TranscriptFormat::Csv.resolve(&PathBuf::from("chat.json")),
        TranscriptFormat::Csv
    );
}

#[test]
fn missing_file_is_an_io_error() {
    let err = load_transcript(&fixture_path("does_not_exist.json"), TranscriptFormat::Auto)
        .unwrap_err();
    assert!(matches!(err, ParserError::Io { .. }));
}

#[test]
fn resolved_format_selects_named_parser() {
    let resolved = TranscriptFormat::Auto.resolve(&fixture_path("transcript.csv"));
    assert_eq!(resolved.to_string(), "csv");
    assert_eq!(parser_for(resolved).name(), "CSV");
    assert_eq!(parser_for(TranscriptFormat::Auto).name(), "JSON");
    assert_eq!(parser_for(TranscriptFormat::Json).name(), "JSON");
}
