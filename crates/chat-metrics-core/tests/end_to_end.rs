use std::fs;

use chat_metrics_core::{analyze_file, render_report, write_outputs, Category, CoreError};
use chat_metrics_parser::TranscriptFormat;

const TRANSCRIPT: &str = r#"{"messages": [
    {"timestamp": "2025-11-10T10:01:00Z", "role": "assistant", "content": "found it, rolling back"},
    {"timestamp": "2025-11-10T10:00:00Z", "role": "user", "content": "getting a 500 error on deploy"}
]}"#;

#[test]
fn debug_transcript_produces_outputs() {
    let dir = tempfile::tempdir().expect("tempdir");
    let chat = dir.path().join("chat.json");
    fs::write(&chat, TRANSCRIPT).expect("write transcript");

    let analysis = analyze_file(&chat, TranscriptFormat::Auto, 20).expect("analysis failed");

    assert_eq!(analysis.turns.len(), 1);
    let turn = &analysis.turns[0];
    assert_eq!(turn.category, Category::DebugLog);
    assert_eq!(turn.duration_minutes(), 20.0);
    assert!(turn.tokens_est > 0);
    assert_eq!(turn.tokens_est, 8 + 6);

    let out_dir = dir.path().join("out");
    let paths = write_outputs(&out_dir, &analysis.turns, &analysis.summary).expect("write outputs");

    let csv = fs::read_to_string(&paths.turns_csv).expect("read csv");
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("user_time,duration_minutes,category,user_chars,assistant_chars,tokens_est,user_excerpt")
    );
    assert_eq!(
        lines.next(),
        Some("2025-11-10 10:00:00,20.0,DEBUG_LOG,29,22,14,getting a 500 error on deploy")
    );
    assert_eq!(lines.next(), None);

    let summary: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&paths.summary_json).expect("read summary"))
            .expect("summary is JSON");
    assert_eq!(summary["totals"]["DEBUG_LOG"]["mins"], 20.0);
    assert_eq!(summary["totals"]["DEBUG_LOG"]["mins_share"], 100.0);
    assert_eq!(summary["grand"]["tokens"], 14);

    let report = render_report(&analysis.summary, 20, &paths.turns_csv);
    assert!(report.contains("Total credited minutes: 20.00 (cap 20m/turn)"));
    assert!(report.contains("DEBUG_LOG"));
}

#[test]
fn transcript_without_usable_messages_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let chat = dir.path().join("chat.csv");
    fs::write(&chat, "timestamp,role,content\nsoon,user,hi\n").expect("write transcript");

    let err = analyze_file(&chat, TranscriptFormat::Auto, 20).unwrap_err();
    assert!(matches!(err, CoreError::NoMessages));
}

#[test]
fn unrecognized_root_propagates() {
    let dir = tempfile::tempdir().expect("tempdir");
    let chat = dir.path().join("chat.json");
    fs::write(&chat, r#"{"rows": []}"#).expect("write transcript");

    let err = analyze_file(&chat, TranscriptFormat::Json, 20).unwrap_err();
    assert!(matches!(err, CoreError::Parser(_)));
}

#[test]
fn empty_turn_table_still_has_header() {
    let dir = tempfile::tempdir().expect("tempdir");
    let chat = dir.path().join("chat.json");
    fs::write(
        &chat,
        r#"[{"timestamp": "2025-11-10 10:00:00", "role": "assistant", "content": "hi"}]"#,
    )
    .expect("write transcript");

    let analysis = analyze_file(&chat, TranscriptFormat::Auto, 20).expect("analysis failed");
    assert!(analysis.turns.is_empty());

    let paths = write_outputs(dir.path(), &analysis.turns, &analysis.summary).expect("write");
    let csv = fs::read_to_string(paths.turns_csv).expect("read csv");
    assert_eq!(csv.lines().count(), 1);
}
