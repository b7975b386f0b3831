use chat_metrics_core::{classify_turn, keyword_tables, Category};

#[test]
fn traceback_beats_feature_language() {
    assert_eq!(
        classify_turn("I tried to implement the parser but got a traceback", ""),
        Category::DebugLog
    );
}

#[test]
fn build_marker_overrides_debug_keywords() {
    assert_eq!(
        classify_turn("MODE: BUILD the retry logic, there is an error in the old one", "Sure, fix incoming"),
        Category::FeatureDev
    );
    assert_eq!(classify_turn("mode:build", ""), Category::FeatureDev);
}

#[test]
fn mode_markers_follow_their_table_order() {
    assert_eq!(classify_turn("Mode: test please", "crash"), Category::TestDocsCi);
    assert_eq!(classify_turn("MODE:docs", ""), Category::TestDocsCi);
    assert_eq!(classify_turn("MODE: ask why is this broken", ""), Category::Other);
    assert_eq!(classify_turn("MODE: plan", "implement later"), Category::Other);
    // TEST is checked before BUILD.
    assert_eq!(classify_turn("MODE: build", "MODE: test"), Category::TestDocsCi);
}

#[test]
fn marker_needs_a_whole_label() {
    // "MODE: testing" is not a TEST marker; "testing" matches no keyword either.
    assert_eq!(classify_turn("MODE: testing", ""), Category::Other);
}

#[test]
fn fix_counts_as_debugging() {
    assert_eq!(classify_turn("fix the endpoint", ""), Category::DebugLog);
}

#[test]
fn tests_and_docs_are_carved_out_of_feature_work() {
    assert_eq!(
        classify_turn("add a pytest for the new endpoint", ""),
        Category::TestDocsCi
    );
    assert_eq!(classify_turn("update the README", ""), Category::TestDocsCi);
    assert_eq!(
        classify_turn("set up github actions", "done"),
        Category::TestDocsCi
    );
}

#[test]
fn feature_vocabulary_and_fallback() {
    assert_eq!(
        classify_turn("please implement a settings screen", "on it"),
        Category::FeatureDev
    );
    assert_eq!(classify_turn("refactor the reducer", ""), Category::FeatureDev);
    assert_eq!(
        classify_turn("what do you think about the roadmap?", "sounds good"),
        Category::Other
    );
}

#[test]
fn assistant_reply_participates() {
    assert_eq!(
        classify_turn("why is it slow?", "The logger flushes on every call."),
        Category::DebugLog
    );
}

#[test]
fn keyword_dump_lists_markers_then_keyword_tables() {
    let names: Vec<&str> = keyword_tables().iter().map(|(name, _)| *name).collect();
    assert_eq!(
        names,
        [
            "MODE_MARKERS",
            "DEBUG_PATTERNS",
            "FEATURE_PATTERNS",
            "TEST_DOCS_CI_PATTERNS"
        ]
    );
}
