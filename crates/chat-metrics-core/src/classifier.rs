//! Keyword classification of turns.
//!
//! Rules are evaluated top to bottom and the first match wins. Reordering the
//! tables changes results.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    DebugLog,
    FeatureDev,
    TestDocsCi,
    Other,
}

impl Category {
    /// Declaration order, used for summary documents.
    pub const ALL: [Category; 4] = [
        Category::DebugLog,
        Category::FeatureDev,
        Category::TestDocsCi,
        Category::Other,
    ];

    /// Order of the console report.
    pub const REPORT_ORDER: [Category; 4] = [
        Category::FeatureDev,
        Category::DebugLog,
        Category::TestDocsCi,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::DebugLog => "DEBUG_LOG",
            Category::FeatureDev => "FEATURE_DEV",
            Category::TestDocsCi => "TEST_DOCS_CI",
            Category::Other => "OTHER",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Category {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "DEBUG_LOG" => Ok(Category::DebugLog),
            "FEATURE_DEV" => Ok(Category::FeatureDev),
            "TEST_DOCS_CI" => Ok(Category::TestDocsCi),
            "OTHER" => Ok(Category::Other),
            other => Err(format!("unknown category '{other}'")),
        }
    }
}

/// Explicit `MODE:` tags. These override every keyword table.
pub const MODE_MARKERS: &[(&str, Category)] = &[
    (r"\bMODE:\s*TEST\b", Category::TestDocsCi),
    (r"\bMODE:\s*DOCS\b", Category::TestDocsCi),
    (r"\bMODE:\s*ASK\b", Category::Other),
    (r"\bMODE:\s*PLAN\b", Category::Other),
    (r"\bMODE:\s*BUILD\b", Category::FeatureDev),
];

pub const DEBUG_PATTERNS: &[&str] = &[
    r"\b(error|exception|traceback|stack\s*trace|crash|panic|bug|fix|regression)\b",
    r"\b(failed|failing|doesn'?t work|broken|hangs|timeout|segfault)\b",
    r"\b(404|401|500|403|502|503)\b",
    r"\b(null reference|undefined|TypeError|NameError|KeyError|IndexError|ReferenceError)\b",
    r"\b(log|stderr|stdout|console\.log|print\(.*\)|logger)\b",
    r"\b(build failed|compile error|lint error|tsc error|pytest failed|unit test failed)\b",
    r"\b(deploy fail|rollback|hotfix|incident)\b",
];

pub const FEATURE_PATTERNS: &[&str] = &[
    r"\b(implement|add|create|build|ship|scaffold|wire|integrate|hook up)\b",
    r"\b(feature|endpoint|api|component|screen|ui|route|schema|migration|model)\b",
    r"\b(refactor|optimi[sz]e|rewrite)\b",
];

pub const TEST_DOCS_CI_PATTERNS: &[&str] = &[
    r"\b(test|unit test|e2e|integration test|playwright|pytest|jest)\b",
    r"\b(doc[s]?|readme|changelog|prd|adr|spec)\b",
    r"\b(ci|pipeline|lint|typecheck|tsc|ruff|black|pre-commit|github actions|prisma migrate|alembic)\b",
];

struct Rule {
    regex: Regex,
    category: Category,
}

fn compile(pattern: &str, category: Category) -> Rule {
    let regex = Regex::new(&format!("(?i){pattern}"))
        .unwrap_or_else(|err| panic!("invalid classifier pattern {pattern}: {err}"));
    Rule { regex, category }
}

static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    let tables = [
        (DEBUG_PATTERNS, Category::DebugLog),
        (TEST_DOCS_CI_PATTERNS, Category::TestDocsCi),
        (FEATURE_PATTERNS, Category::FeatureDev),
    ];

    MODE_MARKERS
        .iter()
        .map(|(pattern, category)| compile(pattern, *category))
        .chain(tables.iter().flat_map(|(patterns, category)| {
            patterns.iter().map(move |pattern| compile(pattern, *category))
        }))
        .collect()
});

/// Classifies a turn from the user text and the reply text (empty if there was no reply).
pub fn classify_turn(user_text: &str, assistant_text: &str) -> Category {
    let blob = format!("{user_text}\n{assistant_text}").to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.regex.is_match(&blob))
        .map(|rule| rule.category)
        .unwrap_or(Category::Other)
}

/// Named pattern tables for `--keyword-dump`. Evaluation checks TEST_DOCS_CI before FEATURE.
pub fn keyword_tables() -> Vec<(&'static str, Vec<&'static str>)> {
    vec![
        (
            "MODE_MARKERS",
            MODE_MARKERS.iter().map(|(pattern, _)| *pattern).collect(),
        ),
        ("DEBUG_PATTERNS", DEBUG_PATTERNS.to_vec()),
        ("FEATURE_PATTERNS", FEATURE_PATTERNS.to_vec()),
        ("TEST_DOCS_CI_PATTERNS", TEST_DOCS_CI_PATTERNS.to_vec()),
    ]
}
