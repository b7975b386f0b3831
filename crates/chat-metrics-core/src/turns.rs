use chrono::{Duration, NaiveDateTime, Timelike};
use chat_metrics_parser::Message;
use serde::Serialize;

use crate::classifier::{classify_turn, Category};

pub const DEFAULT_CAP_MINUTES: u32 = 20;
pub const EXCERPT_CHARS: usize = 140;
const EXCERPT_MARKER: char = '…';

/// One user message and the first assistant reply before the next user message.
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub user_time: NaiveDateTime,
    pub credited: Duration,
    pub category: Category,
    pub user_chars: usize,
    pub assistant_chars: usize,
    pub tokens_est: u64,
    pub user_excerpt: String,
}

impl Turn {
    /// Credited minutes rounded to two decimals.
    pub fn duration_minutes(&self) -> f64 {
        round_to(self.credited.num_milliseconds() as f64 / 60_000.0, 2)
    }

    pub fn to_row(&self) -> TurnRow {
        TurnRow {
            user_time: format_user_time(&self.user_time),
            duration_minutes: self.duration_minutes(),
            category: self.category,
            user_chars: self.user_chars,
            assistant_chars: self.assistant_chars,
            tokens_est: self.tokens_est,
            user_excerpt: self.user_excerpt.clone(),
        }
    }
}

/// Flat row written to `by_turn.csv`. Field order is the column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnRow {
    pub user_time: String,
    pub duration_minutes: f64,
    pub category: Category,
    pub user_chars: usize,
    pub assistant_chars: usize,
    pub tokens_est: u64,
    pub user_excerpt: String,
}

/// Groups chronologically sorted messages into turns, crediting each turn at most `cap`.
pub fn group_turns(messages: &[Message], cap: Duration) -> Vec<Turn> {
    let user_indices: Vec<usize> = messages
        .iter()
        .enumerate()
        .filter(|(_, message)| message.role.is_user())
        .map(|(index, _)| index)
        .collect();

    user_indices
        .iter()
        .enumerate()
        .map(|(position, &index)| {
            let user = &messages[index];
            // With no later user message the sentinel sits past the cap, so the cap applies.
            let next_user_time = match user_indices.get(position + 1) {
                Some(&next) => messages[next].timestamp,
                None => user.timestamp + cap + Duration::minutes(5),
            };

            let reply = messages[index + 1..]
                .iter()
                .take_while(|message| !message.role.is_user())
                .find(|message| message.role.is_assistant());
            let assistant_text = reply.map(|message| message.content.as_str()).unwrap_or("");

            let credited = std::cmp::min(next_user_time - user.timestamp, cap);

            Turn {
                user_time: user.timestamp,
                credited,
                category: classify_turn(&user.content, assistant_text),
                user_chars: char_count(&user.content),
                assistant_chars: char_count(assistant_text),
                tokens_est: token_estimate(&user.content) + token_estimate(assistant_text),
                user_excerpt: excerpt(&user.content),
            }
        })
        .collect()
}

/// Rough language-model token count: one token per four characters, rounded up.
pub fn token_estimate(text: &str) -> u64 {
    (char_count(text) as u64).div_ceil(4)
}

pub fn excerpt(text: &str) -> String {
    let mut chars = text.chars();
    let mut head: String = chars.by_ref().take(EXCERPT_CHARS).collect();
    if chars.next().is_some() {
        head.push(EXCERPT_MARKER);
    }
    head
}

fn char_count(text: &str) -> usize {
    text.chars().count()
}

fn format_user_time(timestamp: &NaiveDateTime) -> String {
    if timestamp.nanosecond() == 0 {
        timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
    } else {
        timestamp.format("%Y-%m-%d %H:%M:%S%.6f").to_string()
    }
}

/// Rounds half to even on the exact binary value, which is what float formatting does.
pub(crate) fn round_to(value: f64, decimals: usize) -> f64 {
    format!("{value:.decimals$}").parse().unwrap_or(value)
}
