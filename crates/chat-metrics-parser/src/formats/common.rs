use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use csv::StringRecord;
use serde_json::{Map, Value};

use crate::errors::SkipReason;

pub(crate) const TIMESTAMP_FIELDS: &[&str] = &["timestamp", "time", "created_at", "date"];
pub(crate) const ROLE_FIELDS: &[&str] = &["role"];
pub(crate) const CONTENT_FIELDS: &[&str] = &["content", "text"];

/// Exact formats, tried in order before the loose ISO-8601 fallback.
pub const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.fZ",
    "%Y-%m-%dT%H:%M:%SZ",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M",
    "%m/%d/%y %H:%M",
];

const LOOSE_NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

const LOOSE_OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

/// Parses a message timestamp. Offsets are normalised to UTC and dropped.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, SkipReason> {
    let trimmed = value.trim();
    for fmt in TIMESTAMP_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            // chrono's %Y accepts short years; those belong to the %y pattern.
            if fmt.contains("%Y") && dt.year() < 1000 {
                continue;
            }
            return Ok(dt);
        }
    }

    let loose = trimmed.replace('Z', "");
    for fmt in LOOSE_NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&loose, fmt) {
            return Ok(dt);
        }
    }
    for fmt in LOOSE_OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&loose, fmt) {
            return Ok(dt.with_timezone(&Utc).naive_utc());
        }
    }
    if let Some(midnight) = NaiveDate::parse_from_str(&loose, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight);
    }

    Err(SkipReason::InvalidTimestamp(trimmed.to_string()))
}

/// First synonym carrying a non-empty value. Exact key matches win over case-folded ones.
pub(crate) fn lookup_json<'a>(object: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names.iter().find_map(|name| {
        let value = object.get(*name).or_else(|| {
            object
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value)
        })?;
        match value {
            Value::Null => None,
            Value::String(text) if text.is_empty() => None,
            other => Some(other),
        }
    })
}

/// Column positions for each synonym, in synonym priority order.
pub(crate) fn header_positions(header: &StringRecord, names: &[&str]) -> Vec<usize> {
    names
        .iter()
        .filter_map(|name| {
            header
                .iter()
                .position(|column| column.trim().eq_ignore_ascii_case(name))
        })
        .collect()
}

pub(crate) fn lookup_csv<'a>(record: &'a StringRecord, positions: &[usize]) -> Option<&'a str> {
    positions
        .iter()
        .filter_map(|&index| record.get(index))
        .map(str::trim)
        .find(|value| !value.is_empty())
}
