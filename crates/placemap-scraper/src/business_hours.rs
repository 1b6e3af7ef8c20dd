//! Business-hours recovery from a place's home page.
//!
//! The home page embeds its Apollo state as a script literal. Hours appear
//! either under a `"newBusinessHours(...)"` query key or as one or more
//! bare `"businessHours"` arrays, depending on page vintage.

use placemap_core::{BusinessDay, BusinessHourEntry};
use regex::Regex;
use serde_json::Value;

use crate::encoding::fix_encoding;
use crate::extract::extract_array;

/// Locates the raw per-day business-hours array in `html`.
///
/// Tries the `newBusinessHours(...)` block first, then every bare
/// `"businessHours": [` key in document order. Candidates that fail to
/// parse or do not have the expected shape are skipped.
#[must_use]
pub fn find_business_hours(html: &str) -> Option<Vec<Value>> {
    from_new_business_hours(html).or_else(|| from_business_hours_keys(html))
}

fn from_new_business_hours(html: &str) -> Option<Vec<Value>> {
    let pattern = Regex::new(r#""newBusinessHours\([^)]*\)"\s*:\s*\["#).expect("valid regex");
    let m = pattern.find(html)?;
    let span = extract_array(html, m.end() - 1)?;

    let blocks: Vec<Value> = match serde_json::from_str(span) {
        Ok(blocks) => blocks,
        Err(error) => {
            tracing::debug!(%error, "newBusinessHours block was not valid JSON");
            return None;
        }
    };

    blocks.into_iter().find_map(|block| match block {
        Value::Object(mut obj) => match obj.remove("businessHours") {
            Some(Value::Array(days)) => Some(days),
            _ => None,
        },
        _ => None,
    })
}

fn from_business_hours_keys(html: &str) -> Option<Vec<Value>> {
    let pattern = Regex::new(r#""businessHours"\s*:\s*\["#).expect("valid regex");

    for m in pattern.find_iter(html) {
        let Some(span) = extract_array(html, m.end() - 1) else {
            tracing::debug!(offset = m.start(), "businessHours array was unterminated");
            continue;
        };
        let days: Vec<Value> = match serde_json::from_str(span) {
            Ok(days) => days,
            Err(error) => {
                tracing::debug!(offset = m.start(), %error, "businessHours array was not valid JSON");
                continue;
            }
        };
        if is_day_schedule(&days) {
            return Some(days);
        }
    }
    None
}

/// A per-day schedule starts with an object carrying both `day` and `businessHours`.
fn is_day_schedule(days: &[Value]) -> bool {
    days.first()
        .and_then(Value::as_object)
        .is_some_and(|first| first.contains_key("day") && first.contains_key("businessHours"))
}

/// Maps raw per-day records into [`BusinessHourEntry`] values.
///
/// Output is stable-sorted with `매일` first, then Monday through Sunday,
/// then any other label in input order.
#[must_use]
pub fn normalize_business_hours(raw: &[Value]) -> Vec<BusinessHourEntry> {
    let mut entries: Vec<BusinessHourEntry> = raw
        .iter()
        .filter_map(Value::as_object)
        .map(|item| {
            let day = item
                .get("day")
                .and_then(Value::as_str)
                .map(fix_encoding)
                .unwrap_or_default();
            let hours = item.get("businessHours");
            let last_order_times = item
                .get("lastOrderTimes")
                .and_then(Value::as_array)
                .map(|times| {
                    times
                        .iter()
                        .filter_map(|t| t.get("time").and_then(Value::as_str))
                        .map(fix_encoding)
                        .collect()
                })
                .unwrap_or_default();

            BusinessHourEntry {
                day: BusinessDay::parse(&day),
                start: time_field(hours, "start"),
                end: time_field(hours, "end"),
                last_order_times,
            }
        })
        .collect();

    entries.sort_by_key(|entry| entry.day.rank());
    entries
}

fn time_field(hours: Option<&Value>, key: &str) -> Option<String> {
    hours
        .and_then(|h| h.get(key))
        .and_then(Value::as_str)
        .map(fix_encoding)
}

/// Convenience: locate and normalize in one step. Empty when no hours were found.
#[must_use]
pub fn extract_business_hours(html: &str) -> Vec<BusinessHourEntry> {
    find_business_hours(html)
        .map(|raw| normalize_business_hours(&raw))
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "business_hours_test.rs"]
mod tests;
