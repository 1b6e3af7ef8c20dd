//! Place-detail facts from the Apollo state embedded in a home page.

use placemap_core::PlaceDetail;
use regex::Regex;
use serde_json::Value;

use crate::encoding::fix_encoding;
use crate::extract::{extract_array, extract_object};

/// Reads coordinates, address, category and review stats for `business_id`.
///
/// Returns `None` when the page carries no parseable Apollo state or the
/// state has no `PlaceDetailBase:<business_id>` entry.
#[must_use]
pub fn extract_place_detail(html: &str, business_id: &str) -> Option<PlaceDetail> {
    let state = apollo_state(html)?;
    let Some(base) = state.get(format!("PlaceDetailBase:{business_id}")) else {
        tracing::debug!(business_id, "apollo state had no PlaceDetailBase entry");
        return None;
    };

    let coordinate = base.get("coordinate");
    let text = |key: &str| base.get(key).and_then(Value::as_str).map(fix_encoding);

    Some(PlaceDetail {
        lat: coordinate.and_then(|c| number_f64(c.get("y"))),
        lng: coordinate.and_then(|c| number_f64(c.get("x"))),
        category: text("category"),
        address: text("address"),
        road_address: text("roadAddress"),
        review_total: number_i64(base.get("visitorReviewsTotal")),
        review_score: number_f64(base.get("visitorReviewsScore")),
        keywords: extract_keyword_list(html),
    })
}

/// The `window.__APOLLO_STATE__` object literal, parsed.
fn apollo_state(html: &str) -> Option<Value> {
    let anchor = Regex::new(r"window\.__APOLLO_STATE__\s*=\s*\{").expect("valid regex");
    let m = anchor.find(html)?;
    let span = extract_object(html, m.end() - 1)?;
    match serde_json::from_str(span) {
        Ok(state) => Some(state),
        Err(error) => {
            tracing::debug!(%error, "apollo state was not valid JSON");
            None
        }
    }
}

/// First `"keywordList"` array on the page. Non-string items are dropped.
#[must_use]
pub fn extract_keyword_list(html: &str) -> Vec<String> {
    let pattern = Regex::new(r#""keywordList"\s*:\s*\["#).expect("valid regex");
    let Some(span) = pattern
        .find(html)
        .and_then(|m| extract_array(html, m.end() - 1))
    else {
        return Vec::new();
    };

    serde_json::from_str::<Vec<Value>>(span)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(fix_encoding)
                .collect()
        })
        .unwrap_or_default()
}

fn number_f64(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn number_i64(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().replace(',', "").parse().ok(),
        _ => None,
    }
}
