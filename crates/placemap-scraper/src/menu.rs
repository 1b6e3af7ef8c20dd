//! Menu recovery from a place's `menu/list` page.
//!
//! Menu items are Apollo cache entries keyed `"Menu:<business_id>_<n>"`, or
//! `"PlaceDetail_BaeminMenu:<n>"` for delivery-partner menus. Each entry is
//! recovered with the balanced object scanner so descriptions containing
//! braces do not truncate the object.

use placemap_core::{menu_record_id, MenuEntry, MenuRecord};
use regex::Regex;
use serde_json::Value;

use crate::encoding::{
    clean_image_url, decode_dropping_invalid, fix_encoding, normalize_image_url, percent_decode,
    unescape_backslashes,
};
use crate::extract::{extract_array, extract_object};

/// How a menu page body is decoded before its entries are parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DecodeProfile {
    /// Parse the body as served.
    #[default]
    Plain,
    /// The body is backslash-escaped once more (state embedded as a JS
    /// string). Unescape it, then percent-decode each entry before parsing.
    Unescaped,
}

/// Extracts menu entries for `business_id` from a raw page body.
///
/// Invalid UTF-8 is dropped. Entries that are truncated or fail to parse are
/// skipped. Repeated entries are all kept in page order; see
/// [`crate::dedup_menus`] for collapsing them.
#[must_use]
pub fn extract_menu(raw: &[u8], business_id: &str, profile: DecodeProfile) -> Vec<MenuEntry> {
    let decoded = decode_dropping_invalid(raw);
    let text = match profile {
        DecodeProfile::Plain => decoded,
        DecodeProfile::Unescaped => unescape_backslashes(&decoded),
    };

    let key_pattern = Regex::new(&format!(
        r#""(?:Menu:{}_\d+|PlaceDetail_BaeminMenu:\d+)"\s*:\s*\{{"#,
        regex::escape(business_id)
    ))
    .expect("valid regex");

    let mut entries = Vec::new();
    for m in key_pattern.find_iter(&text) {
        let Some(span) = extract_object(&text, m.end() - 1) else {
            tracing::debug!(business_id, key = m.as_str(), "menu entry was truncated");
            continue;
        };
        let parsed = match profile {
            DecodeProfile::Plain => serde_json::from_str::<Value>(span),
            DecodeProfile::Unescaped => serde_json::from_str::<Value>(&percent_decode(span)),
        };
        match parsed {
            Ok(obj) if obj.is_object() => entries.push(menu_entry(&obj)),
            Ok(_) => {}
            Err(error) => {
                tracing::debug!(business_id, key = m.as_str(), %error, "menu entry was not valid JSON");
            }
        }
    }

    entries
}

fn menu_entry(obj: &Value) -> MenuEntry {
    let text = |key: &str| fix_encoding(obj.get(key).and_then(Value::as_str).unwrap_or_default());

    let images = obj
        .get("images")
        .and_then(Value::as_array)
        .map(|images| {
            images
                .iter()
                .filter_map(Value::as_str)
                .map(|url| normalize_image_url(&fix_encoding(&clean_image_url(url))))
                .collect()
        })
        .unwrap_or_default();

    MenuEntry {
        name: text("name"),
        price: parse_price(obj.get("price")),
        description: text("description"),
        images,
    }
}

/// Integer price in won, or `None` when the value cannot be read as one.
///
/// Accepts integers, finite floats (truncated) and trimmed integer strings.
/// Formatted strings such as `"8,000"` are rejected.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn parse_price(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Menu-board photo URLs from the page's `"menuImages"` array.
#[must_use]
pub fn extract_menu_board_images(html: &str) -> Vec<String> {
    let pattern = Regex::new(r#""menuImages"\s*:\s*\["#).expect("valid regex");
    let Some(m) = pattern.find(html) else {
        return Vec::new();
    };
    let Some(span) = extract_array(html, m.end() - 1) else {
        tracing::debug!("menuImages array was unterminated");
        return Vec::new();
    };

    match serde_json::from_str::<Vec<Value>>(span) {
        Ok(images) => images
            .iter()
            .filter_map(|image| image.get("imageUrl").and_then(Value::as_str))
            .filter(|url| !url.is_empty())
            .map(clean_image_url)
            .collect(),
        Err(error) => {
            tracing::debug!(%error, "menuImages array was not valid JSON");
            Vec::new()
        }
    }
}

/// Assigns `"{business_id}_{index}"` ids in list order.
#[must_use]
pub fn to_menu_records(business_id: &str, menus: &[MenuEntry]) -> Vec<MenuRecord> {
    menus
        .iter()
        .enumerate()
        .map(|(index, menu)| MenuRecord {
            menu_id: menu_record_id(business_id, index),
            place_id: business_id.to_string(),
            menu_name: menu.name.clone(),
            menu_price: menu.price,
            description: menu.description.clone(),
            image_url: menu.images.first().cloned(),
        })
        .collect()
}

#[cfg(test)]
#[path = "menu_test.rs"]
mod tests;
