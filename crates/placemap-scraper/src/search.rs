//! Map search (`allSearch`) result parsing.

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

/// One `name price` pair from a search result's `menuInfo` string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuInfoItem {
    pub name: String,
    /// Price as displayed, e.g. `"8,000원"`. Empty when the item had none.
    pub price: String,
}

/// A place from the search result list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPlace {
    pub id: String,
    pub index: Option<String>,
    pub name: Option<String>,
    pub tel: Option<String>,
    pub category: Vec<String>,
    pub business_status: Option<Value>,
    pub address: Option<String>,
    pub road_address: Option<String>,
    pub short_address: Option<Vec<String>>,
    pub review_count: Option<i64>,
    pub place_review_count: Option<i64>,
    pub thum_url: Option<String>,
    pub lng: Option<f64>,
    pub lat: Option<f64>,
    pub home_page: Option<String>,
    pub bizhour_info: Option<String>,
    pub menu_info: Vec<MenuInfoItem>,
    pub has_naver_booking: bool,
    pub naver_booking_url: Option<String>,
    pub broadcast_info: Option<Value>,
    pub distance: Option<String>,
}

/// Places under `result.place.list`, in response order.
///
/// Items without an `id` are skipped.
#[must_use]
pub fn parse_search_places(response: &Value) -> Vec<SearchPlace> {
    let Some(list) = response
        .pointer("/result/place/list")
        .and_then(Value::as_array)
    else {
        tracing::debug!("search response had no result.place.list");
        return Vec::new();
    };

    list.iter().filter_map(search_place).collect()
}

fn search_place(item: &Value) -> Option<SearchPlace> {
    let id = text(item, "id").filter(|id| !id.is_empty())?;
    let has_broadcast_info = item
        .get("hasBroadcastInfo")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    Some(SearchPlace {
        id,
        index: text(item, "index"),
        name: text(item, "name"),
        tel: text(item, "tel"),
        category: string_list(item.get("category")),
        business_status: item.get("businessStatus").filter(|v| !v.is_null()).cloned(),
        address: text(item, "address"),
        road_address: text(item, "roadAddress"),
        short_address: item
            .get("shortAddress")
            .filter(|v| v.is_array())
            .map(|v| string_list(Some(v))),
        review_count: integer(item, "reviewCount"),
        place_review_count: integer(item, "placeReviewCount"),
        thum_url: text(item, "thumUrl"),
        lng: float(item, "x"),
        lat: float(item, "y"),
        home_page: text(item, "homePage"),
        bizhour_info: text(item, "bizhourInfo"),
        menu_info: text(item, "menuInfo")
            .map(|info| parse_menu_info(&info))
            .unwrap_or_default(),
        has_naver_booking: item
            .get("hasNaverBooking")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        naver_booking_url: text(item, "naverBookingUrl"),
        broadcast_info: if has_broadcast_info {
            item.get("broadcastInfo").cloned()
        } else {
            None
        },
        distance: text(item, "distance"),
    })
}

/// Splits `"김치찌개 8,000원 | 공깃밥"` into name/price pairs.
///
/// A trailing number (with optional thousands separators and `원`) is the
/// price; items without one keep the whole text as the name.
#[must_use]
pub fn parse_menu_info(menu_info: &str) -> Vec<MenuInfoItem> {
    let pattern = Regex::new(r"(.+?)\s*(\d{1,3}(?:,\d{3})*원?)$").expect("valid regex");

    menu_info
        .split('|')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| match pattern.captures(item) {
            Some(caps) => MenuInfoItem {
                name: caps[1].trim().to_string(),
                price: caps[2].trim().to_string(),
            },
            None => MenuInfoItem {
                name: item.to_string(),
                price: String::new(),
            },
        })
        .collect()
}

fn text(item: &Value, key: &str) -> Option<String> {
    match item.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn float(item: &Value, key: &str) -> Option<f64> {
    match item.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn integer(item: &Value, key: &str) -> Option<i64> {
    match item.get(key)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().replace(',', "").parse().ok(),
        _ => None,
    }
}

/// A string, or an array of strings, as a list.
fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => vec![s.clone()],
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}
