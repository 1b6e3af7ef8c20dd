//! Normalized records produced by the extraction pipeline.
//!
//! Every value here is built fresh from a single fetched page or GraphQL
//! response and handed to the caller as-is; nothing is mutated after the
//! pipeline stage that produced it.

use chrono::Weekday;
use serde::{Deserialize, Deserializer, Serialize};

const EVERY_DAY: &str = "매일";

/// Day label of one business-hours row.
///
/// The platform labels rows with single-syllable Korean weekday names
/// (`"월"`..`"일"`) or `"매일"` when one schedule covers the whole week.
/// Anything else is kept verbatim in [`BusinessDay::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BusinessDay {
    EveryDay,
    Weekday(Weekday),
    Other(String),
}

impl BusinessDay {
    #[must_use]
    pub fn parse(label: &str) -> Self {
        match label {
            EVERY_DAY => Self::EveryDay,
            "월" => Self::Weekday(Weekday::Mon),
            "화" => Self::Weekday(Weekday::Tue),
            "수" => Self::Weekday(Weekday::Wed),
            "목" => Self::Weekday(Weekday::Thu),
            "금" => Self::Weekday(Weekday::Fri),
            "토" => Self::Weekday(Weekday::Sat),
            "일" => Self::Weekday(Weekday::Sun),
            other => Self::Other(other.to_string()),
        }
    }

    /// Sort rank: every-day first, then Monday..Sunday, then unrecognized labels.
    #[must_use]
    pub fn rank(&self) -> i32 {
        match self {
            Self::EveryDay => -1,
            Self::Weekday(day) => i32::try_from(day.num_days_from_monday()).unwrap_or(100),
            Self::Other(_) => 100,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::EveryDay => EVERY_DAY,
            Self::Weekday(Weekday::Mon) => "월",
            Self::Weekday(Weekday::Tue) => "화",
            Self::Weekday(Weekday::Wed) => "수",
            Self::Weekday(Weekday::Thu) => "목",
            Self::Weekday(Weekday::Fri) => "금",
            Self::Weekday(Weekday::Sat) => "토",
            Self::Weekday(Weekday::Sun) => "일",
            Self::Other(label) => label,
        }
    }
}

impl From<String> for BusinessDay {
    fn from(label: String) -> Self {
        Self::parse(&label)
    }
}

impl From<BusinessDay> for String {
    fn from(day: BusinessDay) -> Self {
        day.label().to_string()
    }
}

impl std::fmt::Display for BusinessDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessHourEntry {
    pub day: BusinessDay,
    /// Opening time as published, e.g. `"09:00"`.
    pub start: Option<String>,
    pub end: Option<String>,
    #[serde(default)]
    pub last_order_times: Vec<String>,
}

/// A menu item recovered from a place's menu page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    pub name: String,
    /// Price in won. `None` when the source value was absent or not an integer.
    pub price: Option<i64>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
}

/// A menu item ready for an idempotent upsert keyed by `menu_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuRecord {
    pub menu_id: String,
    pub place_id: String,
    pub menu_name: String,
    pub menu_price: Option<i64>,
    pub description: String,
    pub image_url: Option<String>,
}

/// Synthesized menu identifier: `"{business_id}_{index}"`.
#[must_use]
pub fn menu_record_id(business_id: &str, index: usize) -> String {
    format!("{business_id}_{index}")
}

/// Opaque category token from the booking service.
///
/// Only meaningful within the set returned by one categories call for one
/// business. The service emits these as JSON strings or numbers depending on
/// the query, so both deserialize to the same textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CategoryId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CategoryId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => Self(s),
            Raw::Signed(n) => Self(n.to_string()),
            Raw::Unsigned(n) => Self(n.to_string()),
        })
    }
}

/// Location and listing facts from a place's detail page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceDetail {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub category: Option<String>,
    pub address: Option<String>,
    pub road_address: Option<String>,
    pub review_total: Option<i64>,
    pub review_score: Option<f64>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_day_parses_weekdays_and_every_day() {
        assert_eq!(BusinessDay::parse("매일"), BusinessDay::EveryDay);
        assert_eq!(BusinessDay::parse("월"), BusinessDay::Weekday(Weekday::Mon));
        assert_eq!(BusinessDay::parse("일"), BusinessDay::Weekday(Weekday::Sun));
        assert_eq!(
            BusinessDay::parse("공휴일"),
            BusinessDay::Other("공휴일".to_string())
        );
    }

    #[test]
    fn business_day_rank_orders_every_day_first_and_unknown_last() {
        assert_eq!(BusinessDay::EveryDay.rank(), -1);
        assert_eq!(BusinessDay::parse("월").rank(), 0);
        assert_eq!(BusinessDay::parse("일").rank(), 6);
        assert_eq!(BusinessDay::parse("브레이크타임").rank(), 100);
    }

    #[test]
    fn business_day_serializes_as_source_label() {
        let entry = BusinessHourEntry {
            day: BusinessDay::parse("토"),
            start: Some("11:00".to_string()),
            end: None,
            last_order_times: vec!["20:30".to_string()],
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["day"], "토");
        assert_eq!(json["lastOrderTimes"][0], "20:30");
        assert!(json["end"].is_null());
    }

    #[test]
    fn business_day_round_trips_unknown_label() {
        let day: BusinessDay = serde_json::from_str("\"공휴일\"").unwrap();
        assert_eq!(day, BusinessDay::Other("공휴일".to_string()));
        assert_eq!(serde_json::to_string(&day).unwrap(), "\"공휴일\"");
    }

    #[test]
    fn category_id_accepts_string_and_number() {
        let from_text: CategoryId = serde_json::from_str("\"1234\"").unwrap();
        let from_number: CategoryId = serde_json::from_str("1234").unwrap();
        assert_eq!(from_text, from_number);
        assert_eq!(from_text.as_str(), "1234");
    }

    #[test]
    fn menu_record_id_joins_business_and_index() {
        assert_eq!(menu_record_id("1027471594", 3), "1027471594_3");
    }
}
