use chrono::Weekday;
use serde_json::json;

use super::*;

fn page(script: &str) -> String {
    format!("<html><script>window.__APOLLO_STATE__ = {script};</script></html>")
}

#[test]
fn new_business_hours_block_wins() {
    let html = page(
        r#"{"newBusinessHours({\"businessId\":\"1\"})":[{"name":"x","businessHours":[{"day":"월","businessHours":{"start":"10:00","end":"21:00"}}]}],
            "businessHours":[{"day":"화","businessHours":{"start":"00:00","end":"01:00"}}]}"#,
    );
    let raw = find_business_hours(&html).unwrap();
    assert_eq!(raw.len(), 1);
    assert_eq!(raw[0]["day"], "월");
}

#[test]
fn new_business_hours_skips_blocks_without_hours_list() {
    let html = page(
        r#"{"newBusinessHours({})":[{"businessHours":null},{"businessHours":[{"day":"금"}]}]}"#,
    );
    let raw = find_business_hours(&html).unwrap();
    assert_eq!(raw[0]["day"], "금");
}

#[test]
fn falls_back_to_first_well_shaped_business_hours_key() {
    let html = page(
        r#"{"a":{"businessHours":["not an object"]},
            "b":{"businessHours":[{"day":"수"}]},
            "c":{"businessHours":[{"day":"목","businessHours":{"start":"09:00","end":"18:00"}}]}}"#,
    );
    let raw = find_business_hours(&html).unwrap();
    assert_eq!(raw[0]["day"], "목");
}

#[test]
fn malformed_candidate_is_skipped() {
    let html = r#""businessHours": [{"day": oops}] ... "businessHours": [{"day":"토","businessHours":{}}]"#;
    let raw = find_business_hours(html).unwrap();
    assert_eq!(raw[0]["day"], "토");
}

#[test]
fn no_hours_on_page_returns_none() {
    assert!(find_business_hours("<html>nothing here</html>").is_none());
    assert!(extract_business_hours("<html>nothing here</html>").is_empty());
}

#[test]
fn every_day_entry_sorts_first() {
    let raw = json!([
        {"day":"월","businessHours":{"start":"10:00","end":"21:00"}},
        {"day":"매일","businessHours":{"start":"09:00","end":"22:00"},"lastOrderTimes":[{"time":"21:30"}]}
    ]);
    let entries = normalize_business_hours(raw.as_array().unwrap());

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].day, BusinessDay::EveryDay);
    assert_eq!(entries[0].start.as_deref(), Some("09:00"));
    assert_eq!(entries[0].end.as_deref(), Some("22:00"));
    assert_eq!(entries[0].last_order_times, vec!["21:30"]);
    assert_eq!(entries[1].day, BusinessDay::Weekday(Weekday::Mon));
    assert!(entries[1].last_order_times.is_empty());
}

#[test]
fn unknown_days_keep_input_order_after_weekdays() {
    let raw = json!([
        {"day":"공휴일"},
        {"day":"일"},
        {"day":"브레이크"},
        {"day":"월"}
    ]);
    let days: Vec<String> = normalize_business_hours(raw.as_array().unwrap())
        .into_iter()
        .map(|e| e.day.to_string())
        .collect();
    assert_eq!(days, vec!["월", "일", "공휴일", "브레이크"]);
}

#[test]
fn missing_day_and_hours_become_empty_and_absent() {
    let raw = json!([{"lastOrderTimes":[{"time":"20:00"},{"nope":1}]}, "skip me"]);
    let entries = normalize_business_hours(raw.as_array().unwrap());
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].day, BusinessDay::Other(String::new()));
    assert_eq!(entries[0].start, None);
    assert_eq!(entries[0].end, None);
    assert_eq!(entries[0].last_order_times, vec!["20:00"]);
}

#[test]
fn day_label_gets_codec_repair() {
    let garbled: String = "화".bytes().map(char::from).collect();
    let raw = json!([{"day": garbled}]);
    let entries = normalize_business_hours(raw.as_array().unwrap());
    assert_eq!(entries[0].day, BusinessDay::Weekday(Weekday::Tue));
}

#[test]
fn time_fields_get_codec_repair() {
    let garble = |s: &str| -> String { s.bytes().map(char::from).collect() };
    let raw = json!([{
        "day": "월",
        "businessHours": {"start": garble("오전 11:00"), "end": "21:00"},
        "lastOrderTimes": [{"type": "B", "time": garble("20시 30분")}]
    }]);
    let entries = normalize_business_hours(raw.as_array().unwrap());
    assert_eq!(entries[0].start.as_deref(), Some("오전 11:00"));
    assert_eq!(entries[0].end.as_deref(), Some("21:00"));
    assert_eq!(entries[0].last_order_times, vec!["20시 30분".to_string()]);
}

#[test]
fn extract_business_hours_runs_both_stages() {
    let html = page(
        r#"{"x":{"businessHours":[{"day":"토","businessHours":{"start":"11:00","end":"20:00"}},{"day":"매일","businessHours":{"start":"09:00","end":"22:00"}}]}}"#,
    );
    let entries = extract_business_hours(&html);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].day, BusinessDay::EveryDay);
}
