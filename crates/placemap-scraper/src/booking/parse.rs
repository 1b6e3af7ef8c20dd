use std::collections::HashSet;

use chrono::NaiveDate;
use placemap_core::CategoryId;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::types::{value_to_id, BookingCategory, BookingMenu, MenuPayload};

/// Deserializes every item of the array at `pointer`, skipping items that do
/// not fit `T`. A missing or non-array node yields an empty list.
fn items_at<T: DeserializeOwned>(response: &Value, pointer: &str) -> Vec<T> {
    let Some(items) = response.pointer(pointer).and_then(Value::as_array) else {
        tracing::debug!(pointer, "graphql response had no list at pointer");
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match serde_json::from_value(item.clone()) {
            Ok(parsed) => Some(parsed),
            Err(error) => {
                tracing::debug!(pointer, %error, "skipping malformed graphql list item");
                None
            }
        })
        .collect()
}

#[must_use]
pub fn parse_categories(response: &Value) -> Vec<BookingCategory> {
    items_at(response, "/data/categories")
}

/// Every non-empty `categoryId` in the tree, children included.
#[must_use]
pub fn collect_category_ids(categories: &[BookingCategory]) -> HashSet<CategoryId> {
    let mut ids = HashSet::new();
    let mut stack: Vec<&BookingCategory> = categories.iter().collect();
    while let Some(category) = stack.pop() {
        if let Some(id) = category.category_id.as_ref().filter(|id| !id.as_str().is_empty()) {
            ids.insert(id.clone());
        }
        if let Some(children) = &category.children {
            stack.extend(children);
        }
    }
    ids
}

/// The `slotId` of an `orderBizItemSchedule` response.
///
/// `schedule` is an object on most items but a list on some; the first
/// element is used then.
#[must_use]
pub fn parse_slot_id(response: &Value) -> Option<String> {
    let schedule = response.pointer("/data/orderBizItemSchedule/schedule")?;
    let schedule = match schedule {
        Value::Array(list) => list.first()?,
        other => other,
    };
    let slot_id = value_to_id(schedule.get("slotId")?);
    (!slot_id.is_empty()).then_some(slot_id)
}

/// Whether `menu` has stock left on `date`.
///
/// Requires both `stock` and `remainStock` above zero in the schedule entry
/// keyed by the ISO date. A missing entry means unavailable.
#[must_use]
pub fn is_available_on(menu: &MenuPayload, date: NaiveDate) -> bool {
    let key = date.format("%Y-%m-%d").to_string();
    let Some(day) = menu.schedules.as_ref().and_then(|s| s.get(&key)) else {
        return false;
    };
    let positive = |field: &str| {
        day.get(field)
            .and_then(Value::as_f64)
            .is_some_and(|n| n > 0.0)
    };
    positive("stock") && positive("remainStock")
}

/// Menus from a `menu` response that are in stock on `date`.
#[must_use]
pub fn booking_menus_from_menu_response(response: &Value, date: NaiveDate) -> Vec<BookingMenu> {
    items_at::<MenuPayload>(response, "/data/menu/menus")
        .into_iter()
        .filter(|menu| is_available_on(menu, date))
        .map(BookingMenu::from)
        .collect()
}

/// Menus from a `menuGroups` response.
///
/// `menuGroups` is normally one object with a `menus` list; a list of such
/// objects is flattened in order.
#[must_use]
pub fn booking_menus_from_menu_groups(response: &Value) -> Vec<BookingMenu> {
    let payloads: Vec<MenuPayload> = match response.pointer("/data/menuGroups") {
        Some(Value::Array(groups)) => groups
            .iter()
            .flat_map(|group| items_at::<MenuPayload>(group, "/menus"))
            .collect(),
        Some(_) => items_at(response, "/data/menuGroups/menus"),
        None => {
            tracing::debug!("menuGroups response had no data");
            Vec::new()
        }
    };
    payloads.into_iter().map(BookingMenu::from).collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 15).unwrap()
    }

    #[test]
    fn collects_nested_category_ids() {
        let response = json!({"data":{"categories":[
            {"categoryId":"10","children":[{"categoryId":"11"},{"categoryId":12,"children":null}]},
            {"categoryId":"","children":[{"categoryId":"20"}]},
            {"name":"no id"}
        ]}});
        let ids = collect_category_ids(&parse_categories(&response));
        let mut ids: Vec<_> = ids.iter().map(CategoryId::as_str).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec!["10", "11", "12", "20"]);
    }

    #[test]
    fn missing_categories_yield_empty_set() {
        let response = json!({"data":null,"errors":[{"message":"boom"}]});
        assert!(collect_category_ids(&parse_categories(&response)).is_empty());
    }

    #[test]
    fn slot_id_from_object_or_list() {
        let object = json!({"data":{"orderBizItemSchedule":{"schedule":{"slotId":"abc"}}}});
        let list = json!({"data":{"orderBizItemSchedule":{"schedule":[{"slotId":4521},{"slotId":9}]}}});
        let empty = json!({"data":{"orderBizItemSchedule":{"schedule":[]}}});
        assert_eq!(parse_slot_id(&object).as_deref(), Some("abc"));
        assert_eq!(parse_slot_id(&list).as_deref(), Some("4521"));
        assert_eq!(parse_slot_id(&empty), None);
    }

    #[test]
    fn availability_requires_both_stocks_positive() {
        let menu = |day: Value| MenuPayload {
            schedules: Some(json!({"2026-10-15": day})),
            ..MenuPayload::default()
        };
        assert!(is_available_on(&menu(json!({"stock":5,"remainStock":1})), date()));
        assert!(!is_available_on(&menu(json!({"stock":5,"remainStock":0})), date()));
        assert!(!is_available_on(&menu(json!({"remainStock":3})), date()));
        assert!(!is_available_on(&MenuPayload::default(), date()));
    }

    #[test]
    fn menu_response_keeps_only_available_menus() {
        let response = json!({"data":{"menu":{"menus":[
            {"id":1,"name":" 김밥 ","price":"3500","desc":"d","titleImageUrl":"https://i/1.jpg",
             "categoryIds":["10"],"schedules":{"2026-10-15":{"stock":10,"remainStock":4}}},
            {"id":2,"name":"라면","price":4000,"categoryIds":["10"],
             "schedules":{"2026-10-14":{"stock":10,"remainStock":4}}}
        ]}}});
        let menus = booking_menus_from_menu_response(&response, date());
        assert_eq!(menus.len(), 1);
        assert_eq!(menus[0].id, "1");
        assert_eq!(menus[0].name, "김밥");
        assert_eq!(menus[0].price, Some(3500));
        assert_eq!(menus[0].category_ids, vec![CategoryId::from("10")]);
        assert_eq!(menus[0].image_url.as_deref(), Some("https://i/1.jpg"));
    }

    #[test]
    fn menu_groups_use_scalar_category_and_imp_price() {
        let response = json!({"data":{"menuGroups":{"menus":[
            {"id":"a","name":"아메리카노","price":null,"impPrice":4500,"categoryId":77,"titleImageUrl":""},
            {"id":"b","name":"라떼","price":5000,"impPrice":4800,"categoryId":"78"}
        ]}}});
        let menus = booking_menus_from_menu_groups(&response);
        assert_eq!(menus.len(), 2);
        assert_eq!(menus[0].price, Some(4500));
        assert_eq!(menus[0].category_ids, vec![CategoryId::from("77")]);
        assert_eq!(menus[0].image_url, None);
        assert_eq!(menus[1].price, Some(5000));
    }

    #[test]
    fn menu_groups_as_list_are_flattened() {
        let response = json!({"data":{"menuGroups":[
            {"menus":[{"id":"a","name":"A","price":1}]},
            {"menus":[{"id":"b","name":"B","price":2}]}
        ]}});
        let names: Vec<_> = booking_menus_from_menu_groups(&response)
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, vec!["A", "B"]);
    }
}
