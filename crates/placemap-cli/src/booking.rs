//! `booking-menu` command handler.
//!
//! The booking service only returns categories for a concrete slot, so the
//! flow is: schedule → slot id → categories → menus → category filter.

use anyhow::Context;
use chrono::{Local, NaiveDate};
use placemap_core::AppConfig;
use placemap_scraper::booking::{
    booking_menu_records, booking_menus_from_menu_groups, booking_menus_from_menu_response,
    categories_request, collect_category_ids, filter_by_category, menu_groups_request,
    menu_request, order_referer, parse_categories, parse_slot_id, schedule_request, BookingMenu,
};
use serde_json::{json, Value};

use crate::MenuSource;

pub(crate) async fn run_booking_menu(
    config: &AppConfig,
    place_id: &str,
    booking_id: &str,
    item_id: &str,
    source: MenuSource,
) -> anyhow::Result<()> {
    let client = crate::build_client(config)?;
    let referer = order_referer(&client.endpoints().booking_base_url, booking_id, item_id)
        .context("invalid booking or item id")?;
    let today = Local::now().date_naive();

    let schedule = client
        .post_graphql(&schedule_request(booking_id, item_id, today), &referer)
        .await
        .context("failed to fetch order schedule")?;
    let slot_id = parse_slot_id(&schedule);
    if slot_id.is_none() {
        tracing::warn!(booking_id, item_id, "no schedule slot; requesting categories without one");
    }

    let categories = client
        .post_graphql(
            &categories_request(booking_id, item_id, slot_id.as_deref()),
            &referer,
        )
        .await
        .context("failed to fetch menu categories")?;
    let valid_ids = collect_category_ids(&parse_categories(&categories));

    let request = match source {
        MenuSource::Menu => menu_request(booking_id),
        MenuSource::MenuGroups => menu_groups_request(booking_id),
    };
    let response = client
        .post_graphql(&request, &referer)
        .await
        .with_context(|| format!("failed to fetch {}", request.operation))?;

    let menus = filter_by_category(menus_from(&response, source, today), &valid_ids);
    tracing::info!(
        place_id,
        booking_id,
        categories = valid_ids.len(),
        menus = menus.len(),
        "collected booking menus"
    );

    println!("{}", booking_document(place_id, &menus));
    Ok(())
}

fn menus_from(response: &Value, source: MenuSource, today: NaiveDate) -> Vec<BookingMenu> {
    match source {
        MenuSource::Menu => booking_menus_from_menu_response(response, today),
        MenuSource::MenuGroups => booking_menus_from_menu_groups(response),
    }
}

fn booking_document(place_id: &str, menus: &[BookingMenu]) -> Value {
    json!({
        "id": place_id,
        "menus": booking_menu_records(place_id, menus),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_groups_source_ignores_stock() {
        let response = json!({"data": {"menuGroups": {"menus": [
            {"id": "1", "name": "Latte", "price": 0, "impPrice": 4500, "categoryId": "c1"}
        ]}}});
        let today = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
        let menus = menus_from(&response, MenuSource::MenuGroups, today);
        assert_eq!(menus.len(), 1);
        assert_eq!(menus[0].price, Some(4500));
    }

    #[test]
    fn menu_source_drops_sold_out_items() {
        let response = json!({"data": {"menu": {"menus": [
            {"id": "1", "name": "Latte", "price": 4500,
             "schedules": {"2026-10-15": {"stock": 10, "remainStock": 0}}}
        ]}}});
        let today = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
        assert!(menus_from(&response, MenuSource::Menu, today).is_empty());
    }

    #[test]
    fn document_ids_records_by_place() {
        let response = json!({"data": {"menuGroups": {"menus": [
            {"id": "1", "name": "Latte", "price": 4500, "categoryId": "c1"}
        ]}}});
        let today = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
        let menus = menus_from(&response, MenuSource::MenuGroups, today);
        let doc = booking_document("77", &menus);
        assert_eq!(doc["menus"][0]["menu_id"], "77_0");
        assert_eq!(doc["menus"][0]["menu_name"], "Latte");
    }
}
