use std::collections::HashSet;

use placemap_core::{menu_record_id, CategoryId, MenuRecord};

use super::types::BookingMenu;
use crate::dedup::dedup_menus;

/// Keeps menus that belong to at least one category in `valid_ids`, then
/// drops `(name, price)` duplicates.
///
/// `valid_ids` comes from [`super::collect_category_ids`] over the same
/// business's categories response.
#[must_use]
pub fn filter_by_category(
    menus: Vec<BookingMenu>,
    valid_ids: &HashSet<CategoryId>,
) -> Vec<BookingMenu> {
    let in_valid_category: Vec<BookingMenu> = menus
        .into_iter()
        .filter(|menu| menu.category_ids.iter().any(|id| valid_ids.contains(id)))
        .collect();
    dedup_menus(in_valid_category)
}

/// Persistence rows keyed `"{place_id}_{index}"`.
#[must_use]
pub fn booking_menu_records(place_id: &str, menus: &[BookingMenu]) -> Vec<MenuRecord> {
    menus
        .iter()
        .enumerate()
        .map(|(index, menu)| MenuRecord {
            menu_id: menu_record_id(place_id, index),
            place_id: place_id.to_string(),
            menu_name: menu.name.clone(),
            menu_price: menu.price,
            description: menu.description.clone(),
            image_url: menu.image_url.clone(),
        })
        .collect()
}
