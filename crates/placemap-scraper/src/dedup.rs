use std::collections::HashSet;

use placemap_core::MenuEntry;

/// Identity used to collapse duplicate menus across pages and responses.
pub trait MenuIdentity {
    fn menu_name(&self) -> &str;
    fn menu_price(&self) -> Option<i64>;
}

impl MenuIdentity for MenuEntry {
    fn menu_name(&self) -> &str {
        &self.name
    }

    fn menu_price(&self) -> Option<i64> {
        self.price
    }
}

/// Drops later menus whose `(trimmed name, price)` was already seen.
///
/// Case is significant. Relative order of kept menus is unchanged.
#[must_use]
pub fn dedup_menus<T: MenuIdentity>(menus: Vec<T>) -> Vec<T> {
    let mut seen = HashSet::new();
    menus
        .into_iter()
        .filter(|menu| seen.insert((menu.menu_name().trim().to_string(), menu.menu_price())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, price: Option<i64>) -> MenuEntry {
        MenuEntry {
            name: name.to_string(),
            price,
            description: String::new(),
            images: Vec::new(),
        }
    }

    #[test]
    fn same_name_and_price_collapse() {
        let menus = vec![
            entry("Kimchi", Some(8000)),
            entry("Kimchi", Some(8000)),
            entry("Kimchi", Some(9000)),
        ];
        let kept = dedup_menus(menus);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].price, Some(8000));
        assert_eq!(kept[1].price, Some(9000));
    }

    #[test]
    fn surrounding_whitespace_is_ignored_but_case_is_not() {
        let menus = vec![
            entry(" Kimchi ", Some(8000)),
            entry("Kimchi", Some(8000)),
            entry("kimchi", Some(8000)),
        ];
        let kept = dedup_menus(menus);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].name, " Kimchi ");
        assert_eq!(kept[1].name, "kimchi");
    }

    #[test]
    fn missing_price_is_its_own_key() {
        let menus = vec![entry("공깃밥", None), entry("공깃밥", Some(1000)), entry("공깃밥", None)];
        assert_eq!(dedup_menus(menus).len(), 2);
    }
}
