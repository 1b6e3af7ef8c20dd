use placemap_core::CategoryId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dedup::MenuIdentity;
use crate::menu::parse_price;

/// A node of the `categories` tree. Ids are collected from every depth.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingCategory {
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub children: Option<Vec<BookingCategory>>,
}

/// One menu as returned by the `menu` or `menuGroups` operations.
///
/// The two operations disagree on shape: `menu` lists `categoryIds`, while
/// `menuGroups` carries a scalar `categoryId` and sometimes only `impPrice`.
/// Loosely typed fields are kept as [`Value`] and read leniently.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuPayload {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub imp_price: Option<Value>,
    #[serde(default)]
    pub title_image_url: Option<String>,
    /// Per-day stock keyed `YYYY-MM-DD`.
    #[serde(default)]
    pub schedules: Option<Value>,
    #[serde(default)]
    pub category_ids: Option<Vec<CategoryId>>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
}

/// A booking-service menu normalized across both response shapes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingMenu {
    pub id: String,
    pub name: String,
    pub price: Option<i64>,
    pub description: String,
    pub image_url: Option<String>,
    pub category_ids: Vec<CategoryId>,
}

impl From<MenuPayload> for BookingMenu {
    fn from(payload: MenuPayload) -> Self {
        // A zero price means "see impPrice" on menuGroups responses.
        let price = parse_price(payload.price.as_ref())
            .filter(|price| *price != 0)
            .or_else(|| parse_price(payload.imp_price.as_ref()));

        let mut category_ids = payload.category_ids.unwrap_or_default();
        if let Some(id) = payload.category_id {
            category_ids.push(id);
        }
        category_ids.retain(|id| !id.as_str().is_empty());

        Self {
            id: payload.id.as_ref().map(value_to_id).unwrap_or_default(),
            name: payload.name.unwrap_or_default().trim().to_string(),
            price,
            description: payload.desc.unwrap_or_default(),
            image_url: payload.title_image_url.filter(|url| !url.is_empty()),
            category_ids,
        }
    }
}

impl MenuIdentity for BookingMenu {
    fn menu_name(&self) -> &str {
        &self.name
    }

    fn menu_price(&self) -> Option<i64> {
        self.price
    }
}

pub(crate) fn value_to_id(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}
