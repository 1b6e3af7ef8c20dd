//! Request bodies for the booking service's GraphQL endpoint.
//!
//! The endpoint accepts persisted-style bodies with `operationName`,
//! `variables` and an inline `query`; the operation name is repeated in the
//! `opName` query parameter of the URL.

use chrono::NaiveDate;
use serde_json::{json, Value};

use crate::client::validate_id;
use crate::error::ScraperError;

const MENU_QUERY: &str = "query menu($input: MenuParams) {
  menu(input: $input) {
    menus { id name desc price titleImageUrl schedules categoryIds }
  }
}";

const MENU_GROUPS_QUERY: &str = "query menuGroups($menuGroupsInput: MenuGroupParams) {
  menuGroups(input: $menuGroupsInput) @include(if: true) {
    menus { id categoryId name price impPrice titleImageUrl desc }
  }
}";

const CATEGORIES_QUERY: &str = "query categories($input: MenuParams) {
  categories(input: $input) {
    id categoryId businessId name depth order
    children { id categoryId parentCategoryId name depth order __typename }
    __typename
  }
}";

const SCHEDULE_QUERY: &str = "query orderBizItemSchedule($input: OrderBizItemScheduleParams) {
  orderBizItemSchedule(input: $input) {
    id isClosed
    schedule { id name slotId scheduleId unitStartDateTime unitStock isBusinessDay isSaleDay __typename }
    __typename
  }
}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphQlOperation {
    Menu,
    MenuGroups,
    Categories,
    OrderBizItemSchedule,
}

impl GraphQlOperation {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Menu => "menu",
            Self::MenuGroups => "menuGroups",
            Self::Categories => "categories",
            Self::OrderBizItemSchedule => "orderBizItemSchedule",
        }
    }
}

impl std::fmt::Display for GraphQlOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A ready-to-send GraphQL call.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphQlRequest {
    pub operation: GraphQlOperation,
    pub body: Value,
}

impl GraphQlRequest {
    fn new(operation: GraphQlOperation, variables: Value, query: &str) -> Self {
        Self {
            operation,
            body: json!({
                "operationName": operation.name(),
                "variables": variables,
                "query": query,
            }),
        }
    }
}

/// Pickup menus with per-day stock, for availability filtering.
#[must_use]
pub fn menu_request(booking_id: &str) -> GraphQlRequest {
    GraphQlRequest::new(
        GraphQlOperation::Menu,
        json!({
            "input": {
                "lang": "ko",
                "businessId": booking_id,
                "bizItemType": "PICKUP",
                "projections": "order_booking_count,CATEGORY,HAS_SUB_OPTION,review_score_avg",
                "fallback": {"isToday": true}
            }
        }),
        MENU_QUERY,
    )
}

#[must_use]
pub fn menu_groups_request(booking_id: &str) -> GraphQlRequest {
    GraphQlRequest::new(
        GraphQlOperation::MenuGroups,
        json!({
            "withMenuGroupOptions": false,
            "withMenuGroups": true,
            "withPopularMenuGroups": false,
            "withOrderDetails": false,
            "menuGroupsInput": {
                "businessId": booking_id,
                "withReviewScore": false,
                "withBookingCount": false,
                "lang": "ko",
                "fallback": {}
            }
        }),
        MENU_GROUPS_QUERY,
    )
}

/// Category tree for one orderable item. `slot_id` narrows it to the
/// categories currently on sale.
#[must_use]
pub fn categories_request(booking_id: &str, item_id: &str, slot_id: Option<&str>) -> GraphQlRequest {
    GraphQlRequest::new(
        GraphQlOperation::Categories,
        json!({
            "input": {
                "lang": "ko",
                "businessId": booking_id,
                "bizItemId": item_id,
                "isValidPopularOption": false,
                "slotId": slot_id
            }
        }),
        CATEGORIES_QUERY,
    )
}

#[must_use]
pub fn schedule_request(booking_id: &str, item_id: &str, start_date: NaiveDate) -> GraphQlRequest {
    GraphQlRequest::new(
        GraphQlOperation::OrderBizItemSchedule,
        json!({
            "input": {
                "lang": "ko",
                "businessId": booking_id,
                "bizItemId": item_id,
                "fallback": {"nextStartDate": start_date.format("%Y-%m-%d").to_string()}
            }
        }),
        SCHEDULE_QUERY,
    )
}

/// Order page URL the booking service expects as `Referer`.
///
/// Every booking call needs this referer, so it is where booking and item
/// ids are checked.
///
/// # Errors
///
/// [`ScraperError::InvalidUrl`] when either id is not a string of digits.
pub fn order_referer(
    booking_base_url: &str,
    booking_id: &str,
    item_id: &str,
) -> Result<String, ScraperError> {
    validate_id("booking id", booking_id)?;
    validate_id("item id", item_id)?;
    Ok(format!("{booking_base_url}/order/bizes/{booking_id}/items/{item_id}"))
}
